//! The symmetric-delete index and its builder.
//!
//! It stores:
//! - the vocabulary: an append-only list of unique terms, where a term's
//!   position is its stable [`TermId`] and holds its accumulated frequency;
//! - the correction index: a map from degraded form to the ids of the terms
//!   that produce it, where each key also records whether it is itself a
//!   vocabulary term;
//! - the completion index: a map from degraded *prefix* forms to term ids.
//!
//! All cross references are ids into the vocabulary, so there are no pointer
//! graphs and the finished [`Index`] is plain owned data. It is immutable and
//! can be shared across threads for concurrent queries; building happens
//! beforehand through a single-owner [`IndexBuilder`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::config::IndexConfig;
use crate::deletes::{collect_deletes, generate_prefix_deletes};
use crate::error::{Error, Result};

/// Stable identity of a vocabulary term, equal to its insertion order.
pub type TermId = u32;

#[derive(Debug, Clone)]
pub(crate) struct VocabularyEntry {
    pub(crate) term: String,
    /// Length in chars.
    pub(crate) len: usize,
    pub(crate) frequency: u64,
}

/// What a correction-index key is, besides a degraded form of other terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Known only as a deletion of other terms.
    Derived,
    /// A vocabulary term in its own right.
    Term(TermId),
}

#[derive(Debug, Clone)]
pub(crate) struct DeleteEntry {
    pub(crate) kind: KeyKind,
    /// Terms that produce this key by deletion. Unique, insertion ordered.
    pub(crate) suggestions: Vec<TermId>,
}

impl DeleteEntry {
    fn derived() -> Self {
        Self {
            kind: KeyKind::Derived,
            suggestions: Vec::new(),
        }
    }
}

// ids are handed out in increasing order and each term contributes a key at
// most once, so checking the tail is enough to keep the list unique
fn push_unique(ids: &mut Vec<TermId>, id: TermId) {
    if ids.last() != Some(&id) {
        ids.push(id);
    }
}

/// Size summary of a built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    pub terms: usize,
    pub correction_keys: usize,
    pub completion_keys: usize,
    pub max_term_length: usize,
}

/// Accumulates `(term, frequency)` pairs into an [`Index`].
///
/// Not meant for concurrent use: callers load the whole corpus, then call
/// [`finish`](IndexBuilder::finish) and share the resulting index.
#[derive(Debug)]
pub struct IndexBuilder {
    config: IndexConfig,
    vocabulary: Vec<VocabularyEntry>,
    corrections: HashMap<String, DeleteEntry>,
    completions: HashMap<String, Vec<TermId>>,
    max_term_length: usize,
}

impl IndexBuilder {
    /// Create an empty builder. Fails if `config` does not validate.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            vocabulary: Vec::new(),
            corrections: HashMap::new(),
            completions: HashMap::new(),
            max_term_length: 0,
        })
    }

    /// Add one occurrence count for `term`.
    ///
    /// Returns `true` if the term was new. A known term only has its frequency
    /// accumulated (saturating); its degraded forms are generated exactly once,
    /// on first insertion. Empty terms are ignored.
    ///
    /// Fails with [`Error::CapacityExhausted`] when a new term would not fit
    /// in the vocabulary.
    pub fn add_term(&mut self, term: &str, frequency: u64) -> Result<bool> {
        if term.is_empty() {
            trace!("ignoring empty term");
            return Ok(false);
        }

        if let Some(DeleteEntry {
            kind: KeyKind::Term(id),
            ..
        }) = self.corrections.get(term)
        {
            let entry = &mut self.vocabulary[*id as usize];
            entry.frequency = entry.frequency.saturating_add(frequency);
            return Ok(false);
        }

        let capacity = self.config.capacity;
        if self.vocabulary.len() >= capacity as usize {
            return Err(Error::CapacityExhausted { capacity });
        }
        let id = self.vocabulary.len() as TermId;

        let chars: Vec<char> = term.chars().collect();
        self.vocabulary.push(VocabularyEntry {
            term: term.to_string(),
            len: chars.len(),
            frequency,
        });
        self.max_term_length = self.max_term_length.max(chars.len());

        // a key that was only a derived form until now becomes a term
        self.corrections
            .entry(term.to_string())
            .or_insert_with(DeleteEntry::derived)
            .kind = KeyKind::Term(id);

        let mut deletes = HashSet::new();
        collect_deletes(&chars, self.config.max_edit_distance, &mut deletes);
        for delete in deletes {
            let entry = self
                .corrections
                .entry(delete)
                .or_insert_with(DeleteEntry::derived);
            push_unique(&mut entry.suggestions, id);
        }

        if self.config.completion.enabled {
            for key in generate_prefix_deletes(term, &self.config.completion.prefix_tiers) {
                push_unique(self.completions.entry(key).or_default(), id);
            }
        }

        Ok(true)
    }

    /// Add every pair from `corpus`, returning how many terms were new.
    pub fn add_terms<I, S>(&mut self, corpus: I) -> Result<usize>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for (term, frequency) in corpus {
            if self.add_term(term.as_ref(), frequency)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Number of distinct terms added so far.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Freeze the builder into a queryable index.
    pub fn finish(self) -> Index {
        let index = Index {
            config: self.config,
            vocabulary: self.vocabulary,
            corrections: self.corrections,
            completions: self.completions,
            max_term_length: self.max_term_length,
        };
        let stats = index.stats();
        debug!(
            terms = stats.terms,
            correction_keys = stats.correction_keys,
            completion_keys = stats.completion_keys,
            max_term_length = stats.max_term_length,
            "index built"
        );
        index
    }
}

/// Immutable symmetric-delete index answering correction and completion
/// queries.
///
/// ```
/// use fuzzdex::{Index, IndexConfig, Verbosity};
///
/// let index = Index::build(
///     IndexConfig::default(),
///     [("cat", 5), ("cats", 3), ("bat", 1)],
/// )
/// .unwrap();
///
/// let suggestions = index.correct("cet", 1, Verbosity::AllWithinMax);
/// assert_eq!(suggestions.len(), 1);
/// assert_eq!(suggestions[0].term, "cat");
/// ```
#[derive(Debug)]
pub struct Index {
    pub(crate) config: IndexConfig,
    pub(crate) vocabulary: Vec<VocabularyEntry>,
    pub(crate) corrections: HashMap<String, DeleteEntry>,
    pub(crate) completions: HashMap<String, Vec<TermId>>,
    pub(crate) max_term_length: usize,
}

impl Index {
    /// Build an index from an iterator of `(term, frequency)` pairs.
    /// Repeated terms have their frequencies summed.
    pub fn build<I, S>(config: IndexConfig, corpus: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut builder = IndexBuilder::new(config)?;
        builder.add_terms(corpus)?;
        Ok(builder.finish())
    }

    pub fn builder(config: IndexConfig) -> Result<IndexBuilder> {
        IndexBuilder::new(config)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.term_id(term).is_some()
    }

    /// Accumulated frequency of `term`, if it is in the vocabulary.
    pub fn frequency(&self, term: &str) -> Option<u64> {
        self.term_id(term)
            .map(|id| self.vocabulary[id as usize].frequency)
    }

    /// Vocabulary identity of `term`.
    pub fn term_id(&self, term: &str) -> Option<TermId> {
        match self.corrections.get(term)?.kind {
            KeyKind::Term(id) => Some(id),
            KeyKind::Derived => None,
        }
    }

    /// The term with identity `id`.
    pub fn term(&self, id: TermId) -> Option<&str> {
        self.vocabulary.get(id as usize).map(|e| e.term.as_str())
    }

    /// How `key` appears in the correction index, if at all.
    pub fn key_kind(&self, key: &str) -> Option<KeyKind> {
        self.corrections.get(key).map(|e| e.kind)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            terms: self.vocabulary.len(),
            correction_keys: self.corrections.len(),
            completion_keys: self.completions.len(),
            max_term_length: self.max_term_length,
        }
    }

    pub(crate) fn entry(&self, id: TermId) -> &VocabularyEntry {
        &self.vocabulary[id as usize]
    }
}
