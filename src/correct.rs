//! Spelling correction over the symmetric-delete index.
//!
//! The input is reduced by successive single-character deletions, breadth
//! first, so candidates come off the queue in order of how many characters
//! were removed. Each candidate is looked up in the correction index; the
//! terms it names are verified with the bounded edit distance. Outside
//! [`Verbosity::AllWithinMax`] the best distance found so far caps both the
//! verification and the expansion, and the walk stops as soon as the
//! remaining candidates cannot beat it.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::distance::distance_chars;
use crate::index::{Index, KeyKind, TermId};

/// A candidate correction returned by [`Index::correct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub term: String,
    /// Edit distance from the queried input to `term`.
    pub distance: usize,
    /// Frequency of `term` in the underlying vocabulary.
    pub frequency: u64,
}

/// Controls which suggestions are returned by [`Index::correct`].
///
/// - `BestOnly`: the single best suggestion (closest distance, then highest frequency)
/// - `BestTier`: every suggestion at the smallest distance found, by frequency
/// - `AllWithinMax`: every suggestion within the maximum distance, by distance then frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verbosity {
    BestOnly,
    BestTier,
    AllWithinMax,
}

impl Verbosity {
    fn prunes(self) -> bool {
        self != Verbosity::AllWithinMax
    }
}

struct CorrectionSearch<'a> {
    index: &'a Index,
    input: Vec<char>,
    max_distance: usize,
    verbosity: Verbosity,
    /// Smallest distance found so far, or `max_distance` while none is.
    best: usize,
    found: Vec<(TermId, usize)>,
    considered: HashSet<TermId>,
    queue: VecDeque<String>,
    queued: HashSet<String>,
}

impl<'a> CorrectionSearch<'a> {
    fn new(index: &'a Index, input: &str, max_distance: usize, verbosity: Verbosity) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(input.to_string());
        Self {
            index,
            input: input.chars().collect(),
            max_distance,
            verbosity,
            best: max_distance,
            found: Vec::new(),
            considered: HashSet::new(),
            queue,
            queued: HashSet::from([input.to_string()]),
        }
    }

    fn run(&mut self) {
        let index = self.index;
        let input_len = self.input.len();

        while let Some(candidate) = self.queue.pop_front() {
            let candidate_len = candidate.chars().count();
            let deleted = input_len - candidate_len;

            // candidates are ordered by deletion count, so none that follow
            // can be closer than this one
            if deleted > self.best {
                break;
            }

            if let Some(entry) = index.corrections.get(&candidate) {
                if let KeyKind::Term(id) = entry.kind {
                    if self.considered.insert(id) {
                        // a pure deletion of the input: the distance is exact
                        self.record(id, deleted);
                        if deleted == 0 && self.verbosity == Verbosity::BestOnly {
                            return;
                        }
                    }
                }

                for &id in &entry.suggestions {
                    if !self.considered.insert(id) {
                        continue;
                    }
                    if let Some(distance) = self.verify(id, deleted, candidate_len) {
                        self.record(id, distance);
                    }
                }
            }

            if deleted < self.max_distance && candidate_len > 1 {
                // do not create edits with edit distance smaller than suggestions already found
                if self.verbosity.prunes() && deleted >= self.best {
                    continue;
                }
                self.expand(&candidate);
            }
        }
    }

    /// True distance from the input to term `id`, reached through a candidate
    /// with `deleted` characters removed from the input.
    fn verify(&self, id: TermId, deleted: usize, candidate_len: usize) -> Option<usize> {
        let entry = self.index.entry(id);
        if entry.len.abs_diff(self.input.len()) > self.best {
            return None;
        }

        if deleted == 0 {
            // only the term side was reduced, so it is the input plus insertions
            let distance = entry.len - candidate_len;
            return (distance <= self.best).then_some(distance);
        }

        // Deletions on both sides: "bnak" and "xban" each meet "bank" with one
        // deletion per side, but only "bnak" is a single edit away.
        let term: Vec<char> = entry.term.chars().collect();
        distance_chars(&self.input, &term, self.best)
    }

    fn record(&mut self, id: TermId, distance: usize) {
        if distance > self.best {
            return;
        }
        if self.verbosity.prunes() {
            if distance < self.best {
                self.found.retain(|&(_, d)| d <= distance);
            }
            self.best = distance;
        }
        self.found.push((id, distance));
    }

    fn expand(&mut self, candidate: &str) {
        let chars: Vec<char> = candidate.chars().collect();
        for i in 0..chars.len() {
            let delete: String = chars
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, c)| c)
                .collect();
            if self.queued.insert(delete.clone()) {
                self.queue.push_back(delete);
            }
        }
    }

    fn into_suggestions(self) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = self
            .found
            .into_iter()
            .map(|(id, distance)| {
                let entry = self.index.entry(id);
                Suggestion {
                    term: entry.term.clone(),
                    distance,
                    frequency: entry.frequency,
                }
            })
            .collect();

        suggestions.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| a.term.cmp(&b.term))
        });
        if self.verbosity == Verbosity::BestOnly {
            suggestions.truncate(1);
        }
        suggestions
    }
}

impl Index {
    /// Look up corrections for `input`.
    ///
    /// `max_distance` is capped by the index's configured `max_edit_distance`.
    /// `verbosity` controls which suggestions are returned:
    /// - `Verbosity::BestOnly` returns a single best suggestion (closest distance, then highest frequency).
    /// - `Verbosity::BestTier` returns all suggestions with the minimal edit distance found (sorted by frequency desc).
    /// - `Verbosity::AllWithinMax` returns all suggestions with distance <= max_distance, sorted by distance asc then frequency desc.
    ///
    /// An input with no qualifying neighbours yields an empty list.
    pub fn correct(&self, input: &str, max_distance: usize, verbosity: Verbosity) -> Vec<Suggestion> {
        if input.is_empty() {
            return Vec::new();
        }

        let limit = self.config.max_edit_distance;
        let max_distance = if max_distance > limit {
            warn!(requested = max_distance, limit, "max_distance clamped to the index maximum");
            limit
        } else {
            max_distance
        };

        // early termination - input is too long to be near any term
        let input_len = input.chars().count();
        if input_len.saturating_sub(max_distance) > self.max_term_length {
            trace!(input, "input longer than every term");
            return Vec::new();
        }

        let mut search = CorrectionSearch::new(self, input, max_distance, verbosity);
        search.run();
        trace!(
            input,
            ?verbosity,
            max_distance,
            candidates = search.queued.len(),
            verified = search.considered.len(),
            found = search.found.len(),
            "correction lookup"
        );
        search.into_suggestions()
    }

    // Convenience helpers at the configured maximum distance:

    /// Return the single best suggestion (if any) for `input`.
    pub fn find_top(&self, input: &str) -> Option<Suggestion> {
        self.correct(input, self.config.max_edit_distance, Verbosity::BestOnly)
            .into_iter()
            .next()
    }

    /// Return all suggestions with minimal distance.
    pub fn find_closest(&self, input: &str) -> Vec<Suggestion> {
        self.correct(input, self.config.max_edit_distance, Verbosity::BestTier)
    }

    /// Return all suggestions within the configured max distance.
    pub fn find_all(&self, input: &str) -> Vec<Suggestion> {
        self.correct(input, self.config.max_edit_distance, Verbosity::AllWithinMax)
    }
}
