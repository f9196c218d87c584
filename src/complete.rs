//! Prefix completion over the delete-index.
//!
//! Candidates are gathered from the completion index (prefixes of terms and
//! their tiered deletes), kept only if they are at least as long as the input,
//! and ranked by [`bounded_similarity`](crate::bounded_similarity). When more
//! candidates qualify than were asked for, a bounded min-heap holds the
//! current best `k` so the full candidate set is never sorted.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use tracing::trace;

use crate::deletes::collect_deletes;
use crate::index::{Index, TermId};
use crate::similarity::bounded_similarity_chars;

/// A completion returned by [`Index::complete`].
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub term: String,
    /// Similarity of `term` to the input, in `[0, 1]`.
    pub similarity: f64,
    pub frequency: u64,
}

/// Candidate ordered from worst to best: lower similarity first, then lower
/// frequency, then the lexicographically later term.
struct Ranked<'a> {
    similarity: f64,
    frequency: u64,
    term: &'a str,
}

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.similarity
            .total_cmp(&other.similarity)
            .then_with(|| self.frequency.cmp(&other.frequency))
            .then_with(|| other.term.cmp(self.term))
    }
}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked<'_> {}

/// Keeps the `capacity` best items seen so far.
struct TopK<T: Ord> {
    capacity: usize,
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> TopK<T> {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    fn offer(&mut self, item: T) {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(item));
            return;
        }
        // once full, only an item better than the current minimum gets in
        if let Some(mut worst) = self.heap.peek_mut() {
            if item > worst.0 {
                *worst = Reverse(item);
            }
        }
    }

    /// Items from best to worst.
    fn into_sorted_vec(self) -> Vec<T> {
        // ascending order of `Reverse` is descending order of `T`
        self.heap.into_sorted_vec().into_iter().map(|Reverse(item)| item).collect()
    }
}

impl Index {
    /// Complete the partial input `input`, returning at most `max_results`
    /// terms ordered by descending similarity.
    ///
    /// ```
    /// use fuzzdex::{Index, IndexConfig};
    ///
    /// let index = Index::build(IndexConfig::default(), [("hello", 1), ("help", 1)]).unwrap();
    /// let completions = index.complete("hel", 2);
    /// let terms: Vec<&str> = completions.iter().map(|c| c.term.as_str()).collect();
    /// assert_eq!(terms, ["help", "hello"]);
    /// ```
    pub fn complete(&self, input: &str, max_results: usize) -> Vec<Completion> {
        let completion = &self.config.completion;
        if input.is_empty() || max_results == 0 || !completion.enabled {
            return Vec::new();
        }

        let chars: Vec<char> = input.chars().collect();
        let ceiling = completion.max_scored_length.unwrap_or(usize::MAX);
        // completions are never shorter than the input
        if chars.len() > self.max_term_length || chars.len() > ceiling {
            trace!(input, "input longer than every completable term");
            return Vec::new();
        }

        let candidates = self.completion_candidates(input, &chars);

        let scored = candidates.iter().map(|&id| {
            let entry = self.entry(id);
            let term: Vec<char> = entry.term.chars().collect();
            Ranked {
                similarity: bounded_similarity_chars(&chars, &term, ceiling),
                frequency: entry.frequency,
                term: entry.term.as_str(),
            }
        });

        let ranked: Vec<Ranked<'_>> = if candidates.len() <= max_results {
            let mut all: Vec<Ranked<'_>> = scored.collect();
            all.sort_by(|a, b| b.cmp(a));
            all
        } else {
            let mut top = TopK::new(max_results);
            for candidate in scored {
                top.offer(candidate);
            }
            top.into_sorted_vec()
        };

        trace!(input, candidates = candidates.len(), returned = ranked.len(), "completion lookup");

        ranked
            .into_iter()
            .map(|r| Completion {
                term: r.term.to_string(),
                similarity: r.similarity,
                frequency: r.frequency,
            })
            .collect()
    }

    fn completion_candidates(&self, input: &str, chars: &[char]) -> HashSet<TermId> {
        let mut candidates = HashSet::new();
        if let Some(id) = self.term_id(input) {
            candidates.insert(id);
        }

        if chars.len() < self.config.completion.direct_lookup_below {
            self.collect_completions(input, chars.len(), &mut candidates);
        } else {
            let budget = ((chars.len() - 1) / 3).min(self.config.completion.max_input_deletions);
            let mut keys = HashSet::new();
            collect_deletes(chars, budget, &mut keys);
            self.collect_completions(input, chars.len(), &mut candidates);
            for key in &keys {
                self.collect_completions(key, chars.len(), &mut candidates);
            }
        }
        candidates
    }

    fn collect_completions(&self, key: &str, min_len: usize, out: &mut HashSet<TermId>) {
        if let Some(ids) = self.completions.get(key) {
            out.extend(ids.iter().copied().filter(|&id| self.entry(id).len >= min_len));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompletionConfig, IndexConfig};

    fn index(entries: &[(&str, u64)]) -> Index {
        Index::build(IndexConfig::default(), entries.iter().copied()).unwrap()
    }

    fn terms(completions: &[Completion]) -> Vec<&str> {
        completions.iter().map(|c| c.term.as_str()).collect()
    }

    #[test]
    fn test_hel_example() {
        let index = index(&[("hello", 4), ("help", 2), ("world", 9)]);
        let found = index.complete("hel", 2);
        assert_eq!(terms(&found), ["help", "hello"]);
        assert!(found[0].similarity > found[1].similarity);
    }

    #[test]
    fn test_input_itself_is_a_candidate() {
        let index = index(&[("hel", 1), ("hello", 4)]);
        let found = index.complete("hel", 5);
        assert_eq!(terms(&found), ["hel", "hello"]);
        assert_eq!(found[0].similarity, 1.0);
    }

    #[test]
    fn test_shorter_terms_excluded() {
        let index = index(&[("he", 1), ("hello", 4)]);
        assert_eq!(terms(&index.complete("hel", 5)), ["hello"]);
    }

    #[test]
    fn test_limit_respected() {
        let index = index(&[("car", 1), ("card", 2), ("care", 3), ("cart", 4), ("carpet", 5)]);
        let found = index.complete("car", 2);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].term, "car");
        // ties on similarity fall back to frequency
        assert_eq!(found[1].term, "cart");
        assert!(index.complete("car", 0).is_empty());
    }

    #[test]
    fn test_top_k_matches_full_sort() {
        let words = [
            ("present", 5),
            ("presence", 3),
            ("preserve", 8),
            ("president", 2),
            ("press", 9),
            ("pressure", 1),
            ("prestige", 4),
        ];
        let index = index(&words);
        let everything = index.complete("pres", words.len());
        for k in 1..words.len() {
            let top = index.complete("pres", k);
            assert_eq!(terms(&top), terms(&everything[..k]), "k={k}");
        }
    }

    #[test]
    fn test_typo_in_longer_input() {
        let index = index(&[("algorithm", 5), ("alligator", 1)]);
        // one character dropped from the prefix "algor"
        let found = index.complete("algr", 1);
        assert_eq!(terms(&found), ["algorithm"]);
        let found = index.complete("algoirt", 1);
        assert_eq!(terms(&found), ["algorithm"]);
    }

    #[test]
    fn test_scored_length_ceiling() {
        let config = IndexConfig::default().with_completion(CompletionConfig {
            max_scored_length: Some(4),
            ..CompletionConfig::default()
        });
        let index = Index::build(config, [("help", 1), ("hello", 1)]).unwrap();
        let found = index.complete("hel", 2);
        assert_eq!(terms(&found), ["help", "hello"]);
        assert_eq!(found[1].similarity, 0.0);
    }

    #[test]
    fn test_disabled_completion() {
        let config = IndexConfig::default().with_completion(CompletionConfig::disabled());
        let index = Index::build(config, [("hello", 1)]).unwrap();
        assert!(index.complete("hel", 3).is_empty());
    }

    #[test]
    fn test_unknown_prefix() {
        let index = index(&[("hello", 1)]);
        assert!(index.complete("xyz", 3).is_empty());
        assert!(index.complete("", 3).is_empty());
    }

    #[test]
    fn test_input_deletions_capped() {
        let config = IndexConfig::default().with_completion(CompletionConfig {
            max_input_deletions: 0,
            ..CompletionConfig::default()
        });
        let index = Index::build(config, [("algorithm", 1)]).unwrap();
        // dropping the stray "x" needs a deletion from the input
        assert!(index.complete("algox", 1).is_empty());
        assert_eq!(terms(&index.complete("algo", 1)), ["algorithm"]);
    }

    #[test]
    fn test_top_k_keeps_best() {
        let mut top = TopK::new(3);
        for n in [5, 1, 9, 3, 7, 2, 8] {
            top.offer(n);
        }
        assert_eq!(top.into_sorted_vec(), vec![9, 8, 7]);
    }
}
