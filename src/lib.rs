//! fuzzdex - symmetric-delete spelling correction and prefix completion
//!
//! An [`Index`] is built once from `(term, frequency)` pairs and then answers
//! two kinds of queries without scanning the vocabulary:
//!
//! - [`Index::correct`] returns known terms within a bounded Damerau-Levenshtein
//!   distance of a misspelled word, ranked by distance then frequency;
//! - [`Index::complete`] returns the terms most similar to a partial input,
//!   ranked by Jaro-Winkler similarity.
//!
//! The distance and similarity metrics are exported on their own as well.
//!
//! Examples
//!
//! - Runtime construction from any source of counted terms:
//!
//! ```
//! use fuzzdex::{Index, IndexConfig, Verbosity};
//!
//! let entries = vec![("hello".to_string(), 10u64), ("help".to_string(), 4), ("world".to_string(), 7)];
//! let index = Index::build(IndexConfig::default(), entries).unwrap();
//!
//! let corrections = index.correct("helo", 2, Verbosity::BestTier);
//! assert_eq!(corrections[0].term, "hello");
//!
//! let completions = index.complete("hel", 5);
//! assert_eq!(completions[0].term, "help");
//! ```
//!
//! - Compile-time embedding of a word list (the index itself is built at run
//!   time from the embedded pairs):
//!
//! ```ignore
//! use fuzzdex::include_dictionary;
//!
//! let index = include_dictionary!("path/to/words.txt", max_distance = 2, lowercase = true).unwrap();
//! let top = index.find_top("helo");
//! ```

pub mod complete;
pub mod config;
pub mod correct;
pub mod deletes;
pub mod distance;
pub mod error;
pub mod index;
pub mod similarity;

/// Re-export commonly used types.
pub use complete::Completion;
pub use config::{CompletionConfig, IndexConfig, PrefixTier, PrefixTiers};
pub use correct::{Suggestion, Verbosity};
pub use deletes::{generate_deletes, generate_prefix_deletes};
pub use distance::distance;
pub use error::{Error, Result};
pub use index::{Index, IndexBuilder, IndexStats, KeyKind, TermId};
pub use similarity::{bounded_similarity, bounded_similarity_within, similarity, BOOST_THRESHOLD};

/// Re-export the compile-time dictionary macro from the proc-macro crate.
///
/// The proc-macro crate is the workspace member `fuzzdex-macros`; re-exporting
/// it here lets consumers write `use fuzzdex::include_dictionary;`.
pub use fuzzdex_macros::include_dictionary;

#[doc(hidden)]
pub mod __private {
    pub use phf;
}
