//! Index configuration.
//!
//! The variants of the symmetric-delete algorithm (how deep the correction
//! index goes, how aggressively prefixes are indexed for completion) are all
//! parameterizations of the same structures, so they live behind one
//! configuration surface instead of separate implementations.
//!
//! ```
//! use fuzzdex::IndexConfig;
//!
//! let config = IndexConfig::from_toml(
//!     r#"
//!     max_edit_distance = 1
//!
//!     [completion]
//!     direct_lookup_below = 3
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.max_edit_distance, 1);
//! assert!(config.completion.enabled);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for building an [`Index`](crate::Index).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Maximum number of deletions indexed per term; also the upper bound
    /// for the `max_distance` argument of [`Index::correct`](crate::Index::correct).
    pub max_edit_distance: usize,

    /// Maximum number of distinct terms the vocabulary may hold.
    pub capacity: u32,

    pub completion: CompletionConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            capacity: u32::MAX,
            completion: CompletionConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Parse and validate a configuration from a TOML document.
    /// Missing keys take their default values.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: IndexConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_edit_distance(mut self, max_edit_distance: usize) -> Self {
        self.max_edit_distance = max_edit_distance;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_completion(mut self, completion: CompletionConfig) -> Self {
        self.completion = completion;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig(
                "capacity must allow at least one term".to_string(),
            ));
        }
        self.completion.prefix_tiers.validate()?;
        if self.completion.max_scored_length == Some(0) {
            return Err(Error::InvalidConfig(
                "max_scored_length must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the prefix (autocomplete) side of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Build the prefix delete-index. When disabled, `complete` returns nothing.
    pub enabled: bool,

    pub prefix_tiers: PrefixTiers,

    /// Inputs shorter than this many characters are answered by a single
    /// direct lookup instead of expanding delete-variants of the input.
    pub direct_lookup_below: usize,

    /// Upper bound on the deletions applied to a longer input, whose budget
    /// otherwise grows as `(len - 1) / 3`.
    pub max_input_deletions: usize,

    /// Strings longer than this are not meaningful to rank and score 0.
    pub max_scored_length: Option<usize>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix_tiers: PrefixTiers::default(),
            direct_lookup_below: 4,
            max_input_deletions: 3,
            max_scored_length: None,
        }
    }
}

impl CompletionConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// One step of the prefix tier table: prefixes of at most `max_len`
/// characters get `deletions` deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixTier {
    pub max_len: usize,
    pub deletions: usize,
}

/// Length-dependent deletion budget applied when indexing a term's prefixes.
///
/// Short prefixes carry little signal; indexing many deletes of them would
/// inflate the index without improving recall. Tiers are consulted in order
/// and the first tier whose `max_len` covers the prefix wins; longer prefixes
/// get `fallback` deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixTiers {
    pub tiers: Vec<PrefixTier>,
    pub fallback: usize,
}

impl Default for PrefixTiers {
    fn default() -> Self {
        Self {
            tiers: vec![
                PrefixTier { max_len: 1, deletions: 0 },
                PrefixTier { max_len: 2, deletions: 1 },
                PrefixTier { max_len: 4, deletions: 1 },
            ],
            fallback: 2,
        }
    }
}

impl PrefixTiers {
    /// Deletion budget for a prefix of `prefix_len` characters.
    pub fn budget(&self, prefix_len: usize) -> usize {
        self.tiers
            .iter()
            .find(|tier| prefix_len <= tier.max_len)
            .map_or(self.fallback, |tier| tier.deletions)
    }

    fn validate(&self) -> Result<()> {
        for pair in self.tiers.windows(2) {
            if pair[1].max_len <= pair[0].max_len {
                return Err(Error::InvalidConfig(format!(
                    "prefix tiers must have strictly increasing max_len ({} follows {})",
                    pair[1].max_len, pair[0].max_len
                )));
            }
        }
        Ok(())
    }
}
