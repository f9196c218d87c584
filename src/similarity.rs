//! Jaro-Winkler similarity used to rank completions.
//!
//! Two deviations from the textbook metric are deliberate and affect rankings:
//!
//! - the Winkler bonus uses the *whole* shared prefix instead of capping it
//!   at four characters, weighted by `min(0.1, 1 / longer_len)` so the score
//!   stays within `[0, 1]`;
//! - [`bounded_similarity`] consults a precomputed [`PruningFilter`] and, when
//!   the Jaro score provably stays below [`BOOST_THRESHOLD`], returns a cheap
//!   prefix-based estimate instead of running the match search.
//!
//! Scores at or above the boost threshold are always exact.

use std::cmp::min;
use std::sync::LazyLock;

/// Jaro score from which the Winkler prefix bonus is applied.
pub const BOOST_THRESHOLD: f64 = 0.7;

/// Longest string length covered by the pruning filter. Longer pairs skip
/// the filter and are scored exactly.
pub const MAX_FILTER_LENGTH: usize = 64;

const MAX_PREFIX_WEIGHT: f64 = 0.1;

static FILTER: LazyLock<PruningFilter> = LazyLock::new(PruningFilter::new);

/// Jaro-Winkler similarity of `a` and `b` in `[0, 1]`.
///
/// ```
/// use fuzzdex::similarity;
///
/// assert_eq!(similarity("hello", "hello"), 1.0);
/// assert_eq!(similarity("abc", "xyz"), 0.0);
/// assert!(similarity("hel", "help") > similarity("hel", "hello"));
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (longer, shorter) = order_by_length(&a, &b);
    jaro_winkler(longer, shorter, common_prefix_len(longer, shorter))
}

/// Like [`similarity`], but may return a lower-bound estimate for pairs whose
/// score cannot reach [`BOOST_THRESHOLD`].
pub fn bounded_similarity(a: &str, b: &str) -> f64 {
    bounded_similarity_within(a, b, usize::MAX)
}

/// [`bounded_similarity`] with a length ceiling: pairs whose longer string
/// exceeds `ceiling` characters are not meaningful to rank and score 0.
pub fn bounded_similarity_within(a: &str, b: &str, ceiling: usize) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    bounded_similarity_chars(&a, &b, ceiling)
}

pub(crate) fn bounded_similarity_chars(a: &[char], b: &[char], ceiling: usize) -> f64 {
    let (longer, shorter) = order_by_length(a, b);
    if longer.is_empty() || longer.len() > ceiling {
        return 0.0;
    }

    let prefix = common_prefix_len(longer, shorter);
    if FILTER.is_insufficient(longer.len(), shorter.len(), prefix) {
        return prefix_estimate(longer.len(), shorter.len(), prefix);
    }
    jaro_winkler(longer, shorter, prefix)
}

/// Cheap lower-bound stand-in for pairs the filter rejects.
fn prefix_estimate(longer_len: usize, shorter_len: usize, prefix: usize) -> f64 {
    if shorter_len == 0 {
        return 0.0;
    }
    let prefix = prefix as f64;
    (prefix / shorter_len as f64 + prefix / longer_len as f64) / 3.0
}

// equal lengths are ordered by content so first-fit matching sees the same
// pair whichever way round it is called
fn order_by_length<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    if a.len() > b.len() || (a.len() == b.len() && a >= b) {
        (a, b)
    } else {
        (b, a)
    }
}

fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn jaro_winkler(longer: &[char], shorter: &[char], prefix: usize) -> f64 {
    let longer_len = longer.len();
    let shorter_len = shorter.len();
    if shorter_len == 0 {
        return 0.0;
    }

    let window = (longer_len / 2).saturating_sub(1);
    let mut used = vec![false; longer_len];
    let mut matched: Vec<char> = Vec::with_capacity(shorter_len);

    for (i, &c) in shorter.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = min(i + window + 1, longer_len);
        for j in start..end {
            if !used[j] && longer[j] == c {
                used[j] = true;
                matched.push(c);
                break;
            }
        }
    }

    if matched.is_empty() {
        return 0.0;
    }

    // each out-of-order pair is seen from both sides
    let transpositions = longer
        .iter()
        .zip(&used)
        .filter_map(|(c, &u)| u.then_some(c))
        .zip(&matched)
        .filter(|(x, y)| x != y)
        .count();

    let m = matched.len() as f64;
    let t = transpositions as f64 / 2.0;
    let jaro = (m / longer_len as f64 + m / shorter_len as f64 + (m - t) / m) / 3.0;

    if jaro < BOOST_THRESHOLD {
        return jaro;
    }
    let weight = MAX_PREFIX_WEIGHT.min(1.0 / longer_len as f64);
    jaro + weight * prefix as f64 * (1.0 - jaro)
}

/// Precomputed table of `(longer_len, shorter_len, prefix_len)` triples whose
/// Jaro score cannot reach [`BOOST_THRESHOLD`].
///
/// At most `shorter_len` characters can match and transpositions only lower
/// the score, so the Jaro score is bounded by `(shorter/longer + 2) / 3`.
/// A shared prefix does not raise that bound, so every prefix cell of a
/// `(longer, shorter)` row holds the same verdict; the prefix axis keeps a
/// lookup keyed by the same triple the fallback estimate is computed from.
/// The table is jagged: `cells[l][s][p]` exists for `s <= l` and `p <= s`.
pub struct PruningFilter {
    cells: Vec<Vec<Vec<bool>>>,
}

impl PruningFilter {
    fn new() -> Self {
        let cells = (0..=MAX_FILTER_LENGTH)
            .map(|longer| {
                (0..=longer)
                    .map(|shorter| {
                        let insufficient = jaro_upper_bound(longer, shorter) < BOOST_THRESHOLD;
                        vec![insufficient; shorter + 1]
                    })
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Whether the exact score for this shape is known to stay below the
    /// boost threshold. Shapes outside the table are never pruned.
    pub fn is_insufficient(&self, longer_len: usize, shorter_len: usize, prefix_len: usize) -> bool {
        self.cells
            .get(longer_len)
            .and_then(|rows| rows.get(shorter_len))
            .and_then(|row| row.get(prefix_len))
            .copied()
            .unwrap_or(false)
    }
}

/// Largest Jaro score a pair of this shape can reach.
fn jaro_upper_bound(longer: usize, shorter: usize) -> f64 {
    if shorter == 0 {
        return 0.0;
    }
    (shorter as f64 / longer as f64 + 2.0) / 3.0
}

/// The process-wide pruning filter used by [`bounded_similarity`].
pub fn pruning_filter() -> &'static PruningFilter {
    &FILTER
}
