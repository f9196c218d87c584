//! Bounded Damerau-Levenshtein distance.
//!
//! The delete-index only records that two strings share a deletion; whether
//! they are really one substitution, one transposition or two deletes apart
//! has to be settled by an exact distance. This is the optimal string
//! alignment form: insertions, deletions, substitutions and adjacent
//! transpositions, each substring edited at most once.

use std::cmp::min;
use std::mem;

/// Edit distance between `a` and `b`, or `None` once it provably exceeds `max`.
///
/// Lengths are counted in `char`s. The result is symmetric in `a` and `b`.
///
/// ```
/// use fuzzdex::distance;
///
/// assert_eq!(distance("ab", "ba", 2), Some(1));
/// assert_eq!(distance("kitten", "sitting", 3), Some(3));
/// assert_eq!(distance("kitten", "sitting", 2), None);
/// ```
pub fn distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    distance_chars(&a, &b, max)
}

pub(crate) fn distance_chars(a: &[char], b: &[char], max: usize) -> Option<usize> {
    // the distance can never be smaller than the length difference
    if a.len().abs_diff(b.len()) > max {
        return None;
    }
    if a.is_empty() {
        return Some(b.len());
    }
    if b.is_empty() {
        return Some(a.len());
    }

    let b_len = b.len();
    let mut prev_two: Vec<usize> = (0..b_len + 1).collect();
    let mut prev: Vec<usize> = (0..b_len + 1).collect();
    let mut curr: Vec<usize> = vec![0; b_len + 1];
    let mut prev_row_min = 0;

    for (i, &a_char) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for (j, &b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            let mut cell = min(curr[j] + 1, min(prev[j + 1] + 1, prev[j] + cost));
            if i > 0 && j > 0 && a_char != b_char && a_char == b[j - 1] && a[i - 1] == b_char {
                cell = min(cell, prev_two[j - 1] + 1);
            }
            curr[j + 1] = cell;
            row_min = min(row_min, cell);
        }

        // a cell draws on the two rows above it, so two rows over budget
        // mean every later row is over budget as well
        if row_min > max && prev_row_min > max {
            return None;
        }
        prev_row_min = row_min;

        mem::swap(&mut prev_two, &mut prev);
        mem::swap(&mut prev, &mut curr);
    }

    let result = prev[b_len];
    (result <= max).then_some(result)
}
