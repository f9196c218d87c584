//! Degraded-form generation for the delete-index.
//!
//! A degraded form is a term with some characters removed; nothing is ever
//! reordered or substituted. Generation is a breadth-first walk by deletion
//! level, so a form with `k` characters removed is discovered at level `k`.

use std::collections::HashSet;

use crate::config::PrefixTiers;

/// Generate all deletion variants for `term` up to `max_deletions`.
///
/// For example, for `term = "hello"` and `max_deletions = 2` this includes the
/// forms with one and two characters removed. The term itself is not part of
/// the result, and strings of one character are never reduced further, so the
/// empty string is never produced.
///
/// ```
/// let deletes = fuzzdex::generate_deletes("abc", 1);
/// let mut sorted: Vec<_> = deletes.into_iter().collect();
/// sorted.sort();
/// assert_eq!(sorted, ["ab", "ac", "bc"]);
/// ```
pub fn generate_deletes(term: &str, max_deletions: usize) -> HashSet<String> {
    let chars: Vec<char> = term.chars().collect();
    let mut deletes = HashSet::new();
    collect_deletes(&chars, max_deletions, &mut deletes);
    deletes
}

pub(crate) fn collect_deletes(chars: &[char], max_deletions: usize, out: &mut HashSet<String>) {
    let mut frontier: Vec<Vec<char>> = vec![chars.to_vec()];

    for _ in 0..max_deletions {
        let mut next: Vec<Vec<char>> = Vec::new();
        for s in &frontier {
            if s.len() <= 1 {
                continue;
            }
            for i in 0..s.len() {
                let mut t = s.clone();
                t.remove(i);
                if out.insert(t.iter().collect()) {
                    next.push(t);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
}

/// Generate the keys under which `term` is indexed for completion.
///
/// Every prefix of the term contributes itself and its deletion variants,
/// with the deletion budget taken from `tiers` by prefix length. The
/// single-character prefix is always present. The full term contributes only
/// its deletion variants: a term is found under its own spelling through the
/// vocabulary, not through this index.
pub fn generate_prefix_deletes(term: &str, tiers: &PrefixTiers) -> HashSet<String> {
    let chars: Vec<char> = term.chars().collect();
    let mut keys = HashSet::new();

    for len in (1..=chars.len()).rev() {
        let prefix = &chars[..len];
        if len < chars.len() || len == 1 {
            keys.insert(prefix.iter().collect());
        }
        collect_deletes(prefix, tiers.budget(len), &mut keys);
    }
    keys
}
