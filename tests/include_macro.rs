use fuzzdex::{include_dictionary, Verbosity};

#[test]
fn test_include_macro_basic_lookup() {
    // Embed tests/data/words.txt at compile time; the index is built here
    let index = include_dictionary!("tests/data/words.txt", max_distance = 2, lowercase = true).unwrap();

    // Exact match should return the word with distance 0 using BestOnly verbosity
    let top = index.correct("world", 2, Verbosity::BestOnly);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].term, "world");
    assert_eq!(top[0].distance, 0);
    assert_eq!(top[0].frequency, 1);

    // A typical misspelling should return "hello" among the closest suggestions
    let suggestions = index.correct("helo", 2, Verbosity::BestTier);
    assert!(suggestions.iter().any(|s| s.term == "hello"));
}

#[test]
fn test_include_macro_folds_and_sums() {
    let index = include_dictionary!("tests/data/words.txt", max_distance = 2, lowercase = true).unwrap();

    // "hello" and "Hello" fold into one entry
    assert_eq!(index.frequency("hello"), Some(2));
    assert!(!index.contains("Hello"));
    assert_eq!(index.config().max_edit_distance, 2);

    let exact_case = include_dictionary!("tests/data/words.txt", max_distance = 1).unwrap();
    assert_eq!(exact_case.frequency("hello"), Some(1));
    assert_eq!(exact_case.frequency("Hello"), Some(1));
    assert_eq!(exact_case.config().max_edit_distance, 1);
}

#[test]
fn test_include_macro_closest_multiple() {
    let index = include_dictionary!("tests/data/words.txt", max_distance = 2, lowercase = true).unwrap();

    // "appl" is close to "apple" and "apply" (both distance 1)
    let closest = index.correct("appl", 2, Verbosity::BestTier);
    let terms: Vec<&str> = closest.iter().map(|s| s.term.as_str()).collect();

    assert!(terms.contains(&"apple"));
    assert!(terms.contains(&"apply"));
    assert!(closest.iter().all(|s| s.distance == 1));
}

#[test]
fn test_include_macro_all_and_ordering() {
    let index = include_dictionary!("tests/data/words.txt", max_distance = 2, lowercase = true).unwrap();

    // Request all suggestions within max distance for a short typo.
    let all = index.correct("teso", 2, Verbosity::AllWithinMax);
    assert!(!all.is_empty());

    // distance ascending throughout
    assert!(all.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert_eq!(all[0].term, "test");
    assert_eq!(all[0].distance, 1);
    assert!(all.iter().any(|s| s.term == "tost"));
}

#[test]
fn test_include_macro_completion() {
    let index = include_dictionary!("tests/data/words.txt", max_distance = 2, lowercase = true).unwrap();

    let completions = index.complete("spel", 2);
    let terms: Vec<&str> = completions.iter().map(|c| c.term.as_str()).collect();
    assert_eq!(terms, ["spell", "spelling"]);
}
