use fuzzdex::{Error, Index, IndexConfig, KeyKind, Verbosity};
use tracing_subscriber::EnvFilter;

// RUST_LOG=fuzzdex=trace shows the per-query logs
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sample_index() -> Index {
    init_tracing();
    let corpus = [
        ("the", 500),
        ("their", 40),
        ("there", 60),
        ("these", 30),
        ("then", 45),
        ("bank", 12),
        ("band", 9),
        ("hand", 14),
        ("sand", 3),
        ("cat", 10),
        ("cut", 7),
        ("act", 2),
        ("cost", 5),
    ];
    Index::build(IndexConfig::default(), corpus).unwrap()
}

fn terms(suggestions: &[fuzzdex::Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.term.as_str()).collect()
}

#[test]
fn test_best_only_prefers_frequency_within_tier() {
    let index = sample_index();
    let best = index.correct("thn", 2, Verbosity::BestOnly);
    assert_eq!(best.len(), 1);
    // "the" and "then" are both one edit away; "the" is more frequent
    assert_eq!(best[0].term, "the");
    assert_eq!(best[0].distance, 1);
}

#[test]
fn test_best_tier_holds_one_distance() {
    let index = sample_index();
    let tier = index.correct("bamd", 2, Verbosity::BestTier);
    assert_eq!(terms(&tier), ["band"]);

    let tier = index.correct("xand", 2, Verbosity::BestTier);
    assert_eq!(terms(&tier), ["hand", "band", "sand"]);
    assert!(tier.iter().all(|s| s.distance == 1));
}

#[test]
fn test_all_within_max_sorted() {
    let index = sample_index();
    let all = index.correct("cat", 2, Verbosity::AllWithinMax);
    assert_eq!(all[0].term, "cat");
    assert_eq!(all[0].distance, 0);
    assert!(all.iter().any(|s| s.term == "cut" && s.distance == 1));
    // adjacent transposition counts as one edit
    assert!(all.iter().any(|s| s.term == "act" && s.distance == 1));
    assert!(all.iter().any(|s| s.term == "cost" && s.distance == 2));
    for pair in all.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.distance < b.distance || (a.distance == b.distance && a.frequency >= b.frequency));
    }
}

#[test]
fn test_limit_narrows_results() {
    let index = sample_index();
    let wide = index.correct("cat", 2, Verbosity::AllWithinMax);
    let narrow = index.correct("cat", 1, Verbosity::AllWithinMax);
    assert!(narrow.len() < wide.len());
    assert!(narrow.iter().all(|s| s.distance <= 1));
    assert!(!terms(&narrow).contains(&"cost"));
}

#[test]
fn test_builder_accumulates_frequency() {
    let mut builder = Index::builder(IndexConfig::default()).unwrap();
    assert!(builder.add_term("spell", 3).unwrap());
    assert!(!builder.add_term("spell", 4).unwrap());
    assert!(!builder.add_term("", 4).unwrap());
    assert_eq!(builder.add_terms([("spelt", 1), ("spell", 1)]).unwrap(), 1);
    assert_eq!(builder.len(), 2);

    let index = builder.finish();
    assert_eq!(index.frequency("spell"), Some(8));
    assert_eq!(index.find_top("spel").map(|s| s.term), Some("spell".to_string()));
}

#[test]
fn test_key_kinds() {
    let index = Index::build(IndexConfig::default(), [("ab", 1), ("abc", 1)]).unwrap();
    // "ab" is both a term and a deletion of "abc"
    assert_eq!(index.key_kind("ab"), index.term_id("ab").map(KeyKind::Term));
    assert_eq!(index.key_kind("bc"), Some(KeyKind::Derived));
    assert_eq!(index.key_kind("zz"), None);
    assert_eq!(index.term(0), Some("ab"));
}

#[test]
fn test_capacity_exhausted() {
    let config = IndexConfig::default().with_capacity(2);
    let err = Index::build(config, [("one", 1), ("two", 1), ("three", 1)]).unwrap_err();
    assert!(matches!(err, Error::CapacityExhausted { capacity: 2 }));

    // re-adding a known term never needs room
    let config = IndexConfig::default().with_capacity(1);
    let index = Index::build(config, [("one", 1), ("one", 1)]).unwrap();
    assert_eq!(index.frequency("one"), Some(2));
}

#[test]
fn test_config_from_toml() {
    let config = IndexConfig::from_toml("max_edit_distance = 1\ncapacity = 10\n").unwrap();
    assert_eq!(config.max_edit_distance, 1);
    assert_eq!(config.capacity, 10);

    let index = Index::build(config, [("bank", 1)]).unwrap();
    // requests above the configured maximum of 1 are clamped
    assert_eq!(terms(&index.correct("bnak", 2, Verbosity::AllWithinMax)), ["bank"]);
    assert!(index.correct("bnka", 2, Verbosity::AllWithinMax).is_empty());

    assert!(matches!(IndexConfig::from_toml("capacity = 0"), Err(Error::InvalidConfig(_))));
    let err = IndexConfig::from_toml("capacity = \"lots\"").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
    // the parser's own message is part of the display text
    let message = err.to_string();
    let prefix = "failed to parse configuration: ";
    assert!(message.starts_with(prefix));
    assert!(message.len() > prefix.len());
}

#[test]
fn test_shared_across_threads() {
    let index = std::sync::Arc::new(sample_index());
    let handles: Vec<_> = ["thn", "bamd", "cta"]
        .into_iter()
        .map(|word| {
            let index = std::sync::Arc::clone(&index);
            std::thread::spawn(move || index.find_top(word).map(|s| s.term))
        })
        .collect();
    let results: Vec<Option<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        [Some("the".to_string()), Some("band".to_string()), Some("cat".to_string())]
    );
}
