/*!
simple_usage.rs

Example demonstrating:
- compile-time dictionary embedding using the `include_dictionary!` proc-macro
- runtime construction of an `Index` from an iterator of `(String, u64)` pairs
- prefix completion

Run with:
    cargo run --example simple_usage

Set `RUST_LOG=fuzzdex=trace` to see the per-query logs.

Note: the `include_dictionary!` macro expects the path you pass to be relative to the crate root
(evaluated using `CARGO_MANIFEST_DIR`). This example uses `tests/data/words.txt`.
*/

use fuzzdex::{include_dictionary, Index, IndexConfig, Verbosity};
use tracing_subscriber::EnvFilter;

fn print_suggestions(title: &str, suggestions: &[fuzzdex::Suggestion]) {
    println!("-- {} ({} suggestions) --", title, suggestions.len());
    for s in suggestions {
        println!(
            "  term: {:<12} distance: {:>2} frequency: {}",
            s.term, s.distance, s.frequency
        );
    }
}

fn print_completions(title: &str, completions: &[fuzzdex::Completion]) {
    println!("-- {} ({} completions) --", title, completions.len());
    for c in completions {
        println!(
            "  term: {:<12} similarity: {:.3} frequency: {}",
            c.term, c.similarity, c.frequency
        );
    }
}

fn example_compile_time() -> fuzzdex::Result<()> {
    // The word list is embedded at compile time; the index is built here.
    let index = include_dictionary!("tests/data/words.txt", max_distance = 2, lowercase = true)?;

    println!("=== Index from an embedded word list ===");

    let top = index.correct("worl", 2, Verbosity::BestOnly);
    print_suggestions("Best suggestion for 'worl'", &top);

    let suggestions = index.correct("helo", 2, Verbosity::BestTier);
    print_suggestions("Closest suggestions for 'helo'", &suggestions);

    let all = index.correct("teso", 2, Verbosity::AllWithinMax);
    print_suggestions("All suggestions for 'teso'", &all);

    let completions = index.complete("spe", 3);
    print_completions("Completions for 'spe'", &completions);

    Ok(())
}

fn example_runtime_build() -> fuzzdex::Result<()> {
    println!("\n=== Index built at runtime ===");

    let entries = vec![
        ("hello".to_string(), 3u64),
        ("hell".to_string(), 1),
        ("help".to_string(), 1),
        ("world".to_string(), 5),
        ("test".to_string(), 2),
        ("tost".to_string(), 4),
        ("applied".to_string(), 1),
        ("apple".to_string(), 2),
        ("apply".to_string(), 1),
    ];

    let index = Index::build(IndexConfig::default(), entries)?;
    let stats = index.stats();
    println!(
        "{} terms, {} correction keys, {} completion keys",
        stats.terms, stats.correction_keys, stats.completion_keys
    );

    let s1 = index.correct("helo", 2, Verbosity::BestOnly);
    print_suggestions("Best suggestion for 'helo' (runtime)", &s1);

    let s2 = index.correct("appl", 2, Verbosity::BestTier);
    print_suggestions("Closest suggestions for 'appl' (runtime)", &s2);

    let s3 = index.correct("testo", 2, Verbosity::AllWithinMax);
    print_suggestions("All suggestions for 'testo' (runtime)", &s3);

    let c1 = index.complete("appl", 3);
    print_completions("Completions for 'appl' (runtime)", &c1);

    Ok(())
}

fn main() -> fuzzdex::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("fuzzdex example: compile-time word list and runtime builder\n");

    example_compile_time()?;
    example_runtime_build()?;

    println!("\nDone.");
    Ok(())
}
