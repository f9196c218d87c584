use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use syn::parse::{Parse, ParseStream};
use syn::{Expr, Ident, Lit, LitStr, Token};

/// Macro input representation:
/// include_dictionary!("path/to/file.txt", max_distance = 2, lowercase = true, has_freq = false)
struct IncludeDictionaryArgs {
    path: LitStr,
    assignments: Vec<(Ident, Expr)>,
}

impl Parse for IncludeDictionaryArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let path: LitStr = input.parse()?;

        let mut assignments = Vec::new();
        while input.parse::<Token![,]>().is_ok() {
            // trailing comma
            if input.is_empty() {
                break;
            }
            let ident: Ident = input.parse()?;
            let _eq: Token![=] = input.parse()?;
            let value: Expr = input.parse()?;
            assignments.push((ident, value));
        }

        if !input.is_empty() {
            return Err(input.error("expected `name = value` arguments separated by commas"));
        }
        Ok(IncludeDictionaryArgs { path, assignments })
    }
}

struct Options {
    max_distance: usize,
    lowercase: bool,
    has_freq: bool,
}

impl Options {
    fn from_assignments(assignments: &[(Ident, Expr)]) -> syn::Result<Self> {
        let mut options = Options {
            max_distance: 2,
            lowercase: false,
            has_freq: false,
        };
        for (ident, expr) in assignments {
            match ident.to_string().as_str() {
                "max_distance" => options.max_distance = int_literal(ident, expr)?,
                "lowercase" => options.lowercase = bool_literal(ident, expr)?,
                "has_freq" => options.has_freq = bool_literal(ident, expr)?,
                name => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown argument to include_dictionary: {name}"),
                    ))
                }
            }
        }
        Ok(options)
    }
}

fn int_literal(ident: &Ident, expr: &Expr) -> syn::Result<usize> {
    match expr {
        Expr::Lit(el) => match &el.lit {
            Lit::Int(li) => li.base10_parse::<usize>(),
            other => Err(syn::Error::new_spanned(other, format!("{ident} must be an integer literal"))),
        },
        other => Err(syn::Error::new_spanned(other, format!("{ident} must be an integer literal"))),
    }
}

fn bool_literal(ident: &Ident, expr: &Expr) -> syn::Result<bool> {
    match expr {
        Expr::Lit(el) => match &el.lit {
            Lit::Bool(lb) => Ok(lb.value),
            other => Err(syn::Error::new_spanned(other, format!("{ident} must be a boolean literal"))),
        },
        other => Err(syn::Error::new_spanned(other, format!("{ident} must be a boolean literal"))),
    }
}

/// Parse a word list: one word per line, followed by a whitespace-separated
/// count when `has_freq` is set. Anything else on a line is an error. Blank
/// lines and `#` comments are skipped and repeated words have their counts
/// summed.
fn parse_word_list(content: &str, options: &Options) -> Result<BTreeMap<String, u64>, String> {
    let mut dict: BTreeMap<String, u64> = BTreeMap::new();

    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let word_raw = parts.next().unwrap_or_default();
        let freq = if options.has_freq {
            let count = parts
                .next()
                .ok_or_else(|| format!("missing frequency on line {}: {}", lineno + 1, trimmed))?;
            count
                .parse::<u64>()
                .map_err(|_| format!("invalid frequency on line {}: {}", lineno + 1, trimmed))?
        } else {
            1
        };
        if parts.next().is_some() {
            return Err(format!(
                "unexpected text after the {} on line {}: {}",
                if options.has_freq { "frequency" } else { "word (set has_freq = true for counts)" },
                lineno + 1,
                trimmed
            ));
        }

        let word = if options.lowercase {
            word_raw.to_lowercase()
        } else {
            word_raw.to_string()
        };

        let total = dict.entry(word).or_insert(0);
        *total = total.saturating_add(freq);
    }

    Ok(dict)
}

/// include_dictionary!("path/to/file.txt", max_distance = 2, lowercase = true, has_freq = false)
///
/// With `has_freq = false` every line holds exactly one word counted once;
/// with `has_freq = true` every line holds a word and its count. Extra tokens
/// on a line are a compile error.
///
/// Reads a counted word list at compile time, relative to the crate root of
/// the caller, and embeds it as a `phf::Map<&'static str, u64>`. The macro
/// expands to an expression of type `fuzzdex::Result<fuzzdex::Index>` that
/// builds the index from the embedded pairs at run time, with
/// `max_edit_distance` set to `max_distance`.
///
/// Only the word list is embedded; the delete-index is always built in memory.
#[proc_macro]
pub fn include_dictionary(input: TokenStream) -> TokenStream {
    let args = syn::parse_macro_input!(input as IncludeDictionaryArgs);
    match expand(&args) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: &IncludeDictionaryArgs) -> syn::Result<proc_macro2::TokenStream> {
    let options = Options::from_assignments(&args.assignments)?;

    // Resolve the dictionary file path relative to the crate using the macro.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| syn::Error::new(args.path.span(), "CARGO_MANIFEST_DIR is not set"))?;
    let file_path = Path::new(&manifest_dir).join(args.path.value());

    let content = fs::read_to_string(&file_path).map_err(|e| {
        syn::Error::new(
            args.path.span(),
            format!("failed to read dictionary file '{}': {}", file_path.display(), e),
        )
    })?;

    let dict = parse_word_list(&content, &options).map_err(|message| {
        syn::Error::new(args.path.span(), format!("{}: {}", file_path.display(), message))
    })?;

    // BTreeMap iteration keeps the expansion deterministic
    let entries = dict.iter().map(|(word, freq)| {
        let key = LitStr::new(word, Span::call_site());
        quote! { #key => #freq }
    });
    let max_distance = options.max_distance;
    // keep the file a dependency of the expansion so edits trigger a rebuild
    let tracked_path = LitStr::new(&file_path.to_string_lossy(), Span::call_site());

    Ok(quote! {
        {
            use ::fuzzdex::__private::phf;

            const _: &str = include_str!(#tracked_path);

            static DICTIONARY: phf::Map<&'static str, u64> = phf::phf_map! {
                #(#entries, )*
            };

            ::fuzzdex::Index::build(
                ::fuzzdex::IndexConfig::default().with_max_edit_distance(#max_distance),
                DICTIONARY.entries().map(|(term, frequency)| (*term, *frequency)),
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(has_freq: bool, lowercase: bool) -> Options {
        Options {
            max_distance: 2,
            lowercase,
            has_freq,
        }
    }

    #[test]
    fn test_plain_word_list() {
        let dict = parse_word_list("hello\n# comment\n\nworld\nhello\n", &options(false, false)).unwrap();
        assert_eq!(dict.get("hello"), Some(&2));
        assert_eq!(dict.get("world"), Some(&1));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_counted_word_list() {
        let dict = parse_word_list("Apple 3\napple 4\n", &options(true, true)).unwrap();
        assert_eq!(dict.get("apple"), Some(&7));
    }

    #[test]
    fn test_invalid_frequency() {
        let err = parse_word_list("apple lots\n", &options(true, false)).unwrap_err();
        assert!(err.contains("line 1"));
        assert!(parse_word_list("apple\n", &options(true, false)).is_err());
    }

    #[test]
    fn test_extra_tokens_rejected() {
        let err = parse_word_list("hello\nhello 5\n", &options(false, false)).unwrap_err();
        assert!(err.contains("line 2"));
        assert!(err.contains("has_freq"));
        assert!(parse_word_list("hello 5 extra\n", &options(true, false)).is_err());
    }
}
