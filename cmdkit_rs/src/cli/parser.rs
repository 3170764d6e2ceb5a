//! Argument tokenizer for `<program> <command> [options] [args]` invocations.
//!
//! Walks the tokens that follow the command name exactly once, left to right,
//! and produces a [`ResolvedBinding`]. It never fails: anything malformed
//! degrades to a missing value that the dispatcher reports.
//!
//! # Token classes
//!
//! - `--key value` / `--key` / `--key=value`: long option. `key` is bound
//!   naked (empty value) when it is the last token, when the next token starts
//!   with `-`, or when `key` names a Boolean option.
//! - `-abc`: short cluster. `a` and `b` are bound naked, `c` follows the same
//!   lookahead rule as long options.
//! - `--`: every later token is positional; the separator itself is dropped.
//! - anything else (including a lone `-`): the first positional token. From
//!   here on, every token is positional, dash-prefixed or not.
//!
//! A value that itself starts with `-` (`--offset -5`) is read as a naked flag
//! followed by another option, never as a value.

use tracing::trace;

use super::command::{Dispatchable, ResolvedBinding};

/// Tokenize `args` (the tokens after the command name) for `command`.
pub fn tokenize(args: &[String], command: &dyn Dispatchable) -> ResolvedBinding {
    tokenize_with(args, |key| command.is_boolean_option(key))
}

/// Tokenize with an explicit "is this key Boolean-typed" predicate.
pub fn tokenize_with<F>(args: &[String], is_boolean: F) -> ResolvedBinding
where
    F: Fn(&str) -> bool,
{
    let mut binding = ResolvedBinding::new();
    let mut positional_mode = false;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if positional_mode {
            binding.push_positional(arg.as_str());
            i += 1;
            continue;
        }

        if arg == "--" {
            trace!("separator at {}, positional mode", i);
            positional_mode = true;
            i += 1;
            continue;
        }

        if let Some(key) = arg.strip_prefix("--") {
            if let Some((key, value)) = key.split_once('=') {
                trace!(key, value, "long option with inline value");
                binding.push_option(key, value);
                i += 1;
            } else {
                i += bind_with_lookahead(&mut binding, key, args.get(i + 1), &is_boolean);
            }
            continue;
        }

        if let Some(cluster) = arg.strip_prefix('-') {
            let chars: Vec<char> = cluster.chars().collect();
            if let Some((last, init)) = chars.split_last() {
                for c in init {
                    trace!(key = %c, "clustered flag");
                    binding.push_option(c.to_string(), "");
                }
                i += bind_with_lookahead(
                    &mut binding,
                    &last.to_string(),
                    args.get(i + 1),
                    &is_boolean,
                );
                continue;
            }
        }

        trace!(token = %arg, "first positional at {}", i);
        positional_mode = true;
        binding.push_positional(arg.as_str());
        i += 1;
    }

    binding
}

/// Bind `key` to `next` when it can be a value, else naked.
/// Returns how many tokens were consumed.
fn bind_with_lookahead<F>(
    binding: &mut ResolvedBinding,
    key: &str,
    next: Option<&String>,
    is_boolean: &F,
) -> usize
where
    F: Fn(&str) -> bool,
{
    match next {
        Some(value) if !value.starts_with('-') && !is_boolean(key) => {
            trace!(key, value = %value, "option with value");
            binding.push_option(key, value.as_str());
            2
        }
        _ => {
            trace!(key, "naked option");
            binding.push_option(key, "");
            1
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn no_booleans(_: &str) -> bool {
        false
    }

    fn pairs(binding: &ResolvedBinding) -> Vec<(&str, &str)> {
        binding
            .options
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_long_option_consumes_value() {
        let binding = tokenize_with(&args(&["--count", "5"]), no_booleans);
        assert_eq!(pairs(&binding), vec![("count", "5")]);
        assert!(binding.positionals.is_none());
    }

    #[test]
    fn test_long_option_at_end_is_naked() {
        let binding = tokenize_with(&args(&["--count"]), no_booleans);
        assert_eq!(pairs(&binding), vec![("count", "")]);
    }

    #[test]
    fn test_long_option_before_flag_is_naked() {
        let binding = tokenize_with(&args(&["--count", "--verbose"]), no_booleans);
        assert_eq!(pairs(&binding), vec![("count", ""), ("verbose", "")]);
    }

    #[test]
    fn test_boolean_long_option_never_takes_value() {
        let binding = tokenize_with(&args(&["--verbose", "input.txt"]), |k| k == "verbose");
        assert_eq!(pairs(&binding), vec![("verbose", "")]);
        assert_eq!(binding.positionals(), ["input.txt"]);
    }

    #[test]
    fn test_inline_long_value() {
        let binding = tokenize_with(&args(&["--name=a=b", "rest"]), no_booleans);
        assert_eq!(pairs(&binding), vec![("name", "a=b")]);
        assert_eq!(binding.positionals(), ["rest"]);
    }

    #[test]
    fn test_short_cluster() {
        let binding = tokenize_with(&args(&["-abc", "value"]), no_booleans);
        assert_eq!(pairs(&binding), vec![("a", ""), ("b", ""), ("c", "value")]);
        assert!(binding.positionals.is_none());
    }

    #[test]
    fn test_short_cluster_last_boolean() {
        let binding = tokenize_with(&args(&["-vh", "input.txt"]), |k| k == "v" || k == "h");
        assert_eq!(pairs(&binding), vec![("v", ""), ("h", "")]);
        assert_eq!(binding.positionals(), ["input.txt"]);
    }

    #[test]
    fn test_short_option_with_value() {
        let binding = tokenize_with(&args(&["-c", "3", "-v"]), no_booleans);
        assert_eq!(pairs(&binding), vec![("c", "3"), ("v", "")]);
    }

    #[test]
    fn test_positional_mode_is_one_way() {
        let binding = tokenize_with(
            &args(&["--count", "5", "input.txt", "--verbose", "-x", "more"]),
            no_booleans,
        );
        assert_eq!(pairs(&binding), vec![("count", "5")]);
        assert_eq!(
            binding.positionals(),
            ["input.txt", "--verbose", "-x", "more"]
        );
    }

    #[test]
    fn test_double_dash_separator() {
        let binding = tokenize_with(&args(&["-v", "--", "-not-a-flag", "x"]), |k| k == "v");
        assert_eq!(pairs(&binding), vec![("v", "")]);
        assert_eq!(binding.positionals(), ["-not-a-flag", "x"]);
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let binding = tokenize_with(&args(&["-", "--count", "1"]), no_booleans);
        assert!(binding.options.is_empty());
        assert_eq!(binding.positionals(), ["-", "--count", "1"]);
    }

    #[test]
    fn test_dash_prefixed_value_is_read_as_flag() {
        // --offset -5 binds offset naked and 5 as a short flag
        let binding = tokenize_with(&args(&["--offset", "-5"]), no_booleans);
        assert_eq!(pairs(&binding), vec![("offset", ""), ("5", "")]);
    }

    #[test]
    fn test_empty_input() {
        let binding = tokenize_with(&[], no_booleans);
        assert_eq!(binding, ResolvedBinding::default());
    }
}
