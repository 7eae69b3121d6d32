//! File-name stems used for prefix matching.

use serde::{Deserialize, Serialize};

/// How a file name is reduced to its stem.
///
/// The same rule is applied to detection and validation names.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum StemRule {
    /// Text before the first `.`.
    #[default]
    FirstDot,
    /// Text before the last `.`.
    LastDot,
}

impl std::fmt::Display for StemRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstDot => write!(f, "first-dot"),
            Self::LastDot => write!(f, "last-dot"),
        }
    }
}

/// Stem of `name` under `rule`. A name without a dot is its own stem.
pub fn stem(name: &str, rule: StemRule) -> &str {
    let name = name.trim();
    let cut = match rule {
        StemRule::FirstDot => name.split_once('.'),
        StemRule::LastDot => name.rsplit_once('.'),
    };
    cut.map_or(name, |(stem, _)| stem)
}

/// Whether either stem is a prefix of the other. Empty stems never match.
pub fn stems_match(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.starts_with(b) || b.starts_with(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_dot_stem() {
        assert_eq!(stem("a.b.csv", StemRule::FirstDot), "a");
        assert_eq!(stem("rec1.BirdNET.results.csv", StemRule::FirstDot), "rec1");
    }

    #[test]
    fn test_last_dot_stem() {
        assert_eq!(stem("a.b.csv", StemRule::LastDot), "a.b");
    }

    #[test]
    fn test_name_without_dot() {
        assert_eq!(stem("rec1", StemRule::FirstDot), "rec1");
        assert_eq!(stem("rec1", StemRule::LastDot), "rec1");
    }

    #[test]
    fn test_stems_match_both_directions() {
        assert!(stems_match("A1", "A1"));
        assert!(stems_match("A1B", "A1"));
        assert!(stems_match("A", "A1"));
        assert!(!stems_match("A2", "A1"));
    }

    #[test]
    fn test_empty_stem_never_matches() {
        assert!(!stems_match("", "A1"));
        assert!(!stems_match("A1", ""));
        assert!(!stems_match("", ""));
        assert_eq!(stem(".hidden.csv", StemRule::FirstDot), "");
    }
}
