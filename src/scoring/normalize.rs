//! Species name normalization.

use crate::config::SynonymGroup;

/// Canonical species names and the substrings that map onto them.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    groups: Vec<Group>,
}

#[derive(Debug, Clone)]
struct Group {
    canonical: String,
    canonical_lower: String,
    aliases: Vec<String>,
}

impl SynonymTable {
    /// Build a table from configured groups. Group order decides ties.
    pub fn new(groups: &[SynonymGroup]) -> Self {
        let groups = groups
            .iter()
            .map(|g| Group {
                canonical: g.canonical.trim().to_string(),
                canonical_lower: g
                    .canonical
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase(),
                aliases: g
                    .aliases
                    .iter()
                    .map(|a| a.trim().to_lowercase())
                    .filter(|a| !a.is_empty())
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    /// Normalize a species name.
    ///
    /// A name equal to a canonical name (ignoring case) becomes that canonical
    /// name. A name containing an alias becomes the alias group's canonical
    /// name. Anything else is title-cased word by word.
    pub fn normalize(&self, name: &str) -> String {
        let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
        let lower = collapsed.to_lowercase();

        if let Some(group) = self.groups.iter().find(|g| g.canonical_lower == lower) {
            return group.canonical.clone();
        }
        if let Some(group) = self
            .groups
            .iter()
            .find(|g| g.aliases.iter().any(|alias| lower.contains(alias.as_str())))
        {
            return group.canonical.clone();
        }

        title_case(&collapsed)
    }
}

/// Upper-case the first character of each word and lower-case the rest.
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;

    fn table() -> SynonymTable {
        SynonymTable::new(&ScoringConfig::default().synonyms)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("australian MAGPIE"), "Australian Magpie");
        assert_eq!(title_case("  torresian   crow "), "Torresian Crow");
        assert_eq!(title_case("white-winged fairywren"), "White-winged Fairywren");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_alias_variants_collapse() {
        let table = table();
        for name in ["corvid", "Corvid sp.", "unknown CORVID", "Little corvid"] {
            assert_eq!(table.normalize(name), "Corvid");
        }
        assert_eq!(table.normalize("Australian pipit"), "Pipit");
    }

    #[test]
    fn test_canonical_name_matches_exactly() {
        let table = SynonymTable::new(&[SynonymGroup {
            canonical: "Raven".to_string(),
            aliases: vec!["corvus".to_string()],
        }]);
        assert_eq!(table.normalize("RAVEN"), "Raven");
        assert_eq!(table.normalize("Corvus coronoides"), "Raven");
    }

    #[test]
    fn test_canonical_match_precedes_aliases() {
        let table = SynonymTable::new(&[
            SynonymGroup {
                canonical: "Pipit".to_string(),
                aliases: vec!["pipit".to_string()],
            },
            SynonymGroup {
                canonical: "Australian Pipit".to_string(),
                aliases: vec!["australian pipit".to_string()],
            },
        ]);
        assert_eq!(table.normalize("australian pipit"), "Australian Pipit");
        assert_eq!(table.normalize("australian pipit call"), "Pipit");
    }

    #[test]
    fn test_alias_decides_group_in_table_order() {
        let table = SynonymTable::new(&[
            SynonymGroup {
                canonical: "Crow".to_string(),
                aliases: vec!["crow".to_string()],
            },
            SynonymGroup {
                canonical: "Raven".to_string(),
                aliases: vec!["raven".to_string()],
            },
        ]);
        assert_eq!(table.normalize("raven or crow"), "Crow");
        assert_eq!(table.normalize("little raven"), "Raven");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let table = table();
        let names = [
            "", "  ", "magpie", "AUSTRALIAN magpie", "corvid sp", "Non-bird", "?", "white  noise",
            "kangaroo jumping", "Pipit",
        ];
        for name in names {
            let once = table.normalize(name);
            assert_eq!(table.normalize(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_empty_table_title_cases() {
        let table = SynonymTable::default();
        assert_eq!(table.normalize("little corvid"), "Little Corvid");
    }
}
