//! Institution alias resolution for free-text search.
//!
//! Students type "nust", "fast", "uet lahore" and so on. The alias table maps
//! each canonical institution id to its informal names, and a legacy table
//! maps retired ids onto current ones.

use serde::{Deserialize, Serialize};

/// Informal names for one canonical institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Alias and legacy-id tables, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasTable {
    pub entries: Vec<AliasEntry>,
    /// Legacy id → canonical id.
    #[serde(default)]
    pub legacy: Vec<(String, String)>,
}

impl AliasTable {
    pub fn new(entries: Vec<AliasEntry>, legacy: Vec<(String, String)>) -> Self {
        Self { entries, legacy }
    }

    /// Resolve a query to canonical institution ids, most authoritative first.
    ///
    /// Stages, each appending ids not already found:
    /// 1. the query is a canonical id, or a legacy id mapped to one
    /// 2. the query equals an alias
    /// 3. an alias contains the query, or the query contains an alias
    ///
    /// Within a stage ids come out in table order. Matching is trimmed and
    /// case-insensitive; a blank query matches nothing.
    pub fn find_institutions(&self, query: &str) -> Vec<String> {
        let query = query.trim().to_lowercase();
        let mut found: Vec<String> = Vec::new();
        if query.is_empty() {
            return found;
        }

        for entry in &self.entries {
            if entry.id.to_lowercase() == query {
                push_unique(&mut found, &entry.id);
            }
        }
        for (legacy, canonical) in &self.legacy {
            if legacy.to_lowercase() == query {
                push_unique(&mut found, canonical);
            }
        }

        for entry in &self.entries {
            if entry.aliases.iter().any(|a| a.trim().to_lowercase() == query) {
                push_unique(&mut found, &entry.id);
            }
        }

        for entry in &self.entries {
            let matched = entry.aliases.iter().any(|alias| {
                let alias = alias.trim().to_lowercase();
                !alias.is_empty() && (alias.contains(&query) || query.contains(&alias))
            });
            if matched {
                push_unique(&mut found, &entry.id);
            }
        }

        tracing::debug!(query = %query, matches = found.len(), "resolved institution aliases");
        found
    }

    /// Canonical id for a legacy id, if one is recorded.
    pub fn canonical_id(&self, legacy_id: &str) -> Option<&str> {
        self.legacy
            .iter()
            .find(|(legacy, _)| legacy.eq_ignore_ascii_case(legacy_id))
            .map(|(_, canonical)| canonical.as_str())
    }
}

fn push_unique(found: &mut Vec<String>, id: &str) {
    if !found.iter().any(|f| f == id) {
        found.push(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AliasTable {
        let entry = |id: &str, aliases: &[&str]| AliasEntry {
            id: id.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        };
        AliasTable::new(
            vec![
                entry("nust", &["nust", "national university of sciences and technology"]),
                entry(
                    "fast-nuces",
                    &["fast nuces", "fast university", "nuces", "fast-nu"],
                ),
                entry("uet-lahore", &["uet", "uet lahore", "engineering university lahore"]),
                entry("uet-taxila", &["uet taxila"]),
            ],
            vec![("fast".into(), "fast-nuces".into()), ("uetl".into(), "uet-lahore".into())],
        )
    }

    #[test]
    fn case_insensitive() {
        let t = table();
        assert_eq!(t.find_institutions("NUST"), t.find_institutions("nust"));
        assert_eq!(t.find_institutions("NUST"), vec!["nust"]);
    }

    #[test]
    fn blank_query_matches_nothing() {
        let t = table();
        assert!(t.find_institutions("").is_empty());
        assert!(t.find_institutions("   ").is_empty());
    }

    #[test]
    fn fast_resolves_to_nuces() {
        assert_eq!(table().find_institutions("fast"), vec!["fast-nuces"]);
        assert_eq!(table().find_institutions("  Fast  "), vec!["fast-nuces"]);
    }

    #[test]
    fn legacy_id_passthrough() {
        assert_eq!(table().find_institutions("uetl"), vec!["uet-lahore"]);
        assert_eq!(table().canonical_id("UETL"), Some("uet-lahore"));
        assert_eq!(table().canonical_id("nope"), None);
    }

    #[test]
    fn exact_alias_before_substring_matches() {
        // "uet" is an exact alias of uet-lahore and a substring of "uet taxila"
        assert_eq!(table().find_institutions("uet"), vec!["uet-lahore", "uet-taxila"]);
    }

    #[test]
    fn query_containing_alias_matches() {
        assert_eq!(
            table().find_institutions("admissions at nust islamabad"),
            vec!["nust"]
        );
    }

    #[test]
    fn no_match_is_empty() {
        assert!(table().find_institutions("oxford").is_empty());
    }

    #[test]
    fn results_are_deduplicated() {
        let found = table().find_institutions("fast-nuces");
        assert_eq!(found, vec!["fast-nuces"]);
    }

    #[test]
    fn padded_alias_still_matches_exactly() {
        let t = AliasTable::new(
            vec![
                AliasEntry {
                    id: "nust-balochistan".into(),
                    aliases: vec!["nust quetta".into()],
                },
                AliasEntry {
                    id: "nust-islamabad".into(),
                    aliases: vec![" NUST ".into()],
                },
            ],
            vec![],
        );
        assert_eq!(
            t.find_institutions("nust"),
            vec!["nust-islamabad", "nust-balochistan"]
        );
    }
}
