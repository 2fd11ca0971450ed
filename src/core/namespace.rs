//! Purpose: Snapshot a flat key/value source into a read-only lookup map.
//! Exports: `Namespace`.
//! Role: The decoder's only data source; built once per decode, then immutable.
//! Invariants: One full scan at construction; lookups are O(1) average after.
//! Invariants: Environment pairs that are not valid UTF-8 are skipped.

use std::collections::HashMap;

/// A flat name -> text mapping captured once from an ambient source.
///
/// Decoding reads process state only through a `Namespace`, so tests and
/// alternate frontends can inject synthetic snapshots.
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    vars: HashMap<String, String>,
}

impl Namespace {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| {
                let key = key.into_string().ok()?;
                let value = value.into_string().ok()?;
                Some((key, value))
            })
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<(String, String)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Namespace {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Namespace;

    #[test]
    fn lookup_hits_and_misses() {
        let ns = Namespace::from([("K_J_V", "a b"), ("J_V_a", "1")]);
        assert_eq!(ns.get("K_J_V"), Some("a b"));
        assert_eq!(ns.get("J_V_a"), Some("1"));
        assert_eq!(ns.get("J_V_b"), None);
        assert_eq!(ns.len(), 2);
        assert!(!ns.is_empty());
    }

    #[test]
    fn env_snapshot_sees_inherited_vars() {
        // PATH is set in every reasonable test environment.
        let ns = Namespace::from_env();
        assert!(ns.get("PATH").is_some());
    }
}
