//! The admin team roster document.
//!
//! A small YAML file (`admin-team.yml`) holding the authoritative list of
//! admin logins under a `team_admins` key. The roster is kept deduplicated
//! and sorted ascending so diffs stay minimal.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The persisted admin roster.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AdminRoster {
    /// Admin logins, deduplicated and sorted.
    #[serde(default)]
    pub team_admins: Vec<String>,
    /// Any other top-level fields in the document, carried through untouched.
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

impl AdminRoster {
    /// Load the roster from a YAML file, defaulting to empty if the file is
    /// absent or its contents are malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Roster file absent, starting empty");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;

        match serde_yaml::from_str(&content) {
            Ok(roster) => Ok(roster),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed roster, starting empty");
                Ok(Self::default())
            }
        }
    }

    /// Save the roster to a YAML file, creating the parent directory if needed.
    ///
    /// serde_yaml emits stable key order and no line wrapping, so the output
    /// is deterministic for a given roster.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize roster")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create roster directory {}", parent.display())
            })?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write roster file {}", path.display()))?;
        Ok(())
    }

    /// Add a login to the roster.
    ///
    /// Returns `false` (and leaves the roster untouched) if the login is
    /// already present.
    pub fn add(&mut self, login: &str) -> bool {
        if self.contains(login) {
            return false;
        }
        self.team_admins.push(login.to_string());
        self.team_admins.sort();
        self.team_admins.dedup();
        true
    }

    /// Remove a login from the roster.
    ///
    /// Returns `false` if the login was not present.
    pub fn remove(&mut self, login: &str) -> bool {
        let Some(index) = self.team_admins.iter().position(|l| l == login) else {
            return false;
        };
        self.team_admins.remove(index);
        self.team_admins.sort();
        true
    }

    /// Check whether a login is on the roster (exact match).
    #[must_use]
    pub fn contains(&self, login: &str) -> bool {
        self.team_admins.iter().any(|l| l == login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(logins: &[&str]) -> AdminRoster {
        AdminRoster {
            team_admins: logins.iter().map(ToString::to_string).collect(),
            ..AdminRoster::default()
        }
    }

    #[test]
    fn test_add_to_empty() {
        let mut r = AdminRoster::default();
        assert!(r.add("alice"));
        assert_eq!(r.team_admins, vec!["alice"]);
    }

    #[test]
    fn test_add_existing_is_noop() {
        let mut r = roster(&["alice", "bob"]);
        assert!(!r.add("alice"));
        assert_eq!(r.team_admins, vec!["alice", "bob"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut r = AdminRoster::default();
        assert!(r.add("alice"));
        assert!(!r.add("alice"));
        assert_eq!(r.team_admins, vec!["alice"]);
    }

    #[test]
    fn test_add_keeps_sorted() {
        let mut r = roster(&["bob", "dave"]);
        assert!(r.add("carol"));
        assert_eq!(r.team_admins, vec!["bob", "carol", "dave"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut r = roster(&["alice", "bob"]);
        assert!(!r.remove("carol"));
        assert_eq!(r.team_admins, vec!["alice", "bob"]);
    }

    #[test]
    fn test_remove_existing() {
        let mut r = roster(&["bob", "carol"]);
        assert!(r.remove("bob"));
        assert_eq!(r.team_admins, vec!["carol"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let r = AdminRoster::load(&dir.path().join("admin-team.yml")).unwrap();
        assert!(r.team_admins.is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin-team.yml");
        std::fs::write(&path, "team_admins: {not: [a, list").unwrap();
        let r = AdminRoster::load(&path).unwrap();
        assert!(r.team_admins.is_empty());
    }

    #[test]
    fn test_load_missing_field_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin-team.yml");
        std::fs::write(&path, "something_else: true\n").unwrap();
        let r = AdminRoster::load(&path).unwrap();
        assert!(r.team_admins.is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/.github/admin-team.yml");
        roster(&["alice"]).save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin-team.yml");
        let original = roster(&["alice", "bob", "carol"]);
        original.save(&path).unwrap();
        let loaded = AdminRoster::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin-team.yml");
        std::fs::write(&path, "team_admins:\n- alice\nowner: platform\n").unwrap();

        let mut r = AdminRoster::load(&path).unwrap();
        assert!(r.add("bob"));
        r.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("owner: platform"));
        assert!(content.contains("- bob"));
    }
}
