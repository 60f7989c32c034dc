//! Configuration schema.

use std::io::{self, Write};
use std::path::PathBuf;

use ini::{EscapePolicy, Ini, WriteOption};

use crate::DEFAULT_SECTION;

/// One supervised repository, as declared by a config section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    /// Section name.
    pub name: String,

    /// Local working copy path, as written in the file.
    pub local: String,

    /// Name of the tracked remote.
    pub remote_name: String,

    /// Expected URL of the tracked remote.
    pub remote_url: String,

    /// Tracked branch.
    pub branch: String,

    /// Fast-forward the branch after fetching.
    pub auto_merge: bool,

    /// Hard reset to the merge base before merging.
    pub hard_reset: bool,
}

impl RepositoryEntry {
    /// Returns the local path with a leading `~` expanded.
    #[must_use]
    pub fn local_path(&self) -> PathBuf {
        expand_home(&self.local)
    }
}

/// Values the config generator writes into the `[DEFAULT]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDefaults {
    /// Remote name.
    pub remote_name: String,

    /// Tracked branch.
    pub branch: String,

    /// Auto merge flag.
    pub auto_merge: bool,

    /// Hard reset flag.
    pub hard_reset: bool,
}

impl Default for EntryDefaults {
    fn default() -> Self {
        Self {
            remote_name: "origin".to_string(),
            branch: "master".to_string(),
            auto_merge: false,
            hard_reset: false,
        }
    }
}

/// A working copy found while scanning directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRepository {
    /// Section name (the directory name).
    pub name: String,

    /// Local path, possibly abbreviated with `~`.
    pub local: String,

    /// URL of the `origin` remote.
    pub remote_url: String,
}

/// A generated configuration, ready to be written out as INI.
#[derive(Debug, Clone, Default)]
pub struct GeneratedConfig {
    /// Shared defaults.
    pub defaults: EntryDefaults,

    repositories: Vec<DiscoveredRepository>,
}

impl GeneratedConfig {
    /// Returns the discovered repositories in insertion order.
    pub fn repositories(&self) -> &[DiscoveredRepository] {
        &self.repositories
    }

    /// Returns true if a section with this name was already added.
    pub fn contains(&self, name: &str) -> bool {
        self.repositories.iter().any(|r| r.name == name)
    }

    /// Adds a repository section.
    ///
    /// Returns `false` and leaves the config untouched if the section name
    /// is already taken.
    pub fn push(&mut self, repository: DiscoveredRepository) -> bool {
        if self.contains(&repository.name) {
            return false;
        }
        self.repositories.push(repository);
        true
    }

    /// Builds the INI document.
    #[must_use]
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some(DEFAULT_SECTION))
            .set("remote_name", self.defaults.remote_name.as_str())
            .set("branch", self.defaults.branch.as_str())
            .set("auto_merge", yes_no(self.defaults.auto_merge))
            .set("hard_reset", yes_no(self.defaults.hard_reset));

        for repo in &self.repositories {
            ini.with_section(Some(repo.name.as_str()))
                .set("local", repo.local.as_str())
                .set("remote_url", repo.remote_url.as_str());
        }
        ini
    }

    /// Writes the configuration as INI text, with values unescaped.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let options = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            ..WriteOption::default()
        };
        self.to_ini().write_to_opt(writer, options)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without the shorthand, or any path when the home directory is
/// unknown, are returned unchanged.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discovered(name: &str) -> DiscoveredRepository {
        DiscoveredRepository {
            name: name.to_string(),
            local: format!("/srv/git/{name}"),
            remote_url: format!("https://example.com/{name}.git"),
        }
    }

    #[test]
    fn test_default_entry_defaults() {
        let defaults = EntryDefaults::default();
        assert_eq!(defaults.remote_name, "origin");
        assert_eq!(defaults.branch, "master");
        assert!(!defaults.auto_merge);
        assert!(!defaults.hard_reset);
    }

    #[test]
    fn test_push_rejects_duplicate_names() {
        let mut config = GeneratedConfig::default();
        assert!(config.push(discovered("alpha")));
        assert!(!config.push(discovered("alpha")));
        assert_eq!(config.repositories().len(), 1);
    }

    #[test]
    fn test_write_to_renders_ini() {
        let mut config = GeneratedConfig::default();
        config.push(discovered("alpha"));
        config.push(discovered("beta"));

        let mut out = Vec::new();
        config.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        insta::assert_snapshot!(text, @r"
        [DEFAULT]
        remote_name=origin
        branch=master
        auto_merge=no
        hard_reset=no

        [alpha]
        local=/srv/git/alpha
        remote_url=https://example.com/alpha.git

        [beta]
        local=/srv/git/beta
        remote_url=https://example.com/beta.git
        ");
    }

    #[test]
    fn test_to_ini_renders_custom_defaults() {
        let config = GeneratedConfig {
            defaults: EntryDefaults {
                remote_name: "upstream".to_string(),
                branch: "main".to_string(),
                auto_merge: true,
                hard_reset: false,
            },
            ..GeneratedConfig::default()
        };

        let ini = config.to_ini();
        let defaults = ini.section(Some(DEFAULT_SECTION)).unwrap();
        assert_eq!(defaults.get("remote_name"), Some("upstream"));
        assert_eq!(defaults.get("branch"), Some("main"));
        assert_eq!(defaults.get("auto_merge"), Some("yes"));
        assert_eq!(defaults.get("hard_reset"), Some("no"));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/srv/git/alpha"), PathBuf::from("/srv/git/alpha"));
        assert_eq!(expand_home("~other/alpha"), PathBuf::from("~other/alpha"));
    }

    #[test]
    fn test_expand_home_expands_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/src/alpha"), home.join("src/alpha"));
    }

    #[test]
    fn test_local_path_uses_expansion() {
        let entry = RepositoryEntry {
            name: "alpha".to_string(),
            local: "/srv/git/alpha".to_string(),
            remote_name: "origin".to_string(),
            remote_url: "https://example.com/alpha.git".to_string(),
            branch: "master".to_string(),
            auto_merge: false,
            hard_reset: false,
        };
        assert_eq!(entry.local_path(), PathBuf::from("/srv/git/alpha"));
    }
}
