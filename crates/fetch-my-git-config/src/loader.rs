//! Configuration loader.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use ini::{Ini, ParseOption, Properties};
use tracing::{debug, error};

use crate::{ConfigError, ConfigResult, RepositoryEntry};

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/fetch-my-git.ini";

/// Section whose keys act as fallbacks for every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Loads repository entries from the given path.
///
/// Sections with missing or invalid keys are logged and skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid INI.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Vec<RepositoryEntry>> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content)
}

/// Parses repository entries from INI text.
///
/// Values are taken literally: quotes and backslashes are kept as written.
/// Keys are matched case-insensitively.
///
/// # Errors
///
/// Returns an error if the text is not valid INI or declares the same
/// section twice.
pub fn parse_config(content: &str) -> ConfigResult<Vec<RepositoryEntry>> {
    let ini = Ini::load_from_str_opt(content, literal_values())?;
    entries_from_ini(&ini)
}

fn literal_values() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn entries_from_ini(ini: &Ini) -> ConfigResult<Vec<RepositoryEntry>> {
    let mut seen = HashSet::new();
    for name in ini.iter().filter_map(|(name, _)| name) {
        if name != DEFAULT_SECTION && !seen.insert(name) {
            return Err(ConfigError::DuplicateSection(name.to_string()));
        }
    }

    let defaults = lowercase_keys(
        ini.iter()
            .filter(|(name, _)| name.is_none_or(|n| n == DEFAULT_SECTION))
            .map(|(_, props)| props),
    );

    let entries = ini
        .iter()
        .filter_map(|(name, props)| {
            let name = name.filter(|n| *n != DEFAULT_SECTION)?;
            let section = Section {
                name,
                props: lowercase_keys([props]),
                defaults: &defaults,
            };
            match section.to_entry() {
                Ok(entry) => {
                    debug!(section = name, local = %entry.local, "loaded repository entry");
                    Some(entry)
                }
                Err(e) => {
                    error!("{e}");
                    None
                }
            }
        })
        .collect();
    Ok(entries)
}

/// Later keys win over earlier ones, as in a single section.
fn lowercase_keys<'a>(
    sections: impl IntoIterator<Item = &'a Properties>,
) -> HashMap<String, &'a str> {
    sections
        .into_iter()
        .flat_map(Properties::iter)
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect()
}

struct Section<'a> {
    name: &'a str,
    props: HashMap<String, &'a str>,
    defaults: &'a HashMap<String, &'a str>,
}

impl Section<'_> {
    fn get(&self, key: &'static str) -> ConfigResult<&str> {
        self.props
            .get(key)
            .or_else(|| self.defaults.get(key))
            .copied()
            .ok_or_else(|| ConfigError::MissingKey {
                section: self.name.to_string(),
                key,
            })
    }

    fn get_bool(&self, key: &'static str) -> ConfigResult<bool> {
        let value = self.get(key)?;
        parse_bool(value).ok_or_else(|| ConfigError::InvalidBool {
            section: self.name.to_string(),
            key,
            value: value.to_string(),
        })
    }

    fn to_entry(&self) -> ConfigResult<RepositoryEntry> {
        Ok(RepositoryEntry {
            name: self.name.to_string(),
            local: self.get("local")?.to_string(),
            remote_name: self.get("remote_name")?.to_string(),
            remote_url: self.get("remote_url")?.to_string(),
            branch: self.get("branch")?.to_string(),
            auto_merge: self.get_bool("auto_merge")?,
            hard_reset: self.get_bool("hard_reset")?,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
