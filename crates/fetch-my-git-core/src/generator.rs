//! Config generation from existing working copies.

use std::path::{Path, PathBuf};

use fetch_my_git_config::{DiscoveredRepository, GeneratedConfig};
use fetch_my_git_git::WorkingCopy;
use tracing::{debug, warn};

use crate::{CoreError, CoreResult};

/// Remote every generated section tracks.
const ORIGIN: &str = "origin";

/// Scans the immediate subdirectories of each root for working copies with
/// an `origin` remote and describes them as config sections.
///
/// With `base_dir`, local paths under it are written as `~/...`.
///
/// # Errors
///
/// Returns [`CoreError::NotADirectory`] if a root is not a directory, or an
/// IO error if a root cannot be listed.
pub fn make_config(
    roots: &[impl AsRef<Path>],
    base_dir: Option<&Path>,
) -> CoreResult<GeneratedConfig> {
    let base_dir = base_dir.map(std::path::absolute).transpose()?;
    let mut config = GeneratedConfig::default();

    for root in roots {
        let root = std::path::absolute(root.as_ref())?;
        debug!(?root, "trying to create config from directory");
        if !root.is_dir() {
            return Err(CoreError::NotADirectory(root));
        }

        let mut children = std::fs::read_dir(&root)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<PathBuf>, _>>()?;
        children.sort();

        for sub_path in children {
            let Some(repo) = discover(&sub_path, base_dir.as_deref()) else {
                continue;
            };
            let section = repo.name.clone();
            if config.push(repo) {
                debug!(?sub_path, %section, "git repo found, added section");
            } else {
                warn!(?sub_path, %section, "section already present, skipped");
            }
        }
    }

    Ok(config)
}

fn discover(sub_path: &Path, base_dir: Option<&Path>) -> Option<DiscoveredRepository> {
    debug!(?sub_path, "investigating directory");

    let repo = match WorkingCopy::open(sub_path) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(?sub_path, error = %e, "not a git repo");
            return None;
        }
    };

    let remote_url = match repo.remote_url(ORIGIN) {
        Ok(url) => url,
        Err(e) => {
            warn!(?sub_path, error = %e, "no origin found, skipped");
            return None;
        }
    };
    debug!(origin = %remote_url, "origin found");

    let name = sub_path.file_name()?.to_string_lossy().into_owned();
    Some(DiscoveredRepository {
        name,
        local: abbreviate(sub_path, base_dir),
        remote_url,
    })
}

fn abbreviate(path: &Path, base_dir: Option<&Path>) -> String {
    match base_dir.and_then(|base| path.strip_prefix(base).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository as Git2Repository;
    use std::fs;
    use tempfile::TempDir;

    fn repo_with_origin(root: &Path, name: &str) -> PathBuf {
        let path = root.join(name);
        let repo = Git2Repository::init(&path).unwrap();
        repo.remote(ORIGIN, &format!("https://example.com/{name}.git"))
            .unwrap();
        path
    }

    fn populated_root() -> TempDir {
        let root = TempDir::new().unwrap();
        repo_with_origin(root.path(), "alpha");

        let no_origin = root.path().join("beta");
        let repo = Git2Repository::init(&no_origin).unwrap();
        repo.remote("upstream", "https://example.com/beta.git")
            .unwrap();

        fs::create_dir(root.path().join("plain")).unwrap();
        fs::write(root.path().join("notes.txt"), "not a repo").unwrap();
        Git2Repository::init_bare(root.path().join("bare.git")).unwrap();
        root
    }

    #[test]
    fn test_make_config_finds_working_copy_with_origin() {
        let root = populated_root();
        let config = make_config(&[root.path()], None).unwrap();

        let repos = config.repositories();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "alpha");
        assert_eq!(repos[0].remote_url, "https://example.com/alpha.git");

        let expected = std::path::absolute(root.path().join("alpha")).unwrap();
        assert_eq!(repos[0].local, expected.display().to_string());

        assert_eq!(config.defaults.remote_name, "origin");
        assert_eq!(config.defaults.branch, "master");
        assert!(!config.defaults.auto_merge);
        assert!(!config.defaults.hard_reset);
    }

    #[test]
    fn test_make_config_skips_plain_directories() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("plain")).unwrap();

        let config = make_config(&[root.path()], None).unwrap();
        assert!(config.repositories().is_empty());
    }

    #[test]
    fn test_make_config_scans_every_root_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        repo_with_origin(first.path(), "zeta");
        repo_with_origin(first.path(), "eta");
        repo_with_origin(second.path(), "alpha");

        let config = make_config(&[first.path(), second.path()], None).unwrap();
        let names: Vec<_> = config.repositories().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["eta", "zeta", "alpha"]);
    }

    #[test]
    fn test_make_config_skips_duplicate_names() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let kept = repo_with_origin(first.path(), "alpha");
        repo_with_origin(second.path(), "alpha");

        let config = make_config(&[first.path(), second.path()], None).unwrap();
        assert_eq!(config.repositories().len(), 1);
        assert_eq!(
            config.repositories()[0].local,
            std::path::absolute(kept).unwrap().display().to_string()
        );
    }

    #[test]
    fn test_make_config_abbreviates_base_dir() {
        let root = TempDir::new().unwrap();
        repo_with_origin(root.path(), "alpha");

        let config = make_config(&[root.path()], Some(root.path())).unwrap();
        assert_eq!(config.repositories()[0].local, "~/alpha");
    }

    #[test]
    fn test_make_config_rejects_file_root() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("notes.txt");
        fs::write(&file, "not a directory").unwrap();

        let result = make_config(&[&file], None);
        assert!(matches!(result, Err(CoreError::NotADirectory(_))));
    }

    #[test]
    fn test_abbreviate_outside_base_dir() {
        let path = Path::new("/srv/git/alpha");
        assert_eq!(abbreviate(path, Some(Path::new("/home/user"))), "/srv/git/alpha");
        assert_eq!(abbreviate(path, Some(Path::new("/srv/git"))), "~/alpha");
        assert_eq!(abbreviate(path, Some(path)), "~");
        assert_eq!(abbreviate(path, None), "/srv/git/alpha");
    }
}
