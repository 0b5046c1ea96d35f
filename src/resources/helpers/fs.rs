//! Path resolution helpers shared by the link state machine and the planner.
use std::path::{Component, Path, PathBuf};

/// Return the current user's home directory from `HOME` (or `USERPROFILE`).
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` component to the user's home directory.
///
/// Paths that do not start with `~` (including `~user` forms) are returned
/// unchanged, as is `~` itself when no home directory is known.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(components.as_path()))
        }
        _ => path.to_path_buf(),
    }
}

/// Resolve `path` to an absolute, symlink-free path.
///
/// Components are resolved one at a time from the root. Each existing prefix
/// is canonicalized before the next component is applied, so `..` steps out
/// of the directory a symlink actually points to. Components that do not
/// exist are kept as written, which keeps paths that do not exist yet (a
/// rendered file before the first commit, a dangling link target) stable and
/// comparable.
#[must_use]
pub fn resolve(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // Existing prefixes are already canonical, so this matches the OS.
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let next = resolved.join(name);
                resolved = dunce::canonicalize(&next).unwrap_or(next);
            }
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
        }
    }
    resolved
}

/// Resolve a user-supplied directory argument (`~` expanded, canonicalized).
#[must_use]
pub fn resolve_user_path(path: &Path) -> PathBuf {
    resolve(&expand_tilde(path))
}

/// Resolve the target of the symlink at `link` as read by `read_link`.
///
/// Relative link targets are interpreted against the directory containing
/// the link, the way the operating system follows them.
#[must_use]
pub fn resolve_link_target(link: &Path, raw: &Path) -> PathBuf {
    let expanded = expand_tilde(raw);
    if expanded.is_absolute() {
        resolve(&expanded)
    } else {
        let base = link.parent().unwrap_or_else(|| Path::new("."));
        resolve(&base.join(expanded))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // expand_tilde
    // -----------------------------------------------------------------------

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(
            expand_tilde(Path::new("/etc/profile")),
            PathBuf::from("/etc/profile")
        );
        assert_eq!(expand_tilde(Path::new("rel/~")), PathBuf::from("rel/~"));
        assert_eq!(expand_tilde(Path::new("~user/x")), PathBuf::from("~user/x"));
    }

    #[test]
    fn expand_tilde_uses_home() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde(Path::new("~")), home);
            assert_eq!(expand_tilde(Path::new("~/.bashrc")), home.join(".bashrc"));
        }
    }

    // -----------------------------------------------------------------------
    // resolve
    // -----------------------------------------------------------------------

    #[test]
    fn resolve_existing_path_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dunce::canonicalize(dir.path()).unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert_eq!(resolve(&file), canonical.join("file"));
    }

    #[test]
    fn resolve_missing_path_keeps_tail() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dunce::canonicalize(dir.path()).unwrap();
        let missing = dir.path().join("a").join("..").join("b.rendered");
        assert_eq!(resolve(&missing), canonical.join("b.rendered"));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_follows_symlinked_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dunce::canonicalize(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();
        assert_eq!(
            resolve(&dir.path().join("alias").join("missing")),
            canonical.join("real").join("missing")
        );
    }

    #[test]
    fn resolve_removes_dot_components_and_stops_at_root() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dunce::canonicalize(dir.path()).unwrap();
        let path = dir.path().join(".").join("x").join("..").join("y");
        assert_eq!(resolve(&path), canonical.join("y"));
        #[cfg(unix)]
        assert_eq!(resolve(Path::new("/../..")), PathBuf::from("/"));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_applies_parent_after_following_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dunce::canonicalize(dir.path()).unwrap();
        std::fs::create_dir_all(dir.path().join("other/sub/dir")).unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("other/sub/dir"),
            dir.path().join("a").join("alias"),
        )
        .unwrap();

        let path = dir.path().join("a/alias/../../profile/bashrc");
        assert_eq!(resolve(&path), canonical.join("other/profile/bashrc"));
    }

    #[test]
    fn resolve_link_target_relative_to_link_parent() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dunce::canonicalize(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("profile")).unwrap();
        let link = dir.path().join("home").join(".bashrc");
        let resolved = resolve_link_target(&link, Path::new("../profile/bashrc"));
        assert_eq!(resolved, canonical.join("profile").join("bashrc"));
    }
}
