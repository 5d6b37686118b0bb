use std::{
    ffi::OsStr,
    os::unix::ffi::{OsStrExt, OsStringExt},
    path::{Component, Path, PathBuf},
};

use crate::env::{self, Env};

/// Key used to decide whether two path-list components are the same entry.
/// Only ever compared, never printed in place of the component.
pub type CanonicalKey = PathBuf;

/// Alternative to .canonicalize() which doesn't access the filesystem.
pub fn normalize(working_dir: &Path, path: &Path) -> PathBuf {
    let mut normalized = working_dir.to_owned();
    for comp in path.components() {
        match comp {
            Component::RootDir => {
                normalized = PathBuf::from("/");
            }
            Component::Normal(name) => {
                normalized.push(name);
            }
            Component::ParentDir => {
                // Popping "/" is a no-op, so ".." never climbs above root.
                normalized.pop();
            }
            Component::CurDir => {
                // Can ignore "."
            }
            Component::Prefix(_) => {
                // Windows concept. Ignoring on Unix.
            }
        }
    }
    normalized
}

/// Expand a leading `~` or `~name`.
///
/// `~` and `~/...` use `home`, `~name` and `~name/...` ask `user_home`.
/// When the home directory is unknown the component comes back untouched,
/// so it ends up being treated as a relative path. Trailing slashes of the
/// home are dropped before the rest is appended, and an empty result is
/// `/`, so an empty `HOME` turns `~/bin` into `/bin`.
pub fn expand_tilde<F>(
    component: &OsStr,
    home: Option<&Path>,
    user_home: F,
) -> PathBuf
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let bytes = component.as_bytes();
    let Some(rest) = bytes.strip_prefix(b"~") else {
        return PathBuf::from(component);
    };
    let (user, tail) = match rest.iter().position(|&b| b == b'/') {
        Some(i) => rest.split_at(i),
        None => (rest, &b""[..]),
    };
    let home = if user.is_empty() {
        home.map(Path::to_path_buf)
    } else {
        // Account names that aren't UTF-8 can't be looked up.
        std::str::from_utf8(user).ok().and_then(&user_home)
    };
    let Some(home) = home else {
        return PathBuf::from(component);
    };
    let mut expanded = home.into_os_string().into_vec();
    while expanded.last() == Some(&b'/') {
        expanded.pop();
    }
    expanded.extend_from_slice(tail);
    if expanded.is_empty() {
        expanded.push(b'/');
    }
    PathBuf::from(OsStr::from_bytes(&expanded))
}

/// Absolute, tilde-expanded, lexically normalized form of a component.
/// Never fails and never touches the filesystem. The empty component is the
/// working directory.
pub fn canonicalize(env: &Env, component: &OsStr) -> CanonicalKey {
    let expanded = expand_tilde(component, env.home(), env::user_home);
    normalize(env.cwd(), &expanded)
}

/// Follows symlinks. Anything that cannot be stat'ed counts as missing.
#[tracing::instrument(skip(env), level = "trace")]
pub fn exists_on_disk(env: &Env, component: &OsStr) -> bool {
    let canonical = canonicalize(env, component);
    let exists = canonical.exists();
    tracing::trace!(?canonical, exists, "Checked existence.");
    exists
}
