use std::{
    collections::HashSet,
    ffi::{OsStr, OsString},
    os::unix::ffi::{OsStrExt, OsStringExt},
};

use crate::{
    env::Env,
    path::{self, CanonicalKey},
};

pub const SEPARATOR: u8 = b':';

/// Empty input is an empty list. Otherwise empty components are kept, they
/// stand for the working directory. Splits on raw bytes, so components that
/// aren't UTF-8 come through unchanged.
pub fn split(raw: &OsStr) -> Vec<&OsStr> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.as_bytes()
            .split(|&b| b == SEPARATOR)
            .map(OsStr::from_bytes)
            .collect()
    }
}

pub fn join(components: &[&OsStr]) -> OsString {
    let mut joined: Vec<u8> = Vec::new();
    for (i, comp) in components.iter().enumerate() {
        if i > 0 {
            joined.push(SEPARATOR);
        }
        joined.extend_from_slice(comp.as_bytes());
    }
    OsString::from_vec(joined)
}

/// Canonical keys visited so far in one variable's list.
#[derive(Debug, Default)]
pub struct SeenSet {
    keys: HashSet<CanonicalKey>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// First sighting of a canonical key records it and is not a duplicate.
    pub fn is_duplicate(&mut self, env: &Env, component: &OsStr) -> bool {
        !self.keys.insert(path::canonicalize(env, component))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub duplicate: bool,
    pub exists: bool,
}

impl Classification {
    /// Deliberately `or`: a duplicate that exists still counts as kept, and
    /// so does a unique entry that is missing.
    pub fn kept(&self) -> bool {
        !self.duplicate || self.exists
    }

    /// Whether the shell output would drop this entry. Counted once even when
    /// both reasons apply.
    pub fn filtered(&self, exclude_undefined: bool) -> bool {
        self.duplicate || (exclude_undefined && !self.exists)
    }

    pub fn dup_marker(&self) -> char {
        if self.duplicate { 'd' } else { 'u' }
    }

    pub fn exists_marker(&self) -> char {
        if self.exists { 'e' } else { 'n' }
    }

    pub fn code(&self) -> String {
        format!("{}{}", self.dup_marker(), self.exists_marker())
    }
}

/// A component as written, with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub component: &'a OsStr,
    pub class: Classification,
}

/// Classify every component in order. The duplicate test for entry `i` only
/// sees entries before it.
#[tracing::instrument(skip(env))]
pub fn classify<'a>(env: &Env, components: &[&'a OsStr]) -> Vec<Entry<'a>> {
    let mut seen = SeenSet::new();
    let entries: Vec<Entry<'a>> = components
        .iter()
        .map(|&component| {
            let duplicate = seen.is_duplicate(env, component);
            let exists = path::exists_on_disk(env, component);
            Entry {
                component,
                class: Classification { duplicate, exists },
            }
        })
        .collect();
    tracing::debug!(unique = seen.len(), "Classified.");
    entries
}

/// Drop duplicates (first occurrence wins) and, if asked, entries missing on
/// disk. Survivors keep their order and their literal text.
#[tracing::instrument(skip(env))]
pub fn tidy<'a>(
    env: &Env,
    components: &[&'a OsStr],
    exclude_undefined: bool,
) -> Vec<&'a OsStr> {
    let mut seen = SeenSet::new();
    let kept: Vec<&'a OsStr> = components
        .iter()
        .copied()
        .filter(|component| !seen.is_duplicate(env, component))
        .filter(|component| {
            !exclude_undefined || path::exists_on_disk(env, component)
        })
        .collect();
    tracing::debug!(given = components.len(), kept = kept.len(), "Tidied.");
    kept
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use super::*;

    fn os(s: &str) -> &OsStr {
        OsStr::new(s)
    }

    fn oss<'a>(comps: &[&'a str]) -> Vec<&'a OsStr> {
        comps.iter().map(|c| OsStr::new(*c)).collect()
    }

    fn env_in(dir: &Path) -> Env {
        Env::new([(OsStr::new("HOME"), dir.as_os_str())], dir)
    }

    #[test]
    fn split_edges() {
        assert!(split(os("")).is_empty());
        assert_eq!(oss(&["/a"]), split(os("/a")));
        assert_eq!(oss(&["/a", "", "/b"]), split(os("/a::/b")));
        assert_eq!(oss(&["", ""]), split(os(":")));
    }

    #[test]
    fn split_join_raw_bytes() {
        let raw = OsString::from_vec(b"/opt/\xff:/opt/\xfe".to_vec());
        let comps = split(&raw);
        assert_eq!(2, comps.len());
        assert_eq!(b"/opt/\xff", comps[0].as_bytes());
        assert_eq!(raw, join(&comps));
    }

    #[test]
    fn join_edges() {
        assert_eq!(OsString::new(), join(&[]));
        assert_eq!(OsString::from("/a"), join(&oss(&["/a"])));
        assert_eq!(
            OsString::from("/a::/b"),
            join(&oss(&["/a", "", "/b"]))
        );
    }

    #[test]
    fn seen_set_first_occurrence_wins() {
        let env = Env::new([("HOME", "/home/u")], "/home/u");
        let mut seen = SeenSet::new();
        assert!(seen.is_empty());
        assert!(!seen.is_duplicate(&env, os("~/bin")));
        assert!(seen.is_duplicate(&env, os("/home/u/bin")));
        assert!(seen.is_duplicate(&env, os("bin")));
        assert!(!seen.is_duplicate(&env, os("")));
        assert!(seen.is_duplicate(&env, os(".")));
        assert_eq!(2, seen.len());
    }

    #[test]
    fn kept_rule() {
        let c = |duplicate, exists| Classification { duplicate, exists };
        assert!(c(false, true).kept());
        assert!(c(true, true).kept());
        assert!(c(false, false).kept());
        assert!(!c(true, false).kept());
    }

    #[test]
    fn filtered_rule() {
        let c = |duplicate, exists| Classification { duplicate, exists };
        assert!(!c(false, true).filtered(true));
        assert!(!c(false, false).filtered(false));
        assert!(c(false, false).filtered(true));
        assert!(c(true, true).filtered(false));
        assert!(c(true, false).filtered(true));
    }

    #[test]
    fn codes() {
        let c = |duplicate, exists| Classification { duplicate, exists };
        assert_eq!("ue", c(false, true).code());
        assert_eq!("de", c(true, true).code());
        assert_eq!("un", c(false, false).code());
        assert_eq!("dn", c(true, false).code());
    }

    #[test]
    fn classify_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = tmp.path().join("bin");
        fs::create_dir(&bin).unwrap();
        let env = env_in(tmp.path());

        let comps = [
            os("bin"),
            bin.as_os_str(),
            os("~/bin"),
            os("nope"),
            os("./nope"),
        ];
        let entries = classify(&env, &comps);
        let codes: Vec<String> =
            entries.iter().map(|e| e.class.code()).collect();
        assert_eq!(vec!["ue", "de", "de", "un", "dn"], codes);
        assert_eq!(os("~/bin"), entries[2].component);
    }

    #[test]
    fn tidy_keeps_order_and_text() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        let env = env_in(tmp.path());

        let comps = oss(&["b", "~/a", "missing", "a", "./b", "missing/"]);
        assert_eq!(
            oss(&["b", "~/a", "missing"]),
            tidy(&env, &comps, false)
        );
        assert_eq!(oss(&["b", "~/a"]), tidy(&env, &comps, true));
    }

    #[test]
    fn tidy_keeps_distinct_raw_bytes() {
        let env = Env::new([("HOME", "/home/u")], "/");
        let raw = OsString::from_vec(b"/opt/\xff:/opt/\xfe:/opt/\xff".into());
        let kept = tidy(&env, &split(&raw), false);
        let expected = OsString::from_vec(b"/opt/\xff:/opt/\xfe".into());
        assert_eq!(expected, join(&kept));
    }

    #[test]
    fn tidy_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        let env = env_in(tmp.path());

        let raw = os("a:/x/../a:~/a:/y:/y/:::");
        let once = join(&tidy(&env, &split(raw), false));
        let twice = join(&tidy(&env, &split(&once), false));
        assert_eq!(once, twice);
    }

    #[test]
    fn tidy_output_is_subsequence() {
        let env = Env::new([("HOME", "/h")], "/w");
        let comps = oss(&["/c", "/a", "/c", "/b", "/a", "/d"]);
        let out = tidy(&env, &comps, false);
        let mut rest = comps.iter();
        for kept in &out {
            assert!(rest.any(|c| c == kept));
        }
        assert_eq!(oss(&["/c", "/a", "/b", "/d"]), out);
    }
}
