use std::{
    collections::HashMap,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use crate::error::Error;

/// Read-only snapshot of everything the pipeline needs from the process:
/// the variable table, the working directory and the home directory.
/// Values are kept as raw `OsString`s, never re-encoded.
#[derive(Debug, Clone)]
pub struct Env {
    vars: HashMap<OsString, OsString>,
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl Env {
    /// Home is `HOME` from `vars` whenever it is set, even when empty.
    pub fn new<I, K, V>(vars: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let vars: HashMap<OsString, OsString> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let home = vars.get(OsStr::new("HOME")).map(PathBuf::from);
        Self {
            vars,
            cwd: cwd.into(),
            home,
        }
    }

    #[tracing::instrument]
    pub fn from_process() -> Result<Self, Error> {
        let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
        let mut selph = Self::new(std::env::vars_os(), cwd);
        if selph.home.is_none() {
            selph.home = current_user_home();
        }
        tracing::debug!(
            vars = selph.vars.len(),
            cwd = ?selph.cwd,
            home = ?selph.home,
            "Snapshotted environment."
        );
        Ok(selph)
    }

    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(name)).map(OsString::as_os_str)
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }
}

/// Home directory of account `name`, from the system account database.
pub fn user_home(name: &str) -> Option<PathBuf> {
    match nix::unistd::User::from_name(name) {
        Ok(user) => user.map(|u| u.dir),
        Err(error) => {
            tracing::debug!(?error, name, "Account lookup failed.");
            None
        }
    }
}

fn current_user_home() -> Option<PathBuf> {
    use nix::unistd::{Uid, User};

    User::from_uid(Uid::current()).ok().flatten().map(|u| u.dir)
}
