use std::{
    ffi::OsStr,
    io::{self, Write},
};

use crate::{color::Palette, env::Env, error::Error, pathlist, render};

#[derive(clap::Args, Debug)]
pub struct Cmd {
    /// Add some color cues.
    #[clap(short, long)]
    color: bool,

    /// List the path contents in human readable form.
    /// The default is to list them in shell form.
    #[clap(short, long)]
    list: bool,

    /// List the current state of the path variable as a report
    /// with no filtering.
    #[clap(short = 'L', long)]
    list_report: bool,

    /// Treat undefined environment variables as empty
    /// instead of failing.
    #[clap(short, long)]
    silent: bool,

    /// Remove entries that do not exist on disk,
    /// or flag them as filtered when -L is given.
    #[clap(short, long)]
    undefined: bool,

    /// Environment variable names like PATH, MANPATH or LD_LIBRARY_PATH.
    #[clap(value_name = "ENV_VARS")]
    env_vars: Vec<String>,
}

impl Cmd {
    pub fn config(&self) -> Config {
        Config {
            color: self.color,
            list: self.list,
            list_report: self.list_report,
            silent: self.silent,
            exclude_undefined: self.undefined,
        }
    }

    /// Process every named variable in order, stopping at the first error.
    pub fn run(&self, env: &Env) -> Result<(), Error> {
        let config = self.config();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for name in &self.env_vars {
            process_variable(&mut out, env, name, &config)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Config {
    pub color: bool,
    pub list: bool,
    pub list_report: bool,
    pub silent: bool,
    pub exclude_undefined: bool,
}

impl Config {
    pub fn palette(&self) -> Palette {
        Palette::new(self.color, self.exclude_undefined)
    }
}

#[tracing::instrument(skip(out, env))]
pub fn process_variable<W: Write>(
    out: &mut W,
    env: &Env,
    name: &str,
    config: &Config,
) -> Result<(), Error> {
    let raw = match env.get(name) {
        Some(raw) => raw,
        None if config.silent => {
            tracing::debug!("Undefined, treating as empty.");
            OsStr::new("")
        }
        None => {
            return Err(Error::UndefinedVariable {
                name: name.to_string(),
            });
        }
    };
    let components = pathlist::split(raw);
    tracing::debug!(components = components.len(), "Split.");
    match () {
        _ if config.list_report => {
            let entries = pathlist::classify(env, &components);
            render::report(
                out,
                name,
                &entries,
                config.exclude_undefined,
                &config.palette(),
            )?;
        }
        _ if config.list => {
            render::list(out, &components)?;
        }
        _ => {
            let kept =
                pathlist::tidy(env, &components, config.exclude_undefined);
            render::shell(out, &kept)?;
        }
    }
    Ok(())
}
