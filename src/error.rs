use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Configuration error: a requested variable is not set and
    /// silent mode is off.
    #[error("environment variable not defined: {name}, use -s to continue")]
    UndefinedVariable { name: String },

    #[error("failed to determine the current working directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Name of the routine that raised the error, for the stderr prefix.
    pub fn routine(&self) -> &'static str {
        match self {
            Self::UndefinedVariable { .. } => "process_variable",
            Self::CurrentDir(_) => "from_process",
            Self::Io(_) => "render",
        }
    }
}
