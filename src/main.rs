use clap::Parser;
use tracing::level_filters::LevelFilter;

use tidypath::{color::Palette, env::Env};

const EXAMPLES: &str = "\
EXAMPLES:
   # Clean a path (remove duplicates).
   $ tidypath PATH

   # Clean a path (remove duplicates and undefined).
   $ tidypath -u PATH

   # List path contents.
   $ tidypath -l PATH

   # Clean up PATH and LD_LIBRARY_PATH.
   $ export PATH=$(tidypath PATH)
   $ export LD_LIBRARY_PATH=$(tidypath LD_LIBRARY_PATH)

   # Report the path information for PATH and LD_LIBRARY_PATH.
   $ tidypath -L PATH LD_LIBRARY_PATH

   # Report path information with a bit of color.
   $ tidypath -Lc PATH

   # Works even when the variable is not defined.
   $ export LD_LIBRARY_PATH=$(tidypath -s LD_LIBRARY_PATH)

Only exported variables are visible, so `YPATH=$PATH:$PATH tidypath YPATH`
works but a plain shell-local YPATH does not.";

/// Tidy up shell path variables by removing duplicate entries and,
/// optionally, entries that do not exist.
#[derive(Parser, Debug)]
#[command(version, about, after_help = EXAMPLES)]
struct Cli {
    #[clap(long = "log", default_value_t = LevelFilter::ERROR)]
    log_level: LevelFilter,

    #[clap(flatten)]
    cmd: tidypath::cmd::Cmd,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tidypath::tracing::init(cli.log_level)?;
    let span = tracing::debug_span!(env!("CARGO_PKG_NAME"));
    let _span_guard = span.enter();
    tracing::debug!(?cli, "Starting.");
    let palette = Palette::new(cli.cmd.config().color, false);
    let result = Env::from_process().and_then(|env| cli.cmd.run(&env));
    if let Err(error) = result {
        tracing::debug!(?error, "Failed.");
        eprintln!(
            "{} {}",
            palette.bad(&format!("ERROR:{}:", error.routine())),
            palette.error(&error.to_string())
        );
        std::process::exit(1);
    }
    Ok(())
}
