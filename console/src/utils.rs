use std::path::PathBuf;
use std::time::Duration;

use clap::{
    ArgAction,
    Args,
};
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;
use regionscope::store::{
    StoreConfig,
    DEFAULT_STORE_PATH,
    STORE_PATH_ENV,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v info, -vv debug, -vvv trace). \
                Without this flag RUST_LOG is used."
    )]
    pub verbose:  u8,
    #[arg(
        long,
        default_value_t = false,
        help = "Display a progress spinner."
    )]
    pub progress: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        init_logger(self.verbose)
    }

    /// Spinner shown while a step runs, hidden unless `--progress` is set.
    pub fn spinner(
        &self,
        message: &str,
    ) -> anyhow::Result<ProgressBar> {
        if self.progress {
            init_spinner(message)
        }
        else {
            Ok(ProgressBar::hidden())
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct StoreArgs {
    #[arg(
        long,
        env = STORE_PATH_ENV,
        default_value = DEFAULT_STORE_PATH,
        help = "Path to the SQLite inspection database."
    )]
    pub database: PathBuf,
}

impl StoreArgs {
    pub fn config(&self) -> StoreConfig {
        StoreConfig::new(self.database.clone())
    }
}

/// Maps the number of `-v` flags to a log level. `None` defers to
/// `RUST_LOG`.
pub(crate) fn verbosity_level(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

pub(crate) fn init_logger(verbose: u8) -> anyhow::Result<()> {
    let mut builder = pretty_env_logger::formatted_builder();
    match verbosity_level(verbose) {
        Some(level) => builder.filter_level(level),
        None => {
            match std::env::var("RUST_LOG") {
                Ok(filters) => builder.parse_filters(&filters),
                Err(_) => builder.filter_level(LevelFilter::Warn),
            }
        },
    };
    builder.try_init()?;
    Ok(())
}

pub(crate) fn init_spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.to_string());
    Ok(spinner)
}
