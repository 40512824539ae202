use std::path::PathBuf;

use anyhow::{
    anyhow,
    Context,
};
use clap::Args;
use console::style;
use log::info;
use regionscope::io::ingest::{
    CATEGORIES_FILE,
    GROUPS_FILE,
    POINTS_FILE,
};
use regionscope::prelude::*;

use crate::utils::{
    StoreArgs,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct IngestArgs {
    #[arg(
        short = 'd',
        long,
        required = true,
        help = "Directory containing the inspection data files."
    )]
    data_directory: PathBuf,

    #[arg(
        long,
        default_value = POINTS_FILE,
        help_heading = "SOURCE ARGS",
        help = "Name of the points file, one `x y` pair per line."
    )]
    points:     String,
    #[arg(
        long,
        default_value = CATEGORIES_FILE,
        help_heading = "SOURCE ARGS",
        help = "Name of the categories file, one number per line."
    )]
    categories: String,
    #[arg(
        long,
        default_value = GROUPS_FILE,
        help_heading = "SOURCE ARGS",
        help = "Name of the groups file, one integer group id per line."
    )]
    groups:     String,

    #[clap(flatten)]
    store: StoreArgs,
}

impl IngestArgs {
    fn sources(&self) -> IngestSources {
        let dir = &self.data_directory;
        IngestSources::from_data_dir(dir)
            .with_points(dir.join(&self.points))
            .with_categories(dir.join(&self.categories))
            .with_groups(dir.join(&self.groups))
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        if !self.data_directory.is_dir() {
            eprintln!(
                "Path {} is not a directory.",
                style(self.data_directory.display()).red()
            );
            return Err(anyhow!("Data directory does not exist"));
        }

        let config = self.store.config();
        let mut store = SqliteStore::open(&config).with_context(|| {
            format!("Failed to open database {}", config.path().display())
        })?;
        info!("Opened database {}", store.location());

        let spinner = utils.spinner("Loading inspection data...")?;
        let summary = Ingestor::new(self.sources())
            .run(&mut store)
            .with_context(|| {
                format!(
                    "Failed to load data from {}",
                    self.data_directory.display()
                )
            });
        spinner.finish_and_clear();
        let summary = summary?;

        println!(
            "[{}] Loaded {} into {}",
            style("V").green(),
            style(summary).green(),
            style(config.path().display()).blue()
        );
        Ok(())
    }
}
