mod ingest;
mod query;
mod utils;

use clap::{
    Parser,
    Subcommand,
};
use ingest::IngestArgs;
use query::QueryArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    name = "regionscope",
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Load points, categories and groups from a data directory into the
    /// database.
    Ingest {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  IngestArgs,
    },

    /// Run a crop query and write the matching rows.
    Query {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  QueryArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Ingest { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Query { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
