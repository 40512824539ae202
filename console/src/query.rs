use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use clap::Args;
use console::style;
use log::info;
use regionscope::prelude::*;

use crate::utils::{
    StoreArgs,
    UtilsArgs,
};

pub(crate) const DEFAULT_OUTPUT: &str = "query_output.txt";
const STDOUT_MARKER: &str = "-";

#[derive(Args, Debug, Clone)]
pub(crate) struct QueryArgs {
    #[arg(
        short = 'q',
        long,
        required = true,
        help = "Path to the JSON crop query document."
    )]
    query:  PathBuf,
    #[arg(
        short = 'o',
        long,
        default_value = DEFAULT_OUTPUT,
        help = "Output file for the matching rows. Use `-` to write to stdout."
    )]
    output: PathBuf,

    #[clap(flatten)]
    store: StoreArgs,
}

impl QueryArgs {
    fn writes_to_stdout(&self) -> bool {
        self.output == Path::new(STDOUT_MARKER)
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let descriptor = QueryDescriptor::from_path(&self.query).with_context(|| {
            format!("Failed to read query {}", self.query.display())
        })?;

        let config = self.store.config().with_create_if_missing(false);
        let store = SqliteStore::open(&config).with_context(|| {
            format!("Failed to open database {}", config.path().display())
        })?;
        info!("Opened database {}", store.location());

        let spinner = utils.spinner("Running crop query...")?;
        let rows = QueryEngine::new(&store)
            .evaluate(&descriptor)
            .context("Query evaluation failed");
        spinner.finish_and_clear();
        let rows = rows?;
        drop(store);

        if self.writes_to_stdout() {
            let stdout = std::io::stdout().lock();
            write_output(ResultWriter::new(stdout), &rows)?;
        }
        else {
            let writer = ResultWriter::try_from_path(&self.output).with_context(|| {
                format!("Failed to create output {}", self.output.display())
            })?;
            write_output(writer, &rows)?;
            eprintln!(
                "[{}] Wrote {} rows to {}",
                style("V").green(),
                style(rows.len()).green(),
                style(self.output.display()).blue()
            );
        }
        Ok(())
    }
}

fn write_output<W: Write>(
    mut writer: ResultWriter<W>,
    rows: &[ResultRow],
) -> anyhow::Result<()> {
    writer.write_rows(rows)?;
    writer.finish().context("Failed to flush query output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[clap(flatten)]
        args: QueryArgs,
    }

    const QUERY: &str = r#"{
        "query": {
            "operator_crop": {
                "region": {"p_min": {"x": 0, "y": 0}, "p_max": {"x": 4, "y": 4}},
                "proper": true
            }
        }
    }"#;

    fn utils() -> UtilsArgs {
        UtilsArgs {
            verbose:  0,
            progress: false,
        }
    }

    fn parse(args: &[&str]) -> QueryArgs {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        Wrapper::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_default_output() {
        let args = parse(&["-q", "query.json", "--database", "db.sqlite"]);
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!args.writes_to_stdout());
        assert!(parse(&["-q", "query.json", "--database", "db.sqlite", "-o", "-"])
            .writes_to_stdout());
    }

    #[test]
    fn test_query_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("inspection.sqlite");
        let mut store = SqliteStore::open(&StoreConfig::new(&db_path)).unwrap();
        store
            .write_batch(&BTreeSet::from([1, 2]), &[
                Region::new(1, 1, Point::new(0.0, 0.0), 1),
                Region::new(2, 1, Point::new(5.0, 5.0), 1),
                Region::new(3, 2, Point::new(1.0, 1.0), 3),
            ])
            .unwrap();
        drop(store);

        let query_path = dir.path().join("query.json");
        std::fs::write(&query_path, QUERY).unwrap();
        let output = dir.path().join("out.txt");

        parse(&[
            "-q",
            query_path.to_str().unwrap(),
            "--database",
            db_path.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .run(&utils())
        .unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "1 1 3 2\n");
    }

    #[test]
    fn test_failed_query_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let query_path = dir.path().join("query.json");
        std::fs::write(&query_path, QUERY).unwrap();
        let db_path = dir.path().join("missing.sqlite");
        let output = dir.path().join("out.txt");

        let res = parse(&[
            "-q",
            query_path.to_str().unwrap(),
            "--database",
            db_path.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .run(&utils());
        assert!(res.is_err());
        assert!(!output.exists());
        assert!(!db_path.exists());
    }

    #[test]
    fn test_invalid_query_document() {
        let dir = tempfile::tempdir().unwrap();
        let query_path = dir.path().join("query.json");
        std::fs::write(&query_path, r#"{"query": {"operator_crop": {}}}"#).unwrap();
        let output = dir.path().join("out.txt");

        let res = parse(&[
            "-q",
            query_path.to_str().unwrap(),
            "--database",
            dir.path().join("db.sqlite").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .run(&utils());
        let err = res.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RegionScopeError>(),
            Some(RegionScopeError::InvalidQuery { .. })
        ));
        assert!(!output.exists());
    }
}
