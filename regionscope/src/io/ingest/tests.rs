use std::fs;
use std::path::Path;

use rstest::{
    fixture,
    rstest,
};
use tempfile::TempDir;

use super::*;
use crate::store::MemoryStore;

fn write_sources(
    dir: &Path,
    points: &str,
    categories: &str,
    groups: &str,
) {
    fs::write(dir.join(POINTS_FILE), points).unwrap();
    fs::write(dir.join(CATEGORIES_FILE), categories).unwrap();
    fs::write(dir.join(GROUPS_FILE), groups).unwrap();
}

#[fixture]
fn data_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[rstest]
fn test_read_records(data_dir: TempDir) {
    write_sources(
        data_dir.path(),
        "0 0\n5 5\n1.5 -1\n",
        "1\n2.9\n-3.7\n",
        "10\n10\n20\n",
    );
    let records = Ingestor::new(IngestSources::from_data_dir(data_dir.path()))
        .read_records()
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(
        records[2],
        IngestRecord {
            line:     3,
            point:    Point::new(1.5, -1.0),
            category: -3,
            group_id: 20,
        }
    );
    assert_eq!(records[1].category, 2);
    assert_eq!(
        records.iter().map(IngestRecord::region_id).collect_vec(),
        vec![1, 2, 3]
    );
}

#[rstest]
fn test_load_derives_groups(data_dir: TempDir) {
    write_sources(
        data_dir.path(),
        "0 0\n1 1\n2 2\n3 3\n",
        "0\n0\n0\n0\n",
        "7\n3\n7\n5\n",
    );
    let batch = Ingestor::new(IngestSources::from_data_dir(data_dir.path()))
        .load()
        .unwrap();
    assert_eq!(batch.groups, BTreeSet::from([3, 5, 7]));
    assert_eq!(
        batch.regions.iter().map(Region::id).collect_vec(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(
        batch.regions.iter().map(Region::group_id).collect_vec(),
        vec![7, 3, 7, 5]
    );
}

#[rstest]
fn test_crlf_and_missing_final_newline(data_dir: TempDir) {
    write_sources(data_dir.path(), "0 0\r\n1 1", "1\r\n2", "1\r\n2");
    let records = Ingestor::new(IngestSources::from_data_dir(data_dir.path()))
        .read_records()
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].point, Point::new(1.0, 1.0));
    assert_eq!(records[1].group_id, 2);
}

#[rstest]
fn test_empty_sources(data_dir: TempDir) {
    write_sources(data_dir.path(), "", "", "");
    let mut store = MemoryStore::new();
    let summary = Ingestor::new(IngestSources::from_data_dir(data_dir.path()))
        .run(&mut store)
        .unwrap();
    assert_eq!(summary, IngestSummary {
        regions: 0,
        groups:  0,
    });
}

#[rstest]
fn test_missing_source(data_dir: TempDir) {
    fs::write(data_dir.path().join(POINTS_FILE), "0 0\n").unwrap();
    fs::write(data_dir.path().join(GROUPS_FILE), "1\n").unwrap();
    let res = Ingestor::new(IngestSources::from_data_dir(data_dir.path())).read_records();
    match res {
        Err(RegionScopeError::MissingSource { path }) => {
            assert!(path.ends_with(CATEGORIES_FILE))
        },
        other => panic!("unexpected result: {:?}", other),
    }
}

#[rstest]
fn test_line_count_mismatch(data_dir: TempDir) {
    write_sources(data_dir.path(), "0 0\n1 1\n", "1\n", "1\n1\n");
    let mut store = MemoryStore::new();
    let res = Ingestor::new(IngestSources::from_data_dir(data_dir.path())).run(&mut store);
    match res {
        Err(RegionScopeError::LineCountMismatch {
            points,
            categories,
            groups,
        }) => {
            assert_eq!((points, categories, groups), (2, 1, 2));
        },
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(store.count_regions().unwrap(), 0);
    assert_eq!(store.count_groups().unwrap(), 0);
}

#[rstest]
fn test_mismatch_reported_before_format(data_dir: TempDir) {
    write_sources(data_dir.path(), "garbage\n", "1\n2\n", "1\n");
    let res = Ingestor::new(IngestSources::from_data_dir(data_dir.path())).read_records();
    assert!(matches!(res, Err(RegionScopeError::LineCountMismatch { .. })));
}

#[rstest]
#[case::single_token("0 0\n1\n", 2)]
#[case::not_a_number("0 0\n1 1\nx 2\n", 3)]
#[case::blank_line("\n0 0\n", 1)]
#[case::infinite("inf 0\n", 1)]
fn test_point_format_error(
    data_dir: TempDir,
    #[case] points: &str,
    #[case] bad_line: usize,
) {
    let n = points.lines().count();
    let filler = "1\n".repeat(n);
    write_sources(data_dir.path(), points, &filler, &filler);

    let mut store = MemoryStore::new();
    let res = Ingestor::new(IngestSources::from_data_dir(data_dir.path())).run(&mut store);
    match res {
        Err(RegionScopeError::Format { path, line, .. }) => {
            assert!(path.ends_with(POINTS_FILE));
            assert_eq!(line, bad_line);
        },
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(store.count_regions().unwrap(), 0);
}

#[rstest]
#[case::text("abc")]
#[case::out_of_range("1e12")]
#[case::nan("NaN")]
fn test_category_format_error(
    data_dir: TempDir,
    #[case] category: &str,
) {
    write_sources(data_dir.path(), "0 0\n", &format!("{category}\n"), "1\n");
    let res = Ingestor::new(IngestSources::from_data_dir(data_dir.path())).read_records();
    match res {
        Err(RegionScopeError::Format { path, line, content, .. }) => {
            assert!(path.ends_with(CATEGORIES_FILE));
            assert_eq!(line, 1);
            assert_eq!(content, category);
        },
        other => panic!("unexpected result: {:?}", other),
    }
}

#[rstest]
#[case::fractional("1.5")]
#[case::text("g1")]
fn test_group_format_error(
    data_dir: TempDir,
    #[case] group: &str,
) {
    write_sources(data_dir.path(), "0 0\n", "1\n", &format!("{group}\n"));
    let res = Ingestor::new(IngestSources::from_data_dir(data_dir.path())).read_records();
    assert!(matches!(
        res,
        Err(RegionScopeError::Format { line: 1, .. })
    ));
}

#[rstest]
fn test_custom_source_names(data_dir: TempDir) {
    let dir = data_dir.path();
    fs::write(dir.join("xy.dat"), "2 3\n").unwrap();
    fs::write(dir.join("cat.dat"), "4\n").unwrap();
    fs::write(dir.join("grp.dat"), "5\n").unwrap();
    let sources = IngestSources::from_data_dir(dir)
        .with_points(dir.join("xy.dat"))
        .with_categories(dir.join("cat.dat"))
        .with_groups(dir.join("grp.dat"));

    let mut store = MemoryStore::new();
    let summary = Ingestor::new(sources).run(&mut store).unwrap();
    assert_eq!(summary.to_string(), "1 regions in 1 groups");
    assert_eq!(store.regions(), &[Region::new(1, 5, Point::new(2.0, 3.0), 4)]);
}

#[rstest]
fn test_run_into_non_empty_store_fails_atomically(data_dir: TempDir) {
    write_sources(data_dir.path(), "0 0\n1 1\n", "1\n1\n", "1\n2\n");
    let ingestor = Ingestor::new(IngestSources::from_data_dir(data_dir.path()));
    let mut store = crate::store::SqliteStore::open_in_memory().unwrap();

    ingestor.run(&mut store).unwrap();
    let res = ingestor.run(&mut store);
    assert!(matches!(res, Err(RegionScopeError::StoreWrite { .. })));
    assert_eq!(store.count_regions().unwrap(), 2);
    assert_eq!(store.count_groups().unwrap(), 2);
}
