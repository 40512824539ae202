mod common;

use std::collections::BTreeSet;

use common::DemoDatasetBuilder;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng,
};
use regionscope::prelude::*;
use rstest::rstest;

/// Straightforward evaluation over the full region list.
fn reference(
    regions: &[Region],
    descriptor: &QueryDescriptor,
) -> Vec<RegionId> {
    let bbox = descriptor.region();
    let matched = regions
        .iter()
        .filter(|r| bbox.contains(&r.point()))
        .filter(|r| descriptor.category().is_none_or(|c| r.category() == c))
        .filter(|r| {
            descriptor
                .one_of_groups()
                .is_none_or(|groups| groups.contains(&r.group_id()))
        })
        .collect_vec();

    let broken_groups: BTreeSet<GroupId> = if descriptor.proper() {
        regions
            .iter()
            .filter(|r| !bbox.contains(&r.point()))
            .map(Region::group_id)
            .collect()
    }
    else {
        BTreeSet::new()
    };

    matched
        .into_iter()
        .filter(|r| !broken_groups.contains(&r.group_id()))
        .sorted_by(|a, b| a.cmp_output_order(b))
        .map(Region::id)
        .collect()
}

fn random_descriptor(
    rng: &mut StdRng,
    extent: f64,
    n_groups: GroupId,
) -> QueryDescriptor {
    let (x0, x1) = (rng.gen_range(0.0..extent), rng.gen_range(0.0..extent));
    let (y0, y1) = (rng.gen_range(0.0..extent), rng.gen_range(0.0..extent));
    let bbox = BoundingBox::from_bounds(
        (x0.min(x1) * 4.0).round() / 4.0,
        (y0.min(y1) * 4.0).round() / 4.0,
        (x0.max(x1) * 4.0).round() / 4.0,
        (y0.max(y1) * 4.0).round() / 4.0,
    )
    .unwrap();

    let mut descriptor = QueryDescriptor::new(bbox).with_proper(rng.gen_bool(0.5));
    if rng.gen_bool(0.3) {
        descriptor = descriptor.with_category(rng.gen_range(0..4));
    }
    if rng.gen_bool(0.3) {
        let groups = (0..rng.gen_range(1..4))
            .map(|_| rng.gen_range(1..=n_groups))
            .collect_vec();
        descriptor = descriptor.with_groups(groups).unwrap();
    }
    descriptor
}

#[rstest]
#[case::sparse_groups(200, 80, 10.0, 1)]
#[case::dense_groups(500, 12, 10.0, 2)]
#[case::single_group(50, 1, 5.0, 3)]
fn matches_reference(
    #[case] n_regions: usize,
    #[case] n_groups: GroupId,
    #[case] extent: f64,
    #[case] seed: u64,
) -> anyhow::Result<()> {
    let regions = DemoDatasetBuilder::new(n_regions, n_groups, extent, seed).generate();
    let dir = tempfile::tempdir()?;
    DemoDatasetBuilder::write_sources(&regions, dir.path())?;

    let ingestor = Ingestor::new(IngestSources::from_data_dir(dir.path()));
    let mut memory = MemoryStore::new();
    ingestor.run(&mut memory)?;
    let mut sqlite = SqliteStore::open(&StoreConfig::new(dir.path().join("db.sqlite")))?;
    ingestor.run(&mut sqlite)?;
    assert_eq!(memory.regions(), regions.as_slice());

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..50 {
        let descriptor = random_descriptor(&mut rng, extent, n_groups);
        let expected = reference(&regions, &descriptor);

        let from_memory = QueryEngine::new(&memory).evaluate_regions(&descriptor)?;
        let from_sqlite = QueryEngine::new(&sqlite).evaluate_regions(&descriptor)?;
        assert_eq!(
            from_memory.iter().map(Region::id).collect_vec(),
            expected,
            "memory store, query {}",
            descriptor
        );
        assert_eq!(from_memory, from_sqlite, "sqlite store, query {}", descriptor);
    }
    Ok(())
}
