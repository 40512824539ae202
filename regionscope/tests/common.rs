#![allow(dead_code)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng,
};
use regionscope::io::ingest::{
    CATEGORIES_FILE,
    GROUPS_FILE,
    POINTS_FILE,
};
use regionscope::prelude::*;
use serde_json::{
    json,
    Value,
};

/// Directory with the small hand-written data set used by the scenario tests.
pub fn sample_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/inspection")
}

/// Builds a crop query document.
pub fn crop_query(
    p_min: (f64, f64),
    p_max: (f64, f64),
    category: Option<CategoryNum>,
    one_of_groups: Option<Vec<GroupId>>,
    proper: bool,
) -> Value {
    let mut crop = json!({
        "region": {
            "p_min": {"x": p_min.0, "y": p_min.1},
            "p_max": {"x": p_max.0, "y": p_max.1}
        },
        "proper": proper
    });
    if let Some(category) = category {
        crop["category"] = json!(category);
    }
    if let Some(groups) = one_of_groups {
        crop["one_of_groups"] = json!(groups);
    }
    json!({"query": {"operator_crop": crop}})
}

/// Runs a query and renders the output exactly as the result writer does.
pub fn render_query<S: RegionStore>(
    store: &S,
    query: &Value,
) -> anyhow::Result<String> {
    let descriptor = QueryDescriptor::from_value(query)?;
    let rows = QueryEngine::new(store).evaluate(&descriptor)?;
    let mut writer = ResultWriter::new(Vec::new());
    writer.write_rows(&rows)?;
    Ok(String::from_utf8(writer.finish()?)?)
}

/// Generates random inspection data sets.
pub struct DemoDatasetBuilder {
    n_regions: usize,
    n_groups:  GroupId,
    extent:    f64,
    rng:       StdRng,
}

impl DemoDatasetBuilder {
    pub fn new(
        n_regions: usize,
        n_groups: GroupId,
        extent: f64,
        seed: u64,
    ) -> Self {
        Self {
            n_regions,
            n_groups,
            extent,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the regions as they will be numbered after ingestion.
    pub fn generate(&mut self) -> Vec<Region> {
        (1..=self.n_regions)
            .map(|id| {
                // Snapped to a 0.25 grid so that points regularly land on
                // the query box edges.
                let x = (self.rng.gen_range(0.0..self.extent) * 4.0).round() / 4.0;
                let y = (self.rng.gen_range(0.0..self.extent) * 4.0).round() / 4.0;
                Region::new(
                    id as RegionId,
                    self.rng.gen_range(1..=self.n_groups),
                    Point::new(x, y),
                    self.rng.gen_range(0..4),
                )
            })
            .collect()
    }

    /// Writes `regions` as the three line-aligned source files in `dir`.
    pub fn write_sources(
        regions: &[Region],
        dir: &Path,
    ) -> anyhow::Result<()> {
        let mut points = String::new();
        let mut categories = String::new();
        let mut groups = String::new();
        for region in regions {
            points.push_str(&format!("{} {}\n", region.coord_x(), region.coord_y()));
            categories.push_str(&format!("{}\n", region.category()));
            groups.push_str(&format!("{}\n", region.group_id()));
        }
        fs::write(dir.join(POINTS_FILE), points)?;
        fs::write(dir.join(CATEGORIES_FILE), categories)?;
        fs::write(dir.join(GROUPS_FILE), groups)?;
        Ok(())
    }
}
