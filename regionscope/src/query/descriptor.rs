use std::collections::BTreeSet;
use std::fmt::Display;
use std::fs::File;
use std::io::{
    BufReader,
    Read,
};
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use log::warn;
use serde_json::{
    Map,
    Value,
};

use crate::data_structs::coords::{
    BoundingBox,
    Point,
};
use crate::data_structs::typedef::{
    CategoryNum,
    CoordNum,
    GroupId,
};
use crate::error::{
    RegionScopeError,
    RegionScopeResult,
};
use crate::store::RegionFilter;

const CROP_PATH: &str = "query.operator_crop";
const CROP_FIELDS: [&str; 4] = ["region", "category", "one_of_groups", "proper"];

/// A single crop query: a closed bounding box, optional category and group
/// restrictions, and the `proper` flag.
///
/// Query documents are JSON:
///
/// ```json
/// {
///   "query": {
///     "operator_crop": {
///       "region": { "p_min": { "x": 0, "y": 0 }, "p_max": { "x": 4, "y": 4 } },
///       "category": 2,
///       "one_of_groups": [1, 2],
///       "proper": true
///     }
///   }
/// }
/// ```
///
/// Only `region` is required. Missing `category` or `one_of_groups` mean no
/// restriction on that attribute, a missing `proper` means `false`, and
/// `null` is treated like a missing field.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    region:        BoundingBox,
    category:      Option<CategoryNum>,
    one_of_groups: Option<BTreeSet<GroupId>>,
    proper:        bool,
}

impl QueryDescriptor {
    /// Creates a query that only restricts by `region`.
    pub fn new(region: BoundingBox) -> Self {
        Self {
            region,
            category: None,
            one_of_groups: None,
            proper: false,
        }
    }

    pub fn with_category(
        mut self,
        category: CategoryNum,
    ) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts the query to the given groups. The set must not be empty.
    pub fn with_groups<I: IntoIterator<Item = GroupId>>(
        mut self,
        groups: I,
    ) -> RegionScopeResult<Self> {
        let groups: BTreeSet<GroupId> = groups.into_iter().collect();
        if groups.is_empty() {
            return Err(RegionScopeError::invalid_query(
                "one_of_groups",
                "group list must not be empty",
            ));
        }
        self.one_of_groups = Some(groups);
        Ok(self)
    }

    pub fn with_proper(
        mut self,
        proper: bool,
    ) -> Self {
        self.proper = proper;
        self
    }

    pub fn region(&self) -> &BoundingBox {
        &self.region
    }

    pub fn category(&self) -> Option<CategoryNum> {
        self.category
    }

    pub fn one_of_groups(&self) -> Option<&BTreeSet<GroupId>> {
        self.one_of_groups.as_ref()
    }

    pub fn proper(&self) -> bool {
        self.proper
    }

    /// The base scan predicate of this query.
    pub fn filter(&self) -> RegionFilter {
        RegionFilter::new(self.region)
            .with_category(self.category)
            .with_groups(self.one_of_groups.clone())
    }

    pub fn from_path(path: impl AsRef<Path>) -> RegionScopeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RegionScopeError::io(path, e))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> RegionScopeResult<Self> {
        let document: Value = serde_json::from_reader(reader)
            .map_err(|e| RegionScopeError::invalid_query("<document>", e.to_string()))?;
        Self::from_value(&document)
    }

    /// Builds the descriptor from an already parsed JSON document.
    pub fn from_value(document: &Value) -> RegionScopeResult<Self> {
        let crop = crop_section(document)?;
        for key in crop.keys().filter(|k| !CROP_FIELDS.contains(&k.as_str())) {
            warn!("Ignoring unknown query field `{}.{}`", CROP_PATH, key);
        }

        let region = match present(crop, "region") {
            Some(region) => parse_region(region)?,
            None => {
                return Err(RegionScopeError::invalid_query(
                    "region",
                    "bounding box is required",
                ))
            },
        };
        let mut descriptor = Self::new(region);

        if let Some(value) = present(crop, "category") {
            descriptor = descriptor.with_category(parse_category(value)?);
        }
        if let Some(value) = present(crop, "one_of_groups") {
            descriptor = descriptor.with_groups(parse_groups(value)?)?;
        }
        if let Some(value) = present(crop, "proper") {
            let proper = value.as_bool().ok_or_else(|| {
                RegionScopeError::invalid_query("proper", "expected a boolean")
            })?;
            descriptor = descriptor.with_proper(proper);
        }
        Ok(descriptor)
    }
}

impl FromStr for QueryDescriptor {
    type Err = RegionScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

impl Display for QueryDescriptor {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "region {}", self.region)?;
        if let Some(category) = self.category {
            write!(f, ", category {}", category)?;
        }
        if let Some(groups) = &self.one_of_groups {
            write!(f, ", groups [{}]", groups.iter().join(", "))?;
        }
        if self.proper {
            write!(f, ", proper")?;
        }
        Ok(())
    }
}

/// Returns `object[key]` unless it is missing or `null`.
fn present<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn crop_section(document: &Value) -> RegionScopeResult<&Map<String, Value>> {
    let mut current = document;
    let mut path = Vec::new();
    for key in CROP_PATH.split('.') {
        path.push(key);
        current = current
            .as_object()
            .and_then(|object| present(object, key))
            .ok_or_else(|| {
                RegionScopeError::invalid_query(path.join("."), "section is missing")
            })?;
    }
    current
        .as_object()
        .ok_or_else(|| RegionScopeError::invalid_query(CROP_PATH, "expected an object"))
}

fn parse_region(value: &Value) -> RegionScopeResult<BoundingBox> {
    let region = value
        .as_object()
        .ok_or_else(|| RegionScopeError::invalid_query("region", "expected an object"))?;
    let p_min = parse_point(region, "p_min")?;
    let p_max = parse_point(region, "p_max")?;
    BoundingBox::try_new(p_min, p_max)
}

fn parse_point(
    region: &Map<String, Value>,
    corner: &str,
) -> RegionScopeResult<Point> {
    let field = format!("region.{corner}");
    let point = present(region, corner)
        .ok_or_else(|| RegionScopeError::invalid_query(&field, "corner is missing"))?
        .as_object()
        .ok_or_else(|| RegionScopeError::invalid_query(&field, "expected an object"))?;

    let coord = |axis: &str| -> RegionScopeResult<CoordNum> {
        let field = format!("{field}.{axis}");
        present(point, axis)
            .ok_or_else(|| RegionScopeError::invalid_query(&field, "coordinate is missing"))?
            .as_f64()
            .ok_or_else(|| RegionScopeError::invalid_query(&field, "expected a number"))
    };
    Ok(Point::new(coord("x")?, coord("y")?))
}

fn parse_category(value: &Value) -> RegionScopeResult<CategoryNum> {
    value
        .as_i64()
        .and_then(|category| CategoryNum::try_from(category).ok())
        .ok_or_else(|| {
            RegionScopeError::invalid_query("category", "expected a 32-bit integer")
        })
}

fn parse_groups(value: &Value) -> RegionScopeResult<Vec<GroupId>> {
    let items = value.as_array().ok_or_else(|| {
        RegionScopeError::invalid_query("one_of_groups", "expected a list of group ids")
    })?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_i64().ok_or_else(|| {
                RegionScopeError::invalid_query(
                    format!("one_of_groups[{idx}]"),
                    "expected an integer",
                )
            })
        })
        .collect()
}
