use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::CoordNum;

/// Represents a planar point with `x` and `y` coordinates.
///
/// Negative zero is stored as positive zero, so `-0` and `0` compare, sort
/// and print the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointRepr")]
pub struct Point {
    x: CoordNum,
    y: CoordNum,
}

#[derive(Deserialize)]
struct PointRepr {
    x: CoordNum,
    y: CoordNum,
}

impl From<PointRepr> for Point {
    fn from(value: PointRepr) -> Self {
        Self::new(value.x, value.y)
    }
}

impl Point {
    /// Creates a new `Point`.
    pub fn new(
        x: CoordNum,
        y: CoordNum,
    ) -> Self {
        // -0.0 + 0.0 == +0.0
        Self {
            x: x + 0.0,
            y: y + 0.0,
        }
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> CoordNum {
        self.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> CoordNum {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Orders points by `y` first and `x` second.
    ///
    /// This is the output order of crop queries. Uses [`f64::total_cmp`], so
    /// the ordering is total even for values the store should never hold.
    /// Equal coordinates compare equal because [`Point::new`] drops the sign
    /// of zero.
    pub fn cmp_yx(
        &self,
        other: &Self,
    ) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
    }
}

impl From<(CoordNum, CoordNum)> for Point {
    fn from(value: (CoordNum, CoordNum)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<Point> for (CoordNum, CoordNum) {
    fn from(value: Point) -> Self {
        (value.x, value.y)
    }
}

impl Display for Point {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePointError {
    MissingCoordinate(&'static str),
    InvalidNumber(String),
}

impl Display for ParsePointError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ParsePointError::MissingCoordinate(axis) => {
                write!(f, "missing {} coordinate", axis)
            },
            ParsePointError::InvalidNumber(token) => {
                write!(f, "'{}' is not a number", token)
            },
        }
    }
}

impl std::error::Error for ParsePointError {}

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parses the first two whitespace separated tokens as `x` and `y`.
    /// Anything after them is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut next_coord = |axis: &'static str| -> Result<CoordNum, ParsePointError> {
            let token = tokens
                .next()
                .ok_or(ParsePointError::MissingCoordinate(axis))?;
            token
                .parse::<CoordNum>()
                .map_err(|_| ParsePointError::InvalidNumber(token.to_string()))
        };
        let x = next_coord("x")?;
        let y = next_coord("y")?;
        Ok(Self::new(x, y))
    }
}
