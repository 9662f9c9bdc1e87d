use serde::{Deserialize, Serialize};

use crate::normalize::NormalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral around a detected fragment, kept in detector order.
///
/// No winding order is assumed; only the extents and the mean y are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    points: [Point; 4],
}

impl Region {
    pub fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    pub fn from_points(points: &[Point]) -> Result<Self, NormalizeError> {
        let points: [Point; 4] = points
            .try_into()
            .map_err(|_| NormalizeError::PointCount(points.len()))?;
        Ok(Self::new(points))
    }

    /// Builds a region from a flat coordinate list.
    ///
    /// Eight numbers are read as `x1, y1, .., x4, y4`. Four numbers are an
    /// axis-aligned `[x_min, y_min, x_max, y_max]` box and expand to its corners.
    pub fn from_flat(coords: &[f64]) -> Result<Self, NormalizeError> {
        if coords.len() % 2 != 0 {
            return Err(NormalizeError::OddCoordinates(coords.len()));
        }
        match *coords {
            [x_min, y_min, x_max, y_max] => Ok(Self::from_rect(x_min, y_min, x_max, y_max)),
            _ => {
                let points: Vec<Point> = coords
                    .chunks_exact(2)
                    .map(|pair| Point::new(pair[0], pair[1]))
                    .collect();
                Self::from_points(&points)
            }
        }
    }

    pub fn from_rect(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self::new([
            Point::new(x_min, y_min),
            Point::new(x_max, y_min),
            Point::new(x_max, y_max),
            Point::new(x_min, y_max),
        ])
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    pub fn y_center(&self) -> f64 {
        self.points.iter().map(|p| p.y).sum::<f64>() / 4.0
    }

    pub fn x_min(&self) -> f64 {
        self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
    }

    pub fn x_max(&self) -> f64 {
        self.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn y_min(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min)
    }

    pub fn y_max(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn height(&self) -> f64 {
        self.y_max() - self.y_min()
    }

    /// Multiplies every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.points.map(|p| Point::new(p.x * factor, p.y * factor)))
    }
}

/// One recognized text span. The confidence is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    region: Region,
    text: String,
    confidence: f64,
}

impl Fragment {
    pub fn new(region: Region, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            region,
            text: text.into(),
            confidence,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}
