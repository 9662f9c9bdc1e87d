//! Groups fragments into visual rows and joins each row into a line of text.
//!
//! Rows are found in one greedy sweep over the fragments sorted by vertical center. A
//! fragment joins the open row when its center is within `row_tolerance` times the
//! row's mean height of the center of the fragment added last; otherwise the row is
//! closed and a new one starts. Because the threshold is relative to fragment height,
//! large headers and fine print on the same page are handled alike.
//!
//! The sweep only ever looks at the running mean and the last member, so membership
//! depends on input order for ambiguous layouts. That is intentional and keeps the
//! whole pass at the cost of the sort.
use std::cmp::Ordering;

use tracing::trace;

use crate::region::Fragment;

/// Tunables for row grouping and line joining.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructorConfig {
    /// Fraction of the row's mean height two centers may differ by and share a row
    pub row_tolerance: f64,
    /// Inserted between fragments of one row; wide enough to read as a column gap
    pub separator: String,
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 0.5,
            separator: "   ".to_string(),
        }
    }
}

impl ReconstructorConfig {
    pub fn with_row_tolerance(mut self, row_tolerance: f64) -> Self {
        self.row_tolerance = row_tolerance;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Stateless; one value can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct LineReconstructor {
    config: ReconstructorConfig,
}

impl LineReconstructor {
    pub fn new(config: ReconstructorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconstructorConfig {
        &self.config
    }

    /// Rows top to bottom, each ordered left to right.
    pub fn group_rows<'a>(&self, fragments: &'a [Fragment]) -> Vec<Vec<&'a Fragment>> {
        let mut sorted: Vec<&Fragment> = fragments.iter().collect();
        // sort_by is stable, so equal centers keep input order
        sorted.sort_by(|a, b| cmp_coord(a.region().y_center(), b.region().y_center()));

        let mut rows: Vec<Vec<&Fragment>> = Vec::new();
        let mut current: Vec<&Fragment> = Vec::new();

        for fragment in sorted {
            let Some(last) = current.last() else {
                current.push(fragment);
                continue;
            };

            let avg_height =
                current.iter().map(|f| f.region().height()).sum::<f64>() / current.len() as f64;
            let last_y = last.region().y_center();
            let y = fragment.region().y_center();

            if (y - last_y).abs() < avg_height * self.config.row_tolerance {
                current.push(fragment);
            } else {
                trace!(members = current.len(), avg_height, last_y, next_y = y, "closing row");
                rows.push(std::mem::take(&mut current));
                current.push(fragment);
            }
        }

        if !current.is_empty() {
            rows.push(current);
        }

        for row in &mut rows {
            row.sort_by(|a, b| cmp_coord(a.region().x_min(), b.region().x_min()));
        }

        rows
    }

    pub fn reconstruct(&self, fragments: &[Fragment]) -> Vec<String> {
        self.group_rows(fragments)
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|f| f.text())
                    .collect::<Vec<_>>()
                    .join(&self.config.separator)
            })
            .collect()
    }
}

/// Total order on coordinates where `-0.0` and `0.0` tie.
fn cmp_coord(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

/// Reconstructs reading-order lines from fragments.
pub fn reconstruct_lines(fragments: &[Fragment], config: &ReconstructorConfig) -> Vec<String> {
    LineReconstructor::new(config.clone()).reconstruct(fragments)
}
