//! # ocr-lines
//!
//! Rebuilds human-readable lines from raw OCR detector output. Detectors hand back
//! fragments (a quadrilateral, the recognized text and a confidence) in whatever order
//! they found them; this crate normalizes the various output shapes and groups the
//! fragments into rows, top to bottom and left to right.
//!
//! ```
//! use ocr_lines::prelude::*;
//! use serde_json::json;
//!
//! let raw = json!([
//!     [[[5, 5], [60, 5], [60, 15], [5, 15]], ["Coffee", 0.99]],
//!     [[[80, 7], [110, 7], [110, 17], [80, 17]], ["3.50", 0.97]],
//! ]);
//! let analysis = analyze_value(&raw, &ReconstructorConfig::default());
//! assert_eq!(analysis.lines, vec!["Coffee   3.50"]);
//! ```

pub mod engine;
pub mod normalize;
pub mod reconstruct;
pub mod region;

pub use engine::{analyze, analyze_source, analyze_value, Analysis, DetectionSource, SourceError};
pub use normalize::{normalize, normalize_value, parse_region, ColumnarDetection, NormalizeError, RawDetection};
pub use reconstruct::{reconstruct_lines, LineReconstructor, ReconstructorConfig};
pub use region::{Fragment, Point, Region};

pub mod prelude {
    pub use crate::{
        analyze, analyze_source, analyze_value, normalize, normalize_value, reconstruct_lines, Analysis,
        DetectionSource, Fragment, LineReconstructor, Point, RawDetection, ReconstructorConfig, Region,
        SourceError,
    };
}
