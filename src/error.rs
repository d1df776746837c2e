//! Error type shared by all fields of this crate.

use thiserror::Error;

use crate::geometry::Layer;

/// Failure of a field evaluation or of building the objects fields are defined on.
#[derive(Error, Debug)]
pub enum FieldError {
    /// A component index other than the scalar one was requested.
    #[error("Unsupported component {component}, field has {n_components} component(s)")]
    InvalidComponent {
        component: usize,
        n_components: usize,
    },
    /// The point lies outside the extent of a gridded field.
    #[error("Point ({x}, {y}) lies outside the grid")]
    OutsideGrid { x: f64, y: f64 },
    /// The interpolation stencil of the point touches masked or non-finite data.
    #[error("No data available at ({x}, {y})")]
    MissingData { x: f64, y: f64 },
    #[error("Invalid grid: {0}")]
    InvalidGrid(&'static str),
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("Field is not defined on the geometry grid")]
    GridMismatch,
    #[error("Layer {0:?} is not present")]
    MissingLayer(Layer),
    /// Failure reported by a user supplied field.
    #[error(transparent)]
    External(#[from] Box<dyn std::error::Error + Send + Sync>),
}
