//! Scalar fields for glacier models, most notably the ice thickness derived from known
//! ice surface and bed elevations.
//!
//! Every field implements [`ScalarField`], the evaluation interface numerical solvers use
//! to query coefficients at quadrature points. [`IceThickness`] borrows a bed and a surface
//! field and evaluates their difference on demand. Elevations typically come as gridded data,
//! see [`RasterField`] and [`IceGeometry`].
//!
//! # Examples
//! ```
//! use icefield::{FnField, IceThickness, Point, ScalarField};
//!
//! let bed = FnField::new(|p: &Point<2>| 5.0 * p.x() + 2.0 * p.y());
//! let surface = FnField::new(|p: &Point<2>| 10.0 * p.x() + 2.0 * p.y());
//! let thickness = IceThickness::new(&bed, &surface);
//!
//! assert_eq!(thickness.value(&Point::new(1.0, 1.0)).unwrap(), 5.0);
//! assert_eq!(thickness.value(&Point::new(2.0, 0.0)).unwrap(), 10.0);
//! ```

pub mod array;
pub mod error;
pub mod function;
pub mod geometry;
pub mod grid;
pub mod mask;
pub mod raster;
pub mod thickness;

pub use error::FieldError;
pub use function::{ConstantField, FnField, Point, ScalarField, SCALAR_COMPONENT};
pub use geometry::{IceGeometry, Layer};
pub use grid::{GridSpec, RasterGrid, RasterGridBuilder};
pub use raster::RasterField;
pub use thickness::IceThickness;
