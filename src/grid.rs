//! Regular 2D [grids](`RasterGrid`) on which gridded elevation data is defined.
//!
//! Node `[j, i]` of a grid sits at `x = x0 + i * dx`, `y = y0 + j * dy`. All per-dimension
//! arrays (shape, origin, spacing) are ordered like the node index, i.e. `[y, x]`.

use log::debug;

use crate::array::{ArrND, IntoShape, Ix, Shape};
use crate::error::FieldError;
use crate::function::Point;
use crate::mask::DomainMask;

/// Tolerance, in units of cells, for points on the outer boundary of a grid.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Cell of a grid enclosing a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Index of the node with the smallest indices of the cell.
    pub index: Ix<2>,
    /// Fractional position `[ty, tx]` of the point within the cell, each in `[0, 1]`.
    pub offset: [f64; 2],
}

impl Cell {
    /// The four nodes of the cell together with their bilinear interpolation weights.
    pub fn stencil(&self) -> [(Ix<2>, f64); 4] {
        let [j, i] = self.index;
        let [ty, tx] = self.offset;
        [
            ([j, i], (1.0 - ty) * (1.0 - tx)),
            ([j, i + 1], (1.0 - ty) * tx),
            ([j + 1, i], ty * (1.0 - tx)),
            ([j + 1, i + 1], ty * tx),
        ]
    }
}

/// Regular, axis aligned grid in the plane with a [`DomainMask`] per node.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterGrid {
    start: [f64; 2],
    delta: [f64; 2],
    mask: ArrND<2, DomainMask>,
}

impl RasterGrid {
    /// Number of nodes along each dimension.
    pub fn shape(&self) -> Shape<2> {
        self.mask.shape()
    }

    /// Coordinates `[y0, x0]` of node `[0, 0]`.
    pub fn origin(&self) -> [f64; 2] {
        self.start
    }

    /// Grid spacing `[dy, dx]`.
    pub fn spacing(&self) -> [f64; 2] {
        self.delta
    }

    pub fn get_mask(&self) -> &ArrND<2, DomainMask> {
        &self.mask
    }

    /// Position of node `idx`.
    pub fn coord(&self, idx: Ix<2>) -> Point<2> {
        let [y0, x0] = self.start;
        let [dy, dx] = self.delta;
        Point::new(x0 + dx * idx[1] as f64, y0 + dy * idx[0] as f64)
    }

    /// Bounding box `([xmin, xmax], [ymin, ymax])` of the grid.
    pub fn extent(&self) -> ([f64; 2], [f64; 2]) {
        let shape = self.shape();
        let bounds = |dim: usize| {
            let a = self.start[dim];
            let b = a + self.delta[dim] * (shape[dim] - 1) as f64;
            [a.min(b), a.max(b)]
        };
        (bounds(1), bounds(0))
    }

    /// Check if `point` lies within the extent of the grid.
    pub fn contains(&self, point: &Point<2>) -> bool {
        self.locate(point).is_some()
    }

    /// Find the cell enclosing `point`. Returns `None` outside of the grid.
    pub fn locate(&self, point: &Point<2>) -> Option<Cell> {
        let shape = self.shape();
        let coords = [point.y(), point.x()];
        let mut index = [0; 2];
        let mut offset = [0.0; 2];
        for dim in 0..2 {
            let last = (shape[dim] - 1) as f64;
            let f = (coords[dim] - self.start[dim]) / self.delta[dim];
            if !f.is_finite() || f < -BOUNDARY_TOLERANCE || f > last + BOUNDARY_TOLERANCE {
                return None;
            }
            let f = f.clamp(0.0, last);
            let i = (f.floor() as usize).min(shape[dim] - 2);
            index[dim] = i;
            offset[dim] = f - i as f64;
        }
        Some(Cell { index, offset })
    }
}

/// Configuration record of a [`RasterGrid`], e.g. read from the header of an elevation dataset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    /// Number of nodes `[ny, nx]`.
    pub shape: [usize; 2],
    /// Coordinates `[y0, x0]` of node `[0, 0]`.
    pub origin: [f64; 2],
    /// Grid spacing `[dy, dx]`.
    pub spacing: [f64; 2],
}

/// Builder for [`RasterGrid`] types
///
/// # Examples
/// ```
/// use icefield::function::Point;
/// use icefield::grid::RasterGridBuilder;
/// use icefield::mask::DomainMask;
///
/// let grid = RasterGridBuilder::shape([3, 4])
///     .cartesian_coordinates([0.0, 100.0], [50.0, 50.0])
///     .mask(|[j, _]| DomainMask::from(j > 0))
///     .build()
///     .unwrap();
///
/// assert_eq!(grid.coord([1, 2]), Point::new(200.0, 50.0));
/// assert!(grid.get_mask()[[0, 0]].is_outside());
/// assert!(grid.contains(&Point::new(250.0, 100.0)));
/// ```
#[derive(Clone, Debug)]
pub struct RasterGridBuilder {
    shape: Shape<2>,
    start: [f64; 2],
    delta: [f64; 2],
    mask: Option<ArrND<2, DomainMask>>,
}

impl RasterGridBuilder {
    /// Build a [`RasterGrid`] with given `shape`.
    ///
    /// This is the first method in the build chain.
    pub fn shape(shape: impl IntoShape<2>) -> Self {
        Self {
            shape: shape.into_shape(),
            start: [0.0, 0.0],
            delta: [1.0, 1.0],
            mask: None,
        }
    }

    /// Start the build chain from a [`GridSpec`].
    pub fn from_spec(spec: &GridSpec) -> Self {
        Self::shape(spec.shape).cartesian_coordinates(spec.origin, spec.spacing)
    }

    /// Define the coordinates of node `[0, 0]` and the spacing of the nodes.
    pub fn cartesian_coordinates(self, start: [f64; 2], delta: [f64; 2]) -> Self {
        Self {
            start,
            delta,
            ..self
        }
    }

    /// Define mask by providing a closure that takes an index array as argument and returns the mask value
    pub fn mask<F>(self, predicate: F) -> Self
    where
        F: Fn(Ix<2>) -> DomainMask,
    {
        let mask = ArrND::from_fn(self.shape, predicate);
        Self {
            mask: Some(mask),
            ..self
        }
    }

    /// Build the [`RasterGrid`]. Without a mask, all nodes are inside.
    pub fn build(self) -> Result<RasterGrid, FieldError> {
        let Self {
            shape,
            start,
            delta,
            mask,
        } = self;

        if shape.as_ref().iter().any(|&n| n < 2) {
            return Err(FieldError::InvalidGrid(
                "at least two nodes are required along each dimension",
            ));
        }
        if delta.iter().any(|d| !d.is_finite() || *d == 0.0) {
            return Err(FieldError::InvalidGrid("grid spacing must be finite and non-zero"));
        }
        if start.iter().any(|s| !s.is_finite()) {
            return Err(FieldError::InvalidGrid("grid origin must be finite"));
        }

        debug!(
            "building raster grid of shape {:?}, origin {:?}, spacing {:?}",
            shape.as_ref(),
            start,
            delta
        );

        Ok(RasterGrid {
            start,
            delta,
            mask: mask.unwrap_or_else(|| ArrND::full(DomainMask::Inside, shape)),
        })
    }
}
