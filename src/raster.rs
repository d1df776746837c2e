//! Gridded scalar fields, e.g. bed or surface elevation maps.

use std::rc::Rc;

use log::trace;

use crate::array::{ArrND, Ix};
use crate::error::FieldError;
use crate::function::{ensure_scalar_component, Point, ScalarField};
use crate::grid::RasterGrid;

/// Scalar field given by nodal values on a [`RasterGrid`] and bilinear interpolation in between.
///
/// Several fields can share one grid through the [`Rc`] handle. Because of that handle a
/// `RasterField` is neither `Send` nor `Sync`.
///
/// A point only has a value if every node of its enclosing cell that contributes to the
/// interpolation is inside the grid mask and holds a finite value.
///
/// # Examples
/// ```
/// use std::rc::Rc;
/// use icefield::function::{Point, ScalarField};
/// use icefield::grid::RasterGridBuilder;
/// use icefield::raster::RasterField;
///
/// let grid = Rc::new(RasterGridBuilder::shape([2, 2]).build().unwrap());
/// let bed = RasterField::from_fn(&grid, |p| 10.0 * p.x());
///
/// assert_eq!(bed.value(&Point::new(0.5, 0.5)).unwrap(), 5.0);
/// assert!(bed.value(&Point::new(2.0, 0.5)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct RasterField {
    grid: Rc<RasterGrid>,
    data: ArrND<2, f64>,
}

impl RasterField {
    /// Wrap nodal values `data`, which must have the shape of `grid`.
    pub fn from_data(grid: &Rc<RasterGrid>, data: ArrND<2, f64>) -> Result<Self, FieldError> {
        if data.shape() != grid.shape() {
            return Err(FieldError::ShapeMismatch {
                expected: grid.shape().as_ref().to_vec(),
                found: data.shape().as_ref().to_vec(),
            });
        }
        Ok(Self {
            grid: Rc::clone(grid),
            data,
        })
    }

    /// Sample the closure `f` at every node of `grid`.
    pub fn from_fn<F>(grid: &Rc<RasterGrid>, f: F) -> Self
    where
        F: Fn(&Point<2>) -> f64,
    {
        Self {
            grid: Rc::clone(grid),
            data: ArrND::from_fn(grid.shape(), |idx| f(&grid.coord(idx))),
        }
    }

    /// Evaluate `field` at every inside node of `grid`. Nodes outside the mask are set to NaN.
    ///
    /// The first failing evaluation aborts sampling and its error is returned.
    pub fn sample<F>(grid: &Rc<RasterGrid>, field: &F) -> Result<Self, FieldError>
    where
        F: ScalarField<2> + ?Sized,
    {
        let mask = grid.get_mask();
        let mut data = ArrND::full(f64::NAN, grid.shape());
        for idx in grid.shape() {
            if mask[idx].is_inside() {
                data[idx] = field.value(&grid.coord(idx))?;
            }
        }
        Ok(Self {
            grid: Rc::clone(grid),
            data,
        })
    }

    pub fn grid(&self) -> &Rc<RasterGrid> {
        &self.grid
    }

    pub fn data(&self) -> &ArrND<2, f64> {
        &self.data
    }

    /// Value stored at node `idx`, `None` if the node is masked out or does not exist.
    pub fn node_value(&self, idx: Ix<2>) -> Option<f64> {
        let inside = self.grid.get_mask().get(idx)?.is_inside();
        if inside {
            self.data.get(idx).copied()
        } else {
            None
        }
    }
}

impl ScalarField<2> for RasterField {
    fn evaluate(&self, point: &Point<2>, component: usize) -> Result<f64, FieldError> {
        ensure_scalar_component(component)?;

        let cell = self.grid.locate(point).ok_or_else(|| {
            trace!("({}, {}) is outside of the raster", point.x(), point.y());
            FieldError::OutsideGrid {
                x: point.x(),
                y: point.y(),
            }
        })?;

        let mut value = 0.0;
        for (idx, weight) in cell.stencil() {
            if weight == 0.0 {
                continue;
            }
            match self.node_value(idx) {
                Some(v) if v.is_finite() => value += weight * v,
                _ => {
                    trace!("missing data at node {:?}", idx);
                    return Err(FieldError::MissingData {
                        x: point.x(),
                        y: point.y(),
                    });
                }
            }
        }
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use crate::array::ArrND;
    use crate::error::FieldError;
    use crate::function::{ConstantField, FnField, Point, ScalarField};
    use crate::grid::{RasterGrid, RasterGridBuilder};
    use crate::mask::DomainMask;

    use super::RasterField;

    fn unit_grid() -> Rc<RasterGrid> {
        Rc::new(
            RasterGridBuilder::shape([3, 3])
                .cartesian_coordinates([0.0, 0.0], [10.0, 10.0])
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn interpolation_reproduces_nodal_values() {
        let grid = unit_grid();
        let field = RasterField::from_fn(&grid, |p| p.x() * p.y());

        for idx in grid.shape() {
            let p = grid.coord(idx);
            assert_eq!(field.value(&p).unwrap(), p.x() * p.y());
        }
    }

    #[test]
    fn interpolation_is_exact_for_bilinear_fields() {
        let grid = unit_grid();
        let f = |p: &Point<2>| 3.0 + 2.0 * p.x() - p.y() + 0.5 * p.x() * p.y();
        let field = RasterField::from_fn(&grid, f);

        for p in [Point::new(2.5, 7.5), Point::new(13.0, 4.0), Point::new(19.9, 19.9)] {
            assert!((field.value(&p).unwrap() - f(&p)).abs() < 1e-9);
        }
    }

    #[test]
    fn from_data_checks_shape() {
        let grid = unit_grid();
        let data = ArrND::full(1.0, [3, 4]);

        assert!(matches!(
            RasterField::from_data(&grid, data),
            Err(FieldError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn outside_points_are_rejected() {
        let grid = unit_grid();
        let field = RasterField::from_data(&grid, ArrND::full(1.0, [3, 3])).unwrap();

        assert!(matches!(
            field.value(&Point::new(-1.0, 5.0)),
            Err(FieldError::OutsideGrid { x, y }) if x == -1.0 && y == 5.0
        ));
    }

    #[test]
    fn masked_nodes_have_no_data() {
        let grid = Rc::new(
            RasterGridBuilder::shape([3, 3])
                .mask(|idx| DomainMask::from(idx != [2, 2]))
                .build()
                .unwrap(),
        );
        let field = RasterField::from_data(&grid, ArrND::full(4.0, [3, 3])).unwrap();

        // the masked node contributes to this point
        assert!(matches!(
            field.value(&Point::new(1.5, 1.5)),
            Err(FieldError::MissingData { .. })
        ));
        // but not to the edge shared with the neighbouring cell
        assert_eq!(field.value(&Point::new(1.5, 1.0)).unwrap(), 4.0);
        assert_eq!(field.value(&Point::new(0.5, 0.5)).unwrap(), 4.0);
        assert_eq!(field.node_value([2, 2]), None);
    }

    #[test]
    fn non_finite_values_have_no_data() {
        let grid = unit_grid();
        let mut data = ArrND::full(1.0, [3, 3]);
        data[[0, 0]] = f64::NAN;
        let field = RasterField::from_data(&grid, data).unwrap();

        assert!(matches!(
            field.value(&Point::new(1.0, 1.0)),
            Err(FieldError::MissingData { .. })
        ));
        assert_eq!(field.value(&Point::new(10.0, 10.0)).unwrap(), 1.0);
    }

    #[test]
    fn other_components_are_rejected() {
        let field = RasterField::from_fn(&unit_grid(), |_| 1.0);

        assert!(matches!(
            field.evaluate(&Point::new(1.0, 1.0), 1),
            Err(FieldError::InvalidComponent { component: 1, .. })
        ));
    }

    #[test]
    fn sample_skips_masked_nodes() {
        let grid = Rc::new(
            RasterGridBuilder::shape([2, 3])
                .mask(|[_, i]| DomainMask::from(i < 2))
                .build()
                .unwrap(),
        );
        let field = RasterField::sample(&grid, &ConstantField::new(7.0)).unwrap();

        assert_eq!(field.data()[[1, 1]], 7.0);
        assert!(field.data()[[1, 2]].is_nan());
        assert!(Rc::ptr_eq(field.grid(), &grid));
    }

    #[test]
    fn sample_propagates_errors() {
        let grid = unit_grid();
        let coarse = Rc::new(RasterGridBuilder::shape([2, 2]).build().unwrap());
        let small = RasterField::from_fn(&coarse, |_| 1.0);

        // nodes of `grid` beyond [0, 1] x [0, 1] are outside of `small`
        assert!(matches!(
            RasterField::sample(&grid, &small),
            Err(FieldError::OutsideGrid { .. })
        ));

        let analytic = FnField::new(|p: &Point<2>| p.x());
        let sampled = RasterField::sample(&grid, &analytic).unwrap();
        assert_eq!(sampled.data()[[2, 1]], 10.0);
    }
}
