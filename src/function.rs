//! Provides the [`ScalarField`] trait, which must be implemented by anything that can be
//! evaluated pointwise in space, together with the [`Point`] type and a few analytic fields.

use std::ops::Index;
use std::rc::Rc;
use std::sync::Arc;

use log::trace;

use crate::error::FieldError;

/// Component index of a scalar field. It is the only index a scalar field accepts.
pub const SCALAR_COMPONENT: usize = 0;

/// Immutable coordinate tuple in `DIM`-dimensional space.
///
/// # Examples
/// ```
/// use icefield::function::Point;
///
/// let p = Point::new(1.0, 2.0);
/// assert_eq!(p.x(), 1.0);
/// assert_eq!(p[1], 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<const DIM: usize>([f64; DIM]);

impl<const DIM: usize> Point<DIM> {
    /// Return the coordinates as an array.
    pub fn coords(&self) -> [f64; DIM] {
        self.0
    }
}

impl Point<2> {
    pub fn new(x: f64, y: f64) -> Self {
        Point([x, y])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }
}

impl<const DIM: usize> From<[f64; DIM]> for Point<DIM> {
    fn from(coords: [f64; DIM]) -> Self {
        Point(coords)
    }
}

impl<const DIM: usize> Index<usize> for Point<DIM> {
    type Output = f64;

    fn index(&self, axis: usize) -> &Self::Output {
        &self.0[axis]
    }
}

/// Trait for spatial fields that can be evaluated at arbitrary points.
///
/// The interface is written for vector valued fields, hence the `component` argument of
/// [`ScalarField::evaluate`]. All fields of this crate are scalar and reject any component
/// other than [`SCALAR_COMPONENT`] with [`FieldError::InvalidComponent`].
///
/// Evaluation takes `&self`, so a field is safe to evaluate from several threads whenever
/// it is `Sync`.
pub trait ScalarField<const DIM: usize> {
    /// Number of components of the field.
    fn n_components(&self) -> usize {
        1
    }

    /// Evaluate `component` of the field at `point`.
    fn evaluate(&self, point: &Point<DIM>, component: usize) -> Result<f64, FieldError>;

    /// Evaluate the scalar component at `point`.
    fn value(&self, point: &Point<DIM>) -> Result<f64, FieldError> {
        self.evaluate(point, SCALAR_COMPONENT)
    }
}

impl<const DIM: usize, F> ScalarField<DIM> for &F
where
    F: ScalarField<DIM> + ?Sized,
{
    fn n_components(&self) -> usize {
        (**self).n_components()
    }

    fn evaluate(&self, point: &Point<DIM>, component: usize) -> Result<f64, FieldError> {
        (**self).evaluate(point, component)
    }
}

impl<const DIM: usize, F> ScalarField<DIM> for Box<F>
where
    F: ScalarField<DIM> + ?Sized,
{
    fn n_components(&self) -> usize {
        (**self).n_components()
    }

    fn evaluate(&self, point: &Point<DIM>, component: usize) -> Result<f64, FieldError> {
        (**self).evaluate(point, component)
    }
}

impl<const DIM: usize, F> ScalarField<DIM> for Rc<F>
where
    F: ScalarField<DIM> + ?Sized,
{
    fn n_components(&self) -> usize {
        (**self).n_components()
    }

    fn evaluate(&self, point: &Point<DIM>, component: usize) -> Result<f64, FieldError> {
        (**self).evaluate(point, component)
    }
}

impl<const DIM: usize, F> ScalarField<DIM> for Arc<F>
where
    F: ScalarField<DIM> + ?Sized,
{
    fn n_components(&self) -> usize {
        (**self).n_components()
    }

    fn evaluate(&self, point: &Point<DIM>, component: usize) -> Result<f64, FieldError> {
        (**self).evaluate(point, component)
    }
}

/// Return an error if `component` is not the scalar component.
pub fn ensure_scalar_component(component: usize) -> Result<(), FieldError> {
    if component == SCALAR_COMPONENT {
        Ok(())
    } else {
        trace!("rejecting component {} of scalar field", component);
        Err(FieldError::InvalidComponent {
            component,
            n_components: 1,
        })
    }
}

/// Field with the same value everywhere.
///
/// # Examples
/// ```
/// use icefield::function::{ConstantField, Point, ScalarField};
///
/// let bed = ConstantField::new(100.0);
/// assert_eq!(bed.value(&Point::new(3.0, -1.0)).unwrap(), 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField {
    value: f64,
}

impl ConstantField {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// The identically vanishing field.
    pub fn zero() -> Self {
        Self::new(0.0)
    }
}

impl<const DIM: usize> ScalarField<DIM> for ConstantField {
    fn evaluate(&self, _point: &Point<DIM>, component: usize) -> Result<f64, FieldError> {
        ensure_scalar_component(component)?;
        Ok(self.value)
    }
}

/// Field defined by a closure, e.g. an analytic bed or surface profile.
///
/// # Examples
/// ```
/// use icefield::function::{FnField, Point, ScalarField};
///
/// let surface = FnField::new(|p: &Point<2>| 10.0 * p.x() + 2.0 * p.y());
/// assert_eq!(surface.value(&Point::new(1.0, 1.0)).unwrap(), 12.0);
/// ```
#[derive(Clone, Copy)]
pub struct FnField<const DIM: usize, F> {
    f: F,
}

impl<const DIM: usize, F> FnField<DIM, F>
where
    F: Fn(&Point<DIM>) -> f64,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<const DIM: usize, F> ScalarField<DIM> for FnField<DIM, F>
where
    F: Fn(&Point<DIM>) -> f64,
{
    fn evaluate(&self, point: &Point<DIM>, component: usize) -> Result<f64, FieldError> {
        ensure_scalar_component(component)?;
        Ok((self.f)(point))
    }
}
