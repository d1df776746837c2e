//! The ice thickness field, derived from known ice surface and bed elevations.

use std::fmt;

use log::debug;

use crate::error::FieldError;
use crate::function::{ensure_scalar_component, Point, ScalarField};

/// Ice thickness `surface(x) - bed(x)`, evaluated pointwise from two borrowed elevation fields.
///
/// Nothing is cached: every evaluation queries both fields. The fields are only read through
/// shared references, so they outlive the thickness field and cannot change while it exists.
/// The result is not clamped and is negative wherever the bed lies above the surface.
///
/// `IceThickness` is `Send` and `Sync` if and only if both fields are `Sync`.
///
/// # Examples
/// ```
/// use icefield::function::{ConstantField, Point, ScalarField};
/// use icefield::thickness::IceThickness;
///
/// let bed = ConstantField::new(100.0);
/// let surface = ConstantField::new(350.0);
/// let thickness = IceThickness::new(&bed, &surface);
///
/// assert_eq!(thickness.value(&Point::new(0.0, 0.0)).unwrap(), 250.0);
/// ```
pub struct IceThickness<'a, B: ?Sized, S: ?Sized> {
    bed: &'a B,
    surface: &'a S,
}

impl<'a, B, S> IceThickness<'a, B, S>
where
    B: ScalarField<2> + ?Sized,
    S: ScalarField<2> + ?Sized,
{
    pub fn new(bed: &'a B, surface: &'a S) -> Self {
        debug!("binding ice thickness to bed and surface elevation");
        Self { bed, surface }
    }

    pub fn bed(&self) -> &'a B {
        self.bed
    }

    pub fn surface(&self) -> &'a S {
        self.surface
    }
}

impl<B: ?Sized, S: ?Sized> Clone for IceThickness<'_, B, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ?Sized, S: ?Sized> Copy for IceThickness<'_, B, S> {}

impl<B: ?Sized, S: ?Sized> fmt::Debug for IceThickness<'_, B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IceThickness").finish_non_exhaustive()
    }
}

impl<B, S> ScalarField<2> for IceThickness<'_, B, S>
where
    B: ScalarField<2> + ?Sized,
    S: ScalarField<2> + ?Sized,
{
    /// Both fields are evaluated at the same point and component. Only the scalar component
    /// is accepted; any other index fails before either field is queried.
    fn evaluate(&self, point: &Point<2>, component: usize) -> Result<f64, FieldError> {
        ensure_scalar_component(component)?;
        let surface = self.surface.evaluate(point, component)?;
        let bed = self.bed.evaluate(point, component)?;
        Ok(surface - bed)
    }
}
