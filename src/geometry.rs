//! Glacier geometry: the elevation layers of one raster and the thickness derived from them.

use std::rc::Rc;

use fixed_map::{Key, Map};
use log::debug;

use crate::error::FieldError;
use crate::grid::RasterGrid;
use crate::raster::RasterField;
use crate::thickness::IceThickness;

/// Elevation layers of a glacier geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Key)]
pub enum Layer {
    Bed,
    Surface,
}

/// Bed and surface elevation given on a common [`RasterGrid`].
///
/// # Examples
/// ```
/// use std::rc::Rc;
/// use icefield::function::{Point, ScalarField};
/// use icefield::geometry::{IceGeometry, Layer};
/// use icefield::grid::RasterGridBuilder;
/// use icefield::raster::RasterField;
///
/// let grid = Rc::new(RasterGridBuilder::shape([2, 2]).build().unwrap());
/// let mut geometry = IceGeometry::new(&grid);
/// geometry.insert(Layer::Bed, RasterField::from_fn(&grid, |_| 100.0)).unwrap();
/// geometry.insert(Layer::Surface, RasterField::from_fn(&grid, |p| 350.0 + p.x())).unwrap();
///
/// let thickness = geometry.thickness().unwrap();
/// assert_eq!(thickness.value(&Point::new(1.0, 0.5)).unwrap(), 251.0);
/// ```
pub struct IceGeometry {
    grid: Rc<RasterGrid>,
    layers: Map<Layer, RasterField>,
}

impl IceGeometry {
    pub fn new(grid: &Rc<RasterGrid>) -> Self {
        Self {
            grid: Rc::clone(grid),
            layers: Map::new(),
        }
    }

    pub fn grid(&self) -> &Rc<RasterGrid> {
        &self.grid
    }

    /// Store `field` as `layer`, returning the field it replaces.
    ///
    /// The field must be defined on the grid of the geometry.
    pub fn insert(
        &mut self,
        layer: Layer,
        field: RasterField,
    ) -> Result<Option<RasterField>, FieldError> {
        if !Rc::ptr_eq(field.grid(), &self.grid) && **field.grid() != *self.grid {
            return Err(FieldError::GridMismatch);
        }
        debug!("inserting {:?} layer", layer);
        Ok(self.layers.insert(layer, field))
    }

    pub fn layer(&self, layer: Layer) -> Option<&RasterField> {
        self.layers.get(layer)
    }

    /// Iterate over the layers present.
    pub fn layers(&self) -> impl Iterator<Item = (Layer, &RasterField)> + '_ {
        self.layers.iter()
    }

    /// Thickness field borrowing the bed and surface layers.
    pub fn thickness(&self) -> Result<IceThickness<'_, RasterField, RasterField>, FieldError> {
        let bed = self.require(Layer::Bed)?;
        let surface = self.require(Layer::Surface)?;
        Ok(IceThickness::new(bed, surface))
    }

    /// Thickness sampled at the inside nodes of the geometry grid.
    pub fn thickness_raster(&self) -> Result<RasterField, FieldError> {
        RasterField::sample(&self.grid, &self.thickness()?)
    }

    fn require(&self, layer: Layer) -> Result<&RasterField, FieldError> {
        self.layers
            .get(layer)
            .ok_or(FieldError::MissingLayer(layer))
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use crate::error::FieldError;
    use crate::function::{Point, ScalarField};
    use crate::grid::{RasterGrid, RasterGridBuilder};
    use crate::mask::DomainMask;
    use crate::raster::RasterField;

    use super::{IceGeometry, Layer};

    fn grid() -> Rc<RasterGrid> {
        Rc::new(
            RasterGridBuilder::shape([3, 4])
                .cartesian_coordinates([0.0, 0.0], [100.0, 100.0])
                .mask(|idx| DomainMask::from(idx != [0, 3]))
                .build()
                .unwrap(),
        )
    }

    fn geometry(grid: &Rc<RasterGrid>) -> IceGeometry {
        let mut geometry = IceGeometry::new(grid);
        geometry
            .insert(Layer::Bed, RasterField::from_fn(grid, |p| 0.5 * p.x()))
            .unwrap();
        geometry
            .insert(
                Layer::Surface,
                RasterField::from_fn(grid, |p| 1000.0 - p.y()),
            )
            .unwrap();
        geometry
    }

    #[test_log::test]
    fn thickness_from_layers() {
        let grid = grid();
        let geometry = geometry(&grid);
        let thickness = geometry.thickness().unwrap();

        let p = Point::new(150.0, 50.0);
        assert!((thickness.value(&p).unwrap() - (950.0 - 75.0)).abs() < 1e-9);
    }

    #[test]
    fn missing_layers_are_reported() {
        let grid = grid();
        let mut geometry = IceGeometry::new(&grid);

        assert!(matches!(
            geometry.thickness(),
            Err(FieldError::MissingLayer(Layer::Bed))
        ));

        geometry
            .insert(Layer::Bed, RasterField::from_fn(&grid, |_| 0.0))
            .unwrap();
        assert!(matches!(
            geometry.thickness(),
            Err(FieldError::MissingLayer(Layer::Surface))
        ));
    }

    #[test]
    fn insert_replaces_layer() {
        let grid = grid();
        let mut geometry = geometry(&grid);

        let old = geometry
            .insert(Layer::Bed, RasterField::from_fn(&grid, |_| 1.0))
            .unwrap();
        assert!(old.is_some());
        assert_eq!(geometry.layer(Layer::Bed).unwrap().data()[[1, 1]], 1.0);
        assert_eq!(geometry.layers().count(), 2);
    }

    #[test]
    fn insert_rejects_foreign_grid() {
        let grid = grid();
        let mut geometry = IceGeometry::new(&grid);
        let other = Rc::new(RasterGridBuilder::shape([3, 4]).build().unwrap());

        assert!(matches!(
            geometry.insert(Layer::Bed, RasterField::from_fn(&other, |_| 0.0)),
            Err(FieldError::GridMismatch)
        ));

        // an equal grid behind a different handle is accepted
        let copy = Rc::new(grid.as_ref().clone());
        assert!(geometry
            .insert(Layer::Bed, RasterField::from_fn(&copy, |_| 0.0))
            .is_ok());
    }

    #[test]
    fn thickness_raster_matches_layers() {
        let grid = grid();
        let geometry = geometry(&grid);
        let raster = geometry.thickness_raster().unwrap();

        for idx in grid.shape() {
            let p = grid.coord(idx);
            if idx == [0, 3] {
                assert!(raster.data()[idx].is_nan());
            } else {
                assert_eq!(raster.data()[idx], (1000.0 - p.y()) - 0.5 * p.x());
            }
        }
    }
}
