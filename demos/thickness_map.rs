//! Ice thickness of a synthetic valley glacier
//!
//! The bed is a parabolic valley sloping down along x, the surface a gently inclined plane
//! with a bulge along the valley axis. Where the surface lies below the bed, e.g. on the
//! valley flanks, the thickness is negative; it is plotted as is.

use std::rc::Rc;

use icefield::{
    FieldError, IceGeometry, Layer, RasterField, RasterGridBuilder, ScalarField,
};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Shape of the raster
    let shape = [100, 100];

    // Grid spacing in meters
    let delta = 100.0;

    let grid = Rc::new(
        RasterGridBuilder::shape(shape)
            .cartesian_coordinates([0.0, 0.0], [delta, delta])
            .build()?,
    );

    let axis = 0.5 * delta * (shape[0] - 1) as f64;

    let mut geometry = IceGeometry::new(&grid);
    geometry.insert(
        Layer::Bed,
        RasterField::from_fn(&grid, |p| {
            1500.0 - 0.05 * p.x() + 2e-5 * (p.y() - axis).powi(2)
        }),
    )?;
    geometry.insert(
        Layer::Surface,
        RasterField::from_fn(&grid, |p| {
            1900.0 - 0.06 * p.x() + 150.0 * (-((p.y() - axis) / 2000.0).powi(2)).exp()
        }),
    )?;

    // Evaluate the thickness field the way a solver would, at arbitrary points
    let thickness = geometry.thickness()?;
    let probe = grid.coord([50, 20]);
    info!(
        "thickness at ({}, {}): {:.1} m",
        probe.x(),
        probe.y(),
        thickness.value(&probe)?
    );
    match thickness.value(&icefield::Point::new(-10.0, 0.0)) {
        Err(err @ FieldError::OutsideGrid { .. }) => info!("as expected: {}", err),
        other => info!("unexpected result {:?}", other),
    }

    let raster = geometry.thickness_raster()?;
    info!(
        "thickness ranges from {:.1} m to {:.1} m",
        raster.data().min().unwrap_or(f64::NAN),
        raster.data().max().unwrap_or(f64::NAN)
    );

    plot_geometry("demos/img/thickness_map.png", &geometry, &raster)?;
    Ok(())
}

fn plot_geometry(
    file: &str,
    geometry: &IceGeometry,
    thickness: &RasterField,
) -> Result<(), Box<dyn std::error::Error>> {
    use plotters::prelude::*;

    if let Some(dir) = std::path::Path::new(file).parent() {
        std::fs::create_dir_all(dir)?;
    }

    let root = BitMapBackend::new(file, (1024, 360)).into_drawing_area();

    root.fill(&WHITE)?;
    let root = root.margin(5, 5, 5, 5);

    let subplots = root.split_evenly((1, 3));

    let panels = [
        ("bed", geometry.layer(Layer::Bed), false),
        ("surface", geometry.layer(Layer::Surface), false),
        ("thickness", Some(thickness), true),
    ];

    for (ax, (title, field, diverging)) in subplots.iter().zip(panels) {
        let Some(field) = field else { continue };
        let ax = ax.titled(title, ("sans-serif", 22).into_font().color(&BLACK.mix(0.8)))?;

        let grid = field.grid();
        let value = field.data();
        let ([xmin, xmax], [ymin, ymax]) = grid.extent();
        let [dy, dx] = grid.spacing();
        let lo = value.min().unwrap_or(0.0);
        let hi = value.max().unwrap_or(0.0).max(lo + f64::EPSILON);
        let scale = lo.abs().max(hi.abs()).max(f64::EPSILON * 10.0);

        let mut chart = ChartBuilder::on(&ax)
            .margin(20)
            .x_label_area_size(10)
            .y_label_area_size(10)
            .build_cartesian_2d(xmin..xmax, ymin..ymax)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .draw()?;

        chart.draw_series(grid.shape().iter().filter(|&idx| value[idx].is_finite()).map(
            |idx| {
                let p = grid.coord(idx);
                let col = if diverging {
                    colorous::RED_BLUE.eval_continuous(1.0 - (value[idx] + scale) / (2.0 * scale))
                } else {
                    colorous::VIRIDIS.eval_continuous((value[idx] - lo) / (hi - lo))
                };
                Rectangle::new(
                    [
                        (p.x() - dx * 0.5, p.y() + dy * 0.5),
                        (p.x() + dx * 0.5, p.y() - dy * 0.5),
                    ],
                    RGBColor(col.r, col.g, col.b).filled(),
                )
            },
        ))?;
    }

    root.present()?;
    Ok(())
}
