#![warn(missing_docs)]
//! Rendering of a lens cross-section.
//!
//! The cross-section is drawn in the meridional plane: the optical axis (z) runs from left to
//! right, the vertex of the first surface is located at z = 0 and the vertex of the second surface
//! at z = center thickness.
use crate::{
    error::{LensmakerError, LmResult},
    lens::LensSpec,
};
use log::{info, warn};
use num::Zero;
use plotters::{
    chart::ChartBuilder,
    element::{PathElement, Polygon},
    prelude::{IntoDrawingArea, SVGBackend},
    series::LineSeries,
    style::{Color, BLACK, BLUE, RED, WHITE},
};
use std::{fmt::Display, ops::Range, path::Path};
use uom::si::{f64::Length, length::millimeter};

/// number of points used for sampling each surface of the outline
const OUTLINE_SAMPLES: usize = 101;

/// Trait for elements which can be rendered into an (SVG) image file.
pub trait Plottable {
    /// Render this element into the given file.
    ///
    /// # Errors
    ///
    /// This function returns an error if the element cannot be drawn or the file cannot be written.
    fn to_plot(&self, file_path: &Path) -> LmResult<()>;
}

/// The geometric parameters of a lens needed for drawing its cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensProfile {
    diameter: Length,
    thickness: Length,
    radius_1: Length,
    radius_2: Length,
}
impl From<&LensSpec> for LensProfile {
    fn from(spec: &LensSpec) -> Self {
        Self::new(
            spec.diameter(),
            spec.thickness(),
            spec.radius_1(),
            spec.radius_2(),
        )
    }
}
impl LensProfile {
    /// Creates a new [`LensProfile`].
    #[must_use]
    pub const fn new(
        diameter: Length,
        thickness: Length,
        radius_1: Length,
        radius_2: Length,
    ) -> Self {
        Self {
            diameter,
            thickness,
            radius_1,
            radius_2,
        }
    }
    /// Sagitta of a spherical surface with the given radius of curvature at the given height.
    ///
    /// The sagitta is measured from the vertex along the optical axis. An infinite radius (flat
    /// surface) has a sagitta of zero.
    ///
    /// # Errors
    ///
    /// This function returns an error if the radius is zero or the height exceeds the radius.
    pub fn sag(radius: Length, height: Length) -> LmResult<Length> {
        if radius.is_infinite() {
            return Ok(Length::zero());
        }
        if radius.is_zero() {
            return Err(LensmakerError::Plot(
                "radius of curvature must not be zero".into(),
            ));
        }
        let r = radius.get::<millimeter>();
        let h = height.get::<millimeter>();
        if h.abs() > r.abs() {
            return Err(LensmakerError::Plot(format!(
                "radius of curvature {r} mm is smaller than the semi-diameter {} mm",
                h.abs()
            )));
        }
        Ok(Length::new::<millimeter>(
            r - r.signum() * r.mul_add(r, -(h * h)).sqrt(),
        ))
    }
    fn semi_diameter(&self) -> LmResult<Length> {
        if self.diameter <= Length::zero() || !self.diameter.is_finite() {
            return Err(LensmakerError::Plot(
                "lens diameter must be positive and finite".into(),
            ));
        }
        Ok(0.5 * self.diameter)
    }
    /// Thickness of the lens at its rim.
    ///
    /// # Errors
    ///
    /// This function returns an error if the surfaces cannot span the full diameter.
    pub fn edge_thickness(&self) -> LmResult<Length> {
        let semi_diameter = self.semi_diameter()?;
        let front = Self::sag(self.radius_1, semi_diameter)?;
        let rear = Self::sag(self.radius_2, semi_diameter)?;
        Ok(self.thickness + rear - front)
    }
    /// Calculate the closed outline of the cross-section as (z, y) points in mm.
    ///
    /// The front surface is sampled from bottom to top, followed by the rear surface from top to
    /// bottom.
    ///
    /// # Errors
    ///
    /// This function returns an error if the diameter is not positive or a surface cannot span
    /// the full diameter.
    pub fn outline(&self, samples: usize) -> LmResult<Vec<(f64, f64)>> {
        if samples < 2 {
            return Err(LensmakerError::Plot(
                "at least two samples per surface are needed".into(),
            ));
        }
        let semi_diameter = self.semi_diameter()?;
        if self.edge_thickness()?.is_sign_negative() {
            warn!("edge thickness of lens is negative");
        }
        #[allow(clippy::cast_precision_loss)]
        let heights: Vec<Length> = (0..samples)
            .map(|i| semi_diameter * (2.0 * i as f64 / (samples - 1) as f64 - 1.0))
            .collect();
        let mut points = Vec::with_capacity(2 * samples);
        for height in &heights {
            let z = Self::sag(self.radius_1, *height)?;
            points.push((z.get::<millimeter>(), height.get::<millimeter>()));
        }
        for height in heights.iter().rev() {
            let z = self.thickness + Self::sag(self.radius_2, *height)?;
            points.push((z.get::<millimeter>(), height.get::<millimeter>()));
        }
        Ok(points)
    }
    /// Square plot area around the outline, so that the lens is drawn without distortion.
    fn plot_ranges(outline: &[(f64, f64)]) -> (Range<f64>, Range<f64>) {
        let (mut z_min, mut z_max, mut y_min, mut y_max) = (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for (z, y) in outline {
            z_min = z_min.min(*z);
            z_max = z_max.max(*z);
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
        let half_span = 0.6 * (z_max - z_min).max(y_max - y_min).max(1.0);
        let z_center = 0.5 * (z_min + z_max);
        let y_center = 0.5 * (y_min + y_max);
        (
            (z_center - half_span)..(z_center + half_span),
            (y_center - half_span)..(y_center + half_span),
        )
    }
}
fn plot_error<E: Display>(e: E) -> LensmakerError {
    LensmakerError::Plot(format!("plotting of lens cross-section failed: {e}"))
}
impl Plottable for LensProfile {
    fn to_plot(&self, file_path: &Path) -> LmResult<()> {
        let outline = self.outline(OUTLINE_SAMPLES)?;
        let (z_range, y_range) = Self::plot_ranges(&outline);
        let axis = vec![(z_range.start, 0.0), (z_range.end, 0.0)];

        let root = SVGBackend::new(file_path, (800, 800)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .build_cartesian_2d(z_range, y_range)
            .map_err(plot_error)?;
        chart
            .draw_series(std::iter::once(Polygon::new(
                outline.clone(),
                BLUE.mix(0.2).filled(),
            )))
            .map_err(plot_error)?;
        let mut closed_outline = outline.clone();
        closed_outline.push(outline[0]);
        chart
            .draw_series(std::iter::once(PathElement::new(
                closed_outline,
                BLACK.stroke_width(2),
            )))
            .map_err(plot_error)?;
        chart
            .draw_series(LineSeries::new(axis, &RED))
            .map_err(plot_error)?;
        root.present().map_err(plot_error)?;
        info!("lens cross-section written to {}", file_path.display());
        Ok(())
    }
}
