#![warn(missing_docs)]
//! Half field of view and sensor size for a given aperture and focal length.
//!
//! The half field of view is the angle `atan(diameter / (2 * focal_length))`. The corresponding
//! sensor diameter is obtained by the inverse relation `2 * focal_length * tan(hfov)`.
use crate::error::{LensmakerError, LmResult};
use log::warn;
use num::Zero;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, Length},
    length::millimeter,
};

/// Calculate the half field of view for a given diameter and focal length.
///
/// # Errors
///
/// This function returns an [`LensmakerError::UndefinedOpticalResult`] if the focal length is zero.
pub fn half_field_of_view(diameter: Length, focal_length: Length) -> LmResult<Angle> {
    if focal_length.is_zero() {
        return Err(LensmakerError::UndefinedOpticalResult(
            "focal length must not be zero".into(),
        ));
    }
    let ratio = diameter.get::<millimeter>() / (2.0 * focal_length.get::<millimeter>());
    Ok(Angle::new::<radian>(ratio.atan()))
}
/// Calculate the sensor diameter covered by the given half field of view.
#[must_use]
pub fn sensor_diameter(focal_length: Length, half_field_of_view: Angle) -> Length {
    2.0 * focal_length * half_field_of_view.get::<radian>().tan()
}

/// Aperture diameter and focal length used for a field-of-view calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FovSpec {
    diameter: Length,
    focal_length: Length,
}
impl FovSpec {
    /// Creates a new [`FovSpec`].
    #[must_use]
    pub const fn new(diameter: Length, focal_length: Length) -> Self {
        Self {
            diameter,
            focal_length,
        }
    }
    /// Returns the aperture diameter.
    #[must_use]
    pub const fn diameter(&self) -> Length {
        self.diameter
    }
    /// Returns the focal length.
    #[must_use]
    pub const fn focal_length(&self) -> Length {
        self.focal_length
    }
    /// Calculate half field of view and sensor diameter.
    ///
    /// # Errors
    ///
    /// This function returns an [`LensmakerError::UndefinedOpticalResult`] if the focal length is zero.
    pub fn evaluate(&self) -> LmResult<FovResult> {
        if self.diameter <= Length::zero() {
            warn!("aperture diameter is not positive");
        }
        if self.focal_length < Length::zero() {
            warn!("focal length is negative");
        }
        let half_field_of_view = half_field_of_view(self.diameter, self.focal_length)?;
        let sensor_diameter = sensor_diameter(self.focal_length, half_field_of_view);
        Ok(FovResult {
            half_field_of_view,
            sensor_diameter,
        })
    }
}

/// Result of a field-of-view calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FovResult {
    half_field_of_view: Angle,
    sensor_diameter: Length,
}
impl FovResult {
    /// Returns the half field of view.
    #[must_use]
    pub const fn half_field_of_view(&self) -> Angle {
        self.half_field_of_view
    }
    /// Returns the sensor diameter.
    #[must_use]
    pub const fn sensor_diameter(&self) -> Length {
        self.sensor_diameter
    }
}
impl Display for FovResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Half Field of View: {:.2} deg",
            self.half_field_of_view.get::<degree>()
        )?;
        write!(
            f,
            "Sensor Diameter: {:.2} mm",
            self.sensor_diameter.get::<millimeter>()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{degree, millimeter, utils::test_helper::test_helper::check_warnings};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;

    #[test]
    fn half_field_of_view_values() {
        let hfov = half_field_of_view(millimeter!(100.0), millimeter!(50.0)).unwrap();
        assert_relative_eq!(hfov.get::<degree>(), 45.0, max_relative = 1e-12);
        let hfov = half_field_of_view(Length::zero(), millimeter!(50.0)).unwrap();
        assert_eq!(hfov.get::<degree>(), 0.0);
        let hfov = half_field_of_view(millimeter!(36.0), millimeter!(50.0)).unwrap();
        assert_abs_diff_eq!(hfov.get::<degree>(), 19.7989, epsilon = 1e-4);
    }
    #[test]
    fn half_field_of_view_zero_focal_length() {
        assert_matches!(
            half_field_of_view(millimeter!(10.0), Length::zero()),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn sensor_diameter_values() {
        let sensor = sensor_diameter(millimeter!(50.0), degree!(45.0));
        assert_relative_eq!(sensor.get::<millimeter>(), 100.0, max_relative = 1e-12);
        let sensor = sensor_diameter(millimeter!(50.0), Angle::zero());
        assert_eq!(sensor.get::<millimeter>(), 0.0);
    }
    #[test]
    fn round_trip() {
        let focal_length = millimeter!(35.0);
        for angle in [0.5, 5.0, 12.5, 30.0, 60.0, 80.0] {
            let sensor = sensor_diameter(focal_length, degree!(angle));
            let recovered = half_field_of_view(sensor, focal_length).unwrap();
            assert_abs_diff_eq!(recovered.get::<degree>(), angle, epsilon = 1e-9);
        }
    }
    #[test]
    fn evaluate() {
        let spec = FovSpec::new(millimeter!(25.0), millimeter!(50.0));
        assert_relative_eq!(spec.diameter().get::<millimeter>(), 25.0, max_relative = 1e-12);
        assert_relative_eq!(spec.focal_length().get::<millimeter>(), 50.0, max_relative = 1e-12);
        let result = spec.evaluate().unwrap();
        assert_abs_diff_eq!(
            result.half_field_of_view().get::<degree>(),
            14.036,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            result.sensor_diameter().get::<millimeter>(),
            25.0,
            max_relative = 1e-12
        );
        assert_matches!(
            FovSpec::new(millimeter!(25.0), Length::zero()).evaluate(),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn evaluate_warnings() {
        testing_logger::setup();
        let _ = FovSpec::new(Length::zero(), millimeter!(-50.0)).evaluate();
        check_warnings(vec![
            "aperture diameter is not positive",
            "focal length is negative",
        ]);
    }
    #[test]
    fn display() {
        let result = FovSpec::new(millimeter!(25.0), millimeter!(50.0))
            .evaluate()
            .unwrap();
        assert_eq!(
            format!("{result}"),
            "Half Field of View: 14.04 deg\nSensor Diameter: 25.00 mm"
        );
    }
}
