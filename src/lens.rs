#![warn(missing_docs)]
//! Paraxial evaluation of a single lens with spherical (or flat) surfaces.
//!
//! The evaluation is a fixed chain of closed-form expressions:
//!
//! `power_1`, `power_2` → `total_power` → `effective_focal_length` → `numerical_aperture`
//!
//! # Curvature convention
//! A positive radius of curvature means that the center of curvature lies to the right of the
//! surface (light travelling from left to right). A biconvex lens therefore has a positive front
//! and a negative rear radius. A radius of +/- infinity corresponds to a flat surface.
//!
//! Surface and total powers are given in 1/mm.
use crate::error::{LensmakerError, LmResult};
use log::{debug, info, warn};
use num::Zero;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::{EnumIter, EnumString, IntoStaticStr};
use uom::si::{f64::Length, length::millimeter};

/// Available formula variants for the total power of a lens.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum LensModel {
    /// Thick lens: both surface powers are combined taking the center thickness into account.
    #[default]
    #[strum(serialize = "thick")]
    #[serde(rename = "thick")]
    ThickLens,
    /// Thin lens approximation: the total power is the sum of both surface powers.
    #[strum(serialize = "thin")]
    #[serde(rename = "thin")]
    ThinLens,
}
impl Display for LensModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ThickLens => write!(f, "thick lens"),
            Self::ThinLens => write!(f, "thin lens"),
        }
    }
}

/// Ensure an intermediate result is a finite number.
fn finite(value: f64, quantity: &str) -> LmResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LensmakerError::UndefinedOpticalResult(format!(
            "{quantity} is not a finite number"
        )))
    }
}

/// Calculate the power of the first (front) surface of a lens.
///
/// # Errors
///
/// This function returns an [`LensmakerError::UndefinedOpticalResult`] if the radius of curvature is zero
/// or the power is not finite.
pub fn power_1(refractive_index: f64, radius_1: Length) -> LmResult<f64> {
    if radius_1.is_zero() {
        return Err(LensmakerError::UndefinedOpticalResult(
            "radius of first surface must not be zero".into(),
        ));
    }
    finite(
        (refractive_index - 1.0) / radius_1.get::<millimeter>(),
        "power of first surface",
    )
}
/// Calculate the power of the second (rear) surface of a lens.
///
/// # Errors
///
/// This function returns an [`LensmakerError::UndefinedOpticalResult`] if the radius of curvature is zero
/// or the power is not finite.
pub fn power_2(refractive_index: f64, radius_2: Length) -> LmResult<f64> {
    if radius_2.is_zero() {
        return Err(LensmakerError::UndefinedOpticalResult(
            "radius of second surface must not be zero".into(),
        ));
    }
    finite(
        (1.0 - refractive_index) / radius_2.get::<millimeter>(),
        "power of second surface",
    )
}
/// Combine both surface powers to the total power of a thick lens.
///
/// # Errors
///
/// This function returns an [`LensmakerError::UndefinedOpticalResult`] if the refractive index is zero
/// or the total power is not finite.
pub fn total_power(
    thickness: Length,
    refractive_index: f64,
    power_1: f64,
    power_2: f64,
) -> LmResult<f64> {
    if refractive_index.is_zero() {
        return Err(LensmakerError::UndefinedOpticalResult(
            "refractive index must not be zero".into(),
        ));
    }
    finite(
        power_1 + power_2 - ((thickness.get::<millimeter>() / refractive_index) * power_1 * power_2),
        "total power",
    )
}
/// Total power of a lens in the thin lens approximation.
#[must_use]
pub fn thin_lens_total_power(power_1: f64, power_2: f64) -> f64 {
    power_1 + power_2
}

/// The effective focal length of a lens.
///
/// A total power of zero (afocal system) does not have a finite focal length. This case is
/// represented by [`EffectiveFocalLength::Afocal`] instead of an infinite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectiveFocalLength {
    /// finite focal length (negative for diverging lenses)
    Finite(Length),
    /// infinite focal length of an afocal system
    Afocal,
}
impl EffectiveFocalLength {
    /// Calculate the effective focal length from the total power (in 1/mm).
    ///
    /// # Errors
    ///
    /// This function returns an [`LensmakerError::UndefinedOpticalResult`] if the total power is
    /// not finite or so small that its reciprocal overflows.
    pub fn from_total_power(total_power: f64) -> LmResult<Self> {
        let total_power = finite(total_power, "total power")?;
        if total_power.is_zero() {
            info!("total power is zero: afocal system with infinite focal length");
            Ok(Self::Afocal)
        } else {
            let focal_length = finite(1.0 / total_power, "effective focal length")?;
            Ok(Self::Finite(Length::new::<millimeter>(focal_length)))
        }
    }
    /// Returns `true` if this focal length belongs to an afocal system.
    #[must_use]
    pub const fn is_afocal(&self) -> bool {
        matches!(self, Self::Afocal)
    }
    /// Returns the focal length or `None` for an afocal system.
    #[must_use]
    pub const fn length(&self) -> Option<Length> {
        match self {
            Self::Finite(length) => Some(*length),
            Self::Afocal => None,
        }
    }
}
impl Display for EffectiveFocalLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(length) => write!(f, "{:.2} mm", length.get::<millimeter>()),
            Self::Afocal => write!(f, "infinite (afocal)"),
        }
    }
}

/// Calculate the numerical aperture of a lens with the given clear aperture.
///
/// An afocal system collects no cone of rays and thus has a numerical aperture of 0.0.
///
/// # Errors
///
/// This function returns an [`LensmakerError::UndefinedOpticalResult`] if the numerical aperture
/// is not finite.
pub fn numerical_aperture(
    diameter: Length,
    effective_focal_length: EffectiveFocalLength,
) -> LmResult<f64> {
    match effective_focal_length {
        EffectiveFocalLength::Finite(efl) => finite(
            diameter.get::<millimeter>() / (2.0 * efl.get::<millimeter>()),
            "numerical aperture",
        ),
        EffectiveFocalLength::Afocal => Ok(0.0),
    }
}

/// The physical parameters of a single lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensSpec {
    refractive_index: f64,
    radius_1: Length,
    radius_2: Length,
    thickness: Length,
    diameter: Length,
}
impl Default for LensSpec {
    /// Create a plano-convex lens with a diameter of 25 mm and a focal length of approx. 100 mm.
    /// The refractive index is set to 1.5068 (N-BK7 at 1054 nm).
    fn default() -> Self {
        Self {
            refractive_index: 1.5068,
            radius_1: Length::new::<millimeter>(51.5),
            radius_2: Length::new::<millimeter>(f64::INFINITY),
            thickness: Length::new::<millimeter>(3.6),
            diameter: Length::new::<millimeter>(25.0),
        }
    }
}
impl LensSpec {
    /// Creates a new [`LensSpec`].
    ///
    /// No range checks are performed here. Parameters leading to an undefined result are reported
    /// by [`LensSpec::evaluate`].
    #[must_use]
    pub const fn new(
        refractive_index: f64,
        radius_1: Length,
        radius_2: Length,
        thickness: Length,
        diameter: Length,
    ) -> Self {
        Self {
            refractive_index,
            radius_1,
            radius_2,
            thickness,
            diameter,
        }
    }
    /// Returns the refractive index of the lens material.
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
    /// Returns the radius of curvature of the first surface.
    #[must_use]
    pub const fn radius_1(&self) -> Length {
        self.radius_1
    }
    /// Returns the radius of curvature of the second surface.
    #[must_use]
    pub const fn radius_2(&self) -> Length {
        self.radius_2
    }
    /// Returns the center thickness of the lens.
    #[must_use]
    pub const fn thickness(&self) -> Length {
        self.thickness
    }
    /// Returns the clear aperture diameter of the lens.
    #[must_use]
    pub const fn diameter(&self) -> Length {
        self.diameter
    }
    /// Evaluate this lens using the thick lens formula.
    ///
    /// # Errors
    ///
    /// This function returns an [`LensmakerError::UndefinedOpticalResult`] if one of the radii
    /// or the refractive index is zero.
    pub fn evaluate(&self) -> LmResult<LensResult> {
        self.evaluate_with(LensModel::ThickLens)
    }
    /// Evaluate this lens using the given [`LensModel`].
    ///
    /// # Errors
    ///
    /// This function returns an [`LensmakerError::UndefinedOpticalResult`] if one of the radii
    /// or the refractive index is zero.
    pub fn evaluate_with(&self, model: LensModel) -> LmResult<LensResult> {
        self.warn_unusual_parameters();
        if self.refractive_index.is_zero() {
            return Err(LensmakerError::UndefinedOpticalResult(
                "refractive index must not be zero".into(),
            ));
        }
        let power_1 = power_1(self.refractive_index, self.radius_1)?;
        let power_2 = power_2(self.refractive_index, self.radius_2)?;
        let total_power = match model {
            LensModel::ThickLens => {
                total_power(self.thickness, self.refractive_index, power_1, power_2)?
            }
            LensModel::ThinLens => finite(thin_lens_total_power(power_1, power_2), "total power")?,
        };
        // avoid a negative zero showing up as "-0.000"
        let total_power = if total_power.is_zero() {
            0.0
        } else {
            total_power
        };
        debug!("{model}: power_1={power_1}, power_2={power_2}, total power={total_power}");
        let effective_focal_length = EffectiveFocalLength::from_total_power(total_power)?;
        let numerical_aperture = numerical_aperture(self.diameter, effective_focal_length)?;
        Ok(LensResult {
            power_1,
            power_2,
            total_power,
            effective_focal_length,
            numerical_aperture,
        })
    }
    fn warn_unusual_parameters(&self) {
        if self.refractive_index < 1.0 {
            warn!(
                "refractive index {} is below 1.0",
                self.refractive_index
            );
        }
        if self.thickness.is_sign_negative() && !self.thickness.is_zero() {
            warn!("lens thickness is negative");
        }
        if self.diameter <= Length::zero() {
            warn!("lens diameter is not positive");
        }
    }
}

/// The optical figures of merit of a [`LensSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensResult {
    power_1: f64,
    power_2: f64,
    total_power: f64,
    effective_focal_length: EffectiveFocalLength,
    numerical_aperture: f64,
}
impl LensResult {
    /// Returns the power of the first surface (in 1/mm).
    #[must_use]
    pub const fn power_1(&self) -> f64 {
        self.power_1
    }
    /// Returns the power of the second surface (in 1/mm).
    #[must_use]
    pub const fn power_2(&self) -> f64 {
        self.power_2
    }
    /// Returns the total power of the lens (in 1/mm).
    #[must_use]
    pub const fn total_power(&self) -> f64 {
        self.total_power
    }
    /// Returns the effective focal length of the lens.
    #[must_use]
    pub const fn effective_focal_length(&self) -> EffectiveFocalLength {
        self.effective_focal_length
    }
    /// Returns the numerical aperture of the lens.
    #[must_use]
    pub const fn numerical_aperture(&self) -> f64 {
        self.numerical_aperture
    }
}
impl Display for LensResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Power of Lens: {:.3} 1/mm", self.total_power)?;
        writeln!(f, "Effective Focal Length: {}", self.effective_focal_length)?;
        write!(f, "Numerical Aperture: {:.3}", self.numerical_aperture)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{millimeter, utils::test_helper::test_helper::check_warnings};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn scenario_lens() -> LensSpec {
        LensSpec::new(
            1.5,
            millimeter!(50.0),
            millimeter!(-50.0),
            millimeter!(5.0),
            millimeter!(25.0),
        )
    }
    #[test]
    fn lens_model_from_str() {
        assert_eq!(LensModel::from_str("thick").unwrap(), LensModel::ThickLens);
        assert_eq!(LensModel::from_str("Thin").unwrap(), LensModel::ThinLens);
        assert!(LensModel::from_str("fat").is_err());
        assert_eq!(LensModel::default(), LensModel::ThickLens);
    }
    #[test]
    fn lens_model_names() {
        let names: Vec<&str> = LensModel::iter().map(<&str>::from).collect();
        assert_eq!(names, vec!["thick", "thin"]);
    }
    #[test]
    fn lens_model_display() {
        assert_eq!(format!("{}", LensModel::ThickLens), "thick lens");
        assert_eq!(format!("{}", LensModel::ThinLens), "thin lens");
    }
    #[test]
    fn power_1_values() {
        assert_relative_eq!(power_1(1.5, millimeter!(50.0)).unwrap(), 0.01, max_relative = 1e-12);
        assert_relative_eq!(power_1(2.0, millimeter!(50.0)).unwrap(), 0.02, max_relative = 1e-12);
        assert_relative_eq!(power_1(1.5, millimeter!(100.0)).unwrap(), 0.005, max_relative = 1e-12);
        assert_relative_eq!(power_1(1.5, millimeter!(-50.0)).unwrap(), -0.01, max_relative = 1e-12);
        assert_eq!(power_1(1.5, millimeter!(f64::INFINITY)).unwrap(), 0.0);
    }
    #[test]
    fn power_1_zero_radius() {
        assert_matches!(
            power_1(1.5, Length::zero()),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn power_2_values() {
        assert_relative_eq!(power_2(1.5, millimeter!(-50.0)).unwrap(), 0.01, max_relative = 1e-12);
        assert_relative_eq!(power_2(1.5, millimeter!(50.0)).unwrap(), -0.01, max_relative = 1e-12);
        assert_eq!(power_2(1.5, millimeter!(f64::NEG_INFINITY)).unwrap(), 0.0);
    }
    #[test]
    fn power_2_zero_radius() {
        assert_matches!(
            power_2(1.5, Length::zero()),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn total_power_values() {
        assert_relative_eq!(
            total_power(millimeter!(5.0), 1.5, 0.01, 0.01).unwrap(),
            0.02 - 5.0 / 1.5 * 0.0001,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            total_power(Length::zero(), 1.5, 0.01, 0.01).unwrap(),
            0.02,
            max_relative = 1e-12
        );
        assert_matches!(
            total_power(millimeter!(5.0), 0.0, 0.01, 0.01),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn thin_lens_total_power_values() {
        assert_relative_eq!(thin_lens_total_power(0.01, 0.01), 0.02, max_relative = 1e-12);
        assert_relative_eq!(thin_lens_total_power(0.01, -0.01), 0.0, max_relative = 1e-12);
    }
    #[test]
    fn effective_focal_length_from_total_power() {
        let efl = EffectiveFocalLength::from_total_power(0.02).unwrap();
        assert!(!efl.is_afocal());
        assert_relative_eq!(efl.length().unwrap().get::<millimeter>(), 50.0, max_relative = 1e-12);
        let efl = EffectiveFocalLength::from_total_power(-0.02).unwrap();
        assert_relative_eq!(efl.length().unwrap().get::<millimeter>(), -50.0, max_relative = 1e-12);
        let efl = EffectiveFocalLength::from_total_power(0.0).unwrap();
        assert!(efl.is_afocal());
        assert_eq!(efl.length(), None);
        assert_matches!(
            EffectiveFocalLength::from_total_power(1e-310),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
        assert_matches!(
            EffectiveFocalLength::from_total_power(f64::INFINITY),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
        assert_matches!(
            EffectiveFocalLength::from_total_power(f64::NAN),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn effective_focal_length_display() {
        assert_eq!(
            format!("{}", EffectiveFocalLength::Finite(millimeter!(50.847))),
            "50.85 mm"
        );
        assert_eq!(
            format!("{}", EffectiveFocalLength::Afocal),
            "infinite (afocal)"
        );
    }
    #[test]
    fn numerical_aperture_values() {
        assert_relative_eq!(
            numerical_aperture(
                millimeter!(25.0),
                EffectiveFocalLength::Finite(millimeter!(50.0))
            )
            .unwrap(),
            0.25,
            max_relative = 1e-12
        );
        assert_eq!(
            numerical_aperture(millimeter!(25.0), EffectiveFocalLength::Afocal).unwrap(),
            0.0
        );
        assert_matches!(
            numerical_aperture(
                millimeter!(1e300),
                EffectiveFocalLength::Finite(millimeter!(1e-10))
            ),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn default() {
        let lens = LensSpec::default();
        assert_eq!(lens.refractive_index(), 1.5068);
        assert_relative_eq!(lens.radius_1().get::<millimeter>(), 51.5, max_relative = 1e-12);
        assert!(lens.radius_2().is_infinite());
        assert_relative_eq!(lens.thickness().get::<millimeter>(), 3.6, max_relative = 1e-12);
        assert_relative_eq!(lens.diameter().get::<millimeter>(), 25.0, max_relative = 1e-12);
        let result = lens.evaluate().unwrap();
        assert_relative_eq!(
            result.effective_focal_length().length().unwrap().get::<millimeter>(),
            51.5 / 0.5068,
            max_relative = 1e-12
        );
    }
    #[test]
    fn evaluate_biconvex() {
        let result = scenario_lens().evaluate().unwrap();
        assert_relative_eq!(result.power_1(), 0.01, max_relative = 1e-12);
        assert_relative_eq!(result.power_2(), 0.01, max_relative = 1e-12);
        assert_abs_diff_eq!(result.total_power(), 0.019_667, epsilon = 1e-6);
        let efl = result.effective_focal_length().length().unwrap();
        assert_abs_diff_eq!(efl.get::<millimeter>(), 50.85, epsilon = 5e-3);
        assert_abs_diff_eq!(result.numerical_aperture(), 0.246, epsilon = 5e-4);
    }
    #[test]
    fn evaluate_thin() {
        let result = scenario_lens().evaluate_with(LensModel::ThinLens).unwrap();
        assert_relative_eq!(result.total_power(), 0.02, max_relative = 1e-12);
        assert_relative_eq!(
            result.effective_focal_length().length().unwrap().get::<millimeter>(),
            50.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(result.numerical_aperture(), 0.25, max_relative = 1e-12);
    }
    #[test]
    fn evaluate_afocal() {
        let lens = LensSpec::new(
            1.5,
            millimeter!(50.0),
            millimeter!(50.0),
            Length::zero(),
            millimeter!(25.0),
        );
        let result = lens.evaluate().unwrap();
        assert_eq!(result.total_power(), 0.0);
        assert!(result.effective_focal_length().is_afocal());
        assert_eq!(result.numerical_aperture(), 0.0);
        let output = format!("{result}");
        assert!(!output.contains("inf mm"));
        assert!(!output.contains("NaN"));
        assert_eq!(
            output,
            "Total Power of Lens: 0.000 1/mm\nEffective Focal Length: infinite (afocal)\nNumerical Aperture: 0.000"
        );
    }
    #[test]
    fn evaluate_zero_radius() {
        let lens = LensSpec::new(
            1.5,
            Length::zero(),
            millimeter!(-50.0),
            millimeter!(5.0),
            millimeter!(25.0),
        );
        assert_matches!(
            lens.evaluate(),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
        let lens = LensSpec::new(
            1.5,
            millimeter!(50.0),
            Length::zero(),
            millimeter!(5.0),
            millimeter!(25.0),
        );
        assert_matches!(
            lens.evaluate_with(LensModel::ThinLens),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn evaluate_overflow() {
        assert_matches!(
            power_1(1.5, millimeter!(1e-310)),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
        let lens = LensSpec::new(
            1.5,
            millimeter!(1e-200),
            millimeter!(1e-200),
            millimeter!(5.0),
            millimeter!(25.0),
        );
        assert_matches!(
            lens.evaluate(),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
        let lens = LensSpec::new(
            1.5,
            millimeter!(1e-300),
            millimeter!(-1e-300),
            millimeter!(5.0),
            millimeter!(25.0),
        );
        assert_matches!(
            lens.evaluate_with(LensModel::ThinLens),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn evaluate_zero_index() {
        let lens = LensSpec::new(
            0.0,
            millimeter!(50.0),
            millimeter!(-50.0),
            millimeter!(5.0),
            millimeter!(25.0),
        );
        assert_matches!(
            lens.evaluate(),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
        assert_matches!(
            lens.evaluate_with(LensModel::ThinLens),
            Err(LensmakerError::UndefinedOpticalResult(_))
        );
    }
    #[test]
    fn evaluate_is_deterministic() {
        let lens = scenario_lens();
        let first = lens.evaluate().unwrap();
        let _ = LensSpec::default().evaluate().unwrap();
        let second = lens.evaluate().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_power().to_bits(), second.total_power().to_bits());
        assert_eq!(
            first.numerical_aperture().to_bits(),
            second.numerical_aperture().to_bits()
        );
    }
    #[test]
    fn evaluate_warnings() {
        testing_logger::setup();
        let lens = LensSpec::new(
            0.5,
            millimeter!(50.0),
            millimeter!(-50.0),
            millimeter!(-1.0),
            Length::zero(),
        );
        assert!(lens.evaluate().is_ok());
        check_warnings(vec![
            "refractive index 0.5 is below 1.0",
            "lens thickness is negative",
            "lens diameter is not positive",
        ]);
        testing_logger::setup();
        assert!(scenario_lens().evaluate().is_ok());
        check_warnings(vec![]);
    }
    #[test]
    fn display() {
        let result = scenario_lens().evaluate().unwrap();
        assert_eq!(
            format!("{result}"),
            "Total Power of Lens: 0.020 1/mm\nEffective Focal Length: 50.85 mm\nNumerical Aperture: 0.246"
        );
    }
}
