#![warn(missing_docs)]
//! Input forms for the lens and field-of-view calculations.
//!
//! Each form is a fixed, ordered list of fields. Every field has a label (used as prompt) and an
//! identifier. The parsed values are collected in a [`FormValues`] record which is then converted
//! into the corresponding value object ([`LensSpec`] or [`FovSpec`]).
use crate::{
    error::{LensmakerError, LmResult},
    fov::FovSpec,
    lens::LensSpec,
};
use std::fmt::{Debug, Display};
use strum::{EnumIter, IntoEnumIterator};
use uom::si::{f64::Length, length::millimeter};

/// A single field of an input form.
pub trait FormField: IntoEnumIterator + Copy + PartialEq + Debug + Display {
    /// The prompt text of this field.
    fn label(&self) -> &'static str;
    /// The identifier of this field (also used as command line flag).
    fn field_id(&self) -> &'static str;
    /// Returns `true` if +/- infinity is a valid value for this field.
    fn accepts_infinity(&self) -> bool {
        false
    }
}

/// Fields of the lens form in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum LensField {
    /// refractive index of the lens material
    RefractiveIndex,
    /// radius of curvature of the first surface (mm)
    Radius1,
    /// radius of curvature of the second surface (mm)
    Radius2,
    /// center thickness (mm)
    Thickness,
    /// clear aperture diameter (mm)
    Diameter,
}
impl FormField for LensField {
    fn label(&self) -> &'static str {
        match self {
            Self::RefractiveIndex => "Refractive Index: ",
            Self::Radius1 => "Radius of First Surface: ",
            Self::Radius2 => "Radius of Second Surface: ",
            Self::Thickness => "Thickness: ",
            Self::Diameter => "Diameter: ",
        }
    }
    fn field_id(&self) -> &'static str {
        match self {
            Self::RefractiveIndex => "index",
            Self::Radius1 => "rad1",
            Self::Radius2 => "rad2",
            Self::Thickness => "thickness",
            Self::Diameter => "diameter",
        }
    }
    /// An infinite radius of curvature describes a flat surface.
    fn accepts_infinity(&self) -> bool {
        matches!(self, Self::Radius1 | Self::Radius2)
    }
}
impl Display for LensField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label().trim_end_matches(": "))
    }
}

/// Fields of the field-of-view form in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum FovField {
    /// aperture diameter (mm)
    Diameter,
    /// focal length (mm)
    FocalLength,
}
impl FormField for FovField {
    fn label(&self) -> &'static str {
        match self {
            Self::Diameter => "Diameter Size: ",
            Self::FocalLength => "Focal Length: ",
        }
    }
    fn field_id(&self) -> &'static str {
        match self {
            Self::Diameter => "diameter",
            Self::FocalLength => "focal-length",
        }
    }
}
impl Display for FovField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label().trim_end_matches(": "))
    }
}

/// Parse the text entered for a form field.
///
/// # Errors
///
/// This function returns a [`LensmakerError::Parse`] if the text is not a real number or if the
/// value is infinite for a field not accepting infinity.
pub fn parse_value<F: FormField>(field: F, input: &str) -> LmResult<f64> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| LensmakerError::Parse(format!("invalid input for {field}: '{}'", input.trim())))?;
    check_value(field, value)
}

/// Check that a value is admissible for a form field.
///
/// NaN is never accepted. +/- infinity is only accepted by fields for which
/// [`FormField::accepts_infinity`] returns `true`.
///
/// # Errors
///
/// This function returns a [`LensmakerError::Parse`] if the value is not admissible.
pub fn check_value<F: FormField>(field: F, value: f64) -> LmResult<f64> {
    if value.is_nan() || (value.is_infinite() && !field.accepts_infinity()) {
        return Err(LensmakerError::Parse(format!(
            "invalid input for {field}: value must be a finite number"
        )));
    }
    Ok(value)
}

/// The parsed values of a complete form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues<F: FormField> {
    values: Vec<(F, f64)>,
}
impl<F: FormField> Default for FormValues<F> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}
impl<F: FormField> FormValues<F> {
    /// Set the value of a field. An already existing value is replaced.
    pub fn set(&mut self, field: F, value: f64) {
        if let Some(entry) = self.values.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = value;
        } else {
            self.values.push((field, value));
        }
    }
    /// Get the value of a field.
    ///
    /// # Errors
    ///
    /// This function returns an error if the field has no value.
    pub fn get(&self, field: F) -> LmResult<f64> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| *value)
            .ok_or_else(|| LensmakerError::Parse(format!("missing value for {field}")))
    }
    /// Returns `true` if all fields of the form have a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        F::iter().all(|field| self.values.iter().any(|(f, _)| *f == field))
    }
    /// Check that all fields have an admissible value.
    ///
    /// # Errors
    ///
    /// This function returns a [`LensmakerError::Parse`] if a field is missing or one of the values
    /// is not admissible (see [`check_value`]).
    pub fn validate(&self) -> LmResult<()> {
        if !self.is_complete() {
            return Err(LensmakerError::Parse("incomplete form".into()));
        }
        for (field, value) in &self.values {
            check_value(*field, *value)?;
        }
        Ok(())
    }
}

impl From<&LensSpec> for FormValues<LensField> {
    fn from(spec: &LensSpec) -> Self {
        let mut form = Self::default();
        form.set(LensField::RefractiveIndex, spec.refractive_index());
        form.set(LensField::Radius1, spec.radius_1().get::<millimeter>());
        form.set(LensField::Radius2, spec.radius_2().get::<millimeter>());
        form.set(LensField::Thickness, spec.thickness().get::<millimeter>());
        form.set(LensField::Diameter, spec.diameter().get::<millimeter>());
        form
    }
}
impl From<&FovSpec> for FormValues<FovField> {
    fn from(spec: &FovSpec) -> Self {
        let mut form = Self::default();
        form.set(FovField::Diameter, spec.diameter().get::<millimeter>());
        form.set(FovField::FocalLength, spec.focal_length().get::<millimeter>());
        form
    }
}

impl TryFrom<&FormValues<LensField>> for LensSpec {
    type Error = LensmakerError;

    fn try_from(form: &FormValues<LensField>) -> LmResult<Self> {
        Ok(Self::new(
            form.get(LensField::RefractiveIndex)?,
            Length::new::<millimeter>(form.get(LensField::Radius1)?),
            Length::new::<millimeter>(form.get(LensField::Radius2)?),
            Length::new::<millimeter>(form.get(LensField::Thickness)?),
            Length::new::<millimeter>(form.get(LensField::Diameter)?),
        ))
    }
}
impl TryFrom<&FormValues<FovField>> for FovSpec {
    type Error = LensmakerError;

    fn try_from(form: &FormValues<FovField>) -> LmResult<Self> {
        Ok(Self::new(
            Length::new::<millimeter>(form.get(FovField::Diameter)?),
            Length::new::<millimeter>(form.get(FovField::FocalLength)?),
        ))
    }
}
