#![warn(missing_docs)]
//! Lens description files
//!
//! A [`LensDocument`] stores the parameters of a lens and / or a field-of-view calculation in a
//! YAML (`.yaml`, `.yml`) or JSON (`.json`) file. All lengths are stored in SI base units (meter).
use crate::{
    error::{LensmakerError, LmResult},
    form::{FormValues, FovField, LensField},
    fov::FovSpec,
    lens::LensSpec,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Supported file formats of a [`LensDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Yaml,
    Json,
}
impl DocumentFormat {
    fn from_path(path: &Path) -> LmResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(LensmakerError::Document(format!(
                "unsupported file type of {}. Use .yaml, .yml or .json",
                path.display()
            ))),
        }
    }
}

/// Parameters of a lens and / or a field-of-view calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LensDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lens: Option<LensSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fov: Option<FovSpec>,
}
impl LensDocument {
    /// Creates a new [`LensDocument`].
    #[must_use]
    pub const fn new(lens: Option<LensSpec>, fov: Option<FovSpec>) -> Self {
        Self { lens, fov }
    }
    /// Returns the lens parameters of this document (if any).
    #[must_use]
    pub const fn lens(&self) -> Option<&LensSpec> {
        self.lens.as_ref()
    }
    /// Returns the field-of-view parameters of this document (if any).
    #[must_use]
    pub const fn fov(&self) -> Option<&FovSpec> {
        self.fov.as_ref()
    }
    /// Read a [`LensDocument`] from a file.
    ///
    /// # Errors
    ///
    /// This function returns an error if the file cannot be read, has an unsupported extension or
    /// cannot be parsed.
    pub fn from_file(path: &Path) -> LmResult<Self> {
        let format = DocumentFormat::from_path(path)?;
        let contents = fs::read_to_string(path).map_err(|e| {
            LensmakerError::Document(format!("cannot read file {}: {e}", path.display()))
        })?;
        Self::from_string(&contents, format)
    }
    fn from_string(contents: &str, format: DocumentFormat) -> LmResult<Self> {
        let document: Self = match format {
            DocumentFormat::Yaml => serde_yaml::from_str(contents)
                .map_err(|e| LensmakerError::Document(format!("parsing of document failed: {e}")))?,
            DocumentFormat::Json => serde_json::from_str(contents)
                .map_err(|e| LensmakerError::Document(format!("parsing of document failed: {e}")))?,
        };
        document.validate()?;
        Ok(document)
    }
    /// Apply the same value rules as for interactively entered values.
    fn validate(&self) -> LmResult<()> {
        if let Some(lens) = &self.lens {
            FormValues::<LensField>::from(lens).validate()?;
        }
        if let Some(fov) = &self.fov {
            FormValues::<FovField>::from(fov).validate()?;
        }
        Ok(())
    }
    /// Write this [`LensDocument`] to a file. The format is chosen by the file extension.
    ///
    /// # Errors
    ///
    /// This function returns an error if the extension is not supported, serialization fails or
    /// the file cannot be written.
    pub fn save_to_file(&self, path: &Path) -> LmResult<()> {
        let contents = match DocumentFormat::from_path(path)? {
            DocumentFormat::Yaml => serde_yaml::to_string(self).map_err(|e| {
                LensmakerError::Document(format!("serialization of document failed: {e}"))
            })?,
            DocumentFormat::Json => serde_json::to_string_pretty(self).map_err(|e| {
                LensmakerError::Document(format!("serialization of document failed: {e}"))
            })?,
        };
        fs::write(path, contents).map_err(|e| {
            LensmakerError::Document(format!("cannot write file {}: {e}", path.display()))
        })?;
        info!("lens document written to {}", path.display());
        Ok(())
    }
}
