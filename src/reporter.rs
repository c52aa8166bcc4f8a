#![warn(missing_docs)]
//! Module handling analysis reports.
//!
//! An [`AnalysisReport`] bundles the input parameters and results of a single evaluation with the
//! program version and the time of the analysis. It is written as pretty printed JSON.
use crate::{
    error::{LensmakerError, LmResult},
    fov::{FovResult, FovSpec},
    get_version,
    lens::{LensModel, LensResult, LensSpec},
};
use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;
use std::{fs, path::Path};

/// The evaluation stored in an [`AnalysisReport`].
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// evaluation of the lens parameters
    Lens {
        /// formula strategy used
        model: LensModel,
        /// lens parameters
        spec: LensSpec,
        /// calculated figures of merit
        result: LensResult,
    },
    /// evaluation of the field of view
    FieldOfView {
        /// aperture and focal length
        spec: FovSpec,
        /// half field of view and sensor size
        result: FovResult,
    },
}

#[derive(Serialize, Debug, Clone)]
/// Structure for storing data being integrated in an analysis report.
pub struct AnalysisReport {
    lensmaker_version: String,
    analysis_timestamp: DateTime<Local>,
    evaluation: Evaluation,
}
impl AnalysisReport {
    /// Creates a new [`AnalysisReport`] for the given [`Evaluation`] using the current version and time.
    #[must_use]
    pub fn new(evaluation: Evaluation) -> Self {
        Self {
            lensmaker_version: get_version(),
            analysis_timestamp: Local::now(),
            evaluation,
        }
    }
    /// Returns a reference to the evaluation of this [`AnalysisReport`].
    #[must_use]
    pub const fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }
    /// Returns the time of the analysis.
    #[must_use]
    pub const fn analysis_timestamp(&self) -> DateTime<Local> {
        self.analysis_timestamp
    }
    /// Write this report as JSON file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the report cannot be serialized or the file cannot
    /// be written.
    pub fn to_file(&self, path: &Path) -> LmResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LensmakerError::Report(format!("serialization of report failed: {e}")))?;
        fs::write(path, contents).map_err(|e| {
            LensmakerError::Report(format!("writing report file {} failed: {e}", path.display()))
        })?;
        info!("analysis report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::millimeter;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn lens_evaluation() -> Evaluation {
        let spec = LensSpec::new(
            1.5,
            millimeter!(50.0),
            millimeter!(-50.0),
            millimeter!(5.0),
            millimeter!(25.0),
        );
        Evaluation::Lens {
            model: LensModel::ThickLens,
            result: spec.evaluate().unwrap(),
            spec,
        }
    }
    #[test]
    fn new() {
        let before = Local::now();
        let report = AnalysisReport::new(lens_evaluation());
        assert_eq!(report.lensmaker_version, get_version());
        assert!(report.analysis_timestamp() >= before);
        assert_eq!(report.evaluation(), &lens_evaluation());
    }
    #[test]
    fn to_file_lens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        AnalysisReport::new(lens_evaluation()).to_file(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["lensmaker_version"], get_version());
        assert!(json["analysis_timestamp"].is_string());
        let lens = &json["evaluation"]["lens"];
        assert_eq!(lens["model"], "thick");
        assert_eq!(lens["spec"]["refractive_index"], 1.5);
        assert!(lens["result"]["total_power"].is_number());
    }
    #[test]
    fn to_file_fov() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        let spec = FovSpec::new(millimeter!(25.0), millimeter!(50.0));
        let evaluation = Evaluation::FieldOfView {
            result: spec.evaluate().unwrap(),
            spec,
        };
        AnalysisReport::new(evaluation).to_file(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["evaluation"]["field_of_view"]["result"]["sensor_diameter"].is_number());
    }
    #[test]
    fn to_file_invalid_path() {
        let report = AnalysisReport::new(lens_evaluation());
        assert_matches!(
            report.to_file(Path::new("./this_dir_does_not_exist/report.json")),
            Err(LensmakerError::Report(_))
        );
    }
}
