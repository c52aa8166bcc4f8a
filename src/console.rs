//! Handling the lensmaker CLI
//!
//! This module handles the command line parsing. Values not given on the command line are
//! prompted interactively in the fixed order of the respective input form.
use crate::{
    document::LensDocument,
    error::{LensmakerError, LmResult},
    form::{parse_value, FormField, FormValues, FovField, LensField},
    fov::FovSpec,
    get_version,
    lens::{LensModel, LensSpec},
};
use clap::{builder::Str, Parser, Subcommand};
use rprompt::prompt_reply_from_bufread;
use std::{
    io::{stdin, stdout, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};
use strum::IntoEnumIterator;

/// Paraxial thick-lens parameter calculator
#[derive(Parser, Debug)]
#[command(author, version = Str::from(&get_version()), about, long_about = None)]
pub struct Cli {
    /// calculation to perform. Defaults to the lens calculation.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available calculations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// calculate power, focal length and numerical aperture of a lens
    Lens(PartialLensArgs),
    /// calculate half field of view and sensor size
    Fov(PartialFovArgs),
}

/// Command line arguments of the lens calculation as given by the user.
#[derive(clap::Args, Debug, Default)]
pub struct PartialLensArgs {
    /// refractive index of the lens material
    #[arg(long, allow_hyphen_values = true)]
    index: Option<String>,

    /// radius of curvature of the first surface in mm (inf for a flat surface)
    #[arg(long, allow_hyphen_values = true)]
    rad1: Option<String>,

    /// radius of curvature of the second surface in mm (inf for a flat surface)
    #[arg(long, allow_hyphen_values = true)]
    rad2: Option<String>,

    /// center thickness of the lens in mm
    #[arg(long, allow_hyphen_values = true)]
    thickness: Option<String>,

    /// clear aperture diameter of the lens in mm
    #[arg(long, allow_hyphen_values = true)]
    diameter: Option<String>,

    /// lens description file (.yaml, .yml or .json) containing a lens section
    #[arg(short, long, conflicts_with_all = ["index", "rad1", "rad2", "thickness", "diameter"])]
    file: Option<PathBuf>,

    /// formula used for the total power: thick or thin
    #[arg(short, long)]
    model: Option<String>,

    /// write a cross-section of the lens to this SVG file
    #[arg(short, long)]
    plot: Option<PathBuf>,

    /// write an analysis report to this JSON file
    #[arg(short, long)]
    report: Option<PathBuf>,
}

/// Command line arguments of the field-of-view calculation as given by the user.
#[derive(clap::Args, Debug, Default)]
pub struct PartialFovArgs {
    /// aperture diameter in mm
    #[arg(long, allow_hyphen_values = true)]
    diameter: Option<String>,

    /// focal length in mm
    #[arg(long, allow_hyphen_values = true)]
    focal_length: Option<String>,

    /// lens description file (.yaml, .yml or .json) containing a fov section
    #[arg(short, long, conflicts_with_all = ["diameter", "focal_length"])]
    file: Option<PathBuf>,

    /// write an analysis report to this JSON file
    #[arg(short, long)]
    report: Option<PathBuf>,
}

/// Fully resolved arguments of the lens calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct LensArgs {
    /// lens parameters
    pub spec: LensSpec,
    /// formula used for the total power
    pub model: LensModel,
    /// destination of the cross-section plot
    pub plot: Option<PathBuf>,
    /// destination of the analysis report
    pub report: Option<PathBuf>,
}

/// Fully resolved arguments of the field-of-view calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct FovArgs {
    /// aperture diameter and focal length
    pub spec: FovSpec,
    /// destination of the analysis report
    pub report: Option<PathBuf>,
}

/// Collects the values of all fields of a form.
///
/// Fields for which `given` returns a value are taken from there, all other fields are prompted
/// in form order.
/// # Errors
/// Returns an [`LensmakerError::Console`] if reading the prompted input fails and an
/// [`LensmakerError::Parse`] if a value is not a valid number.
fn fill_form<F: FormField>(
    given: impl Fn(F) -> Option<String>,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> LmResult<FormValues<F>> {
    let mut form = FormValues::default();
    for field in F::iter() {
        let input = match given(field) {
            Some(input) => input,
            None => prompt_reply_from_bufread(reader, writer, field.label())
                .map_err(|e| LensmakerError::Console(format!("reading {field} failed: {e}")))?,
        };
        form.set(field, parse_value(field, &input)?);
    }
    Ok(form)
}

fn eval_model_input(model: Option<&str>) -> LmResult<LensModel> {
    model.map_or_else(
        || Ok(LensModel::default()),
        |m| {
            LensModel::from_str(m.trim()).map_err(|_| {
                let models: Vec<&str> = LensModel::iter().map(<&str>::from).collect();
                LensmakerError::Console(format!(
                    "unknown lens model '{m}'. Use one of: {}",
                    models.join(", ")
                ))
            })
        },
    )
}

impl PartialLensArgs {
    fn given_value(&self, field: LensField) -> Option<String> {
        match field {
            LensField::RefractiveIndex => self.index.clone(),
            LensField::Radius1 => self.rad1.clone(),
            LensField::Radius2 => self.rad2.clone(),
            LensField::Thickness => self.thickness.clone(),
            LensField::Diameter => self.diameter.clone(),
        }
    }
    /// Resolve missing values by reading from `reader` after writing the prompt to `writer`.
    ///
    /// # Errors
    ///
    /// This function returns an error if the lens model is unknown, the lens description file
    /// cannot be used or an entered value is invalid.
    pub fn resolve(self, reader: &mut impl BufRead, writer: &mut impl Write) -> LmResult<LensArgs> {
        let model = eval_model_input(self.model.as_deref())?;
        let spec = if let Some(path) = &self.file {
            *LensDocument::from_file(path)?.lens().ok_or_else(|| {
                LensmakerError::Console(format!(
                    "file {} does not contain a lens section",
                    path.display()
                ))
            })?
        } else {
            let form: FormValues<LensField> =
                fill_form(|field| self.given_value(field), reader, writer)?;
            LensSpec::try_from(&form)?
        };
        Ok(LensArgs {
            spec,
            model,
            plot: self.plot,
            report: self.report,
        })
    }
}

impl PartialFovArgs {
    fn given_value(&self, field: FovField) -> Option<String> {
        match field {
            FovField::Diameter => self.diameter.clone(),
            FovField::FocalLength => self.focal_length.clone(),
        }
    }
    /// Resolve missing values by reading from `reader` after writing the prompt to `writer`.
    ///
    /// # Errors
    ///
    /// This function returns an error if the lens description file cannot be used or an entered
    /// value is invalid.
    pub fn resolve(self, reader: &mut impl BufRead, writer: &mut impl Write) -> LmResult<FovArgs> {
        let spec = if let Some(path) = &self.file {
            *LensDocument::from_file(path)?.fov().ok_or_else(|| {
                LensmakerError::Console(format!(
                    "file {} does not contain a fov section",
                    path.display()
                ))
            })?
        } else {
            let form: FormValues<FovField> =
                fill_form(|field| self.given_value(field), reader, writer)?;
            FovSpec::try_from(&form)?
        };
        Ok(FovArgs {
            spec,
            report: self.report,
        })
    }
}

impl TryFrom<PartialLensArgs> for LensArgs {
    type Error = LensmakerError;

    fn try_from(part_args: PartialLensArgs) -> LmResult<Self> {
        let mut reader = BufReader::new(stdin().lock());
        let mut writer = BufWriter::new(stdout().lock());
        part_args.resolve(&mut reader, &mut writer)
    }
}

impl TryFrom<PartialFovArgs> for FovArgs {
    type Error = LensmakerError;

    fn try_from(part_args: PartialFovArgs) -> LmResult<Self> {
        let mut reader = BufReader::new(stdin().lock());
        let mut writer = BufWriter::new(stdout().lock());
        part_args.resolve(&mut reader, &mut writer)
    }
}
