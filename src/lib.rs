//! This is the documentation for the **lensmaker** software package.
//!
//! **lensmaker** evaluates the paraxial parameters of a single lens with spherical (or flat)
//! surfaces. From the refractive index, both radii of curvature, the center thickness and the
//! clear aperture it calculates the surface powers, the total power, the effective focal length
//! and the numerical aperture. A second calculation determines the half field of view and the
//! corresponding sensor size for a given aperture and focal length.
//!
//! ```
//! use lensmaker::{lens::LensSpec, millimeter};
//!
//! let lens = LensSpec::new(
//!     1.5,
//!     millimeter!(50.0),
//!     millimeter!(-50.0),
//!     millimeter!(5.0),
//!     millimeter!(25.0),
//! );
//! let result = lens.evaluate().unwrap();
//! assert_eq!(format!("{}", result.effective_focal_length()), "50.85 mm");
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod document;
pub mod error;
pub mod form;
pub mod fov;
pub mod lens;
pub mod plottable;
pub mod reporter;
pub mod utils;

pub use document::LensDocument;
pub use fov::{FovResult, FovSpec};
pub use lens::{EffectiveFocalLength, LensModel, LensResult, LensSpec};

/// Return the version information of the currently built lensmaker executable.
#[must_use]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
