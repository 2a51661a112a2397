//! Kinetic Core
//!
//! Foundational types shared by the Kinetic animation engine:
//!
//! - **Geometry**: points and 2D affine matrices
//! - **Transformation**: the alpha + matrix record animations write into
//! - **Errors**: construction-time configuration errors
//!
//! # Example
//!
//! ```rust
//! use kinetic_core::{Affine2D, Transformation};
//!
//! let mut t = Transformation::new();
//! t.set_alpha(0.5);
//! t.concat(&Affine2D::scale(2.0, 2.0));
//!
//! let mut faded = Transformation::new();
//! faded.set_alpha(0.5);
//! t.compose(&faded);
//!
//! assert_eq!(t.alpha, 0.25);
//! ```

pub mod error;
pub mod geometry;
pub mod transformation;

pub use error::{ConfigError, Result};
pub use geometry::{Affine2D, Point};
pub use transformation::Transformation;
