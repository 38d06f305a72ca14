//! Exact derivatives of closed-form expressions using forward-mode automatic
//! differentiation with dual numbers.
//!
//! ```
//! use toygrad::prelude::*;
//!
//! let f = Function::new(["x", "y"], |[x, y]| x.pow(2.0) / y.pow(2.0));
//!
//! let dx = gradient(&f, Some("x"), [2.0, 3.0])?;
//! let dy = gradient(&f, Some("y"), [2.0, 3.0])?;
//! assert!((dx - 4.0 / 9.0).abs() < 1e-15);
//! assert!((dy + 8.0 / 27.0).abs() < 1e-15);
//! # Ok::<(), toygrad::Error>(())
//! ```

pub mod errors;
pub mod forwards;
pub mod function;
pub mod gradient;

pub use errors::{Error, Result};
pub use forwards::{variable, Dual};
pub use function::{Function, Output, Signature};
pub use gradient::{grad, gradient, Gradient};

pub mod prelude {
    pub use crate::forwards::{variable, Dual};
    pub use crate::function::{Function, Output, Signature};
    pub use crate::gradient::{grad, gradient, Gradient};
    pub use num_traits::Pow;
}
