//! Closures paired with their declared parameter names.
//!
//! Rust closures carry no parameter names at runtime, so the names are
//! registered alongside the body when the [`Function`] is built:
//!
//! ```
//! use toygrad::prelude::*;
//!
//! let f = Function::new(["x", "y"], |[x, y]| x * x + y * y);
//! assert_eq!(f.parameter_names(), &["x", "y"]);
//! assert_eq!(f.position("y"), Some(1));
//! assert_eq!(f.call([3.0, 4.0]).unwrap(), 25.0);
//! ```

use crate::errors::Result;
use crate::forwards::Dual;

/// Ordered parameter names of a differentiable function.
pub trait Signature {
    fn parameter_names(&self) -> &[&str];

    /// Zero-based slot of `name` among the declared parameters.
    fn position(&self, name: &str) -> Option<usize> {
        self.parameter_names().iter().position(|p| *p == name)
    }
}

/// Values a differentiable closure may return.
///
/// Plain arithmetic returns a [`Dual`]; closures built from the `checked_*`
/// operations return a [`Result`] so the error reaches the caller unchanged.
pub trait Output {
    fn into_result(self) -> Result<Dual>;
}

impl Output for Dual {
    fn into_result(self) -> Result<Dual> {
        Ok(self)
    }
}

impl Output for Result<Dual> {
    fn into_result(self) -> Result<Dual> {
        self
    }
}

/// A closure over `N` dual arguments with a name for each argument.
#[derive(Clone, Copy)]
pub struct Function<'p, F, const N: usize> {
    params: [&'p str; N],
    body: F,
}

impl<'p, F, R, const N: usize> Function<'p, F, N>
where
    F: Fn([Dual; N]) -> R,
    R: Output,
{
    pub fn new(params: [&'p str; N], body: F) -> Self {
        Function { params, body }
    }

    /// Invokes the body on already-built dual arguments.
    pub fn apply(&self, args: [Dual; N]) -> Result<Dual> {
        (self.body)(args).into_result()
    }

    /// Evaluates the function at a point, all arguments held constant.
    pub fn call(&self, at: [f64; N]) -> Result<f64> {
        self.apply(at.map(Dual::constant)).map(f64::from)
    }
}

impl<F, const N: usize> Signature for Function<'_, F, N> {
    fn parameter_names(&self) -> &[&str] {
        &self.params
    }
}

impl<F, const N: usize> std::fmt::Debug for Function<'_, F, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
