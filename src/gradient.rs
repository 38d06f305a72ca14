//! Partial derivatives of named-parameter functions.
//!
//! [`gradient`] seeds one argument as a [`Dual::variable`] and every other as
//! a constant, runs the function once and reads the tangent of the result.
//! [`grad`] repeats that for each named argument to build a full gradient.

use log::{debug, trace};
use std::ops::Index;

use crate::errors::{Error, Result, MISSING_WRT};
use crate::forwards::Dual;
use crate::function::{Function, Output, Signature};

/// Partial derivative of `of` with respect to the parameter named `wrt`,
/// evaluated at `at`.
///
/// `wrt` may be omitted for a function of one parameter. A function of no
/// parameters is constant and has a derivative of zero.
///
/// ```
/// use toygrad::prelude::*;
///
/// let f = Function::new(["x", "y"], |[x, y]| x.pow(2.0) + y.pow(2.0));
/// assert_eq!(gradient(&f, Some("x"), [2.0, 1.0]).unwrap(), 4.0);
/// assert_eq!(gradient(&f, Some("y"), [2.0, 3.0]).unwrap(), 6.0);
/// ```
pub fn gradient<F, R, const N: usize>(
    of: &Function<'_, F, N>,
    wrt: Option<&str>,
    at: [f64; N],
) -> Result<f64>
where
    F: Fn([Dual; N]) -> R,
    R: Output,
{
    if N == 0 {
        return Ok(0.0);
    }

    let slot = match wrt {
        Some(name) => of
            .position(name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))?,
        None if N > 1 => return Err(Error::InvalidArgument(MISSING_WRT)),
        None => 0,
    };

    let partial = seeded_pass(of, slot, at)?;
    debug!(
        "d/d{} at {:?} = {}",
        of.parameter_names()[slot],
        at,
        partial
    );
    Ok(partial)
}

/// Gradient of `of` at the named arguments `args`, one partial derivative per
/// supplied name.
///
/// Parameters not named in `args` are held at the constant `0`.
///
/// ```
/// use toygrad::prelude::*;
///
/// let f = Function::new(["x", "y"], |[x, y]| (x * x * 3.0 + y * y * y) * 2.0);
/// let g = grad(&f, &[("x", 1.0), ("y", 2.0)]).unwrap();
/// assert_eq!(g["x"], 12.0);
/// assert_eq!(g["y"], 24.0);
/// ```
pub fn grad<F, R, const N: usize>(of: &Function<'_, F, N>, args: &[(&str, f64)]) -> Result<Gradient>
where
    F: Fn([Dual; N]) -> R,
    R: Output,
{
    let mut at = [0.0; N];
    let mut slots = Vec::with_capacity(args.len());
    for &(name, value) in args {
        let slot = of
            .position(name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))?;
        at[slot] = value;
        slots.push((name, slot));
    }

    let mut partials = Gradient::default();
    for (name, slot) in slots {
        let partial = seeded_pass(of, slot, at)?;
        debug!("d/d{} at {:?} = {}", name, at, partial);
        partials.insert(name, partial);
    }
    Ok(partials)
}

fn seeded_pass<F, R, const N: usize>(of: &Function<'_, F, N>, slot: usize, at: [f64; N]) -> Result<f64>
where
    F: Fn([Dual; N]) -> R,
    R: Output,
{
    let mut args = at.map(Dual::constant);
    args[slot] = Dual::variable(at[slot]);
    trace!("seeded arguments {:?}", args);
    Ok(of.apply(args)?.tangent)
}

/// Partial derivatives keyed by parameter name, in the order they were
/// requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gradient {
    partials: Vec<(String, f64)>,
}

impl Gradient {
    fn insert(&mut self, name: &str, partial: f64) {
        match self.partials.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = partial,
            None => self.partials.push((name.to_string(), partial)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.partials
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, partial)| partial)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.partials.iter().map(|(n, p)| (n.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.partials.iter().map(|&(_, p)| p).collect()
    }
}

impl Index<&str> for Gradient {
    type Output = f64;

    fn index(&self, name: &str) -> &f64 {
        match self.partials.iter().find(|(n, _)| n == name) {
            Some((_, partial)) => partial,
            None => panic!("no partial derivative for '{name}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_traits::Pow;

    #[test]
    fn test_power_rule() {
        let f = Function::new(["x"], |[x]| x.pow(2.0));
        assert_eq!(gradient(&f, Some("x"), [2.0]), Ok(4.0));
    }

    #[test]
    fn test_wrt_defaults_for_single_parameter() {
        let f = Function::new(["x"], |[x]| x * x * x);
        assert_eq!(gradient(&f, None, [2.0]), Ok(12.0));
    }

    #[test]
    fn test_constant_function() {
        let f = Function::new([], |[]: [Dual; 0]| Dual::constant(42.0));
        assert_eq!(gradient(&f, None, []), Ok(0.0));
        assert_eq!(gradient(&f, Some("y"), []), Ok(0.0));
    }

    #[test]
    fn test_multivariate_isolation() {
        let f = Function::new(["x", "y"], |[x, y]| x.pow(2.0) + y.pow(2.0));
        assert_eq!(gradient(&f, Some("x"), [2.0, 1.0]), Ok(4.0));
        assert_eq!(gradient(&f, Some("x"), [2.0, 50.0]), Ok(4.0));
        assert_eq!(gradient(&f, Some("y"), [2.0, 3.0]), Ok(6.0));
    }

    #[test]
    fn test_quotient_of_two_variables() {
        let f = Function::new(["x", "y"], |[x, y]| x.pow(2.0) / y.pow(2.0));
        assert_relative_eq!(gradient(&f, Some("x"), [2.0, 3.0]).unwrap(), 4.0 / 9.0);
        assert_relative_eq!(gradient(&f, Some("y"), [2.0, 3.0]).unwrap(), -8.0 / 27.0);
    }

    #[test]
    fn test_missing_wrt_for_multivariate() {
        let f = Function::new(["x", "y"], |[x, y]| x + y);
        let err = gradient(&f, None, [1.0, 2.0]).unwrap_err();
        assert_eq!(err, Error::InvalidArgument(MISSING_WRT));
        assert_eq!(err.to_string(), "wrt must be provided for multivariate functions");
    }

    #[test]
    fn test_unknown_wrt() {
        let f = Function::new(["x"], |[x]| x);
        let err = gradient(&f, Some("y"), [1.0]).unwrap_err();
        assert_eq!(err, Error::UnknownParameter("y".to_string()));
        assert_eq!(err.to_string(), "'y' is not a valid argument name");
    }

    #[test]
    fn test_body_errors_propagate() {
        let f = Function::new(["x", "y"], |[x, y]| x.checked_div(y));
        assert!(matches!(
            gradient(&f, Some("x"), [1.0, 0.0]),
            Err(Error::Domain(_))
        ));
        assert_eq!(gradient(&f, Some("y"), [1.0, 2.0]), Ok(-0.25));
    }

    #[test]
    fn test_grad_all_parameters() {
        let f = Function::new(["x", "y"], |[x, y]| x.pow(2.0) + y.pow(2.0));
        let g = grad(&f, &[("x", 3.0), ("y", 4.0)]).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.get("x"), Some(6.0));
        assert_eq!(g.get("y"), Some(8.0));
        assert_eq!(g.to_vec(), vec![6.0, 8.0]);
    }

    #[test]
    fn test_grad_holds_other_arguments_at_their_values() {
        let f = Function::new(["x", "y"], |[x, y]| x * y);
        let g = grad(&f, &[("x", 3.0), ("y", 4.0)]).unwrap();
        assert_eq!(g["x"], 4.0);
        assert_eq!(g["y"], 3.0);
    }

    #[test]
    fn test_grad_defaults_unsupplied_to_zero() {
        let f = Function::new(["x", "y"], |[x, y]| x * x + x * y);
        let g = grad(&f, &[("x", 2.0)]).unwrap();
        assert_eq!(g.iter().collect::<Vec<_>>(), vec![("x", 4.0)]);
        assert_eq!(g.get("y"), None);
    }

    #[test]
    fn test_grad_preserves_request_order() {
        let f = Function::new(["a", "b", "c"], |[a, b, c]| a + b * 2.0 + c * 3.0);
        let g = grad(&f, &[("c", 1.0), ("a", 1.0)]).unwrap();
        assert_eq!(g.iter().collect::<Vec<_>>(), vec![("c", 3.0), ("a", 1.0)]);
    }

    #[test]
    fn test_grad_unknown_argument() {
        let f = Function::new(["x"], |[x]| x);
        assert_eq!(
            grad(&f, &[("x", 1.0), ("z", 2.0)]),
            Err(Error::UnknownParameter("z".to_string()))
        );
    }

    #[test]
    fn test_grad_of_nothing() {
        let f = Function::new(["x"], |[x]| x);
        assert!(grad(&f, &[]).unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "no partial derivative for 'q'")]
    fn test_index_missing_name() {
        let _ = Gradient::default()["q"];
    }
}
