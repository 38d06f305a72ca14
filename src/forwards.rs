//! Forward-mode automatic differentiation using dual numbers.
//!
//! A [`Dual`] carries a real value together with its derivative (the tangent)
//! with respect to one implicit variable. Every operator propagates both parts,
//! so evaluating an expression on a seeded [`Dual::variable`] yields the value
//! and the exact derivative in a single pass.
//!
//! ```
//! use toygrad::prelude::*;
//!
//! let x = Dual::variable(3.0);
//! let y = Dual::constant(4.0);
//!
//! let z = x * y + x.pow(2.0);
//! assert_eq!(z.real, 21.0);
//! assert_eq!(z.tangent, 10.0);
//! ```

use num_traits::{One, Pow, ToPrimitive, Zero};
use std::fmt::{self, Display, Formatter};
use std::iter::{Product, Sum};

use crate::errors::{self, Error, DIVISION_BY_ZERO, ZERO_TO_LOW_POWER};

/// A dual number: a real value and its derivative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dual {
    pub real: f64,    // The real value
    pub tangent: f64, // The derivative
}

impl Dual {
    /// Constructs a dual number with an explicit tangent.
    pub fn new(real: f64, tangent: f64) -> Self {
        Dual { real, tangent }
    }

    /// A constant has a tangent of zero.
    pub fn constant(real: f64) -> Self {
        Dual { real, tangent: 0.0 }
    }

    /// The variable being differentiated, seeded with a tangent of one.
    pub fn variable(real: f64) -> Self {
        Dual { real, tangent: 1.0 }
    }

    pub fn is_constant(&self) -> bool {
        self.tangent == 0.0
    }

    /// Quotient rule, failing instead of producing an infinity when the
    /// divisor's real part is zero.
    ///
    /// ```
    /// use toygrad::{Dual, Error};
    ///
    /// let q = Dual::constant(3.0).checked_div(Dual::variable(4.0)).unwrap();
    /// assert_eq!(q.tangent, -0.1875);
    ///
    /// let err = Dual::variable(1.0).checked_div(0.0).unwrap_err();
    /// assert!(matches!(err, Error::Domain(_)));
    /// ```
    pub fn checked_div<R: Into<Dual>>(self, rhs: R) -> errors::Result<Dual> {
        let rhs = rhs.into();
        if rhs.real == 0.0 {
            return Err(Error::Domain(DIVISION_BY_ZERO));
        }
        Ok(Dual {
            real: self.real / rhs.real,
            tangent: (rhs.real * self.tangent - self.real * rhs.tangent) / (rhs.real * rhs.real),
        })
    }

    /// Floor division. The tangent is inherited from the true quotient rather
    /// than being zero, which is not the derivative of `floor`.
    pub fn checked_div_floor<R: Into<Dual>>(self, rhs: R) -> errors::Result<Dual> {
        let quotient = self.checked_div(rhs)?;
        Ok(Dual {
            real: quotient.real.floor(),
            tangent: quotient.tangent,
        })
    }

    /// Floor division, see [`Dual::checked_div_floor`].
    ///
    /// A scalar dividend is promoted explicitly:
    ///
    /// ```
    /// use toygrad::Dual;
    ///
    /// let q = Dual::from(7.0).div_floor(Dual::variable(2.0));
    /// assert_eq!(q.real, 3.0);
    /// assert_eq!(q.tangent, -1.75);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the divisor's real part is zero.
    pub fn div_floor<R: Into<Dual>>(self, rhs: R) -> Dual {
        unwrap_domain(self.checked_div_floor(rhs))
    }

    /// Power rule `b·a^(b-1)·a'`. The exponent's own tangent does not
    /// contribute.
    ///
    /// Zero raised to an exponent below one needs `0^(b-1)`, a division by
    /// zero, and is rejected.
    pub fn checked_pow<R: Into<Dual>>(self, exponent: R) -> errors::Result<Dual> {
        let exponent = exponent.into();
        if self.real == 0.0 && exponent.real < 1.0 {
            return Err(Error::Domain(ZERO_TO_LOW_POWER));
        }
        Ok(Dual {
            real: self.real.powf(exponent.real),
            tangent: exponent.real * self.real.powf(exponent.real - 1.0) * self.tangent,
        })
    }
}

/// Shorthand for [`Dual::variable`].
pub fn variable(real: f64) -> Dual {
    Dual::variable(real)
}

fn unwrap_domain(result: errors::Result<Dual>) -> Dual {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl From<f64> for Dual {
    fn from(real: f64) -> Self {
        Dual::constant(real)
    }
}

impl From<i32> for Dual {
    fn from(real: i32) -> Self {
        Dual::constant(f64::from(real))
    }
}

impl From<Dual> for f64 {
    fn from(dual: Dual) -> f64 {
        dual.real
    }
}

impl Display for Dual {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} + {}ε", self.real, self.tangent)
    }
}

// Implementing addition for Dual
use std::ops::Add;

impl Add for Dual {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Dual {
            real: self.real + other.real,
            tangent: self.tangent + other.tangent,
        }
    }
}

// Implementing multiplication for Dual
use std::ops::Mul;

impl Mul for Dual {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Dual {
            real: self.real * other.real,
            tangent: other.real * self.tangent + self.real * other.tangent,
        }
    }
}

use std::ops::{Div, Neg, Sub};

impl Sub for Dual {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Dual {
            real: self.real - other.real,
            tangent: self.tangent - other.tangent,
        }
    }
}

impl Div for Dual {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the divisor's real part is zero, like integer division.
    fn div(self, other: Self) -> Self {
        unwrap_domain(self.checked_div(other))
    }
}

impl Neg for Dual {
    type Output = Self;

    fn neg(self) -> Self {
        Dual {
            real: -self.real,
            tangent: -self.tangent,
        }
    }
}

// Scalars on either side are promoted to constants.
macro_rules! impl_promoted_ops {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl $Op<f64> for Dual {
            type Output = Dual;

            fn $op(self, rhs: f64) -> Dual {
                <Dual as $Op>::$op(self, Dual::from(rhs))
            }
        }

        impl $Op<Dual> for f64 {
            type Output = Dual;

            fn $op(self, rhs: Dual) -> Dual {
                <Dual as $Op>::$op(Dual::from(self), rhs)
            }
        }

        impl<'a, 'b> $Op<&'b Dual> for &'a Dual {
            type Output = Dual;

            fn $op(self, rhs: &'b Dual) -> Dual {
                <Dual as $Op>::$op(*self, *rhs)
            }
        }

        impl std::ops::$OpAssign for Dual {
            fn $op_assign(&mut self, rhs: Dual) {
                *self = <Dual as $Op>::$op(*self, rhs);
            }
        }

        impl std::ops::$OpAssign<f64> for Dual {
            fn $op_assign(&mut self, rhs: f64) {
                *self = <Dual as $Op>::$op(*self, Dual::from(rhs));
            }
        }
    };
}

impl_promoted_ops!(Add, add, AddAssign, add_assign);
impl_promoted_ops!(Sub, sub, SubAssign, sub_assign);
impl_promoted_ops!(Mul, mul, MulAssign, mul_assign);
impl_promoted_ops!(Div, div, DivAssign, div_assign);

impl Pow<Dual> for Dual {
    type Output = Dual;

    /// # Panics
    ///
    /// Panics on zero raised to an exponent below one, see
    /// [`Dual::checked_pow`].
    fn pow(self, exponent: Dual) -> Dual {
        unwrap_domain(self.checked_pow(exponent))
    }
}

impl Pow<f64> for Dual {
    type Output = Dual;

    fn pow(self, exponent: f64) -> Dual {
        self.pow(Dual::from(exponent))
    }
}

impl Pow<i32> for Dual {
    type Output = Dual;

    fn pow(self, exponent: i32) -> Dual {
        self.pow(Dual::from(exponent))
    }
}

impl Pow<Dual> for f64 {
    type Output = Dual;

    fn pow(self, exponent: Dual) -> Dual {
        Dual::from(self).pow(exponent)
    }
}

impl Sum for Dual {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dual::zero(), |acc, x| acc + x)
    }
}

impl Product for Dual {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dual::one(), |acc, x| acc * x)
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Dual::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.real == 0.0 && self.tangent == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Dual::constant(1.0)
    }
}

impl num_traits::NumCast for Dual {
    fn from<T: ToPrimitive>(n: T) -> Option<Self> {
        n.to_f64().map(Dual::constant)
    }
}

impl ToPrimitive for Dual {
    fn to_i64(&self) -> Option<i64> {
        self.real.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.real.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.real)
    }
}
