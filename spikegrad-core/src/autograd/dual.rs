//! Forward-mode dual numbers backing the generic differentiation operator.
//!
//! A [`Dual`] carries a value and the derivative of that value with respect to a
//! single seeded input. Writing a gradient rule once over `Dual` lets the engine
//! both evaluate it (seed nothing) and differentiate it (seed the first operand).

use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    value: f64,
    deriv: f64,
}

impl Dual {
    /// A value that does not depend on the seeded input.
    pub fn constant(value: f64) -> Self {
        Dual { value, deriv: 0.0 }
    }

    /// The seeded input itself (`d/dx x = 1`).
    pub fn variable(value: f64) -> Self {
        Dual { value, deriv: 1.0 }
    }

    pub fn new(value: f64, deriv: f64) -> Self {
        Dual { value, deriv }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn deriv(&self) -> f64 {
        self.deriv
    }

    // Chain rule helper: f(self) with f'(self) = slope.
    fn lift(self, value: f64, slope: f64) -> Self {
        Dual {
            value,
            deriv: self.deriv * slope,
        }
    }

    pub fn exp(self) -> Self {
        let e = self.value.exp();
        self.lift(e, e)
    }

    pub fn ln(self) -> Self {
        self.lift(self.value.ln(), 1.0 / self.value)
    }

    pub fn sqrt(self) -> Self {
        let s = self.value.sqrt();
        self.lift(s, 0.5 / s)
    }

    pub fn powi(self, n: i32) -> Self {
        let slope = if n == 0 {
            0.0
        } else {
            f64::from(n) * self.value.powi(n - 1)
        };
        self.lift(self.value.powi(n), slope)
    }

    pub fn powf(self, n: f64) -> Self {
        self.lift(self.value.powf(n), n * self.value.powf(n - 1.0))
    }

    pub fn sin(self) -> Self {
        self.lift(self.value.sin(), self.value.cos())
    }

    pub fn cos(self) -> Self {
        self.lift(self.value.cos(), -self.value.sin())
    }

    pub fn tanh(self) -> Self {
        let t = self.value.tanh();
        self.lift(t, 1.0 - t * t)
    }

    pub fn sigmoid(self) -> Self {
        let s = 1.0 / (1.0 + (-self.value).exp());
        self.lift(s, s * (1.0 - s))
    }

    /// `|x|`, with derivative 0 at the kink.
    pub fn abs(self) -> Self {
        let slope = if self.value == 0.0 {
            0.0
        } else {
            self.value.signum()
        };
        self.lift(self.value.abs(), slope)
    }

    pub fn recip(self) -> Self {
        self.lift(1.0 / self.value, -1.0 / (self.value * self.value))
    }
}

impl Add for Dual {
    type Output = Dual;
    fn add(self, rhs: Dual) -> Dual {
        Dual::new(self.value + rhs.value, self.deriv + rhs.deriv)
    }
}

impl Sub for Dual {
    type Output = Dual;
    fn sub(self, rhs: Dual) -> Dual {
        Dual::new(self.value - rhs.value, self.deriv - rhs.deriv)
    }
}

impl Mul for Dual {
    type Output = Dual;
    fn mul(self, rhs: Dual) -> Dual {
        Dual::new(
            self.value * rhs.value,
            self.deriv * rhs.value + self.value * rhs.deriv,
        )
    }
}

impl Div for Dual {
    type Output = Dual;
    fn div(self, rhs: Dual) -> Dual {
        Dual::new(
            self.value / rhs.value,
            (self.deriv * rhs.value - self.value * rhs.deriv) / (rhs.value * rhs.value),
        )
    }
}

impl Neg for Dual {
    type Output = Dual;
    fn neg(self) -> Dual {
        Dual::new(-self.value, -self.deriv)
    }
}

macro_rules! impl_scalar_ops {
    ($($trait:ident, $method:ident);*) => {
        $(
            impl $trait<f64> for Dual {
                type Output = Dual;
                fn $method(self, rhs: f64) -> Dual {
                    $trait::$method(self, Dual::constant(rhs))
                }
            }

            impl $trait<Dual> for f64 {
                type Output = Dual;
                fn $method(self, rhs: Dual) -> Dual {
                    $trait::$method(Dual::constant(self), rhs)
                }
            }
        )*
    };
}

impl_scalar_ops!(Add, add; Sub, sub; Mul, mul; Div, div);

impl Zero for Dual {
    fn zero() -> Self {
        Dual::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0.0 && self.deriv == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Dual::constant(1.0)
    }
}

#[cfg(test)]
#[path = "dual_test.rs"]
mod tests;
