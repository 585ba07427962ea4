//! Complex numbers for the reference host
//!
//! Reached from Float `**` when a negative base is raised to a non-integral
//! exponent, and from the coercion protocol when a Complex meets a real.

use std::any::Any;
use std::fmt;

use float_nodes::format::format_float;
use float_nodes::{HostObject, Value};

/// Complex number with double-precision parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }

    pub fn mul(self, other: Self) -> Self {
        // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    pub fn div(self, other: Self) -> Self {
        let denom = other.re * other.re + other.im * other.im;
        Self {
            re: (self.re * other.re + self.im * other.im) / denom,
            im: (self.im * other.re - self.re * other.im) / denom,
        }
    }

    /// Modulus
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Argument in `(-π, π]`
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn is_real(self) -> bool {
        self.im == 0.0
    }

    /// Principal value of `self ** exponent` for a real exponent, computed in
    /// polar form.
    pub fn powf(self, exponent: f64) -> Self {
        if exponent == 0.0 {
            return Self::from_real(1.0);
        }
        if self.is_real() && self.re < 0.0 {
            // angle is exactly π, so the result angle is `exponent` half-turns
            return Self::from_polar_pi((-self.re).powf(exponent), exponent);
        }
        let r = self.abs().powf(exponent);
        let theta = self.arg() * exponent;
        Self::from_polar(r, theta)
    }

    /// Principal value of `self ** exponent`, i.e. `exp(exponent * ln(self))`.
    pub fn pow(self, exponent: Self) -> Self {
        if exponent.is_real() {
            return self.powf(exponent.re);
        }
        if self.re == 0.0 && self.im == 0.0 {
            return Self::from_real(0.0);
        }
        let ln = Self::new(self.abs().ln(), self.arg());
        let w = exponent.mul(ln);
        Self::from_polar(w.re.exp(), w.im)
    }

    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Polar form with the angle given as a multiple of π. Quarter turns are
    /// exact.
    pub fn from_polar_pi(r: f64, turns: f64) -> Self {
        let half_turns = (turns * 2.0).rem_euclid(4.0);
        let (cos, sin) = if half_turns == 0.0 {
            (1.0, 0.0)
        } else if half_turns == 1.0 {
            (0.0, 1.0)
        } else if half_turns == 2.0 {
            (-1.0, 0.0)
        } else if half_turns == 3.0 {
            (0.0, -1.0)
        } else {
            let theta = turns * std::f64::consts::PI;
            (theta.cos(), theta.sin())
        };
        Self::new(r * cos, r * sin)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.im.is_sign_negative() && !self.im.is_nan() {
            '-'
        } else {
            '+'
        };
        let im = format_float(self.im.abs());
        if self.im.is_finite() {
            write!(f, "({}{}{}i)", format_float(self.re), sign, im)
        } else {
            write!(f, "({}{}{}*i)", format_float(self.re), sign, im)
        }
    }
}

impl HostObject for Complex {
    fn class_name(&self) -> &str {
        "Complex"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        Value::object(c)
    }
}
