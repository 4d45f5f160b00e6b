use crate::error::LogError;
use crate::logfloat::LogFloat;
use crate::repr::{self, Parsed};
use crate::stable::{phasor_add, phasor_neg, phasor_sub, wrap_phase};
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use num_complex::Complex64;
use num_traits::{Inv, One, Pow, Zero};
use simple_error::SimpleError;
use std::{
    fmt,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

/// A complex number stored as its complex logarithm
///
/// The real part of the stored log-value is the log of the modulus and the
/// imaginary part is the phase, kept in `(-π, π]`. A log modulus of `-inf` is
/// the value zero, which always carries phase 0 when built from a native zero.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogComplex(Complex64);

impl LogComplex {
    /// The value 0
    pub const ZERO: Self = Self(Complex64::new(f64::NEG_INFINITY, 0.0));

    /// The value 1
    pub const ONE: Self = Self(Complex64::new(0.0, 0.0));

    /// Create a new logcomplex from a native complex value
    pub fn new(z: Complex64) -> Self {
        if z.re == 0.0 && z.im == 0.0 {
            return LogComplex::ZERO;
        }
        LogComplex::from_log_parts(z.norm().ln(), z.arg())
    }

    /// Create a new logcomplex from a real value, which may be negative
    pub fn from_f64(x: f64) -> Self {
        LogComplex::new(Complex64::new(x, 0.0))
    }

    /// Create a new logcomplex from its log-value; the phase is wrapped into `(-π, π]`
    pub fn from_log(logz: Complex64) -> Self {
        LogComplex(Complex64::new(logz.re, wrap_phase(logz.im)))
    }

    /// Create a new logcomplex from a log modulus and a phase in radians
    pub fn from_log_parts(log_norm: f64, phase: f64) -> Self {
        LogComplex(Complex64::new(log_norm, wrap_phase(phase)))
    }

    /// Create a new logcomplex from an argument list, the way a binding layer
    /// forwards positional arguments and the `logz` keyword.
    pub fn from_args(args: &[Complex64], logz: Option<Complex64>) -> Result<Self, LogError> {
        if args.len() > 1 {
            return Err(LogError::TooManyArguments(args.len()));
        }
        match (args.first(), logz) {
            (Some(_), Some(_)) => Err(LogError::ConflictingArguments),
            (Some(z), None) => Ok(LogComplex::new(*z)),
            (None, Some(logz)) => Ok(LogComplex::from_log(logz)),
            (None, None) => Ok(LogComplex::ZERO),
        }
    }

    /// Get the log-value
    pub fn logz(&self) -> Complex64 {
        self.0
    }

    /// Get the log of the modulus
    pub fn log_norm(&self) -> f64 {
        self.0.re
    }

    /// Get the phase in radians
    pub fn arg(&self) -> f64 {
        self.0.im
    }

    /// Get the modulus
    pub fn abs(&self) -> f64 {
        self.0.re.exp()
    }

    /// Get the real part of the value
    pub fn re(&self) -> f64 {
        self.abs() * self.0.im.cos()
    }

    /// Get the imaginary part of the value
    pub fn im(&self) -> f64 {
        self.abs() * self.0.im.sin()
    }

    /// Get the value as Complex64
    pub fn to_c64(&self) -> Complex64 {
        Complex64::from_polar(self.abs(), self.0.im)
    }

    /// False only for zero
    pub fn to_bool(&self) -> bool {
        self.0.re != f64::NEG_INFINITY
    }

    pub fn is_nan(&self) -> bool {
        self.0.re.is_nan() || self.0.im.is_nan()
    }

    /// Get the complex conjugate
    pub fn conj(&self) -> Self {
        LogComplex::from_log_parts(self.0.re, -self.0.im)
    }

    /// Get 1 / self
    pub fn recip(&self) -> Self {
        LogComplex::from_log(-self.0)
    }

    /// Raise to a complex power
    pub fn powc(&self, exp: Complex64) -> Self {
        if exp.im == 0.0 {
            return self.powf(exp.re);
        }
        LogComplex::from_log(self.0 * exp)
    }

    /// Raise to a real power
    pub fn powf(&self, exp: f64) -> Self {
        LogComplex::from_log(self.0 * exp)
    }

    /// Raise to an integer power
    pub fn powi(&self, exp: i32) -> Self {
        self.powf(exp as f64)
    }

    /// Raise `base` to the power given by the value of `self`
    pub fn rpow(&self, base: &LogComplex) -> Self {
        LogComplex::from_log(base.0 * self.to_c64())
    }

    pub fn square(&self) -> Self {
        self.powf(2.0)
    }

    /// Principal square root
    pub fn sqrt(&self) -> Self {
        self.powf(0.5)
    }

    /// Principal cube root
    pub fn cbrt(&self) -> Self {
        LogComplex::from_log(self.0 / 3.0)
    }

    fn add_log(&self, other: &LogComplex) -> Self {
        LogComplex::from_log(phasor_add(self.0, other.0))
    }

    fn sub_log(&self, other: &LogComplex) -> Self {
        LogComplex::from_log(phasor_sub(self.0, other.0))
    }

    fn mul_log(&self, other: &LogComplex) -> Self {
        LogComplex::from_log(self.0 + other.0)
    }

    fn div_log(&self, other: &LogComplex) -> Self {
        LogComplex::from_log(self.0 - other.0)
    }
}

impl Default for LogComplex {
    fn default() -> Self {
        LogComplex::ZERO
    }
}

impl fmt::Display for LogComplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "logcomplex(logz=")?;
        repr::fmt_complex(&self.0, f)?;
        write!(f, ")")
    }
}

impl FromStr for LogComplex {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match repr::parse_logcomplex(s)? {
            Parsed::Log(logz) => LogComplex::from_log(logz),
            Parsed::Native(z) => LogComplex::new(z),
        })
    }
}

macro_rules! impl_math_op(
    ($trt:ident, $mth:ident, $inner:ident) => (
        impl $trt for LogComplex {
            type Output = LogComplex;

            fn $mth(self, other: LogComplex) -> LogComplex {
                self.$inner(&other)
            }
        }

        impl $trt<&LogComplex> for LogComplex {
            type Output = LogComplex;

            fn $mth(self, other: &LogComplex) -> LogComplex {
                self.$inner(other)
            }
        }

        impl $trt<LogComplex> for &LogComplex {
            type Output = LogComplex;

            fn $mth(self, other: LogComplex) -> LogComplex {
                self.$inner(&other)
            }
        }

        impl $trt<&LogComplex> for &LogComplex {
            type Output = LogComplex;

            fn $mth(self, other: &LogComplex) -> LogComplex {
                self.$inner(other)
            }
        }

        impl_native_math_op!($trt, $mth, $inner, f64);
        impl_native_math_op!($trt, $mth, $inner, Complex64);
    );
);

// Native operands are promoted with `LogComplex::from`
macro_rules! impl_native_math_op(
    ($trt:ident, $mth:ident, $inner:ident, $t:ty) => (
        impl $trt<$t> for LogComplex {
            type Output = LogComplex;

            fn $mth(self, other: $t) -> LogComplex {
                self.$inner(&LogComplex::from(other))
            }
        }

        impl $trt<$t> for &LogComplex {
            type Output = LogComplex;

            fn $mth(self, other: $t) -> LogComplex {
                self.$inner(&LogComplex::from(other))
            }
        }

        impl $trt<LogComplex> for $t {
            type Output = LogComplex;

            fn $mth(self, other: LogComplex) -> LogComplex {
                LogComplex::from(self).$inner(&other)
            }
        }

        impl $trt<&LogComplex> for $t {
            type Output = LogComplex;

            fn $mth(self, other: &LogComplex) -> LogComplex {
                LogComplex::from(self).$inner(other)
            }
        }
    );
);

macro_rules! impl_assign_op(
    ($trt:ident, $mth:ident, $inner:ident) => (
        impl $trt for LogComplex {
            fn $mth(&mut self, other: LogComplex) {
                *self = self.$inner(&other);
            }
        }

        impl $trt<&LogComplex> for LogComplex {
            fn $mth(&mut self, other: &LogComplex) {
                *self = self.$inner(other);
            }
        }
    );
);

impl_math_op!(Add, add, add_log);
impl_math_op!(Sub, sub, sub_log);
impl_math_op!(Mul, mul, mul_log);
impl_math_op!(Div, div, div_log);
impl_assign_op!(AddAssign, add_assign, add_log);
impl_assign_op!(SubAssign, sub_assign, sub_log);
impl_assign_op!(MulAssign, mul_assign, mul_log);
impl_assign_op!(DivAssign, div_assign, div_log);

impl Neg for LogComplex {
    type Output = LogComplex;

    fn neg(self) -> LogComplex {
        LogComplex(phasor_neg(self.0))
    }
}

impl Neg for &LogComplex {
    type Output = LogComplex;

    fn neg(self) -> LogComplex {
        LogComplex(phasor_neg(self.0))
    }
}

impl Inv for LogComplex {
    type Output = LogComplex;

    fn inv(self) -> LogComplex {
        self.recip()
    }
}

impl Pow<f64> for LogComplex {
    type Output = LogComplex;

    fn pow(self, exp: f64) -> LogComplex {
        self.powf(exp)
    }
}

impl Pow<i32> for LogComplex {
    type Output = LogComplex;

    fn pow(self, exp: i32) -> LogComplex {
        self.powi(exp)
    }
}

impl Pow<Complex64> for LogComplex {
    type Output = LogComplex;

    fn pow(self, exp: Complex64) -> LogComplex {
        self.powc(exp)
    }
}

impl Pow<LogComplex> for LogComplex {
    type Output = LogComplex;

    fn pow(self, exp: LogComplex) -> LogComplex {
        exp.rpow(&self)
    }
}

impl Pow<&LogComplex> for &LogComplex {
    type Output = LogComplex;

    fn pow(self, exp: &LogComplex) -> LogComplex {
        exp.rpow(self)
    }
}

impl Pow<LogComplex> for Complex64 {
    type Output = LogComplex;

    fn pow(self, exp: LogComplex) -> LogComplex {
        exp.rpow(&LogComplex::new(self))
    }
}

impl Pow<LogComplex> for f64 {
    type Output = LogComplex;

    fn pow(self, exp: LogComplex) -> LogComplex {
        exp.rpow(&LogComplex::from_f64(self))
    }
}

impl Zero for LogComplex {
    fn zero() -> Self {
        LogComplex::ZERO
    }

    fn is_zero(&self) -> bool {
        !self.to_bool()
    }
}

impl One for LogComplex {
    fn one() -> Self {
        LogComplex::ONE
    }
}

impl From<Complex64> for LogComplex {
    fn from(z: Complex64) -> Self {
        LogComplex::new(z)
    }
}

impl From<f64> for LogComplex {
    fn from(x: f64) -> Self {
        LogComplex::from_f64(x)
    }
}

impl From<LogFloat> for LogComplex {
    fn from(x: LogFloat) -> Self {
        LogComplex(Complex64::new(x.log(), 0.0))
    }
}

impl From<LogComplex> for Complex64 {
    fn from(z: LogComplex) -> Complex64 {
        z.to_c64()
    }
}

impl From<LogComplex> for bool {
    fn from(z: LogComplex) -> bool {
        z.to_bool()
    }
}

impl Sum for LogComplex {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LogComplex::ZERO, |acc, z| acc + z)
    }
}

impl<'a> Sum<&'a LogComplex> for LogComplex {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(LogComplex::ZERO, |acc, z| acc + z)
    }
}

impl Product for LogComplex {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LogComplex::ONE, |acc, z| acc * z)
    }
}

impl<'a> Product<&'a LogComplex> for LogComplex {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(LogComplex::ONE, |acc, z| acc * z)
    }
}

// Both parts of the log-value are compared separately
impl AbsDiffEq for LogComplex {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let re = self.0.re == other.0.re || self.0.re.abs_diff_eq(&other.0.re, epsilon);
        re && self.0.im.abs_diff_eq(&other.0.im, epsilon)
    }
}

impl RelativeEq for LogComplex {
    fn default_max_relative() -> Self::Epsilon {
        f64::EPSILON
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.0.re.relative_eq(&other.0.re, epsilon, max_relative)
            && self.0.im.relative_eq(&other.0.im, epsilon, max_relative)
    }
}

impl UlpsEq for LogComplex {
    fn default_max_ulps() -> u32 {
        4
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.0.re.ulps_eq(&other.0.re, epsilon, max_ulps)
            && self.0.im.ulps_eq(&other.0.im, epsilon, max_ulps)
    }
}
