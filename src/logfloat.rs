use crate::error::LogError;
use crate::repr::{self, Parsed};
use crate::stable::{log_add_exp, log_sub_exp};
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use log::debug;
use num_traits::{Inv, One, Pow, Zero};
use simple_error::SimpleError;
use std::{
    cmp::Ordering,
    fmt,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub},
    str::FromStr,
};

/// A nonnegative real number stored as the natural log of its value.
///
/// Products, quotients and powers are exact operations on the stored log.
/// Sums and differences are rebuilt with the stable identities in
/// [`crate::stable`], so values such as `exp(-1200)` can be added without
/// underflowing. A log of `-inf` is the value zero.
///
/// Subtraction, negation and any operation that has to promote a native
/// `f64` can leave the nonnegative reals, so those operators return
/// `Result<LogFloat, LogError>`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogFloat(f64);

impl LogFloat {
    /// The value 0, stored as `log = -inf`.
    pub const ZERO: Self = Self(f64::NEG_INFINITY);

    /// The value 1, stored as `log = 0`.
    pub const ONE: Self = Self(0.0);

    /// Represents an error value, `log = NaN`.
    pub const NAN: Self = Self(f64::NAN);

    /// Create a new logfloat from a native value
    ///
    /// Fails for negative values. Zero gives `log = -inf` and NaN passes
    /// through as a NaN log.
    pub fn new(value: f64) -> Result<Self, LogError> {
        if value < 0.0 {
            debug!("rejecting negative logfloat value {}", value);
            return Err(LogError::NegativeValue(value));
        }
        if value == 0.0 {
            return Ok(LogFloat::ZERO);
        }
        Ok(LogFloat(value.ln()))
    }

    /// Create a new logfloat directly from the log of its value
    pub fn from_log(log: f64) -> Self {
        LogFloat(log)
    }

    /// Create a new logfloat from an argument list, the way a binding layer
    /// forwards positional arguments and the `log` keyword.
    ///
    /// No arguments at all gives zero.
    pub fn from_args(args: &[f64], log: Option<f64>) -> Result<Self, LogError> {
        if args.len() > 1 {
            return Err(LogError::TooManyArguments(args.len()));
        }
        match (args.first(), log) {
            (Some(_), Some(_)) => Err(LogError::ConflictingArguments),
            (Some(value), None) => LogFloat::new(*value),
            (None, Some(log)) => Ok(LogFloat::from_log(log)),
            (None, None) => Ok(LogFloat::ZERO),
        }
    }

    /// Get the natural log of the value
    pub fn log(&self) -> f64 {
        self.0
    }

    /// Get the value as f64
    pub fn to_f64(&self) -> f64 {
        self.0.exp()
    }

    /// Get the value truncated toward zero, saturating at the i64 bounds
    pub fn to_i64(&self) -> i64 {
        self.to_f64() as i64
    }

    /// False only for zero. NaN counts as true.
    pub fn to_bool(&self) -> bool {
        self.0 != f64::NEG_INFINITY
    }

    /// Check if the log of the value is NaN
    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    /// Get the real part, which is the value itself
    pub fn re(&self) -> Self {
        *self
    }

    /// Get the imaginary part, always zero
    pub fn im(&self) -> f64 {
        0.0
    }

    /// Get the complex conjugate, which is the value itself
    pub fn conj(&self) -> Self {
        *self
    }

    /// Get the absolute value, which is the value itself
    pub fn abs(&self) -> Self {
        *self
    }

    /// Get 1 / self
    pub fn recip(&self) -> Self {
        LogFloat(-self.0)
    }

    /// Negate. Always fails, zero included.
    pub fn try_neg(&self) -> Result<Self, LogError> {
        debug!("rejecting negation of {}", self);
        Err(LogError::NegativeLogFloat)
    }

    /// Subtract `other`, failing when it is larger than `self`
    pub fn try_sub(&self, other: &LogFloat) -> Result<Self, LogError> {
        if other.0 > self.0 {
            debug!("rejecting {} - {}", self, other);
            return Err(LogError::NegativeDifference);
        }
        Ok(LogFloat(log_sub_exp(self.0, other.0)))
    }

    /// Raise to a real power
    ///
    /// `log = -inf` with exponent 0 gives NaN, as IEEE `-inf * 0` does.
    pub fn powf(&self, exp: f64) -> Self {
        LogFloat(self.0 * exp)
    }

    /// Raise to an integer power
    pub fn powi(&self, exp: i32) -> Self {
        self.powf(exp as f64)
    }

    /// Raise `base` to the power given by the value of `self`
    pub fn rpow(&self, base: &LogFloat) -> Self {
        LogFloat(base.0 * self.to_f64())
    }

    /// Calculate the square
    pub fn square(&self) -> Self {
        self.powf(2.0)
    }

    /// Calculate the square root
    pub fn sqrt(&self) -> Self {
        self.powf(0.5)
    }

    /// Calculate the cube root
    pub fn cbrt(&self) -> Self {
        LogFloat(self.0 / 3.0)
    }

    /// Calculate e**(self)
    pub fn exp(&self) -> Self {
        LogFloat(self.to_f64())
    }

    /// Calculate 2**(self)
    pub fn exp2(&self) -> Self {
        LogFloat(self.to_f64() * core::f64::consts::LN_2)
    }

    fn add_log(&self, other: &LogFloat) -> Self {
        LogFloat(log_add_exp(self.0, other.0))
    }

    fn mul_log(&self, other: &LogFloat) -> Self {
        LogFloat(self.0 + other.0)
    }

    fn div_log(&self, other: &LogFloat) -> Self {
        LogFloat(self.0 - other.0)
    }
}

impl Default for LogFloat {
    fn default() -> Self {
        LogFloat::ZERO
    }
}

impl fmt::Display for LogFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "logfloat(log={})", self.0)
    }
}

impl FromStr for LogFloat {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match repr::parse_logfloat(s)? {
            Parsed::Log(log) => Ok(LogFloat::from_log(log)),
            Parsed::Native(value) => {
                LogFloat::new(value).map_err(|e| SimpleError::new(e.to_string()))
            }
        }
    }
}

// Operators between logfloats
macro_rules! impl_self_math_op(
    ($trt:ident, $mth:ident, $inner:ident, $out:ty) => (
        impl $trt for LogFloat {
            type Output = $out;

            fn $mth(self, other: LogFloat) -> $out {
                self.$inner(&other)
            }
        }

        impl $trt<&LogFloat> for LogFloat {
            type Output = $out;

            fn $mth(self, other: &LogFloat) -> $out {
                self.$inner(other)
            }
        }

        impl $trt<LogFloat> for &LogFloat {
            type Output = $out;

            fn $mth(self, other: LogFloat) -> $out {
                self.$inner(&other)
            }
        }

        impl $trt<&LogFloat> for &LogFloat {
            type Output = $out;

            fn $mth(self, other: &LogFloat) -> $out {
                self.$inner(other)
            }
        }
    );
);

// Operators with a native f64, which is promoted first and may be negative
macro_rules! impl_f64_math_op(
    ($trt:ident, $mth:ident, |$a:ident, $b:ident| $body:expr) => (
        impl $trt<f64> for LogFloat {
            type Output = Result<LogFloat, LogError>;

            fn $mth(self, other: f64) -> Self::Output {
                let ($a, $b) = (self, LogFloat::new(other)?);
                $body
            }
        }

        impl $trt<f64> for &LogFloat {
            type Output = Result<LogFloat, LogError>;

            fn $mth(self, other: f64) -> Self::Output {
                let ($a, $b) = (*self, LogFloat::new(other)?);
                $body
            }
        }

        impl $trt<LogFloat> for f64 {
            type Output = Result<LogFloat, LogError>;

            fn $mth(self, other: LogFloat) -> Self::Output {
                let ($a, $b) = (LogFloat::new(self)?, other);
                $body
            }
        }

        impl $trt<&LogFloat> for f64 {
            type Output = Result<LogFloat, LogError>;

            fn $mth(self, other: &LogFloat) -> Self::Output {
                let ($a, $b) = (LogFloat::new(self)?, *other);
                $body
            }
        }
    );
);

macro_rules! impl_assign_math_op(
    ($trt:ident, $mth:ident, $inner:ident) => (
        impl $trt for LogFloat {
            fn $mth(&mut self, other: LogFloat) {
                *self = self.$inner(&other);
            }
        }

        impl $trt<&LogFloat> for LogFloat {
            fn $mth(&mut self, other: &LogFloat) {
                *self = self.$inner(other);
            }
        }
    );
);

impl_self_math_op!(Add, add, add_log, LogFloat);
impl_self_math_op!(Sub, sub, try_sub, Result<LogFloat, LogError>);
impl_self_math_op!(Mul, mul, mul_log, LogFloat);
impl_self_math_op!(Div, div, div_log, LogFloat);
impl_f64_math_op!(Add, add, |a, b| Ok(a + b));
impl_f64_math_op!(Sub, sub, |a, b| a.try_sub(&b));
impl_f64_math_op!(Mul, mul, |a, b| Ok(a * b));
impl_f64_math_op!(Div, div, |a, b| Ok(a / b));
impl_assign_math_op!(AddAssign, add_assign, add_log);
impl_assign_math_op!(MulAssign, mul_assign, mul_log);
impl_assign_math_op!(DivAssign, div_assign, div_log);

impl Neg for LogFloat {
    type Output = Result<LogFloat, LogError>;

    fn neg(self) -> Self::Output {
        self.try_neg()
    }
}

impl Neg for &LogFloat {
    type Output = Result<LogFloat, LogError>;

    fn neg(self) -> Self::Output {
        self.try_neg()
    }
}

impl Inv for LogFloat {
    type Output = LogFloat;

    fn inv(self) -> LogFloat {
        self.recip()
    }
}

// Implement Pow trait
impl Pow<f64> for LogFloat {
    type Output = LogFloat;

    fn pow(self, exp: f64) -> LogFloat {
        self.powf(exp)
    }
}

impl Pow<f64> for &LogFloat {
    type Output = LogFloat;

    fn pow(self, exp: f64) -> LogFloat {
        self.powf(exp)
    }
}

impl Pow<i32> for LogFloat {
    type Output = LogFloat;

    fn pow(self, exp: i32) -> LogFloat {
        self.powi(exp)
    }
}

impl Pow<i32> for &LogFloat {
    type Output = LogFloat;

    fn pow(self, exp: i32) -> LogFloat {
        self.powi(exp)
    }
}

impl Pow<LogFloat> for LogFloat {
    type Output = LogFloat;

    fn pow(self, exp: LogFloat) -> LogFloat {
        exp.rpow(&self)
    }
}

impl Pow<&LogFloat> for &LogFloat {
    type Output = LogFloat;

    fn pow(self, exp: &LogFloat) -> LogFloat {
        exp.rpow(self)
    }
}

// A native base raised to a logfloat; the base must be nonnegative
impl Pow<LogFloat> for f64 {
    type Output = Result<LogFloat, LogError>;

    fn pow(self, exp: LogFloat) -> Self::Output {
        Ok(exp.rpow(&LogFloat::new(self)?))
    }
}

impl Pow<&LogFloat> for f64 {
    type Output = Result<LogFloat, LogError>;

    fn pow(self, exp: &LogFloat) -> Self::Output {
        Ok(exp.rpow(&LogFloat::new(self)?))
    }
}

impl Zero for LogFloat {
    fn zero() -> Self {
        LogFloat::ZERO
    }

    fn is_zero(&self) -> bool {
        !self.to_bool()
    }
}

impl One for LogFloat {
    fn one() -> Self {
        LogFloat::ONE
    }

    fn is_one(&self) -> bool {
        self.0 == 0.0
    }
}

// Comparison against native values; every logfloat is >= 0
impl PartialEq<f64> for LogFloat {
    fn eq(&self, other: &f64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<f64> for LogFloat {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        if *other < 0.0 {
            if self.0.is_nan() {
                return None;
            }
            return Some(Ordering::Greater);
        }
        self.0.partial_cmp(&other.ln())
    }
}

impl PartialEq<LogFloat> for f64 {
    fn eq(&self, other: &LogFloat) -> bool {
        other == self
    }
}

impl PartialOrd<LogFloat> for f64 {
    fn partial_cmp(&self, other: &LogFloat) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

// Conversion to f64
impl From<LogFloat> for f64 {
    fn from(value: LogFloat) -> f64 {
        value.to_f64()
    }
}

impl From<LogFloat> for bool {
    fn from(value: LogFloat) -> bool {
        value.to_bool()
    }
}

impl From<&LogFloat> for LogFloat {
    fn from(value: &LogFloat) -> Self {
        *value
    }
}

impl TryFrom<f64> for LogFloat {
    type Error = LogError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        LogFloat::new(value)
    }
}

macro_rules! impl_from_unsigned(
    ($($t:ty),*) => ($(
        impl From<$t> for LogFloat {
            fn from(value: $t) -> Self {
                LogFloat((value as f64).ln())
            }
        }
    )*);
);

macro_rules! impl_try_from_signed(
    ($($t:ty),*) => ($(
        impl TryFrom<$t> for LogFloat {
            type Error = LogError;

            fn try_from(value: $t) -> Result<Self, Self::Error> {
                LogFloat::new(value as f64)
            }
        }
    )*);
);

impl_from_unsigned!(u8, u16, u32, u64);
impl_try_from_signed!(i8, i16, i32, i64);

impl Sum for LogFloat {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LogFloat::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a LogFloat> for LogFloat {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(LogFloat::ZERO, |acc, x| acc + x)
    }
}

impl Product for LogFloat {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LogFloat::ONE, |acc, x| acc * x)
    }
}

impl<'a> Product<&'a LogFloat> for LogFloat {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(LogFloat::ONE, |acc, x| acc * x)
    }
}

// Approximate comparison works on the stored logs
impl AbsDiffEq for LogFloat {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0 == other.0 || self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl RelativeEq for LogFloat {
    fn default_max_relative() -> Self::Epsilon {
        f64::EPSILON
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}

impl UlpsEq for LogFloat {
    fn default_max_ulps() -> u32 {
        4
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.0.ulps_eq(&other.0, epsilon, max_ulps)
    }
}

#[cfg(test)]
mod logfloat_tests {
    use super::*;
    use approx::assert_relative_eq;
    use float_cmp::{approx_eq, F64Margin};

    // About 5e-15 relative for values of order one
    const MARGIN: F64Margin = F64Margin {
        epsilon: 0.0,
        ulps: 20,
    };

    #[test]
    fn test_creation() {
        assert_eq!(LogFloat::new(3.0).unwrap().log(), 3.0f64.ln());
        assert_eq!(LogFloat::new(1000.0).unwrap().log(), 1000.0f64.ln());
        assert_eq!(LogFloat::new(0.0).unwrap().log(), f64::NEG_INFINITY);
        assert_eq!(LogFloat::new(0.5).unwrap().log(), 0.5f64.ln());
        assert!(LogFloat::new(f64::NAN).unwrap().is_nan());
        assert_eq!(LogFloat::new(-1.0), Err(LogError::NegativeValue(-1.0)));
    }

    #[test]
    fn test_creation_from_log() {
        for &log in [20000.0, 2.0, 0.9, 0.0, -1.5, -25000.0, 0.25].iter() {
            assert_eq!(LogFloat::from_log(log).log(), log);
        }
        assert_eq!(LogFloat::from_log(f64::INFINITY).log(), f64::INFINITY);
        assert_eq!(LogFloat::from_log(f64::NEG_INFINITY).log(), f64::NEG_INFINITY);
        assert!(LogFloat::from_log(f64::NAN).is_nan());
    }

    #[test]
    fn test_from_args() {
        assert_eq!(LogFloat::from_args(&[], None).unwrap().log(), f64::NEG_INFINITY);
        assert_eq!(LogFloat::from_args(&[], Some(1.5)).unwrap().log(), 1.5);
        assert_eq!(LogFloat::from_args(&[2.0], None).unwrap().log(), 2.0f64.ln());
        assert_eq!(
            LogFloat::from_args(&[3.0], Some(1.5)),
            Err(LogError::ConflictingArguments)
        );
        assert_eq!(
            LogFloat::from_args(&[3.0, 1.5], None),
            Err(LogError::TooManyArguments(2))
        );
        assert_eq!(
            LogFloat::from_args(&[-3.0], None),
            Err(LogError::NegativeValue(-3.0))
        );
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(LogFloat::default().log(), f64::NEG_INFINITY);
        assert!(LogFloat::zero().is_zero());
        assert!(LogFloat::one().is_one());
        assert_eq!(LogFloat::one().to_f64(), 1.0);
    }

    #[test]
    fn test_negate() {
        let x = LogFloat::new(3.0).unwrap();
        assert_eq!(-x, Err(LogError::NegativeLogFloat));
        assert_eq!(-&x, Err(LogError::NegativeLogFloat));
        assert!((-LogFloat::from_log(f64::NAN)).is_err());
        assert_eq!(-LogFloat::ZERO, Err(LogError::NegativeLogFloat));
        assert_eq!(LogFloat::ZERO.try_neg(), Err(LogError::NegativeLogFloat));
    }

    #[test]
    fn test_abs_conj_parts() {
        let x = LogFloat::new(3.0).unwrap();
        assert_eq!(x.abs().log(), x.log());
        assert_eq!(x.conj().log(), x.log());
        assert_eq!(x.re(), x);
        assert_eq!(x.im(), 0.0);
    }

    #[test]
    fn test_bool() {
        assert!(LogFloat::from_log(99.0).to_bool());
        assert!(LogFloat::from_log(0.0).to_bool());
        assert!(LogFloat::from_log(-10.0).to_bool());
        assert!(LogFloat::from_log(f64::NAN).to_bool());
        assert!(!LogFloat::from_log(f64::NEG_INFINITY).to_bool());
        assert!(!bool::from(LogFloat::new(0.0).unwrap()));
        assert!(bool::from(LogFloat::new(2.0).unwrap()));
    }

    #[test]
    fn test_add() {
        let x = LogFloat::new(3.0).unwrap();
        let y = LogFloat::new(4.0).unwrap();
        let z = x + y;
        let naive = (x.log().exp() + y.log().exp()).ln();
        assert!(approx_eq!(f64, z.log(), naive, MARGIN));
        assert!(approx_eq!(f64, (&x + &y).log(), naive, MARGIN));
    }

    #[test]
    fn test_add_extreme() {
        let x = LogFloat::from_log(-1200.0);
        let y = LogFloat::from_log(-1210.0);
        assert!(approx_eq!(f64, (x + y).log(), -1199.9999546011009, MARGIN));

        let x = LogFloat::from_log(-200.0);
        let z = (x + 1.0).unwrap();
        assert!(approx_eq!(f64, z.log(), 1.3838965267367376e-87, MARGIN));
    }

    #[test]
    fn test_add_nan_with_infinity() {
        let inf = LogFloat::from_log(f64::INFINITY);
        assert!((inf + LogFloat::NAN).is_nan());
        assert!((LogFloat::NAN + inf).is_nan());
        assert!((LogFloat::ZERO + LogFloat::NAN).is_nan());
    }

    #[test]
    fn test_add_zeros() {
        let z = LogFloat::ZERO + LogFloat::ZERO;
        assert_eq!(z.log(), f64::NEG_INFINITY);
        let x = LogFloat::from_log(-3.5);
        assert_eq!((x + LogFloat::ZERO).log(), -3.5);
    }

    #[test]
    fn test_subtract() {
        let x = LogFloat::new(5.0).unwrap();
        let y = LogFloat::new(0.25).unwrap();
        let z = (x - y).unwrap();
        let naive = (x.log().exp() - y.log().exp()).ln();
        assert!(approx_eq!(f64, z.log(), naive, MARGIN));
    }

    #[test]
    fn test_subtract_extreme() {
        let x = LogFloat::from_log(-1200.0);
        let y = LogFloat::from_log(-1210.0);
        assert!(approx_eq!(f64, (x - y).unwrap().log(), -1200.0000454009603, MARGIN));

        let x = LogFloat::from_log(-200.0);
        let z = (1.0 - x).unwrap();
        assert!(approx_eq!(f64, z.log(), -1.3838965267367376e-87, MARGIN));
    }

    #[test]
    fn test_subtract_equal_is_zero() {
        let x = LogFloat::new(7.0).unwrap();
        assert_eq!((x - x).unwrap().log(), f64::NEG_INFINITY);
        assert_eq!((LogFloat::ZERO - LogFloat::ZERO).unwrap().log(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_invalid_subtract() {
        let x = LogFloat::new(3.0).unwrap();
        let y = LogFloat::new(5.0).unwrap();
        let err = (x - y).unwrap_err();
        assert!(err.is_domain_error());
        assert_eq!(err, LogError::NegativeDifference);
        assert_eq!(x - 5.0, Err(LogError::NegativeDifference));
    }

    #[test]
    fn test_negative_native_operand() {
        let x = LogFloat::new(3.0).unwrap();
        assert_eq!(x + -1.0, Err(LogError::NegativeValue(-1.0)));
        assert_eq!(-2.0 * x, Err(LogError::NegativeValue(-2.0)));
    }

    #[test]
    fn test_multiply_divide() {
        let x = LogFloat::from_log(-20.0);
        let y = LogFloat::from_log(123.5);
        assert_eq!((x * y).log(), -20.0 + 123.5);
        assert_eq!((x / y).log(), -20.0 - 123.5);
        assert_eq!(x.recip().log(), 20.0);
        assert_eq!(x.inv().log(), 20.0);
    }

    #[test]
    fn test_basic_binary_ops() {
        let x = LogFloat::new(3.0).unwrap();
        let y = LogFloat::new(2.0).unwrap();
        assert!(approx_eq!(f64, (x + y).to_f64(), 5.0, MARGIN));
        assert!(approx_eq!(f64, (x - y).unwrap().to_f64(), 1.0, MARGIN));
        assert!(approx_eq!(f64, (x * y).to_f64(), 6.0, MARGIN));
        assert!(approx_eq!(f64, (x / y).to_f64(), 1.5, MARGIN));
        assert!(approx_eq!(f64, x.pow(y).to_f64(), 9.0, MARGIN));
    }

    #[test]
    fn test_basic_binary_ops_extreme() {
        let x = LogFloat::from_log(-1000.0);
        let y = LogFloat::from_log(-1002.5);
        assert!(approx_eq!(f64, (x + y).log(), -999.9211102657074, MARGIN));
        assert!(approx_eq!(f64, (x - y).unwrap().log(), -1000.085650483742, MARGIN));
        assert_eq!((x * y).log(), -2002.5);
        assert_eq!((x / y).log(), 2.5);
        assert_eq!(x.pow(y).log(), 0.0);
    }

    #[test]
    fn test_assignment_operators() {
        let mut x = LogFloat::new(5.0).unwrap();
        x += LogFloat::new(3.0).unwrap();
        assert!(approx_eq!(f64, x.to_f64(), 8.0, MARGIN));
        x *= LogFloat::new(2.0).unwrap();
        assert!(approx_eq!(f64, x.to_f64(), 16.0, MARGIN));
        x /= &LogFloat::new(4.0).unwrap();
        assert!(approx_eq!(f64, x.to_f64(), 4.0, MARGIN));
    }

    #[test]
    fn test_power() {
        let x = LogFloat::from_log(2.0);
        assert_eq!(x.powi(3).log(), 6.0);
        assert_eq!(x.pow(3.0f64).log(), 6.0);
        assert_eq!(x.pow(3i32).log(), 6.0);
        assert_eq!(x.square().log(), 4.0);
        assert_eq!(x.sqrt().log(), 1.0);
        assert!(LogFloat::ZERO.powf(0.0).is_nan());
    }

    #[test]
    fn test_reverse_power() {
        let x = LogFloat::new(4.0).unwrap();
        let z = 3.0f64.pow(x).unwrap();
        assert!(approx_eq!(f64, z.log(), 4.0 * 3.0f64.ln(), MARGIN));
        assert_eq!((-3.0f64).pow(x), Err(LogError::NegativeValue(-3.0)));
    }

    #[test]
    fn test_power_extreme() {
        let x = LogFloat::from_log(-750.0);
        let y = LogFloat::from_log(-100.0);
        assert!(approx_eq!(f64, x.pow(y).log(), -2.790056982015627e-41, MARGIN));

        let x = LogFloat::from_log(800.0);
        let y = LogFloat::new(500.0).unwrap();
        assert_relative_eq!(x.pow(y).log(), 400000.0, max_relative = 1e-13);
    }

    #[test]
    fn test_power_shortcuts() {
        let x = LogFloat::new(2.0).unwrap();
        assert!(approx_eq!(f64, x.cbrt().to_f64(), 2.0f64.cbrt(), MARGIN));
        assert!(approx_eq!(f64, x.exp().to_f64(), 2.0f64.exp(), MARGIN));
        assert!(approx_eq!(f64, x.exp2().to_f64(), 4.0, MARGIN));
    }

    #[test]
    fn test_comparison() {
        let x = LogFloat::new(4.0).unwrap();
        for &v in [3.0, 4.0, 5.0].iter() {
            let lv = LogFloat::new(v).unwrap();
            assert_eq!(x < v, 4.0 < v);
            assert_eq!(x <= v, 4.0 <= v);
            assert_eq!(x == v, 4.0 == v);
            assert_eq!(x > v, 4.0 > v);
            assert_eq!(v < x, v < 4.0);
            assert_eq!(v >= x, v >= 4.0);
            assert_eq!(x < lv, 4.0 < v);
            assert_eq!(x == lv, 4.0 == v);
            assert_eq!(x >= lv, 4.0 >= v);
        }
        assert!(x > -1.0);
        assert!(LogFloat::ZERO > -1.0);
        assert!(LogFloat::ZERO == 0.0);
        assert!(LogFloat::NAN.partial_cmp(&-1.0).is_none());
    }

    #[test]
    fn test_conversions() {
        assert!(approx_eq!(f64, f64::from(LogFloat::new(10.0).unwrap()), 10.0, MARGIN));
        assert_eq!(LogFloat::from(0u32).log(), f64::NEG_INFINITY);
        assert_eq!(LogFloat::from(125u64).log(), 125.0f64.ln());
        assert_eq!(LogFloat::try_from(50i32).unwrap().log(), 50.0f64.ln());
        assert_eq!(LogFloat::try_from(-1i64), Err(LogError::NegativeValue(-1.0)));
        assert_eq!(LogFloat::try_from(2.5f64).unwrap().log(), 2.5f64.ln());
        assert_eq!(LogFloat::new(7.9).unwrap().to_i64(), 7);
        assert_eq!(LogFloat::from_log(1000.0).to_i64(), i64::MAX);
    }

    #[test]
    fn test_display_and_parse() {
        let x = LogFloat::from_log(-1.5);
        assert_eq!(x.to_string(), "logfloat(log=-1.5)");
        assert_eq!("logfloat(log=-1.5)".parse::<LogFloat>().unwrap(), x);
        assert_eq!(LogFloat::ZERO.to_string(), "logfloat(log=-inf)");
        assert_eq!(
            LogFloat::ZERO.to_string().parse::<LogFloat>().unwrap().log(),
            f64::NEG_INFINITY
        );
        assert_eq!("2".parse::<LogFloat>().unwrap().log(), 2.0f64.ln());
        assert!("-2".parse::<LogFloat>().is_err());
        assert!("logfloat(2)".parse::<LogFloat>().is_err());
    }

    #[test]
    fn test_sum_product() {
        let values: Vec<LogFloat> = (1..=4u32).map(LogFloat::from).collect();
        let total: LogFloat = values.iter().sum();
        assert!(approx_eq!(f64, total.to_f64(), 10.0, MARGIN));
        let product: LogFloat = values.into_iter().product();
        assert!(approx_eq!(f64, product.to_f64(), 24.0, MARGIN));
        let empty: Vec<LogFloat> = Vec::new();
        assert_eq!(empty.iter().sum::<LogFloat>().log(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_many_small_factors() {
        // 2000 factors of 1e-300 underflow as f64 but not as logs
        let p = LogFloat::new(1e-300).unwrap();
        let product: LogFloat = std::iter::repeat(p).take(2000).product();
        assert_relative_eq!(product.log(), 2000.0 * 1e-300f64.ln(), max_relative = 1e-12);
        assert!(product.to_bool());
    }

    #[test]
    fn test_approx_traits() {
        let x = LogFloat::from_log(1.0);
        let y = LogFloat::from_log(1.0 + 1e-15);
        assert_relative_eq!(x, y, max_relative = 1e-14);
        assert!(LogFloat::ZERO.abs_diff_eq(&LogFloat::ZERO, 0.0));
        assert!(LogFloat::ZERO.ulps_eq(&LogFloat::ZERO, 0.0, 0));
    }
}
