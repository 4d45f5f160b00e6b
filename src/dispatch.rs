//! Binary operators over dynamically typed operands.
//!
//! A binding layer that only knows it holds "some number" wraps it in an
//! [`Operand`] and calls [`binary`]. The left operand gets the first chance to
//! handle the operation; if it declines, the right operand is asked for the
//! reflected operation. Only when both decline is the pair rejected with
//! [`LogError::UnsupportedOperand`]. Declining is not an error: a type that
//! cannot coerce the other operand answers [`Dispatch::NotApplicable`].

use crate::error::LogError;
use crate::logcomplex::LogComplex;
use crate::logfloat::LogFloat;
use log::trace;
use num_complex::Complex64;
use num_traits::Pow;
use std::fmt;

/// A dynamically typed numeric operand
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Int(i64),
    Float(f64),
    Complex(Complex64),
    LogFloat(LogFloat),
    LogComplex(LogComplex),
    Text(String),
}

impl Operand {
    /// Get the native real value, if the operand has one
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Operand::Int(i) => Some(*i as f64),
            Operand::Float(x) => Some(*x),
            Operand::LogFloat(x) => Some(x.to_f64()),
            _ => None,
        }
    }

    /// Get the native complex value, if the operand has one
    pub fn to_c64(&self) -> Option<Complex64> {
        match self {
            Operand::Complex(z) => Some(*z),
            Operand::LogComplex(z) => Some(z.to_c64()),
            _ => self.to_f64().map(|x| Complex64::new(x, 0.0)),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Int(_) => "int",
            Operand::Float(_) => "float",
            Operand::Complex(_) => "complex",
            Operand::LogFloat(_) => "logfloat",
            Operand::LogComplex(_) => "logcomplex",
            Operand::Text(_) => "str",
        }
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

impl From<Complex64> for Operand {
    fn from(value: Complex64) -> Self {
        Operand::Complex(value)
    }
}

impl From<LogFloat> for Operand {
    fn from(value: LogFloat) -> Self {
        Operand::LogFloat(value)
    }
}

impl From<LogComplex> for Operand {
    fn from(value: LogComplex) -> Self {
        Operand::LogComplex(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        };
        write!(f, "{}", symbol)
    }
}

/// Outcome of offering an operation to one operand
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch<T> {
    Applied(T),
    NotApplicable,
}

impl<T> Dispatch<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Dispatch::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Dispatch::Applied(value) => Some(value),
            Dispatch::NotApplicable => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Dispatch<U> {
        match self {
            Dispatch::Applied(value) => Dispatch::Applied(f(value)),
            Dispatch::NotApplicable => Dispatch::NotApplicable,
        }
    }
}

/// A log-domain type that takes part in operand dispatch
pub trait LogDomain: Copy + Into<Operand> {
    /// Try to coerce an operand into `Self`
    fn coerce(operand: &Operand) -> Result<Dispatch<Self>, LogError>;

    /// Combine two values of this type
    fn apply(self, op: BinaryOp, other: Self) -> Result<Self, LogError>;

    /// `self ** exponent` for a native exponent, which is not coerced
    fn raise(self, exponent: &Operand) -> Dispatch<Self>;

    /// Compute `self op rhs`
    fn forward(self, op: BinaryOp, rhs: &Operand) -> Result<Dispatch<Operand>, LogError> {
        if op == BinaryOp::Pow {
            return Ok(self.raise(rhs).map(Into::into));
        }
        match Self::coerce(rhs)? {
            Dispatch::Applied(other) => Ok(Dispatch::Applied(self.apply(op, other)?.into())),
            Dispatch::NotApplicable => Ok(Dispatch::NotApplicable),
        }
    }

    /// Compute `lhs op self`
    fn reflected(self, op: BinaryOp, lhs: &Operand) -> Result<Dispatch<Operand>, LogError> {
        match Self::coerce(lhs)? {
            Dispatch::Applied(other) => Ok(Dispatch::Applied(other.apply(op, self)?.into())),
            Dispatch::NotApplicable => Ok(Dispatch::NotApplicable),
        }
    }
}

impl LogDomain for LogFloat {
    fn coerce(operand: &Operand) -> Result<Dispatch<Self>, LogError> {
        match operand {
            Operand::LogFloat(x) => Ok(Dispatch::Applied(*x)),
            Operand::Int(_) | Operand::Float(_) => match operand.to_f64() {
                Some(value) => LogFloat::new(value).map(Dispatch::Applied),
                None => Ok(Dispatch::NotApplicable),
            },
            _ => Ok(Dispatch::NotApplicable),
        }
    }

    fn apply(self, op: BinaryOp, other: Self) -> Result<Self, LogError> {
        match op {
            BinaryOp::Add => Ok(self + other),
            BinaryOp::Sub => self - other,
            BinaryOp::Mul => Ok(self * other),
            BinaryOp::Div => Ok(self / other),
            BinaryOp::Pow => Ok(self.pow(other)),
        }
    }

    fn raise(self, exponent: &Operand) -> Dispatch<Self> {
        match exponent.to_f64() {
            Some(exp) => Dispatch::Applied(self.powf(exp)),
            None => Dispatch::NotApplicable,
        }
    }
}

impl LogDomain for LogComplex {
    fn coerce(operand: &Operand) -> Result<Dispatch<Self>, LogError> {
        Ok(match operand {
            Operand::LogComplex(z) => Dispatch::Applied(*z),
            Operand::LogFloat(x) => Dispatch::Applied(LogComplex::from(*x)),
            Operand::Text(_) => Dispatch::NotApplicable,
            _ => match operand.to_c64() {
                Some(z) => Dispatch::Applied(LogComplex::new(z)),
                None => Dispatch::NotApplicable,
            },
        })
    }

    fn apply(self, op: BinaryOp, other: Self) -> Result<Self, LogError> {
        Ok(match op {
            BinaryOp::Add => self + other,
            BinaryOp::Sub => self - other,
            BinaryOp::Mul => self * other,
            BinaryOp::Div => self / other,
            BinaryOp::Pow => self.pow(other),
        })
    }

    fn raise(self, exponent: &Operand) -> Dispatch<Self> {
        match exponent.to_c64() {
            Some(exp) => Dispatch::Applied(self.powc(exp)),
            None => Dispatch::NotApplicable,
        }
    }
}

fn forward(lhs: &Operand, op: BinaryOp, rhs: &Operand) -> Result<Dispatch<Operand>, LogError> {
    match lhs {
        Operand::LogFloat(x) => x.forward(op, rhs),
        Operand::LogComplex(z) => z.forward(op, rhs),
        _ => Ok(Dispatch::NotApplicable),
    }
}

fn reflected(lhs: &Operand, op: BinaryOp, rhs: &Operand) -> Result<Dispatch<Operand>, LogError> {
    match rhs {
        Operand::LogFloat(x) => x.reflected(op, lhs),
        Operand::LogComplex(z) => z.reflected(op, lhs),
        _ => Ok(Dispatch::NotApplicable),
    }
}

/// Evaluate `lhs op rhs`, trying the forward operator and then the reflected one
pub fn binary(lhs: &Operand, op: BinaryOp, rhs: &Operand) -> Result<Operand, LogError> {
    if let Dispatch::Applied(result) = forward(lhs, op, rhs)? {
        return Ok(result);
    }
    trace!(
        "{} {} {}: forward operator declined",
        lhs.type_name(),
        op,
        rhs.type_name()
    );

    if let Dispatch::Applied(result) = reflected(lhs, op, rhs)? {
        return Ok(result);
    }
    trace!(
        "{} {} {}: reflected operator declined",
        lhs.type_name(),
        op,
        rhs.type_name()
    );

    Err(LogError::UnsupportedOperand(format!(
        "'{}' {} '{}'",
        lhs.type_name(),
        op,
        rhs.type_name()
    )))
}
