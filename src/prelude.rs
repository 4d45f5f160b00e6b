//! logtypes prelude.
//!
//! This module contains the most used types and traits, which you can import
//! easily as a group.
//!
//! ```
//! use logtypes::prelude::*;
//!
//! let x = LogFloat::from_log(-1000.0);
//! assert_eq!((x * x).log(), -2000.0);
//! ```

#[doc(no_inline)]
pub use crate::dispatch::{binary, BinaryOp, Dispatch, LogDomain, Operand};

#[doc(no_inline)]
pub use crate::error::{ErrorKind, LogError};

#[doc(no_inline)]
pub use crate::logcomplex::LogComplex;
#[doc(no_inline)]
pub use crate::logfloat::LogFloat;

#[doc(no_inline)]
pub use num_complex::Complex64;
#[doc(no_inline)]
pub use num_traits::{Inv, One, Pow, Zero};
