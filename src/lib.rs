//! Real and complex scalars stored in the log domain.
//!
//! [`LogFloat`] holds a nonnegative real number as `ln(x)` and [`LogComplex`]
//! holds a complex number as `ln(|z|) + i·arg(z)`. Products and powers of
//! values far outside the range of `f64` stay exact in the log domain, and
//! sums and differences are rebuilt with the routines in [`stable`].
//!
//! ```
//! use logtypes::prelude::*;
//!
//! let p = LogFloat::new(1e-300).unwrap();
//! let tiny: LogFloat = std::iter::repeat(p).take(10).product();
//! assert!(tiny.to_bool());
//! assert_eq!(tiny.to_f64(), 0.0);
//! ```
pub mod dispatch;
pub mod error;
pub mod logcomplex;
pub mod logfloat;
pub mod prelude;
pub mod repr;
pub mod stable;

pub use crate::error::{ErrorKind, LogError};
pub use crate::logcomplex::LogComplex;
pub use crate::logfloat::LogFloat;
