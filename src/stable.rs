//! Numerically stable combination of log-domain magnitudes.
//!
//! Every routine here factors out the dominant operand before exponentiating,
//! so the only `exp` ever evaluated has an argument `<= 0` and cannot
//! overflow. The small correction term is then folded back through `ln_1p` or
//! `exp_m1`, which keeps full precision when one operand dominates.
//!
//! Complex log-values are passed as `Complex64` where `re` is the log of the
//! magnitude and `im` is the phase in radians.

use core::f64::consts::{LN_2, PI, TAU};
use num_complex::Complex64;

/// Reduce an angle in radians into the principal range `(-π, π]`.
///
/// `theta % TAU` is exact, and the correction by `TAU` only happens when the
/// remainder lies within a factor of two of `TAU`, so it is exact too.
/// Non-finite input gives NaN.
#[inline]
pub fn wrap_phase(theta: f64) -> f64 {
    let r = theta % TAU;
    if r > PI {
        r - TAU
    } else if r <= -PI {
        r + TAU
    } else {
        r
    }
}

/// Compute `ln(1 - exp(d))` for `d <= 0`.
///
/// Switches between the `exp_m1` and `ln_1p` forms at `-ln 2`.
#[inline]
pub fn ln_1m_exp(d: f64) -> f64 {
    if d > -LN_2 {
        (-d.exp_m1()).ln()
    } else {
        (-d.exp()).ln_1p()
    }
}

/// Compute `ln(exp(log1) + exp(log2))`.
///
/// A NaN on either side gives NaN, whatever the other operand is.
#[inline]
pub fn log_add_exp(log1: f64, log2: f64) -> f64 {
    if log1.is_nan() || log2.is_nan() {
        return f64::NAN;
    }
    let (hi, lo) = if log1 < log2 { (log2, log1) } else { (log1, log2) };
    if lo == f64::NEG_INFINITY || hi == f64::INFINITY {
        return hi;
    }
    hi + (lo - hi).exp().ln_1p()
}

/// Compute `ln(exp(log1) - exp(log2))`.
///
/// The difference is negative when `log2 > log1`, and NaN is returned.
#[inline]
pub fn log_sub_exp(log1: f64, log2: f64) -> f64 {
    if log1 < log2 {
        return f64::NAN;
    }
    if log2 == f64::NEG_INFINITY {
        return log1;
    }
    if log1 == log2 {
        return if log1 == f64::INFINITY {
            f64::NAN
        } else {
            f64::NEG_INFINITY
        };
    }
    log1 + ln_1m_exp(log2 - log1)
}

/// Negate a complex log-value: the phase moves by `π`.
#[inline]
pub fn phasor_neg(z: Complex64) -> Complex64 {
    Complex64::new(z.re, wrap_phase(z.im + PI))
}

/// Compute `ln(exp(z1) + exp(z2))` for complex log-values.
///
/// With `s = |exp(z2)| / |exp(z1)| <= 1` after reordering, the squared modulus
/// of the sum relative to `|exp(z1)|^2` is `1 + s(s + 2cos(θ1 - θ2))` by the law
/// of cosines. The returned phase comes straight from `atan2` and is in
/// `[-π, π]`.
pub fn phasor_add(z1: Complex64, z2: Complex64) -> Complex64 {
    let (big, small) = if z1.re < z2.re { (z2, z1) } else { (z1, z2) };
    if small.re == f64::NEG_INFINITY {
        return big;
    }
    let s = (small.re - big.re).exp();
    let log_r = big.re + 0.5 * (s * (s + 2.0 * (big.im - small.im).cos())).ln_1p();
    let (sin1, cos1) = big.im.sin_cos();
    let (sin2, cos2) = small.im.sin_cos();
    let theta = (sin1 + s * sin2).atan2(cos1 + s * cos2);
    Complex64::new(log_r, theta)
}

/// Compute `ln(exp(z1) - exp(z2))` for complex log-values.
///
/// When the operands are swapped to put the larger modulus first, the
/// difference changes sign, which is carried into both `atan2` arguments.
pub fn phasor_sub(z1: Complex64, z2: Complex64) -> Complex64 {
    let (big, small, sgn) = if z1.re < z2.re {
        (z2, z1, -1.0)
    } else {
        (z1, z2, 1.0)
    };
    if small.re == f64::NEG_INFINITY {
        return if sgn < 0.0 { phasor_neg(big) } else { big };
    }
    let s = (small.re - big.re).exp();
    let log_r = big.re + 0.5 * (s * (s - 2.0 * (big.im - small.im).cos())).ln_1p();
    let (sin1, cos1) = big.im.sin_cos();
    let (sin2, cos2) = small.im.sin_cos();
    let theta = (sgn * (sin1 - s * sin2)).atan2(sgn * (cos1 - s * cos2));
    Complex64::new(log_r, theta)
}
