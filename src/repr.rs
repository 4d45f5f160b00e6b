//! Text representation shared by the log-domain types.
//!
//! `LogFloat` renders as `logfloat(log=-1.5)` and `LogComplex` as
//! `logcomplex(logz=(-1.5+0.25j))`. Parsing accepts those forms and also a bare
//! native literal (`2.5`, `3-4j`, `4j`), which goes through the ordinary
//! value constructor.

use num_complex::Complex64;
use regex::Regex;
use simple_error::{bail, SimpleError};
use std::fmt;
use std::sync::OnceLock;

const FLOAT: &str = r"[-+]?(?:(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?|inf|infinity|nan)";
const UFLOAT: &str = r"(?:(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?|inf|infinity|nan)";

/// What a parsed string asks for: a log-domain value or a native value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Parsed<T> {
    Log(T),
    Native(T),
}

fn compile(
    cell: &'static OnceLock<Regex>,
    pattern: impl FnOnce() -> String,
) -> Result<&'static Regex, SimpleError> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(&pattern()).map_err(|e| SimpleError::new(e.to_string()))?;
    Ok(cell.get_or_init(|| re))
}

fn parse_f64(text: &str) -> Result<f64, SimpleError> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned
        .parse::<f64>()
        .map_err(|e| SimpleError::new(format!("invalid float '{}': {}", text, e)))
}

// A lone imaginary literal such as `4j` or `-0.25j` is tried before `re±imj`
fn complex_pattern() -> String {
    format!(
        r"(?:(?<imonly>{})j|(?<re>{})(?:\s*(?<sign>[-+])\s*(?<im>{})j)?)",
        FLOAT, FLOAT, UFLOAT
    )
}

fn complex_from_captures(caps: &regex::Captures) -> Result<Complex64, SimpleError> {
    if let Some(m) = caps.name("imonly") {
        return Ok(Complex64::new(0.0, parse_f64(m.as_str())?));
    }
    let re = match caps.name("re") {
        Some(m) => parse_f64(m.as_str())?,
        None => bail!("missing real part"),
    };
    let im = match (caps.name("sign"), caps.name("im")) {
        (Some(sign), Some(m)) => {
            let magnitude = parse_f64(m.as_str())?;
            if sign.as_str() == "-" {
                -magnitude
            } else {
                magnitude
            }
        }
        _ => 0.0,
    };
    Ok(Complex64::new(re, im))
}

/// Parse `logfloat(log=<float>)` or a bare real literal
pub fn parse_logfloat(text: &str) -> Result<Parsed<f64>, SimpleError> {
    static TAGGED: OnceLock<Regex> = OnceLock::new();
    static BARE: OnceLock<Regex> = OnceLock::new();

    let tagged = compile(&TAGGED, || {
        format!(r"(?i)^\s*logfloat\(\s*log\s*=\s*(?<log>{})\s*\)\s*$", FLOAT)
    })?;
    if let Some(caps) = tagged.captures(text) {
        return match caps.name("log") {
            Some(m) => Ok(Parsed::Log(parse_f64(m.as_str())?)),
            None => bail!("missing log value"),
        };
    }

    let bare = compile(&BARE, || format!(r"(?i)^\s*(?<value>{})\s*$", FLOAT))?;
    match bare.captures(text).and_then(|caps| caps.name("value")) {
        Some(m) => Ok(Parsed::Native(parse_f64(m.as_str())?)),
        None => bail!("string not recognized as a logfloat"),
    }
}

/// Parse `logcomplex(logz=(<re>±<im>j))` or a bare complex literal
pub fn parse_logcomplex(text: &str) -> Result<Parsed<Complex64>, SimpleError> {
    static TAGGED: OnceLock<Regex> = OnceLock::new();
    static BARE: OnceLock<Regex> = OnceLock::new();

    let tagged = compile(&TAGGED, || {
        format!(
            r"(?i)^\s*logcomplex\(\s*logz\s*=\s*\(?\s*{}\s*\)?\s*\)\s*$",
            complex_pattern()
        )
    })?;
    if let Some(caps) = tagged.captures(text) {
        return Ok(Parsed::Log(complex_from_captures(&caps)?));
    }

    let bare = compile(&BARE, || {
        format!(r"(?i)^\s*\(?\s*{}\s*\)?\s*$", complex_pattern())
    })?;
    match bare.captures(text) {
        Some(caps) => Ok(Parsed::Native(complex_from_captures(&caps)?)),
        None => bail!("string not recognized as a logcomplex"),
    }
}

/// Write a complex number as `(re±imj)`
pub fn fmt_complex(z: &Complex64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if z.im.is_sign_negative() && !z.im.is_nan() {
        write!(f, "({}-{}j)", z.re, -z.im)
    } else {
        write!(f, "({}+{}j)", z.re, z.im)
    }
}
