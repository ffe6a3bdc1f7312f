//! Deterministic constant slot naming.
//!
//! Every literal constant the backend caches gets a C++ slot, and that slot
//! needs a name that is (a) a valid identifier fragment, (b) unique per
//! distinct constant, and (c) byte-identical across runs and platforms:
//! the constant table pairs names with values in a separate link step and
//! depends on exact reproduction, not just uniqueness.
//!
//! [`namify`] dispatches on the constant kind. Numeric and boolean constants
//! render directly; string constants go through [`namify_string`], which
//! keeps short, identifier-safe content verbatim for readability (`plain_`,
//! `angle_`) and digests everything else with MD5 (`digest_`). The readable
//! paths only admit inputs whose original content is recoverable from the
//! output, so they cannot collide; digest paths rely on MD5 for practical
//! collision avoidance.
//!
//! Booleans get their own arm ahead of the integers: in the source language
//! `bool` is an `int` subtype, and folding the two together would name
//! `True` and `1` identically.

use std::sync::LazyLock;

use num_bigint::{BigInt, Sign};
use regex::bytes::Regex;
use thiserror::Error;
use tracing::{debug, trace};

/// A literal constant value from the frontend.
///
/// Covers every kind the constant cache can hold. `None` and `Ellipsis`
/// reach the backend but have no naming rule yet; [`namify`] reports them
/// as [`NamifyError::Unnameable`].
#[derive(Clone, Debug, PartialEq)]
pub enum Const {
    Bool(bool),
    /// Machine-width integer.
    Int(i64),
    /// Arbitrary-precision integer. Named under a separate `long_` family so
    /// it never collides with an `Int` of equal value.
    BigInt(BigInt),
    /// Byte string, exact content.
    Bytes(Vec<u8>),
    /// Unicode string.
    Str(String),
    Float(f64),
    Complex { re: f64, im: f64 },
    None,
    Ellipsis,
}

/// Raised when a constant kind has no naming rule.
///
/// Fatal to the emission step: it means the frontend emitted a constant
/// kind the backend does not cover yet, not a transient condition.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NamifyError {
    #[error("cannot derive a constant slot name for `{0}`")]
    Unnameable(String),
}

/// Bytes that may appear verbatim in a slot name: `[A-Za-z0-9_]`, at most 40
/// of them. Anything longer or wider is digested instead.
#[expect(
    clippy::unwrap_used,
    reason = "the pattern is a literal, validated by every namify test"
)]
static PLAIN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,40}$").unwrap());

/// Map a literal constant to its canonical slot-name fragment.
///
/// Pure and deterministic: identical input yields byte-identical output
/// across runs and platforms.
pub fn namify(constant: &Const) -> Result<String, NamifyError> {
    match constant {
        Const::Bool(true) => Ok("bool_True".to_owned()),
        Const::Bool(false) => Ok("bool_False".to_owned()),
        Const::Int(0) => Ok("int_0".to_owned()),
        Const::Int(value) if *value > 0 => Ok(format!("int_pos_{value}")),
        Const::Int(value) => Ok(format!("int_neg_{}", value.unsigned_abs())),
        Const::BigInt(value) => Ok(match value.sign() {
            Sign::NoSign => "long_0".to_owned(),
            Sign::Plus => format!("long_pos_{value}"),
            Sign::Minus => format!("long_neg_{}", value.magnitude()),
        }),
        Const::Bytes(bytes) => Ok(format!("str_{}", namify_string(bytes))),
        Const::Str(value) => {
            if value.is_ascii() {
                Ok(format!("unicode_{}", namify_string(value.as_bytes())))
            } else {
                // Never take the readable path on non-ASCII content; the
                // name must stay portable source text.
                trace!(len = value.len(), "non-ASCII string constant, digesting");
                Ok(format!("unicode_digest_{}", digest(value.as_bytes())))
            }
        }
        Const::Float(value) => Ok(format!("float_{}", float_tail(*value))),
        Const::Complex { re, im } => Ok(format!("complex_{}", complex_tail(*re, *im))),
        Const::None | Const::Ellipsis => {
            debug!(?constant, "constant kind has no naming rule");
            Err(NamifyError::Unnameable(format!("{constant:?}")))
        }
    }
}

/// Name a narrow string's exact byte content.
///
/// Short identifier-safe strings stay readable (`plain_`), synthetic names
/// like `<module>` keep their interior (`angle_`), and everything else gets
/// a fixed-width MD5 digest (`digest_`).
fn namify_string(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        "empty".to_owned()
    } else if PLAIN_NAME.is_match(bytes) {
        format!("plain_{}", String::from_utf8_lossy(bytes))
    } else if bytes.len() >= 3
        && bytes[0] == b'<'
        && bytes[bytes.len() - 1] == b'>'
        && PLAIN_NAME.is_match(&bytes[1..bytes.len() - 1])
    {
        format!("angle_{}", String::from_utf8_lossy(&bytes[1..bytes.len() - 1]))
    } else {
        trace!(len = bytes.len(), "string constant not identifier-safe, digesting");
        format!("digest_{}", digest(bytes))
    }
}

/// MD5 of the exact byte content, as 32 lowercase hex digits.
fn digest(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

/// Identifier tail for a float: shortest round-trip decimal with `.` as `_`
/// and `-` as `_minus_` (covers both the leading sign and a negative
/// exponent).
fn float_tail(value: f64) -> String {
    value
        .to_string()
        .replace('.', "_")
        .replace('-', "_minus_")
        .replace('+', "")
}

/// Identifier tail for a complex literal: `<re>+<im>j` (or `-` for a
/// negative imaginary part) with `+` as `p`, `-` as `m`, `.` as `_`.
fn complex_tail(re: f64, im: f64) -> String {
    let canonical = if im.is_sign_negative() {
        format!("{re}-{}j", -im)
    } else {
        format!("{re}+{im}j")
    };
    canonical
        .replace('+', "p")
        .replace('-', "m")
        .replace('.', "_")
}

#[cfg(test)]
mod tests;
