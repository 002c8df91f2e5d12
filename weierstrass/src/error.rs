//! Error type

use core::fmt::{self, Display};

/// Result type with the `weierstrass` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Curve arithmetic and encoding errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Coordinates are not field elements or do not satisfy the curve
    /// equation.
    InvalidCurvePoint,

    /// Operands belong to different curve parameter sets.
    DomainMismatch,

    /// Value has no inverse modulo the given modulus.
    NotInvertible,

    /// No x-offset within [`MAX_X_OFFSET`](crate::MAX_X_OFFSET) maps the
    /// value onto the curve.
    PointEncodingExhausted,

    /// Malformed point encoding: unknown tag, wrong length, or an attempt
    /// to encode the point at infinity.
    InvalidEncoding,

    /// Curve parameters unsupported by this crate.
    InvalidParameters,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidCurvePoint => "point is not on the curve",
            Error::DomainMismatch => "points belong to different curves",
            Error::NotInvertible => "value is not invertible",
            Error::PointEncodingExhausted => "no valid point found",
            Error::InvalidEncoding => "invalid point encoding",
            Error::InvalidParameters => "unsupported curve parameters",
        })
    }
}

impl std::error::Error for Error {}
