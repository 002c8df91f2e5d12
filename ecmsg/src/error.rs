//! Error type

use core::fmt::{self, Display};

/// Result type with the `ecmsg` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Message encryption errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A point is not on the curve.
    InvalidCurvePoint,

    /// Points of different curve parameter sets were combined.
    DomainMismatch,

    /// Header version this crate cannot read or write.
    UnsupportedVersion(u8),

    /// A plaintext chunk could not be mapped onto the curve.
    PointEncodingExhausted,

    /// The envelope was not encrypted to the supplied key.
    KeyMismatch,

    /// Bad base64, bad magic bytes, or inconsistent lengths and records.
    MalformedEnvelope,

    /// The decrypted plaintext does not match its checksum.
    ///
    /// Decryption reports this as a flag; only
    /// [`DecryptedMessage::verified`](crate::DecryptedMessage::verified)
    /// turns it into an error.
    ChecksumMismatch,

    /// Public key encoding or secret scalar out of range.
    InvalidKey,

    /// Plaintext length does not fit the header's 4-byte length field.
    MessageTooLong,

    /// The random number generator failed.
    RandomSource,

    /// Malformed base58check string, address or WIF key.
    Address,

    /// Other curve arithmetic failure.
    Curve(weierstrass::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCurvePoint => f.write_str("point is not on the curve"),
            Error::DomainMismatch => f.write_str("points belong to different curves"),
            Error::UnsupportedVersion(version) => {
                write!(f, "unsupported header version {version}")
            }
            Error::PointEncodingExhausted => f.write_str("no valid point found"),
            Error::KeyMismatch => f.write_str("bad private key"),
            Error::MalformedEnvelope => f.write_str("malformed envelope"),
            Error::ChecksumMismatch => f.write_str("plaintext checksum mismatch"),
            Error::InvalidKey => f.write_str("invalid key"),
            Error::MessageTooLong => f.write_str("message too long"),
            Error::RandomSource => f.write_str("random number generator failure"),
            Error::Address => f.write_str("invalid base58check data"),
            Error::Curve(err) => write!(f, "curve arithmetic error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Curve(err) => Some(err),
            _ => None,
        }
    }
}

impl From<weierstrass::Error> for Error {
    fn from(err: weierstrass::Error) -> Error {
        match err {
            weierstrass::Error::InvalidCurvePoint => Error::InvalidCurvePoint,
            weierstrass::Error::DomainMismatch => Error::DomainMismatch,
            weierstrass::Error::PointEncodingExhausted => Error::PointEncodingExhausted,
            other => Error::Curve(other),
        }
    }
}

impl From<base64ct::Error> for Error {
    fn from(_: base64ct::Error) -> Error {
        Error::MalformedEnvelope
    }
}
