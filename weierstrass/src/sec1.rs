//! SEC1-style point encodings and x-offset mapping onto the curve.
//!
//! Compressed points are a tag byte (`0x02` for even y, `0x03` for odd y)
//! followed by the big-endian x-coordinate. Uncompressed points are `0x04`
//! followed by both coordinates.
//!
//! Integers which are not the x-coordinate of any curve point are mapped to
//! the first valid `x + offset` with `offset < MAX_X_OFFSET`. Such an offset
//! travels in the tag byte of a compressed point: [`encode_tag`] stores it
//! in the seven high bits and keeps the y parity in the low bit.

use crate::{
    CurveParams, Error, Point, Result,
    field::{sqrt_mod, to_be_bytes_fixed},
};
use num_bigint::BigUint;
use num_integer::Integer;

/// Upper bound (exclusive) of the x-offset search in
/// [`CurveParams::map_to_point`]. Offsets must fit in the seven high bits of
/// a tag byte.
pub const MAX_X_OFFSET: u8 = 128;

/// Point encoding tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Tag {
    /// Compressed point with even y-coordinate
    CompressedEvenY = 0x02,

    /// Compressed point with odd y-coordinate
    CompressedOddY = 0x03,

    /// Uncompressed point
    Uncompressed = 0x04,
}

impl Tag {
    /// Parse a tag value from a byte.
    pub fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            0x02 => Ok(Tag::CompressedEvenY),
            0x03 => Ok(Tag::CompressedOddY),
            0x04 => Ok(Tag::Uncompressed),
            _ => Err(Error::InvalidEncoding),
        }
    }

    /// Tag for a compressed point with the given y parity.
    pub fn compressed(y_is_odd: bool) -> Self {
        if y_is_odd {
            Tag::CompressedOddY
        } else {
            Tag::CompressedEvenY
        }
    }

    /// Is this a compressed point tag?
    pub fn is_compressed(self) -> bool {
        self != Tag::Uncompressed
    }

    /// Length of an encoded point with this tag, tag byte included.
    pub fn message_len(self, field_size: usize) -> usize {
        if self.is_compressed() {
            1 + field_size
        } else {
            1 + 2 * field_size
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag as u8
    }
}

/// Fold a y parity and an x-offset into a single byte:
/// `offset << 1 | parity`.
pub fn encode_tag(y_is_odd: bool, x_offset: u8) -> Result<u8> {
    if x_offset >= MAX_X_OFFSET {
        return Err(Error::InvalidEncoding);
    }

    Ok(x_offset << 1 | u8::from(y_is_odd))
}

/// Split a byte produced by [`encode_tag`] into `(y_is_odd, x_offset)`.
///
/// A plain `0x02`/`0x03` tag decodes to an offset of 1, so bytes must not be
/// mixed between the two schemes.
pub fn decode_tag(byte: u8) -> (bool, u8) {
    (byte & 1 == 1, byte >> 1)
}

impl<'c> Point<'c> {
    /// Encode this point, compressed or uncompressed.
    ///
    /// The point at infinity has no encoding.
    pub fn to_sec1_bytes(&self, compress: bool) -> Result<Vec<u8>> {
        let point = self.as_affine().ok_or(Error::InvalidEncoding)?;
        let field_size = point.curve.field_size();

        let tag = if compress {
            Tag::compressed(point.y_is_odd())
        } else {
            Tag::Uncompressed
        };

        let mut bytes = Vec::with_capacity(tag.message_len(field_size));
        bytes.push(tag.into());
        bytes.extend(to_be_bytes_fixed(&point.x, field_size)?);

        if !compress {
            bytes.extend(to_be_bytes_fixed(&point.y, field_size)?);
        }

        Ok(bytes)
    }

    /// Decode a compressed or uncompressed point.
    ///
    /// Compressed points are decompressed exactly at the encoded x; no
    /// offset search is performed.
    pub fn from_sec1_bytes(curve: &'c CurveParams, bytes: &[u8]) -> Result<Self> {
        let tag = Tag::from_u8(*bytes.first().ok_or(Error::InvalidEncoding)?)?;
        let field_size = curve.field_size();

        if bytes.len() != tag.message_len(field_size) {
            return Err(Error::InvalidEncoding);
        }

        let (x_bytes, y_bytes) = bytes[1..].split_at(field_size);
        let x = BigUint::from_bytes_be(x_bytes);

        let y = match tag {
            Tag::Uncompressed => BigUint::from_bytes_be(y_bytes),
            Tag::CompressedEvenY | Tag::CompressedOddY => {
                if x >= *curve.modulus() {
                    return Err(Error::InvalidCurvePoint);
                }

                curve
                    .recover_y(&x, tag == Tag::CompressedOddY)
                    .ok_or(Error::InvalidCurvePoint)?
            }
        };

        Point::new(curve, x, y)
    }
}

impl CurveParams {
    /// Solve the curve equation for y at `x`, choosing the root with the
    /// requested parity.
    ///
    /// Returns `None` if `x` is not the x-coordinate of any curve point.
    pub fn recover_y(&self, x: &BigUint, y_is_odd: bool) -> Option<BigUint> {
        let p = self.modulus();
        let y = sqrt_mod(&self.rhs(x), p)?;

        if y.is_odd() == y_is_odd {
            Some(y)
        } else {
            Some((p - y) % p)
        }
    }

    /// Map an arbitrary integer onto the curve.
    ///
    /// Tries `x + offset` for `offset` in `0..MAX_X_OFFSET` and returns the
    /// first candidate which is a field element and the x-coordinate of a
    /// curve point, together with the offset used. Fails with
    /// [`Error::PointEncodingExhausted`] otherwise.
    pub fn map_to_point(&self, x: &BigUint, y_is_odd: bool) -> Result<(Point<'_>, u8)> {
        for offset in 0..MAX_X_OFFSET {
            let candidate = x + u32::from(offset);

            if candidate >= *self.modulus() {
                break;
            }

            if let Some(y) = self.recover_y(&candidate, y_is_odd) {
                return Ok((Point::new(self, candidate, y)?, offset));
            }
        }

        Err(Error::PointEncodingExhausted)
    }
}
