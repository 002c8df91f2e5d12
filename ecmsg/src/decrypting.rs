use crate::{
    EncryptingKey, Error, Result,
    header::{PrivateHeader, PublicHeader},
};
use base64ct::{Base64, Encoding};
use core::fmt::{self, Debug};
use log::{debug, trace, warn};
use num_bigint::BigUint;
use num_traits::{CheckedSub, Zero};
use weierstrass::{CurveParams, Point, Tag, decode_tag, to_be_bytes_fixed};

/// Private key of a message recipient.
#[derive(Clone)]
pub struct DecryptingKey<'c> {
    secret_scalar: BigUint,
    encrypting_key: EncryptingKey<'c>,
}

/// Output of a successful decryption.
///
/// A checksum mismatch is reported through `checksum_valid` rather than
/// as an error, so the recovered bytes remain available for inspection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptedMessage {
    /// Recovered plaintext.
    pub plaintext: Vec<u8>,

    /// Does the plaintext match the checksum in its header?
    pub checksum_valid: bool,
}

impl DecryptedMessage {
    /// Return the plaintext, or [`Error::ChecksumMismatch`] if it failed
    /// its checksum.
    pub fn verified(self) -> Result<Vec<u8>> {
        if self.checksum_valid {
            Ok(self.plaintext)
        } else {
            Err(Error::ChecksumMismatch)
        }
    }
}

impl DecryptingKey<'static> {
    /// Parse a secp256k1 private key from its 32-byte big-endian encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let curve = CurveParams::secp256k1();

        if bytes.len() != curve.field_size() {
            return Err(Error::InvalidKey);
        }

        Self::from_scalar_with_curve(curve, BigUint::from_bytes_be(bytes))
    }

    /// Create a secp256k1 private key from a scalar in `[1, r)`.
    pub fn from_scalar(secret_scalar: BigUint) -> Result<Self> {
        Self::from_scalar_with_curve(CurveParams::secp256k1(), secret_scalar)
    }

    /// Parse a secp256k1 private key in wallet import format.
    #[cfg(feature = "address")]
    pub fn from_wif(wif: &str) -> Result<Self> {
        Self::from_scalar(crate::address::decode_wif(wif)?)
    }
}

impl<'c> DecryptingKey<'c> {
    /// Create a private key on `curve` from a scalar in `[1, r)`.
    pub fn from_scalar_with_curve(curve: &'c CurveParams, secret_scalar: BigUint) -> Result<Self> {
        if secret_scalar.is_zero() || secret_scalar >= *curve.order() {
            return Err(Error::InvalidKey);
        }

        let public_key = curve.generator().mul_scalar(&secret_scalar)?;

        Ok(Self {
            secret_scalar,
            encrypting_key: EncryptingKey::from_point(public_key)?,
        })
    }

    /// Public key matching this private key, in uncompressed form.
    pub fn encrypting_key(&self) -> &EncryptingKey<'c> {
        &self.encrypting_key
    }

    /// Decrypt a base64 envelope.
    pub fn decrypt(&self, envelope: &str) -> Result<DecryptedMessage> {
        self.decrypt_bytes(&Base64::decode_vec(envelope.trim())?)
    }

    /// Decrypt raw envelope bytes.
    ///
    /// The public header must name this key in either its compressed or
    /// its uncompressed form. Each record `tag || T.x || U` yields the
    /// chunk `(U - d·T).x - offset`.
    pub fn decrypt_bytes(&self, envelope: &[u8]) -> Result<DecryptedMessage> {
        let curve = self.encrypting_key.curve();
        let (public_header, body) = PublicHeader::parse(envelope)?;

        debug!(
            "public header: version {}, key checksum {:02x?}",
            public_header.version, public_header.key_checksum
        );

        let public_key = self.encrypting_key.as_point();
        if !public_header.matches(&public_key.to_sec1_bytes(true)?)
            && !public_header.matches(&public_key.to_sec1_bytes(false)?)
        {
            return Err(Error::KeyMismatch);
        }

        let record_len = crate::record_len(curve);
        if body.len() % record_len != 0 {
            return Err(Error::MalformedEnvelope);
        }

        let chunk_size = curve.field_size();
        let mut framed = Vec::with_capacity(body.len() / record_len * chunk_size);

        for (i, record) in body.chunks_exact(record_len).enumerate() {
            let (ephemeral, masked) = record.split_at(record_len / 2);
            let (&tag, x) = ephemeral.split_first().ok_or(Error::MalformedEnvelope)?;
            let (y_is_odd, offset) = decode_tag(tag);
            trace!("record {i}: x offset {offset}");

            let mut ephemeral = Vec::with_capacity(record_len / 2);
            ephemeral.push(Tag::compressed(y_is_odd).into());
            ephemeral.extend_from_slice(x);

            let shared = decode_point(curve, &ephemeral)?.mul_scalar(&self.secret_scalar)?;
            let m = decode_point(curve, masked)?.add_point(&-shared)?;

            let chunk = m
                .x()
                .and_then(|x| x.checked_sub(&BigUint::from(offset)))
                .ok_or(Error::MalformedEnvelope)?;

            framed.extend(to_be_bytes_fixed(&chunk, chunk_size)?);
        }

        let (private_header, rest) = PrivateHeader::parse(&framed)?;
        debug!(
            "private header: version {}, message {} bytes, checksum {:02x?}",
            private_header.version, private_header.length, private_header.checksum
        );

        let plaintext = usize::try_from(private_header.length)
            .ok()
            .and_then(|len| rest.get(..len))
            .ok_or(Error::MalformedEnvelope)?
            .to_vec();

        let checksum_valid = private_header.matches(&plaintext);
        if checksum_valid {
            debug!("plaintext checksum matches");
        } else {
            warn!("plaintext checksum mismatch");
        }

        Ok(DecryptedMessage {
            plaintext,
            checksum_valid,
        })
    }
}

impl Debug for DecryptingKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("encrypting_key", &self.encrypting_key)
            .finish_non_exhaustive()
    }
}

/// Decode a record point. Encodings that cannot be points at all are
/// envelope damage.
fn decode_point<'c>(curve: &'c CurveParams, bytes: &[u8]) -> Result<Point<'c>> {
    Point::from_sec1_bytes(curve, bytes).map_err(|err| match err {
        weierstrass::Error::InvalidEncoding => Error::MalformedEnvelope,
        other => other.into(),
    })
}
