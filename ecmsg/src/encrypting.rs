use crate::{
    Error, Result,
    header::{PrivateHeader, PublicHeader, VERSION},
};
use base64ct::{Base64, Encoding};
use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::TryCryptoRng;
use weierstrass::{CurveParams, Point, Tag, encode_tag};

/// Public key of a message recipient.
///
/// The key remembers the exact SEC1 encoding it was parsed from: the
/// envelope's public header checksums those bytes, so a key supplied
/// uncompressed and the same key supplied compressed produce different
/// envelopes. Both decrypt with the same private key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptingKey<'c> {
    curve: &'c CurveParams,
    point: Point<'c>,
    encoded: Vec<u8>,
}

impl EncryptingKey<'static> {
    /// Parse a compressed or uncompressed secp256k1 public key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_sec1_bytes_with_curve(CurveParams::secp256k1(), bytes)
    }
}

impl<'c> EncryptingKey<'c> {
    /// Parse a compressed or uncompressed public key on `curve`.
    pub fn from_sec1_bytes_with_curve(curve: &'c CurveParams, bytes: &[u8]) -> Result<Self> {
        let point = Point::from_sec1_bytes(curve, bytes).map_err(|err| match err {
            weierstrass::Error::InvalidCurvePoint => Error::InvalidCurvePoint,
            _ => Error::InvalidKey,
        })?;

        Ok(Self {
            curve,
            point,
            encoded: bytes.to_vec(),
        })
    }

    /// Key for `point`, remembered in uncompressed form.
    pub(crate) fn from_point(point: Point<'c>) -> Result<Self> {
        let curve = point.as_affine().ok_or(Error::InvalidKey)?.curve();
        let encoded = point.to_sec1_bytes(false)?;

        Ok(Self {
            curve,
            point,
            encoded,
        })
    }

    /// Curve this key lies on.
    pub fn curve(&self) -> &'c CurveParams {
        self.curve
    }

    /// Borrow the public key point.
    pub fn as_point(&self) -> &Point<'c> {
        &self.point
    }

    /// The encoding this key was created from.
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Address of this key, hashed from the encoding it was created from.
    #[cfg(feature = "address")]
    pub fn to_address(&self) -> String {
        crate::address::public_key_to_address(&self.encoded)
    }

    /// Encrypt `msg` to this key and return the base64 envelope.
    pub fn encrypt<R: TryCryptoRng + ?Sized>(&self, rng: &mut R, msg: &[u8]) -> Result<String> {
        Ok(Base64::encode_string(&self.encrypt_to_vec(rng, msg)?))
    }

    /// Encrypt `msg` to this key and return the raw envelope bytes.
    ///
    /// The private header and `msg` are zero-padded to a whole number of
    /// chunks. Each chunk is mapped onto a curve point `M` and encrypted
    /// under a fresh scalar `n` as the record `tag || (n·G).x || n·K + M`,
    /// where `tag` carries the parity of `n·G` and the x-offset of `M`.
    pub fn encrypt_to_vec<R: TryCryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        let curve = self.curve;
        let chunk_size = curve.field_size();

        let mut framed = PrivateHeader::for_message(msg, VERSION)?.to_bytes()?;
        let private_header_len = framed.len();
        framed.extend_from_slice(msg);
        framed.resize(framed.len().next_multiple_of(chunk_size), 0);

        let public_header = PublicHeader::for_key(&self.encoded, VERSION)?;
        let mut out = public_header.to_bytes()?;

        debug!(
            "public header: version {}, key checksum {:02x?}; private header {} bytes; message {} bytes",
            public_header.version,
            public_header.key_checksum,
            private_header_len,
            msg.len()
        );

        out.reserve(framed.len() / chunk_size * crate::record_len(curve));
        let generator = curve.generator();

        for (i, chunk) in framed.chunks(chunk_size).enumerate() {
            let (m, offset) = curve.map_to_point(&BigUint::from_bytes_be(chunk), true)?;
            trace!("chunk {i}: x offset {offset}");

            let n = next_scalar(rng, curve)?;
            let ephemeral = generator.mul_scalar(&n)?.to_sec1_bytes(true)?;
            let (&tag, x) = ephemeral
                .split_first()
                .ok_or(Error::Curve(weierstrass::Error::InvalidEncoding))?;

            out.push(encode_tag(tag == u8::from(Tag::CompressedOddY), offset)?);
            out.extend_from_slice(x);
            out.extend(self.point.mul_scalar(&n)?.add_point(&m)?.to_sec1_bytes(true)?);
        }

        Ok(out)
    }
}

/// Draw a uniform scalar in `[1, r)` by rejection sampling.
fn next_scalar<R: TryCryptoRng + ?Sized>(rng: &mut R, curve: &CurveParams) -> Result<BigUint> {
    let mut bytes = vec![0u8; curve.field_size()];

    loop {
        rng.try_fill_bytes(&mut bytes)
            .map_err(|_| Error::RandomSource)?;

        let n = BigUint::from_bytes_be(&bytes);
        if !n.is_zero() && n < *curve.order() {
            return Ok(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EncryptingKey, next_scalar};
    use crate::Error;
    use core::fmt;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use rand_core::{CryptoRng, RngCore, TryCryptoRng, TryRngCore};

    const COMPRESSED_BASEPOINT: [u8; 33] =
        hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");

    /// Yields the queued 32-byte blocks in order.
    struct Script(Vec<[u8; 32]>);

    impl RngCore for Script {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.copy_from_slice(&self.0.remove(0));
        }
    }

    impl CryptoRng for Script {}

    /// Always fails.
    struct Broken;

    impl TryRngCore for Broken {
        type Error = fmt::Error;

        fn try_next_u32(&mut self) -> Result<u32, fmt::Error> {
            Err(fmt::Error)
        }

        fn try_next_u64(&mut self) -> Result<u64, fmt::Error> {
            Err(fmt::Error)
        }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), fmt::Error> {
            Err(fmt::Error)
        }
    }

    impl TryCryptoRng for Broken {}

    #[test]
    fn scalar_rejection_sampling() {
        let curve = weierstrass::CurveParams::secp256k1();
        let order = curve.order().to_bytes_be();
        let mut rng = Script(vec![
            [0; 32],
            order.try_into().unwrap(),
            [0xff; 32],
            [0x11; 32],
        ]);

        assert_eq!(
            next_scalar(&mut rng, curve).unwrap(),
            BigUint::from_bytes_be(&[0x11; 32])
        );
        assert!(rng.0.is_empty());
    }

    #[test]
    fn keeps_supplied_encoding() {
        let key = EncryptingKey::from_sec1_bytes(&COMPRESSED_BASEPOINT).unwrap();
        assert_eq!(key.as_bytes(), COMPRESSED_BASEPOINT);
        assert_eq!(*key.as_point(), key.curve().generator());
    }

    #[test]
    fn rejects_bad_keys() {
        assert_eq!(
            EncryptingKey::from_sec1_bytes(&COMPRESSED_BASEPOINT[..20]),
            Err(Error::InvalidKey)
        );

        let mut off_curve = [0u8; 33];
        off_curve[0] = 0x02;
        assert_eq!(
            EncryptingKey::from_sec1_bytes(&off_curve),
            Err(Error::InvalidCurvePoint)
        );
    }

    #[test]
    fn envelope_layout() {
        let key = EncryptingKey::from_sec1_bytes(&COMPRESSED_BASEPOINT).unwrap();
        let mut rng = Script(vec![[0x11; 32]; 2]);

        // 9-byte private header and 40-byte message make two chunks
        let envelope = key.encrypt_to_vec(&mut rng, &[0x42; 40]).unwrap();
        assert_eq!(envelope.len(), 7 + 2 * 66);
        assert_eq!(envelope[..4], hex!("6a6a0000"));

        // equal scalars give equal ephemeral x-coordinates
        assert_eq!(envelope[8..40], envelope[74..106]);
    }

    #[test]
    fn random_source_failure() {
        let key = EncryptingKey::from_sec1_bytes(&COMPRESSED_BASEPOINT).unwrap();
        assert_eq!(key.encrypt(&mut Broken, b"hello"), Err(Error::RandomSource));
    }
}
