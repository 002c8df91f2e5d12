//! Curve parameter sets.

use crate::{AffinePoint, Error, Point, Result};
use hex_literal::hex;
use num_bigint::BigUint;
use num_traits::Zero;
use once_cell::sync::Lazy;

/// secp256k1 domain parameters (SEC 2, section 2.4.1).
static SECP256K1: Lazy<CurveParams> = Lazy::new(|| CurveParams {
    p: BigUint::from_bytes_be(&hex!(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F"
    )),
    a: BigUint::zero(),
    b: BigUint::from(7u32),
    gx: BigUint::from_bytes_be(&hex!(
        "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"
    )),
    gy: BigUint::from_bytes_be(&hex!(
        "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
    )),
    order: BigUint::from_bytes_be(&hex!(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141"
    )),
    field_size: 32,
});

/// Parameters of a short Weierstrass curve `y² = x³ + a·x + b` over the
/// prime field `GF(p)`, together with a base point `G` of prime order `r`.
///
/// Parameter sets are immutable once constructed. Points borrow the set
/// they were created on, and arithmetic between points of different sets
/// fails with [`Error::DomainMismatch`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveParams {
    p: BigUint,
    a: BigUint,
    b: BigUint,
    gx: BigUint,
    gy: BigUint,
    order: BigUint,
    field_size: usize,
}

impl CurveParams {
    /// Create a new parameter set.
    ///
    /// Only fields with `p ≡ 3 (mod 4)` are supported, since point
    /// decompression takes square roots as `(p+1)/4` powers. The base point
    /// must lie on the curve; its order is not checked here, see
    /// [`CurveParams::validate`].
    pub fn new(
        p: BigUint,
        a: BigUint,
        b: BigUint,
        gx: BigUint,
        gy: BigUint,
        order: BigUint,
    ) -> Result<Self> {
        if &p % 4u32 != BigUint::from(3u32) || order.is_zero() {
            return Err(Error::InvalidParameters);
        }

        let field_size =
            usize::try_from(p.bits().div_ceil(8)).map_err(|_| Error::InvalidParameters)?;

        let params = Self {
            a: a % &p,
            b: b % &p,
            p,
            gx,
            gy,
            order,
            field_size,
        };

        if params.gx >= params.p || params.gy >= params.p || !params.contains(&params.gx, &params.gy)
        {
            return Err(Error::InvalidCurvePoint);
        }

        Ok(params)
    }

    /// The secp256k1 parameter set.
    pub fn secp256k1() -> &'static Self {
        &SECP256K1
    }

    /// Field modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Curve coefficient `a`.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Curve coefficient `b`.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Order `r` of the base point.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Length in bytes of one serialized field element.
    pub fn field_size(&self) -> usize {
        self.field_size
    }

    /// Base point `G`, carrying its order.
    pub fn generator(&self) -> Point<'_> {
        Point::Affine(AffinePoint {
            curve: self,
            x: self.gx.clone(),
            y: self.gy.clone(),
            order: Some(self.order.clone()),
        })
    }

    /// Does `(x, y)` satisfy the curve equation?
    ///
    /// Coordinates are interpreted modulo `p`.
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        y * y % &self.p == self.rhs(x)
    }

    /// Check that `r·G` is the point at infinity.
    ///
    /// This multiplies a copy of the base point which does not carry its
    /// order, so the scalar is not reduced away before the check.
    pub fn validate(&self) -> Result<()> {
        let base = Point::new(self, self.gx.clone(), self.gy.clone())?;

        if base.mul_scalar(&self.order)?.is_identity() {
            Ok(())
        } else {
            Err(Error::InvalidParameters)
        }
    }

    /// Right-hand side of the curve equation: `x³ + a·x + b mod p`.
    pub(crate) fn rhs(&self, x: &BigUint) -> BigUint {
        (x.modpow(&BigUint::from(3u32), &self.p) + &self.a * x + &self.b) % &self.p
    }
}
