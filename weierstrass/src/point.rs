//! Affine curve points.

use crate::{
    CurveParams, Error, Result,
    field::{inverse_mod, sub_mod},
};
use core::{
    fmt::{self, Display},
    ops::Neg,
    ptr,
};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::Zero;

/// Point on a short Weierstrass curve: either the point at infinity or an
/// [`AffinePoint`].
///
/// Points are immutable values; arithmetic returns new points. Every
/// operation is fallible because affine formulas divide in the field and
/// because operands must share a curve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Point<'c> {
    /// Additive identity of the group: the point at infinity.
    Infinity,

    /// Point with coordinates in `[0, p)` which satisfy the curve equation.
    Affine(AffinePoint<'c>),
}

/// Curve point expressed in affine coordinates.
#[derive(Clone, Debug)]
pub struct AffinePoint<'c> {
    pub(crate) curve: &'c CurveParams,

    /// x-coordinate
    pub(crate) x: BigUint,

    /// y-coordinate
    pub(crate) y: BigUint,

    /// Order of the point, when known. Scalars are reduced modulo this
    /// value before multiplication.
    pub(crate) order: Option<BigUint>,
}

impl<'c> AffinePoint<'c> {
    /// Curve this point lies on.
    pub fn curve(&self) -> &'c CurveParams {
        self.curve
    }

    /// x-coordinate
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// y-coordinate
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Is the y-coordinate odd?
    pub fn y_is_odd(&self) -> bool {
        self.y.is_odd()
    }

    /// Known order of this point, if any.
    pub fn order(&self) -> Option<&BigUint> {
        self.order.as_ref()
    }
}

/// The known order does not take part in equality.
impl PartialEq for AffinePoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        same_curve(self.curve, other.curve) && self.x == other.x && self.y == other.y
    }
}

impl Eq for AffinePoint<'_> {}

impl<'c> Point<'c> {
    /// Create a point from affine coordinates.
    ///
    /// Returns [`Error::InvalidCurvePoint`] unless both coordinates are
    /// field elements and satisfy the curve equation.
    pub fn new(curve: &'c CurveParams, x: BigUint, y: BigUint) -> Result<Self> {
        let p = curve.modulus();

        if x >= *p || y >= *p || !curve.contains(&x, &y) {
            return Err(Error::InvalidCurvePoint);
        }

        Ok(Point::Affine(AffinePoint {
            curve,
            x,
            y,
            order: None,
        }))
    }

    /// Create a point from affine coordinates together with its order.
    ///
    /// Checks that `order·P` is the point at infinity, which costs a full
    /// scalar multiplication.
    pub fn with_order(
        curve: &'c CurveParams,
        x: BigUint,
        y: BigUint,
        order: BigUint,
    ) -> Result<Self> {
        if order.is_zero() {
            return Err(Error::InvalidParameters);
        }

        match Self::new(curve, x, y)? {
            Point::Affine(mut point) => {
                if !Point::Affine(point.clone())
                    .mul_scalar(&order)?
                    .is_identity()
                {
                    return Err(Error::InvalidCurvePoint);
                }

                point.order = Some(order);
                Ok(Point::Affine(point))
            }
            Point::Infinity => Ok(Point::Infinity),
        }
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Borrow the affine representation, unless this is the identity.
    pub fn as_affine(&self) -> Option<&AffinePoint<'c>> {
        match self {
            Point::Infinity => None,
            Point::Affine(point) => Some(point),
        }
    }

    /// x-coordinate, unless this is the identity.
    pub fn x(&self) -> Option<&BigUint> {
        self.as_affine().map(AffinePoint::x)
    }

    /// y-coordinate, unless this is the identity.
    pub fn y(&self) -> Option<&BigUint> {
        self.as_affine().map(AffinePoint::y)
    }

    /// Parity of the y-coordinate, unless this is the identity.
    pub fn y_is_odd(&self) -> Option<bool> {
        self.as_affine().map(AffinePoint::y_is_odd)
    }

    /// Known order of this point, if any.
    pub fn order(&self) -> Option<&BigUint> {
        self.as_affine().and_then(AffinePoint::order)
    }

    /// Add two points.
    pub fn add_point(&self, other: &Self) -> Result<Self> {
        let (lhs, rhs) = match (self, other) {
            (Point::Infinity, _) => return Ok(other.clone()),
            (_, Point::Infinity) => return Ok(self.clone()),
            (Point::Affine(lhs), Point::Affine(rhs)) => (lhs, rhs),
        };

        if !same_curve(lhs.curve, rhs.curve) {
            return Err(Error::DomainMismatch);
        }

        let p = lhs.curve.modulus();

        if lhs.x == rhs.x {
            return if ((&lhs.y + &rhs.y) % p).is_zero() {
                Ok(Point::Infinity)
            } else {
                self.double()
            };
        }

        // λ = (y₂ - y₁) / (x₂ - x₁)
        let lambda = sub_mod(&rhs.y, &lhs.y, p) * inverse_mod(&sub_mod(&rhs.x, &lhs.x, p), p)? % p;
        let x3 = sub_mod(&sub_mod(&(&lambda * &lambda), &lhs.x, p), &rhs.x, p);
        let y3 = sub_mod(&(&lambda * sub_mod(&lhs.x, &x3, p)), &lhs.y, p);

        Point::new(lhs.curve, x3, y3)
    }

    /// Double this point.
    ///
    /// A point with `y = 0` has a vertical tangent; doubling it fails with
    /// [`Error::NotInvertible`]. secp256k1 has no such point.
    pub fn double(&self) -> Result<Self> {
        let point = match self {
            Point::Infinity => return Ok(Point::Infinity),
            Point::Affine(point) => point,
        };

        if point.y.is_zero() {
            return Err(Error::NotInvertible);
        }

        let curve = point.curve;
        let p = curve.modulus();

        // λ = (3x² + a) / 2y
        let lambda = (&point.x * &point.x * 3u32 + curve.a()) * inverse_mod(&(&point.y * 2u32), p)? % p;
        let x3 = sub_mod(&(&lambda * &lambda), &(&point.x * 2u32), p);
        let y3 = sub_mod(&(&lambda * sub_mod(&point.x, &x3, p)), &point.y, p);

        Point::new(curve, x3, y3)
    }

    /// Multiply this point by an unsigned scalar.
    ///
    /// When the point's order is known, `k` is reduced modulo it first.
    /// Walks the bits of `3k` and `k` from the top down, doubling at every
    /// step and adding `P` or `-P` where the two differ. The result equals
    /// `k` repeated additions.
    pub fn mul_scalar(&self, k: &BigUint) -> Result<Self> {
        let point = match self {
            Point::Infinity => return Ok(Point::Infinity),
            Point::Affine(point) => point,
        };

        let e = match &point.order {
            Some(order) => k % order,
            None => k.clone(),
        };

        if e.is_zero() {
            return Ok(Point::Infinity);
        }

        let e3 = &e * 3u32;
        let negative = self.negate();
        let mut result = self.clone();

        // e3 ≥ 3, so it has at least two bits; the top one is consumed by
        // starting from P itself.
        for i in (1..e3.bits() - 1).rev() {
            result = result.double()?;

            match (e3.bit(i), e.bit(i)) {
                (true, false) => result = result.add_point(self)?,
                (false, true) => result = result.add_point(&negative)?,
                _ => (),
            }
        }

        Ok(result)
    }

    /// Multiply this point by a signed scalar.
    ///
    /// `k` is reduced into `[0, n)` first, where `n` is the point's known
    /// order, or the curve order when none is known (every point of a
    /// prime-order curve has that order).
    pub fn mul_signed(&self, k: &BigInt) -> Result<Self> {
        let point = match self {
            Point::Infinity => return Ok(Point::Infinity),
            Point::Affine(point) => point,
        };

        let n = BigInt::from(point.order().unwrap_or(point.curve.order()).clone());
        let k = k.mod_floor(&n).to_biguint().ok_or(Error::InvalidParameters)?;
        self.mul_scalar(&k)
    }

    /// Additive inverse: `(x, p - y)`, or the identity unchanged.
    pub fn negate(&self) -> Self {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine(point) => {
                let p = point.curve.modulus();

                Point::Affine(AffinePoint {
                    curve: point.curve,
                    x: point.x.clone(),
                    y: (p - &point.y) % p,
                    order: point.order.clone(),
                })
            }
        }
    }
}

impl<'c> Neg for Point<'c> {
    type Output = Point<'c>;

    fn neg(self) -> Point<'c> {
        self.negate()
    }
}

impl<'c> Neg for &Point<'c> {
    type Output = Point<'c>;

    fn neg(self) -> Point<'c> {
        self.negate()
    }
}

impl Display for Point<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => f.write_str("infinity"),
            Point::Affine(point) => write!(f, "({:x}, {:x})", point.x, point.y),
        }
    }
}

fn same_curve(a: &CurveParams, b: &CurveParams) -> bool {
    ptr::eq(a, b) || a == b
}
