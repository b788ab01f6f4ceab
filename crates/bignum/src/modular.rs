//! Extended Euclidean algorithm, modular inversion, and modular
//! exponentiation over `BigInt`.

use crate::error::NumError;
use crate::int::BigInt;

/// A Bézout coefficient.
///
/// The coefficient recurrence of the extended Euclidean algorithm produces
/// values of alternating sign, while `BigInt` represents magnitudes only, so
/// the sign is carried alongside the magnitude. Zero is canonically
/// non-negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coefficient {
    /// Absolute value of the coefficient.
    pub magnitude: BigInt,
    /// True when the coefficient is strictly negative.
    pub negative: bool,
}

impl Coefficient {
    fn new(magnitude: BigInt, negative: bool) -> Self {
        let negative = negative && !magnitude.is_zero();
        Coefficient {
            magnitude,
            negative,
        }
    }

    fn zero() -> Self {
        Self::new(BigInt::ZERO, false)
    }

    fn one() -> Self {
        Self::new(BigInt::one(), false)
    }

    /// Signed difference `self - rhs`.
    fn sub(&self, rhs: &Coefficient) -> Coefficient {
        if self.negative != rhs.negative {
            return Self::new(self.magnitude.add(&rhs.magnitude), self.negative);
        }
        match self.magnitude.checked_sub(&rhs.magnitude) {
            Some(diff) => Self::new(diff, self.negative),
            None => {
                let diff = rhs
                    .magnitude
                    .checked_sub(&self.magnitude)
                    .expect("rhs magnitude exceeds self magnitude");
                Self::new(diff, !self.negative)
            }
        }
    }

    /// Product with a nonnegative factor; the sign follows `self`.
    fn scale(&self, factor: &BigInt) -> Coefficient {
        Self::new(self.magnitude.mul(factor), self.negative)
    }
}

/// Output of [`extended_gcd`]: `gcd = u·x + v·y` over the signed integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedGcd {
    /// Greatest common divisor of the two inputs.
    pub gcd: BigInt,
    /// Bézout coefficient of the first input.
    pub x: Coefficient,
    /// Bézout coefficient of the second input.
    pub y: Coefficient,
}

/// Iterative extended Euclid.
///
/// Maintains `(x1, x2, y1, y2)` starting from `(1, 0, 0, 1)`; each round
/// divides `u` by `v`, updates `x = x2 - q·x1` and `y = y2 - q·y1` with
/// signed subtraction, and rotates the state. Terminates when `v` reaches
/// zero, leaving `gcd = u`, `x = x2`, `y = y2`.
pub fn extended_gcd(u: &BigInt, v: &BigInt) -> ExtendedGcd {
    let mut u = u.clone();
    let mut v = v.clone();
    let mut x1 = Coefficient::one();
    let mut x2 = Coefficient::zero();
    let mut y1 = Coefficient::zero();
    let mut y2 = Coefficient::one();
    while !v.is_zero() {
        let (q, r) = u.div_rem(&v);
        let x = x2.sub(&x1.scale(&q));
        let y = y2.sub(&y1.scale(&q));
        u = v;
        v = r;
        x2 = std::mem::replace(&mut x1, x);
        y2 = std::mem::replace(&mut y1, y);
    }
    ExtendedGcd { gcd: u, x: x2, y: y2 }
}

/// Multiplicative inverse of `u` modulo `m`, canonicalized into `[0, m)`.
///
/// Returns zero when no inverse exists (`gcd(u, m) != 1`) and
/// `InvalidModulus` when `m` is zero.
pub fn mod_inverse(u: &BigInt, m: &BigInt) -> Result<BigInt, NumError> {
    if m.is_zero() {
        return Err(NumError::InvalidModulus);
    }
    let result = extended_gcd(u, m);
    if !result.gcd.is_one() {
        return Ok(BigInt::ZERO);
    }
    let reduced = result.x.magnitude.rem(m);
    if result.x.negative && !reduced.is_zero() {
        Ok(m.checked_sub(&reduced)
            .expect("remainder is below the modulus"))
    } else {
        Ok(reduced)
    }
}

/// Square-and-multiply modular exponentiation.
///
/// Returns `InvalidModulus` when the modulus is zero; otherwise processes
/// the exponent one bit at a time, squaring the base and halving the
/// exponent each round, as a loop rather than recursion.
pub fn mod_pow(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> Result<BigInt, NumError> {
    if modulus.is_zero() {
        return Err(NumError::InvalidModulus);
    }
    let mut result = BigInt::one();
    let mut base = base.clone();
    let mut exponent = exponent.clone();
    while !exponent.is_zero() {
        if exponent.is_odd() {
            result = result.mul(&base).rem(modulus);
        }
        base = base.mul(&base).rem(modulus);
        exponent.shr1();
    }
    Ok(result)
}
