//! The `BigInt` type and its core arithmetic.

use std::cmp::Ordering;

/// Nonnegative arbitrary-precision integer in base 2^32.
///
/// Limbs are stored least-significant first and carry no trailing zero limb;
/// the value zero is the empty limb vector, so `is_zero()` is equivalent to
/// `limbs.is_empty()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BigInt {
    limbs: Vec<u32>,
}

impl BigInt {
    /// The value zero.
    pub const ZERO: Self = BigInt { limbs: Vec::new() };

    /// Returns the value one.
    pub fn one() -> Self {
        Self::from_u32(1)
    }

    /// Builds a value from a single machine word.
    pub fn from_u32(value: u32) -> Self {
        if value == 0 {
            Self::ZERO
        } else {
            BigInt { limbs: vec![value] }
        }
    }

    /// Builds a value from a 64-bit word.
    pub fn from_u64(value: u64) -> Self {
        let mut out = BigInt {
            limbs: vec![value as u32, (value >> 32) as u32],
        };
        out.normalize();
        out
    }

    /// Rebuilds a value from raw little-endian limbs, restoring the
    /// no-trailing-zero invariant.
    pub(crate) fn from_limbs(limbs: Vec<u32>) -> Self {
        let mut out = BigInt { limbs };
        out.normalize();
        out
    }

    pub(crate) fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    /// True for the value zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// True for the value one.
    pub fn is_one(&self) -> bool {
        self.limbs == [1]
    }

    /// True when the least-significant bit is set.
    pub fn is_odd(&self) -> bool {
        self.limbs.first().is_some_and(|limb| limb & 1 == 1)
    }

    /// Number of significant bits; zero for the value zero.
    pub fn bit_len(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(&top) => (self.limbs.len() - 1) * 32 + (32 - top.leading_zeros() as usize),
        }
    }

    /// Big-endian byte rendering with no leading zero byte; empty for zero.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.limbs.len() * 4);
        for &limb in self.limbs.iter().rev() {
            bytes.extend_from_slice(&limb.to_be_bytes());
        }
        let leading = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        bytes.drain(..leading);
        bytes
    }

    fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }

    /// Sum of `self` and `rhs`.
    pub fn add(&self, rhs: &BigInt) -> BigInt {
        let longest = self.limbs.len().max(rhs.limbs.len());
        let mut limbs = Vec::with_capacity(longest + 1);
        let mut carry = 0u64;
        for i in 0..longest {
            let a = u64::from(self.limbs.get(i).copied().unwrap_or(0));
            let b = u64::from(rhs.limbs.get(i).copied().unwrap_or(0));
            let sum = a + b + carry;
            limbs.push(sum as u32);
            carry = sum >> 32;
        }
        if carry != 0 {
            limbs.push(carry as u32);
        }
        Self::from_limbs(limbs)
    }

    /// Difference `self - rhs`, or `None` when `rhs` is larger.
    ///
    /// The type has no negative representation, so underflow is expressed in
    /// the return value rather than left to the caller's discipline.
    pub fn checked_sub(&self, rhs: &BigInt) -> Option<BigInt> {
        if *self < *rhs {
            return None;
        }
        let mut limbs = Vec::with_capacity(self.limbs.len());
        let mut borrow = 0u64;
        for (i, &limb) in self.limbs.iter().enumerate() {
            let a = u64::from(limb);
            let b = u64::from(rhs.limbs.get(i).copied().unwrap_or(0));
            let diff = a.wrapping_sub(b).wrapping_sub(borrow);
            limbs.push(diff as u32);
            borrow = (diff >> 32) & 1;
        }
        Some(Self::from_limbs(limbs))
    }

    /// Schoolbook product of `self` and `rhs`.
    pub fn mul(&self, rhs: &BigInt) -> BigInt {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        let mut limbs = vec![0u32; self.limbs.len() + rhs.limbs.len()];
        for (i, &a) in self.limbs.iter().enumerate() {
            let mut carry = 0u64;
            for (j, &b) in rhs.limbs.iter().enumerate() {
                let wide = u64::from(a) * u64::from(b) + u64::from(limbs[i + j]) + carry;
                limbs[i + j] = wide as u32;
                carry = wide >> 32;
            }
            limbs[i + rhs.limbs.len()] = carry as u32;
        }
        Self::from_limbs(limbs)
    }

    /// Product with 2^`bits` for `bits < 32`, via a single carry pass.
    pub fn shl_bits(&self, bits: u32) -> BigInt {
        debug_assert!(bits < 32, "shl_bits shifts less than one limb");
        if bits == 0 || self.is_zero() {
            return self.clone();
        }
        let mut limbs = Vec::with_capacity(self.limbs.len() + 1);
        let mut carry = 0u32;
        for &limb in &self.limbs {
            let wide = (u64::from(limb) << bits) | u64::from(carry);
            limbs.push(wide as u32);
            carry = (wide >> 32) as u32;
        }
        if carry != 0 {
            limbs.push(carry);
        }
        BigInt { limbs }
    }

    /// Halves the value in place, propagating the carry limb-wise from the
    /// most-significant limb down.
    pub fn shr1(&mut self) {
        let mut carry = 0u32;
        for limb in self.limbs.iter_mut().rev() {
            let low_bit = *limb & 1;
            *limb = (*limb >> 1) | (carry << 31);
            carry = low_bit;
        }
        self.normalize();
    }

    /// Quotient and remainder of `self / divisor`.
    ///
    /// Iterative shift-and-subtract: each pass finds the largest
    /// `divisor * 2^k <= remainder` by doubling both the shifted divisor and
    /// the candidate quotient term, subtracts it, and accumulates `2^k` into
    /// the quotient until the remainder drops below the divisor. Not
    /// bit-serial long division; the remainder shrinks by the largest
    /// aligned multiple each round.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero; public entry points validate the modulus
    /// before reaching this.
    pub fn div_rem(&self, divisor: &BigInt) -> (BigInt, BigInt) {
        assert!(!divisor.is_zero(), "division by zero");
        if *self < *divisor {
            return (Self::ZERO, self.clone());
        }
        if divisor.is_one() {
            return (self.clone(), Self::ZERO);
        }
        let mut quotient = Self::ZERO;
        let mut remainder = self.clone();
        while *divisor <= remainder {
            let mut shifted = divisor.clone();
            let mut term = Self::one();
            loop {
                let doubled = shifted.shl_bits(1);
                if remainder < doubled {
                    break;
                }
                shifted = doubled;
                term = term.shl_bits(1);
            }
            remainder = remainder
                .checked_sub(&shifted)
                .expect("shifted divisor was chosen below the remainder");
            quotient = quotient.add(&term);
        }
        (quotient, remainder)
    }

    /// Remainder of `self / divisor`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    pub fn rem(&self, divisor: &BigInt) -> BigInt {
        self.div_rem(divisor).1
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        // Normalized limbs make length the leading comparison key.
        match self.limbs.len().cmp(&other.limbs.len()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        for (a, b) in self.limbs.iter().rev().zip(other.limbs.iter().rev()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
