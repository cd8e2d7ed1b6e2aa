//! fixed-point numerical types

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 32-bit signed fixed point number with 16 bits of fraction.
///
/// This is the `Fixed` (16.16) type of the OpenType and TrueType specs: the
/// mathematical value multiplied by 65536 and stored as a two's-complement
/// `i32`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Minimum value.
    pub const MIN: Self = Self(i32::MIN);

    /// Maximum value.
    pub const MAX: Self = Self(i32::MAX);

    /// This type's smallest representable value
    pub const EPSILON: Self = Self(1);

    /// Representation of 0.0.
    pub const ZERO: Self = Self(0);

    /// Representation of 1.0.
    pub const ONE: Self = Self(1 << Self::FRACT_BITS);

    const INT_MASK: i32 = !0 << Self::FRACT_BITS;
    const ROUND: i32 = 1 << (Self::FRACT_BITS - 1);
    const FRACT_BITS: u32 = 16;

    /// Creates a new fixed point value from the underlying bit representation.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the underlying bit representation of the value.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a fixed point value from an integer.
    ///
    /// This is the plain `value << 16`: integers outside of the 16-bit range
    /// lose their high bits.
    pub const fn from_i32(value: i32) -> Self {
        Self(value << Self::FRACT_BITS)
    }

    /// Creates a fixed point value from an `f64`.
    ///
    /// This operation is lossy: the value is scaled by 65536 and rounded to the
    /// nearest representable value, with ties going to the even neighbour.
    /// Values outside of the representable range saturate and NaN becomes zero.
    pub fn from_f64(value: f64) -> Self {
        Self((value * Self::ONE.0 as f64).round_ties_even() as i32)
    }

    /// Returns the value as an `f64`.
    ///
    /// This operation is lossless: all representable values can be
    /// round-tripped.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::ONE.0 as f64
    }

    /// Returns the integer part of the value, rounding towards negative infinity.
    pub const fn to_i32(self) -> i32 {
        self.0 >> Self::FRACT_BITS
    }

    /// Returns the nearest integer value.
    pub fn round(self) -> Self {
        Self(self.0.wrapping_add(Self::ROUND) & Self::INT_MASK)
    }

    /// Returns the absolute value of the number.
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the largest integer less than or equal to the number.
    pub fn floor(self) -> Self {
        Self(self.0 & Self::INT_MASK)
    }

    /// Returns the fractional part of the number.
    pub fn fract(self) -> Self {
        Self(self.0 - self.floor().0)
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Returns the memory representation of this value in big-endian byte order.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Create a value from its big-endian memory representation.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(i32::from_be_bytes(bytes))
    }
}

impl Add for Fixed {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        // same overflow semantics as std: panic in debug, wrap in release
        Self(self.0 + other.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Fixed {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Fixed {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<i16> for Fixed {
    fn from(value: i16) -> Self {
        Self::from_i32(value as i32)
    }
}

//hack: we can losslessly go to float, so use those fmt impls
impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}

crate::raw::newtype_scalar!(Fixed, [u8; 4]);
