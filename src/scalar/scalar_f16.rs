//! `f16` lanes (with the `half` feature).
//!
//! There are no f16 kernels: the arithmetic is done by the `half` crate (through
//! `f32`), so `f16` vectors always run on the `GENERIC` instruction set.

use half::f16;

use super::{private, FloatScalar, Scalar, SignedScalar};
use crate::kernel::{ArchVisitor, FloatVisitor};
use crate::simd::Target;

impl private::Sealed for f16 {}

impl Scalar for f16 {
    type Bits = u16;
    type Word = [f16; 4];

    const IS_FLOAT: bool = true;
    const HAS_SIMD: bool = false;
    const ALL_ONES: Self = f16::from_bits(u16::MAX);
    const ZERO_WORD: Self::Word = [f16::ZERO; 4];

    #[inline(always)]
    fn to_bits(self) -> u16 {
        f16::to_bits(self)
    }

    #[inline(always)]
    fn from_bits(bits: u16) -> Self {
        f16::from_bits(bits)
    }

    #[inline(always)]
    fn lane_add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline(always)]
    fn lane_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline(always)]
    fn lane_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline(always)]
    fn lane_div(self, rhs: Self) -> Self {
        self / rhs
    }

    #[inline(always)]
    fn lane_rem(self, rhs: Self) -> Self {
        self % rhs
    }

    #[inline(always)]
    fn dispatch<V: ArchVisitor<Self>>(_target: Target, visitor: V) -> V::Output {
        visitor.visit_lanes()
    }
}

impl FloatScalar for f16 {
    const SIGN_MASK: Self = f16::NEG_ZERO;

    #[inline(always)]
    fn dispatch_float<V: FloatVisitor<Self>>(_target: Target, visitor: V) -> V::Output {
        visitor.visit_lanes()
    }
}

impl SignedScalar for f16 {
    #[inline(always)]
    fn lane_neg(self) -> Self {
        -self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f16_lanes() {
        let one = f16::ONE;
        let two = one.lane_add(one);
        assert_eq!(two, f16::from_f32(2.0));
        assert!(one.lane_lt(two).is_set());
        assert_eq!(f16::from_f32(-1.5).lane_abs(), f16::from_f32(1.5));
        assert_eq!(f16::from_bool(true).to_bits(), u16::MAX);
        assert_eq!(f16::from_f32(9.0).lane_sqrt(), f16::from_f32(3.0));
    }
}
