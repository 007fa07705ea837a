//! Scalar lane types and their per-lane formulas.
//!
//! Every lane type implements [`Scalar`]; integer lanes additionally implement
//! [`IntScalar`] (shifts), float lanes [`FloatScalar`] (square root, absolute value)
//! and signed lanes [`SignedScalar`] (negation). The per-lane formulas defined here
//! are the ground truth of the crate: the `GENERIC` instruction set is a loop over
//! them, and every SIMD kernel must produce the same bits.

mod generic;
#[cfg(feature = "half")]
mod scalar_f16;

use std::fmt;

use num_traits::{Float, One, PrimInt, Zero};

use crate::kernel::{ArchVisitor, FloatVisitor, IntVisitor};
use crate::simd::Target;

mod private {
    pub trait Sealed {}
}

/// A type that can be stored in the lanes of a [`SimdVec`](crate::SimdVec).
///
/// This trait is sealed; it is implemented for `i8`, `i16`, `i32`, `i64`, `u8`,
/// `u16`, `u32`, `u64`, `f32`, `f64` (and `f16` with the `half` feature).
pub trait Scalar:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Zero
    + One
    + Send
    + Sync
    + 'static
    + private::Sealed
{
    /// Unsigned integer with the same width as the lane
    type Bits: PrimInt + fmt::Debug;
    /// The register of the `GENERIC` instruction set: one 64-bit word of lanes
    type Word: Copy + fmt::Debug + AsRef<[Self]> + AsMut<[Self]>;

    const NB_BITS: usize = std::mem::size_of::<Self>() * 8;
    const IS_FLOAT: bool;
    /// Whether SIMD kernels exist for this lane type (otherwise `GENERIC` only)
    const HAS_SIMD: bool = true;
    /// The "true" lane pattern of a boolean vector
    const ALL_ONES: Self;
    const ZERO_WORD: Self::Word;

    fn to_bits(self) -> Self::Bits;
    fn from_bits(bits: Self::Bits) -> Self;

    #[inline(always)]
    fn from_bool(b: bool) -> Self {
        if b {
            Self::ALL_ONES
        } else {
            Self::from_bits(Self::Bits::zero())
        }
    }

    /// Truth value of a boolean lane: its most significant bit (what movemask reads)
    #[inline(always)]
    fn is_set(self) -> bool {
        self.to_bits().leading_zeros() == 0
    }

    fn lane_add(self, rhs: Self) -> Self;
    fn lane_sub(self, rhs: Self) -> Self;
    fn lane_mul(self, rhs: Self) -> Self;
    /// # Panics
    /// Integer lanes panic on division by zero, like the scalar operator.
    fn lane_div(self, rhs: Self) -> Self;
    /// # Panics
    /// Integer lanes panic on division by zero, like the scalar operator.
    fn lane_rem(self, rhs: Self) -> Self;

    // min / max follow the x86 semantics: the second operand is returned when the
    // comparison is false (NaN or equal values)
    #[inline(always)]
    fn lane_min(self, rhs: Self) -> Self {
        if self < rhs {
            self
        } else {
            rhs
        }
    }

    #[inline(always)]
    fn lane_max(self, rhs: Self) -> Self {
        if self > rhs {
            self
        } else {
            rhs
        }
    }

    #[inline(always)]
    fn lane_and(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits() & rhs.to_bits())
    }

    #[inline(always)]
    fn lane_or(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits() | rhs.to_bits())
    }

    #[inline(always)]
    fn lane_xor(self, rhs: Self) -> Self {
        Self::from_bits(self.to_bits() ^ rhs.to_bits())
    }

    /// `!self & rhs`
    #[inline(always)]
    fn lane_andnot(self, rhs: Self) -> Self {
        Self::from_bits(!self.to_bits() & rhs.to_bits())
    }

    #[inline(always)]
    fn lane_not(self) -> Self {
        Self::from_bits(!self.to_bits())
    }

    #[inline(always)]
    fn lane_eq(self, rhs: Self) -> Self {
        Self::from_bool(self == rhs)
    }

    #[inline(always)]
    fn lane_ne(self, rhs: Self) -> Self {
        Self::from_bool(self != rhs)
    }

    #[inline(always)]
    fn lane_lt(self, rhs: Self) -> Self {
        Self::from_bool(self < rhs)
    }

    #[inline(always)]
    fn lane_le(self, rhs: Self) -> Self {
        Self::from_bool(self <= rhs)
    }

    #[inline(always)]
    fn lane_gt(self, rhs: Self) -> Self {
        Self::from_bool(self > rhs)
    }

    #[inline(always)]
    fn lane_ge(self, rhs: Self) -> Self {
        Self::from_bool(self >= rhs)
    }

    /// Run `visitor` on the instruction set tag that `target` names.
    fn dispatch<V: ArchVisitor<Self>>(target: Target, visitor: V) -> V::Output;
}

/// Integer lanes: adds per-lane shifts.
///
/// Shift counts are read as unsigned lane values; a count of at least the lane width
/// yields 0 (left shift, logical right shift) or the sign fill (arithmetic right
/// shift), which is what the variable-shift instructions do.
pub trait IntScalar: Scalar + Eq + Ord {
    const IS_SIGNED: bool;

    fn lane_shl(self, count: Self) -> Self;
    fn lane_shr(self, count: Self) -> Self;
    /// Convert a uniform shift count to a lane value (saturated at the lane width)
    fn from_count(count: u32) -> Self;

    fn dispatch_int<V: IntVisitor<Self>>(target: Target, visitor: V) -> V::Output;
}

/// Floating point lanes: adds square root and absolute value.
pub trait FloatScalar: Scalar + Float {
    /// `-0.0`: only the sign bit set
    const SIGN_MASK: Self;

    #[inline(always)]
    fn lane_sqrt(self) -> Self {
        Float::sqrt(self)
    }

    #[inline(always)]
    fn lane_abs(self) -> Self {
        Self::SIGN_MASK.lane_andnot(self)
    }

    fn dispatch_float<V: FloatVisitor<Self>>(target: Target, visitor: V) -> V::Output;
}

/// Signed lanes (signed integers and floats): adds negation.
pub trait SignedScalar: Scalar {
    fn lane_neg(self) -> Self;
}

// ---------------------------------- dispatch macro -----------------------------------

/// Expands to the match that maps a [`Target`] on a concrete tag and runs the visitor.
///
/// Only x86 tags have kernels; every other target (and `Target::Generic`) runs the
/// visitor lane by lane.
macro_rules! dispatch_to_tag {
    ($target:expr, $visitor:expr) => {{
        #[allow(unused_imports)]
        use $crate::simd::*;
        // SAFETY: `Target::resolve` only returns tags enabled for this build
        #[allow(unreachable_patterns)]
        match $target {
            #[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
            Target::Avx512 => unsafe { $visitor.visit::<AVX512>() },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Target::Avx2Fma => unsafe { $visitor.visit::<FMA<AVX2>>() },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Target::Avx2 => unsafe { $visitor.visit::<AVX2>() },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Target::AvxFma => unsafe { $visitor.visit::<FMA<AVX>>() },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Target::Avx => unsafe { $visitor.visit::<AVX>() },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Target::Sse => unsafe { $visitor.visit::<SSE>() },
            _ => $visitor.visit_lanes(),
        }
    }};
}

// ------------------------------------ int lanes -------------------------------------

/// Macro for implementing Scalar for the integer data types
macro_rules! impl_scalar_int {
    // $int_type is the lane type, $bits the unsigned type of the same width and
    // $word the number of lanes in a 64-bit word
    ($($int_type:ty => $bits:ty, $word:expr);* $(;)?) => {
        $(
            impl private::Sealed for $int_type {}

            impl Scalar for $int_type {
                type Bits = $bits;
                type Word = [$int_type; $word];

                const IS_FLOAT: bool = false;
                const ALL_ONES: Self = <$bits>::MAX as $int_type;
                const ZERO_WORD: Self::Word = [0; $word];

                #[inline(always)]
                fn to_bits(self) -> $bits {
                    self as $bits
                }

                #[inline(always)]
                fn from_bits(bits: $bits) -> Self {
                    bits as $int_type
                }

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                #[inline(always)]
                fn lane_div(self, rhs: Self) -> Self {
                    self.wrapping_div(rhs)
                }

                #[inline(always)]
                fn lane_rem(self, rhs: Self) -> Self {
                    self.wrapping_rem(rhs)
                }

                #[inline(always)]
                fn dispatch<V: ArchVisitor<Self>>(target: Target, visitor: V) -> V::Output {
                    dispatch_to_tag!(target, visitor)
                }
            }

            impl IntScalar for $int_type {
                const IS_SIGNED: bool = <$int_type>::MIN != 0;

                #[inline(always)]
                fn lane_shl(self, count: Self) -> Self {
                    let count = count as $bits;
                    if (count as u64) >= Self::NB_BITS as u64 {
                        0
                    } else {
                        self << count
                    }
                }

                #[inline(always)]
                fn lane_shr(self, count: Self) -> Self {
                    let count = count as $bits;
                    if (count as u64) >= Self::NB_BITS as u64 {
                        // arithmetic shift of a signed lane fills with the sign
                        if Self::IS_SIGNED && self.is_set() {
                            !0
                        } else {
                            0
                        }
                    } else {
                        self >> count
                    }
                }

                #[inline(always)]
                fn from_count(count: u32) -> Self {
                    count.min(Self::NB_BITS as u32) as $int_type
                }

                #[inline(always)]
                fn dispatch_int<V: IntVisitor<Self>>(target: Target, visitor: V) -> V::Output {
                    dispatch_to_tag!(target, visitor)
                }
            }
        )*
    };
}

impl_scalar_int!(
    i8 => u8, 8;
    i16 => u16, 4;
    i32 => u32, 2;
    i64 => u64, 1;
    u8 => u8, 8;
    u16 => u16, 4;
    u32 => u32, 2;
    u64 => u64, 1;
);

macro_rules! impl_signed_int {
    ($($int_type:ty),*) => {
        $(
            impl SignedScalar for $int_type {
                #[inline(always)]
                fn lane_neg(self) -> Self {
                    self.wrapping_neg()
                }
            }
        )*
    };
}

impl_signed_int!(i8, i16, i32, i64);

// ----------------------------------- float lanes ------------------------------------

/// Macro for implementing Scalar for the float data types
macro_rules! impl_scalar_float {
    ($($float_type:ty => $bits:ty, $word:expr);* $(;)?) => {
        $(
            impl private::Sealed for $float_type {}

            impl Scalar for $float_type {
                type Bits = $bits;
                type Word = [$float_type; $word];

                const IS_FLOAT: bool = true;
                const ALL_ONES: Self = <$float_type>::from_bits(<$bits>::MAX);
                const ZERO_WORD: Self::Word = [0.0; $word];

                #[inline(always)]
                fn to_bits(self) -> $bits {
                    <$float_type>::to_bits(self)
                }

                #[inline(always)]
                fn from_bits(bits: $bits) -> Self {
                    <$float_type>::from_bits(bits)
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
                fn dispatch<V: ArchVisitor<Self>>(target: Target, visitor: V) -> V::Output {
                    dispatch_to_tag!(target, visitor)
                }
            }

            impl FloatScalar for $float_type {
                const SIGN_MASK: Self = -0.0;

                #[inline(always)]
                fn dispatch_float<V: FloatVisitor<Self>>(target: Target, visitor: V) -> V::Output {
                    dispatch_to_tag!(target, visitor)
                }
            }

            impl SignedScalar for $float_type {
                #[inline(always)]
                fn lane_neg(self) -> Self {
                    -self
                }
            }
        )*
    };
}

impl_scalar_float!(
    f32 => u32, 2;
    f64 => u64, 1;
);

// ======================================= TESTS =======================================
