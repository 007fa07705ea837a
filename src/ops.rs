//! Operation markers.
//!
//! Each marker type names one lane-wise operation and knows how to run it on a
//! register of any tag (`reg`) and on a single lane (`lane`). They are the vocabulary
//! of the explicit-tag API (`SimdVec::binary_on::<AVX2, Add>` etc.) and of the
//! horizontal reductions (`SimdVec::reduce_with::<Max>`).

use crate::scalar::{FloatScalar, IntScalar, Scalar, SignedScalar};
use crate::simd::{FloatKernel, IntKernel, Kernel};

pub trait UnaryOp<T: Scalar> {
    unsafe fn reg<A: Kernel<T>>(a: A::Reg) -> A::Reg;
    fn lane(a: T) -> T;
}

pub trait BinaryOp<T: Scalar> {
    unsafe fn reg<A: Kernel<T>>(a: A::Reg, b: A::Reg) -> A::Reg;
    fn lane(a: T, b: T) -> T;
}

pub trait TernaryOp<T: Scalar> {
    unsafe fn reg<A: Kernel<T>>(a: A::Reg, b: A::Reg, c: A::Reg) -> A::Reg;
    fn lane(a: T, b: T, c: T) -> T;
}

pub trait IntBinaryOp<T: IntScalar> {
    unsafe fn reg<A: IntKernel<T>>(a: A::Reg, b: A::Reg) -> A::Reg;
    fn lane(a: T, b: T) -> T;
}

pub trait FloatUnaryOp<T: FloatScalar> {
    unsafe fn reg<A: FloatKernel<T>>(a: A::Reg) -> A::Reg;
    fn lane(a: T) -> T;
}

macro_rules! binary_op {
    ($($(#[$doc:meta])* $name:ident => $kernel:ident, $lane:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl<T: Scalar> BinaryOp<T> for $name {
                #[inline(always)]
                unsafe fn reg<A: Kernel<T>>(a: A::Reg, b: A::Reg) -> A::Reg {
                    A::$kernel(a, b)
                }

                #[inline(always)]
                fn lane(a: T, b: T) -> T {
                    a.$lane(b)
                }
            }
        )*
    };
}

binary_op! {
    /// Wrapping for integers
    Add => add, lane_add;
    Sub => sub, lane_sub;
    Mul => mul, lane_mul;
    /// Integer lanes panic on division by zero
    Div => div, lane_div;
    Rem => rem, lane_rem;
    Min => min, lane_min;
    Max => max, lane_max;
    And => and, lane_and;
    Or => or, lane_or;
    Xor => xor, lane_xor;
    /// `!a & b`
    AndNot => andnot, lane_andnot;
    CmpEq => cmp_eq, lane_eq;
    CmpNe => cmp_ne, lane_ne;
    CmpLt => cmp_lt, lane_lt;
    CmpLe => cmp_le, lane_le;
    CmpGt => cmp_gt, lane_gt;
    CmpGe => cmp_ge, lane_ge;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Not;

impl<T: Scalar> UnaryOp<T> for Not {
    #[inline(always)]
    unsafe fn reg<A: Kernel<T>>(a: A::Reg) -> A::Reg {
        A::not(a)
    }

    #[inline(always)]
    fn lane(a: T) -> T {
        a.lane_not()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neg;

impl<T: SignedScalar> UnaryOp<T> for Neg {
    #[inline(always)]
    unsafe fn reg<A: Kernel<T>>(a: A::Reg) -> A::Reg {
        if T::IS_FLOAT {
            // flip the sign bit (-0.0 is the sign mask)
            A::xor(a, A::broadcast(T::zero().lane_neg()))
        } else {
            A::sub(A::setzero(), a)
        }
    }

    #[inline(always)]
    fn lane(a: T) -> T {
        a.lane_neg()
    }
}

/// `a * b + c`. Fused (single rounding) on the FMA tags, two roundings elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MulAdd;

impl<T: Scalar> TernaryOp<T> for MulAdd {
    #[inline(always)]
    unsafe fn reg<A: Kernel<T>>(a: A::Reg, b: A::Reg, c: A::Reg) -> A::Reg {
        A::mul_add(a, b, c)
    }

    #[inline(always)]
    fn lane(a: T, b: T, c: T) -> T {
        a.lane_mul(b).lane_add(c)
    }
}

/// Blend: the first operand is the mask, lanes of the second operand are taken where
/// it is set, lanes of the third elsewhere.
///
/// Mask lanes must be all ones or all zeros, as produced by the comparisons; the register
/// kernels blend bitwise or on the top bit only, so other patterns differ between tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Select;

impl<T: Scalar> TernaryOp<T> for Select {
    #[inline(always)]
    unsafe fn reg<A: Kernel<T>>(mask: A::Reg, a: A::Reg, b: A::Reg) -> A::Reg {
        A::select(mask, a, b)
    }

    #[inline(always)]
    fn lane(mask: T, a: T, b: T) -> T {
        if mask.is_set() {
            a
        } else {
            b
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shl;

impl<T: IntScalar> IntBinaryOp<T> for Shl {
    #[inline(always)]
    unsafe fn reg<A: IntKernel<T>>(a: A::Reg, count: A::Reg) -> A::Reg {
        A::shl(a, count)
    }

    #[inline(always)]
    fn lane(a: T, count: T) -> T {
        a.lane_shl(count)
    }
}

/// Arithmetic for signed lanes, logical for unsigned lanes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shr;

impl<T: IntScalar> IntBinaryOp<T> for Shr {
    #[inline(always)]
    unsafe fn reg<A: IntKernel<T>>(a: A::Reg, count: A::Reg) -> A::Reg {
        A::shr(a, count)
    }

    #[inline(always)]
    fn lane(a: T, count: T) -> T {
        a.lane_shr(count)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqrt;

impl<T: FloatScalar> FloatUnaryOp<T> for Sqrt {
    #[inline(always)]
    unsafe fn reg<A: FloatKernel<T>>(a: A::Reg) -> A::Reg {
        A::sqrt(a)
    }

    #[inline(always)]
    fn lane(a: T) -> T {
        a.lane_sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Abs;

impl<T: FloatScalar> FloatUnaryOp<T> for Abs {
    #[inline(always)]
    unsafe fn reg<A: FloatKernel<T>>(a: A::Reg) -> A::Reg {
        A::abs(a)
    }

    #[inline(always)]
    fn lane(a: T) -> T {
        a.lane_abs()
    }
}
