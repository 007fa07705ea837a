//! Forwarding adapter: run an operation of a wide tag on the two halves of its
//! register with the half-width tag.
//!
//! A kernel that has no native instruction for an operation declares how to split its
//! register in two ([`Narrow`]) and forwards the operation with one of the macros of
//! this module. Halving continues recursively (AVX512 -> AVX2 -> SSE -> GENERIC) until
//! a tag implements the operation natively.

use super::generic::Kernel;
use crate::ops::BinaryOp;
use crate::scalar::Scalar;

/// A tag whose register can be split in a low and a high half of the `Half` tag.
pub trait Narrow<T: Scalar>: Kernel<T> {
    type Half: Kernel<T>;

    unsafe fn split(a: Self::Reg) -> (HalfReg<T, Self>, HalfReg<T, Self>);
    unsafe fn join(lo: HalfReg<T, Self>, hi: HalfReg<T, Self>) -> Self::Reg;
}

/// The register of the half-width tag of `A`
pub type HalfReg<T, A> = <<A as Narrow<T>>::Half as Kernel<T>>::Reg;

#[inline(always)]
pub unsafe fn binary<T: Scalar, A: Narrow<T>>(
    a: A::Reg,
    b: A::Reg,
    f: unsafe fn(HalfReg<T, A>, HalfReg<T, A>) -> HalfReg<T, A>,
) -> A::Reg {
    let (a_lo, a_hi) = A::split(a);
    let (b_lo, b_hi) = A::split(b);
    A::join(f(a_lo, b_lo), f(a_hi, b_hi))
}

/// The bits of the high half follow the bits of the low half
#[inline(always)]
pub unsafe fn to_bitmask<T: Scalar, A: Narrow<T>>(a: A::Reg) -> u64 {
    let (lo, hi) = A::split(a);
    let half_lanes = <A::Half as Kernel<T>>::LANES;
    <A::Half as Kernel<T>>::to_bitmask(lo) | (<A::Half as Kernel<T>>::to_bitmask(hi) << half_lanes)
}

#[inline(always)]
pub unsafe fn from_bitmask<T: Scalar, A: Narrow<T>>(bits: u64) -> A::Reg {
    let half_lanes = <A::Half as Kernel<T>>::LANES;
    A::join(
        <A::Half as Kernel<T>>::from_bitmask(bits),
        <A::Half as Kernel<T>>::from_bitmask(bits >> half_lanes),
    )
}

/// Combine both halves vertically, then reduce the half-width register
#[inline(always)]
pub unsafe fn reduce<T: Scalar, A: Narrow<T>, Op: BinaryOp<T>>(a: A::Reg) -> T {
    let (lo, hi) = A::split(a);
    <A::Half as Kernel<T>>::reduce::<Op>(Op::reg::<A::Half>(lo, hi))
}

// ------------------------------------ Macros -----------------------------------------

/// Forward binary register operations of `$tr<$scalar_type>` to the half-width tag
macro_rules! forward_binary {
    ($tr:ident<$scalar_type:ty>; $($op:ident),+ $(,)?) => {
        $(
            #[inline(always)]
            unsafe fn $op(a: Self::Reg, b: Self::Reg) -> Self::Reg {
                $crate::simd::forward::binary::<$scalar_type, Self>(
                    a,
                    b,
                    <<Self as $crate::simd::forward::Narrow<$scalar_type>>::Half as $crate::simd::$tr<$scalar_type>>::$op,
                )
            }
        )+
    };
}

/// Forward the mask codec (`to_bitmask`, `from_bitmask`)
macro_rules! forward_mask {
    ($scalar_type:ty) => {
        $crate::simd::forward::forward_to_bitmask!($scalar_type);
        $crate::simd::forward::forward_from_bitmask!($scalar_type);
    };
}

macro_rules! forward_to_bitmask {
    ($scalar_type:ty) => {
        #[inline(always)]
        unsafe fn to_bitmask(a: Self::Reg) -> u64 {
            $crate::simd::forward::to_bitmask::<$scalar_type, Self>(a)
        }
    };
}

macro_rules! forward_from_bitmask {
    ($scalar_type:ty) => {
        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> Self::Reg {
            $crate::simd::forward::from_bitmask::<$scalar_type, Self>(bits)
        }
    };
}

/// Forward the horizontal reduction
macro_rules! forward_reduce {
    ($scalar_type:ty) => {
        #[inline(always)]
        unsafe fn reduce<Op: $crate::ops::BinaryOp<$scalar_type>>(a: Self::Reg) -> $scalar_type {
            $crate::simd::forward::reduce::<$scalar_type, Self, Op>(a)
        }
    };
}

pub(crate) use {
    forward_binary, forward_from_bitmask, forward_mask, forward_reduce, forward_to_bitmask,
};
