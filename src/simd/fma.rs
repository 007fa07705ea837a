//! The FMA-augmented tags: `FMA<Base>` shares the registers and every operation of
//! `Base`, only `mul_add` becomes the fused instruction of `Base` ([`Fused`]).

use super::config::FMA;
use super::generic::{FloatKernel, Fused, IntKernel, Kernel};
use crate::ops::BinaryOp;
use crate::scalar::{FloatScalar, IntScalar, Scalar};

macro_rules! delegate {
    ($base:ident; unary: $($u:ident),*; binary: $($b:ident),*) => {
        $(
            #[inline(always)]
            unsafe fn $u(a: Self::Reg) -> Self::Reg {
                $base::$u(a)
            }
        )*
        $(
            #[inline(always)]
            unsafe fn $b(a: Self::Reg, b: Self::Reg) -> Self::Reg {
                $base::$b(a, b)
            }
        )*
    };
}

impl<T: Scalar, B: Fused<T>> Kernel<T> for FMA<B>
where
    FMA<B>: super::config::InstructionSet,
{
    type Reg = B::Reg;

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const T) -> B::Reg {
        B::load_aligned(ptr)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const T) -> B::Reg {
        B::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn store_aligned(ptr: *mut T, a: B::Reg) {
        B::store_aligned(ptr, a)
    }

    #[inline(always)]
    unsafe fn store_unaligned(ptr: *mut T, a: B::Reg) {
        B::store_unaligned(ptr, a)
    }

    #[inline(always)]
    unsafe fn broadcast(value: T) -> B::Reg {
        B::broadcast(value)
    }

    #[inline(always)]
    unsafe fn setzero() -> B::Reg {
        B::setzero()
    }

    delegate!(B;
        unary: not;
        binary: add, sub, mul, div, rem, min, max, and, or, xor, andnot,
            cmp_eq, cmp_ne, cmp_lt, cmp_le, cmp_gt, cmp_ge);

    #[inline(always)]
    unsafe fn mul_add(a: B::Reg, b: B::Reg, c: B::Reg) -> B::Reg {
        B::fmadd(a, b, c)
    }

    #[inline(always)]
    unsafe fn select(mask: B::Reg, a: B::Reg, b: B::Reg) -> B::Reg {
        B::select(mask, a, b)
    }

    #[inline(always)]
    unsafe fn to_bitmask(a: B::Reg) -> u64 {
        B::to_bitmask(a)
    }

    #[inline(always)]
    unsafe fn from_bitmask(bits: u64) -> B::Reg {
        B::from_bitmask(bits)
    }

    #[inline(always)]
    unsafe fn reduce<Op: BinaryOp<T>>(a: B::Reg) -> T {
        B::reduce::<Op>(a)
    }
}

impl<T: IntScalar, B: Fused<T> + IntKernel<T>> IntKernel<T> for FMA<B>
where
    FMA<B>: super::config::InstructionSet,
{
    delegate!(B; unary: ; binary: shl, shr);
}

impl<T: FloatScalar, B: Fused<T> + FloatKernel<T>> FloatKernel<T> for FMA<B>
where
    FMA<B>: super::config::InstructionSet,
{
    delegate!(B; unary: sqrt, abs; binary: );
}
