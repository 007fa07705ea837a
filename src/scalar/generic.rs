//! The portable `GENERIC` kernel: every register operation is a loop over the lanes
//! of one 64-bit word, applying the per-lane formula of [`Scalar`].

use super::{FloatScalar, IntScalar, Scalar};
use crate::ops::BinaryOp;
use crate::simd::{FloatKernel, IntKernel, Kernel, GENERIC};

#[inline(always)]
fn map1<T: Scalar>(a: T::Word, f: impl Fn(T) -> T) -> T::Word {
    let mut out = a;
    for x in out.as_mut() {
        *x = f(*x);
    }
    out
}

#[inline(always)]
fn map2<T: Scalar>(a: T::Word, b: T::Word, f: impl Fn(T, T) -> T) -> T::Word {
    let mut out = a;
    for (x, &y) in out.as_mut().iter_mut().zip(b.as_ref()) {
        *x = f(*x, y);
    }
    out
}

impl<T: Scalar> Kernel<T> for GENERIC {
    type Reg = T::Word;

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const T) -> T::Word {
        std::ptr::read(ptr as *const T::Word)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const T) -> T::Word {
        std::ptr::read_unaligned(ptr as *const T::Word)
    }

    #[inline(always)]
    unsafe fn store_aligned(ptr: *mut T, a: T::Word) {
        std::ptr::write(ptr as *mut T::Word, a)
    }

    #[inline(always)]
    unsafe fn store_unaligned(ptr: *mut T, a: T::Word) {
        std::ptr::write_unaligned(ptr as *mut T::Word, a)
    }

    #[inline(always)]
    unsafe fn broadcast(value: T) -> T::Word {
        map1(T::ZERO_WORD, |_| value)
    }

    #[inline(always)]
    unsafe fn setzero() -> T::Word {
        T::ZERO_WORD
    }

    #[inline(always)]
    unsafe fn add(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_add)
    }

    #[inline(always)]
    unsafe fn sub(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_sub)
    }

    #[inline(always)]
    unsafe fn mul(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_mul)
    }

    #[inline(always)]
    unsafe fn div(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_div)
    }

    #[inline(always)]
    unsafe fn rem(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_rem)
    }

    #[inline(always)]
    unsafe fn min(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_min)
    }

    #[inline(always)]
    unsafe fn max(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_max)
    }

    #[inline(always)]
    unsafe fn and(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_and)
    }

    #[inline(always)]
    unsafe fn or(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_or)
    }

    #[inline(always)]
    unsafe fn xor(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_xor)
    }

    #[inline(always)]
    unsafe fn andnot(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_andnot)
    }

    #[inline(always)]
    unsafe fn not(a: T::Word) -> T::Word {
        map1(a, T::lane_not)
    }

    #[inline(always)]
    unsafe fn cmp_eq(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_eq)
    }

    #[inline(always)]
    unsafe fn cmp_ne(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_ne)
    }

    #[inline(always)]
    unsafe fn cmp_lt(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_lt)
    }

    #[inline(always)]
    unsafe fn cmp_le(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_le)
    }

    #[inline(always)]
    unsafe fn cmp_gt(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_gt)
    }

    #[inline(always)]
    unsafe fn cmp_ge(a: T::Word, b: T::Word) -> T::Word {
        map2(a, b, T::lane_ge)
    }

    #[inline(always)]
    unsafe fn select(mask: T::Word, a: T::Word, b: T::Word) -> T::Word {
        let mut out = b;
        for ((x, &m), &y) in out.as_mut().iter_mut().zip(mask.as_ref()).zip(a.as_ref()) {
            if m.is_set() {
                *x = y;
            }
        }
        out
    }

    #[inline(always)]
    unsafe fn to_bitmask(a: T::Word) -> u64 {
        a.as_ref()
            .iter()
            .enumerate()
            .fold(0, |mask, (i, x)| mask | ((x.is_set() as u64) << i))
    }

    #[inline(always)]
    unsafe fn from_bitmask(bits: u64) -> T::Word {
        let mut out = T::ZERO_WORD;
        for (i, x) in out.as_mut().iter_mut().enumerate() {
            *x = T::from_bool(bits & (1 << i) != 0);
        }
        out
    }

    #[inline(always)]
    unsafe fn reduce<Op: BinaryOp<T>>(a: T::Word) -> T {
        let lanes = a.as_ref();
        lanes[1..].iter().fold(lanes[0], |acc, &x| Op::lane(acc, x))
    }
}

impl<T: IntScalar> IntKernel<T> for GENERIC {
    #[inline(always)]
    unsafe fn shl(a: T::Word, count: T::Word) -> T::Word {
        map2(a, count, T::lane_shl)
    }

    #[inline(always)]
    unsafe fn shr(a: T::Word, count: T::Word) -> T::Word {
        map2(a, count, T::lane_shr)
    }
}

impl<T: FloatScalar> FloatKernel<T> for GENERIC {
    #[inline(always)]
    unsafe fn sqrt(a: T::Word) -> T::Word {
        map1(a, T::lane_sqrt)
    }

    #[inline(always)]
    unsafe fn abs(a: T::Word) -> T::Word {
        map1(a, T::lane_abs)
    }
}

// ======================================= TESTS =======================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{Add, Max, Min};

    #[test]
    fn test_word_roundtrip_through_memory() {
        let data: [i16; 4] = [1, -2, 3, -4];
        let mut out = [0i16; 4];
        unsafe {
            let reg = <GENERIC as Kernel<i16>>::load_unaligned(data.as_ptr());
            <GENERIC as Kernel<i16>>::store_unaligned(out.as_mut_ptr(), reg);
        }
        assert_eq!(out, data);
    }

    #[test]
    fn test_select_and_bitmask() {
        unsafe {
            let mask = <GENERIC as Kernel<u8>>::from_bitmask(0b1010_0101);
            assert_eq!(<GENERIC as Kernel<u8>>::to_bitmask(mask), 0b1010_0101);
            let a = <GENERIC as Kernel<u8>>::broadcast(7);
            let b = <GENERIC as Kernel<u8>>::setzero();
            let picked = <GENERIC as Kernel<u8>>::select(mask, a, b);
            assert_eq!(picked, [7, 0, 7, 0, 0, 7, 0, 7]);
        }
    }

    #[test]
    fn test_reduce_folds_left_to_right() {
        let word: [i16; 4] = [3, -1, 8, 2];
        unsafe {
            assert_eq!(<GENERIC as Kernel<i16>>::reduce::<Add>(word), 12);
            assert_eq!(<GENERIC as Kernel<i16>>::reduce::<Min>(word), -1);
            assert_eq!(<GENERIC as Kernel<i16>>::reduce::<Max>(word), 8);
        }
    }

    #[test]
    fn test_float_comparisons_are_unordered_aware() {
        let a: [f32; 2] = [f32::NAN, 1.0];
        let b: [f32; 2] = [1.0, 1.0];
        unsafe {
            let ne = <GENERIC as Kernel<f32>>::cmp_ne(a, b);
            let ge = <GENERIC as Kernel<f32>>::cmp_ge(a, b);
            assert_eq!(<GENERIC as Kernel<f32>>::to_bitmask(ne), 0b01);
            assert_eq!(<GENERIC as Kernel<f32>>::to_bitmask(ge), 0b10);
        }
    }

    #[test]
    fn test_shift_words() {
        let a: [u32; 2] = [1, 0x8000_0000];
        let count: [u32; 2] = [4, 31];
        unsafe {
            assert_eq!(<GENERIC as IntKernel<u32>>::shl(a, count), [16, 0]);
            assert_eq!(<GENERIC as IntKernel<u32>>::shr(a, count), [0, 1]);
        }
    }
}
