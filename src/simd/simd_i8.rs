//! Kernels for `i8` lanes.
//!
//! No instruction set has an 8-bit multiply (or 8-bit variable shifts): those run on
//! the two halves of the register down to the per-lane loop.
use super::forward::{forward_binary, forward_from_bitmask, forward_mask, forward_reduce, Narrow};
use super::generic::{Fused, IntKernel, Kernel};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// ------------------------------------------- SSE ------------------------------------------

mod sse {
    use super::super::config::{GENERIC, SSE};
    use super::super::generic::{narrow_m128i, sse_int_common};
    use super::super::mask_table::EXPAND_EPI8;
    use super::*;

    impl Kernel<i8> for SSE {
        type Reg = __m128i;

        sse_int_common!(i8, i8, _mm_set1_epi8);

        #[inline(always)]
        unsafe fn add(a: __m128i, b: __m128i) -> __m128i {
            _mm_add_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m128i, b: __m128i) -> __m128i {
            _mm_sub_epi8(a, b)
        }

        forward_binary!(Kernel<i8>; mul, div, rem);

        #[inline(always)]
        unsafe fn cmp_eq(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmpeq_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmpgt_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_lt(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmplt_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m128i) -> u64 {
            _mm_movemask_epi8(a) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m128i {
            let lo = EXPAND_EPI8[(bits & 0xff) as usize];
            let hi = EXPAND_EPI8[((bits >> 8) & 0xff) as usize];
            _mm_set_epi64x(hi as i64, lo as i64)
        }

        forward_reduce!(i8);
    }

    impl IntKernel<i8> for SSE {
        forward_binary!(IntKernel<i8>; shl, shr);
    }

    impl Narrow<i8> for SSE {
        type Half = GENERIC;

        narrow_m128i!(i8, 8);
    }

    // ------------------------------------ TESTS --------------------------------------

}

// ------------------------------------------- AVX ------------------------------------------

mod avx {
    use super::super::config::{AVX, SSE};
    use super::super::generic::{avx_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    impl Kernel<i8> for AVX {
        type Reg = __m256i;

        avx_int_memory!(i8, i8, _mm256_set1_epi8);
        avx_int_bitwise!();

        forward_binary!(Kernel<i8>;
            add, sub, mul, div, rem, min, max, cmp_eq, cmp_gt, cmp_lt);
        forward_mask!(i8);
        forward_reduce!(i8);
    }

    impl IntKernel<i8> for AVX {
        forward_binary!(IntKernel<i8>; shl, shr);
    }

    impl Fused<i8> for AVX {}

    impl Narrow<i8> for AVX {
        type Half = SSE;

        narrow_m256i!();
    }

    // ------------------------------------ TESTS --------------------------------------

}

// ------------------------------------------ AVX2 ------------------------------------------

mod avx2 {
    use super::super::config::{AVX2, SSE};
    use super::super::generic::{avx2_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    impl Kernel<i8> for AVX2 {
        type Reg = __m256i;

        avx_int_memory!(i8, i8, _mm256_set1_epi8);
        avx2_int_bitwise!();

        #[inline(always)]
        unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
            _mm256_add_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
            _mm256_sub_epi8(a, b)
        }

        forward_binary!(Kernel<i8>; mul, div, rem);

        #[inline(always)]
        unsafe fn min(a: __m256i, b: __m256i) -> __m256i {
            _mm256_min_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m256i, b: __m256i) -> __m256i {
            _mm256_max_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpeq_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpgt_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m256i) -> u64 {
            _mm256_movemask_epi8(a) as u32 as u64
        }

        forward_from_bitmask!(i8);
        forward_reduce!(i8);
    }

    impl IntKernel<i8> for AVX2 {
        forward_binary!(IntKernel<i8>; shl, shr);
    }

    impl Fused<i8> for AVX2 {}

    impl Narrow<i8> for AVX2 {
        type Half = SSE;

        narrow_m256i!();
    }

    // ------------------------------------ TESTS --------------------------------------

}

// ----------------------------------------- AVX512 -----------------------------------------

#[cfg(feature = "avx512")]
mod avx512 {
    use super::super::config::{AVX2, AVX512};
    use super::super::generic::{avx512_int_cmp, avx512_int_common, narrow_m512i};
    use super::*;

    impl Kernel<i8> for AVX512 {
        type Reg = __m512i;

        avx512_int_common!(i8, i8, _mm512_set1_epi8);

        #[inline(always)]
        unsafe fn add(a: __m512i, b: __m512i) -> __m512i {
            _mm512_add_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m512i, b: __m512i) -> __m512i {
            _mm512_sub_epi8(a, b)
        }

        forward_binary!(Kernel<i8>; mul, div, rem);

        #[inline(always)]
        unsafe fn min(a: __m512i, b: __m512i) -> __m512i {
            _mm512_min_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m512i, b: __m512i) -> __m512i {
            _mm512_max_epi8(a, b)
        }

        avx512_int_cmp!(
            _mm512_movm_epi8,
            _mm512_cmpeq_epi8_mask,
            _mm512_cmpneq_epi8_mask,
            _mm512_cmplt_epi8_mask,
            _mm512_cmple_epi8_mask,
            _mm512_cmpgt_epi8_mask,
            _mm512_cmpge_epi8_mask
        );

        #[inline(always)]
        unsafe fn to_bitmask(a: __m512i) -> u64 {
            _mm512_movepi8_mask(a)
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m512i {
            _mm512_movm_epi8(bits)
        }

        forward_reduce!(i8);
    }

    impl IntKernel<i8> for AVX512 {
        forward_binary!(IntKernel<i8>; shl, shr);
    }

    impl Narrow<i8> for AVX512 {
        type Half = AVX2;

        narrow_m512i!();
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX512;
        use crate::simd::test_utils::{avx512_detected, int_kernel_tests};

        int_kernel_tests!(i8, AVX512, 64, avx512_detected());
    }
}
