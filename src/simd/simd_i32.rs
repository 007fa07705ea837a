//! Kernels for `i32` lanes.
//!
//! SSE2 has no 32-bit multiply, AVX has no 256-bit integer arithmetic at all: those
//! operations run on the two halves of the register (see `forward.rs`).
use super::forward::{forward_binary, forward_from_bitmask, forward_reduce, Narrow};
use super::generic::{Fused, IntKernel, Kernel};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// ------------------------------------------- SSE ------------------------------------------

mod sse {
    use super::super::config::{GENERIC, SSE};
    use super::super::generic::{narrow_m128i, sse_int_common};
    use super::super::mask_table::EXPAND_EPI32;
    use super::*;

    impl Kernel<i32> for SSE {
        type Reg = __m128i;

        sse_int_common!(i32, i32, _mm_set1_epi32);

        #[inline(always)]
        unsafe fn add(a: __m128i, b: __m128i) -> __m128i {
            _mm_add_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m128i, b: __m128i) -> __m128i {
            _mm_sub_epi32(a, b)
        }

        forward_binary!(Kernel<i32>; mul, div, rem);

        #[inline(always)]
        unsafe fn cmp_eq(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmpeq_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmpgt_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_lt(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmplt_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m128i) -> u64 {
            _mm_movemask_ps(_mm_castsi128_ps(a)) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m128i {
            _mm_loadu_si128(EXPAND_EPI32[(bits & 0xf) as usize].as_ptr() as *const __m128i)
        }

        forward_reduce!(i32);
    }

    impl IntKernel<i32> for SSE {
        forward_binary!(IntKernel<i32>; shl, shr);
    }

    impl Narrow<i32> for SSE {
        type Half = GENERIC;

        narrow_m128i!(i32, 2);
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::SSE;
        use crate::simd::test_utils::int_kernel_tests;

        int_kernel_tests!(i32, SSE, 8, is_x86_feature_detected!("sse2"));

        #[test]
        fn test_negative_numbers_compare_below_positive_ones() {
            if !is_x86_feature_detected!("sse2") {
                return;
            }
            let a = crate::SimdVec::<i32, 4>::new([-1, i32::MIN, 5, 0]);
            let b = crate::SimdVec::<i32, 4>::splat(1);
            let lt = unsafe { a.binary_on_unchecked::<SSE, crate::ops::CmpLt>(b) };
            assert_eq!(lt.to_array(), [-1, -1, 0, -1]);
        }
    }
}

// ------------------------------------------- AVX ------------------------------------------

mod avx {
    use super::super::config::{AVX, SSE};
    use super::super::generic::{avx_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    impl Kernel<i32> for AVX {
        type Reg = __m256i;

        avx_int_memory!(i32, i32, _mm256_set1_epi32);
        avx_int_bitwise!();

        forward_binary!(Kernel<i32>;
            add, sub, mul, div, rem, min, max, cmp_eq, cmp_gt, cmp_lt);

        #[inline(always)]
        unsafe fn to_bitmask(a: __m256i) -> u64 {
            _mm256_movemask_ps(_mm256_castsi256_ps(a)) as u64
        }

        forward_from_bitmask!(i32);
        forward_reduce!(i32);
    }

    impl IntKernel<i32> for AVX {
        forward_binary!(IntKernel<i32>; shl, shr);
    }

    impl Fused<i32> for AVX {}

    impl Narrow<i32> for AVX {
        type Half = SSE;

        narrow_m256i!();
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX;
        use crate::simd::test_utils::int_kernel_tests;

        int_kernel_tests!(i32, AVX, 16, is_x86_feature_detected!("avx"));
    }
}

// ------------------------------------------ AVX2 ------------------------------------------

mod avx2 {
    use super::super::config::{AVX2, SSE};
    use super::super::generic::{avx2_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    impl Kernel<i32> for AVX2 {
        type Reg = __m256i;

        avx_int_memory!(i32, i32, _mm256_set1_epi32);
        avx2_int_bitwise!();

        #[inline(always)]
        unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
            _mm256_add_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
            _mm256_sub_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m256i, b: __m256i) -> __m256i {
            _mm256_mullo_epi32(a, b)
        }

        forward_binary!(Kernel<i32>; div, rem);

        #[inline(always)]
        unsafe fn min(a: __m256i, b: __m256i) -> __m256i {
            _mm256_min_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m256i, b: __m256i) -> __m256i {
            _mm256_max_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpeq_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpgt_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m256i) -> u64 {
            _mm256_movemask_ps(_mm256_castsi256_ps(a)) as u64
        }

        forward_from_bitmask!(i32);
        forward_reduce!(i32);
    }

    impl IntKernel<i32> for AVX2 {
        #[inline(always)]
        unsafe fn shl(a: __m256i, count: __m256i) -> __m256i {
            _mm256_sllv_epi32(a, count)
        }

        #[inline(always)]
        unsafe fn shr(a: __m256i, count: __m256i) -> __m256i {
            _mm256_srav_epi32(a, count)
        }
    }

    impl Fused<i32> for AVX2 {}

    impl Narrow<i32> for AVX2 {
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

    impl Kernel<i32> for AVX512 {
        type Reg = __m512i;

        avx512_int_common!(i32, i32, _mm512_set1_epi32);

        #[inline(always)]
        unsafe fn add(a: __m512i, b: __m512i) -> __m512i {
            _mm512_add_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m512i, b: __m512i) -> __m512i {
            _mm512_sub_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn mul(a: __m512i, b: __m512i) -> __m512i {
            _mm512_mullo_epi32(a, b)
        }

        forward_binary!(Kernel<i32>; div, rem);

        #[inline(always)]
        unsafe fn min(a: __m512i, b: __m512i) -> __m512i {
            _mm512_min_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m512i, b: __m512i) -> __m512i {
            _mm512_max_epi32(a, b)
        }

        avx512_int_cmp!(
            _mm512_movm_epi32,
            _mm512_cmpeq_epi32_mask,
            _mm512_cmpneq_epi32_mask,
            _mm512_cmplt_epi32_mask,
            _mm512_cmple_epi32_mask,
            _mm512_cmpgt_epi32_mask,
            _mm512_cmpge_epi32_mask
        );

        #[inline(always)]
        unsafe fn to_bitmask(a: __m512i) -> u64 {
            _mm512_movepi32_mask(a) as u64
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m512i {
            _mm512_movm_epi32(bits as __mmask16)
        }

        forward_reduce!(i32);
    }

    impl IntKernel<i32> for AVX512 {
        #[inline(always)]
        unsafe fn shl(a: __m512i, count: __m512i) -> __m512i {
            _mm512_sllv_epi32(a, count)
        }

        #[inline(always)]
        unsafe fn shr(a: __m512i, count: __m512i) -> __m512i {
            _mm512_srav_epi32(a, count)
        }
    }

    impl Narrow<i32> for AVX512 {
        type Half = AVX2;

        narrow_m512i!();
    }

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::AVX512;
        use crate::simd::test_utils::{avx512_detected, int_kernel_tests};

        int_kernel_tests!(i32, AVX512, 32, avx512_detected());
    }
}
