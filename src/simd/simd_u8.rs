//! Kernels for `u8` lanes.
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

    #[inline(always)]
    unsafe fn flip_sign(a: __m128i) -> __m128i {
        _mm_xor_si128(a, _mm_set1_epi8(i8::MIN))
    }

    impl Kernel<u8> for SSE {
        type Reg = __m128i;

        sse_int_common!(u8, i8, _mm_set1_epi8);

        #[inline(always)]
        unsafe fn add(a: __m128i, b: __m128i) -> __m128i {
            _mm_add_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m128i, b: __m128i) -> __m128i {
            _mm_sub_epi8(a, b)
        }

        forward_binary!(Kernel<u8>; mul, div, rem);

        #[inline(always)]
        unsafe fn min(a: __m128i, b: __m128i) -> __m128i {
            _mm_min_epu8(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m128i, b: __m128i) -> __m128i {
            _mm_max_epu8(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmpeq_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m128i, b: __m128i) -> __m128i {
            _mm_cmpgt_epi8(flip_sign(a), flip_sign(b))
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

        forward_reduce!(u8);
    }

    impl IntKernel<u8> for SSE {
        forward_binary!(IntKernel<u8>; shl, shr);
    }

    impl Narrow<u8> for SSE {
        type Half = GENERIC;

        narrow_m128i!(u8, 8);
    }

    // ------------------------------------ TESTS --------------------------------------

}

// ------------------------------------------- AVX ------------------------------------------

mod avx {
    use super::super::config::{AVX, SSE};
    use super::super::generic::{avx_int_bitwise, avx_int_memory, narrow_m256i};
    use super::*;

    impl Kernel<u8> for AVX {
        type Reg = __m256i;

        avx_int_memory!(u8, i8, _mm256_set1_epi8);
        avx_int_bitwise!();

        forward_binary!(Kernel<u8>;
            add, sub, mul, div, rem, min, max, cmp_eq, cmp_gt, cmp_lt);
        forward_mask!(u8);
        forward_reduce!(u8);
    }

    impl IntKernel<u8> for AVX {
        forward_binary!(IntKernel<u8>; shl, shr);
    }

    impl Fused<u8> for AVX {}

    impl Narrow<u8> for AVX {
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

    #[inline(always)]
    unsafe fn flip_sign(a: __m256i) -> __m256i {
        _mm256_xor_si256(a, _mm256_set1_epi8(i8::MIN))
    }

    impl Kernel<u8> for AVX2 {
        type Reg = __m256i;

        avx_int_memory!(u8, i8, _mm256_set1_epi8);
        avx2_int_bitwise!();

        #[inline(always)]
        unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
            _mm256_add_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m256i, b: __m256i) -> __m256i {
            _mm256_sub_epi8(a, b)
        }

        forward_binary!(Kernel<u8>; mul, div, rem);

        #[inline(always)]
        unsafe fn min(a: __m256i, b: __m256i) -> __m256i {
            _mm256_min_epu8(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m256i, b: __m256i) -> __m256i {
            _mm256_max_epu8(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpeq_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn cmp_gt(a: __m256i, b: __m256i) -> __m256i {
            _mm256_cmpgt_epi8(flip_sign(a), flip_sign(b))
        }

        #[inline(always)]
        unsafe fn to_bitmask(a: __m256i) -> u64 {
            _mm256_movemask_epi8(a) as u32 as u64
        }

        forward_from_bitmask!(u8);
        forward_reduce!(u8);
    }

    impl IntKernel<u8> for AVX2 {
        forward_binary!(IntKernel<u8>; shl, shr);
    }

    impl Fused<u8> for AVX2 {}

    impl Narrow<u8> for AVX2 {
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

    impl Kernel<u8> for AVX512 {
        type Reg = __m512i;

        avx512_int_common!(u8, i8, _mm512_set1_epi8);

        #[inline(always)]
        unsafe fn add(a: __m512i, b: __m512i) -> __m512i {
            _mm512_add_epi8(a, b)
        }

        #[inline(always)]
        unsafe fn sub(a: __m512i, b: __m512i) -> __m512i {
            _mm512_sub_epi8(a, b)
        }

        forward_binary!(Kernel<u8>; mul, div, rem);

        #[inline(always)]
        unsafe fn min(a: __m512i, b: __m512i) -> __m512i {
            _mm512_min_epu8(a, b)
        }

        #[inline(always)]
        unsafe fn max(a: __m512i, b: __m512i) -> __m512i {
            _mm512_max_epu8(a, b)
        }

        avx512_int_cmp!(
            _mm512_movm_epi8,
            _mm512_cmpeq_epu8_mask,
            _mm512_cmpneq_epu8_mask,
            _mm512_cmplt_epu8_mask,
            _mm512_cmple_epu8_mask,
            _mm512_cmpgt_epu8_mask,
            _mm512_cmpge_epu8_mask
        );

        #[inline(always)]
        unsafe fn to_bitmask(a: __m512i) -> u64 {
            _mm512_movepi8_mask(a)
        }

        #[inline(always)]
        unsafe fn from_bitmask(bits: u64) -> __m512i {
            _mm512_movm_epi8(bits)
        }

        forward_reduce!(u8);
    }

    impl IntKernel<u8> for AVX512 {
        forward_binary!(IntKernel<u8>; shl, shr);
    }

    impl Narrow<u8> for AVX512 {
        type Half = AVX2;

        narrow_m512i!();
    }

    // ------------------------------------ TESTS --------------------------------------

}
