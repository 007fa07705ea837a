//! Shared kernel tests: every operation of a tag must give the bits of the lane loop.

use dev_utils::config::NB_RUNS;
use dev_utils::utils;
use num_traits::NumCast;

use crate::ops::*;
use crate::scalar::{FloatScalar, IntScalar, Scalar, SignedScalar};
use crate::simd::{FloatKernel, IntKernel, Kernel};
use crate::{SimdVec, SimdVecBool};

/// Lane equality on the bits, with every NaN equal to every other NaN
fn same_lane<T: Scalar>(a: T, b: T) -> bool {
    #[allow(clippy::eq_op)]
    let both_nan = a != a && b != b;
    both_nan || a.to_bits() == b.to_bits()
}

#[track_caller]
pub(crate) fn assert_same_lanes<T: Scalar, const W: usize>(
    simd: SimdVec<T, W>,
    lanes: SimdVec<T, W>,
    what: &str,
) {
    for i in 0..W {
        assert!(
            same_lane(simd[i], lanes[i]),
            "{}: lane {} differs: {:?} vs {:?}\n  kernel: {:?}\n  lanes:  {:?}",
            what,
            i,
            simd[i],
            lanes[i],
            simd,
            lanes
        );
    }
}

fn random_vec<T: Scalar, const W: usize>(get_data: fn(usize) -> Vec<T>) -> SimdVec<T, W> {
    SimdVec::from_slice(&get_data(W))
}

/// Mix equal lanes into `b` so the comparisons see ties
fn with_ties<T: Scalar, const W: usize>(a: SimdVec<T, W>, b: SimdVec<T, W>) -> SimdVec<T, W> {
    SimdVec::from_fn(|i| if i % 3 == 0 { a[i] } else { b[i] })
}

macro_rules! check_binary_ops {
    ($tag:ty, $a:expr, $b:expr; $($op:ident),+) => {
        $(
            let simd = $a.binary_on_unchecked::<$tag, $op>($b);
            let lanes = SimdVec::from_fn(|i| <$op as BinaryOp<_>>::lane($a[i], $b[i]));
            assert_same_lanes(simd, lanes, stringify!($op));
        )+
    };
}

/// Arithmetic, bitwise, comparison and selection of tag `A` against the lane loop
pub(crate) unsafe fn test_common_ops<T: Scalar, A: Kernel<T>, const W: usize>(
    get_data: fn(usize) -> Vec<T>,
) {
    for _ in 0..NB_RUNS {
        let a: SimdVec<T, W> = random_vec(get_data);
        let b = with_ties(a, random_vec(get_data));
        let c: SimdVec<T, W> = random_vec(get_data);

        check_binary_ops!(A, a, b;
            Add, Sub, Mul, Min, Max, And, Or, Xor, AndNot,
            CmpEq, CmpNe, CmpLt, CmpLe, CmpGt, CmpGe);

        let simd = a.unary_on_unchecked::<A, Not>();
        assert_same_lanes(simd, SimdVec::from_fn(|i| a[i].lane_not()), "Not");

        let mask = a.binary_on_unchecked::<A, CmpLt>(b);
        let simd = mask.ternary_on_unchecked::<A, Select>(a, c);
        let lanes = SimdVec::from_fn(|i| if a[i] < b[i] { a[i] } else { c[i] });
        assert_same_lanes(simd, lanes, "Select");

        if !T::IS_FLOAT {
            // float products are rounded once or twice depending on the tag
            let simd = a.ternary_on_unchecked::<A, MulAdd>(b, c);
            let lanes = SimdVec::from_fn(|i| MulAdd::lane(a[i], b[i], c[i]));
            assert_same_lanes(simd, lanes, "MulAdd");
        }
    }
}

/// Division and remainder (integer divisors are never zero)
pub(crate) unsafe fn test_division<T: Scalar, A: Kernel<T>, const W: usize>(
    get_data: fn(usize) -> Vec<T>,
) {
    for _ in 0..NB_RUNS {
        let a: SimdVec<T, W> = random_vec(get_data);
        let b: SimdVec<T, W> = random_vec(get_data);
        let b = SimdVec::from_fn(|i| if b[i] == T::zero() { T::one() } else { b[i] });
        check_binary_ops!(A, a, b; Div, Rem);
    }
}

/// Loads and stores (aligned and unaligned) of tag `A`
pub(crate) unsafe fn test_memory<T: Scalar, A: Kernel<T>>(get_data: fn(usize) -> Vec<T>) {
    let mut buffer = crate::utils::Aligned([T::zero(); 128]);
    let lanes = A::LANES;
    let data = get_data(lanes + 1);
    buffer[..lanes].copy_from_slice(&data[..lanes]);

    let reg = A::load_aligned(buffer.as_ptr());
    let mut out = crate::utils::Aligned([T::zero(); 128]);
    A::store_aligned(out.as_mut_ptr(), reg);
    assert!(out[..lanes].iter().zip(&data).all(|(&x, &y)| same_lane(x, y)));

    // one lane off the alignment
    let reg = A::load_unaligned(data[1..].as_ptr());
    A::store_unaligned(out.as_mut_ptr().add(1), reg);
    assert!(out[1..=lanes].iter().zip(&data[1..]).all(|(&x, &y)| same_lane(x, y)));

    let reg = A::broadcast(data[0]);
    A::store_unaligned(out.as_mut_ptr(), reg);
    assert!(out[..lanes].iter().all(|&x| same_lane(x, data[0])));

    A::store_unaligned(out.as_mut_ptr(), A::setzero());
    assert!(out[..lanes].iter().all(|&x| x.to_bits() == T::zero().to_bits()));
}

/// Mask codec of tag `A`: round trip and agreement with the lane loop
pub(crate) unsafe fn test_mask<T: Scalar, A: Kernel<T>, const W: usize>(
    get_data: fn(usize) -> Vec<T>,
) {
    for _ in 0..NB_RUNS {
        let mask = utils::get_random_mask(W);
        let b = SimdVecBool::<T, W>::from_mask_on_unchecked::<A>(mask);
        assert_eq!(b, SimdVecBool::from_fn(|i| mask & (1 << i) != 0));
        assert_eq!(b.to_mask_on_unchecked::<A>(), mask);

        let a: SimdVec<T, W> = random_vec(get_data);
        let c: SimdVec<T, W> = random_vec(get_data);
        let lt = a.cmp_lt(c);
        let expected = (0..W).fold(0u64, |m, i| m | (((a[i] < c[i]) as u64) << i));
        assert_eq!(lt.to_mask_on_unchecked::<A>(), expected);
    }
    // bits past the lanes never come back
    let all = SimdVecBool::<T, W>::from_mask_on_unchecked::<A>(u64::MAX);
    assert_eq!(all.to_mask_on_unchecked::<A>(), SimdVecBool::<T, W>::LANE_MASK);
}

/// Reductions that do not depend on the association order
pub(crate) unsafe fn test_exact_reductions<T: Scalar, A: Kernel<T>, const W: usize>(
    get_data: fn(usize) -> Vec<T>,
) {
    for _ in 0..NB_RUNS {
        let a: SimdVec<T, W> = random_vec(get_data);
        let lane_fold = |f: fn(T, T) -> T| a.reduce(f);
        assert!(same_lane(a.reduce_on_unchecked::<A, Min>(), lane_fold(T::lane_min)));
        assert!(same_lane(a.reduce_on_unchecked::<A, Max>(), lane_fold(T::lane_max)));
        assert!(same_lane(a.reduce_on_unchecked::<A, Or>(), lane_fold(T::lane_or)));
        assert!(same_lane(a.reduce_on_unchecked::<A, And>(), lane_fold(T::lane_and)));
        if !T::IS_FLOAT {
            assert!(same_lane(a.reduce_on_unchecked::<A, Add>(), lane_fold(T::lane_add)));
            assert!(same_lane(a.reduce_on_unchecked::<A, Xor>(), lane_fold(T::lane_xor)));
        }
    }
}

/// Variable shifts of tag `A`, counts including the ones past the lane width
pub(crate) unsafe fn test_shifts<T: IntScalar, A: IntKernel<T>, const W: usize>(
    get_data: fn(usize) -> Vec<T>,
) {
    for _ in 0..NB_RUNS {
        let a: SimdVec<T, W> = random_vec(get_data);
        let counts = utils::get_random_counts(W, T::NB_BITS as u32 + 2);
        let count = SimdVec::<T, W>::from_fn(|i| T::from_count(counts[i]));
        // raw counts: negative / huge values
        let raw: SimdVec<T, W> = random_vec(get_data);

        for count in [count, raw] {
            let simd = a.shift_on_unchecked::<A, Shl>(count);
            assert_same_lanes(simd, SimdVec::from_fn(|i| a[i].lane_shl(count[i])), "Shl");
            let simd = a.shift_on_unchecked::<A, Shr>(count);
            assert_same_lanes(simd, SimdVec::from_fn(|i| a[i].lane_shr(count[i])), "Shr");
        }
    }
}

/// Float-only operations and the IEEE corner cases of the comparisons
pub(crate) unsafe fn test_float_ops<
    T: FloatScalar + SignedScalar,
    A: FloatKernel<T>,
    const W: usize,
>(
    get_data: fn(usize) -> Vec<T>,
) {
    for _ in 0..NB_RUNS {
        let a: SimdVec<T, W> = random_vec(get_data);
        let simd = a.float_unary_on_unchecked::<A, Abs>();
        assert_same_lanes(simd, SimdVec::from_fn(|i| a[i].lane_abs()), "Abs");
        let simd = simd.float_unary_on_unchecked::<A, Sqrt>();
        assert_same_lanes(simd, SimdVec::from_fn(|i| a[i].lane_abs().lane_sqrt()), "Sqrt");
    }

    let specials = [T::nan(), T::zero(), -T::zero(), T::infinity(), T::neg_infinity(), T::one()];
    let a = SimdVec::<T, W>::from_fn(|i| specials[i % specials.len()]);
    let b = SimdVec::<T, W>::from_fn(|i| specials[(i / specials.len() + i) % specials.len()]);
    check_binary_ops!(A, a, b;
        Min, Max, CmpEq, CmpNe, CmpLt, CmpLe, CmpGt, CmpGe, Add, Mul, Div);
    let simd = a.unary_on_unchecked::<A, Neg>();
    assert_same_lanes(simd, SimdVec::from_fn(|i| -a[i]), "Neg");
}

/// Float `mul_add` against the unfused formula, on values whose products are exact
pub(crate) unsafe fn test_float_mul_add<T: FloatScalar, A: Kernel<T>, const W: usize>() {
    let small = |n: usize| <T as NumCast>::from(n).unwrap_or_else(T::zero);
    let a = SimdVec::<T, W>::from_fn(|i| small(i % 7));
    let b = SimdVec::<T, W>::from_fn(|i| small(i % 5) - T::one());
    let c = SimdVec::<T, W>::splat(T::one() + T::one());
    let simd = a.ternary_on_unchecked::<A, MulAdd>(b, c);
    let lanes = SimdVec::from_fn(|i| MulAdd::lane(a[i], b[i], c[i]));
    assert_same_lanes(simd, lanes, "MulAdd");
}

// ------------------------------------ test suites ------------------------------------

/// AVX512 kernels need the F, BW and DQ subsets
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[allow(dead_code)]
pub(crate) fn avx512_detected() -> bool {
    is_x86_feature_detected!("avx512f")
        && is_x86_feature_detected!("avx512bw")
        && is_x86_feature_detected!("avx512dq")
}

/// The test suite of the integer kernels of one tag. `$w` is the vector width the
/// suite runs on (a whole number of registers, at most 64 lanes).
macro_rules! int_kernel_tests {
    ($scalar_type:ty, $tag:ty, $w:literal, $detected:expr) => {
        use $crate::simd::test_utils;

        fn get_data(n: usize) -> Vec<$scalar_type> {
            <$scalar_type as dev_utils::utils::SampleUniformFullRange>::get_random_array(n)
        }

        #[test]
        fn test_common_ops_match_lanes() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_common_ops::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_division_matches_lanes() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_division::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_memory_roundtrip() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_memory::<$scalar_type, $tag>(get_data) }
        }

        #[test]
        fn test_mask_codec() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_mask::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_reductions_match_lanes() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_exact_reductions::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_shifts_match_lanes() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_shifts::<$scalar_type, $tag, $w>(get_data) }
        }
    };
}

/// The test suite of the float kernels of one tag
macro_rules! float_kernel_tests {
    ($scalar_type:ty, $tag:ty, $w:literal, $detected:expr) => {
        use $crate::simd::test_utils;

        fn get_data(n: usize) -> Vec<$scalar_type> {
            <$scalar_type as dev_utils::utils::SampleUniformFullRange>::get_random_array(n)
        }

        #[test]
        fn test_common_ops_match_lanes() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_common_ops::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_division_matches_lanes() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_division::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_memory_roundtrip() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_memory::<$scalar_type, $tag>(get_data) }
        }

        #[test]
        fn test_mask_codec() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_mask::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_reductions_match_lanes() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_exact_reductions::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_float_ops_match_lanes() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_float_ops::<$scalar_type, $tag, $w>(get_data) }
        }

        #[test]
        fn test_mul_add_on_exact_products() {
            if !$detected {
                return;
            }
            unsafe { test_utils::test_float_mul_add::<$scalar_type, $tag, $w>() }
        }
    };
}

pub(crate) use {float_kernel_tests, int_kernel_tests};
