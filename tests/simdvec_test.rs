use dev_utils::utils::{self, SampleUniformFullRange};
use rstest::rstest;
use simdvec::ops::{Add, Max};
use simdvec::utils::{is_aligned, Aligned};
use simdvec::{complex, SimdError, SimdVec, SimdVecBool, Target, GENERIC};

const NB_RUNS: usize = 200;

fn random_vec<T: SampleUniformFullRange + simdvec::Scalar, const W: usize>() -> SimdVec<T, W> {
    SimdVec::from_slice(&T::get_random_array(W))
}

#[test]
fn test_arithmetic_matches_scalar_loop() {
    for _ in 0..NB_RUNS {
        let a: SimdVec<i32, 16> = random_vec();
        let b: SimdVec<i32, 16> = random_vec();
        let sum = (a + b).to_array();
        let diff = (a - b).to_array();
        let prod = (a * b).to_array();
        for i in 0..16 {
            assert_eq!(sum[i], a[i].wrapping_add(b[i]));
            assert_eq!(diff[i], a[i].wrapping_sub(b[i]));
            assert_eq!(prod[i], a[i].wrapping_mul(b[i]));
        }
        assert_eq!(a.min(b).to_array(), std::array::from_fn(|i| a[i].min(b[i])));
        assert_eq!(a.max(b).to_array(), std::array::from_fn(|i| a[i].max(b[i])));
    }
}

#[test]
fn test_compare_and_select() {
    for _ in 0..NB_RUNS {
        let a: SimdVec<u16, 32> = random_vec();
        let b: SimdVec<u16, 32> = random_vec();
        let gt = a.cmp_gt(b);
        assert_eq!(gt.to_array(), std::array::from_fn(|i| a[i] > b[i]));
        // max through a blend
        assert_eq!(gt.select(a, b), a.max(b));
        assert_eq!((!gt).to_array(), a.cmp_le(b).to_array());
    }
}

#[test]
fn test_reductions() {
    for _ in 0..NB_RUNS {
        let a: SimdVec<i64, 8> = random_vec();
        let lanes = a.to_array();
        assert_eq!(a.reduce_sum(), lanes.iter().fold(0i64, |acc, &x| acc.wrapping_add(x)));
        assert_eq!(a.reduce_min(), *lanes.iter().min().unwrap());
        assert_eq!(a.reduce_max(), *lanes.iter().max().unwrap());
        assert_eq!(a.reduce(|x, y| x ^ y), lanes.iter().fold(0, |acc, &x| acc ^ x));
    }
}

#[test]
fn test_mask_roundtrip_on_64_lanes() {
    for _ in 0..NB_RUNS {
        let bits = utils::get_random_mask(64);
        let mask = SimdVecBool::<u8, 64>::from_mask(bits);
        assert_eq!(mask.to_mask(), bits);
        assert_eq!(mask.popcount(), bits.count_ones() as usize);
        assert_eq!(mask.find_first_set(), (bits != 0).then(|| bits.trailing_zeros() as usize));
        assert_eq!(mask.find_last_set(), (bits != 0).then(|| 63 - bits.leading_zeros() as usize));
    }
}

#[test]
fn test_mask_bits_beyond_lanes() {
    // unchecked constructor drops the excess bits
    let mask = SimdVecBool::<i32, 4>::from_mask(0xf5);
    assert_eq!(mask.to_mask(), 0x5);

    let err = SimdVecBool::<i32, 4>::try_from_mask(0xf5).unwrap_err();
    assert_eq!(err, SimdError::MaskOutOfRange { mask: 0xf5, lanes: 4 });
}

#[test]
fn test_mask_queries() {
    let none = SimdVecBool::<f64, 8>::splat(false);
    let all = SimdVecBool::<f64, 8>::splat(true);
    let some = SimdVecBool::<f64, 8>::from_mask(0b0100_0010);

    assert!(none.none_of() && !none.any_of() && !none.some_of());
    assert!(all.all_of() && all.any_of() && !all.some_of());
    assert!(some.any_of() && some.some_of() && !some.all_of());
    assert_eq!(none.find_first_set(), None);
    assert_eq!(some.find_first_set(), Some(1));
    assert_eq!(some.find_last_set(), Some(6));
    assert_eq!((some & all).to_mask(), some.to_mask());
    assert_eq!((some | none).to_mask(), some.to_mask());
    assert_eq!((some ^ all).to_mask(), 0b1011_1101);
}

#[test]
fn test_float_nan_compares() {
    let a = SimdVec::<f32, 8>::new([f32::NAN, 1.0, -0.0, 0.0, f32::INFINITY, 2.0, 3.0, f32::NAN]);
    let b = SimdVec::<f32, 8>::new([f32::NAN, 1.0, 0.0, -0.0, f32::INFINITY, 1.0, 4.0, 0.0]);
    assert_eq!(a.cmp_eq(b).to_mask(), 0b0001_1110);
    assert_eq!(a.cmp_ne(b).to_mask(), 0b1110_0001);
    assert_eq!(a.cmp_lt(b).to_mask(), 0b0100_0000);
    assert_eq!(a.cmp_ge(b).to_mask(), 0b0011_1110);
}

#[test]
fn test_float_math() {
    let a = SimdVec::<f64, 4>::new([4.0, -9.0, 2.25, 0.0]);
    assert_eq!(a.abs().to_array(), [4.0, 9.0, 2.25, 0.0]);
    assert_eq!(a.abs().sqrt().to_array(), [2.0, 3.0, 1.5, 0.0]);
    assert_eq!((-a).to_array(), [-4.0, 9.0, -2.25, -0.0]);
    let b = SimdVec::<f64, 4>::splat(2.0);
    assert_eq!((a / b).to_array(), [2.0, -4.5, 1.125, 0.0]);
    assert_eq!(a.mul_add(b, b).to_array(), [10.0, -16.0, 6.5, 2.0]);

    let c = SimdVec::<f64, 4>::new([4.0 + 1e-12, -9.0, 2.0, 1.0]);
    assert_eq!(a.cmp_approx_eq(c, 1e-9).to_mask(), 0b0011);
}

#[test]
fn test_shifts() {
    let a = SimdVec::<i32, 8>::new([-16, 16, 1, -1, i32::MIN, i32::MAX, 3, 0]);
    assert_eq!((a >> 2).to_array(), [-4, 4, 0, -1, i32::MIN >> 2, i32::MAX >> 2, 0, 0]);
    assert_eq!((a << 1).to_array(), [-32, 32, 2, -2, 0, -2, 6, 0]);

    let u = SimdVec::<u32, 8>::splat(0x8000_0000);
    let counts = SimdVec::<u32, 8>::from_fn(|i| i as u32 * 4);
    assert_eq!(u.shr(counts).to_array(), std::array::from_fn(|i| 0x8000_0000u32 >> (i * 4)));
    // counts at or above the lane width clear the lane
    assert_eq!(u.shl(SimdVec::splat(32)).to_array(), [0; 8]);
    assert_eq!(SimdVec::<i8, 16>::splat(-1).shr(SimdVec::splat(9)).to_array(), [-1; 16]);
}

#[test]
fn test_division_by_zero_panics_for_ints() {
    let a = SimdVec::<i16, 8>::splat(7);
    let b = SimdVec::<i16, 8>::from_fn(|i| i as i16);
    let result = std::panic::catch_unwind(|| a / b);
    assert!(result.is_err());
}

#[test]
fn test_slices_and_errors() {
    let data: Vec<u64> = (0..10).collect();
    assert_eq!(SimdVec::<u64, 4>::from_slice(&data).to_array(), [0, 1, 2, 3]);
    assert_eq!(
        SimdVec::<u64, 4>::try_from_slice(&data),
        Err(SimdError::LengthMismatch { expected: 4, actual: 10 })
    );

    let v = SimdVec::<u64, 4>::try_from_slice(&data[2..6]).unwrap();
    let mut out = [0u64; 4];
    v.write_to_slice(&mut out).unwrap();
    assert_eq!(out, [2, 3, 4, 5]);
    assert!(v.write_to_slice(&mut [0u64; 3]).is_err());
}

#[test]
fn test_gather_scatter() {
    let base: Vec<i32> = (0..10).map(|x| x * 10).collect();
    let v = SimdVec::<i32, 4>::gather(&base, [9, 0, 3, 3]);
    assert_eq!(v.to_array(), [90, 0, 30, 30]);
    assert_eq!(
        SimdVec::<i32, 4>::try_gather(&base, [1, 2, 10, 0]),
        Err(SimdError::IndexOutOfBounds { index: 10, len: 10 })
    );

    let mut out = vec![0i32; 5];
    SimdVec::<i32, 4>::new([1, 2, 3, 4]).scatter(&mut out, [4, 0, 4, 1]);
    assert_eq!(out, [2, 4, 0, 0, 3]);
    assert!(v.try_scatter(&mut out, [0, 1, 2, 5]).is_err());
}

#[test]
fn test_aligned_memory() {
    let src = Aligned::<[f32; 16]>(std::array::from_fn(|i| i as f32 * 0.5));
    let mut dst = Aligned([0.0f32; 16]);
    assert!(is_aligned(src.as_ptr(), SimdVec::<f32, 16>::required_alignment()));
    unsafe {
        let v = SimdVec::<f32, 16>::load_aligned(src.as_ptr());
        (v + v).store_aligned(dst.as_mut_ptr());
    }
    assert_eq!(*dst, std::array::from_fn::<f32, 16, _>(|i| i as f32));
}

fn check_odd_width<const W: usize>() {
    // 4-byte lanes: odd widths never fill a whole SIMD register
    assert_eq!(SimdVec::<f32, W>::target(), Target::Generic);

    let a = SimdVec::<f32, W>::from_fn(|i| i as f32);
    let b = SimdVec::<f32, W>::splat(1.5);
    let expected = 1.5 * (W * (W - 1) / 2) as f32;
    assert_eq!((a * b).reduce_sum(), expected);
    assert_eq!(a.cmp_lt(b).to_mask(), 0b11);
}

#[rstest]
#[case::three_lanes(3)]
#[case::five_lanes(5)]
#[case::seven_lanes(7)]
fn test_odd_widths_run_on_generic(#[case] w: usize) {
    match w {
        3 => check_odd_width::<3>(),
        5 => check_odd_width::<5>(),
        7 => check_odd_width::<7>(),
        _ => unreachable!(),
    }
}

#[test]
fn test_targets_are_consistent() {
    let best = Target::best();
    assert!(simdvec::enabled_instruction_sets().contains(&best.name()));
    assert_eq!(best.alignment() * 8, best.register_size());
    assert_eq!(Target::resolve(0), Target::Generic);
    assert_eq!(SimdVec::<u8, 64>::target(), best);
    if best != Target::Generic {
        assert_eq!(SimdVec::<u8, 64>::required_alignment(), best.alignment());
    }
    // three registers on SSE, still a single register alignment
    let align = SimdVec::<f32, 12>::required_alignment();
    assert!(align.is_power_of_two());
    let buf = Aligned([0f32; 16]);
    assert!(is_aligned(buf.as_ptr(), align));
}

#[test]
fn test_explicit_generic_tag() {
    let a: SimdVec<u8, 32> = random_vec();
    let b: SimdVec<u8, 32> = random_vec();
    assert_eq!(a.binary_on::<GENERIC, Add>(b), a + b);
    assert_eq!(a.reduce_on::<GENERIC, Max>(), a.reduce_max());
    assert_eq!(a.cmp_eq(b).to_mask_on::<GENERIC>(), a.cmp_eq(b).to_mask());
}

#[test]
fn test_complex_mul() {
    let a = SimdVec::<f32, 4>::new([4.0, 5.0, 1.0, -2.0]);
    let b = SimdVec::<f32, 4>::new([9.0, 3.0, 0.0, 1.0]);
    // (4+5i)(9+3i) = 21+57i, (1-2i)(i) = 2+i
    assert_eq!(complex::mul(a, b).to_array(), [21.0, 57.0, 2.0, 1.0]);
    assert_eq!(complex::conj(a).to_array(), [4.0, -5.0, 1.0, 2.0]);
}

#[test]
fn test_display() {
    let v = SimdVec::<i8, 4>::new([1, -2, 3, -4]);
    assert_eq!(format!("{v}"), "(1, -2, 3, -4)");
    let m = SimdVecBool::<i8, 4>::from_mask(0b0101);
    assert_eq!(m.to_array(), [true, false, true, false]);
}

#[cfg(feature = "half")]
#[test]
fn test_f16_lanes() {
    use half::f16;

    let a = SimdVec::<f16, 8>::from_fn(|i| f16::from_f32(i as f32));
    let b = SimdVec::<f16, 8>::splat(f16::from_f32(2.0));
    assert_eq!(SimdVec::<f16, 8>::target(), Target::Generic);
    assert_eq!((a * b).reduce_max(), f16::from_f32(14.0));
    assert_eq!(a.cmp_lt(b).to_mask(), 0b11);
}

#[test]
fn test_splat_sum_on_every_detected_tag() {
    let one = SimdVec::<i32, 8>::splat(1);
    let two = SimdVec::<i32, 8>::splat(2);
    let three = SimdVec::<i32, 8>::splat(3);
    assert_eq!(one + two, three);
    assert_eq!(one.binary_on::<GENERIC, Add>(two), three);

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        use simdvec::{AVX, AVX2, FMA, SSE};

        if is_x86_feature_detected!("sse2") {
            assert_eq!(unsafe { one.binary_on_unchecked::<SSE, Add>(two) }, three);
        }
        if is_x86_feature_detected!("avx") {
            assert_eq!(unsafe { one.binary_on_unchecked::<AVX, Add>(two) }, three);
        }
        if is_x86_feature_detected!("avx2") {
            assert_eq!(unsafe { one.binary_on_unchecked::<AVX2, Add>(two) }, three);
        }
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            assert_eq!(unsafe { one.binary_on_unchecked::<FMA<AVX2>, Add>(two) }, three);
        }
    }
}
