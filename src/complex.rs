//! Complex arithmetic on interleaved vectors: even lanes hold the real parts, odd
//! lanes the imaginary parts, so a `SimdVec<T, W>` holds `W / 2` complex numbers.

use crate::scalar::{Scalar, SignedScalar};
use crate::vec::SimdVec;
use crate::vec_bool::SimdVecBool;

struct Interleaved<const W: usize>;

impl<const W: usize> Interleaved<W> {
    const EVEN: () = assert!(W % 2 == 0, "complex vectors need an even number of lanes");
}

#[inline(always)]
fn odd_lanes<T: Scalar, const W: usize>() -> SimdVecBool<T, W> {
    SimdVecBool::from_fn(|i| i % 2 == 1)
}

/// `(re, im)` pairs with both parts replaced by the real part, and by the imaginary
/// part
#[inline(always)]
fn duplicate_parts<T: Scalar, const W: usize>(
    a: SimdVec<T, W>,
) -> (SimdVec<T, W>, SimdVec<T, W>) {
    let re = SimdVec::from_fn(|i| a[i & !1]);
    let im = SimdVec::from_fn(|i| a[i | 1]);
    (re, im)
}

/// Swap the real and imaginary part of every pair
#[inline(always)]
fn swap_pairs<T: Scalar, const W: usize>(a: SimdVec<T, W>) -> SimdVec<T, W> {
    SimdVec::from_fn(|i| a[i ^ 1])
}

/// Element-wise complex product: `(a + bi)(c + di) = (ac - bd) + (ad + bc)i`
///
/// ```
/// use simdvec::{complex, SimdVec};
///
/// let a = SimdVec::<f32, 2>::new([4.0, 5.0]);
/// let b = SimdVec::<f32, 2>::new([9.0, 3.0]);
/// assert_eq!(complex::mul(a, b).to_array(), [21.0, 57.0]);
/// ```
pub fn mul<T: SignedScalar, const W: usize>(a: SimdVec<T, W>, b: SimdVec<T, W>) -> SimdVec<T, W> {
    let () = Interleaved::<W>::EVEN;
    let (re, im) = duplicate_parts(a);
    // re * (c, d) = (ac, ad); im * (d, c) = (bd, bc)
    let real_terms = re * b;
    let imag_terms = im * swap_pairs(b);
    // even lanes: ac - bd, odd lanes: ad + bc
    let odd = odd_lanes::<T, W>();
    odd.select(real_terms + imag_terms, real_terms - imag_terms)
}

/// Complex conjugate: negate the imaginary parts
pub fn conj<T: SignedScalar, const W: usize>(a: SimdVec<T, W>) -> SimdVec<T, W> {
    let () = Interleaved::<W>::EVEN;
    odd_lanes::<T, W>().select(-a, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_integer_pairs() {
        let a = SimdVec::<i32, 4>::new([4, 5, 1, -1]);
        let b = SimdVec::<i32, 4>::new([9, 3, 2, 2]);
        // (4+5i)(9+3i) = 21+57i, (1-i)(2+2i) = 4+0i
        assert_eq!(mul(a, b).to_array(), [21, 57, 4, 0]);
    }

    #[test]
    fn test_mul_float_pairs_spanning_registers() {
        let a = SimdVec::<f64, 8>::from_fn(|i| if i % 2 == 0 { 4.0 } else { 5.0 });
        let b = SimdVec::<f64, 8>::from_fn(|i| if i % 2 == 0 { 9.0 } else { 3.0 });
        let product = mul(a, b);
        for pair in product.as_array().chunks(2) {
            assert_eq!(pair, [21.0, 57.0]);
        }
    }

    #[test]
    fn test_conj() {
        let a = SimdVec::<f32, 4>::new([1.0, 2.0, -3.0, -4.0]);
        assert_eq!(conj(a).to_array(), [1.0, -2.0, -3.0, 4.0]);
        // z * conj(z) = |z|^2
        assert_eq!(mul(a, conj(a)).to_array(), [5.0, 0.0, 25.0, 0.0]);
    }
}
