//! Boolean vectors and the compact mask codec.

use std::fmt;
use std::marker::PhantomData;
use std::ops;

use crate::error::{SimdError, SimdResult};
use crate::kernel::{ArchVisitor, FromMask, Map3, ToMask};
use crate::ops::Select;
use crate::scalar::Scalar;
use crate::simd::Kernel;
use crate::vec::SimdVec;

/// A vector of `W` booleans, stored as lanes of `T` that are either all-ones or
/// all-zeros: the layout the comparison instructions produce for `SimdVec<T, W>`.
///
/// The compact form is a `u64` with bit `i` holding lane `i`, so mask operations are
/// limited to `W <= 64` (checked at compile time).
#[derive(Clone, Copy)]
pub struct SimdVecBool<T: Scalar, const W: usize> {
    v: SimdVec<T, W>,
}

impl<T: Scalar, const W: usize> SimdVecBool<T, W> {
    const FITS_MASK: () = assert!(W <= 64, "masks hold at most 64 lanes");

    /// The mask with every lane of this vector set
    pub const LANE_MASK: u64 = if W >= 64 { u64::MAX } else { (1u64 << W) - 1 };

    /// Wrap a vector whose lanes are all-ones or all-zeros
    #[inline(always)]
    pub(crate) fn from_lanes_unchecked(v: SimdVec<T, W>) -> Self {
        SimdVecBool { v }
    }

    #[inline]
    pub fn splat(value: bool) -> Self {
        Self::from_lanes_unchecked(SimdVec::splat(T::from_bool(value)))
    }

    #[inline]
    pub fn from_array(values: [bool; W]) -> Self {
        Self::from_fn(|i| values[i])
    }

    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        Self::from_lanes_unchecked(SimdVec::from_fn(|i| T::from_bool(f(i))))
    }

    #[inline]
    pub fn to_array(self) -> [bool; W] {
        std::array::from_fn(|i| self.test(i))
    }

    /// Value of lane `idx`
    #[inline]
    pub fn test(&self, idx: usize) -> bool {
        self.v[idx].is_set()
    }

    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        self.v[idx] = T::from_bool(value);
    }

    /// The lanes as all-ones / all-zeros values
    #[inline]
    pub fn to_vec(self) -> SimdVec<T, W> {
        self.v
    }

    #[inline]
    pub fn as_vec(&self) -> &SimdVec<T, W> {
        &self.v
    }

    /// Lanes of `a` where set, lanes of `b` elsewhere
    #[inline]
    pub fn select(self, a: SimdVec<T, W>, b: SimdVec<T, W>) -> SimdVec<T, W> {
        T::dispatch(SimdVec::<T, W>::TARGET, Map3::<T, Select, W>::new(&self.v, &a, &b))
    }

    // ------------------------------------- mask codec -----------------------------------

    /// Pack the lanes into a bitmask: bit `i` is lane `i`, bits `>= W` are zero
    #[inline]
    pub fn to_mask(self) -> u64 {
        let () = Self::FITS_MASK;
        T::dispatch(SimdVec::<T, W>::TARGET, ToMask { v: &self.v })
    }

    /// Unpack a bitmask; bits `>= W` are ignored
    #[inline]
    pub fn from_mask(bits: u64) -> Self {
        let () = Self::FITS_MASK;
        let visitor = FromMask::<T, W> {
            bits: bits & Self::LANE_MASK,
            lane: PhantomData,
        };
        Self::from_lanes_unchecked(T::dispatch(SimdVec::<T, W>::TARGET, visitor))
    }

    /// Unpack a bitmask, rejecting bits `>= W`
    pub fn try_from_mask(bits: u64) -> SimdResult<Self> {
        if bits & !Self::LANE_MASK != 0 {
            return Err(SimdError::mask_out_of_range(bits, W));
        }
        Ok(Self::from_mask(bits))
    }

    /// [`to_mask`](Self::to_mask) on the registers of tag `A`
    #[inline]
    pub fn to_mask_on<A: Kernel<T>>(self) -> u64 {
        SimdVec::<T, W>::assert_supported::<A>();
        // SAFETY: A is enabled for this build
        unsafe { self.to_mask_on_unchecked::<A>() }
    }

    /// # Safety
    /// `A` must be available on the executing CPU.
    #[inline]
    pub unsafe fn to_mask_on_unchecked<A: Kernel<T>>(self) -> u64 {
        let () = Self::FITS_MASK;
        SimdVec::<T, W>::assert_whole_registers::<A>();
        ToMask { v: &self.v }.visit::<A>()
    }

    /// [`from_mask`](Self::from_mask) on the registers of tag `A`
    #[inline]
    pub fn from_mask_on<A: Kernel<T>>(bits: u64) -> Self {
        SimdVec::<T, W>::assert_supported::<A>();
        // SAFETY: A is enabled for this build
        unsafe { Self::from_mask_on_unchecked::<A>(bits) }
    }

    /// # Safety
    /// `A` must be available on the executing CPU.
    #[inline]
    pub unsafe fn from_mask_on_unchecked<A: Kernel<T>>(bits: u64) -> Self {
        let () = Self::FITS_MASK;
        SimdVec::<T, W>::assert_whole_registers::<A>();
        let visitor = FromMask::<T, W> {
            bits: bits & Self::LANE_MASK,
            lane: PhantomData,
        };
        Self::from_lanes_unchecked(visitor.visit::<A>())
    }

    // --------------------------------------- queries ------------------------------------

    #[inline]
    pub fn all_of(self) -> bool {
        self.to_mask() == Self::LANE_MASK
    }

    #[inline]
    pub fn any_of(self) -> bool {
        self.to_mask() != 0
    }

    #[inline]
    pub fn none_of(self) -> bool {
        self.to_mask() == 0
    }

    /// At least one lane set, but not all of them
    #[inline]
    pub fn some_of(self) -> bool {
        let mask = self.to_mask();
        mask != 0 && mask != Self::LANE_MASK
    }

    /// Number of set lanes
    #[inline]
    pub fn popcount(self) -> usize {
        self.to_mask().count_ones() as usize
    }

    /// Index of the lowest set lane
    #[inline]
    pub fn find_first_set(self) -> Option<usize> {
        let mask = self.to_mask();
        (mask != 0).then(|| mask.trailing_zeros() as usize)
    }

    /// Index of the highest set lane
    #[inline]
    pub fn find_last_set(self) -> Option<usize> {
        let mask = self.to_mask();
        (mask != 0).then(|| 63 - mask.leading_zeros() as usize)
    }
}

impl<T: Scalar, const W: usize> Default for SimdVecBool<T, W> {
    fn default() -> Self {
        Self::from_lanes_unchecked(SimdVec::default())
    }
}

impl<T: Scalar, const W: usize> From<[bool; W]> for SimdVecBool<T, W> {
    fn from(values: [bool; W]) -> Self {
        Self::from_array(values)
    }
}

/// Equality of the boolean values (float lanes compare their bits, "true" being a NaN
/// pattern)
impl<T: Scalar, const W: usize> PartialEq for SimdVecBool<T, W> {
    fn eq(&self, other: &Self) -> bool {
        (0..W).all(|i| self.test(i) == other.test(i))
    }
}

impl<T: Scalar, const W: usize> Eq for SimdVecBool<T, W> {}

macro_rules! impl_bool_operator {
    ($($tr:ident, $method:ident, $assign_tr:ident, $assign_method:ident);*) => {
        $(
            impl<T: Scalar, const W: usize> ops::$tr for SimdVecBool<T, W> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Self) -> Self {
                    Self::from_lanes_unchecked(ops::$tr::$method(self.v, rhs.v))
                }
            }

            impl<T: Scalar, const W: usize> ops::$assign_tr for SimdVecBool<T, W> {
                #[inline]
                fn $assign_method(&mut self, rhs: Self) {
                    *self = ops::$tr::$method(*self, rhs);
                }
            }
        )*
    };
}

impl_bool_operator!(
    BitAnd, bitand, BitAndAssign, bitand_assign;
    BitOr, bitor, BitOrAssign, bitor_assign;
    BitXor, bitxor, BitXorAssign, bitxor_assign
);

impl<T: Scalar, const W: usize> ops::Not for SimdVecBool<T, W> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_lanes_unchecked(!self.v)
    }
}

impl<T: Scalar, const W: usize> fmt::Debug for SimdVecBool<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SimdVecBool").field(&self.to_array()).finish()
    }
}

/// `(1, 0, 0, 1)`
impl<T: Scalar, const W: usize> fmt::Display for SimdVecBool<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for i in 0..W {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.test(i) as u8)?;
        }
        write!(f, ")")
    }
}

// ======================================= TESTS =======================================

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn test_alternating_popcount() {
        let b = SimdVecBool::<i8, 16>::from_fn(|i| i % 2 == 0);
        assert_eq!(b.popcount(), 8);
        assert_eq!(b.to_mask(), 0x5555);
        assert!(b.some_of());
        assert!(!b.all_of());
        assert_eq!(b.find_first_set(), Some(0));
        assert_eq!(b.find_last_set(), Some(14));
    }

    #[rstest]
    #[case(0b0000)]
    #[case(0b1010)]
    #[case(0b0001)]
    #[case(0b1111)]
    fn test_float_mask_roundtrip(#[case] mask: u64) {
        let b = SimdVecBool::<f32, 4>::from_mask(mask);
        assert_eq!(b.to_mask(), mask);
        assert_eq!(b.popcount(), mask.count_ones() as usize);
    }

    #[test]
    fn test_out_of_range_bits() {
        let b = SimdVecBool::<u16, 8>::from_mask(0xff_f0);
        assert_eq!(b.to_mask(), 0xf0);
        assert_eq!(
            SimdVecBool::<u16, 8>::try_from_mask(0x100),
            Err(SimdError::MaskOutOfRange { mask: 0x100, lanes: 8 })
        );
        assert!(SimdVecBool::<u16, 8>::try_from_mask(0x80).is_ok());
    }

    #[test]
    fn test_full_width_mask() {
        let all = SimdVecBool::<u8, 64>::splat(true);
        assert_eq!(all.to_mask(), u64::MAX);
        assert!(all.all_of());
        assert_eq!(all.find_last_set(), Some(63));
        let b = SimdVecBool::<u8, 64>::from_mask(1 << 63);
        assert_eq!(b.find_first_set(), Some(63));
    }

    #[test]
    fn test_empty_queries() {
        let none = SimdVecBool::<i64, 2>::splat(false);
        assert!(none.none_of());
        assert!(!none.any_of());
        assert!(!none.some_of());
        assert_eq!(none.find_first_set(), None);
        assert_eq!(none.find_last_set(), None);
    }

    #[test]
    fn test_logic_and_select() {
        let a = SimdVecBool::<i32, 8>::from_mask(0b1100_1100);
        let b = SimdVecBool::<i32, 8>::from_mask(0b1010_1010);
        assert_eq!((a & b).to_mask(), 0b1000_1000);
        assert_eq!((a | b).to_mask(), 0b1110_1110);
        assert_eq!((a ^ b).to_mask(), 0b0110_0110);
        assert_eq!((!a).to_mask(), 0b0011_0011);
        let picked = a.select(SimdVec::splat(1), SimdVec::splat(-1));
        assert_eq!(picked.to_array(), [-1, -1, 1, 1, -1, -1, 1, 1]);
    }

    #[test]
    fn test_comparisons_produce_canonical_lanes() {
        let a = SimdVec::<f64, 4>::new([1.0, 2.0, 3.0, f64::NAN]);
        let lt = a.cmp_lt(SimdVec::splat(2.5));
        assert_eq!(lt.to_array(), [true, true, false, false]);
        assert_eq!(lt.to_vec()[0].to_bits(), u64::MAX);
        assert_eq!(lt.to_vec()[2].to_bits(), 0);
        assert_eq!(lt, SimdVecBool::from([true, true, false, false]));
    }

    #[test]
    fn test_formatting() {
        let b = SimdVecBool::<u32, 4>::from_mask(0b1001);
        assert_eq!(format!("{}", b), "(1, 0, 0, 1)");
        assert_eq!(format!("{:?}", b), "SimdVecBool([true, false, false, true])");
    }
}
