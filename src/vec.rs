//! The vector container.
//!
//! A [`SimdVec<T, W>`] is `W` lanes of `T` in one 64-byte aligned array (the widest
//! register alignment, so [`SimdVec::as_ptr`] of any vector meets
//! [`SimdVec::required_alignment`] of its shape). The same
//! storage is viewed either lane by lane (`Index`/`IndexMut`) or as `n_regs`
//! consecutive native registers of an instruction set tag (`reg`/`set_reg`), which is
//! a raw reinterpretation of the array memory.

use std::fmt;
use std::marker::PhantomData;
use std::ops;

use crate::error::{SimdError, SimdResult};
use crate::kernel::{
    ArchVisitor, Broadcast, FloatMap1, IntMap2, Load, Map1, Map2, Map3, Reduce, Store,
};
use crate::ops::{
    Abs, Add, And, AndNot, BinaryOp, CmpEq, CmpGe, CmpGt, CmpLe, CmpLt, CmpNe, Div,
    FloatUnaryOp, IntBinaryOp, Max, Min, Mul, MulAdd, Neg, Not, Or, Rem, Shl, Shr, Sqrt, Sub,
    TernaryOp, UnaryOp, Xor,
};
use crate::scalar::{FloatScalar, IntScalar, Scalar, SignedScalar};
use crate::simd::{FloatKernel, IntKernel, Kernel, Target};
use crate::vec_bool::SimdVecBool;

/// A fixed-width vector of `W` lanes of type `T`.
///
/// Every operation runs on the instruction set that [`Target::resolve_for`] picks
/// for `size_of::<T>() * W` bytes: the widest enabled tag whose register size divides
/// the byte size, spanning `n_regs` registers. Operations return new values.
///
/// ```
/// use simdvec::SimdVec;
///
/// let a = SimdVec::<i32, 8>::splat(1);
/// let b = SimdVec::<i32, 8>::splat(2);
/// assert_eq!(a + b, SimdVec::splat(3));
/// ```
#[derive(Clone, Copy)]
#[repr(C, align(64))]
pub struct SimdVec<T: Scalar, const W: usize> {
    lanes: [T; W],
}

/// Compile-time checks of a vector shape against an instruction set tag
struct Shape<A, T, const W: usize>(PhantomData<(A, T)>);

impl<A: Kernel<T>, T: Scalar, const W: usize> Shape<A, T, W> {
    const WHOLE_REGISTERS: () = assert!(
        W > 0 && (std::mem::size_of::<T>() * W) % std::mem::size_of::<A::Reg>() == 0,
        "the vector is not a whole number of registers of this instruction set"
    );
    const SUPPORTED: () = assert!(
        A::SUPPORTED,
        "the instruction set is not enabled for this build (see `-C target-feature`)"
    );
}

impl<T: Scalar, const W: usize> SimdVec<T, W> {
    /// Number of lanes
    pub const LANES: usize = W;
    /// Size of the lane data in bytes
    pub const BYTES: usize = std::mem::size_of::<T>() * W;
    /// The instruction set that backs this vector shape
    pub const TARGET: Target = Target::resolve_for::<T>(Self::BYTES);

    const NON_EMPTY: () = assert!(W > 0, "a vector needs at least one lane");

    /// Create a vector from its lanes
    #[inline]
    pub const fn new(lanes: [T; W]) -> Self {
        let () = Self::NON_EMPTY;
        SimdVec { lanes }
    }

    #[inline]
    pub const fn from_array(lanes: [T; W]) -> Self {
        Self::new(lanes)
    }

    /// Create a vector whose lane `i` is `f(i)`
    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self::new(std::array::from_fn(f))
    }

    /// All lanes zero, without going through a kernel (the output buffer of visitors)
    #[inline(always)]
    pub(crate) fn zeroed() -> Self {
        Self::new([T::zero(); W])
    }

    /// Broadcast `value` to every lane
    #[inline]
    pub fn splat(value: T) -> Self {
        T::dispatch(Self::TARGET, Broadcast::<T, W> { value })
    }

    /// All lanes zero
    #[inline]
    pub fn setzero() -> Self {
        Self::splat(T::zero())
    }

    #[inline]
    pub fn to_array(self) -> [T; W] {
        self.lanes
    }

    #[inline]
    pub fn as_array(&self) -> &[T; W] {
        &self.lanes
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.lanes
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.lanes
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.lanes.as_ptr()
    }

    /// The instruction set that backs this vector shape
    #[inline]
    pub fn target() -> Target {
        Self::TARGET
    }

    /// Number of registers of the resolved target (lane loop: one 64-bit word per
    /// started word)
    #[inline]
    pub fn n_regs() -> usize {
        Self::BYTES.div_ceil(Self::TARGET.alignment())
    }

    /// Alignment (bytes) that [`load_aligned`](Self::load_aligned) and
    /// [`store_aligned`](Self::store_aligned) require: the register alignment of the
    /// resolved target, or the lane alignment on the lane loop.
    ///
    /// Each register is moved with its own aligned instruction, so a pointer aligned
    /// to `n_regs * alignment` always qualifies. The result is a power of two at most
    /// 64, which the storage of every `SimdVec` meets.
    #[inline]
    pub fn required_alignment() -> usize {
        match Self::TARGET {
            Target::Generic => std::mem::align_of::<T>(),
            target => target.alignment(),
        }
    }

    /// Number of registers of tag `A` spanned by this vector (0 if the vector is not
    /// a whole number of them)
    #[inline(always)]
    pub fn n_regs_for<A: Kernel<T>>() -> usize {
        if Self::BYTES % std::mem::size_of::<A::Reg>() == 0 {
            Self::BYTES / std::mem::size_of::<A::Reg>()
        } else {
            0
        }
    }

    // ------------------------------------ register view ---------------------------------

    /// Register `idx` of the register view for tag `A`
    ///
    /// # Panics
    /// If `idx` is out of range. Fails to compile if the vector is not a whole number
    /// of `A` registers.
    #[inline]
    pub fn reg<A: Kernel<T>>(&self, idx: usize) -> A::Reg {
        let () = Shape::<A, T, W>::WHOLE_REGISTERS;
        assert!(idx < Self::n_regs_for::<A>(), "register index {} out of range", idx);
        // SAFETY: in range, and the register reads whole lanes of the array
        unsafe { self.read_reg::<A>(idx) }
    }

    /// Overwrite register `idx` of the register view for tag `A`
    ///
    /// # Panics
    /// If `idx` is out of range.
    #[inline]
    pub fn set_reg<A: Kernel<T>>(&mut self, idx: usize, reg: A::Reg) {
        let () = Shape::<A, T, W>::WHOLE_REGISTERS;
        assert!(idx < Self::n_regs_for::<A>(), "register index {} out of range", idx);
        // SAFETY: see `reg`
        unsafe { self.write_reg::<A>(idx, reg) }
    }

    /// # Safety
    /// `idx < n_regs_for::<A>()`
    #[inline(always)]
    pub(crate) unsafe fn read_reg<A: Kernel<T>>(&self, idx: usize) -> A::Reg {
        debug_assert!(idx < Self::n_regs_for::<A>());
        // The array is 64-byte aligned and no register is wider than 64 bytes
        std::ptr::read(self.lanes.as_ptr().cast::<A::Reg>().add(idx))
    }

    /// # Safety
    /// `idx < n_regs_for::<A>()`
    #[inline(always)]
    pub(crate) unsafe fn write_reg<A: Kernel<T>>(&mut self, idx: usize, reg: A::Reg) {
        debug_assert!(idx < Self::n_regs_for::<A>());
        std::ptr::write(self.lanes.as_mut_ptr().cast::<A::Reg>().add(idx), reg)
    }

    // ---------------------------------------- memory ------------------------------------

    /// Load `W` lanes from `ptr`
    ///
    /// # Safety
    /// `ptr` must be valid for reading `W` lanes and aligned to
    /// [`required_alignment`](Self::required_alignment).
    #[inline]
    pub unsafe fn load_aligned(ptr: *const T) -> Self {
        debug_assert!(
            crate::utils::is_aligned(ptr, Self::required_alignment()),
            "pointer is not aligned to {} bytes",
            Self::required_alignment()
        );
        T::dispatch(Self::TARGET, Load::<T, W> { ptr, aligned: true })
    }

    /// Load `W` lanes from `ptr`
    ///
    /// # Safety
    /// `ptr` must be valid for reading `W` lanes.
    #[inline]
    pub unsafe fn load_unaligned(ptr: *const T) -> Self {
        T::dispatch(Self::TARGET, Load::<T, W> { ptr, aligned: false })
    }

    /// Store the `W` lanes at `ptr`
    ///
    /// # Safety
    /// `ptr` must be valid for writing `W` lanes and aligned to
    /// [`required_alignment`](Self::required_alignment).
    #[inline]
    pub unsafe fn store_aligned(&self, ptr: *mut T) {
        debug_assert!(
            crate::utils::is_aligned(ptr as *const T, Self::required_alignment()),
            "pointer is not aligned to {} bytes",
            Self::required_alignment()
        );
        T::dispatch(Self::TARGET, Store { v: self, ptr, aligned: true })
    }

    /// Store the `W` lanes at `ptr`
    ///
    /// # Safety
    /// `ptr` must be valid for writing `W` lanes.
    #[inline]
    pub unsafe fn store_unaligned(&self, ptr: *mut T) {
        T::dispatch(Self::TARGET, Store { v: self, ptr, aligned: false })
    }

    /// Load the first `W` elements of `slice`
    ///
    /// # Panics
    /// If the slice is shorter than `W`.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        assert!(
            slice.len() >= W,
            "slice of length {} is shorter than {} lanes",
            slice.len(),
            W
        );
        // SAFETY: at least W readable elements
        unsafe { Self::load_unaligned(slice.as_ptr()) }
    }

    /// Load a slice of exactly `W` elements
    pub fn try_from_slice(slice: &[T]) -> SimdResult<Self> {
        if slice.len() != W {
            return Err(SimdError::length_mismatch(W, slice.len()));
        }
        // SAFETY: exactly W readable elements
        Ok(unsafe { Self::load_unaligned(slice.as_ptr()) })
    }

    /// Store the lanes in a slice of exactly `W` elements
    pub fn write_to_slice(&self, slice: &mut [T]) -> SimdResult<()> {
        if slice.len() != W {
            return Err(SimdError::length_mismatch(W, slice.len()));
        }
        // SAFETY: exactly W writable elements
        unsafe { self.store_unaligned(slice.as_mut_ptr()) };
        Ok(())
    }

    /// Lane `i` is `base[indices[i]]`
    ///
    /// # Panics
    /// If an index is out of bounds.
    pub fn gather(base: &[T], indices: [usize; W]) -> Self {
        Self::from_fn(|i| base[indices[i]])
    }

    pub fn try_gather(base: &[T], indices: [usize; W]) -> SimdResult<Self> {
        check_indices(base.len(), &indices)?;
        Ok(Self::gather(base, indices))
    }

    /// `base[indices[i]] = self[i]`, in lane order (a repeated index keeps the
    /// highest lane)
    ///
    /// # Panics
    /// If an index is out of bounds.
    pub fn scatter(&self, base: &mut [T], indices: [usize; W]) {
        for (&x, &idx) in self.lanes.iter().zip(indices.iter()) {
            base[idx] = x;
        }
    }

    pub fn try_scatter(&self, base: &mut [T], indices: [usize; W]) -> SimdResult<()> {
        check_indices(base.len(), &indices)?;
        self.scatter(base, indices);
        Ok(())
    }

    // --------------------------------------- operations ---------------------------------

    #[inline(always)]
    fn unary<Op: UnaryOp<T>>(&self) -> Self {
        T::dispatch(Self::TARGET, Map1::<T, Op, W>::new(self))
    }

    #[inline(always)]
    fn binary<Op: BinaryOp<T>>(&self, rhs: &Self) -> Self {
        T::dispatch(Self::TARGET, Map2::<T, Op, W>::new(self, rhs))
    }

    #[inline(always)]
    fn ternary<Op: TernaryOp<T>>(&self, b: &Self, c: &Self) -> Self {
        T::dispatch(Self::TARGET, Map3::<T, Op, W>::new(self, b, c))
    }

    #[inline(always)]
    fn compare<Op: BinaryOp<T>>(&self, rhs: &Self) -> SimdVecBool<T, W> {
        SimdVecBool::from_lanes_unchecked(self.binary::<Op>(rhs))
    }

    #[inline]
    pub fn min(self, rhs: Self) -> Self {
        self.binary::<Min>(&rhs)
    }

    #[inline]
    pub fn max(self, rhs: Self) -> Self {
        self.binary::<Max>(&rhs)
    }

    /// `!self & rhs`
    #[inline]
    pub fn andnot(self, rhs: Self) -> Self {
        self.binary::<AndNot>(&rhs)
    }

    /// `self * b + c` (a single rounding on the FMA tags and on AVX512)
    #[inline]
    pub fn mul_add(self, b: Self, c: Self) -> Self {
        self.ternary::<MulAdd>(&b, &c)
    }

    #[inline]
    pub fn cmp_eq(self, rhs: Self) -> SimdVecBool<T, W> {
        self.compare::<CmpEq>(&rhs)
    }

    #[inline]
    pub fn cmp_ne(self, rhs: Self) -> SimdVecBool<T, W> {
        self.compare::<CmpNe>(&rhs)
    }

    #[inline]
    pub fn cmp_lt(self, rhs: Self) -> SimdVecBool<T, W> {
        self.compare::<CmpLt>(&rhs)
    }

    #[inline]
    pub fn cmp_le(self, rhs: Self) -> SimdVecBool<T, W> {
        self.compare::<CmpLe>(&rhs)
    }

    #[inline]
    pub fn cmp_gt(self, rhs: Self) -> SimdVecBool<T, W> {
        self.compare::<CmpGt>(&rhs)
    }

    #[inline]
    pub fn cmp_ge(self, rhs: Self) -> SimdVecBool<T, W> {
        self.compare::<CmpGe>(&rhs)
    }

    // --------------------------------------- reductions ---------------------------------

    /// Fold all lanes with `Op`: the registers are combined vertically first, then
    /// the last register is halved down to one lane. For floats the association
    /// order therefore differs from a left-to-right sum.
    #[inline]
    pub fn reduce_with<Op: BinaryOp<T>>(&self) -> T {
        T::dispatch(Self::TARGET, Reduce::<T, Op, W>::new(self))
    }

    /// Wrapping for integers
    #[inline]
    pub fn reduce_sum(&self) -> T {
        self.reduce_with::<Add>()
    }

    #[inline]
    pub fn reduce_product(&self) -> T {
        self.reduce_with::<Mul>()
    }

    /// Smallest lane. With NaN lanes the result depends on the combination order
    /// (registers first, then halves) and may differ from a left-to-right fold.
    #[inline]
    pub fn reduce_min(&self) -> T {
        self.reduce_with::<Min>()
    }

    /// Largest lane. With NaN lanes the result depends on the combination order
    /// (registers first, then halves) and may differ from a left-to-right fold.
    #[inline]
    pub fn reduce_max(&self) -> T {
        self.reduce_with::<Max>()
    }

    /// Left-to-right fold of the lanes with an arbitrary function
    pub fn reduce(&self, f: impl FnMut(T, T) -> T) -> T {
        let lanes = &self.lanes;
        lanes[1..].iter().copied().fold(lanes[0], f)
    }

    // --------------------------------- explicit-tag entry points ------------------------

    /// Run `Op` on the registers of tag `A`.
    ///
    /// Fails to compile if `A` is not enabled for this build or the vector is not a
    /// whole number of `A` registers.
    #[inline]
    pub fn unary_on<A: Kernel<T>, Op: UnaryOp<T>>(self) -> Self {
        let () = Shape::<A, T, W>::SUPPORTED;
        // SAFETY: A is enabled for this build
        unsafe { self.unary_on_unchecked::<A, Op>() }
    }

    /// # Safety
    /// `A` must be available on the executing CPU.
    #[inline]
    pub unsafe fn unary_on_unchecked<A: Kernel<T>, Op: UnaryOp<T>>(self) -> Self {
        let () = Shape::<A, T, W>::WHOLE_REGISTERS;
        Map1::<T, Op, W>::new(&self).visit::<A>()
    }

    #[inline]
    pub fn binary_on<A: Kernel<T>, Op: BinaryOp<T>>(self, rhs: Self) -> Self {
        let () = Shape::<A, T, W>::SUPPORTED;
        // SAFETY: A is enabled for this build
        unsafe { self.binary_on_unchecked::<A, Op>(rhs) }
    }

    /// # Safety
    /// `A` must be available on the executing CPU.
    #[inline]
    pub unsafe fn binary_on_unchecked<A: Kernel<T>, Op: BinaryOp<T>>(self, rhs: Self) -> Self {
        let () = Shape::<A, T, W>::WHOLE_REGISTERS;
        Map2::<T, Op, W>::new(&self, &rhs).visit::<A>()
    }

    #[inline]
    pub fn ternary_on<A: Kernel<T>, Op: TernaryOp<T>>(self, b: Self, c: Self) -> Self {
        let () = Shape::<A, T, W>::SUPPORTED;
        // SAFETY: A is enabled for this build
        unsafe { self.ternary_on_unchecked::<A, Op>(b, c) }
    }

    /// # Safety
    /// `A` must be available on the executing CPU.
    #[inline]
    pub unsafe fn ternary_on_unchecked<A: Kernel<T>, Op: TernaryOp<T>>(
        self,
        b: Self,
        c: Self,
    ) -> Self {
        let () = Shape::<A, T, W>::WHOLE_REGISTERS;
        Map3::<T, Op, W>::new(&self, &b, &c).visit::<A>()
    }

    #[inline]
    pub fn reduce_on<A: Kernel<T>, Op: BinaryOp<T>>(&self) -> T {
        let () = Shape::<A, T, W>::SUPPORTED;
        // SAFETY: A is enabled for this build
        unsafe { self.reduce_on_unchecked::<A, Op>() }
    }

    /// # Safety
    /// `A` must be available on the executing CPU.
    #[inline]
    pub unsafe fn reduce_on_unchecked<A: Kernel<T>, Op: BinaryOp<T>>(&self) -> T {
        let () = Shape::<A, T, W>::WHOLE_REGISTERS;
        Reduce::<T, Op, W>::new(self).visit::<A>()
    }

    pub(crate) fn assert_supported<A: Kernel<T>>() {
        let () = Shape::<A, T, W>::SUPPORTED;
    }

    pub(crate) fn assert_whole_registers<A: Kernel<T>>() {
        let () = Shape::<A, T, W>::WHOLE_REGISTERS;
    }
}

fn check_indices(len: usize, indices: &[usize]) -> SimdResult<()> {
    match indices.iter().find(|&&idx| idx >= len) {
        Some(&index) => Err(SimdError::index_out_of_bounds(index, len)),
        None => Ok(()),
    }
}

// -------------------------------------- integer lanes -----------------------------------

impl<T: IntScalar, const W: usize> SimdVec<T, W> {
    #[inline(always)]
    fn int_binary<Op: IntBinaryOp<T>>(&self, rhs: &Self) -> Self {
        T::dispatch_int(Self::TARGET, IntMap2::<T, Op, W>::new(self, rhs))
    }

    /// Shift every lane left by the matching lane of `count` (counts at or above the
    /// lane width give 0)
    #[inline]
    pub fn shl(self, count: Self) -> Self {
        self.int_binary::<Shl>(&count)
    }

    /// Shift every lane right by the matching lane of `count`: arithmetic for signed
    /// lanes, logical for unsigned lanes
    #[inline]
    pub fn shr(self, count: Self) -> Self {
        self.int_binary::<Shr>(&count)
    }

    #[inline]
    pub fn shl_on<A: IntKernel<T>>(self, count: Self) -> Self {
        Self::assert_supported::<A>();
        // SAFETY: A is enabled for this build
        unsafe { self.shift_on_unchecked::<A, Shl>(count) }
    }

    #[inline]
    pub fn shr_on<A: IntKernel<T>>(self, count: Self) -> Self {
        Self::assert_supported::<A>();
        // SAFETY: A is enabled for this build
        unsafe { self.shift_on_unchecked::<A, Shr>(count) }
    }

    /// # Safety
    /// `A` must be available on the executing CPU.
    #[inline]
    pub unsafe fn shift_on_unchecked<A: IntKernel<T>, Op: IntBinaryOp<T>>(
        self,
        count: Self,
    ) -> Self {
        Self::assert_whole_registers::<A>();
        crate::kernel::IntVisitor::visit::<A>(IntMap2::<T, Op, W>::new(&self, &count))
    }
}

// --------------------------------------- float lanes ------------------------------------

impl<T: FloatScalar, const W: usize> SimdVec<T, W> {
    #[inline(always)]
    fn float_unary<Op: FloatUnaryOp<T>>(&self) -> Self {
        T::dispatch_float(Self::TARGET, FloatMap1::<T, Op, W>::new(self))
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        self.float_unary::<Sqrt>()
    }

    #[inline]
    pub fn abs(self) -> Self {
        self.float_unary::<Abs>()
    }

    /// `|self - rhs| <= epsilon`, lane by lane (false for NaN lanes)
    #[inline]
    pub fn cmp_approx_eq(self, rhs: Self, epsilon: T) -> SimdVecBool<T, W> {
        (self - rhs).abs().cmp_le(Self::splat(epsilon))
    }

    /// # Safety
    /// `A` must be available on the executing CPU.
    #[inline]
    pub unsafe fn float_unary_on_unchecked<A: FloatKernel<T>, Op: FloatUnaryOp<T>>(
        self,
    ) -> Self {
        Self::assert_whole_registers::<A>();
        crate::kernel::FloatVisitor::visit::<A>(FloatMap1::<T, Op, W>::new(&self))
    }
}

// ------------------------------------------ traits --------------------------------------

impl<T: Scalar, const W: usize> Default for SimdVec<T, W> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<T: Scalar, const W: usize> From<[T; W]> for SimdVec<T, W> {
    fn from(lanes: [T; W]) -> Self {
        Self::new(lanes)
    }
}

impl<T: Scalar, const W: usize> From<SimdVec<T, W>> for [T; W] {
    fn from(v: SimdVec<T, W>) -> Self {
        v.lanes
    }
}

/// Lane-wise equality of the values (exact IEEE equality for floats, so a vector
/// holding a NaN is not equal to itself)
impl<T: Scalar, const W: usize> PartialEq for SimdVec<T, W> {
    fn eq(&self, other: &Self) -> bool {
        self.lanes == other.lanes
    }
}

impl<T: Scalar, const W: usize> ops::Index<usize> for SimdVec<T, W> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.lanes[idx]
    }
}

impl<T: Scalar, const W: usize> ops::IndexMut<usize> for SimdVec<T, W> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.lanes[idx]
    }
}

impl<T: Scalar, const W: usize> fmt::Debug for SimdVec<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SimdVec").field(&self.lanes).finish()
    }
}

/// `(1, 2, 3, 4)`
impl<T: Scalar, const W: usize> fmt::Display for SimdVec<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.lanes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt::Display::fmt(x, f)?;
        }
        write!(f, ")")
    }
}

/// Implements a binary operator trait (and its `*Assign` twin) for vector and
/// broadcast-scalar right-hand sides
macro_rules! impl_binary_operator {
    ($bound:ident: $($tr:ident, $method:ident, $assign_tr:ident, $assign_method:ident => $op:ty;)*) => {
        $(
            impl<T: $bound, const W: usize> ops::$tr for SimdVec<T, W> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Self) -> Self {
                    self.binary::<$op>(&rhs)
                }
            }

            impl<T: $bound, const W: usize> ops::$tr<T> for SimdVec<T, W> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: T) -> Self {
                    self.binary::<$op>(&Self::splat(rhs))
                }
            }

            impl<T: $bound, const W: usize> ops::$assign_tr for SimdVec<T, W> {
                #[inline]
                fn $assign_method(&mut self, rhs: Self) {
                    *self = self.binary::<$op>(&rhs);
                }
            }

            impl<T: $bound, const W: usize> ops::$assign_tr<T> for SimdVec<T, W> {
                #[inline]
                fn $assign_method(&mut self, rhs: T) {
                    *self = self.binary::<$op>(&Self::splat(rhs));
                }
            }
        )*
    };
}

impl_binary_operator! { Scalar:
    Add, add, AddAssign, add_assign => Add;
    Sub, sub, SubAssign, sub_assign => Sub;
    Mul, mul, MulAssign, mul_assign => Mul;
    Div, div, DivAssign, div_assign => Div;
    Rem, rem, RemAssign, rem_assign => Rem;
    BitAnd, bitand, BitAndAssign, bitand_assign => And;
    BitOr, bitor, BitOrAssign, bitor_assign => Or;
    BitXor, bitxor, BitXorAssign, bitxor_assign => Xor;
}

impl<T: Scalar, const W: usize> ops::Not for SimdVec<T, W> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        self.unary::<Not>()
    }
}

impl<T: SignedScalar, const W: usize> ops::Neg for SimdVec<T, W> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.unary::<Neg>()
    }
}

impl<T: IntScalar, const W: usize> ops::Shl for SimdVec<T, W> {
    type Output = Self;

    #[inline]
    fn shl(self, count: Self) -> Self {
        self.int_binary::<Shl>(&count)
    }
}

impl<T: IntScalar, const W: usize> ops::Shr for SimdVec<T, W> {
    type Output = Self;

    #[inline]
    fn shr(self, count: Self) -> Self {
        self.int_binary::<Shr>(&count)
    }
}

/// Uniform count (saturated at the lane width)
impl<T: IntScalar, const W: usize> ops::Shl<u32> for SimdVec<T, W> {
    type Output = Self;

    #[inline]
    fn shl(self, count: u32) -> Self {
        self.int_binary::<Shl>(&Self::splat(T::from_count(count)))
    }
}

impl<T: IntScalar, const W: usize> ops::Shr<u32> for SimdVec<T, W> {
    type Output = Self;

    #[inline]
    fn shr(self, count: u32) -> Self {
        self.int_binary::<Shr>(&Self::splat(T::from_count(count)))
    }
}

impl<T: IntScalar, const W: usize> ops::ShlAssign<u32> for SimdVec<T, W> {
    #[inline]
    fn shl_assign(&mut self, count: u32) {
        *self = *self << count;
    }
}

impl<T: IntScalar, const W: usize> ops::ShrAssign<u32> for SimdVec<T, W> {
    #[inline]
    fn shr_assign(&mut self, count: u32) {
        *self = *self >> count;
    }
}

// ======================================= TESTS =======================================
