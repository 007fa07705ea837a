//! Kernel dispatch layer.
//!
//! An operation on a [`SimdVec`] is packaged as a visitor. [`Scalar::dispatch`]
//! maps the resolved [`Target`](crate::simd::Target) of the vector on a concrete
//! instruction set tag and calls `visit::<Tag>()`, which runs the operation register
//! by register. Vectors that do not fill whole registers (or lane types without
//! kernels) take `visit_lanes()`, the per-lane loop.
//!
//! The explicit-tag entry points of [`SimdVec`] call `visit::<A>()` directly.

use std::marker::PhantomData;

use crate::ops::{BinaryOp, FloatUnaryOp, IntBinaryOp, TernaryOp, UnaryOp};
use crate::scalar::{FloatScalar, IntScalar, Scalar};
use crate::simd::{FloatKernel, IntKernel, Kernel};
use crate::vec::SimdVec;

/// An operation that can run on any instruction set tag with kernels for `T`
pub trait ArchVisitor<T: Scalar> {
    type Output;

    /// # Safety
    /// The instruction set `A` must be enabled on the executing CPU.
    unsafe fn visit<A: Kernel<T>>(self) -> Self::Output;
    fn visit_lanes(self) -> Self::Output;
}

/// [`ArchVisitor`] for operations that need the integer kernels
pub trait IntVisitor<T: IntScalar> {
    type Output;

    /// # Safety
    /// The instruction set `A` must be enabled on the executing CPU.
    unsafe fn visit<A: IntKernel<T>>(self) -> Self::Output;
    fn visit_lanes(self) -> Self::Output;
}

/// [`ArchVisitor`] for operations that need the float kernels
pub trait FloatVisitor<T: FloatScalar> {
    type Output;

    /// # Safety
    /// The instruction set `A` must be enabled on the executing CPU.
    unsafe fn visit<A: FloatKernel<T>>(self) -> Self::Output;
    fn visit_lanes(self) -> Self::Output;
}

// ------------------------------------ Visitors ---------------------------------------

pub(crate) struct Broadcast<T: Scalar, const W: usize> {
    pub(crate) value: T,
}

impl<T: Scalar, const W: usize> ArchVisitor<T> for Broadcast<T, W> {
    type Output = SimdVec<T, W>;

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) -> SimdVec<T, W> {
        let reg = A::broadcast(self.value);
        let mut out = SimdVec::<T, W>::zeroed();
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            out.write_reg::<A>(i, reg);
        }
        out
    }

    fn visit_lanes(self) -> SimdVec<T, W> {
        SimdVec::from_array([self.value; W])
    }
}

pub(crate) struct Load<T: Scalar, const W: usize> {
    pub(crate) ptr: *const T,
    pub(crate) aligned: bool,
}

impl<T: Scalar, const W: usize> ArchVisitor<T> for Load<T, W> {
    type Output = SimdVec<T, W>;

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) -> SimdVec<T, W> {
        let mut out = SimdVec::<T, W>::zeroed();
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            let ptr = self.ptr.add(i * A::LANES);
            let reg = if self.aligned {
                A::load_aligned(ptr)
            } else {
                A::load_unaligned(ptr)
            };
            out.write_reg::<A>(i, reg);
        }
        out
    }

    fn visit_lanes(self) -> SimdVec<T, W> {
        // SAFETY: the caller of the load guarantees `W` readable lanes
        SimdVec::from_fn(|i| unsafe { self.ptr.add(i).read_unaligned() })
    }
}

pub(crate) struct Store<'a, T: Scalar, const W: usize> {
    pub(crate) v: &'a SimdVec<T, W>,
    pub(crate) ptr: *mut T,
    pub(crate) aligned: bool,
}

impl<T: Scalar, const W: usize> ArchVisitor<T> for Store<'_, T, W> {
    type Output = ();

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) {
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            let ptr = self.ptr.add(i * A::LANES);
            let reg = self.v.read_reg::<A>(i);
            if self.aligned {
                A::store_aligned(ptr, reg);
            } else {
                A::store_unaligned(ptr, reg);
            }
        }
    }

    fn visit_lanes(self) {
        for (i, &x) in self.v.as_array().iter().enumerate() {
            // SAFETY: the caller of the store guarantees `W` writable lanes
            unsafe { self.ptr.add(i).write_unaligned(x) };
        }
    }
}

pub(crate) struct Map1<'a, T: Scalar, Op, const W: usize> {
    a: &'a SimdVec<T, W>,
    op: PhantomData<Op>,
}

impl<'a, T: Scalar, Op, const W: usize> Map1<'a, T, Op, W> {
    pub(crate) fn new(a: &'a SimdVec<T, W>) -> Self {
        Map1 { a, op: PhantomData }
    }
}

impl<T: Scalar, Op: UnaryOp<T>, const W: usize> ArchVisitor<T> for Map1<'_, T, Op, W> {
    type Output = SimdVec<T, W>;

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) -> SimdVec<T, W> {
        let mut out = SimdVec::<T, W>::zeroed();
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            out.write_reg::<A>(i, Op::reg::<A>(self.a.read_reg::<A>(i)));
        }
        out
    }

    fn visit_lanes(self) -> SimdVec<T, W> {
        SimdVec::from_fn(|i| Op::lane(self.a[i]))
    }
}

pub(crate) struct Map2<'a, T: Scalar, Op, const W: usize> {
    a: &'a SimdVec<T, W>,
    b: &'a SimdVec<T, W>,
    op: PhantomData<Op>,
}

impl<'a, T: Scalar, Op, const W: usize> Map2<'a, T, Op, W> {
    pub(crate) fn new(a: &'a SimdVec<T, W>, b: &'a SimdVec<T, W>) -> Self {
        Map2 { a, b, op: PhantomData }
    }
}

impl<T: Scalar, Op: BinaryOp<T>, const W: usize> ArchVisitor<T> for Map2<'_, T, Op, W> {
    type Output = SimdVec<T, W>;

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) -> SimdVec<T, W> {
        let mut out = SimdVec::<T, W>::zeroed();
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            let reg = Op::reg::<A>(self.a.read_reg::<A>(i), self.b.read_reg::<A>(i));
            out.write_reg::<A>(i, reg);
        }
        out
    }

    fn visit_lanes(self) -> SimdVec<T, W> {
        SimdVec::from_fn(|i| Op::lane(self.a[i], self.b[i]))
    }
}

pub(crate) struct Map3<'a, T: Scalar, Op, const W: usize> {
    a: &'a SimdVec<T, W>,
    b: &'a SimdVec<T, W>,
    c: &'a SimdVec<T, W>,
    op: PhantomData<Op>,
}

impl<'a, T: Scalar, Op, const W: usize> Map3<'a, T, Op, W> {
    pub(crate) fn new(a: &'a SimdVec<T, W>, b: &'a SimdVec<T, W>, c: &'a SimdVec<T, W>) -> Self {
        Map3 { a, b, c, op: PhantomData }
    }
}

impl<T: Scalar, Op: TernaryOp<T>, const W: usize> ArchVisitor<T> for Map3<'_, T, Op, W> {
    type Output = SimdVec<T, W>;

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) -> SimdVec<T, W> {
        let mut out = SimdVec::<T, W>::zeroed();
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            let reg = Op::reg::<A>(
                self.a.read_reg::<A>(i),
                self.b.read_reg::<A>(i),
                self.c.read_reg::<A>(i),
            );
            out.write_reg::<A>(i, reg);
        }
        out
    }

    fn visit_lanes(self) -> SimdVec<T, W> {
        SimdVec::from_fn(|i| Op::lane(self.a[i], self.b[i], self.c[i]))
    }
}

pub(crate) struct IntMap2<'a, T: IntScalar, Op, const W: usize> {
    a: &'a SimdVec<T, W>,
    b: &'a SimdVec<T, W>,
    op: PhantomData<Op>,
}

impl<'a, T: IntScalar, Op, const W: usize> IntMap2<'a, T, Op, W> {
    pub(crate) fn new(a: &'a SimdVec<T, W>, b: &'a SimdVec<T, W>) -> Self {
        IntMap2 { a, b, op: PhantomData }
    }
}

impl<T: IntScalar, Op: IntBinaryOp<T>, const W: usize> IntVisitor<T> for IntMap2<'_, T, Op, W> {
    type Output = SimdVec<T, W>;

    #[inline(always)]
    unsafe fn visit<A: IntKernel<T>>(self) -> SimdVec<T, W> {
        let mut out = SimdVec::<T, W>::zeroed();
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            let reg = Op::reg::<A>(self.a.read_reg::<A>(i), self.b.read_reg::<A>(i));
            out.write_reg::<A>(i, reg);
        }
        out
    }

    fn visit_lanes(self) -> SimdVec<T, W> {
        SimdVec::from_fn(|i| Op::lane(self.a[i], self.b[i]))
    }
}

pub(crate) struct FloatMap1<'a, T: FloatScalar, Op, const W: usize> {
    a: &'a SimdVec<T, W>,
    op: PhantomData<Op>,
}

impl<'a, T: FloatScalar, Op, const W: usize> FloatMap1<'a, T, Op, W> {
    pub(crate) fn new(a: &'a SimdVec<T, W>) -> Self {
        FloatMap1 { a, op: PhantomData }
    }
}

impl<T: FloatScalar, Op: FloatUnaryOp<T>, const W: usize> FloatVisitor<T>
    for FloatMap1<'_, T, Op, W>
{
    type Output = SimdVec<T, W>;

    #[inline(always)]
    unsafe fn visit<A: FloatKernel<T>>(self) -> SimdVec<T, W> {
        let mut out = SimdVec::<T, W>::zeroed();
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            out.write_reg::<A>(i, Op::reg::<A>(self.a.read_reg::<A>(i)));
        }
        out
    }

    fn visit_lanes(self) -> SimdVec<T, W> {
        SimdVec::from_fn(|i| Op::lane(self.a[i]))
    }
}

/// Register i of the vector occupies bits `[i * LANES, (i + 1) * LANES)`
pub(crate) struct ToMask<'a, T: Scalar, const W: usize> {
    pub(crate) v: &'a SimdVec<T, W>,
}

impl<T: Scalar, const W: usize> ArchVisitor<T> for ToMask<'_, T, W> {
    type Output = u64;

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) -> u64 {
        let mut mask = 0;
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            mask |= A::to_bitmask(self.v.read_reg::<A>(i)) << (i * A::LANES);
        }
        mask
    }

    fn visit_lanes(self) -> u64 {
        self.v
            .as_array()
            .iter()
            .enumerate()
            .fold(0, |mask, (i, x)| mask | ((x.is_set() as u64) << i))
    }
}

/// `bits` must not have bits set at or above `W`
pub(crate) struct FromMask<T: Scalar, const W: usize> {
    pub(crate) bits: u64,
    pub(crate) lane: PhantomData<T>,
}

impl<T: Scalar, const W: usize> ArchVisitor<T> for FromMask<T, W> {
    type Output = SimdVec<T, W>;

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) -> SimdVec<T, W> {
        let mut out = SimdVec::<T, W>::zeroed();
        for i in 0..SimdVec::<T, W>::n_regs_for::<A>() {
            out.write_reg::<A>(i, A::from_bitmask(self.bits >> (i * A::LANES)));
        }
        out
    }

    fn visit_lanes(self) -> SimdVec<T, W> {
        SimdVec::from_fn(|i| T::from_bool(self.bits & (1 << i) != 0))
    }
}

/// Combine the registers vertically with `Op`, then fold the last register
pub(crate) struct Reduce<'a, T: Scalar, Op, const W: usize> {
    v: &'a SimdVec<T, W>,
    op: PhantomData<Op>,
}

impl<'a, T: Scalar, Op, const W: usize> Reduce<'a, T, Op, W> {
    pub(crate) fn new(v: &'a SimdVec<T, W>) -> Self {
        Reduce { v, op: PhantomData }
    }
}

impl<T: Scalar, Op: BinaryOp<T>, const W: usize> ArchVisitor<T> for Reduce<'_, T, Op, W> {
    type Output = T;

    #[inline(always)]
    unsafe fn visit<A: Kernel<T>>(self) -> T {
        let n_regs = SimdVec::<T, W>::n_regs_for::<A>();
        if n_regs == 0 {
            return self.visit_lanes();
        }
        let mut acc = self.v.read_reg::<A>(0);
        for i in 1..n_regs {
            acc = Op::reg::<A>(acc, self.v.read_reg::<A>(i));
        }
        A::reduce::<Op>(acc)
    }

    fn visit_lanes(self) -> T {
        let lanes = self.v.as_array();
        lanes[1..].iter().fold(lanes[0], |acc, &x| Op::lane(acc, x))
    }
}
