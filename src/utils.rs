// ------ Alignment helpers

/// Whether the address of `ptr` is a multiple of `align` (non-zero)
#[inline(always)]
pub fn is_aligned<T>(ptr: *const T, align: usize) -> bool {
    (ptr as usize) % align == 0
}

/// A 64-byte aligned wrapper, e.g. for buffers passed to the aligned loads and stores
/// (64 bytes is the alignment of the widest register)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct Aligned<A>(pub A);

impl<A> std::ops::Deref for Aligned<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.0
    }
}

impl<A> std::ops::DerefMut for Aligned<A> {
    fn deref_mut(&mut self) -> &mut A {
        &mut self.0
    }
}
