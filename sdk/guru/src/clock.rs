/// Source of vertical blank edges.
///
/// Implementations block until the next refresh edge. If the caller was
/// too slow and an edge already passed, the wait runs to the one after:
/// the frame is dropped, nothing is reported.
pub trait FrameClock {
    fn wait_next_frame(&mut self);
}

impl<C: FrameClock + ?Sized> FrameClock for &mut C {
    #[inline(always)]
    fn wait_next_frame(&mut self) {
        (**self).wait_next_frame()
    }
}
