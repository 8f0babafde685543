use alloc::boxed::Box;

/// Polled once per tick; `true` ends the run.
pub trait ExitTrigger {
    fn exit_requested(&mut self) -> bool;
}

impl<T: ExitTrigger + ?Sized> ExitTrigger for Box<T> {
    #[inline(always)]
    fn exit_requested(&mut self) -> bool {
        (**self).exit_requested()
    }
}

impl<T: ExitTrigger + ?Sized> ExitTrigger for &mut T {
    #[inline(always)]
    fn exit_requested(&mut self) -> bool {
        (**self).exit_requested()
    }
}

/// Ends the run after a fixed number of polls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameLimit {
    remaining: u64,
}

impl FrameLimit {
    pub const fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl ExitTrigger for FrameLimit {
    fn exit_requested(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(left) => {
                self.remaining = left;
                false
            }
            None => true,
        }
    }
}

/// Exits when either trigger does. Both are polled every time.
#[derive(Debug)]
pub struct Either<A, B>(pub A, pub B);

impl<A: ExitTrigger, B: ExitTrigger> ExitTrigger for Either<A, B> {
    fn exit_requested(&mut self) -> bool {
        let a = self.0.exit_requested();
        let b = self.1.exit_requested();
        a || b
    }
}

/// Never exits.
#[derive(Copy, Clone, Debug, Default)]
pub struct Never;

impl ExitTrigger for Never {
    #[inline(always)]
    fn exit_requested(&mut self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_limit_allows_exactly_n_ticks() {
        let mut limit = FrameLimit::new(3);
        assert!(!limit.exit_requested());
        assert!(!limit.exit_requested());
        assert!(!limit.exit_requested());
        assert!(limit.exit_requested());
        assert!(limit.exit_requested());
    }

    #[test]
    fn either_exits_on_first_trigger() {
        let mut exit = Either(Never, FrameLimit::new(1));
        assert!(!exit.exit_requested());
        assert!(exit.exit_requested());

        let mut boxed: Box<dyn ExitTrigger> = Box::new(FrameLimit::new(0));
        assert!(boxed.exit_requested());
    }
}
