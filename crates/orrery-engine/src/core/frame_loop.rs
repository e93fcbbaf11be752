/// Lifecycle of the per-refresh animation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Frame loop bookkeeping.
///
/// The host's frame-timing primitive (requestAnimationFrame in the browser,
/// a plain `for` loop in tests) decides when a frame happens; this only
/// tracks whether another frame should be scheduled and how many ran.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    /// A loop that is already running.
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        self.state = LoopState::Running;
    }

    /// Stop scheduling further frames. Idempotent.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Count a completed frame. Returns whether the next one should be scheduled.
    pub fn advance(&mut self) -> bool {
        if self.is_running() {
            self.frames += 1;
        }
        self.is_running()
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        let l = FrameLoop::new();
        assert!(l.is_running());
        assert_eq!(l.frames(), 0);
    }

    #[test]
    fn advance_counts_frames() {
        let mut l = FrameLoop::new();
        for _ in 0..5 {
            assert!(l.advance());
        }
        assert_eq!(l.frames(), 5);
    }

    #[test]
    fn stop_halts_counting() {
        let mut l = FrameLoop::new();
        l.advance();
        l.stop();
        assert!(!l.advance());
        assert_eq!(l.frames(), 1);
        assert_eq!(l.state(), LoopState::Stopped);

        l.start();
        assert!(l.advance());
        assert_eq!(l.frames(), 2);
    }
}
