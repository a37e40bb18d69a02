//! Frame sinks: where animation steps go while an action is in flight.
//!
//! Effectful actions (move, jump) suspend the interpreter while the engine
//! plays out the motion one frame at a time. Each frame is handed to a
//! [`FrameSink`], which owns pacing and presentation. [`TerminalFrames`]
//! paces at the target rate for interactive runs; [`NullFrames`] completes
//! motions instantly for headless runs and tests.

use std::thread;
use std::time::{Duration, Instant};

use log::trace;

/// Target animation rate, conceptually 60 steps per second.
pub const TARGET_FPS: u32 = 60;

/// One animation step of an in-flight motion.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Cell the character occupies while the motion plays.
    pub cell: usize,
    /// Fraction of the whole motion completed, in `(0, 1]`.
    pub progress: f32,
    /// True while the character is mid-jump.
    pub airborne: bool,
}

/// Consumer of animation frames. Implementations own pacing: the engine
/// calls `frame` once per animation step and carries on when it returns.
pub trait FrameSink {
    fn frame(&mut self, frame: &Frame);
}

/// Discards frames and never sleeps. Motions complete instantly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFrames;

impl FrameSink for NullFrames {
    fn frame(&mut self, _frame: &Frame) {}
}

/// Paces frames at [`TARGET_FPS`] using a frame counter against a base
/// instant, resetting the base whenever the sink falls behind rather than
/// trying to catch up with a burst.
#[derive(Debug)]
pub struct TerminalFrames {
    rate: Duration,
    frame_count: u32,
    base: Instant,
}

impl TerminalFrames {
    pub fn new() -> TerminalFrames {
        TerminalFrames {
            rate: Duration::from_secs(1) / TARGET_FPS,
            frame_count: 0,
            base: Instant::now(),
        }
    }
}

impl Default for TerminalFrames {
    fn default() -> TerminalFrames {
        TerminalFrames::new()
    }
}

impl FrameSink for TerminalFrames {
    fn frame(&mut self, frame: &Frame) {
        trace!(
            "frame: cell {} progress {:.2} airborne {}",
            frame.cell, frame.progress, frame.airborne
        );
        self.frame_count += 1;
        let target = self.base + self.rate * self.frame_count;
        let now = Instant::now();
        if now <= target {
            thread::sleep(target - now);
        } else {
            // fell behind; restart the clock instead of bursting
            self.frame_count = 0;
            self.base = Instant::now();
        }
    }
}
