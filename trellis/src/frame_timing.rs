//! Sampled per-frame timings.
//!
//! When enabled, every 60th frame reports how long each phase took as one
//! `debug` event. Other frames skip the clock reads entirely.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const SAMPLE_EVERY: u64 = 60;

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// A timed part of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Declaring and solving the layout.
    Layout,
    /// Replaying render commands onto the backend.
    Interpret,
    /// Compositing the frame group and flushing the surface.
    Composite,
}

impl Phase {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        self as usize
    }
}

/// Phase durations recorded for one frame.
#[derive(Debug, Clone)]
pub struct FrameTimings {
    frame: u64,
    sampled: bool,
    phases: [Option<Duration>; Phase::COUNT],
}

impl FrameTimings {
    pub fn new(frame: u64) -> Self {
        Self {
            frame,
            sampled: is_enabled() && frame % SAMPLE_EVERY == 0,
            phases: [None; Phase::COUNT],
        }
    }

    pub fn is_sampled(&self) -> bool {
        self.sampled
    }

    /// Time `phase` until the returned guard drops.
    pub fn span(&mut self, phase: Phase) -> PhaseSpan<'_> {
        let start = self.sampled.then(Instant::now);
        PhaseSpan {
            timings: self,
            phase,
            start,
        }
    }

    pub fn get(&self, phase: Phase) -> Option<Duration> {
        self.phases[phase.index()]
    }

    /// Emit the recorded phases if this frame is sampled.
    pub fn report(&self, commands: usize) {
        if !self.sampled {
            return;
        }
        tracing::debug!(
            frame = self.frame,
            commands,
            layout = ?self.get(Phase::Layout),
            interpret = ?self.get(Phase::Interpret),
            composite = ?self.get(Phase::Composite),
            "frame timing"
        );
    }
}

/// Records the elapsed time of one phase on drop.
pub struct PhaseSpan<'t> {
    timings: &'t mut FrameTimings,
    phase: Phase,
    start: Option<Instant>,
}

impl Drop for PhaseSpan<'_> {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            self.timings.phases[self.phase.index()] = Some(start.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests share the global switch, so only the off-sample path is asserted
    // without touching it.

    #[test]
    fn test_unsampled_frame_records_nothing() {
        let mut timings = FrameTimings::new(1);
        {
            let _span = timings.span(Phase::Layout);
        }
        assert!(!timings.is_sampled());
        assert_eq!(timings.get(Phase::Layout), None);
        timings.report(0);
    }

    #[test]
    fn test_sampled_frame_records_phases() {
        let mut timings = FrameTimings {
            frame: 0,
            sampled: true,
            phases: [None; Phase::COUNT],
        };
        {
            let _span = timings.span(Phase::Interpret);
        }
        assert!(timings.get(Phase::Interpret).is_some());
        assert_eq!(timings.get(Phase::Composite), None);
        timings.report(3);
    }

    #[test]
    fn test_only_every_sixtieth_frame_samples() {
        set_enabled(true);
        let sampled: Vec<u64> = (0..=120).filter(|&frame| FrameTimings::new(frame).is_sampled()).collect();
        set_enabled(false);
        assert_eq!(sampled, vec![0, 60, 120]);
    }
}
