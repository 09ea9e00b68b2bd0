//! Edge-triggered sync marker for aligning recordings with video.
//!
//! The operator holds a clapperboard-style button; the recorder must
//! react exactly once per press no matter how many ticks the button is
//! held across. `SyncSignal` keeps the single bit of state needed for
//! that: whether the button was down on the previous tick.
//!
//! A pulse drives the external display/audio sink (a visible "marked"
//! state plus a short tone) so that the mark is simultaneously captured
//! on the video track; the release edge reverts the visual state.

/// The two edges a mark button can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEdge {
    /// Down-going edge: the button was just pressed.
    Pulse,
    /// Up-going edge: the button was just released.
    Release,
}

/// Edge detector over a polled button state.
#[derive(Debug, Default)]
pub struct SyncSignal {
    was_down: bool,
}

impl SyncSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one tick's button sample and report any edge.
    ///
    /// Holding the button yields exactly one `Pulse`; releasing it yields
    /// exactly one `Release`. Steady states yield nothing.
    pub fn update(&mut self, button_down: bool) -> Option<SyncEdge> {
        let edge = match (self.was_down, button_down) {
            (false, true) => Some(SyncEdge::Pulse),
            (true, false) => Some(SyncEdge::Release),
            _ => None,
        };
        self.was_down = button_down;
        edge
    }
}

/// External display/audio sink driven by sync pulses.
///
/// Best-effort from the loop's perspective: implementations must not
/// block and cannot fail the session.
pub trait SignalSink {
    /// Switch the visual marker on or off.
    fn set_visual_state(&mut self, marked: bool);

    /// Emit a single short tone.
    fn emit_tone(&mut self);
}

/// Operator input: is the mark button currently down?
///
/// Sampled once per tick while tracking is active.
pub trait MarkButton {
    fn is_down(&mut self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_produces_single_pulse_and_release() {
        let mut signal = SyncSignal::new();
        let samples = [false, true, true, true, false];
        let edges: Vec<_> = samples.iter().map(|&down| signal.update(down)).collect();

        assert_eq!(
            edges,
            vec![
                None,
                Some(SyncEdge::Pulse),
                None,
                None,
                Some(SyncEdge::Release),
            ]
        );
    }

    #[test]
    fn test_repeated_presses_produce_repeated_pulses() {
        let mut signal = SyncSignal::new();
        let mut pulses = 0;
        for &down in &[true, false, true, false, true] {
            if signal.update(down) == Some(SyncEdge::Pulse) {
                pulses += 1;
            }
        }
        assert_eq!(pulses, 3);
    }

    #[test]
    fn test_steady_released_state_is_silent() {
        let mut signal = SyncSignal::new();
        for _ in 0..10 {
            assert_eq!(signal.update(false), None);
        }
    }
}
