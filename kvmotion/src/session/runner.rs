//! Session setup, the per-tick loop, and teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use crate::clock::FrameClock;
use crate::config::SessionConfig;
use crate::recording::{FrameRecord, Recorder};
use crate::sync::{MarkButton, SignalSink, SyncEdge, SyncSignal};
use crate::tracker::{
    Role, SessionPhase, TickOutcome, TrackerMultiplexer, TrackingRuntime,
};

use super::summary::SessionSummary;
use super::SessionError;

/// One recording session: owns its collaborators for the session
/// lifetime and drives the loop on the calling thread.
///
/// Single-threaded and synchronous; the only blocking call is the frame
/// clock's spin wait. There is no ambient context: the runtime,
/// sink, and mark button are passed in explicitly at construction.
///
/// ```ignore
/// let config = SessionConfig::new(48.0, "take.kvmotion");
/// let session = RecordingSession::new(&config, runtime, sink, button)?;
/// let stop = AtomicBool::new(false);
/// let summary = session.run(&stop)?;
/// ```
pub struct RecordingSession<R, S, B> {
    runtime: R,
    sink: S,
    button: B,
    clock: FrameClock,
    config: SessionConfig,
}

impl<R, S, B> RecordingSession<R, S, B>
where
    R: TrackingRuntime,
    S: SignalSink,
    B: MarkButton,
{
    /// Validate the configuration and arm a session.
    ///
    /// No hardware is touched and no file is created until [`run`].
    ///
    /// [`run`]: RecordingSession::run
    pub fn new(
        config: &SessionConfig,
        runtime: R,
        sink: S,
        button: B,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let clock = FrameClock::from_frame_rate(config.frame_rate)?;
        Ok(Self {
            runtime,
            sink,
            button,
            clock,
            config: config.clone(),
        })
    }

    /// Run the session until the stop flag is raised or the runtime
    /// reports `Ended`.
    ///
    /// Setup establishes the tracker handles and creates the recording
    /// (header first); teardown closes the recording even when the loop
    /// aborts on a collaborator failure, so the file is always left as a
    /// header plus complete records.
    pub fn run(mut self, stop: &AtomicBool) -> Result<SessionSummary, SessionError> {
        let mut multiplexer = TrackerMultiplexer::bind(&mut self.runtime)?;
        if multiplexer.roles().contains(&Role::HandheldObject) {
            warn!("trackers with the handheld_object role may not be detected");
        }

        let start_time = Utc::now().timestamp_micros() as f64 / 1e6;
        let mut recorder = Recorder::create(
            &self.config.output,
            self.clock.step_seconds(),
            start_time,
        )?;

        info!(
            output = %self.config.output.display(),
            frame_rate = self.config.frame_rate,
            roles = multiplexer.roles().len(),
            "recording session armed"
        );

        let mut sync = SyncSignal::new();
        let mut summary = SessionSummary::default();
        let started = Instant::now();

        let loop_result = Self::run_loop(
            &mut self.runtime,
            &mut self.sink,
            &mut self.button,
            &self.clock,
            &mut multiplexer,
            &mut recorder,
            &mut sync,
            &mut summary,
            stop,
        );

        // Best-effort teardown before propagating a loop failure.
        let close_result = recorder.close();
        summary.records_written = recorder.records_written();
        summary.elapsed = started.elapsed();
        loop_result?;
        close_result?;

        info!(%summary, "recording session finished");
        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_loop(
        runtime: &mut R,
        sink: &mut S,
        button: &mut B,
        clock: &FrameClock,
        multiplexer: &mut TrackerMultiplexer,
        recorder: &mut Recorder,
        sync: &mut SyncSignal,
        summary: &mut SessionSummary,
        stop: &AtomicBool,
    ) -> Result<(), SessionError> {
        let mut frame: u64 = 0;

        loop {
            if stop.load(Ordering::SeqCst) {
                info!(frames = frame, "stop requested, ending session");
                break;
            }

            let tick_start = clock.tick_start();

            let phase = runtime.session_phase()?;
            if phase == SessionPhase::Ended {
                info!(frames = frame, "tracking runtime ended the session");
                break;
            }

            let predicted_time =
                Duration::from_secs_f64(frame as f64 * clock.step_seconds());

            match multiplexer.poll(runtime, phase, predicted_time)? {
                TickOutcome::Standby => {
                    recorder.append(&FrameRecord::standby(frame))?;
                    summary.standby_ticks += 1;
                }
                TickOutcome::NoTrackerFound => {
                    recorder.append(&FrameRecord::no_tracker(frame))?;
                    summary.no_tracker_ticks += 1;
                }
                TickOutcome::Tracking(_located) => {
                    // The mark button only means something while a take is
                    // actually being tracked.
                    match sync.update(button.is_down()) {
                        Some(SyncEdge::Pulse) => {
                            sink.set_visual_state(true);
                            sink.emit_tone();
                            recorder.append(&FrameRecord::sync_mark(frame))?;
                            summary.sync_marks += 1;
                            info!(frame, "sync mark");
                        }
                        Some(SyncEdge::Release) => sink.set_visual_state(false),
                        None => {}
                    }
                }
            }

            clock.wait_until_elapsed(tick_start);
            frame += 1;
            summary.ticks = frame;
        }

        Ok(())
    }
}
