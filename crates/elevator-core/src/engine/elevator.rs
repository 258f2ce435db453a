//! Elevator controller
//!
//! Owns one ride at a time. `start()` leaves the idle state, and either a
//! completed ride or an interruption returns to it:
//!
//! ```text
//! Idle --start()--> Running --last step--> Idle   (arrival ding, on_end)
//!                           --interrupt()-> Idle   (jump to destination)
//! ```

use tracing::{debug, info, warn};

use super::destination;
use super::easing::ease_in_out_quad;
use super::frame::{FrameHandle, FrameScheduler};
use super::surface::Viewport;
use super::timing::{elapsed, ride_duration};
use crate::config::ElevatorConfig;
use crate::error::SoundError;
use crate::sound::Sound;

/// Lifecycle callback fired at ride start or completion
pub type Hook = Box<dyn FnMut()>;

/// Per-ride state. Everything is unset while idle.
#[derive(Debug, Default)]
struct RunState {
    is_running: bool,
    /// Scroll offset captured when the ride started
    start_position: Option<f64>,
    /// Destination offset
    end_position: Option<f64>,
    /// Timestamp of the first frame of this ride
    start_timestamp: Option<f64>,
    /// Frame requested but not yet delivered
    pending_frame: Option<FrameHandle>,
}

/// Scroll-to-destination animator with sound cues.
///
/// The engine never blocks. It asks the scheduler for a frame and waits for
/// the host to call [`step`](Self::step) with a monotonically increasing
/// timestamp in milliseconds.
pub struct Elevator<V: Viewport, S: FrameScheduler> {
    config: ElevatorConfig,
    state: RunState,
    viewport: V,
    scheduler: S,
    travel: Box<dyn Sound>,
    arrival: Box<dyn Sound>,
    on_start: Option<Hook>,
    on_end: Option<Hook>,
}

impl<V: Viewport, S: FrameScheduler> Elevator<V, S> {
    pub fn new(
        config: ElevatorConfig,
        viewport: V,
        scheduler: S,
        travel: Box<dyn Sound>,
        arrival: Box<dyn Sound>,
    ) -> Self {
        Self {
            config,
            state: RunState::default(),
            viewport,
            scheduler,
            travel,
            arrival,
            on_start: None,
            on_end: None,
        }
    }

    /// Call `hook` every time a ride starts
    pub fn with_on_start(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    /// Call `hook` every time a ride arrives (not on interruption)
    pub fn with_on_end(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_end = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &ElevatorConfig {
        &self.config
    }

    /// True strictly between `start()` and completion or interruption
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Destination of the current ride
    pub fn destination(&self) -> Option<f64> {
        self.state.end_position
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin a ride. Ignored while a ride is already running.
    pub fn start(&mut self) {
        if self.state.is_running {
            debug!("Elevator already moving, start ignored");
            return;
        }

        if self.config.audio {
            log_sound_failure("travel", self.travel.play_from_start());
        }

        self.state.is_running = true;
        let end = destination::resolve(&self.config, &self.viewport);
        let start = self.viewport.scroll_offset();
        self.state.end_position = Some(end);
        self.state.start_position = Some(start);
        self.state.start_timestamp = None;

        debug!(from = start, to = end, "Elevator ride started");

        if let Some(hook) = self.on_start.as_mut() {
            hook();
        }

        self.state.pending_frame = Some(self.scheduler.request_frame());
    }

    /// Advance the ride to `timestamp` (milliseconds).
    ///
    /// Call once per delivered frame. Frames delivered while idle are ignored.
    /// Elapsed time is clamped to the ride duration before easing, so a late
    /// last frame lands exactly on the destination. Elevator.js eases the raw
    /// elapsed time instead and can overshoot on that frame.
    pub fn step(&mut self, timestamp: f64) {
        // The frame we were waiting for is this one
        self.state.pending_frame = None;

        if !self.state.is_running {
            return;
        }
        let (Some(start), Some(end)) = (self.state.start_position, self.state.end_position) else {
            return;
        };

        let first_frame = *self.state.start_timestamp.get_or_insert(timestamp);
        let runtime = elapsed(first_frame, timestamp);
        let duration = ride_duration(start, end, self.config.duration_ms);

        // Past the end the curve bends back, so the final frame lands exactly
        let position = if duration > 0.0 {
            ease_in_out_quad(runtime.min(duration), start, end - start, duration)
        } else {
            end
        };
        self.viewport.scroll_to(position);

        if runtime < duration {
            self.state.pending_frame = Some(self.scheduler.request_frame());
        } else {
            self.arrive();
        }
    }

    /// Abort the ride, e.g. because the terminal lost focus.
    ///
    /// The viewport jumps straight to the destination; the arrival sound and
    /// `on_end` are skipped. Ignored while idle.
    pub fn interrupt(&mut self) {
        if !self.state.is_running {
            return;
        }

        if let Some(handle) = self.state.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        let end = self.state.end_position;
        self.state = RunState::default();

        if self.travel.is_playing() || self.config.audio {
            log_sound_failure("travel", self.travel.stop());
        }

        if let Some(end) = end {
            self.viewport.scroll_to(end);
        }
        info!(to = ?end, "Elevator ride interrupted");
    }

    /// Cancel any pending frame and silence both channels.
    ///
    /// Also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.state.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = RunState::default();
        log_sound_failure("travel", self.travel.stop());
        log_sound_failure("arrival", self.arrival.stop());
    }

    fn arrive(&mut self) {
        if self.config.audio {
            log_sound_failure("travel", self.travel.stop());
            log_sound_failure("arrival", self.arrival.play_from_start());
        }

        if let Some(hook) = self.on_end.as_mut() {
            hook();
        }

        debug!(at = ?self.state.end_position, "Elevator arrived");
        self.state = RunState::default();
    }
}

impl<V: Viewport, S: FrameScheduler> Drop for Elevator<V, S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn log_sound_failure(channel: &str, result: Result<(), SoundError>) {
    if let Err(e) = result {
        warn!(channel, error = %e, "Elevator sound failed");
    }
}
