use crate::render::frame::render_frame;
use crate::render::plan::FramePlan;
use crate::session::render_session::RenderSession;

/// External continuously-advancing time source, typically an adapter over
/// the host's audio element. The engine never keeps its own clock; every
/// tick reads the position fresh to avoid drift.
pub trait TimeSource {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    /// Total media duration in seconds.
    fn duration(&self) -> f64;
    fn play(&mut self);
    fn pause(&mut self);
    /// Jump to `t` seconds. Callers clamp before invoking.
    fn seek(&mut self, t: f64);
    /// Whether playback has reached the end of the media.
    fn ended(&self) -> bool;
}

/// Playback lifecycle: `Idle -> Playing <-> Paused -> Ended`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Ended,
}

/// Binds a render session to a time source and drives the per-frame redraw.
///
/// The tick runs in every state, not just while playing, so a seek while
/// paused still repaints. Watermark rotation is keyed to the driving loop's
/// wall-clock and therefore continues across pauses.
pub struct Transport<S: TimeSource> {
    source: S,
    session: RenderSession,
    state: PlaybackState,
}

impl<S: TimeSource> Transport<S> {
    pub fn new(session: RenderSession, source: S) -> Self {
        Self {
            source,
            session,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut RenderSession {
        &mut self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Start or resume playback. From `Ended` the position rewinds to zero
    /// first.
    pub fn play(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.state == PlaybackState::Ended {
            self.source.seek(0.0);
        }
        self.source.play();
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.source.pause();
            self.state = PlaybackState::Paused;
        }
    }

    /// Seek to `t`, clamped to `[0, duration]`. Play/pause state is
    /// unchanged.
    pub fn seek(&mut self, t: f64) {
        let clamped = t.clamp(0.0, self.source.duration().max(0.0));
        self.source.seek(clamped);
    }

    /// User-triggered watermark move.
    pub fn move_watermark(&mut self, wall_secs: f64) {
        self.session.move_watermark(wall_secs);
    }

    /// One frame tick: read the time source, advance session state, compute
    /// the plan. `wall_secs` is the host loop's monotonic clock, used only
    /// for the watermark refresh cadence.
    pub fn tick(&mut self, wall_secs: f64) -> FramePlan {
        if self.state == PlaybackState::Playing && self.source.ended() {
            tracing::debug!("playback reached the end of the media");
            self.state = PlaybackState::Ended;
        }
        self.session.refresh_watermark_if_due(wall_secs);

        let t = self.source.current_time();
        let duration = self.source.duration();
        render_frame(&mut self.session, t, duration)
    }

    /// Tear the transport apart, returning the session.
    pub fn into_session(self) -> RenderSession {
        self.session
    }
}

/// Owns the per-frame callback chain for a transport, keeping host timing
/// APIs out of the engine. The host schedules one [`FrameLoop::step`] per
/// display refresh; cancelling drops all further work.
pub struct FrameLoop<S: TimeSource> {
    transport: Transport<S>,
    cancelled: bool,
}

impl<S: TimeSource> FrameLoop<S> {
    pub fn new(transport: Transport<S>) -> Self {
        Self {
            transport,
            cancelled: false,
        }
    }

    /// Run one tick, or return `None` once the loop has been cancelled (the
    /// host should stop scheduling).
    pub fn step(&mut self, wall_secs: f64) -> Option<FramePlan> {
        if self.cancelled {
            return None;
        }
        Some(self.transport.tick(wall_secs))
    }

    /// Cancel the pending callback chain. Idempotent.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            tracing::debug!("frame loop cancelled");
            self.cancelled = true;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn transport(&self) -> &Transport<S> {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport<S> {
        &mut self.transport
    }

    /// Release the transport (and with it the session's assets).
    pub fn into_transport(self) -> Transport<S> {
        self.transport
    }
}

/// Deterministic time source for tests and headless drives: time advances
/// only through explicit [`ManualTimeSource::advance`] calls while playing.
#[derive(Clone, Copy, Debug)]
pub struct ManualTimeSource {
    time: f64,
    duration: f64,
    playing: bool,
}

impl ManualTimeSource {
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration,
            playing: false,
        }
    }

    /// Advance the clock by `dt` seconds if playing, saturating at the
    /// duration.
    pub fn advance(&mut self, dt: f64) {
        if self.playing {
            self.time = (self.time + dt).min(self.duration);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl TimeSource for ManualTimeSource {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, t: f64) {
        self.time = t.clamp(0.0, self.duration);
    }

    fn ended(&self) -> bool {
        self.duration > 0.0 && self.time >= self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transport/controller.rs"]
mod tests;
