//! Fixed-interval frame loop
//!
//! Between two frames the driver hands every input event to the
//! controller. When the frame is due it runs the deferred work and renders,
//! whether or not anything happened.

use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::controller::Controller;
use crate::error::ClientError;
use crate::sim::Simulation;
use crate::storage::Storage;
use crate::viewport::{EventSource, Viewport};

pub struct FrameDriver<S, V, T, E> {
    controller: Controller<S, V, T>,
    events: E,
    interval: Duration,
    last_frame: Instant,
    frames: u64,
}

impl<S, V, T, E> FrameDriver<S, V, T, E>
where
    S: Simulation,
    V: Viewport,
    T: Storage,
    E: EventSource,
{
    pub fn new(controller: Controller<S, V, T>, events: E) -> Self {
        let interval = controller.state().config().frame_interval();
        Self {
            controller,
            events,
            interval,
            last_frame: Instant::now(),
            frames: 0,
        }
    }

    pub fn controller(&self) -> &Controller<S, V, T> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<S, V, T> {
        &mut self.controller
    }

    pub fn into_controller(self) -> Controller<S, V, T> {
        self.controller
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Handle events until the next frame is due, then run that frame.
    pub fn run_frame(&mut self) -> Result<(), ClientError> {
        let due = self.last_frame + self.interval;
        loop {
            if self.controller.should_quit() {
                return Ok(());
            }
            let timeout = due.saturating_duration_since(Instant::now());
            if let Some(event) = self.events.poll(timeout)? {
                self.controller.handle_input(event, Instant::now())?;
            }
            // a busy event stream must not hold the frame back
            if Instant::now() >= due {
                break;
            }
        }

        let now = Instant::now();
        self.last_frame = now;
        self.frames += 1;
        self.controller.tick(now)
    }

    /// Run frames until quit or a fatal error.
    pub fn run(&mut self) -> Result<(), ClientError> {
        info!(interval_ms = self.interval.as_millis() as u64, "frame driver started");
        self.controller.render()?;
        while !self.controller.should_quit() {
            if let Err(err) = self.run_frame() {
                error!(%err, frames = self.frames, "frame driver stopped");
                return Err(err);
            }
        }
        info!(frames = self.frames, "frame driver finished");
        Ok(())
    }
}
