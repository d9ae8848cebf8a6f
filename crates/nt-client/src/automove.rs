//! Click-to-move stepping
//!
//! The simulation owns the path. The runner only remembers that one step is
//! scheduled and when it is due; firing reads the next cell from the
//! simulation and moves the player one cell towards it.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::camera::WorldPos;
use crate::sim::Simulation;

/// Default delay between scheduling a step and executing it.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutomoveState {
    #[default]
    Idle,
    /// One step is scheduled for `due`.
    Running { due: Instant },
}

/// What a fired step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The player was moved by this delta.
    Moved { dx: i32, dy: i32 },
    /// The next cell was the player's own; the rest of the path was dropped.
    Completed,
    /// Nothing left to walk.
    Empty,
}

#[derive(Debug, Clone)]
pub struct AutomoveRunner {
    state: AutomoveState,
    delay: Duration,
}

impl AutomoveRunner {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: AutomoveState::Idle,
            delay,
        }
    }

    pub fn state(&self) -> AutomoveState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AutomoveState::Running { .. })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule one step if there is a path and nothing is scheduled yet.
    /// Returns whether a step was scheduled.
    pub fn schedule(&mut self, now: Instant, path_pending: bool) -> bool {
        if !path_pending || self.is_running() {
            return false;
        }
        self.state = AutomoveState::Running {
            due: now + self.delay,
        };
        debug!(delay_ms = self.delay.as_millis() as u64, "automove step scheduled");
        true
    }

    /// Drop the scheduled step, if any.
    pub fn cancel(&mut self) {
        if self.is_running() {
            debug!("automove step cancelled");
        }
        self.state = AutomoveState::Idle;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.state {
            AutomoveState::Running { due } => now >= due,
            AutomoveState::Idle => false,
        }
    }

    /// Execute the scheduled step against the simulation and go back to
    /// idle. The caller renders afterwards.
    pub fn fire<S: Simulation + ?Sized>(&mut self, sim: &mut S) -> StepOutcome {
        self.state = AutomoveState::Idle;

        let path = sim.automove_path();
        let Some(&next) = path.first() else {
            return StepOutcome::Empty;
        };

        let target = WorldPos::from_index(next, sim.width());
        let (dx, dy) = target - sim.player();
        if (dx, dy) == (0, 0) {
            // bounded by the path length in case the engine never shrinks it
            for _ in 0..path.len() {
                if !sim.has_automove() {
                    break;
                }
                sim.advance_automove();
            }
            debug!(remaining = path.len(), "automove path completed");
            return StepOutcome::Completed;
        }

        sim.move_by(dx, dy);
        sim.advance_automove();
        debug!(dx, dy, "automove step");
        StepOutcome::Moved { dx, dy }
    }
}

impl Default for AutomoveRunner {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeSim};

    fn sim_with_path(player: (i32, i32), cells: &[(i32, i32)]) -> FakeSim {
        let mut sim = FakeSim::new(10, 10);
        sim.player = WorldPos::new(player.0, player.1);
        sim.path = cells
            .iter()
            .map(|&(x, y)| (y * 10 + x) as usize)
            .collect();
        sim
    }

    #[test]
    fn test_schedule_needs_a_path() {
        let mut runner = AutomoveRunner::default();
        assert!(!runner.schedule(Instant::now(), false));
        assert_eq!(runner.state(), AutomoveState::Idle);
    }

    #[test]
    fn test_step_is_due_after_delay() {
        let mut runner = AutomoveRunner::new(Duration::from_millis(1000));
        let start = Instant::now();
        assert!(runner.schedule(start, true));
        assert!(!runner.is_due(start + Duration::from_millis(999)));
        assert!(runner.is_due(start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_reschedule_while_running_is_noop() {
        let mut runner = AutomoveRunner::default();
        let start = Instant::now();
        assert!(runner.schedule(start, true));
        let first = runner.state();
        assert!(!runner.schedule(start + Duration::from_millis(500), true));
        assert_eq!(runner.state(), first);
    }

    #[test]
    fn test_two_step_path() {
        let mut sim = sim_with_path((2, 2), &[(3, 2), (4, 2)]);
        let mut runner = AutomoveRunner::default();
        runner.schedule(Instant::now(), sim.has_automove());

        assert_eq!(runner.fire(&mut sim), StepOutcome::Moved { dx: 1, dy: 0 });
        assert_eq!(sim.player, WorldPos::new(3, 2));
        assert_eq!(sim.path.len(), 1);
        assert_eq!(runner.state(), AutomoveState::Idle);
        assert_eq!(sim.calls, vec![Call::MoveBy(1, 0), Call::AdvanceAutomove]);
    }

    #[test]
    fn test_zero_delta_drains_path() {
        let mut sim = sim_with_path((2, 2), &[(2, 2), (3, 2), (4, 2)]);
        let mut runner = AutomoveRunner::default();
        assert_eq!(runner.fire(&mut sim), StepOutcome::Completed);
        assert!(sim.path.is_empty());
        assert!(!sim.calls.contains(&Call::MoveBy(0, 0)));
    }

    #[test]
    fn test_fire_on_empty_path() {
        let mut sim = sim_with_path((2, 2), &[]);
        let mut runner = AutomoveRunner::default();
        assert_eq!(runner.fire(&mut sim), StepOutcome::Empty);
        assert!(sim.calls.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut runner = AutomoveRunner::default();
        let start = Instant::now();
        runner.schedule(start, true);
        runner.cancel();
        assert!(!runner.is_due(start + Duration::from_secs(5)));
    }
}
