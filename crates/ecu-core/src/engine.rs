//! Engine-control capability
//!
//! `EngineController` is the boundary a vehicle drives its engine through.
//! Hosts supply the implementation (a hardware driver, or the
//! `SimulatedEngine` below).

use crate::errors::EngineStartFailure;

/// Start/stop capability of an engine plus its authoritative run flag
///
/// Implementations must keep `is_running` in line with the last successful
/// `start` or `shutdown`. Behaviour under concurrent use of one controller
/// from several threads is undefined; a controller is borrowed by exactly one
/// vehicle at a time.
pub trait EngineController {
    /// Attempt to start the engine
    ///
    /// `Ok(false)` is a refusal. An abort is reported as `Err`.
    fn start(&mut self) -> Result<bool, EngineStartFailure>;

    /// Stop the engine. Safe to call when already stopped.
    fn shutdown(&mut self);

    /// Current run state
    fn is_running(&self) -> bool;

    /// Overwrite the run state (used to reconcile after a successful start)
    fn set_running(&mut self, running: bool);
}

/// Scripted outcome of `SimulatedEngine::start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartBehavior {
    /// Start succeeds
    Starts,
    /// Start returns `false`
    Refuses,
    /// Start aborts with the given reason
    Aborts(String),
}

/// Engine simulator with a fixed start behaviour
///
/// # Example
/// ```
/// use ecu_core::engine::{EngineController, SimulatedEngine, StartBehavior};
///
/// let mut engine = SimulatedEngine::new(StartBehavior::Starts);
/// assert_eq!(engine.start(), Ok(true));
/// assert!(engine.is_running());
///
/// engine.shutdown();
/// assert!(!engine.is_running());
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    behavior: StartBehavior,
    running: bool,
    start_attempts: u32,
}

impl SimulatedEngine {
    pub fn new(behavior: StartBehavior) -> Self {
        Self {
            behavior,
            running: false,
            start_attempts: 0,
        }
    }

    /// Number of times `start` has been called
    pub fn start_attempts(&self) -> u32 {
        self.start_attempts
    }

    /// Change the outcome of subsequent start attempts
    pub fn set_behavior(&mut self, behavior: StartBehavior) {
        self.behavior = behavior;
    }
}

impl Default for SimulatedEngine {
    fn default() -> Self {
        Self::new(StartBehavior::Starts)
    }
}

impl EngineController for SimulatedEngine {
    fn start(&mut self) -> Result<bool, EngineStartFailure> {
        self.start_attempts += 1;
        match &self.behavior {
            StartBehavior::Starts => {
                self.running = true;
                Ok(true)
            }
            StartBehavior::Refuses => Ok(false),
            StartBehavior::Aborts(reason) => Err(EngineStartFailure::new(reason.clone())),
        }
    }

    fn shutdown(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }
}
