#![forbid(unsafe_code)]

//! The behavior seam between host event loops and interactions.
//!
//! A [`Behavior`] is one self-contained interaction (drag, future
//! zoom/select variants). The host normalizes its input into
//! [`InputEvent`]s and feeds them to a [`Behaviors`] registry; the registry
//! dispatches in registration order and stops at the first behavior that
//! consumes the event. The set of behaviors is fixed at construction, there
//! is no runtime listener table.
//!
//! Every time-dependent decision takes `now` as a parameter; the host calls
//! [`Behaviors::poll`] once per tick so trailing throttle edges and
//! debounced settles fire without a scheduler.

use core::fmt;

use web_time::Instant;

use tangle_core::event::InputEvent;
use tangle_core::graph::GraphHost;

/// Whether a behavior consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event consumed; dispatch stops.
    Yes,
    /// Event left for the next behavior.
    No,
}

impl Handled {
    #[must_use]
    pub const fn consumed(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// One interaction wired to the canvas.
pub trait Behavior {
    /// Called once when the behavior is installed.
    fn activate(&mut self, _host: &mut dyn GraphHost) {}

    /// Process one input event.
    fn handle(&mut self, event: &InputEvent, now: Instant, host: &mut dyn GraphHost) -> Handled;

    /// Drive timers. Called once per host tick.
    fn poll(&mut self, _now: Instant, _host: &mut dyn GraphHost) {}

    /// Called once when the behavior is removed; implementations unwind any
    /// in-flight gesture here.
    fn deactivate(&mut self, _host: &mut dyn GraphHost) {}
}

/// Fixed, ordered set of behaviors.
#[derive(Default)]
pub struct Behaviors {
    entries: Vec<Box<dyn Behavior>>,
}

impl fmt::Debug for Behaviors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behaviors")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Behaviors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a behavior. Dispatch order is registration order.
    #[must_use]
    pub fn with(mut self, behavior: impl Behavior + 'static) -> Self {
        self.entries.push(Box::new(behavior));
        self
    }

    pub fn activate(&mut self, host: &mut dyn GraphHost) {
        for behavior in &mut self.entries {
            behavior.activate(host);
        }
    }

    /// Dispatch one event, stopping at the first consumer.
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        now: Instant,
        host: &mut dyn GraphHost,
    ) -> Handled {
        for behavior in &mut self.entries {
            if behavior.handle(event, now, host).consumed() {
                return Handled::Yes;
            }
        }
        Handled::No
    }

    pub fn poll(&mut self, now: Instant, host: &mut dyn GraphHost) {
        for behavior in &mut self.entries {
            behavior.poll(now, host);
        }
    }

    pub fn deactivate(&mut self, host: &mut dyn GraphHost) {
        for behavior in &mut self.entries {
            behavior.deactivate(host);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
