use crate::rotation::Step;

/// At most one rotation transition in flight per carousel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionGate {
    in_flight: Option<Step>,
}

impl TransitionGate {
    pub fn in_flight(&self) -> Option<Step> {
        self.in_flight
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Claims the gate. Returns false if another transition still runs.
    pub fn begin(&mut self, step: Step) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(step);
        true
    }

    /// Completion signal from the presentation layer. Safe to call repeatedly.
    pub fn complete(&mut self) -> Option<Step> {
        self.in_flight.take()
    }
}
