use strum::{Display as StrumDisplay, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum PauseReason {
    Hover,
    Focus,
    Touch,
}

/// Edge of the aggregate paused flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseEdge {
    Paused,
    Resumed,
}

/// Paused while any reason is held. Each reason is released by its own
/// out-event, so leaving with the pointer does not resume a focused carousel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseState {
    hover: bool,
    focus: bool,
    touch: bool,
}

impl PauseState {
    pub fn is_paused(&self) -> bool {
        self.hover || self.focus || self.touch
    }

    pub fn hold(&mut self, reason: PauseReason) -> Option<PauseEdge> {
        self.set(reason, true)
    }

    pub fn release(&mut self, reason: PauseReason) -> Option<PauseEdge> {
        self.set(reason, false)
    }

    pub fn set(&mut self, reason: PauseReason, held: bool) -> Option<PauseEdge> {
        let was_paused = self.is_paused();
        match reason {
            PauseReason::Hover => self.hover = held,
            PauseReason::Focus => self.focus = held,
            PauseReason::Touch => self.touch = held,
        }
        Self::edge(was_paused, self.is_paused())
    }

    fn edge(before: bool, after: bool) -> Option<PauseEdge> {
        match (before, after) {
            (false, true) => Some(PauseEdge::Paused),
            (true, false) => Some(PauseEdge::Resumed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_reason_toggles() {
        let mut pause = PauseState::default();
        assert_eq!(pause.hold(PauseReason::Hover), Some(PauseEdge::Paused));
        assert!(pause.is_paused());
        assert_eq!(pause.hold(PauseReason::Hover), None);
        assert_eq!(pause.release(PauseReason::Hover), Some(PauseEdge::Resumed));
        assert!(!pause.is_paused());
    }

    #[test]
    fn test_overlapping_reasons() {
        let mut pause = PauseState::default();
        assert_eq!(pause.hold(PauseReason::Focus), Some(PauseEdge::Paused));
        assert_eq!(pause.hold(PauseReason::Hover), None);
        assert_eq!(pause.release(PauseReason::Hover), None);
        assert!(pause.is_paused());
        assert_eq!(pause.release(PauseReason::Focus), Some(PauseEdge::Resumed));
    }

    #[test]
    fn test_release_without_hold_is_a_no_op() {
        let mut pause = PauseState::default();
        assert_eq!(pause.release(PauseReason::Touch), None);
        assert!(!pause.is_paused());
    }
}
