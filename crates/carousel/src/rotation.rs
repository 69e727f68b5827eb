use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[strum(serialize = "next", serialize = "forward")]
    Next,
    #[strum(serialize = "prev", serialize = "previous", serialize = "back")]
    Prev,
}

/// Active-dot counter, kept apart from the rotation offset and moved in
/// lockstep with every single-step rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indicator {
    index: usize,
}

impl Indicator {
    pub fn index(&self) -> usize {
        self.index
    }

    fn advance(&mut self, step: Step, len: usize) {
        if len == 0 {
            self.index = 0;
            return;
        }
        self.index = match step {
            Step::Next => (self.index + 1) % len,
            Step::Prev => (self.index + len - 1) % len,
        };
    }

    /// Shortest single-step path to `target`. Ties go forward.
    pub fn path_to(&self, target: usize, len: usize) -> Option<(Step, usize)> {
        if len == 0 {
            return None;
        }
        let forward = (target % len + len - self.index) % len;
        let backward = (len - forward) % len;
        if forward <= backward {
            Some((Step::Next, forward))
        } else {
            Some((Step::Prev, backward))
        }
    }

    fn reset(&mut self) {
        self.index = 0;
    }
}

/// Working list of a carousel plus its rotation offset.
///
/// The working list is always a rotation of the list it was built from, so
/// the visible window is simply its head.
#[derive(Debug, Clone)]
pub struct RotationState<T> {
    items: VecDeque<T>,
    offset: usize,
    indicator: Indicator,
    visible_count: usize,
}

impl<T> RotationState<T> {
    pub fn new(items: Vec<T>, visible_count: usize) -> Self {
        Self {
            items: items.into(),
            offset: 0,
            indicator: Indicator::default(),
            visible_count,
        }
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items.into();
        self.offset = 0;
        self.indicator.reset();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn logical_index(&self) -> usize {
        self.indicator.index()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// The first `visible_count` items of the working list, fewer if the list is short.
    pub fn window(&self) -> impl Iterator<Item = &T> {
        self.items.iter().take(self.visible_count)
    }

    /// Moves one item from one end of the working list to the other.
    /// Returns false only when there is nothing to rotate.
    pub fn rotate(&mut self, step: Step) -> bool {
        let len = self.items.len();
        if len == 0 {
            return false;
        }

        match step {
            Step::Next => self.items.rotate_left(1),
            Step::Prev => self.items.rotate_right(1),
        }
        self.offset = match step {
            Step::Next => (self.offset + 1) % len,
            Step::Prev => (self.offset + len - 1) % len,
        };
        self.indicator.advance(step, len);

        log::debug!(
            "Rotated {} (offset={}, index={}, len={})",
            step,
            self.offset,
            self.indicator.index(),
            len
        );
        true
    }

    pub fn path_to(&self, target: usize) -> Option<(Step, usize)> {
        self.indicator.path_to(target, self.items.len())
    }

    /// Walks to `target` one rotation at a time and returns the number of steps taken.
    pub fn jump_to(&mut self, target: usize) -> usize {
        let Some((step, count)) = self.path_to(target) else {
            return 0;
        };
        for _ in 0..count {
            self.rotate(step);
        }
        count
    }
}
