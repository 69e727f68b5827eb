use crate::rotation::Step;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Writing direction of the container a carousel is mounted in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    #[strum(serialize = "rtl", serialize = "right-to-left")]
    Rtl,
    #[strum(serialize = "ltr", serialize = "left-to-right")]
    Ltr,
}

/// Physical arrow control, independent of writing direction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Arrow {
    #[strum(serialize = "left", serialize = "l")]
    Left,
    #[strum(serialize = "right", serialize = "r")]
    Right,
}

/// Fixed at mount; later direction changes are not picked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionResolver {
    direction: TextDirection,
}

impl DirectionResolver {
    pub fn new(direction: TextDirection) -> Self {
        Self { direction }
    }

    /// Container setting wins over the document default.
    pub fn resolve(container: Option<TextDirection>, document: TextDirection) -> Self {
        Self::new(container.unwrap_or(document))
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn step_for(&self, arrow: Arrow) -> Step {
        match (self.direction, arrow) {
            (TextDirection::Ltr, Arrow::Right) | (TextDirection::Rtl, Arrow::Left) => Step::Next,
            (TextDirection::Ltr, Arrow::Left) | (TextDirection::Rtl, Arrow::Right) => Step::Prev,
        }
    }

    pub fn arrow_for(&self, step: Step) -> Arrow {
        match (self.direction, step) {
            (TextDirection::Ltr, Step::Next) | (TextDirection::Rtl, Step::Prev) => Arrow::Right,
            (TextDirection::Ltr, Step::Prev) | (TextDirection::Rtl, Step::Next) => Arrow::Left,
        }
    }
}
