use crate::catalog::StoreItem;
use crate::config::CarouselName;
use carousel::Arrow;

/// Identifies one mount of a carousel, so late messages from a torn-down
/// mount can be told apart after a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Next,
    Prev,
    Jump(usize),
    Arrow(Arrow),
    Hover(bool),
    Focus(bool),
    Swipe { dx: f64, dy: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Control(CarouselName, Control),
    AutoAdvance(MountId),
    Loaded(MountId, Vec<StoreItem>),
    Show,
    ConfigReload,
    Quit,
}
