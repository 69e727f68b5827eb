//! Circular carousel engine: a fixed-size window over a rotating item list,
//! with direction-aware arrows, swipe recognition, pause-on-interaction and
//! a timer that auto-advances between frames.

pub mod cache;
pub mod carousel;
pub mod direction;
pub mod gesture;
pub mod item;
pub mod macros;
pub mod pause;
pub mod rotation;
pub mod source;
pub mod timer;
pub mod transition;

pub use cache::ItemCache;
pub use carousel::{Carousel, CarouselAction, CarouselOptions, CarouselView};
pub use direction::{Arrow, DirectionResolver, TextDirection};
pub use gesture::{GestureInput, MoveAction, Point, SwipeConfig};
pub use item::{DisplayItem, ItemKey};
pub use pause::{PauseEdge, PauseReason, PauseState};
pub use rotation::{RotationState, Step};
pub use source::{
    FetchResponse, ItemSource, JsonFileSource, LoadTask, SourceError, SourceKey, StaticSource,
    load_items,
};
pub use timer::AutoAdvanceTimer;
