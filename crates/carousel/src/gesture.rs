use crate::rotation::Step;
use serde::{Deserialize, Serialize};

pub const DEFAULT_JITTER_PX: f64 = 10.0; // below this a move is not yet a swipe
pub const DEFAULT_MIN_SWIPE_PX: f64 = 50.0; // release distance that counts as a swipe

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn delta_from(self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub jitter_px: f64,
    pub min_distance_px: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            jitter_px: DEFAULT_JITTER_PX,
            min_distance_px: DEFAULT_MIN_SWIPE_PX,
        }
    }
}

impl SwipeConfig {
    pub fn is_horizontal_move(&self, dx: f64, dy: f64) -> bool {
        dx.abs() > dy.abs() && dx.abs() > self.jitter_px
    }

    /// Physical mapping: dragging toward the right goes back, toward the left goes on.
    /// Writing direction plays no part here.
    pub fn classify(&self, dx: f64, dy: f64) -> Option<Step> {
        if dx.abs() <= self.min_distance_px || dx.abs() <= dy.abs() {
            return None;
        }
        Some(if dx > 0.0 { Step::Prev } else { Step::Next })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAction {
    /// Set once the drag is a horizontal swipe; the host should stop native scrolling.
    pub suppress_scroll: bool,
}

/// Touch tracker for one carousel.
#[derive(Debug, Clone, Default)]
pub struct GestureInput {
    config: SwipeConfig,
    origin: Option<Point>,
    last: Option<Point>,
    horizontal: bool,
}

impl GestureInput {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    pub fn start(&mut self, point: Point) {
        self.origin = Some(point);
        self.last = Some(point);
        self.horizontal = false;
    }

    pub fn update(&mut self, point: Point) -> MoveAction {
        let Some(origin) = self.origin else {
            return MoveAction::default();
        };
        self.last = Some(point);

        let (dx, dy) = point.delta_from(origin);
        if self.config.is_horizontal_move(dx, dy) {
            self.horizontal = true;
        }
        MoveAction {
            suppress_scroll: self.horizontal,
        }
    }

    /// Ends the drag. `point` falls back to the last move when the platform
    /// does not report a release position.
    pub fn end(&mut self, point: Option<Point>) -> Option<Step> {
        let origin = self.origin.take()?;
        let last = point.or(self.last.take()).unwrap_or(origin);
        self.last = None;
        self.horizontal = false;

        let (dx, dy) = last.delta_from(origin);
        let step = self.config.classify(dx, dy);
        log::debug!("Swipe dx={:.1} dy={:.1} -> {:?}", dx, dy, step);
        step
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.last = None;
        self.horizontal = false;
    }
}
