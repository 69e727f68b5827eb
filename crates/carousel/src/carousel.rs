use crate::direction::{Arrow, DirectionResolver, TextDirection};
use crate::gesture::{GestureInput, MoveAction, Point, SwipeConfig};
use crate::item::{DisplayItem, ItemKey};
use crate::pause::{PauseEdge, PauseReason, PauseState};
use crate::rotation::{RotationState, Step};
use crate::transition::TransitionGate;
use std::collections::VecDeque;

pub const DEFAULT_VISIBLE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselOptions {
    pub visible_count: usize,
    pub direction: TextDirection,
    pub swipe: SwipeConfig,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            visible_count: DEFAULT_VISIBLE_COUNT,
            direction: TextDirection::default(),
            swipe: SwipeConfig::default(),
        }
    }
}

/// What the host has to do after feeding the carousel an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarouselAction {
    pub should_redraw: bool,
    /// A rotation was applied and its transition is now in flight.
    pub started: Option<Step>,
    /// The auto-advance timer must be stopped or restarted.
    pub pause: Option<PauseEdge>,
}

impl CarouselAction {
    fn started(step: Option<Step>) -> Self {
        Self {
            should_redraw: step.is_some(),
            started: step,
            pause: None,
        }
    }

    fn paused(edge: Option<PauseEdge>) -> Self {
        Self {
            should_redraw: edge.is_some(),
            started: None,
            pause: edge,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            should_redraw: self.should_redraw || other.should_redraw,
            started: self.started.or(other.started),
            pause: other.pause.or(self.pause),
        }
    }
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView<'a, T> {
    pub window: Vec<&'a T>,
    pub active_index: usize,
    pub len: usize,
    pub paused: bool,
    pub in_flight: Option<Step>,
    pub direction: TextDirection,
}

impl<T> CarouselView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One entry per item, `true` for the active dot.
    pub fn dots(&self) -> Vec<bool> {
        (0..self.len).map(|i| i == self.active_index).collect()
    }
}

/// One carousel instance: rotation, pause, gesture and transition state.
///
/// Every rotation goes through a single-flight gate. Requests made while a
/// transition is in flight are dropped, except the remaining steps of a
/// jump, which run one per completed transition.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    rotation: RotationState<T>,
    direction: DirectionResolver,
    gesture: GestureInput,
    pause: PauseState,
    gate: TransitionGate,
    queued: VecDeque<Step>,
    advance_due: bool,
}

impl<T: DisplayItem> Carousel<T> {
    pub fn new(items: Vec<T>, options: CarouselOptions) -> Self {
        Self {
            rotation: RotationState::new(items, options.visible_count),
            direction: DirectionResolver::new(options.direction),
            gesture: GestureInput::new(options.swipe),
            pause: PauseState::default(),
            gate: TransitionGate::default(),
            queued: VecDeque::new(),
            advance_due: false,
        }
    }

    /// Swaps the item list and starts over from the first item.
    pub fn replace_items(&mut self, items: Vec<T>) -> CarouselAction {
        self.rotation.replace(items);
        self.gate.complete();
        self.queued.clear();
        self.advance_due = false;
        self.gesture.cancel();
        CarouselAction {
            should_redraw: true,
            ..CarouselAction::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rotation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotation.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.rotation.logical_index()
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    pub fn direction(&self) -> TextDirection {
        self.direction.direction()
    }

    pub fn in_flight(&self) -> Option<Step> {
        self.gate.in_flight()
    }

    pub fn window_keys(&self) -> Vec<ItemKey> {
        self.rotation.window().map(|item| item.key()).collect()
    }

    pub fn view(&self) -> CarouselView<'_, T> {
        CarouselView {
            window: self.rotation.window().collect(),
            active_index: self.rotation.logical_index(),
            len: self.rotation.len(),
            paused: self.pause.is_paused(),
            in_flight: self.gate.in_flight(),
            direction: self.direction.direction(),
        }
    }

    pub fn next(&mut self) -> CarouselAction {
        CarouselAction::started(self.request(Step::Next))
    }

    pub fn prev(&mut self) -> CarouselAction {
        CarouselAction::started(self.request(Step::Prev))
    }

    pub fn arrow(&mut self, arrow: Arrow) -> CarouselAction {
        let step = self.direction.step_for(arrow);
        CarouselAction::started(self.request(step))
    }

    /// Walks to `target` through single-step rotations, one transition at a time.
    /// A new jump replaces the unfinished remainder of an earlier one.
    pub fn jump_to(&mut self, target: usize) -> CarouselAction {
        let Some((step, count)) = self.rotation.path_to(target) else {
            return CarouselAction::default();
        };

        self.queued.clear();
        self.queued.extend(std::iter::repeat_n(step, count));
        log::debug!(
            "Jump {} -> {} via {} x {}",
            self.rotation.logical_index(),
            target,
            count,
            step
        );

        if self.gate.is_busy() {
            return CarouselAction::default();
        }
        CarouselAction::started(self.start_queued())
    }

    /// Transition completion signal. Starts the next queued jump step, if any.
    pub fn complete_transition(&mut self) -> CarouselAction {
        if self.gate.complete().is_none() {
            return CarouselAction::default();
        }
        let started = self.start_queued();
        CarouselAction {
            should_redraw: true,
            ..CarouselAction::started(started)
        }
    }

    /// Auto-advance fire. Only marks the advance as due; it is applied by the
    /// next [`Carousel::on_frame`].
    pub fn tick(&mut self) {
        if self.pause.is_paused() {
            log::debug!("Ignoring auto-advance while paused");
            return;
        }
        self.advance_due = true;
    }

    pub fn on_frame(&mut self) -> CarouselAction {
        if !std::mem::take(&mut self.advance_due) || self.pause.is_paused() {
            return CarouselAction::default();
        }
        CarouselAction::started(self.request(Step::Next))
    }

    pub fn hover(&mut self, inside: bool) -> CarouselAction {
        CarouselAction::paused(self.pause.set(PauseReason::Hover, inside))
    }

    pub fn focus(&mut self, focused: bool) -> CarouselAction {
        CarouselAction::paused(self.pause.set(PauseReason::Focus, focused))
    }

    pub fn touch_start(&mut self, point: Point) -> CarouselAction {
        self.gesture.start(point);
        CarouselAction::paused(self.pause.hold(PauseReason::Touch))
    }

    pub fn touch_move(&mut self, point: Point) -> MoveAction {
        self.gesture.update(point)
    }

    pub fn touch_end(&mut self, point: Option<Point>) -> CarouselAction {
        let released = CarouselAction::paused(self.pause.release(PauseReason::Touch));
        let swiped = match self.gesture.end(point) {
            Some(step) => CarouselAction::started(self.request(step)),
            None => CarouselAction::default(),
        };
        released.merge(swiped)
    }

    pub fn touch_cancel(&mut self) -> CarouselAction {
        self.gesture.cancel();
        CarouselAction::paused(self.pause.release(PauseReason::Touch))
    }

    fn request(&mut self, step: Step) -> Option<Step> {
        if self.rotation.is_empty() {
            return None;
        }
        if !self.gate.begin(step) {
            log::debug!("Dropping {} while {:?} is in flight", step, self.gate.in_flight());
            return None;
        }
        self.rotation.rotate(step);
        Some(step)
    }

    fn start_queued(&mut self) -> Option<Step> {
        let step = self.queued.pop_front()?;
        self.request(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(keys: &str, visible: usize) -> Carousel<ItemKey> {
        Carousel::new(
            keys.chars().map(|c| ItemKey::new(c.to_string())).collect(),
            CarouselOptions {
                visible_count: visible,
                ..CarouselOptions::default()
            },
        )
    }

    fn window(carousel: &Carousel<ItemKey>) -> String {
        carousel.window_keys().iter().map(|k| k.as_str()).collect()
    }

    /// Completes transitions until the jump queue is drained.
    fn settle(carousel: &mut Carousel<ItemKey>) -> usize {
        let mut steps = usize::from(carousel.in_flight().is_some());
        while carousel.complete_transition().started.is_some() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_next_prev_scenario() {
        let mut c = carousel("ABC", 3);

        assert_eq!(c.next().started, Some(Step::Next));
        assert_eq!(window(&c), "BCA");
        assert_eq!(c.active_index(), 1);
        c.complete_transition();

        c.next();
        assert_eq!(window(&c), "CAB");
        assert_eq!(c.active_index(), 2);
        c.complete_transition();

        c.prev();
        assert_eq!(window(&c), "BCA");
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_requests_dropped_while_in_flight() {
        let mut c = carousel("ABCD", 2);
        assert!(c.next().should_redraw);
        let blocked = c.next();
        assert_eq!(blocked.started, None);
        assert!(!blocked.should_redraw);
        assert_eq!(c.prev().started, None);
        assert_eq!(window(&c), "BC");

        c.complete_transition();
        assert_eq!(c.next().started, Some(Step::Next));
        assert_eq!(window(&c), "CD");
    }

    #[test]
    fn test_jump_runs_one_step_per_transition() {
        let mut c = carousel("ABCDEFG", 3);
        let first = c.jump_to(3);
        assert_eq!(first.started, Some(Step::Next));
        assert_eq!(c.active_index(), 1);

        assert_eq!(c.complete_transition().started, Some(Step::Next));
        assert_eq!(c.active_index(), 2);
        assert_eq!(c.complete_transition().started, Some(Step::Next));
        assert_eq!(c.active_index(), 3);
        assert_eq!(c.complete_transition().started, None);
        assert_eq!(window(&c), "DEF");
    }

    #[test]
    fn test_jump_takes_shorter_way_round() {
        let mut c = carousel("ABCDEFG", 3);
        c.jump_to(5);
        assert_eq!(c.in_flight(), Some(Step::Prev));
        assert_eq!(settle(&mut c), 2);
        assert_eq!(c.active_index(), 5);
        assert_eq!(window(&c), "FGA");
    }

    #[test]
    fn test_jump_lands_on_every_target() {
        for len in 1..=6usize {
            let keys: String = "ABCDEF".chars().take(len).collect();
            for from in 0..len {
                for target in 0..len * 2 {
                    let mut c = carousel(&keys, len);
                    c.jump_to(from);
                    settle(&mut c);

                    let forward = (target % len + len - from) % len;
                    let expected = forward.min(len - forward);

                    c.jump_to(target);
                    assert_eq!(settle(&mut c), expected);
                    assert_eq!(c.active_index(), target % len);
                }
            }
        }
    }

    #[test]
    fn test_jump_while_busy_waits_for_completion() {
        let mut c = carousel("ABCDE", 2);
        c.next();
        assert_eq!(c.jump_to(3).started, None);
        assert_eq!(c.active_index(), 1);
        assert_eq!(settle(&mut c), 2 + 1);
        assert_eq!(c.active_index(), 3);
    }

    #[test]
    fn test_jump_to_current_is_a_no_op() {
        let mut c = carousel("ABC", 3);
        assert_eq!(c.jump_to(3), CarouselAction::default());
        assert_eq!(c.in_flight(), None);
    }

    #[test]
    fn test_empty_carousel() {
        let mut c = carousel("", 3);
        for _ in 0..3 {
            assert_eq!(c.next(), CarouselAction::default());
            assert_eq!(c.prev(), CarouselAction::default());
            assert_eq!(c.jump_to(2), CarouselAction::default());
            c.tick();
            assert_eq!(c.on_frame(), CarouselAction::default());
        }
        let view = c.view();
        assert!(view.is_empty());
        assert!(view.window.is_empty());
        assert!(view.dots().is_empty());
    }

    #[test]
    fn test_tick_is_deferred_to_frame() {
        let mut c = carousel("ABC", 1);
        c.tick();
        assert_eq!(window(&c), "A");
        assert_eq!(c.on_frame().started, Some(Step::Next));
        assert_eq!(window(&c), "B");
        c.complete_transition();
        assert_eq!(c.on_frame().started, None);
    }

    #[test]
    fn test_tick_ignored_while_paused() {
        let mut c = carousel("ABC", 1);
        assert_eq!(c.hover(true).pause, Some(PauseEdge::Paused));
        c.tick();
        assert_eq!(c.on_frame().started, None);

        c.tick();
        c.hover(false);
        c.tick();
        c.focus(true);
        // paused again before the frame
        assert_eq!(c.on_frame().started, None);
        assert_eq!(window(&c), "A");
    }

    #[test]
    fn test_hover_and_focus_pause_independently() {
        let mut c = carousel("ABC", 1);
        assert_eq!(c.focus(true).pause, Some(PauseEdge::Paused));
        assert_eq!(c.hover(true).pause, None);
        assert_eq!(c.hover(false).pause, None);
        assert!(c.is_paused());
        assert_eq!(c.focus(false).pause, Some(PauseEdge::Resumed));
        assert!(!c.view().paused);
    }

    #[test]
    fn test_arrows_follow_direction() {
        let mut rtl = Carousel::new(
            vec![ItemKey::from("A"), ItemKey::from("B"), ItemKey::from("C")],
            CarouselOptions {
                direction: TextDirection::Rtl,
                ..CarouselOptions::default()
            },
        );
        assert_eq!(rtl.arrow(Arrow::Left).started, Some(Step::Next));
        rtl.complete_transition();
        assert_eq!(rtl.arrow(Arrow::Right).started, Some(Step::Prev));

        let mut ltr = Carousel::new(
            vec![ItemKey::from("A"), ItemKey::from("B")],
            CarouselOptions {
                direction: TextDirection::Ltr,
                ..CarouselOptions::default()
            },
        );
        assert_eq!(ltr.arrow(Arrow::Left).started, Some(Step::Prev));
    }

    #[test]
    fn test_swipe_rotates_and_pauses_during_touch() {
        let mut c = carousel("ABC", 1);
        assert_eq!(
            c.touch_start(Point::new(100.0, 100.0)).pause,
            Some(PauseEdge::Paused)
        );
        assert!(c.touch_move(Point::new(70.0, 102.0)).suppress_scroll);
        let action = c.touch_end(Some(Point::new(40.0, 105.0)));
        assert_eq!(action.started, Some(Step::Next));
        assert_eq!(action.pause, Some(PauseEdge::Resumed));
        assert_eq!(window(&c), "B");
    }

    #[test]
    fn test_touch_reports_pause_and_resume_separately() {
        let mut c = carousel("ABC", 1);
        let origin = Point::default();
        let release = Point::new(-60.0, 5.0);

        assert_eq!(c.touch_start(origin).pause, Some(PauseEdge::Paused));
        c.touch_move(release);
        let end = c.touch_end(Some(release));
        assert_eq!(end.pause, Some(PauseEdge::Resumed));
        assert_eq!(end.started, Some(Step::Next));
        c.complete_transition();

        let tap = Point::new(20.0, 5.0);
        assert_eq!(c.touch_start(origin).pause, Some(PauseEdge::Paused));
        let end = c.touch_end(Some(tap));
        assert_eq!(end.started, None);
        assert!(!c.is_paused());
        assert_eq!(window(&c), "B");
    }

    #[test]
    fn test_touch_cancel_resumes() {
        let mut c = carousel("ABC", 1);
        c.touch_start(Point::default());
        assert_eq!(c.touch_cancel().pause, Some(PauseEdge::Resumed));
        assert_eq!(c.touch_end(Some(Point::new(-100.0, 0.0))).started, None);
    }

    #[test]
    fn test_replace_items_resets() {
        let mut c = carousel("ABC", 2);
        c.jump_to(2);
        c.tick();
        c.replace_items(vec![ItemKey::from("X"), ItemKey::from("Y"), ItemKey::from("Z")]);
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.in_flight(), None);
        assert_eq!(c.complete_transition().started, None);
        assert_eq!(c.on_frame().started, None);
        assert_eq!(window(&c), "XY");
    }

    #[test]
    fn test_view_dots() {
        let mut c = carousel("ABCD", 2);
        c.next();
        let view = c.view();
        assert_eq!(view.dots(), vec![false, true, false, false]);
        assert_eq!(view.in_flight, Some(Step::Next));
        assert_eq!(view.window.len(), 2);
    }
}
