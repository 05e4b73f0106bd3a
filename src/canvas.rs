//! Canvas program implementation: event handling, motion, and drawing.
//!
//! The picker widget is rebuilt every `view()`; everything that must survive
//! across frames lives in [`PickerState`] inside iced's widget tree. Motion is
//! a small mode machine (idle, dragging, decelerating, snapping) and every
//! animation is an `Instant`-driven tween advanced from `update()` via
//! redraw requests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use iced::widget::canvas;
use iced::{Event, Point, Rectangle, Renderer, Theme, mouse};

use crate::mapper::OffsetMapper;
use crate::picker::TapePicker;
use crate::renderer::{build_tick_visuals, ease_out_cubic, lerp_color};
use crate::selection::{ScrollSurface, SelectionController, TickRenderer};
use crate::ticks::TickClass;

/// Snap-to-tick animation length.
const SNAP_MS: u64 = 250;
/// Fling deceleration length.
const DECELERATION_MS: u64 = 450;
/// Transit/settle flash length.
const FLASH_MS: u64 = 400;
/// Release speed (px/s) below which a drag settles without a fling.
const FLING_THRESHOLD: f32 = 120.0;
/// Seconds of projected travel for a fling at release speed.
const FLING_PROJECTION: f32 = 0.25;
/// A release after this long without pointer movement is not a fling.
const VELOCITY_STALE_MS: u64 = 100;

// ================================================================================
// Tweens & motion
// ================================================================================

/// A wall-clock offset animation with ease-out cubic easing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Tween {
    fn new(from: f32, to: f32, start: Instant, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start,
            duration: Duration::from_millis(duration_ms.max(1)),
        }
    }

    fn sample(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    fn done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Which motion mode the tape is currently in.
#[derive(Clone, Copy, Debug, Default)]
enum Motion {
    #[default]
    Idle,
    /// Pointer down; the tape tracks the cursor 1:1.
    Dragging { last_x: f32 },
    /// Fling after release; completion settles to the nearest tick.
    Decelerating(Tween),
    /// Animated snap to an exact tick offset.
    Snapping(Tween),
}

// ================================================================================
// Flash board
// ================================================================================

/// Active tick color flashes: each entry animates from the selected highlight
/// back to the tick's resting color. Re-flashing an index simply restarts its
/// clock; nothing is cancelled.
#[derive(Debug, Default)]
pub(crate) struct FlashBoard {
    flashes: HashMap<usize, Instant>,
}

impl FlashBoard {
    /// Progress of an active flash in `[0, 1)`, or `None` when the tick is at
    /// rest.
    pub(crate) fn progress(&self, index: usize, now: Instant) -> Option<f32> {
        let start = self.flashes.get(&index)?;
        let t = now.saturating_duration_since(*start).as_secs_f32()
            / Duration::from_millis(FLASH_MS).as_secs_f32();
        (t < 1.0).then_some(t)
    }

    /// Drop expired flashes. Returns true while any are still running.
    fn prune(&mut self, now: Instant) -> bool {
        let limit = Duration::from_millis(FLASH_MS);
        self.flashes
            .retain(|_, start| now.saturating_duration_since(*start) < limit);
        !self.flashes.is_empty()
    }
}

impl TickRenderer for FlashBoard {
    fn highlight(&mut self, index: usize) {
        // The selected tick holds the highlight color; a pending flash on it
        // would fade it back out.
        self.flashes.remove(&index);
    }

    fn flash_transit(&mut self, index: usize) {
        self.flashes.insert(index, Instant::now());
    }

    fn settle(&mut self, index: usize) {
        self.flashes.insert(index, Instant::now());
    }

    fn selection_feedback(&mut self) {
        // No haptic facility on this backend; hosts embedding the controller
        // elsewhere hook their own feedback here.
    }
}

// ================================================================================
// Scroll surface
// ================================================================================

/// The controller-facing view of the canvas scroll position: immediate writes
/// land directly, animated writes start a snap tween.
struct CanvasSurface<'a> {
    offset: &'a mut f32,
    motion: &'a mut Motion,
    now: Instant,
}

impl ScrollSurface for CanvasSurface<'_> {
    fn offset(&self) -> f32 {
        *self.offset
    }

    fn set_offset(&mut self, offset: f32, animated: bool) {
        if animated {
            *self.motion = Motion::Snapping(Tween::new(*self.offset, offset, self.now, SNAP_MS));
        } else {
            *self.offset = offset;
            *self.motion = Motion::Idle;
        }
    }
}

// ================================================================================
// Program state
// ================================================================================

/// Configuration snapshot used to detect declarative changes that require a
/// visual rebuild.
#[derive(Debug, PartialEq)]
struct Synced {
    values: Vec<f64>,
    geometry: crate::picker::Geometry,
    interval: u32,
}

/// Retained widget state (persists across frames via iced's widget tree).
#[derive(Default)]
pub struct PickerState {
    offset: f32,
    motion: Motion,
    velocity: f32,
    last_move: Option<(Instant, f32)>,
    controller: SelectionController,
    flashes: FlashBoard,
    visuals: Vec<crate::renderer::TickVisual>,
    synced: Option<Synced>,
    /// Last declarative selection honored, so a host re-passing the same
    /// `selected(i)` every view does not fight the user's scrolling.
    requested: Option<usize>,
}

impl PickerState {
    /// Logical selection; updates synchronously with the state machine,
    /// independent of any in-flight animation.
    pub fn selected_index(&self) -> Option<usize> {
        self.controller.selected_index()
    }
}

// ================================================================================
// Program implementation
// ================================================================================

impl<Message> TapePicker<'_, Message> {
    fn mapper(&self, bounds: Rectangle) -> OffsetMapper {
        OffsetMapper::new(self.geometry.tick_spacing, bounds.width * 0.5)
    }

    fn offset_range(&self, mapper: &OffsetMapper) -> (f32, f32) {
        let last = self.series.len() - 1;
        (mapper.offset_for_index(0), mapper.offset_for_index(last))
    }

    fn emit(&self, value: f64) -> canvas::Action<Message> {
        match &self.on_select {
            Some(on_select) => canvas::Action::publish((on_select)(value)),
            None => canvas::Action::request_redraw(),
        }
    }

    /// Reconcile declarative configuration with the retained state: rebuild
    /// visuals and re-snap on geometry/series/interval changes, run the first
    /// settle, and apply programmatic selection. Returns the value to publish
    /// when a settle happened.
    fn sync(&self, state: &mut PickerState, mapper: &OffsetMapper, now: Instant) -> Option<f64> {
        let mut settled = None;

        let dirty = match &state.synced {
            Some(synced) => {
                synced.values != self.series.values()
                    || synced.geometry != self.geometry
                    || synced.interval != self.significant_tick_interval
            }
            None => true,
        };

        if dirty {
            let first = state.synced.is_none();
            // Old visuals are fully torn down before the new set is attached.
            state.visuals =
                build_tick_visuals(&self.series, &self.geometry, self.significant_tick_interval);
            state.synced = Some(Synced {
                values: self.series.values().to_vec(),
                geometry: self.geometry,
                interval: self.significant_tick_interval,
            });
            log::debug!("rebuilt {} tick visuals", state.visuals.len());

            let clamped = state.controller.retarget(self.series.len());
            if first {
                state.requested = self.selected;
            }
            let PickerState {
                offset,
                motion,
                controller,
                flashes,
                ..
            } = state;
            let mut surface = CanvasSurface {
                offset,
                motion,
                now,
            };
            if first {
                let initial = self
                    .selected
                    .unwrap_or(0)
                    .min(self.series.len().saturating_sub(1));
                settled = controller.select(initial, false, mapper, &mut surface, flashes);
            } else if let Some(index) = clamped {
                // Re-snap the (possibly clamped) selection against the new tape.
                settled = controller.select(index, false, mapper, &mut surface, flashes);
            }
        }

        if self.selected != state.requested {
            state.requested = self.selected;
            if let Some(index) = self.selected {
                let PickerState {
                    offset,
                    motion,
                    controller,
                    flashes,
                    ..
                } = state;
                let mut surface = CanvasSurface {
                    offset,
                    motion,
                    now,
                };
                // Same state machine as scroll-driven selection; out-of-range
                // requests are rejected inside.
                settled = controller
                    .select(index, true, mapper, &mut surface, flashes)
                    .or(settled);
            }
        }

        settled.map(|index| self.series.value(index))
    }

    /// Selection as drawable against the supplied series. The retained index
    /// can be stale for one frame after the host swaps in a shorter series
    /// (sync has not run yet); a stale index is dropped rather than indexed.
    fn drawable_selection(&self, state: &PickerState) -> Option<usize> {
        state
            .controller
            .selected_index()
            .filter(|index| *index < self.series.len())
    }

    /// Settle the tape from its current offset with an animated snap.
    fn settle(&self, state: &mut PickerState, mapper: &OffsetMapper, now: Instant) -> Option<f64> {
        let PickerState {
            offset,
            motion,
            controller,
            flashes,
            ..
        } = state;
        let mut surface = CanvasSurface {
            offset,
            motion,
            now,
        };
        controller
            .drag_released(false, mapper, &mut surface, flashes)
            .map(|index| self.series.value(index))
    }

    /// Advance in-flight animations. Returns the action to take, if any.
    fn step(
        &self,
        state: &mut PickerState,
        mapper: &OffsetMapper,
        now: Instant,
    ) -> Option<canvas::Action<Message>> {
        let mut animating = state.flashes.prune(now);
        let mut published = None;

        match state.motion {
            Motion::Decelerating(tween) => {
                state.offset = tween.sample(now);
                state
                    .controller
                    .scroll_changed(state.offset, mapper, &mut state.flashes);
                if tween.done(now) {
                    let PickerState {
                        offset,
                        motion,
                        controller,
                        flashes,
                        ..
                    } = state;
                    let mut surface = CanvasSurface {
                        offset,
                        motion,
                        now,
                    };
                    published = controller
                        .deceleration_ended(mapper, &mut surface, flashes)
                        .map(|index| self.series.value(index));
                }
                animating = true;
            }
            Motion::Snapping(tween) => {
                state.offset = tween.sample(now);
                state
                    .controller
                    .scroll_changed(state.offset, mapper, &mut state.flashes);
                if tween.done(now) {
                    state.offset = tween.to;
                    state.motion = Motion::Idle;
                }
                animating = true;
            }
            Motion::Idle | Motion::Dragging { .. } => {}
        }

        match (published, animating) {
            (Some(value), _) => Some(self.emit(value)),
            (None, true) => Some(canvas::Action::request_redraw()),
            (None, false) => None,
        }
    }

    fn handle_event(
        &self,
        state: &mut PickerState,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
        mapper: &OffsetMapper,
        now: Instant,
    ) -> Option<canvas::Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let pos = cursor.position_in(bounds)?;
                // Grabbing the tape interrupts any fling or snap in flight.
                state.motion = Motion::Dragging { last_x: pos.x };
                state.velocity = 0.0;
                state.last_move = Some((now, pos.x));
                Some(canvas::Action::request_redraw().and_capture())
            }

            Event::Mouse(mouse::Event::CursorMoved { position }) => match state.motion {
                Motion::Dragging { last_x } => {
                    let x = position.x - bounds.x;
                    let dx = x - last_x;
                    state.motion = Motion::Dragging { last_x: x };

                    let (min, max) = self.offset_range(mapper);
                    state.offset = (state.offset - dx).clamp(min, max);
                    state
                        .controller
                        .scroll_changed(state.offset, mapper, &mut state.flashes);

                    if let Some((then, _)) = state.last_move {
                        let dt = now.saturating_duration_since(then).as_secs_f32().max(1e-4);
                        state.velocity = 0.8 * (dx / dt) + 0.2 * state.velocity;
                    }
                    state.last_move = Some((now, x));

                    Some(canvas::Action::request_redraw().and_capture())
                }
                _ => None,
            },

            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                match state.motion {
                    Motion::Dragging { .. } => {
                        let stale = state.last_move.is_none_or(|(then, _)| {
                            now.saturating_duration_since(then)
                                > Duration::from_millis(VELOCITY_STALE_MS)
                        });
                        let velocity = if stale { 0.0 } else { state.velocity };

                        if velocity.abs() > FLING_THRESHOLD {
                            let (min, max) = self.offset_range(mapper);
                            let target =
                                (state.offset - velocity * FLING_PROJECTION).clamp(min, max);
                            state.motion = Motion::Decelerating(Tween::new(
                                state.offset,
                                target,
                                now,
                                DECELERATION_MS,
                            ));
                            Some(canvas::Action::request_redraw().and_capture())
                        } else {
                            // Slow release: re-quantize and snap immediately.
                            state.motion = Motion::Idle;
                            let settled = self.settle(state, mapper, now);
                            match settled {
                                Some(value) => Some(self.emit(value).and_capture()),
                                None => Some(canvas::Action::request_redraw().and_capture()),
                            }
                        }
                    }
                    _ => None,
                }
            }

            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                cursor.position_in(bounds)?;

                let shift = match delta {
                    mouse::ScrollDelta::Lines { x, y } => (x + y) * self.geometry.tick_spacing,
                    mouse::ScrollDelta::Pixels { x, y } => x + y,
                };
                if shift.abs() < f32::EPSILON {
                    return None;
                }

                let (min, max) = self.offset_range(mapper);
                state.offset = (state.offset - shift).clamp(min, max);
                state
                    .controller
                    .scroll_changed(state.offset, mapper, &mut state.flashes);

                // A wheel tick has no drag lifecycle; settle right away.
                let settled = self.settle(state, mapper, now);
                match settled {
                    Some(value) => Some(self.emit(value).and_capture()),
                    None => Some(canvas::Action::request_redraw().and_capture()),
                }
            }

            _ => self.step(state, mapper, now),
        }
    }
}

impl<Message> canvas::Program<Message> for TapePicker<'_, Message> {
    type State = PickerState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let mapper = self.mapper(bounds);
        let now = Instant::now();

        let settled = self.sync(state, &mapper, now);
        let action = self.handle_event(state, event, bounds, cursor, &mapper, now);

        // A sync settle must still let the event reach the state machine (a
        // press on the same frame as a config change starts its drag); the
        // settle's publish then wins over the event's own redraw request.
        match settled {
            Some(value) => Some(self.emit(value)),
            None => action,
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), self.style.background);

        let now = Instant::now();
        let selected = self.drawable_selection(state);
        let resting = |class: TickClass| match class {
            TickClass::Major => self.style.significant_tick_color,
            _ => self.style.tick_color,
        };
        let color_for = |index: usize, class: TickClass| {
            if selected == Some(index) {
                self.style.selected_color
            } else if let Some(t) = state.flashes.progress(index, now) {
                lerp_color(self.style.selected_color, resting(class), ease_out_cubic(t))
            } else {
                resting(class)
            }
        };

        // The first frame can render before any update has synced state.
        let fallback;
        let visuals = if state.visuals.is_empty() {
            fallback =
                build_tick_visuals(&self.series, &self.geometry, self.significant_tick_interval);
            &fallback
        } else {
            &state.visuals
        };

        self.draw_ticks(&mut frame, bounds, visuals, state.offset, &color_for);
        self.draw_title(
            &mut frame,
            bounds,
            selected.map(|index| self.series.value(index)),
        );
        self.draw_indicator(&mut frame, bounds);

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match state.motion {
            Motion::Dragging { .. } => mouse::Interaction::Grabbing,
            _ if cursor.is_over(bounds) => mouse::Interaction::Grab,
            _ => mouse::Interaction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_its_target() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 100.0, start, 200);
        assert_eq!(tween.sample(start), 0.0);
        assert!(!tween.done(start));

        let end = start + Duration::from_millis(200);
        assert_eq!(tween.sample(end), 100.0);
        assert!(tween.done(end));
        assert_eq!(tween.sample(end + Duration::from_millis(50)), 100.0);
    }

    #[test]
    fn test_tween_eases_out() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 100.0, start, 200);
        // Ease-out covers more than half the distance by the halfway point.
        let halfway = tween.sample(start + Duration::from_millis(100));
        assert!(halfway > 50.0);
        assert!(halfway < 100.0);
    }

    #[test]
    fn test_flash_progress_and_pruning() {
        let mut board = FlashBoard::default();
        board.flash_transit(3);
        let start = board.flashes[&3];

        assert!(board.progress(3, start).is_some());
        assert!(board.progress(4, start).is_none());

        let later = start + Duration::from_millis(FLASH_MS + 10);
        assert!(board.progress(3, later).is_none());
        assert!(!board.prune(later));
        assert!(board.flashes.is_empty());
    }

    #[test]
    fn test_highlight_clears_a_pending_flash() {
        let mut board = FlashBoard::default();
        board.flash_transit(7);
        board.highlight(7);
        assert!(board.progress(7, Instant::now()).is_none());
    }

    #[test]
    fn test_stale_selection_is_not_drawn_against_a_shorter_series() {
        let mapper = OffsetMapper::new(20.0, 50.0);
        let mut state = PickerState::default();
        let long: TapePicker<'_, ()> = TapePicker::new(Vec::new()).selected(50);
        long.sync(&mut state, &mapper, Instant::now());
        assert_eq!(state.controller.selected_index(), Some(50));

        // The host swapped in a shorter series; until the next sync clamps
        // the retained selection, no frame may index the new series with it.
        let short: TapePicker<'_, ()> = TapePicker::new((0..10).map(f64::from).collect());
        assert_eq!(short.drawable_selection(&state), None);
        assert_eq!(long.drawable_selection(&state), Some(50));
    }

    #[test]
    fn test_sync_rebuilds_and_clamps_when_the_series_shrinks() {
        let mapper = OffsetMapper::new(20.0, 50.0);
        let now = Instant::now();
        let mut state = PickerState::default();

        let long: TapePicker<'_, ()> = TapePicker::new(Vec::new()).selected(50);
        assert_eq!(long.sync(&mut state, &mapper, now), Some(50.0));
        assert_eq!(state.visuals.len(), 101);

        let short: TapePicker<'_, ()> =
            TapePicker::new((0..10).map(|v| f64::from(v) * 2.0).collect()).selected(50);
        let settled = short.sync(&mut state, &mapper, now);
        assert_eq!(settled, Some(18.0));
        assert_eq!(state.visuals.len(), 10);
        assert_eq!(state.controller.selected_index(), Some(9));
        assert_eq!(state.offset, mapper.offset_for_index(9));
    }

    #[test]
    fn test_press_during_a_config_settle_still_starts_the_drag() {
        let picker: TapePicker<'_, ()> = TapePicker::new(Vec::new()).on_select(|_| ());
        let mut state = PickerState::default();
        let bounds = Rectangle::new(Point::ORIGIN, iced::Size::new(400.0, 108.0));
        let cursor = mouse::Cursor::Available(Point::new(200.0, 60.0));
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));

        // The first update both settles the initial selection and carries a
        // press; the settle publishes, the press must still grab the tape.
        let action = canvas::Program::update(&picker, &mut state, &event, bounds, cursor);
        assert!(action.is_some());
        assert_eq!(state.controller.selected_index(), Some(0));
        assert!(matches!(state.motion, Motion::Dragging { .. }));
    }
}
