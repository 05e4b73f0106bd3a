//! The selection state machine.
//!
//! [`SelectionController`] owns the logical selected index and drives the two
//! presentation collaborators: a [`ScrollSurface`] it snaps to exact tick
//! offsets, and a [`TickRenderer`] it recolors. It never touches a frame or a
//! clock itself, which keeps every transition testable with recording mocks.

use crate::mapper::OffsetMapper;

/// A generic scrollable viewport: reports its current offset and accepts
/// programmatic offset changes, animated or immediate.
pub trait ScrollSurface {
    fn offset(&self) -> f32;
    fn set_offset(&mut self, offset: f32, animated: bool);
}

/// Per-index visual operations the controller triggers during a transition.
pub trait TickRenderer {
    /// Recolor a tick to the selected highlight.
    fn highlight(&mut self, index: usize);
    /// Briefly flash a passed-over tick with the transit highlight before it
    /// animates back to its resting color.
    fn flash_transit(&mut self, index: usize);
    /// Animate a previously-selected tick back to its resting color.
    fn settle(&mut self, index: usize);
    /// Selection-changed feedback (haptics on platforms that have them).
    /// Fired exactly once per distinct-index transition.
    fn selection_feedback(&mut self);
}

/// Owns `selected` and the transition logic between selections.
///
/// Born unselected; a concrete index arrives with the first settle and the
/// controller stays live for the widget's lifetime.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    tick_count: usize,
    selected: Option<usize>,
}

impl SelectionController {
    pub fn new(tick_count: usize) -> Self {
        Self {
            tick_count,
            selected: None,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    /// Select a tick and snap the surface to its exact offset.
    ///
    /// Out-of-range indices are rejected with no state change. An accepted
    /// call returns the index so the owner can emit its selection callback;
    /// redundant re-selection of the current index is still accepted (and
    /// still snaps), it just skips the visual transition and feedback.
    pub fn select<S, R>(
        &mut self,
        index: usize,
        animated: bool,
        mapper: &OffsetMapper,
        surface: &mut S,
        renderer: &mut R,
    ) -> Option<usize>
    where
        S: ScrollSurface,
        R: TickRenderer,
    {
        if index >= self.tick_count {
            return None;
        }
        self.apply_transition(index, renderer);
        surface.set_offset(mapper.offset_for_index(index), animated);
        log::debug!("selection settled at index {index}");
        Some(index)
    }

    /// Live update while the tape is moving (drag, fling, or snap).
    ///
    /// Re-derives the index from the reported offset and, when it differs from
    /// the current selection, runs the guarded visual transition. Returns the
    /// new index on change. This path never counts as settled; the owner's
    /// selection callback waits for [`SelectionController::select`].
    pub fn scroll_changed<R>(
        &mut self,
        offset: f32,
        mapper: &OffsetMapper,
        renderer: &mut R,
    ) -> Option<usize>
    where
        R: TickRenderer,
    {
        let index = mapper.index_for_offset(offset, self.tick_count);
        if self.selected == Some(index) {
            return None;
        }
        self.apply_transition(index, renderer);
        Some(index)
    }

    /// Drag ended. Without deceleration the final position is re-quantized and
    /// snapped immediately; with deceleration the settle waits for
    /// [`SelectionController::deceleration_ended`].
    pub fn drag_released<S, R>(
        &mut self,
        will_decelerate: bool,
        mapper: &OffsetMapper,
        surface: &mut S,
        renderer: &mut R,
    ) -> Option<usize>
    where
        S: ScrollSurface,
        R: TickRenderer,
    {
        if will_decelerate {
            return None;
        }
        let index = mapper.index_for_offset(surface.offset(), self.tick_count);
        self.select(index, true, mapper, surface, renderer)
    }

    /// Deceleration finished: the continuous position is never trusted as
    /// final, so re-quantize and snap to the exact tick offset.
    pub fn deceleration_ended<S, R>(
        &mut self,
        mapper: &OffsetMapper,
        surface: &mut S,
        renderer: &mut R,
    ) -> Option<usize>
    where
        S: ScrollSurface,
        R: TickRenderer,
    {
        let index = mapper.index_for_offset(surface.offset(), self.tick_count);
        self.select(index, true, mapper, surface, renderer)
    }

    /// The series was replaced. Clamps an existing selection into the new
    /// range and returns the index the owner must re-snap to; a selection is
    /// never left dangling out of range.
    pub fn retarget(&mut self, tick_count: usize) -> Option<usize> {
        self.tick_count = tick_count;
        let clamped = self.selected?.min(tick_count.saturating_sub(1));
        self.selected = Some(clamped);
        Some(clamped)
    }

    /// Guarded visual transition: only fires when the new index differs from
    /// the stored selection, which keeps sub-tick jitter from re-firing
    /// feedback or rescheduling animations.
    ///
    /// Every index strictly between the old and new selection flashes the
    /// transit highlight, in both directions, so a fast scroll lights up the
    /// ticks it passes over instead of jumping between endpoints.
    fn apply_transition<R>(&mut self, index: usize, renderer: &mut R)
    where
        R: TickRenderer,
    {
        if self.selected == Some(index) {
            return;
        }
        renderer.selection_feedback();
        if let Some(old) = self.selected {
            let (lo, hi) = if old < index {
                (old + 1, index - 1)
            } else {
                (index + 1, old - 1)
            };
            for passed in lo..=hi {
                renderer.flash_transit(passed);
            }
            renderer.settle(old);
        }
        renderer.highlight(index);
        self.selected = Some(index);
    }
}
