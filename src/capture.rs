//! # Rectangle Capture State Machine
//!
//! Turns pointer gestures on the preview canvas into committed placeholder
//! rectangles. The drawing session is an explicit tagged state —
//! `Idle` or `Drawing` — with total transition functions, so "drawing with
//! no field selected" and similar impossible states cannot be represented.
//!
//! The in-progress rectangle stays in display space for the whole drag;
//! mapping to source space happens exactly once, at commit. Repeated
//! scaling during the drag would be wasted work and risks rounding drift
//! across intermediate frames.

use crate::error::SelloError;
use crate::geometry::{DisplayContext, DisplayPoint, DisplayRect};
use crate::placeholder::{FieldKey, PlaceholderSet};

/// Minimum drag extent, per axis, in display pixels. Both axes must exceed
/// this for a commit; anything smaller is an accidental click, not a box.
pub const MIN_DRAG_PX: i32 = 10;

/// The drawing session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    Drawing {
        start: DisplayPoint,
        current: DisplayPoint,
        key: FieldKey,
    },
}

/// Outcome of a pointer-up (or pointer-leave) transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A rectangle was committed into the placeholder set for this key.
    Committed(FieldKey),
    /// The drag was below the minimum size; no model mutation.
    Discarded,
    /// The session was not drawing; nothing happened.
    Ignored,
}

/// Interactive capture session for one preview canvas.
///
/// Single-pointer by construction: exactly one rectangle can be in progress
/// at any time, and a second pointer-down while drawing is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSession {
    state: CaptureState,
    selected: Option<FieldKey>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            selected: None,
        }
    }

    /// Select the field the next drawn rectangle belongs to.
    pub fn select_field(&mut self, key: FieldKey) {
        self.selected = Some(key);
    }

    /// The currently selected field, if any.
    pub fn selected_field(&self) -> Option<FieldKey> {
        self.selected
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, CaptureState::Drawing { .. })
    }

    /// Pointer-down: start drawing if a field is selected, otherwise a
    /// no-op. A second pointer-down while already drawing is ignored.
    pub fn pointer_down(&mut self, p: DisplayPoint) {
        if let CaptureState::Idle = self.state
            && let Some(key) = self.selected
        {
            self.state = CaptureState::Drawing {
                start: p,
                current: p,
                key,
            };
        }
    }

    /// Pointer-move: update the in-progress rectangle. Moves while idle are
    /// ignored — this is the only state where a move has effect.
    pub fn pointer_move(&mut self, p: DisplayPoint) {
        if let CaptureState::Drawing { current, .. } = &mut self.state {
            *current = p;
        }
    }

    /// The rectangle to render on screen during the drag: always
    /// `normalize(start, current)`, still in display space.
    pub fn preview_rect(&self) -> Option<DisplayRect> {
        match self.state {
            CaptureState::Drawing { start, current, .. } => {
                Some(DisplayRect::from_corners(start, current).normalized())
            }
            CaptureState::Idle => None,
        }
    }

    /// Pointer-up: end the drag. If the normalized rectangle exceeds the
    /// minimum size on both axes, map it to source space and upsert it into
    /// the placeholder set under the drag's field key; otherwise discard.
    ///
    /// Either way the session returns to idle and the field selection is
    /// cleared — the operator must explicitly re-select a field before
    /// drawing again, which prevents silently overwriting the wrong field
    /// after a discard.
    pub fn pointer_up(
        &mut self,
        p: DisplayPoint,
        ctx: &DisplayContext,
        placeholders: &mut PlaceholderSet,
    ) -> Result<CaptureOutcome, SelloError> {
        let CaptureState::Drawing { start, key, .. } = self.state else {
            return Ok(CaptureOutcome::Ignored);
        };

        self.state = CaptureState::Idle;
        self.selected = None;

        let rect = DisplayRect::from_corners(start, p).normalized();
        if rect.width() <= MIN_DRAG_PX || rect.height() <= MIN_DRAG_PX {
            return Ok(CaptureOutcome::Discarded);
        }

        placeholders.commit_geometry(key, ctx.to_source_rect(rect))?;
        Ok(CaptureOutcome::Committed(key))
    }

    /// Pointer leaving the canvas ends the drag exactly like a pointer-up
    /// at the last known position.
    pub fn pointer_leave(
        &mut self,
        ctx: &DisplayContext,
        placeholders: &mut PlaceholderSet,
    ) -> Result<CaptureOutcome, SelloError> {
        match self.state {
            CaptureState::Drawing { current, .. } => self.pointer_up(current, ctx, placeholders),
            CaptureState::Idle => Ok(CaptureOutcome::Ignored),
        }
    }
}
