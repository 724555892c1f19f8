use crate::core::error::PickerError;

use super::column::PickerColumn;

/// Number of cooperative ticks a settle animation takes. Purely visual;
/// correctness only needs the animation to end on the exact target.
pub const SETTLE_TICKS: u32 = 4;

const OVERLAP_TIE_EPSILON: f32 = 1e-3;

/// Everything a live drag needs to know, captured at gesture start instead
/// of being threaded through ambient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    pub origin_offset: f32,
    pub anchor_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleAnimation {
    from: f32,
    target: f32,
    target_index: usize,
    ticks_done: u32,
}

impl SettleAnimation {
    fn offset(&self) -> f32 {
        let t = self.ticks_done as f32 / SETTLE_TICKS as f32;
        self.from + (self.target - self.from) * t
    }

    fn finished(&self) -> bool {
        self.ticks_done >= SETTLE_TICKS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging(DragContext),
    Settling(SettleAnimation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    RejectedHorizontal,
}

/// Per-column drag state machine: `idle → dragging → settling → idle`.
///
/// The engine owns no column data; the column is handed into every
/// transition explicitly.
#[derive(Debug, Clone, Copy)]
pub struct GestureEngine {
    phase: GesturePhase,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEngine {
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle)
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, GesturePhase::Settling(_))
    }

    /// Begins a drag unless the gesture heads off sideways; horizontal
    /// swipes stay with the page. Starting over a settling column cancels
    /// the animation and picks the drag up from the animation's current
    /// offset, so there is no teleport.
    pub fn start(&mut self, column: &PickerColumn, dist_x: f32, dist_y: f32) -> StartOutcome {
        if horizontal_dominates(dist_x, dist_y) {
            return StartOutcome::RejectedHorizontal;
        }
        self.phase = GesturePhase::Dragging(DragContext {
            origin_offset: column.offset(),
            anchor_index: column.selected_index().unwrap_or(0),
        });
        StartOutcome::Started
    }

    /// Live update: origin offset plus the cumulative vertical distance,
    /// clamped so the indicator never slides off the item strip.
    pub fn drag(&mut self, column: &mut PickerColumn, dist_y: f32) -> bool {
        let GesturePhase::Dragging(ctx) = self.phase else {
            return false;
        };
        let offset = (ctx.origin_offset + dist_y).clamp(column.min_offset(), 0.0);
        if offset == column.offset() {
            return false;
        }
        column.set_offset(offset);
        true
    }

    /// Ends the drag: picks the nearest item and starts the settle
    /// animation toward its resting offset.
    pub fn release(&mut self, column: &PickerColumn) -> Result<bool, PickerError> {
        let GesturePhase::Dragging(ctx) = self.phase else {
            return Ok(false);
        };
        let (target_index, target) = nearest_item(column, ctx.anchor_index)?;
        self.phase = GesturePhase::Settling(SettleAnimation {
            from: column.offset(),
            target,
            target_index,
            ticks_done: 0,
        });
        Ok(true)
    }

    /// Advances a settle animation by one tick. Returns the snapped index
    /// once the animation lands, with the column resting exactly on it.
    pub fn tick(&mut self, column: &mut PickerColumn) -> Option<usize> {
        let GesturePhase::Settling(mut anim) = self.phase else {
            return None;
        };
        anim.ticks_done += 1;
        column.set_offset(anim.offset());
        if anim.finished() {
            self.phase = GesturePhase::Idle;
            Some(anim.target_index)
        } else {
            self.phase = GesturePhase::Settling(anim);
            None
        }
    }
}

/// Two-sided dominance test: reject when the horizontal distance
/// strictly exceeds the vertical one in either direction.
fn horizontal_dominates(dist_x: f32, dist_y: f32) -> bool {
    (dist_x > dist_y && dist_x > -dist_y) || (dist_x < dist_y && dist_x < -dist_y)
}

/// Among items overlapping the indicator span, the one covering most of
/// it; ties go to whichever is closer to the pre-drag selection. Offsets
/// are clamped during dragging, so an empty result means a broken window
/// invariant.
fn nearest_item(column: &PickerColumn, anchor_index: usize) -> Result<(usize, f32), PickerError> {
    let height = column.item_height() as f32;
    let offset = column.offset();
    let mut best: Option<(usize, f32)> = None;

    for index in 0..column.len() {
        let top = offset + index as f32 * height;
        let overlap = (top + height).min(height) - top.max(0.0);
        if overlap <= 0.0 {
            continue;
        }
        best = match best {
            None => Some((index, overlap)),
            Some((best_index, best_overlap)) => {
                if overlap > best_overlap + OVERLAP_TIE_EPSILON {
                    Some((index, overlap))
                } else if (overlap - best_overlap).abs() <= OVERLAP_TIE_EPSILON
                    && index.abs_diff(anchor_index) < best_index.abs_diff(anchor_index)
                {
                    Some((index, overlap))
                } else {
                    Some((best_index, best_overlap))
                }
            }
        };
    }

    best.map(|(index, _)| (index, column.resting_offset(index)))
        .ok_or_else(|| PickerError::Inconsistency {
            detail: format!(
                "no item overlaps the indicator (offset {offset}, {} items)",
                column.len()
            ),
        })
}
