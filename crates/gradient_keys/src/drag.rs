use bevy::prelude::*;

use crate::keys::KeyKind;

/// Horizontal travel (px) before a pressed pin starts following the pointer.
/// Filters the bogus first coordinates some platforms report on drag start.
pub const DRAG_START_THRESHOLD: f32 = 2.0;
/// Vertical distance (px) past the bar edge at which a dragged pin shows as
/// about to be deleted.
pub const DELETE_HINT_THRESHOLD: f32 = 20.0;
/// Vertical distance (px) past the bar edge at which releasing a pin deletes it.
pub const DELETE_RELEASE_THRESHOLD: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DragThresholds {
    pub drag_start: f32,
    pub delete_hint: f32,
    pub delete_release: f32,
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self {
            drag_start: DRAG_START_THRESHOLD,
            delete_hint: DELETE_HINT_THRESHOLD,
            delete_release: DELETE_RELEASE_THRESHOLD,
        }
    }
}

/// The bar's bounding rectangle in logical pixels, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct BarRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BarRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x * 0.5,
            center.y - size.y * 0.5,
            size.x,
            size.y,
        )
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Pointer x as a fraction of the bar width, clamped to `[0, 1]`.
    pub fn position_at(&self, pointer: Vec2) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        (f64::from(pointer.x - self.left) / f64::from(self.width)).clamp(0.0, 1.0)
    }

    /// Pointer y as a fraction of the bar height (unclamped).
    pub fn vertical_fraction(&self, pointer: Vec2) -> f32 {
        if self.height <= 0.0 {
            return 0.0;
        }
        (pointer.y - self.top) / self.height
    }

    /// Whether `pointer` is more than `threshold` px past the edge a pin of
    /// `row` is deleted through: above the top for alpha pins, below the
    /// bottom for color pins.
    pub fn is_past_delete_edge(&self, row: KeyKind, pointer: Vec2, threshold: f32) -> bool {
        match row {
            KeyKind::Alpha => self.top - pointer.y > threshold,
            KeyKind::Color => pointer.y - self.bottom() > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Commit the pin at this position.
    Change(f64),
    /// The pin was dropped far enough from its row to remove the key.
    Delete,
}

/// Per-pin drag state machine: turns pointer coordinates into a clamped
/// position and a delete intent.
#[derive(Debug, Clone, Reflect)]
pub struct PinDrag {
    row: KeyKind,
    phase: DragPhase,
    origin: Vec2,
    position: f64,
    about_to_delete: bool,
    thresholds: DragThresholds,
}

impl PinDrag {
    pub fn new(row: KeyKind, position: f64) -> Self {
        Self {
            row,
            phase: DragPhase::Idle,
            origin: Vec2::ZERO,
            position,
            about_to_delete: false,
            thresholds: DragThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: DragThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn row(&self) -> KeyKind {
        self.row
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_about_to_delete(&self) -> bool {
        self.about_to_delete
    }

    pub fn press(&mut self, pointer: Vec2) {
        self.origin = pointer;
    }

    /// Feeds a pointer move. Returns the new position while dragging.
    pub fn drag(&mut self, pointer: Vec2, bar: BarRect) -> Option<f64> {
        if self.phase == DragPhase::Idle {
            if (pointer.x - self.origin.x).abs() < self.thresholds.drag_start {
                return None;
            }
            self.phase = DragPhase::Dragging;
        }

        self.about_to_delete =
            bar.is_past_delete_edge(self.row, pointer, self.thresholds.delete_hint);
        self.position = bar.position_at(pointer);
        Some(self.position)
    }

    /// Ends the gesture. Releases that never started dragging return `None`.
    pub fn release(&mut self, pointer: Vec2, bar: BarRect) -> Option<Release> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        self.phase = DragPhase::Idle;
        self.about_to_delete = false;

        if bar.is_past_delete_edge(self.row, pointer, self.thresholds.delete_release) {
            Some(Release::Delete)
        } else {
            Some(Release::Change(self.position))
        }
    }
}
