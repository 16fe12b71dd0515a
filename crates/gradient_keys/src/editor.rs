use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;

use crate::color::{ColorParseError, Rgb, Rgba};
use crate::composite::{SamplePoint, composite, linear_gradient_css};
use crate::drag::{BarRect, DragThresholds, PinDrag, Release};
use crate::keys::{Gradient, GradientMode, Key, KeyKind};
use crate::selection::{EditPanel, Selection};
use crate::store::{KeyId, KeyStore, KeyUpdate};

/// Host callback receiving the full gradient on every commit.
pub type ChangeCallback = Box<dyn FnMut(&Gradient) + Send + Sync>;

/// What the host should do after an editor operation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notification {
    /// Nothing changed.
    #[default]
    None,
    /// Keys changed locally; re-render without notifying observers.
    Update,
    /// Keys changed and observers were (or should be) notified.
    Commit,
}

impl Notification {
    pub fn is_commit(&self) -> bool {
        *self == Self::Commit
    }

    pub fn is_none(&self) -> bool {
        *self == Self::None
    }
}

/// Render data for a single pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinView {
    pub id: KeyId,
    pub kind: KeyKind,
    /// Position along the bar in `[0, 1]` for pins placed by the editor.
    pub position: f64,
    pub about_to_delete: bool,
    pub selected: bool,
    /// Fill color: the key's color, or white at the key's alpha.
    pub swatch: Rgba,
}

impl PinView {
    pub fn position_percent(&self) -> f64 {
        self.position * 100.0
    }
}

/// One editing session over a gradient.
///
/// Owns the keys, the selection and in-flight pin drags, and turns gestures
/// into key mutations. Only committing operations reach the change callback.
pub struct GradientEditor {
    store: KeyStore,
    mode: GradientMode,
    selection: Selection,
    drags: HashMap<KeyId, PinDrag>,
    thresholds: DragThresholds,
    edit_pending: bool,
    style: String,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for GradientEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientEditor")
            .field("store", &self.store)
            .field("mode", &self.mode)
            .field("selection", &self.selection)
            .field("drags", &self.drags)
            .field("edit_pending", &self.edit_pending)
            .finish_non_exhaustive()
    }
}

impl Default for GradientEditor {
    fn default() -> Self {
        Self::new(&Gradient::white())
    }
}

impl GradientEditor {
    pub fn new(gradient: &Gradient) -> Self {
        let store = KeyStore::from_gradient(gradient);
        let style = linear_gradient_css(
            &composite(&gradient.color_keys, &gradient.alpha_keys),
            gradient.mode,
        );
        Self {
            store,
            mode: gradient.mode,
            selection: Selection::default(),
            drags: HashMap::new(),
            thresholds: DragThresholds::default(),
            edit_pending: false,
            style,
            on_change: None,
        }
    }

    pub fn with_on_change(mut self, callback: impl FnMut(&Gradient) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn with_thresholds(mut self, thresholds: DragThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn store(&self) -> &KeyStore {
        &self.store
    }

    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    pub fn thresholds(&self) -> DragThresholds {
        self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: DragThresholds) {
        self.thresholds = thresholds;
    }

    /// The current gradient value, keys in insertion order.
    pub fn value(&self) -> Gradient {
        self.store.to_gradient(self.mode)
    }

    /// Notifies the host with the current value. Pending edits are part of
    /// that value, so they no longer need their own commit.
    fn commit(&mut self) -> Notification {
        self.edit_pending = false;
        let value = self.value();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&value);
        }
        Notification::Commit
    }

    pub fn set_mode(&mut self, mode: GradientMode) -> Notification {
        if self.mode == mode {
            return Notification::None;
        }
        self.mode = mode;
        self.refresh_style();
        self.commit()
    }

    fn refresh_style(&mut self) {
        self.store.take_dirty();
        self.style = linear_gradient_css(&self.samples(), self.mode);
    }

    /// CSS background for the bar, recomputed when keys changed.
    pub fn style(&mut self) -> &str {
        if self.store.is_dirty() {
            self.refresh_style();
        }
        &self.style
    }

    pub fn samples(&self) -> Vec<SamplePoint> {
        let color_keys: Vec<_> = self.store.color_keys().collect();
        let alpha_keys: Vec<_> = self.store.alpha_keys().collect();
        composite(&color_keys, &alpha_keys)
    }

    /// Adds a key where the bar was double-clicked: the top half adds an
    /// alpha key, the bottom half a color key.
    pub fn double_click(&mut self, pointer: Vec2, bar: BarRect) -> (KeyId, Notification) {
        let kind = if bar.vertical_fraction(pointer) < 0.5 {
            KeyKind::Alpha
        } else {
            KeyKind::Color
        };
        let id = self.store.add(kind, bar.position_at(pointer));
        (id, self.commit())
    }

    pub fn selection(&self) -> Option<KeyId> {
        self.selection.get()
    }

    /// Selects `id`. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: KeyId) {
        if self.store.contains(id) {
            self.selection.select(id);
        }
    }

    /// Pointer pressed somewhere other than a pin.
    pub fn pointer_down_outside(&mut self) {
        self.selection.clear();
    }

    pub fn edit_panel(&mut self) -> EditPanel {
        self.selection.resolve(&self.store)
    }

    pub fn drag_start(&mut self, id: KeyId, pointer: Vec2) {
        let Some(key) = self.store.get(id) else {
            return;
        };
        let mut drag = PinDrag::new(key.kind(), key.time()).with_thresholds(self.thresholds);
        drag.press(pointer);
        self.drags.insert(id, drag);
    }

    /// Moves a dragged pin. Writes the live position to the store without
    /// notifying observers.
    pub fn drag(&mut self, id: KeyId, pointer: Vec2, bar: BarRect) -> Notification {
        let Some(drag) = self.drags.get_mut(&id) else {
            return Notification::None;
        };
        let Some(position) = drag.drag(pointer, bar) else {
            return Notification::None;
        };
        if self.store.update(id, KeyUpdate::Time(position)) {
            Notification::Update
        } else {
            Notification::None
        }
    }

    /// Ends a pin drag, committing either the final position or the deletion.
    pub fn drag_end(&mut self, id: KeyId, pointer: Vec2, bar: BarRect) -> Notification {
        let Some(mut drag) = self.drags.remove(&id) else {
            return Notification::None;
        };
        match drag.release(pointer, bar) {
            Some(Release::Delete) => {
                if self.store.remove(id).is_none() {
                    return Notification::None;
                }
                if self.selection.is_selected(id) {
                    self.selection.clear();
                }
                debug!("deleted key {id} by dragging it off the bar");
                self.commit()
            }
            Some(Release::Change(position)) => {
                if !self.store.contains(id) {
                    return Notification::None;
                }
                self.store.update(id, KeyUpdate::Time(position));
                self.commit()
            }
            None => Notification::None,
        }
    }

    pub fn is_about_to_delete(&self, id: KeyId) -> bool {
        self.drags
            .get(&id)
            .is_some_and(PinDrag::is_about_to_delete)
    }

    /// Parses `hex` and applies it to the selected color key.
    pub fn edit_color(&mut self, hex: &str) -> Result<Notification, ColorParseError> {
        let color = Rgb::from_hex(hex)?;
        Ok(self.edit_color_rgb(color))
    }

    pub fn edit_color_rgb(&mut self, color: Rgb) -> Notification {
        let EditPanel::Color { id, .. } = self.edit_panel() else {
            return Notification::None;
        };
        self.apply_edit(id, KeyUpdate::Color(color))
    }

    pub fn edit_alpha(&mut self, alpha: u8) -> Notification {
        let EditPanel::Alpha { id, .. } = self.edit_panel() else {
            return Notification::None;
        };
        self.apply_edit(id, KeyUpdate::Alpha(alpha))
    }

    fn apply_edit(&mut self, id: KeyId, update: KeyUpdate) -> Notification {
        if self.store.update(id, update) {
            self.edit_pending = true;
            Notification::Update
        } else {
            Notification::None
        }
    }

    /// The value input lost focus: commits once if it changed anything.
    pub fn commit_edit(&mut self) -> Notification {
        if !std::mem::take(&mut self.edit_pending) {
            return Notification::None;
        }
        self.commit()
    }

    pub fn pins(&self) -> Vec<PinView> {
        let color_pins = self.store.color_stops().iter().map(|stop| PinView {
            id: stop.id,
            kind: KeyKind::Color,
            position: stop.key.time,
            about_to_delete: self.is_about_to_delete(stop.id),
            selected: self.selection.is_selected(stop.id),
            swatch: stop.key.color.with_alpha(255.0),
        });
        let alpha_pins = self.store.alpha_stops().iter().map(|stop| PinView {
            id: stop.id,
            kind: KeyKind::Alpha,
            position: stop.key.time,
            about_to_delete: self.is_about_to_delete(stop.id),
            selected: self.selection.is_selected(stop.id),
            swatch: Rgb::WHITE.with_alpha(f64::from(stop.key.alpha)),
        });
        alpha_pins.chain(color_pins).collect()
    }

    pub fn key(&self, id: KeyId) -> Option<Key> {
        self.store.get(id)
    }
}
