use std::fmt;

use bevy::prelude::*;

use crate::color::Rgb;
use crate::keys::{AlphaKey, ColorKey, Gradient, GradientMode, Key, KeyKind};

/// Stable identifier of a key within one [`KeyStore`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub struct KeyId(pub u64);

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub id: KeyId,
    pub key: ColorKey,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaStop {
    pub id: KeyId,
    pub key: AlphaKey,
}

/// A single-field change applied by [`KeyStore::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyUpdate {
    Time(f64),
    Color(Rgb),
    Alpha(u8),
}

/// Owns the color and alpha keys of one editor session, in insertion order.
///
/// The store trusts its callers: times and values are written as given.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    color_stops: Vec<ColorStop>,
    alpha_stops: Vec<AlphaStop>,
    next_id: u64,
    dirty: bool,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns fresh ids to the keys of `gradient`, color keys first.
    pub fn from_gradient(gradient: &Gradient) -> Self {
        let mut store = Self::new();
        for key in &gradient.color_keys {
            store.insert(Key::Color(*key));
        }
        for key in &gradient.alpha_keys {
            store.insert(Key::Alpha(*key));
        }
        store.dirty = false;
        store
    }

    fn allocate_id(&mut self) -> KeyId {
        let id = KeyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends a key of `kind` at `time` with the default value of its kind.
    pub fn add(&mut self, kind: KeyKind, time: f64) -> KeyId {
        self.insert(Key::with_default_value(kind, time))
    }

    pub fn insert(&mut self, key: Key) -> KeyId {
        let id = self.allocate_id();
        match key {
            Key::Color(key) => self.color_stops.push(ColorStop { id, key }),
            Key::Alpha(key) => self.alpha_stops.push(AlphaStop { id, key }),
        }
        debug!("added {:?} key {id} at {}", key.kind(), key.time());
        self.dirty = true;
        id
    }

    /// Applies `update` to the key `id`. Unknown ids and updates that do not
    /// apply to the key's kind are ignored and return `false`.
    pub fn update(&mut self, id: KeyId, update: KeyUpdate) -> bool {
        let applied = if let Some(stop) = self.color_stops.iter_mut().find(|s| s.id == id) {
            match update {
                KeyUpdate::Time(time) => {
                    stop.key.time = time;
                    true
                }
                KeyUpdate::Color(color) => {
                    stop.key.color = color;
                    true
                }
                KeyUpdate::Alpha(_) => false,
            }
        } else if let Some(stop) = self.alpha_stops.iter_mut().find(|s| s.id == id) {
            match update {
                KeyUpdate::Time(time) => {
                    stop.key.time = time;
                    true
                }
                KeyUpdate::Alpha(alpha) => {
                    stop.key.alpha = alpha;
                    true
                }
                KeyUpdate::Color(_) => false,
            }
        } else {
            false
        };

        if applied {
            self.dirty = true;
        }
        applied
    }

    pub fn remove(&mut self, id: KeyId) -> Option<Key> {
        let removed = if let Some(index) = self.color_stops.iter().position(|s| s.id == id) {
            Some(Key::Color(self.color_stops.remove(index).key))
        } else if let Some(index) = self.alpha_stops.iter().position(|s| s.id == id) {
            Some(Key::Alpha(self.alpha_stops.remove(index).key))
        } else {
            None
        };

        if removed.is_some() {
            debug!("removed key {id}");
            self.dirty = true;
        }
        removed
    }

    pub fn get(&self, id: KeyId) -> Option<Key> {
        self.color_stops
            .iter()
            .find(|s| s.id == id)
            .map(|s| Key::Color(s.key))
            .or_else(|| {
                self.alpha_stops
                    .iter()
                    .find(|s| s.id == id)
                    .map(|s| Key::Alpha(s.key))
            })
    }

    pub fn contains(&self, id: KeyId) -> bool {
        self.get(id).is_some()
    }

    pub fn kind_of(&self, id: KeyId) -> Option<KeyKind> {
        self.get(id).map(|key| key.kind())
    }

    pub fn color_stops(&self) -> &[ColorStop] {
        &self.color_stops
    }

    pub fn alpha_stops(&self) -> &[AlphaStop] {
        &self.alpha_stops
    }

    pub fn color_keys(&self) -> impl Iterator<Item = ColorKey> + '_ {
        self.color_stops.iter().map(|s| s.key)
    }

    pub fn alpha_keys(&self) -> impl Iterator<Item = AlphaKey> + '_ {
        self.alpha_stops.iter().map(|s| s.key)
    }

    pub fn len(&self) -> usize {
        self.color_stops.len() + self.alpha_stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_gradient(&self, mode: GradientMode) -> Gradient {
        Gradient {
            color_keys: self.color_keys().collect(),
            alpha_keys: self.alpha_keys().collect(),
            mode,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the store changed since the last call and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
