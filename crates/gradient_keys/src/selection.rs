use bevy::prelude::*;

use crate::color::Rgb;
use crate::keys::Key;
use crate::store::{KeyId, KeyStore};

/// The single selected key, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct Selection(Option<KeyId>);

impl Selection {
    pub fn get(&self) -> Option<KeyId> {
        self.0
    }

    pub fn select(&mut self, id: KeyId) {
        self.0 = Some(id);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn is_selected(&self, id: KeyId) -> bool {
        self.0 == Some(id)
    }

    /// Resolves the selection against `store`. A selection whose key no
    /// longer exists is cleared.
    pub fn resolve(&mut self, store: &KeyStore) -> EditPanel {
        let Some(id) = self.0 else {
            return EditPanel::Hidden;
        };
        let panel = EditPanel::for_key(id, store.get(id));
        if panel == EditPanel::Hidden {
            self.clear();
        }
        panel
    }
}

/// Which value input is visible for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditPanel {
    #[default]
    Hidden,
    Color { id: KeyId, time: f64, color: Rgb },
    Alpha { id: KeyId, time: f64, alpha: u8 },
}

impl EditPanel {
    fn for_key(id: KeyId, key: Option<Key>) -> Self {
        match key {
            Some(Key::Color(key)) => Self::Color {
                id,
                time: key.time,
                color: key.color,
            },
            Some(Key::Alpha(key)) => Self::Alpha {
                id,
                time: key.time,
                alpha: key.alpha,
            },
            None => Self::Hidden,
        }
    }

    pub fn id(&self) -> Option<KeyId> {
        match self {
            Self::Hidden => None,
            Self::Color { id, .. } | Self::Alpha { id, .. } => Some(*id),
        }
    }

    /// Time of the edited key, used to place the input next to its pin.
    pub fn time(&self) -> Option<f64> {
        match self {
            Self::Hidden => None,
            Self::Color { time, .. } | Self::Alpha { time, .. } => Some(*time),
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color { .. })
    }

    pub fn is_alpha(&self) -> bool {
        matches!(self, Self::Alpha { .. })
    }
}
