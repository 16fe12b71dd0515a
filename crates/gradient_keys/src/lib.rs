pub mod asset;
pub mod color;
pub mod composite;
pub mod drag;
pub mod editor;
pub mod keys;
pub mod prelude;
pub mod selection;
pub mod store;

use bevy::prelude::*;

pub use asset::{GradientAsset, GradientAssetLoader};

/// Registers [`GradientAsset`] and its RON loader.
pub struct GradientKeysPlugin;

impl Plugin for GradientKeysPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<GradientAsset>()
            .init_asset_loader::<GradientAssetLoader>();
    }
}

pub use color::{ColorParseError, Rgb, Rgba, alpha_from_unit, alpha_to_unit};
pub use composite::{SamplePoint, composite, linear_gradient_css, sample_at};
pub use drag::{
    BarRect, DELETE_HINT_THRESHOLD, DELETE_RELEASE_THRESHOLD, DRAG_START_THRESHOLD, DragPhase,
    DragThresholds, PinDrag, Release,
};
pub use editor::{ChangeCallback, GradientEditor, Notification, PinView};
pub use keys::{AlphaKey, ColorKey, Gradient, GradientMode, Key, KeyKind};
pub use selection::{EditPanel, Selection};
pub use store::{AlphaStop, ColorStop, KeyId, KeyStore, KeyUpdate};
