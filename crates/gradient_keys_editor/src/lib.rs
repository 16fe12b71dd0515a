pub mod assets;
pub mod ui;

use bevy::prelude::*;
use gradient_keys::GradientKeysPlugin;

/// Registers the gradient key widget, its material and embedded shader.
pub struct GradientKeysEditorPlugin;

impl Plugin for GradientKeysEditorPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<GradientKeysPlugin>() {
            app.add_plugins(GradientKeysPlugin);
        }
        app.add_plugins((assets::plugin, ui::plugin));
    }
}
