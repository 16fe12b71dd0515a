pub mod gradient_keys_edit;

use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(gradient_keys_edit::plugin);
}
