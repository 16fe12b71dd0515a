use bevy::asset::embedded_asset;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    // shaders
    embedded_asset!(app, "assets/shaders/gradient_bar.wgsl");
}
