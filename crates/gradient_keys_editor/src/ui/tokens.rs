use bevy::color::palettes::tailwind;
use bevy::prelude::*;

// corner radius
pub const CORNER_RADIUS: Val = Val::Px(2.0);

// colors
pub const PRIMARY_COLOR: Srgba = tailwind::BLUE_500;
pub const BACKGROUND_COLOR: Srgba = tailwind::ZINC_900;
pub const BORDER_COLOR: Srgba = tailwind::ZINC_700;
pub const DANGER_COLOR: Srgba = tailwind::RED_500;
pub const TEXT_BODY_COLOR: Srgba = tailwind::ZINC_200;
pub const TEXT_MUTED_COLOR: Srgba = tailwind::ZINC_400;

// text sizes
pub const TEXT_SIZE_SM: f32 = 10.0;
pub const TEXT_SIZE: f32 = 12.0;
