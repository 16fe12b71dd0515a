pub use crate::GradientKeysPlugin;

pub use crate::asset::{GradientAsset, GradientAssetLoader, GradientAssetLoaderError};
pub use crate::color::{ColorParseError, Rgb, Rgba};
pub use crate::composite::SamplePoint;
pub use crate::drag::{BarRect, DragThresholds, PinDrag, Release};
pub use crate::editor::{GradientEditor, Notification, PinView};
pub use crate::keys::{
    AlphaKey, ColorKey, Gradient as KeyedGradient, GradientMode, Key, KeyKind,
};
pub use crate::selection::EditPanel;
pub use crate::store::{KeyId, KeyStore, KeyUpdate};
