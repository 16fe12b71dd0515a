use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keys::Gradient;

/// A [`Gradient`] stored as a RON file.
#[derive(Asset, TypePath, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradientAsset(pub Gradient);

/// Asset loader for [`GradientAsset`] files in RON format.
#[derive(Default, TypePath)]
pub struct GradientAssetLoader;

/// Errors that can occur when loading a [`GradientAsset`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GradientAssetLoaderError {
    /// An I/O error occurred while reading the asset file.
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    /// The file contained invalid RON syntax or a color that is not `#rrggbb`.
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

impl AssetLoader for GradientAssetLoader {
    type Asset = GradientAsset;
    type Settings = ();
    type Error = GradientAssetLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let gradient = ron::de::from_bytes::<Gradient>(&bytes)?;

        if gradient.color_keys.is_empty() && gradient.alpha_keys.is_empty() {
            let path = load_context.path();
            warn!("{path:?}: gradient has no keys, it will render as opaque white");
        }

        Ok(GradientAsset(gradient))
    }

    fn extensions(&self) -> &[&str] {
        &["gradient.ron", "ron"]
    }
}
