use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Number of faces in a cube-map skybox.
pub const SKYBOX_FACES: usize = 6;

/// Asset manifest naming every image the scene uses.
/// Loaded from JSON; paths are resolved by the host relative to its base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Cube-map faces in +X, -X, +Y, -Y, +Z, -Z order.
    #[serde(default)]
    pub skybox: Vec<String>,
    /// Named 2D textures: name → relative path.
    #[serde(default)]
    pub textures: BTreeMap<String, String>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string and check the skybox face count.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// An empty skybox is allowed (solid background); otherwise exactly six faces.
    pub fn validate(&self) -> Result<(), AssetError> {
        if !self.skybox.is_empty() && self.skybox.len() != SKYBOX_FACES {
            return Err(AssetError::SkyboxFaces(self.skybox.len()));
        }
        Ok(())
    }

    /// Total image files referenced (skybox faces counted individually).
    pub fn image_count(&self) -> usize {
        self.skybox.len() + self.textures.len()
    }
}
