use std::collections::HashMap;

use crate::api::types::{CubeTextureId, TextureId};
use crate::assets::manifest::AssetManifest;
use crate::error::AssetError;

/// Registry of named textures, built from an `AssetManifest`.
///
/// Hands out opaque ids; the render backend maps ids to GPU textures and
/// loads the images asynchronously.
pub struct TextureRegistry {
    by_name: HashMap<String, TextureId>,
    paths: Vec<String>,
    skybox: Option<[String; 6]>,
}

impl TextureRegistry {
    /// Empty registry with no skybox.
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
            paths: Vec::new(),
            skybox: None,
        }
    }

    /// Build a registry from a parsed manifest. Ids follow name order.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut reg = Self::new();
        for (name, path) in &manifest.textures {
            reg.insert(name, path);
        }
        if let Ok(faces) = <[String; 6]>::try_from(manifest.skybox.clone()) {
            reg.skybox = Some(faces);
        }
        reg
    }

    /// Register a texture, returning the existing id if the name is taken.
    pub fn insert(&mut self, name: &str, path: &str) -> TextureId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = TextureId(self.paths.len() as u32);
        self.paths.push(path.to_string());
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Look up a texture by name.
    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Look up a texture that must exist.
    pub fn require(&self, name: &str) -> Result<TextureId, AssetError> {
        self.get(name).ok_or_else(|| AssetError::UnknownTexture(name.to_string()))
    }

    /// All registered textures in id order, as `(id, path)` pairs. GPU
    /// backends walk this once to start loading every image.
    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &str)> {
        self.paths.iter().enumerate().map(|(i, p)| (TextureId(i as u32), p.as_str()))
    }

    /// Number of registered textures. Ids run from 0 to `len() - 1`.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Handle to the skybox cube texture, if the manifest has one.
    pub fn skybox(&self) -> Option<CubeTextureId> {
        self.skybox.as_ref().map(|_| CubeTextureId(0))
    }

    /// Face paths of the skybox cube texture.
    pub fn skybox_faces(&self, id: CubeTextureId) -> Option<&[String; 6]> {
        if id.0 == 0 {
            self.skybox.as_ref()
        } else {
            None
        }
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
