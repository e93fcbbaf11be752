use thiserror::Error;

/// Failures while resolving the asset manifest.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to parse asset manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("skybox needs 6 faces, manifest lists {0}")]
    SkyboxFaces(usize),

    #[error("unknown texture: {0}")]
    UnknownTexture(String),
}
