//! Error types for rendering backends.

use thiserror::Error;

/// Errors a rendering backend may surface to application code.
///
/// The toolkit core itself never produces these (draw calls are infallible
/// at the seam), but backends need a shared vocabulary for setup and asset
/// failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backend could not be initialized.
    #[error("backend initialization failed: {0}")]
    Initialization(String),

    /// A texture handle does not refer to a live texture.
    #[error("unknown texture handle {0}")]
    UnknownTexture(u32),

    /// A texture could not be decoded or uploaded.
    #[error("texture load failed: {0}")]
    TextureLoad(String),

    /// The requested font is unavailable.
    #[error("font not found: {family}")]
    FontNotFound {
        /// The requested family name.
        family: String,
    },
}
