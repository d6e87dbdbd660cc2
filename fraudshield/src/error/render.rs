use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("[Render] Failed to serialize network data: {0}")]
    SerializeError(#[from] serde_json::Error),
}
