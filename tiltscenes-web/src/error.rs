/// Errors from setting up or poking at the stage. The simulation itself
/// never fails: removing an unknown object just reports `false`.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown debug parameter: {0}")]
    UnknownParam(String),
    #[error("canvas not found: {0}")]
    CanvasNotFound(String),
    #[error("renderer failed for {canvas}: {reason}")]
    Renderer { canvas: String, reason: String },
}
