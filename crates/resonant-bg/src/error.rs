//! Renderer error type

use crate::host::ShaderStage;

pub type RendererResult<T> = Result<T, RendererError>;

#[derive(thiserror::Error, Debug)]
pub enum RendererError {
    /// The host could not provide a WebGL2-capable drawing context
    #[error("drawing context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("{stage} shader failed to compile: {message}")]
    ShaderCompile { stage: ShaderStage, message: String },

    #[error("program failed to link: {0}")]
    ProgramLink(String),

    /// A frame could not be acquired or presented
    #[error("surface error: {0}")]
    Surface(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RendererError {
    pub fn context_unavailable(msg: impl Into<String>) -> Self {
        Self::ContextUnavailable(msg.into())
    }

    pub fn compile(stage: ShaderStage, msg: impl Into<String>) -> Self {
        Self::ShaderCompile {
            stage,
            message: msg.into(),
        }
    }

    pub fn link(msg: impl Into<String>) -> Self {
        Self::ProgramLink(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_are_stable() {
        assert!(RendererError::context_unavailable("x")
            .to_string()
            .starts_with("drawing context unavailable:"));
        assert_eq!(
            RendererError::compile(ShaderStage::Fragment, "bad token").to_string(),
            "fragment shader failed to compile: bad token"
        );
        assert!(RendererError::link("x")
            .to_string()
            .starts_with("program failed to link:"));
        assert!(RendererError::config("x")
            .to_string()
            .starts_with("invalid config:"));
    }

    #[test]
    fn test_json_error_converts() {
        let err: RendererError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, RendererError::Json(_)));
    }
}
