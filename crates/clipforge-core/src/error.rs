use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no asset providers configured for image sourcing")]
    NoProvidersConfigured,

    #[error("script generation failed: {reason}")]
    ScriptFailed { reason: String },

    #[error("voiceover synthesis failed: {reason}")]
    VoiceoverFailed { reason: String },

    #[error("transcription failed: {reason}")]
    TranscriptionFailed { reason: String },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
