use async_trait::async_trait;
use tokio::fs;

use crate::{
    cache,
    error::{PipelineError, Result},
    types::Caption,
};

const SPEECH_URL: &str = "https://api.openai.com/v1/audio/speech";
const TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// External capability that turns narration text into an audio file.
/// Returns a URL or local path usable as an AudioTrack source.
#[async_trait]
pub trait VoiceoverSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<String>;
}

/// Optional external capability producing timed captions from an audio file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_url: &str) -> Result<Vec<Caption>>;
}

/// Voiceover synthesis via the OpenAI text-to-speech endpoint. The MP3 bytes
/// are written under the user cache dir and the path is returned.
pub struct OpenAiVoice {
    client: reqwest::Client,
    api_key: String,
    voice: String,
}

impl OpenAiVoice {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            voice: "alloy".to_string(),
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }
}

#[async_trait]
impl VoiceoverSynthesizer for OpenAiVoice {
    async fn synthesize(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(SPEECH_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": "tts-1",
                "voice": self.voice,
                "input": text,
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|err| PipelineError::VoiceoverFailed {
                reason: err.to_string(),
            })?;

        let audio = response.bytes().await?;

        fs::create_dir_all(cache::media_cache_dir()).await?;
        let path = cache::voiceover_path(&uuid::Uuid::new_v4().to_string());
        fs::write(&path, &audio).await?;

        Ok(path.to_string_lossy().into_owned())
    }
}

/// Whisper transcription with word-level timestamps, mapped into captions.
pub struct OpenAiTranscriber {
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiTranscriber {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    async fn read_audio(&self, audio_url: &str) -> Result<Vec<u8>> {
        if audio_url.starts_with("http://") || audio_url.starts_with("https://") {
            let bytes = self.client.get(audio_url).send().await?.bytes().await?;
            Ok(bytes.to_vec())
        } else {
            Ok(fs::read(audio_url).await?)
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct TranscriptionSegment {
    start: f64,
    end: f64,
    text: String,
}

#[derive(Debug, serde::Deserialize)]
struct TranscriptionResponse {
    segments: Vec<TranscriptionSegment>,
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, audio_url: &str) -> Result<Vec<Caption>> {
        let audio = self.read_audio(audio_url).await?;

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("voiceover.mp3")
            .mime_str("audio/mpeg")
            .map_err(|err| PipelineError::TranscriptionFailed {
                reason: err.to_string(),
            })?;
        let form = reqwest::multipart::Form::new()
            .text("model", "whisper-1")
            .text("response_format", "verbose_json")
            .part("file", part);

        let response = self
            .client
            .post(TRANSCRIPTION_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?
            .error_for_status()
            .map_err(|err| PipelineError::TranscriptionFailed {
                reason: err.to_string(),
            })?
            .json::<TranscriptionResponse>()
            .await?;

        Ok(response
            .segments
            .into_iter()
            .map(|segment| Caption {
                text: segment.text.trim().to_string(),
                start_time: segment.start,
                end_time: segment.end,
                confidence: None,
            })
            .collect())
    }
}
