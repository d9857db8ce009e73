use async_trait::async_trait;

use crate::{
    error::{PipelineError, Result},
    types::{Script, VideoRequest},
};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o";

/// External capability that turns a request into a structured script.
#[async_trait]
pub trait ScriptProducer: Send + Sync {
    async fn generate(&self, request: &VideoRequest) -> Result<Script>;
}

/// Script producer backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiScriptProducer {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiScriptProducer {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_prompt(request: &VideoRequest) -> String {
        let custom = request
            .custom_prompt
            .as_deref()
            .map(|prompt| format!("Additional instructions: {prompt}\n"))
            .unwrap_or_default();

        format!(
            r#"Create a compelling {duration}-second video script about "{topic}".

Style: {style}
Platform: {platform}
{custom}
Generate a JSON response with:
1. A catchy title
2. A brief description
3. Full narration text (to be spoken)
4. Breakdown into segments with timing, text, and scene type
5. 5-7 relevant keywords for asset sourcing
6. Visual direction for each segment

The script should be engaging, concise, and optimized for {platform}.
Segments should include: intro (hook), content (main message), and outro (call-to-action).

Return ONLY valid JSON matching this structure:
{{
  "title": "string",
  "description": "string",
  "duration": number,
  "narration": "string",
  "keywords": ["string"],
  "segments": [
    {{
      "id": "string",
      "text": "string",
      "startTime": number,
      "endTime": number,
      "sceneType": "intro|content|transition|outro|cta",
      "visualDirection": "string"
    }}
  ]
}}"#,
            duration = request.duration,
            topic = request.topic,
            style = request.style,
            platform = request.platform,
            custom = custom,
        )
    }
}

/// Pull the assistant message text out of a chat-completions response body.
fn extract_chat_content(response: &serde_json::Value) -> Result<&str> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| PipelineError::ScriptFailed {
            reason: format!("invalid API response: {response}"),
        })
}

#[async_trait]
impl ScriptProducer for OpenAiScriptProducer {
    async fn generate(&self, request: &VideoRequest) -> Result<Script> {
        let prompt = Self::build_prompt(request);

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "system",
                        "content": "You are an expert video scriptwriter. Generate engaging, concise scripts optimized for short-form video. Always return valid JSON.",
                    },
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
                "response_format": { "type": "json_object" },
                "temperature": 0.8,
            }))
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        let content = extract_chat_content(&response)?;

        let script: Script =
            serde_json::from_str(content).map_err(|err| PipelineError::ScriptFailed {
                reason: format!("script does not match expected shape: {err}"),
            })?;

        Ok(script)
    }
}
