use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{info, warn};

use crate::{
    composer::CompositionBuilder,
    error::{PipelineError, Result},
    providers::{ImageProvider, PexelsClient, UnsplashClient, VideoProvider},
    script::{OpenAiScriptProducer, ScriptProducer},
    sourcer::AssetSourcer,
    types::{AudioKind, AudioTrack, BrandConfig, Caption, Script, VideoRequest, VideoSpec},
    voice::{OpenAiVoice, Transcriber, VoiceoverSynthesizer},
};

/// How many images and videos one generation asks for.
const IMAGE_COUNT: usize = 5;
const VIDEO_COUNT: usize = 2;

/// Background music sits well below the voiceover. Mixing invariant, not a
/// tunable.
const MUSIC_VOLUME: f64 = 0.3;
const VOICEOVER_VOLUME: f64 = 1.0;

/// Credentials for the real capability implementations. Built by the caller
/// and handed to [`VideoPipeline::new`]; there is no ambient shared instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub openai_api_key: String,
    pub pexels_api_key: Option<String>,
    pub unsplash_api_key: Option<String>,
}

/// Orchestrates one generation: script, concurrent asset sourcing, optional
/// audio features, then the deterministic composition passes.
pub struct VideoPipeline {
    script_producer: Arc<dyn ScriptProducer>,
    voiceover: Arc<dyn VoiceoverSynthesizer>,
    transcriber: Option<Arc<dyn Transcriber>>,
    sourcer: AssetSourcer,
    composer: CompositionBuilder,
}

impl VideoPipeline {
    /// Wire the pipeline to the real HTTP capabilities.
    pub fn new(config: PipelineConfig) -> Self {
        let client = reqwest::Client::new();

        let mut image_providers: Vec<Arc<dyn ImageProvider>> = Vec::new();
        if let Some(key) = &config.unsplash_api_key {
            image_providers.push(Arc::new(UnsplashClient::new(client.clone(), key.clone())));
        }
        let mut video_provider: Option<Arc<dyn VideoProvider>> = None;
        if let Some(key) = &config.pexels_api_key {
            let pexels = Arc::new(PexelsClient::new(client.clone(), key.clone()));
            image_providers.push(pexels.clone());
            video_provider = Some(pexels);
        }

        Self {
            script_producer: Arc::new(OpenAiScriptProducer::new(
                client.clone(),
                config.openai_api_key.clone(),
            )),
            voiceover: Arc::new(OpenAiVoice::new(client, config.openai_api_key)),
            transcriber: None,
            sourcer: AssetSourcer::new(image_providers, video_provider),
            composer: CompositionBuilder::new(),
        }
    }

    /// Assemble a pipeline from arbitrary capability implementations.
    pub fn from_parts(
        script_producer: Arc<dyn ScriptProducer>,
        voiceover: Arc<dyn VoiceoverSynthesizer>,
        sourcer: AssetSourcer,
    ) -> Self {
        Self {
            script_producer,
            voiceover,
            transcriber: None,
            sourcer,
            composer: CompositionBuilder::new(),
        }
    }

    /// Attach a dedicated transcription capability for caption timing. When
    /// absent (the default), captions derive directly from script segments.
    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Generate one fully-specified video composition for the request.
    pub async fn generate_video(
        &self,
        request: &VideoRequest,
        branding: &BrandConfig,
    ) -> Result<VideoSpec> {
        info!(topic = %request.topic, platform = %request.platform, "starting video generation");

        let script = self.script_producer.generate(request).await?;
        script
            .validate()
            .map_err(|reason| PipelineError::ScriptFailed { reason })?;
        info!(title = %script.title, segments = script.segments.len(), "script generated");

        let (images, videos, music) = tokio::join!(
            self.sourcer.source_images(&script, IMAGE_COUNT),
            self.sourcer.source_videos(&script, VIDEO_COUNT),
            async { self.sourcer.source_music(request.style) },
        );

        let mut assets = images?;
        assets.extend(videos);
        info!(count = assets.len(), "assets sourced");

        let voiceover = if request.options.include_voiceover {
            let url = self.voiceover.synthesize(&script.narration).await?;
            info!(url = %url, "voiceover synthesized");
            Some(AudioTrack {
                id: "voiceover".to_string(),
                url,
                kind: AudioKind::Voiceover,
                duration: script.duration,
                volume: VOICEOVER_VOLUME,
                start_from: 0.0,
            })
        } else {
            None
        };

        let captions = if request.options.include_captions && voiceover.is_some() {
            let voiceover_url = voiceover.as_ref().map(|track| track.url.as_str());
            Some(self.build_captions(&script, voiceover_url).await)
        } else {
            None
        };

        let music_track = if request.options.include_music {
            music.map(|asset| AudioTrack {
                id: "background-music".to_string(),
                url: asset.url.clone(),
                kind: AudioKind::Music,
                duration: asset.metadata.duration.unwrap_or(script.duration),
                volume: MUSIC_VOLUME,
                start_from: 0.0,
            })
        } else {
            None
        };

        let spec = self.composer.build(
            request,
            &script,
            &assets,
            voiceover,
            music_track,
            captions,
            branding.clone(),
        );
        // Optimization must run before the synthetic-CTA append so a forced
        // closer is never itself truncated.
        let spec = self.composer.optimize_for_platform(spec);
        let spec = self.composer.apply_branding(spec);

        info!(
            id = %spec.id,
            duration = spec.duration,
            scenes = spec.scenes.len(),
            assets = spec.assets.len(),
            "video spec complete"
        );
        Ok(spec)
    }

    /// Generate `count` independent variants of the same request. Each call
    /// gets a distinguishing nudge in the custom prompt; results preserve
    /// submission order regardless of completion order.
    pub async fn generate_variants(
        &self,
        request: &VideoRequest,
        branding: &BrandConfig,
        count: usize,
    ) -> Result<Vec<VideoSpec>> {
        info!(count, "generating video variants");

        let jobs = (1..=count).map(|variant| {
            let mut variant_request = request.clone();
            let base = variant_request.custom_prompt.take().unwrap_or_default();
            variant_request.custom_prompt = Some(
                format!("{base} Variant {variant}: Use a different creative angle.")
                    .trim_start()
                    .to_string(),
            );
            async move { self.generate_video(&variant_request, branding).await }
        });

        try_join_all(jobs).await
    }

    async fn build_captions(&self, script: &Script, voiceover_url: Option<&str>) -> Vec<Caption> {
        if let (Some(transcriber), Some(url)) = (&self.transcriber, voiceover_url) {
            match transcriber.transcribe(url).await {
                Ok(captions) => return captions,
                Err(err) => {
                    warn!(error = %err, "transcription failed, falling back to segment captions");
                }
            }
        }

        script
            .segments
            .iter()
            .map(|segment| Caption {
                text: segment.text.clone(),
                start_time: segment.start_time,
                end_time: segment.end_time,
                confidence: None,
            })
            .collect()
    }
}
