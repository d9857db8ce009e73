use std::sync::Arc;

use async_trait::async_trait;

use clipforge_core::{
    Asset, AssetKind, AssetMetadata, AssetSourcer, AudioKind, BrandConfig, GenerationOptions,
    ImageProvider, PipelineError, Platform, Result, SceneKind, Script, ScriptProducer, Segment,
    SegmentRole, StylePreset, VideoPipeline, VideoProvider, VideoRequest, VideoSpec,
    VoiceoverSynthesizer,
};

struct FakeScriptProducer;

#[async_trait]
impl ScriptProducer for FakeScriptProducer {
    async fn generate(&self, request: &VideoRequest) -> Result<Script> {
        // Title echoes the custom prompt so variant tests can observe it.
        let title = request
            .custom_prompt
            .clone()
            .unwrap_or_else(|| format!("About {}", request.topic));
        let duration = request.duration;
        let step = duration / 5.0;

        let roles = [
            SegmentRole::Intro,
            SegmentRole::Content,
            SegmentRole::Content,
            SegmentRole::Content,
            SegmentRole::Outro,
        ];
        let segments = roles
            .iter()
            .enumerate()
            .map(|(i, role)| Segment {
                id: format!("seg-{}", i + 1),
                text: format!("Segment {} about {}", i + 1, request.topic),
                start_time: i as f64 * step,
                end_time: (i + 1) as f64 * step,
                role: *role,
                visual_direction: None,
            })
            .collect();

        Ok(Script {
            title,
            description: format!("A video about {}", request.topic),
            duration,
            narration: format!("Narration about {}", request.topic),
            keywords: vec!["ai".to_string(), "tips".to_string()],
            segments,
        })
    }
}

struct BrokenScriptProducer;

#[async_trait]
impl ScriptProducer for BrokenScriptProducer {
    async fn generate(&self, _request: &VideoRequest) -> Result<Script> {
        Err(PipelineError::ScriptFailed {
            reason: "model returned garbage".to_string(),
        })
    }
}

/// Producer whose segments overlap; must be rejected at the boundary.
struct MalformedScriptProducer;

#[async_trait]
impl ScriptProducer for MalformedScriptProducer {
    async fn generate(&self, request: &VideoRequest) -> Result<Script> {
        Ok(Script {
            title: "Bad".to_string(),
            description: "Bad".to_string(),
            duration: request.duration,
            narration: "x".to_string(),
            keywords: vec![],
            segments: vec![
                Segment {
                    id: "a".to_string(),
                    text: "a".to_string(),
                    start_time: 0.0,
                    end_time: 20.0,
                    role: SegmentRole::Intro,
                    visual_direction: None,
                },
                Segment {
                    id: "b".to_string(),
                    text: "b".to_string(),
                    start_time: 10.0,
                    end_time: request.duration,
                    role: SegmentRole::Outro,
                    visual_direction: None,
                },
            ],
        })
    }
}

struct FakeVoice;

#[async_trait]
impl VoiceoverSynthesizer for FakeVoice {
    async fn synthesize(&self, _text: &str) -> Result<String> {
        Ok("https://example.com/audio/voiceover.mp3".to_string())
    }
}

struct BrokenVoice;

#[async_trait]
impl VoiceoverSynthesizer for BrokenVoice {
    async fn synthesize(&self, _text: &str) -> Result<String> {
        Err(PipelineError::VoiceoverFailed {
            reason: "tts unavailable".to_string(),
        })
    }
}

struct FixedImages(Vec<Asset>);

#[async_trait]
impl ImageProvider for FixedImages {
    fn name(&self) -> &'static str {
        "fixed-images"
    }

    async fn search_images(&self, _query: &str, count: usize) -> Result<Vec<Asset>> {
        let mut assets = self.0.clone();
        assets.truncate(count);
        Ok(assets)
    }
}

struct FixedVideos(Vec<Asset>);

#[async_trait]
impl VideoProvider for FixedVideos {
    fn name(&self) -> &'static str {
        "fixed-videos"
    }

    async fn search_videos(&self, _query: &str, count: usize) -> Result<Vec<Asset>> {
        let mut assets = self.0.clone();
        assets.truncate(count);
        Ok(assets)
    }
}

fn image(id: &str) -> Asset {
    Asset {
        id: id.to_string(),
        kind: AssetKind::Image,
        url: format!("https://example.com/images/{id}.jpg"),
        metadata: AssetMetadata::default(),
    }
}

fn video(id: &str) -> Asset {
    Asset {
        id: id.to_string(),
        kind: AssetKind::Video,
        url: format!("https://example.com/videos/{id}.mp4"),
        metadata: AssetMetadata {
            duration: Some(12.0),
            ..AssetMetadata::default()
        },
    }
}

fn sourcer_with_assets() -> AssetSourcer {
    AssetSourcer::new(
        vec![Arc::new(FixedImages(vec![
            image("img-1"),
            image("img-2"),
            image("img-3"),
        ]))],
        Some(Arc::new(FixedVideos(vec![video("vid-1")]))),
    )
}

fn pipeline() -> VideoPipeline {
    VideoPipeline::from_parts(
        Arc::new(FakeScriptProducer),
        Arc::new(FakeVoice),
        sourcer_with_assets(),
    )
}

fn request(platform: Platform, duration: f64) -> VideoRequest {
    VideoRequest {
        topic: "AI tips".to_string(),
        duration,
        style: StylePreset::Modern,
        platform,
        custom_prompt: None,
        options: GenerationOptions::default(),
    }
}

fn assert_scenes_sorted_and_disjoint(spec: &VideoSpec) {
    for pair in spec.scenes.windows(2) {
        assert!(
            pair[0].start_time <= pair[1].start_time,
            "scenes out of order"
        );
        assert!(
            pair[0].start_time + pair[0].duration <= pair[1].start_time + 1e-9,
            "scene overlaps its successor"
        );
    }
}

#[tokio::test]
async fn youtube_shorts_brief_produces_conformant_spec() {
    let spec = pipeline()
        .generate_video(&request(Platform::YoutubeShorts, 30.0), &BrandConfig::default())
        .await
        .unwrap();

    assert_eq!(spec.dimensions.width, 1080);
    assert_eq!(spec.dimensions.height, 1920);
    assert!(spec.duration <= 60.0);
    // 5 segments, outro present, so no synthetic CTA.
    assert_eq!(spec.scenes.len(), 5);
    assert_scenes_sorted_and_disjoint(&spec);
    assert_eq!(spec.assets.len(), 4); // 3 images + 1 video
    assert_eq!(spec.branding, BrandConfig::default());
}

#[tokio::test]
async fn duration_never_exceeds_platform_max() {
    for platform in Platform::ALL {
        let spec = pipeline()
            .generate_video(&request(platform, 300.0), &BrandConfig::default())
            .await
            .unwrap();
        // The synthetic CTA can only appear when no outro exists; the fake
        // script always closes with one, so the cap holds strictly.
        assert!(
            spec.duration <= platform.spec().max_duration,
            "{platform} spec over duration cap"
        );
        assert_scenes_sorted_and_disjoint(&spec);
    }
}

#[tokio::test]
async fn stories_brief_is_rescaled_uniformly() {
    let spec = pipeline()
        .generate_video(
            &request(Platform::InstagramStories, 120.0),
            &BrandConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(spec.duration, 15.0);
    // Fake script slices 120s into five 24s segments; scaled by 15/120 each
    // scene is 3s.
    for (i, scene) in spec.scenes.iter().enumerate() {
        assert!((scene.duration - 3.0).abs() < 1e-9);
        assert!((scene.start_time - 3.0 * i as f64).abs() < 1e-9);
    }
}

#[tokio::test]
async fn voiceover_captions_and_music_are_attached_by_default() {
    let spec = pipeline()
        .generate_video(&request(Platform::Youtube, 30.0), &BrandConfig::default())
        .await
        .unwrap();

    let voiceover = spec.voiceover.expect("voiceover expected");
    assert_eq!(voiceover.kind, AudioKind::Voiceover);
    assert_eq!(voiceover.volume, 1.0);
    assert_eq!(voiceover.duration, 30.0);

    let music = spec.music.expect("music expected");
    assert_eq!(music.kind, AudioKind::Music);
    // Background music must always sit below the voiceover.
    assert!(music.volume < voiceover.volume);

    let captions = spec.captions.expect("captions expected");
    assert_eq!(captions.len(), 5);
    assert_eq!(captions[0].start_time, 0.0);
}

#[tokio::test]
async fn disabled_options_leave_audio_absent() {
    let mut request = request(Platform::Youtube, 30.0);
    request.options = GenerationOptions {
        include_voiceover: false,
        include_captions: true,
        include_music: false,
        auto_publish: false,
    };

    let spec = pipeline()
        .generate_video(&request, &BrandConfig::default())
        .await
        .unwrap();

    assert!(spec.voiceover.is_none());
    assert!(spec.music.is_none());
    // Captions require a voiceover; enabled flag alone is not enough.
    assert!(spec.captions.is_none());
}

#[tokio::test]
async fn script_failure_aborts_generation() {
    let pipeline = VideoPipeline::from_parts(
        Arc::new(BrokenScriptProducer),
        Arc::new(FakeVoice),
        sourcer_with_assets(),
    );
    let err = pipeline
        .generate_video(&request(Platform::Youtube, 30.0), &BrandConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::ScriptFailed { .. }));
}

#[tokio::test]
async fn malformed_script_is_rejected_at_the_boundary() {
    let pipeline = VideoPipeline::from_parts(
        Arc::new(MalformedScriptProducer),
        Arc::new(FakeVoice),
        sourcer_with_assets(),
    );
    let err = pipeline
        .generate_video(&request(Platform::Youtube, 30.0), &BrandConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::ScriptFailed { .. }));
}

#[tokio::test]
async fn voiceover_failure_aborts_generation() {
    let pipeline = VideoPipeline::from_parts(
        Arc::new(FakeScriptProducer),
        Arc::new(BrokenVoice),
        sourcer_with_assets(),
    );
    let err = pipeline
        .generate_video(&request(Platform::Youtube, 30.0), &BrandConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::VoiceoverFailed { .. }));
}

#[tokio::test]
async fn zero_image_providers_fails_generation_with_config_error() {
    let pipeline = VideoPipeline::from_parts(
        Arc::new(FakeScriptProducer),
        Arc::new(FakeVoice),
        AssetSourcer::new(vec![], None),
    );
    let err = pipeline
        .generate_video(&request(Platform::Youtube, 30.0), &BrandConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::NoProvidersConfigured));
}

#[tokio::test]
async fn missing_video_provider_degrades_to_images_only() {
    let pipeline = VideoPipeline::from_parts(
        Arc::new(FakeScriptProducer),
        Arc::new(FakeVoice),
        AssetSourcer::new(vec![Arc::new(FixedImages(vec![image("img-1")]))], None),
    );
    let spec = pipeline
        .generate_video(&request(Platform::Youtube, 30.0), &BrandConfig::default())
        .await
        .unwrap();
    assert_eq!(spec.assets.len(), 1);
    assert!(spec.assets.values().all(|a| a.kind == AssetKind::Image));
}

#[tokio::test]
async fn synthetic_cta_is_injected_when_script_has_no_closer() {
    struct OpenEndedProducer;

    #[async_trait]
    impl ScriptProducer for OpenEndedProducer {
        async fn generate(&self, request: &VideoRequest) -> Result<Script> {
            Ok(Script {
                title: "Open ended".to_string(),
                description: "d".to_string(),
                duration: request.duration,
                narration: "n".to_string(),
                keywords: vec!["x".to_string()],
                segments: vec![Segment {
                    id: "only".to_string(),
                    text: "body".to_string(),
                    start_time: 0.0,
                    end_time: request.duration,
                    role: SegmentRole::Content,
                    visual_direction: None,
                }],
            })
        }
    }

    let pipeline = VideoPipeline::from_parts(
        Arc::new(OpenEndedProducer),
        Arc::new(FakeVoice),
        sourcer_with_assets(),
    );
    let spec = pipeline
        .generate_video(&request(Platform::Youtube, 30.0), &BrandConfig::default())
        .await
        .unwrap();

    assert_eq!(spec.scenes.len(), 2);
    assert_eq!(spec.scenes.last().unwrap().kind, SceneKind::Cta);
    assert_eq!(spec.duration, 33.0);
}

#[tokio::test]
async fn variants_preserve_submission_order() {
    let specs = pipeline()
        .generate_variants(&request(Platform::Youtube, 30.0), &BrandConfig::default(), 3)
        .await
        .unwrap();

    assert_eq!(specs.len(), 3);
    for (index, spec) in specs.iter().enumerate() {
        // The fake producer echoes the prompt as the title.
        assert!(
            spec.title.contains(&format!("Variant {}", index + 1)),
            "variant {index} got title {:?}",
            spec.title
        );
        assert!(spec.title.contains("different creative angle"));
    }
}

#[tokio::test]
async fn variants_share_branding_unchanged() {
    let branding = BrandConfig {
        name: "TechCo".to_string(),
        ..BrandConfig::default()
    };
    let specs = pipeline()
        .generate_variants(&request(Platform::Youtube, 30.0), &branding, 2)
        .await
        .unwrap();
    assert!(specs.iter().all(|spec| spec.branding == branding));
}

#[tokio::test]
async fn spec_round_trips_through_json() {
    let spec = pipeline()
        .generate_video(&request(Platform::YoutubeShorts, 30.0), &BrandConfig::default())
        .await
        .unwrap();

    let json = serde_json::to_string_pretty(&spec).unwrap();
    let back: VideoSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(spec, back);

    // Wire format sanity: camelCase fields and kebab-case platform values.
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["platform"], "youtube-shorts");
    assert!(value["scenes"][0]["startTime"].is_number());
    assert!(value["metadata"]["createdAt"].is_string());
}
