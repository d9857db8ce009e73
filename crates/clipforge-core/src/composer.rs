use std::collections::BTreeMap;

use tracing::warn;
use uuid::Uuid;

use crate::types::{
    Asset, AssetKind, AudioTrack, BrandConfig, Caption, Scene, SceneKind, Script, SegmentRole,
    SpecMetadata, VideoRequest, VideoSpec,
};

pub const DEFAULT_FPS: u32 = 30;
pub const SPEC_SCHEMA_VERSION: &str = "1.0.0";

/// Duration of the synthetic CTA scene appended by branding injection.
const CTA_SCENE_SECONDS: f64 = 3.0;

/// A start/duration slot produced by the timing planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSlot {
    pub start_time: f64,
    pub duration: f64,
}

/// Asset bound to a segment: a pure function of the asset list and the
/// segment's position. Assets rotate and repeat once exhausted.
fn bound_asset(assets: &[Asset], segment_index: usize) -> Option<&Asset> {
    if assets.is_empty() {
        None
    } else {
        Some(&assets[segment_index % assets.len()])
    }
}

/// Deterministically assembles a script, sourced assets, audio tracks, and
/// branding into one platform-conformant [`VideoSpec`].
#[derive(Debug, Default)]
pub struct CompositionBuilder;

impl CompositionBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Construct the spec from its parts. Scenes are derived from script
    /// segments; assets are pooled by id and referenced from scenes.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        &self,
        request: &VideoRequest,
        script: &Script,
        assets: &[Asset],
        voiceover: Option<AudioTrack>,
        music: Option<AudioTrack>,
        captions: Option<Vec<Caption>>,
        branding: BrandConfig,
    ) -> VideoSpec {
        let platform_spec = request.platform.spec();

        let asset_map: BTreeMap<String, Asset> = assets
            .iter()
            .map(|asset| (asset.id.clone(), asset.clone()))
            .collect();

        let scenes = build_scenes(script, assets);
        let now = chrono::Utc::now().to_rfc3339();

        VideoSpec {
            id: format!("video-{}", Uuid::new_v4()),
            title: script.title.clone(),
            description: Some(script.description.clone()),
            style: request.style,
            duration: script.duration,
            platform: request.platform,
            dimensions: platform_spec.dimensions(),
            fps: DEFAULT_FPS,
            scenes,
            assets: asset_map,
            music,
            voiceover,
            captions,
            branding,
            metadata: SpecMetadata {
                created_at: now.clone(),
                updated_at: now,
                version: SPEC_SCHEMA_VERSION.to_string(),
            },
        }
    }

    /// Enforce platform constraints: dimensions are overwritten
    /// unconditionally, and an over-limit duration is clamped with every
    /// scene rescaled by `max_duration / original_duration` so proportions
    /// are preserved. Idempotent.
    pub fn optimize_for_platform(&self, mut spec: VideoSpec) -> VideoSpec {
        let platform_spec = spec.platform.spec();
        spec.dimensions = platform_spec.dimensions();

        if spec.duration > platform_spec.max_duration {
            warn!(
                duration = spec.duration,
                max = platform_spec.max_duration,
                platform = %spec.platform,
                "duration exceeds platform max, rescaling scenes"
            );
            // The scale factor must come from the pre-clamp duration.
            let scale = platform_spec.max_duration / spec.duration;
            for scene in &mut spec.scenes {
                scene.start_time *= scale;
                scene.duration *= scale;
            }
            spec.duration = platform_spec.max_duration;
        }

        spec
    }

    /// Attach branding and guarantee the composition closes with an outro or
    /// CTA: when neither exists, append a synthetic 3-second CTA scene and
    /// extend the total duration accordingly. Never appends twice.
    pub fn apply_branding(&self, mut spec: VideoSpec) -> VideoSpec {
        let has_closer = spec
            .scenes
            .iter()
            .any(|scene| matches!(scene.kind, SceneKind::Outro | SceneKind::Cta));

        if !has_closer {
            let start_time = spec.scenes.last().map(Scene::end_time).unwrap_or(0.0);
            spec.scenes.push(Scene {
                id: "cta-outro".to_string(),
                kind: SceneKind::Cta,
                duration: CTA_SCENE_SECONDS,
                start_time,
                assets: Vec::new(),
                text: Some("Learn More".to_string()),
                animation: Some("slideUp".to_string()),
                transition: None,
            });
            spec.duration += CTA_SCENE_SECONDS;
        }

        spec
    }

    /// Proportional timing plan for scripts without usable segment timings:
    /// 10% intro, 75% content split evenly, 15% outro.
    pub fn plan_scene_timing(&self, duration: f64, segment_count: usize) -> Vec<TimingSlot> {
        let intro = duration * 0.10;
        let outro = duration * 0.15;
        let content = duration * 0.75;
        let content_segments = segment_count.saturating_sub(2).max(1);
        let per_segment = content / content_segments as f64;

        let mut slots = Vec::with_capacity(segment_count);
        let mut current = 0.0;

        slots.push(TimingSlot {
            start_time: current,
            duration: intro,
        });
        current += intro;

        for _ in 0..segment_count.saturating_sub(2) {
            slots.push(TimingSlot {
                start_time: current,
                duration: per_segment,
            });
            current += per_segment;
        }

        slots.push(TimingSlot {
            start_time: current,
            duration: outro,
        });

        slots
    }
}

fn build_scenes(script: &Script, assets: &[Asset]) -> Vec<Scene> {
    let last_index = script.segments.len().saturating_sub(1);

    script
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let bound = bound_asset(assets, index);

            let mut animation = "fadeIn";
            let mut transition = "fade";
            let kind = match segment.role {
                SegmentRole::Intro => {
                    animation = "zoomIn";
                    SceneKind::Intro
                }
                SegmentRole::Outro => {
                    animation = "fadeOut";
                    SceneKind::Outro
                }
                SegmentRole::Cta => {
                    animation = "slideUp";
                    SceneKind::Cta
                }
                SegmentRole::Transition => {
                    transition = "wipe";
                    SceneKind::Title
                }
                SegmentRole::Content => {
                    if bound.is_some_and(|asset| asset.kind == AssetKind::Video) {
                        SceneKind::VideoOverlay
                    } else {
                        SceneKind::ImageWithText
                    }
                }
            };

            Scene {
                id: segment.id.clone(),
                kind,
                duration: segment.end_time - segment.start_time,
                start_time: segment.start_time,
                assets: bound.map(|asset| asset.id.clone()).into_iter().collect(),
                text: Some(segment.text.clone()),
                animation: Some(animation.to_string()),
                transition: (index < last_index).then(|| transition.to_string()),
            }
        })
        .collect()
}
