use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::warn;

use crate::{
    error::{PipelineError, Result},
    providers::{ImageProvider, VideoProvider},
    types::{Asset, AssetKind, AssetMetadata, Script, StylePreset},
};

/// Fixed style-keyed background music table. Pure lookup, never a network call.
fn music_url(style: StylePreset) -> &'static str {
    match style {
        StylePreset::Modern => "https://assets.clipforge.dev/music/modern-upbeat.mp3",
        StylePreset::Corporate => "https://assets.clipforge.dev/music/corporate-inspiring.mp3",
        StylePreset::Energetic => "https://assets.clipforge.dev/music/energetic-electronic.mp3",
        StylePreset::Minimal => "https://assets.clipforge.dev/music/minimal-ambient.mp3",
        StylePreset::Playful => "https://assets.clipforge.dev/music/playful-fun.mp3",
        StylePreset::Elegant => "https://assets.clipforge.dev/music/elegant-classical.mp3",
        StylePreset::Bold => "https://assets.clipforge.dev/music/bold-rock.mp3",
    }
}

const MUSIC_LIBRARY_TRACK_SECONDS: f64 = 120.0;

/// Sources images, videos, and background music for a script.
///
/// Image sourcing fans out to every configured provider and tolerates
/// individual failures; video sourcing is best-effort; music is a
/// deterministic table lookup.
pub struct AssetSourcer {
    image_providers: Vec<Arc<dyn ImageProvider>>,
    video_provider: Option<Arc<dyn VideoProvider>>,
}

impl AssetSourcer {
    pub fn new(
        image_providers: Vec<Arc<dyn ImageProvider>>,
        video_provider: Option<Arc<dyn VideoProvider>>,
    ) -> Self {
        Self {
            image_providers,
            video_provider,
        }
    }

    /// Fan out to all configured image providers, asking each for an even
    /// share of `count`, and merge whatever succeeds.
    ///
    /// Errors with [`PipelineError::NoProvidersConfigured`] when no image
    /// provider is configured at all; a failing provider merely contributes
    /// zero results. Merged results are deduplicated by id (last value wins)
    /// and truncated to `count`.
    pub async fn source_images(&self, script: &Script, count: usize) -> Result<Vec<Asset>> {
        if self.image_providers.is_empty() {
            return Err(PipelineError::NoProvidersConfigured);
        }

        let query = script.keyword_query();
        let per_provider = count.div_ceil(self.image_providers.len());

        let searches = self.image_providers.iter().map(|provider| {
            let query = query.clone();
            async move { (provider.name(), provider.search_images(&query, per_provider).await) }
        });

        let mut images = Vec::new();
        for (provider, outcome) in join_all(searches).await {
            match outcome {
                Ok(batch) => images.extend(batch),
                Err(err) => warn!(provider, error = %err, "image provider failed, continuing"),
            }
        }

        let mut unique = dedup_by_id(images);
        unique.truncate(count);
        Ok(unique)
    }

    /// Best-effort video sourcing: no provider or a failed call yields an
    /// empty list, never an error.
    pub async fn source_videos(&self, script: &Script, count: usize) -> Vec<Asset> {
        let Some(provider) = &self.video_provider else {
            warn!("no video provider configured, skipping video sourcing");
            return Vec::new();
        };

        match provider.search_videos(&script.keyword_query(), count).await {
            Ok(videos) => videos,
            Err(err) => {
                warn!(provider = provider.name(), error = %err, "video sourcing failed, continuing");
                Vec::new()
            }
        }
    }

    /// Resolve a background-music asset for a style. Unknown styles fall back
    /// to the `modern` entry, so the lookup always yields an asset.
    pub fn source_music(&self, style: StylePreset) -> Option<Asset> {
        Some(Asset {
            id: format!("music-{style}"),
            kind: AssetKind::Audio,
            url: music_url(style).to_string(),
            metadata: AssetMetadata {
                duration: Some(MUSIC_LIBRARY_TRACK_SECONDS),
                keywords: Some(vec![style.to_string(), "background-music".to_string()]),
                license: Some("Royalty Free".to_string()),
                ..AssetMetadata::default()
            },
        })
    }
}

/// Deduplicate by asset id: the last-seen value wins, the first-seen position
/// is kept.
fn dedup_by_id(assets: Vec<Asset>) -> Vec<Asset> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Asset> = Vec::with_capacity(assets.len());

    for asset in assets {
        match positions.get(&asset.id) {
            Some(&index) => unique[index] = asset,
            None => {
                positions.insert(asset.id.clone(), unique.len());
                unique.push(asset);
            }
        }
    }

    unique
}
