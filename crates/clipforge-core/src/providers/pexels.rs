use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::Result,
    providers::{ImageProvider, VideoProvider},
    types::{Asset, AssetKind, AssetMetadata},
};

const PEXELS_API_URL: &str = "https://api.pexels.com/v1";
const PEXELS_VIDEO_API_URL: &str = "https://api.pexels.com/videos";

/// Pexels stock media client. Serves both images and videos.
pub struct PexelsClient {
    client: reqwest::Client,
    api_key: String,
}

impl PexelsClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PhotoPage {
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: u64,
    width: u32,
    height: u32,
    photographer: String,
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    large: String,
}

#[derive(Debug, Deserialize)]
struct VideoPage {
    videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    id: u64,
    duration: f64,
    user: VideoUser,
    video_files: Vec<VideoFile>,
}

#[derive(Debug, Deserialize)]
struct VideoUser {
    name: String,
}

#[derive(Debug, Deserialize)]
struct VideoFile {
    link: String,
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<String>,
}

#[async_trait]
impl ImageProvider for PexelsClient {
    fn name(&self) -> &'static str {
        "pexels"
    }

    async fn search_images(&self, query: &str, count: usize) -> Result<Vec<Asset>> {
        let page = self
            .client
            .get(format!("{PEXELS_API_URL}/search"))
            .query(&[
                ("query", query),
                ("per_page", &count.to_string()),
                ("orientation", "landscape"),
            ])
            .header("Authorization", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<PhotoPage>()
            .await?;

        Ok(page
            .photos
            .into_iter()
            .map(|photo| Asset {
                id: photo.id.to_string(),
                kind: AssetKind::Image,
                url: photo.src.large,
                metadata: AssetMetadata {
                    width: Some(photo.width),
                    height: Some(photo.height),
                    keywords: Some(vec![query.to_string()]),
                    license: Some("Pexels License".to_string()),
                    attribution: Some(format!("Photo by {} on Pexels", photo.photographer)),
                    ..AssetMetadata::default()
                },
            })
            .collect())
    }
}

#[async_trait]
impl VideoProvider for PexelsClient {
    fn name(&self) -> &'static str {
        "pexels"
    }

    async fn search_videos(&self, query: &str, count: usize) -> Result<Vec<Asset>> {
        let page = self
            .client
            .get(format!("{PEXELS_VIDEO_API_URL}/search"))
            .query(&[
                ("query", query),
                ("per_page", &count.to_string()),
                ("orientation", "landscape"),
            ])
            .header("Authorization", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<VideoPage>()
            .await?;

        Ok(page
            .videos
            .into_iter()
            .filter_map(|video| {
                // Prefer the HD rendition, fall back to the first file.
                let file = video
                    .video_files
                    .iter()
                    .find(|f| f.quality.as_deref() == Some("hd"))
                    .or_else(|| video.video_files.first())?;

                Some(Asset {
                    id: video.id.to_string(),
                    kind: AssetKind::Video,
                    url: file.link.clone(),
                    metadata: AssetMetadata {
                        width: file.width,
                        height: file.height,
                        duration: Some(video.duration),
                        keywords: Some(vec![query.to_string()]),
                        license: Some("Pexels License".to_string()),
                        attribution: Some(format!("Video by {} on Pexels", video.user.name)),
                    },
                })
            })
            .collect())
    }
}
