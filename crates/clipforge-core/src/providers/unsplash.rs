use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::Result,
    providers::ImageProvider,
    types::{Asset, AssetKind, AssetMetadata},
};

const UNSPLASH_API_URL: &str = "https://api.unsplash.com";

/// Unsplash photo search client (images only).
pub struct UnsplashClient {
    client: reqwest::Client,
    api_key: String,
}

impl UnsplashClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    width: u32,
    height: u32,
    urls: PhotoUrls,
    user: User,
    #[serde(default)]
    tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct User {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Tag {
    title: Option<String>,
}

#[async_trait]
impl ImageProvider for UnsplashClient {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    async fn search_images(&self, query: &str, count: usize) -> Result<Vec<Asset>> {
        let page = self
            .client
            .get(format!("{UNSPLASH_API_URL}/search/photos"))
            .query(&[
                ("query", query),
                ("per_page", &count.to_string()),
                ("orientation", "landscape"),
            ])
            .header("Authorization", format!("Client-ID {}", self.api_key))
            .send()
            .await?
            .error_for_status()?
            .json::<SearchPage>()
            .await?;

        Ok(page
            .results
            .into_iter()
            .map(|photo| {
                let keywords: Vec<String> =
                    photo.tags.into_iter().filter_map(|tag| tag.title).collect();
                Asset {
                    id: photo.id,
                    kind: AssetKind::Image,
                    url: photo.urls.regular,
                    metadata: AssetMetadata {
                        width: Some(photo.width),
                        height: Some(photo.height),
                        keywords: Some(keywords),
                        license: Some("Unsplash License".to_string()),
                        attribution: Some(format!("Photo by {} on Unsplash", photo.user.name)),
                        ..AssetMetadata::default()
                    },
                }
            })
            .collect())
    }
}
