//! Stock-media provider capabilities.
//!
//! Each provider maps its own API response into [`Asset`] values carrying
//! license and attribution metadata. Providers are isolated at the sourcing
//! layer: one failing provider never aborts the others.

mod pexels;
mod unsplash;

pub use pexels::PexelsClient;
pub use unsplash::UnsplashClient;

use async_trait::async_trait;

use crate::{error::Result, types::Asset};

/// An external image search capability.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn search_images(&self, query: &str, count: usize) -> Result<Vec<Asset>>;
}

/// An external stock-video search capability.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn search_videos(&self, query: &str, count: usize) -> Result<Vec<Asset>>;
}
