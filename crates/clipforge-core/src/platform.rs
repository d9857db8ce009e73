use crate::types::{Dimensions, Platform};

/// Static rendering constraints for one target platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpec {
    pub width: u32,
    pub height: u32,
    /// Maximum allowed duration in seconds.
    pub max_duration: f64,
}

impl PlatformSpec {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}

impl Platform {
    /// The single source of truth for every platform-dependent decision.
    pub const fn spec(self) -> PlatformSpec {
        match self {
            Platform::Youtube => PlatformSpec {
                width: 1920,
                height: 1080,
                max_duration: 600.0,
            },
            Platform::YoutubeShorts => PlatformSpec {
                width: 1080,
                height: 1920,
                max_duration: 60.0,
            },
            Platform::Tiktok => PlatformSpec {
                width: 1080,
                height: 1920,
                max_duration: 180.0,
            },
            Platform::InstagramFeed => PlatformSpec {
                width: 1080,
                height: 1080,
                max_duration: 60.0,
            },
            Platform::InstagramReels => PlatformSpec {
                width: 1080,
                height: 1920,
                max_duration: 90.0,
            },
            Platform::InstagramStories => PlatformSpec {
                width: 1080,
                height: 1920,
                max_duration: 15.0,
            },
            Platform::Linkedin => PlatformSpec {
                width: 1920,
                height: 1080,
                max_duration: 600.0,
            },
            Platform::Twitter => PlatformSpec {
                width: 1280,
                height: 720,
                max_duration: 140.0,
            },
            Platform::Facebook => PlatformSpec {
                width: 1280,
                height: 720,
                max_duration: 240.0,
            },
        }
    }

    pub const ALL: [Platform; 9] = [
        Platform::Youtube,
        Platform::YoutubeShorts,
        Platform::Tiktok,
        Platform::InstagramFeed,
        Platform::InstagramReels,
        Platform::InstagramStories,
        Platform::Linkedin,
        Platform::Twitter,
        Platform::Facebook,
    ];
}
