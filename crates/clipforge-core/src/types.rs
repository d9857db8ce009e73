use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tolerance for floating-point timing comparisons (seconds).
pub const TIMING_EPSILON: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Youtube,
    YoutubeShorts,
    Tiktok,
    InstagramFeed,
    InstagramReels,
    InstagramStories,
    Linkedin,
    Twitter,
    Facebook,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::YoutubeShorts => "youtube-shorts",
            Platform::Tiktok => "tiktok",
            Platform::InstagramFeed => "instagram-feed",
            Platform::InstagramReels => "instagram-reels",
            Platform::InstagramStories => "instagram-stories",
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    Modern,
    Corporate,
    Energetic,
    Minimal,
    Playful,
    Elegant,
    Bold,
}

impl StylePreset {
    pub fn as_str(self) -> &'static str {
        match self {
            StylePreset::Modern => "modern",
            StylePreset::Corporate => "corporate",
            StylePreset::Energetic => "energetic",
            StylePreset::Minimal => "minimal",
            StylePreset::Playful => "playful",
            StylePreset::Elegant => "elegant",
            StylePreset::Bold => "bold",
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-generation feature toggles. Every flag is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default = "default_true")]
    pub include_voiceover: bool,
    #[serde(default = "default_true")]
    pub include_captions: bool,
    #[serde(default = "default_true")]
    pub include_music: bool,
    #[serde(default)]
    pub auto_publish: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_voiceover: true,
            include_captions: true,
            include_music: true,
            auto_publish: false,
        }
    }
}

/// The content brief a caller hands to the pipeline. Consumed, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    pub topic: String,
    /// Target duration in seconds (valid range 5-300).
    pub duration: f64,
    pub style: StylePreset,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentRole {
    Intro,
    Content,
    Transition,
    Outro,
    Cta,
}

/// One timed unit of the script: what is said, when, and its visual role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(rename = "sceneType")]
    pub role: SegmentRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_direction: Option<String>,
}

/// A structured script as returned by the script producer. Read-only downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub narration: String,
    pub keywords: Vec<String>,
    pub segments: Vec<Segment>,
}

impl Script {
    /// Keyword list joined into a single asset-search query.
    pub fn keyword_query(&self) -> String {
        self.keywords.join(" ")
    }

    /// Boundary validation of producer output: segments must be present,
    /// well-formed, time-ordered, non-overlapping, and collectively span
    /// `[0, duration]` within `TIMING_EPSILON`.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("script title is empty".to_string());
        }
        if self.segments.is_empty() {
            return Err("script has no segments".to_string());
        }
        let mut previous_end = 0.0_f64;
        for segment in &self.segments {
            if segment.start_time >= segment.end_time {
                return Err(format!(
                    "segment {} has non-positive duration ({} >= {})",
                    segment.id, segment.start_time, segment.end_time
                ));
            }
            if segment.start_time + TIMING_EPSILON < previous_end {
                return Err(format!(
                    "segment {} starts at {} before previous segment ends at {}",
                    segment.id, segment.start_time, previous_end
                ));
            }
            previous_end = segment.end_time;
        }
        let first_start = self.segments[0].start_time;
        if first_start.abs() > TIMING_EPSILON {
            return Err(format!("first segment starts at {first_start}, expected 0"));
        }
        if (previous_end - self.duration).abs() > TIMING_EPSILON {
            return Err(format!(
                "segments end at {} but script duration is {}",
                previous_end, self.duration
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Audio,
    Font,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

/// A sourced media asset. Scenes reference assets by id, never by copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub url: String,
    pub metadata: AssetMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    Intro,
    Title,
    Content,
    SplitScreen,
    FullScreenText,
    ImageWithText,
    VideoOverlay,
    Outro,
    Cta,
}

/// One timed slot of the composition with a visual role and bound asset ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SceneKind,
    pub duration: f64,
    pub start_time: f64,
    pub assets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

impl Scene {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioKind {
    Music,
    Voiceover,
    Sfx,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AudioKind,
    pub duration: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub start_from: f64,
}

fn default_volume() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandFonts {
    pub primary: String,
    pub secondary: String,
}

/// Branding applied uniformly across all scenes. Supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub colors: BrandColors,
    pub fonts: BrandFonts,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "ClipForge".to_string(),
            logo: None,
            colors: BrandColors {
                primary: "#3B82F6".to_string(),
                secondary: "#8B5CF6".to_string(),
                accent: "#EC4899".to_string(),
                background: "#1F2937".to_string(),
                text: "#F9FAFB".to_string(),
            },
            fonts: BrandFonts {
                primary: "Inter".to_string(),
                secondary: "Poppins".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecMetadata {
    pub created_at: String,
    pub updated_at: String,
    pub version: String,
}

/// The root artifact: a complete declarative description of a video,
/// independent of any rendering engine. Serializes losslessly to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSpec {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub style: StylePreset,
    pub duration: f64,
    pub platform: Platform,
    pub dimensions: Dimensions,
    pub fps: u32,
    pub scenes: Vec<Scene>,
    pub assets: BTreeMap<String, Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<AudioTrack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<AudioTrack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions: Option<Vec<Caption>>,
    pub branding: BrandConfig,
    pub metadata: SpecMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, start: f64, end: f64, role: SegmentRole) -> Segment {
        Segment {
            id: id.to_string(),
            text: format!("segment {id}"),
            start_time: start,
            end_time: end,
            role,
            visual_direction: None,
        }
    }

    fn script(duration: f64, segments: Vec<Segment>) -> Script {
        Script {
            title: "Test script".to_string(),
            description: "A test".to_string(),
            duration,
            narration: "narration".to_string(),
            keywords: vec!["ai".to_string(), "video".to_string()],
            segments,
        }
    }

    #[test]
    fn validate_accepts_well_formed_script() {
        let script = script(
            30.0,
            vec![
                segment("s1", 0.0, 5.0, SegmentRole::Intro),
                segment("s2", 5.0, 25.0, SegmentRole::Content),
                segment("s3", 25.0, 30.0, SegmentRole::Outro),
            ],
        );
        assert!(script.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_segments() {
        let script = script(30.0, vec![]);
        assert!(script.validate().unwrap_err().contains("no segments"));
    }

    #[test]
    fn validate_rejects_overlapping_segments() {
        let script = script(
            30.0,
            vec![
                segment("s1", 0.0, 12.0, SegmentRole::Intro),
                segment("s2", 8.0, 30.0, SegmentRole::Content),
            ],
        );
        assert!(script.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_timing() {
        let script = script(30.0, vec![segment("s1", 10.0, 5.0, SegmentRole::Intro)]);
        assert!(script.validate().is_err());
    }

    #[test]
    fn validate_rejects_short_coverage() {
        let script = script(30.0, vec![segment("s1", 0.0, 10.0, SegmentRole::Intro)]);
        assert!(script.validate().unwrap_err().contains("duration"));
    }

    #[test]
    fn keyword_query_joins_with_spaces() {
        let script = script(10.0, vec![segment("s1", 0.0, 10.0, SegmentRole::Content)]);
        assert_eq!(script.keyword_query(), "ai video");
    }

    #[test]
    fn platform_serializes_kebab_case() {
        let json = serde_json::to_string(&Platform::YoutubeShorts).unwrap();
        assert_eq!(json, "\"youtube-shorts\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::YoutubeShorts);
    }

    #[test]
    fn options_default_from_empty_object() {
        let options: GenerationOptions = serde_json::from_str("{}").unwrap();
        assert!(options.include_voiceover);
        assert!(options.include_captions);
        assert!(options.include_music);
        assert!(!options.auto_publish);
    }

    #[test]
    fn segment_role_uses_scene_type_field() {
        let json = r#"{"id":"s1","text":"hi","startTime":0,"endTime":3,"sceneType":"intro"}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.role, SegmentRole::Intro);
    }

    #[test]
    fn audio_track_volume_defaults_to_full() {
        let json = r#"{"id":"t","url":"u","type":"music","duration":10}"#;
        let track: AudioTrack = serde_json::from_str(json).unwrap();
        assert_eq!(track.volume, 1.0);
        assert_eq!(track.start_from, 0.0);
    }
}
