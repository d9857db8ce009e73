//! ClipForge Core Library
//!
//! Turns a short content brief into a fully-specified, declarative video
//! composition: a timed sequence of scenes, asset bindings, audio tracks,
//! and branding, ready to hand to a rendering engine.

pub mod cache;
pub mod composer;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod providers;
pub mod script;
pub mod sourcer;
pub mod types;
pub mod voice;

// Re-export commonly used items at crate root
pub use composer::{CompositionBuilder, DEFAULT_FPS, TimingSlot};
pub use error::{PipelineError, Result};
pub use pipeline::{PipelineConfig, VideoPipeline};
pub use platform::PlatformSpec;
pub use providers::{ImageProvider, PexelsClient, UnsplashClient, VideoProvider};
pub use script::{OpenAiScriptProducer, ScriptProducer};
pub use sourcer::AssetSourcer;
pub use types::{
    Asset, AssetKind, AssetMetadata, AudioKind, AudioTrack, BrandColors, BrandConfig, BrandFonts,
    Caption, Dimensions, GenerationOptions, Platform, Scene, SceneKind, Script, Segment,
    SegmentRole, SpecMetadata, StylePreset, VideoRequest, VideoSpec,
};
pub use voice::{OpenAiTranscriber, OpenAiVoice, Transcriber, VoiceoverSynthesizer};
