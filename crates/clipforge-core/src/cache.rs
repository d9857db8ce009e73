use std::path::PathBuf;

/// Root directory for generated media artifacts (synthesized audio).
pub fn media_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("clipforge")
}

/// Path for a synthesized voiceover file, keyed by generation id.
pub fn voiceover_path(generation_id: &str) -> PathBuf {
    media_cache_dir().join(format!("voiceover-{generation_id}.mp3"))
}
