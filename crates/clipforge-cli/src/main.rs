use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing_subscriber::EnvFilter;

use clipforge_core::{
    BrandConfig, GenerationOptions, OpenAiTranscriber, PipelineConfig, Platform, StylePreset,
    VideoPipeline, VideoRequest, VideoSpec,
};

/// CLI wrapper for Platform (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliPlatform {
    Youtube,
    #[default]
    YoutubeShorts,
    Tiktok,
    InstagramFeed,
    InstagramReels,
    InstagramStories,
    Linkedin,
    Twitter,
    Facebook,
}

impl From<CliPlatform> for Platform {
    fn from(cli: CliPlatform) -> Self {
        match cli {
            CliPlatform::Youtube => Platform::Youtube,
            CliPlatform::YoutubeShorts => Platform::YoutubeShorts,
            CliPlatform::Tiktok => Platform::Tiktok,
            CliPlatform::InstagramFeed => Platform::InstagramFeed,
            CliPlatform::InstagramReels => Platform::InstagramReels,
            CliPlatform::InstagramStories => Platform::InstagramStories,
            CliPlatform::Linkedin => Platform::Linkedin,
            CliPlatform::Twitter => Platform::Twitter,
            CliPlatform::Facebook => Platform::Facebook,
        }
    }
}

/// CLI wrapper for StylePreset (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliStyle {
    #[default]
    Modern,
    Corporate,
    Energetic,
    Minimal,
    Playful,
    Elegant,
    Bold,
}

impl From<CliStyle> for StylePreset {
    fn from(cli: CliStyle) -> Self {
        match cli {
            CliStyle::Modern => StylePreset::Modern,
            CliStyle::Corporate => StylePreset::Corporate,
            CliStyle::Energetic => StylePreset::Energetic,
            CliStyle::Minimal => StylePreset::Minimal,
            CliStyle::Playful => StylePreset::Playful,
            CliStyle::Elegant => StylePreset::Elegant,
            CliStyle::Bold => StylePreset::Bold,
        }
    }
}

#[derive(Parser)]
#[command(name = "clipforge")]
#[command(
    about = "Turn a content brief into a declarative, platform-ready video composition spec"
)]
struct Cli {
    /// Video topic
    topic: String,

    /// Target duration in seconds (5-300)
    #[arg(short, long, default_value_t = 30.0)]
    duration: f64,

    /// Target platform
    #[arg(short, long, default_value = "youtube-shorts")]
    platform: CliPlatform,

    /// Visual/music style preset
    #[arg(short, long, default_value = "modern")]
    style: CliStyle,

    /// Extra creative instructions for the script
    #[arg(long)]
    custom_prompt: Option<String>,

    /// Path to a brand config JSON file (defaults to built-in branding)
    #[arg(short, long)]
    brand: Option<PathBuf>,

    /// Generate N independent variants instead of a single spec
    #[arg(long, default_value_t = 1)]
    variants: usize,

    /// Output file for the spec JSON (variants get a numeric suffix)
    #[arg(short, long, default_value = "videospec.json")]
    output: PathBuf,

    /// Skip voiceover synthesis
    #[arg(long)]
    no_voiceover: bool,

    /// Skip caption generation
    #[arg(long)]
    no_captions: bool,

    /// Skip the background music track
    #[arg(long)]
    no_music: bool,

    /// Use Whisper transcription for caption timing instead of script segments
    #[arg(long)]
    transcribe_captions: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn print_summary(spec: &VideoSpec) {
    println!(
        "  {} {}",
        style("Title:").dim(),
        style(&spec.title).bold()
    );
    println!("  {} {:.1}s", style("Duration:").dim(), spec.duration);
    println!(
        "  {} {} ({}x{})",
        style("Platform:").dim(),
        spec.platform,
        spec.dimensions.width,
        spec.dimensions.height
    );
    println!("  {} {}", style("Scenes:").dim(), spec.scenes.len());
    println!("  {} {}", style("Assets:").dim(), spec.assets.len());
}

async fn save_spec(spec: &VideoSpec, path: &PathBuf) -> Result<()> {
    let json = serde_json::to_string_pretty(spec)?;
    fs::write(path, &json)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn variant_path(base: &PathBuf, index: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "videospec".to_string());
    base.with_file_name(format!("{stem}-{}.json", index + 1))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !(5.0..=300.0).contains(&cli.duration) {
        bail!("duration must be between 5 and 300 seconds");
    }
    if cli.variants == 0 {
        bail!("--variants must be at least 1");
    }

    // Validate API keys early
    let Ok(openai_api_key) = std::env::var("OPENAI_API_KEY") else {
        eprintln!(
            "{} OPENAI_API_KEY environment variable is not set",
            style("Error:").red().bold()
        );
        std::process::exit(1);
    };
    let pexels_api_key = std::env::var("PEXELS_API_KEY").ok();
    let unsplash_api_key = std::env::var("UNSPLASH_API_KEY").ok();
    if pexels_api_key.is_none() && unsplash_api_key.is_none() {
        eprintln!(
            "{} no stock-media key set (PEXELS_API_KEY or UNSPLASH_API_KEY); image sourcing will fail",
            style("Error:").red().bold()
        );
        std::process::exit(1);
    }

    let branding = match &cli.brand {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read brand config {}", path.display()))?;
            serde_json::from_str::<BrandConfig>(&raw)
                .with_context(|| format!("invalid brand config {}", path.display()))?
        }
        None => BrandConfig::default(),
    };

    let request = VideoRequest {
        topic: cli.topic.clone(),
        duration: cli.duration,
        style: cli.style.into(),
        platform: cli.platform.into(),
        custom_prompt: cli.custom_prompt.clone(),
        options: GenerationOptions {
            include_voiceover: !cli.no_voiceover,
            include_captions: !cli.no_captions,
            include_music: !cli.no_music,
            auto_publish: false,
        },
    };

    let mut pipeline = VideoPipeline::new(PipelineConfig {
        openai_api_key: openai_api_key.clone(),
        pexels_api_key,
        unsplash_api_key,
    });
    if cli.transcribe_captions {
        pipeline = pipeline.with_transcriber(Arc::new(OpenAiTranscriber::new(
            reqwest::Client::new(),
            openai_api_key,
        )));
    }

    println!(
        "\n{}  {}\n",
        style("clipforge").cyan().bold(),
        style("Video Spec Generator").dim()
    );

    if cli.variants == 1 {
        let spinner = create_spinner(&format!("Generating video spec for \"{}\"...", cli.topic));
        let spec = pipeline.generate_video(&request, &branding).await?;
        spinner.finish_with_message(format!("{} Video spec generated", style("✓").green().bold()));

        print_summary(&spec);
        save_spec(&spec, &cli.output).await?;
        println!(
            "\n{} {}",
            style("Saved:").dim(),
            style(cli.output.display()).cyan()
        );
    } else {
        let spinner = create_spinner(&format!(
            "Generating {} variants for \"{}\"...",
            cli.variants, cli.topic
        ));
        let specs = pipeline
            .generate_variants(&request, &branding, cli.variants)
            .await?;
        spinner.finish_with_message(format!(
            "{} {} variants generated",
            style("✓").green().bold(),
            specs.len()
        ));

        for (index, spec) in specs.iter().enumerate() {
            println!("\n{}", style(format!("Variant {}", index + 1)).bold());
            print_summary(spec);
            let path = variant_path(&cli.output, index);
            save_spec(spec, &path).await?;
            println!(
                "{} {}",
                style("Saved:").dim(),
                style(path.display()).cyan()
            );
        }
    }

    Ok(())
}
