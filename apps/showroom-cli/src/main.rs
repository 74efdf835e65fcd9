use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use showroom_assets::{AssetLoader, LoadEvent, TextureManifest};
use showroom_common::ShowroomConfig;
use showroom_render::DebugTextRenderer;
use showroom_runtime::{ManualClock, ManualScheduler, Showroom};
use showroom_scene::StandardMaterial;
use showroom_tools::{SceneInspector, material_panel};
use showroom_viewport::{DrawingSurface, ResizeEvent};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showroom-cli", about = "Headless tools for the PBR showroom")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Step the render loop with a simulated clock and print the last frame
    Simulate {
        /// Simulated wall time in seconds
        #[arg(short, long, default_value = "10")]
        seconds: f64,
        /// Simulated display refresh rate
        #[arg(long, default_value = "60")]
        fps: f64,
        /// Logical viewport width
        #[arg(long, default_value = "1280")]
        width: u32,
        /// Logical viewport height
        #[arg(long, default_value = "720")]
        height: u32,
        /// Device pixel ratio reported by the display
        #[arg(long, default_value = "1")]
        dpr: f64,
    },
    /// Print the material debug parameters as JSON
    Params {
        /// Override a parameter before printing, as NAME=VALUE
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,
    },
    /// Load the showroom texture set and report progress
    Textures {
        /// Texture root directory (defaults to the configured one)
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Seconds to wait for decoding to finish
        #[arg(long, default_value = "30")]
        timeout: u64,
    },
}

/// Records the last size and density pushed by the viewport controller.
#[derive(Debug, Default)]
struct HeadlessSurface {
    size: (u32, u32),
    pixel_ratio: f64,
}

impl DrawingSurface for HeadlessSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = ShowroomConfig::load_or_default(cli.config.as_deref())
        .context("loading configuration")?;

    match cli.command {
        Commands::Info => {
            println!("showroom-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", showroom_render::crate_info());
            println!("assets: {}", showroom_assets::crate_info());
            println!("tools: {}", showroom_tools::crate_info());
            println!(
                "config: pixel_ratio_cap={} spin=({}, {}) fov={} textures={}",
                config.pixel_ratio_cap,
                config.spin.x,
                config.spin.y,
                config.camera.fov_degrees,
                config.textures_dir.display()
            );
        }
        Commands::Simulate {
            seconds,
            fps,
            width,
            height,
            dpr,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                bail!("fps must be positive, got {fps}");
            }
            if !(seconds.is_finite() && seconds >= 0.0) {
                bail!("seconds must be non-negative, got {seconds}");
            }

            let mut showroom = Showroom::new(
                &config,
                None,
                ManualClock::new(),
                ManualScheduler::new(),
            );
            let mut surface = HeadlessSurface::default();
            showroom.start()?;
            showroom.resize(ResizeEvent::new(width, height, dpr), &mut surface);
            println!(
                "Surface: {}x{} @ {} (framebuffer {}x{})",
                surface.size.0,
                surface.size.1,
                surface.pixel_ratio,
                showroom.viewport().state().framebuffer_size().0,
                showroom.viewport().state().framebuffer_size().1,
            );

            let frames = (seconds * fps).round() as u64;
            tracing::debug!(frames, fps, "stepping simulated frames");
            let mut renderer = DebugTextRenderer::new();
            let mut last = None;
            for i in 1..=frames {
                let render_loop = showroom.render_loop_mut();
                if !render_loop.scheduler_mut().take() {
                    break;
                }
                render_loop
                    .clock_mut()
                    .set(Duration::from_secs_f64(i as f64 / fps));
                last = showroom.frame(&mut renderer).or(last);
            }

            if let Some(frame) = last {
                print!("{frame}");
            }
            let summary = SceneInspector::summary(
                showroom.scene(),
                showroom.viewport().state(),
                showroom.render_loop().frames(),
                showroom.render_loop().last_elapsed(),
            );
            println!("{summary}");
            showroom.teardown();
        }
        Commands::Params { overrides } => {
            let panel = material_panel();
            let mut material = StandardMaterial::showroom(None);
            for entry in &overrides {
                let (name, value) = entry
                    .split_once('=')
                    .with_context(|| format!("expected NAME=VALUE, got {entry:?}"))?;
                let value: f32 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid number for {name}"))?;
                panel.set(&mut material, name.trim(), value)?;
            }
            println!("{}", serde_json::to_string_pretty(&panel.to_json(&material))?);
        }
        Commands::Textures { dir, timeout } => {
            let root = dir.unwrap_or(config.textures_dir);
            let mut loader = AssetLoader::new(root.clone())?;
            let manifest = TextureManifest::showcase();
            manifest.queue(&mut loader);
            println!("Loading {} textures from {}", manifest.count(), root.display());

            for event in loader.wait_idle(Duration::from_secs(timeout)) {
                match event {
                    LoadEvent::Started { total } => println!("started: {total} queued"),
                    LoadEvent::Progress { url, loaded, total } => {
                        println!("[{loaded}/{total}] {url}");
                    }
                    LoadEvent::Failed { url, error } => println!("FAILED {url}: {error}"),
                    LoadEvent::Completed { loaded, failed } => {
                        println!("completed: {loaded} processed, {failed} failed");
                    }
                }
            }
            if !loader.is_idle() {
                let (loaded, total) = loader.progress();
                bail!("timed out with {loaded}/{total} textures processed");
            }
        }
    }

    Ok(())
}
