use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use sketchpad::config::Config;
use sketchpad::draw::{Canvas, Surface};
use sketchpad::recognition::{HttpRecognizer, RecognitionManager};
use sketchpad::session::{EventLoop, Session, event_channel, script};
use sketchpad::text::TextOverlay;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHPAD_GIT_HASH"), ")"),
    about = "Freehand drawing surface with PNG export and image recognition"
)]
struct Cli {
    /// Config file (default: ~/.config/sketchpad/config.toml)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Replay a JSON-lines event script against a fresh surface
    Replay {
        /// Script file, or '-' to read from stdin
        script: PathBuf,

        /// Directory for drawing.png (overrides export.directory)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Render text through the overlay and write the raster as PNG
    RenderText {
        /// Text to render
        text: String,

        /// Output PNG path
        #[arg(long, short = 'o', value_name = "PATH")]
        out: PathBuf,

        /// Stroke width the font size is derived from
        #[arg(long, short = 'w')]
        width: Option<u32>,

        /// Text color (hex or palette name)
        #[arg(long)]
        color: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(CliCommand::Replay { script, out_dir }) => {
            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(dir) = out_dir {
                config.export.directory = dir.to_string_lossy().into_owned();
            }
            replay(&config, &script)?;
        }
        Some(CliCommand::RenderText {
            text,
            out,
            width,
            color,
        }) => {
            let config = Config::load(cli.config.as_deref())?;
            render_text(&config, &text, &out, width, color.as_deref())?;
        }
        None => {
            println!("sketchpad: Freehand drawing surface with PNG export and image recognition");
            println!();
            println!("Usage:");
            println!("  sketchpad replay <SCRIPT>              Replay a JSON-lines event script");
            println!("  sketchpad render-text <TEXT> -o <PNG>  Render the text overlay to a file");
            println!("  sketchpad --help                       Show help");
            println!();
            println!("Script events (one JSON object per line):");
            println!("  pointer_down / pointer_move {{x, y}}, pointer_up, pointer_leave");
            println!("  color {{value}}, width {{value}}, text {{value}}");
            println!("  clear, save, recognize, shutdown");
        }
    }

    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read script from stdin")?;
        Ok(input)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))
    }
}

fn replay(config: &Config, script_path: &Path) -> Result<()> {
    let input = read_script(script_path)?;
    let events = script::parse_script(&input)
        .with_context(|| format!("Invalid event script {}", script_path.display()))?;
    log::info!("Replaying {} events", events.len());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let session = runtime.block_on(async {
        let session = Session::from_config(config).context("Failed to create drawing surface")?;
        let recognizer = HttpRecognizer::new(&config.recognition)
            .context("Failed to create recognition client")?;
        let (tx, rx) = event_channel();
        let recognition = RecognitionManager::new(
            &tokio::runtime::Handle::current(),
            Arc::new(recognizer),
            config.recognition.overlap_policy,
            rx.completion_sender(),
        );
        let event_loop = EventLoop::new(session, recognition);

        for event in events {
            tx.send(event).context("Failed to queue event")?;
        }
        drop(tx);

        Ok::<_, anyhow::Error>(event_loop.run(rx).await)
    })?;

    let display = session.display();
    if !display.is_empty() {
        println!("{}", display.text());
    }
    Ok(())
}

fn render_text(
    config: &Config,
    text: &str,
    out: &Path,
    width: Option<u32>,
    color: Option<&str>,
) -> Result<()> {
    let mut style = config.initial_style();
    if let Some(width) = width {
        style.set_width(width);
    }
    if let Some(color) = color
        && !style.set_color_str(color)
    {
        return Err(anyhow!("Unrecognized color '{}'", color));
    }

    let mut surface = Surface::with_font(config.canvas.width, config.canvas.height, config.font())
        .context("Failed to create drawing surface")?;
    TextOverlay::new(config.text_anchor()).apply(&mut surface, text, &style);

    let png = surface.export_png().context("Failed to encode PNG")?;
    std::fs::write(out, png).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}
