use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sceneframe",
    version,
    about = "Write one JSON scene document per animation frame"
)]
struct Cli {
    /// Scene configuration JSON: `{"scene": "<name>", "params": {...}}`.
    config: PathBuf,

    /// Output directory for `NNNN.json` frame documents (created if missing).
    out_dir: PathBuf,

    /// Stop after this many frames even if the scene would keep going.
    #[arg(long)]
    max_frames: Option<u64>,

    /// Pretty-print frame documents.
    #[arg(long)]
    pretty: bool,

    /// More logging: `-v` for debug, `-vv` for trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = sceneframe::SceneConfig::from_path(&cli.config)
        .with_context(|| format!("load scene config '{}'", cli.config.display()))?;
    let scene = config
        .build()
        .with_context(|| format!("build scene '{}'", config.scene))?;

    let mut sink = sceneframe::JsonDirSink::new(&cli.out_dir).pretty(cli.pretty);
    let frames = sceneframe::render_scene(&scene, &mut sink, cli.max_frames)
        .with_context(|| format!("render scene '{}'", config.scene))?;

    eprintln!("wrote {frames} frames to {}", cli.out_dir.display());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
