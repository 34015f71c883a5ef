use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "schotter",
    version,
    about = "Render a Schotter-style grid of rotated squares to PNG"
)]
struct Cli {
    /// Starting configuration; later options override it.
    #[arg(long, value_enum, default_value_t = PresetChoice::Classic)]
    preset: PresetChoice,

    /// JSON file overlaid on the preset (partial objects allowed).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid columns.
    #[arg(long)]
    columns: Option<u32>,

    /// Grid rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Inset on every side of a cell, in pixels.
    #[arg(long)]
    padding: Option<u32>,

    /// Outline width in pixels.
    #[arg(long)]
    stroke_width: Option<f64>,

    /// Maximum rotation in degrees.
    #[arg(long)]
    max_rotation: Option<f64>,

    /// Maximum horizontal jitter as a fraction of the cell size.
    #[arg(long)]
    max_offset: Option<f64>,

    /// Fill opacity in [0, 1].
    #[arg(long)]
    alpha: Option<f64>,

    /// Gradient theme name (see --list-themes).
    #[arg(long)]
    theme: Option<String>,

    /// Use the logarithmic row progression for rotation and jitter.
    #[arg(long, conflicts_with = "no_exponential")]
    exponential: bool,

    /// Force the linear row progression.
    #[arg(long)]
    no_exponential: bool,

    /// Omit the signature caption.
    #[arg(long, conflicts_with = "sign")]
    no_sign: bool,

    /// Force the signature caption on.
    #[arg(long)]
    sign: bool,

    /// Canvas background.
    #[arg(long, value_enum)]
    background: Option<BackgroundChoice>,

    /// RNG seed; defaults to the wall clock.
    #[arg(long)]
    seed: Option<u64>,

    /// Font file for the caption.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Caption font size in pixels.
    #[arg(long)]
    font_size: Option<f32>,

    /// Directory for the generated file name.
    #[arg(long, default_value = "img")]
    out_dir: PathBuf,

    /// Explicit output path; overrides --out-dir and the generated name.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the built-in theme names and exit.
    #[arg(long)]
    list_themes: bool,

    /// More logging (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Classic,
    Paper,
    Exponential,
    Unsigned,
}

impl From<PresetChoice> for schotter::Preset {
    fn from(p: PresetChoice) -> Self {
        match p {
            PresetChoice::Classic => schotter::Preset::Classic,
            PresetChoice::Paper => schotter::Preset::Paper,
            PresetChoice::Exponential => schotter::Preset::Exponential,
            PresetChoice::Unsigned => schotter::Preset::Unsigned,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackgroundChoice {
    Black,
    White,
}

impl From<BackgroundChoice> for schotter::Background {
    fn from(b: BackgroundChoice) -> Self {
        match b {
            BackgroundChoice::Black => schotter::Background::Black,
            BackgroundChoice::White => schotter::Background::White,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let themes = schotter::ThemeRegistry::builtin().context("build theme registry")?;
    if cli.list_themes {
        for name in themes.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let cfg = resolve_config(&cli)?;
    let seed = schotter::resolve_seed(&cfg);
    if cfg.seed.is_none() {
        tracing::info!(seed, "no seed given, using the clock");
    }

    let path = cli
        .out
        .clone()
        .unwrap_or_else(|| cli.out_dir.join(cfg.output_file_name()));
    let image = schotter::render_to_file(&cfg, &themes, seed, &path)
        .with_context(|| format!("render '{}'", path.display()))?;

    if let Some(sig) = &image.signature {
        eprintln!("signature {}", sig.digest);
    }
    eprintln!("wrote {} (seed {seed})", path.display());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<schotter::RenderConfig> {
    let mut cfg = schotter::Preset::from(cli.preset).config();
    if let Some(path) = &cli.config {
        cfg = cfg
            .merged_with_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?;
    }

    if let Some(v) = cli.columns {
        cfg.columns = v;
    }
    if let Some(v) = cli.rows {
        cfg.rows = v;
    }
    if let Some(v) = cli.width {
        cfg.canvas_width = v;
    }
    if let Some(v) = cli.height {
        cfg.canvas_height = v;
    }
    if let Some(v) = cli.padding {
        cfg.padding = v;
    }
    if let Some(v) = cli.stroke_width {
        cfg.stroke_width = v;
    }
    if let Some(v) = cli.max_rotation {
        cfg.max_rotation_degrees = v;
    }
    if let Some(v) = cli.max_offset {
        cfg.max_offset_fraction = v;
    }
    if let Some(v) = cli.alpha {
        cfg.fill_alpha = v;
    }
    if let Some(v) = &cli.theme {
        cfg.theme = v.clone();
    }
    if cli.exponential {
        cfg.use_exponential_row_scale = true;
    }
    if cli.no_exponential {
        cfg.use_exponential_row_scale = false;
    }
    if cli.no_sign {
        cfg.include_signature = false;
    }
    if cli.sign {
        cfg.include_signature = true;
    }
    if let Some(v) = cli.background {
        cfg.background = v.into();
    }
    if let Some(v) = cli.seed {
        cfg.seed = Some(v);
    }
    if let Some(v) = &cli.font {
        cfg.font_path = v.clone();
    }
    if let Some(v) = cli.font_size {
        cfg.font_size = v;
    }

    cfg.validate()?;
    Ok(cfg)
}
