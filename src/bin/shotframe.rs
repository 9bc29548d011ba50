use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use shotframe::{
    Align, BackgroundMode, Color, Compass, DecorationState, Editor, ExportOptions,
    GradientDirection, Padding, Update, decoration::model::AUTO_CANVAS_MARGIN,
};

#[derive(Parser, Debug)]
#[command(name = "shotframe", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decorate an image and write the result as a PNG.
    Render(RenderArgs),
    /// Print the default decoration JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Foreground image (jpg, jpeg, png, bmp, gif, webp).
    #[arg(long)]
    image: PathBuf,

    /// Decoration JSON; omitted fields take their defaults.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long, default_value = "image.png")]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<f64>,

    /// Export scale multiplier.
    #[arg(long)]
    scale: Option<f64>,

    /// Device pixel ratio (defaults to `SHOTFRAME_PIXEL_RATIO`, else 1).
    #[arg(long)]
    pixel_ratio: Option<f64>,

    /// Corner radius in canvas pixels.
    #[arg(long)]
    radius: Option<f64>,

    /// Shadow blur in canvas pixels.
    #[arg(long)]
    shadow_blur: Option<f64>,

    /// Shadow opacity percentage (0-100).
    #[arg(long)]
    shadow_opacity: Option<f64>,

    /// Shadow color as hex (`#rgb`, `#rrggbb`, `#rrggbbaa`).
    #[arg(long)]
    shadow_color: Option<Color>,

    /// Solid background color as hex.
    #[arg(long)]
    background: Option<Color>,

    /// Gradient stop color; repeat for more stops. Switches the background to gradient mode.
    #[arg(long = "gradient")]
    gradient: Vec<Color>,

    /// Gradient direction, e.g. `to-right` or `bottom-left`.
    #[arg(long)]
    direction: Option<Compass>,

    /// Uniform padding; switches to the inset layout.
    #[arg(long)]
    padding: Option<f64>,

    /// Alignment commands applied in order (free layout only).
    #[arg(long, value_enum)]
    align: Vec<AlignArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlignArg {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

impl From<AlignArg> for Align {
    fn from(a: AlignArg) -> Self {
        match a {
            AlignArg::Left => Align::Left,
            AlignArg::Center => Align::HCenter,
            AlignArg::Right => Align::Right,
            AlignArg::Top => Align::Top,
            AlignArg::Middle => Align::VCenter,
            AlignArg::Bottom => Align::Bottom,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_defaults() -> anyhow::Result<()> {
    println!("{}", DecorationState::default().to_json_pretty()?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let state = match &args.state {
        Some(path) => DecorationState::from_path(path)?,
        None => DecorationState::default(),
    };
    let canvas_from_image = args.state.is_none() && args.width.is_none() && args.height.is_none();

    let mut editor = Editor::with_state(state);
    if let Some(w) = args.width {
        editor.dispatch(Update::SetCanvasWidth(w));
    }
    if let Some(h) = args.height {
        editor.dispatch(Update::SetCanvasHeight(h));
    }

    editor.open_path(&args.image);
    editor
        .wait_for_load()
        .with_context(|| format!("load image '{}'", args.image.display()))?;

    let image_size = editor
        .state()
        .foreground
        .as_ref()
        .map(|fg| (fg.image.width, fg.image.height));
    if canvas_from_image && let Some((w, h)) = image_size {
        let margin = 2 * AUTO_CANVAS_MARGIN;
        editor.dispatch(Update::SetCanvasWidth(f64::from(w.saturating_add(margin))));
        editor.dispatch(Update::SetCanvasHeight(f64::from(h.saturating_add(margin))));
        editor.dispatch(Update::Align(Align::HCenter));
        editor.dispatch(Update::Align(Align::VCenter));
    }

    for update in overrides(&args) {
        editor.dispatch(update);
    }

    let mut opts = ExportOptions::from_env();
    if let Some(r) = args.pixel_ratio.filter(|r| r.is_finite() && *r > 0.0) {
        opts.pixel_ratio = r;
    }
    let (dir, file_name) = split_out_path(&args.out)?;
    opts.file_name = file_name;

    match editor.export(&dir, &opts)? {
        Some(path) => eprintln!("wrote {}", path.display()),
        None => eprintln!("nothing to export"),
    }
    Ok(())
}

fn overrides(args: &RenderArgs) -> Vec<Update> {
    let mut out = Vec::new();
    if let Some(s) = args.scale {
        out.push(Update::SetExportScale(s));
    }
    if let Some(r) = args.radius {
        out.push(Update::SetCornerRadius(r));
    }
    if let Some(b) = args.shadow_blur {
        out.push(Update::SetShadowBlur(b));
    }
    if let Some(o) = args.shadow_opacity {
        out.push(Update::SetShadowOpacity(o));
    }
    if let Some(c) = args.shadow_color {
        out.push(Update::SetShadowColor(c));
    }
    if let Some(c) = args.background {
        out.push(Update::SetBackgroundColor(c));
        out.push(Update::SetBackgroundMode(BackgroundMode::Solid));
    }
    if !args.gradient.is_empty() {
        out.push(Update::SetBackgroundMode(BackgroundMode::Gradient));
        out.extend(args.gradient.iter().map(|&c| Update::AddGradientStop(c)));
    }
    if let Some(d) = args.direction {
        out.push(Update::SetGradientDirection(GradientDirection::Compass(d)));
    }
    if let Some(p) = args.padding {
        out.push(Update::SetPadding(Padding::uniform(p)));
    }
    out.extend(args.align.iter().map(|&a| Update::Align(a.into())));
    out
}

fn split_out_path(out: &Path) -> anyhow::Result<(PathBuf, String)> {
    let file_name = out
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("output path '{}' has no file name", out.display()))?
        .to_string();
    let dir = out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    Ok((dir, file_name))
}
