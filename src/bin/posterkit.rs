use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "posterkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one poster as a PNG.
    Compose(ComposeArgs),
    /// Compose a batch of candidate layouts into a directory.
    Layouts(LayoutsArgs),
    /// Print the theme table as JSON.
    Themes(ThemesArgs),
    /// Print the text-to-image prompt for a theme and product.
    Prompt(PromptArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Background-removed product image (PNG/JPEG/WebP...).
    #[arg(long)]
    product: PathBuf,

    /// Logo image (raster or SVG).
    #[arg(long)]
    logo: PathBuf,

    /// Theme name; unknown names use Minimal.
    #[arg(long, default_value = "Minimal")]
    theme: String,

    /// Seed for palette and blob randomness; omitted means a fresh seed per run.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON theme table replacing the built-in one.
    #[arg(long)]
    themes: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Logo corner.
    #[arg(long, value_enum, default_value_t = LogoCorner::TopLeft)]
    logo_position: LogoCorner,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Print which font was resolved and the SHA-256 of its bytes.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct LayoutsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Directory receiving `layout-<i>.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ThemesArgs {
    /// JSON theme table to validate and print instead of the built-in one.
    #[arg(long)]
    themes: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PromptArgs {
    /// Theme name; unknown names use Minimal.
    #[arg(long, default_value = "Minimal")]
    theme: String,

    /// Product name embedded in the prompt.
    #[arg(long)]
    product_name: String,

    /// 1-based variation number appended to the prompt.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    variation: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogoCorner {
    TopLeft,
    TopRight,
}

impl From<LogoCorner> for posterkit::LayoutVariant {
    fn from(c: LogoCorner) -> Self {
        match c {
            LogoCorner::TopLeft => Self::TOP_LEFT,
            LogoCorner::TopRight => Self::TOP_RIGHT,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Layouts(args) => cmd_layouts(args),
        Command::Themes(args) => cmd_themes(args),
        Command::Prompt(args) => cmd_prompt(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<posterkit::ThemeRegistry> {
    let Some(path) = path else {
        return Ok(posterkit::ThemeRegistry::builtin());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read theme table '{}'", path.display()))?;
    posterkit::ThemeRegistry::from_json(&json)
        .with_context(|| format!("load theme table '{}'", path.display()))
}

struct Inputs {
    product: posterkit::RasterImage,
    logo: posterkit::RasterImage,
    product_name: String,
}

fn read_inputs(args: &InputArgs, settings: &posterkit::ComposerSettings) -> anyhow::Result<Inputs> {
    let product_bytes = std::fs::read(&args.product)
        .with_context(|| format!("read product '{}'", args.product.display()))?;
    let product = posterkit::decode_image(&product_bytes)
        .with_context(|| format!("decode product '{}'", args.product.display()))?;

    let logo_bytes = std::fs::read(&args.logo)
        .with_context(|| format!("read logo '{}'", args.logo.display()))?;
    let logo = posterkit::decode_logo(&logo_bytes, settings.logo_max)
        .with_context(|| format!("decode logo '{}'", args.logo.display()))?;

    let file_name = args
        .product
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Inputs {
        product,
        logo,
        product_name: posterkit::product_name_from_filename(&file_name),
    })
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let registry = load_registry(args.input.themes.as_deref())?;
    let settings = posterkit::ComposerSettings::from_env();
    let inputs = read_inputs(&args.input, &settings)?;
    let composer = posterkit::PosterComposer::new(&registry, settings)?;

    if args.dump_fonts {
        dump_font_diagnostics(composer.font());
    }

    let mut rng = make_rng(args.input.seed);
    let result = composer.compose(
        &inputs.product,
        &inputs.logo,
        &args.input.theme,
        args.logo_position.into(),
        &mut rng,
    )?;

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, &result.image_bytes)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[derive(serde::Serialize)]
struct LayoutSummary<'a> {
    file: String,
    #[serde(flatten)]
    layout: &'a posterkit::GeneratedLayout,
}

fn cmd_layouts(args: LayoutsArgs) -> anyhow::Result<()> {
    let registry = load_registry(args.input.themes.as_deref())?;
    let settings = posterkit::ComposerSettings::from_env();
    let inputs = read_inputs(&args.input, &settings)?;
    let composer = posterkit::PosterComposer::new(&registry, settings)?;

    let generation = posterkit::GenerationSettings::from_env();
    if let Some(url) = generation.remote_endpoint() {
        tracing::warn!(url, "remote generation requested but no backend is linked; composing locally");
    }
    let strategy = posterkit::GenerationStrategy::select(&generation, None);

    let mut rng = make_rng(args.input.seed);
    let request = posterkit::LayoutRequest {
        product: &inputs.product,
        logo: &inputs.logo,
        theme: &args.input.theme,
        product_name: &inputs.product_name,
    };
    let layouts = posterkit::generate_layouts(&composer, strategy, request, &mut rng)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let mut summary = Vec::with_capacity(layouts.len());
    for (i, layout) in layouts.iter().enumerate() {
        let name = format!("layout-{i}.{}", layout.outcome.extension());
        let path = args.out_dir.join(&name);
        std::fs::write(&path, layout.outcome.image_bytes())
            .with_context(|| format!("write layout '{}'", path.display()))?;
        summary.push(LayoutSummary { file: name, layout });
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    eprintln!("wrote {} layouts to {}", layouts.len(), args.out_dir.display());
    Ok(())
}

fn cmd_themes(args: ThemesArgs) -> anyhow::Result<()> {
    let registry = load_registry(args.themes.as_deref())?;
    println!("{}", registry.to_json_pretty()?);
    Ok(())
}

fn cmd_prompt(args: PromptArgs) -> anyhow::Result<()> {
    let registry = posterkit::ThemeRegistry::shared();
    let prompt = match args.variation {
        Some(v) => posterkit::variation_prompt(
            registry,
            &args.theme,
            &args.product_name,
            (v - 1) as usize,
        ),
        None => posterkit::build_poster_prompt(registry, &args.theme, &args.product_name),
    };
    println!("{prompt}");
    Ok(())
}

fn dump_font_diagnostics(font: &posterkit::FontSource) {
    eprintln!("text font diagnostics:");
    eprintln!("  source: {}", font.describe());
    match font.font_bytes() {
        Some(bytes) => eprintln!("  sha256: {}", sha256_hex(bytes)),
        None => eprintln!("  sha256: -"),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
