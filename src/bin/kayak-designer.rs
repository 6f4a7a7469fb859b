use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use kayak_designer::{
    Designer, DesignerConfig, ExportFormat, FsImageLoader, ModelStatus, RegionCatalog,
};

/// Filesystem root that asset locations are resolved against.
const ASSETS_ROOT_ENV: &str = "KAYAK_DESIGNER_ASSETS_ROOT";

#[derive(Parser, Debug)]
#[command(name = "kayak-designer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a design to a PNG or PDF.
    Export(ExportArgs),
    /// Print the preview style projection of a design as JSON.
    Preview(PreviewArgs),
    /// List the regions of the configured catalog.
    Catalog(CatalogArgs),
    /// Convert a flat form-data JSON object into a design document.
    ImportForm(ImportFormArgs),
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Engine configuration JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory asset locations are relative to (overrides $KAYAK_DESIGNER_ASSETS_ROOT).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Design JSON to apply before rendering.
    #[arg(long)]
    design: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from the output extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ImportFormArgs {
    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Flat `{ "hull-color": "#D7D7D7", "hull-finish": "solid", ... }` object.
    #[arg(long)]
    form: PathBuf,

    /// Output design path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Pdf,
}

impl From<FormatChoice> for ExportFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Png => Self::Png,
            FormatChoice::Pdf => Self::Pdf,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Catalog(args) => cmd_catalog(args),
        Command::ImportForm(args) => cmd_import_form(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DesignerConfig> {
    match path {
        Some(p) => Ok(DesignerConfig::from_json_file(p)
            .with_context(|| format!("load config '{}'", p.display()))?),
        None => Ok(DesignerConfig::default()),
    }
}

fn assets_root(args: &SessionArgs) -> PathBuf {
    if let Some(root) = &args.assets_root {
        return root.clone();
    }
    if let Some(root) = std::env::var_os(ASSETS_ROOT_ENV) {
        return PathBuf::from(root);
    }
    args.config
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn open_session(args: &SessionArgs) -> anyhow::Result<Designer> {
    let config = load_config(args.config.as_deref())?;
    let loader = FsImageLoader::new(assets_root(args));
    let mut designer = Designer::new(config, Arc::new(loader))?;

    if let Some(path) = &args.design {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read design '{}'", path.display()))?;
        let design = designer
            .codec()
            .from_json(&json)
            .with_context(|| format!("parse design '{}'", path.display()))?;
        if designer.apply_design(&design)? == ModelStatus::ModelNotFound {
            eprintln!(
                "warning: model '{}' is no longer offered; using '{}'",
                design.model_name,
                designer.active_model()?
            );
        }
    }
    Ok(designer)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let format = match args.format {
        Some(f) => f.into(),
        None => args
            .out
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png")
            .parse::<ExportFormat>()?,
    };

    let designer = open_session(&args.session)?;
    let bytes = designer.export(format)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write {format} '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let designer = open_session(&args.session)?;
    let snapshot = designer.snapshot()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("serialize preview")?
    );
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let catalog: RegionCatalog = config.region_catalog();
    println!("catalog {:?} ({} regions)", catalog.version(), catalog.len());
    for r in catalog.iter() {
        println!(
            "{:<24} {:<6} {:<6} {:<10} masks={}{}",
            r.name,
            format!("{:?}", r.views).to_lowercase(),
            format!("{:?}", r.category).to_lowercase(),
            r.default_fill,
            r.mask_stems.join(","),
            if r.finishable { " finishable" } else { "" }
        );
    }
    let models: Vec<&str> = config.models.iter().collect();
    println!("models: {}", models.join(", "));
    Ok(())
}

fn cmd_import_form(args: ImportFormArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let f = std::fs::File::open(&args.form)
        .with_context(|| format!("open form data '{}'", args.form.display()))?;
    let form: BTreeMap<String, String> = serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| "parse form data JSON")?;

    let codec = kayak_designer::DesignCodec::new(config.region_catalog(), config.models.clone());
    let json = codec.to_json(&codec.from_form_data(&form)?)?;
    match args.out {
        Some(out) => {
            std::fs::write(&out, json)
                .with_context(|| format!("write design '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
