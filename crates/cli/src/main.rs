use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use claim_reports::bundle::BundleBuilder;
use claim_reports::model::{ClaimSupplement, PolicyDecoder, SupportReport, WeatherReport};
use claim_reports::{render, samples, RenderOptions, ReportDocument, ReportError, ReportKind};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Renders claim reports as PDF documents.
///
/// Records are read from JSON files. Without `--input` the built-in sample record of the
/// requested kind is used. Set `CLAIM_REPORTS_LOG=debug` to see what the renderer does.
#[derive(Parser)]
#[command(author, version, about = "Render claim supplement, weather and policy reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one report.
    Render {
        /// Report type.
        #[arg(long, value_enum)]
        kind: Kind,
        /// JSON record to render.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output path; defaults to the suggested file name in the current directory.
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Write every sample record as JSON and as a rendered PDF into a directory.
    Samples {
        #[arg(long, default_value = "samples")]
        out_dir: PathBuf,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Render all sample reports plus attachments and write them with a manifest.
    Bundle {
        #[arg(long, default_value = "bundle")]
        out_dir: PathBuf,
        /// Files added to the bundle as attachments.
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Brand mark drawn in headers and footers; overrides `CLAIM_REPORTS_BRAND`.
    #[arg(long)]
    brand: Option<String>,
    /// Generation date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Embed section bookmarks.
    #[cfg(feature = "bookmarks")]
    #[arg(long)]
    bookmarks: bool,
}

impl OptionArgs {
    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::from_env();
        if let Some(brand) = &self.brand {
            options = options.with_brand(brand.clone());
        }
        match self.date {
            Some(date) => options.with_generated_on(date),
            None => options,
        }
    }

    #[cfg(feature = "bookmarks")]
    fn finish(&self, document: ReportDocument) -> Result<ReportDocument, ReportError> {
        if self.bookmarks {
            document.with_bookmarks()
        } else {
            Ok(document)
        }
    }

    #[cfg(not(feature = "bookmarks"))]
    fn finish(&self, document: ReportDocument) -> Result<ReportDocument, ReportError> {
        Ok(document)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Supplement,
    Support,
    Weather,
    Decoder,
}

impl From<Kind> for ReportKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Supplement => ReportKind::Supplement,
            Kind::Support => ReportKind::Support,
            Kind::Weather => ReportKind::Weather,
            Kind::Decoder => ReportKind::Decoder,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CLAIM_REPORTS_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Render {
            kind,
            input,
            out,
            options,
        } => run_render(kind.into(), input.as_deref(), out, &options),
        Commands::Samples { out_dir, options } => run_samples(&out_dir, &options),
        Commands::Bundle {
            out_dir,
            attachments,
            options,
        } => run_bundle(&out_dir, &attachments, &options),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
    let record = serde_json::from_str(&text)
        .map_err(|err| format!("Invalid record in {}: {err}", path.display()))?;
    Ok(record)
}

fn render_sample(kind: ReportKind, options: &RenderOptions) -> Result<ReportDocument, ReportError> {
    match kind {
        ReportKind::Supplement => render(&samples::supplement(), options),
        ReportKind::Support => render(&samples::support(), options),
        ReportKind::Weather => render(&samples::weather(), options),
        ReportKind::Decoder => render(&samples::decoder(), options),
    }
}

fn render_file(kind: ReportKind, path: &Path, options: &RenderOptions) -> CliResult<ReportDocument> {
    let document = match kind {
        ReportKind::Supplement => render(&load::<ClaimSupplement>(path)?, options)?,
        ReportKind::Support => render(&load::<SupportReport>(path)?, options)?,
        ReportKind::Weather => render(&load::<WeatherReport>(path)?, options)?,
        ReportKind::Decoder => render(&load::<PolicyDecoder>(path)?, options)?,
    };
    Ok(document)
}

fn write(path: &Path, bytes: &[u8]) -> CliResult<()> {
    fs::write(path, bytes).map_err(|err| format!("Failed to write {}: {err}", path.display()))?;
    Ok(())
}

fn run_render(
    kind: ReportKind,
    input: Option<&Path>,
    out: Option<PathBuf>,
    args: &OptionArgs,
) -> CliResult<()> {
    let options = args.render_options();
    let document = match input {
        Some(path) => render_file(kind, path, &options)?,
        None => render_sample(kind, &options)?,
    };
    let document = args.finish(document)?;
    let out = out.unwrap_or_else(|| PathBuf::from(document.file_name()));
    write(&out, document.bytes())?;
    println!(
        "Wrote {} ({} page(s), {} bytes)",
        out.display(),
        document.page_count(),
        document.bytes().len()
    );
    Ok(())
}

fn run_samples(out_dir: &Path, args: &OptionArgs) -> CliResult<()> {
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;
    let records = [
        (ReportKind::Supplement, serde_json::to_string_pretty(&samples::supplement())?),
        (ReportKind::Support, serde_json::to_string_pretty(&samples::support())?),
        (ReportKind::Weather, serde_json::to_string_pretty(&samples::weather())?),
        (ReportKind::Decoder, serde_json::to_string_pretty(&samples::decoder())?),
    ];
    let options = args.render_options();
    for (kind, json) in records {
        write(&out_dir.join(format!("{}.json", kind.slug())), json.as_bytes())?;
        let document = args.finish(render_sample(kind, &options)?)?;
        let path = out_dir.join(document.file_name());
        write(&path, document.bytes())?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn run_bundle(out_dir: &Path, attachments: &[PathBuf], args: &OptionArgs) -> CliResult<()> {
    let options = args.render_options();
    let mut builder = BundleBuilder::new();
    for kind in ReportKind::ALL {
        let name = format!("{}.pdf", kind.slug());
        builder.add_document(name, || {
            render_sample(kind, &options).and_then(|document| args.finish(document))
        });
    }
    for path in attachments {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_owned());
        let bytes =
            fs::read(path).map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
        builder.add_attachment(name, "application/octet-stream", bytes);
    }

    let bundle = builder.build();
    if bundle.is_empty() {
        return Err("No bundle entry could be generated".into());
    }
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;
    for entry in bundle.entries() {
        write(&out_dir.join(&entry.name), &entry.bytes)?;
    }
    let manifest = bundle.manifest();
    write(&out_dir.join("MANIFEST.txt"), manifest.as_bytes())?;
    print!("{manifest}");
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
