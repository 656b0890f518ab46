//! Report the size of every file handed on the command line.
//!
//! Each path becomes one catalog document: UTF-8 contents load as a file,
//! anything else as an image. Sizes come from the built-in adapters installed
//! into the global registry, optionally selected by `--name`.

use anyhow::{Context, Result, bail};
use capadapt::settings::{self, ReportFormat};
use capadapt::{
    Catalog, FileObject, ImageObject, Resolver, TextCatalogView, component, global_registry,
    initialize_global, install_builtin_adapters,
};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    settings::init_logging();
    let cli = Cli::parse()?;
    let format = match cli.format {
        Some(format) => format,
        None => settings::report_format_from_env()?.unwrap_or_default(),
    };

    initialize_global(install_builtin_adapters);

    let mut catalog = Catalog::new();
    for path in &cli.paths {
        let contents =
            fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let document = match String::from_utf8(contents) {
            Ok(body) => component(FileObject::new(body)),
            Err(err) => component(ImageObject::new(err.into_bytes())),
        };
        catalog.add(document);
    }
    tracing::debug!(documents = catalog.len(), "catalog loaded");

    let registry = global_registry();
    let resolver = Resolver::new(&registry);
    let view = TextCatalogView::new(Arc::new(catalog));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        ReportFormat::Text => view.write_text(&resolver, &cli.name, &mut out)?,
        ReportFormat::Json => view.write_json(&resolver, &cli.name, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

struct Cli {
    format: Option<ReportFormat>,
    name: String,
    paths: Vec<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args: Vec<OsString> = env::args_os().skip(1).collect();
        args.reverse();

        let mut format = None;
        let mut name = String::new();
        let mut paths = Vec::new();

        while let Some(arg) = args.pop() {
            let flag = arg.to_string_lossy().into_owned();
            match flag.as_str() {
                "--json" => format = Some(ReportFormat::Json),
                "--text" => format = Some(ReportFormat::Text),
                "--format" => {
                    let value = next_value(&mut args, "--format")?;
                    format = Some(ReportFormat::parse(&value)?);
                }
                "--name" => name = next_value(&mut args, "--name")?,
                "--help" | "-h" => usage(0),
                _ if flag.starts_with("--") => {
                    eprintln!("Unknown argument: {flag}");
                    usage(1);
                }
                _ => paths.push(PathBuf::from(arg)),
            }
        }

        if paths.is_empty() {
            usage(1);
        }

        Ok(Self {
            format,
            name,
            paths,
        })
    }
}

fn next_value(args: &mut Vec<OsString>, flag: &str) -> Result<String> {
    let Some(value) = args.pop() else {
        bail!("{flag} requires a value");
    };
    value
        .into_string()
        .map_err(|_| anyhow::anyhow!("{flag} value is not valid UTF-8"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog-report [--text | --json | --format <text|json>] [--name <adapter>] <path>...\n\nOptions:\n  --json, --text   Output format (default from CAPADAPT_FORMAT, else text).\n  --name <adapter> Select named size adapters (e.g. 'lines' for files).\n\nEnvironment:\n  CAPADAPT_LOG     Tracing filter for diagnostics on stderr (default: warn)."
    );
    std::process::exit(code);
}
