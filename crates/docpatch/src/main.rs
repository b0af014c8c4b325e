use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use docpatch::config::Config;
use docpatch::coverage::CoverageReport;
use docpatch::decls::{DeclKind, DeclTable, correlate, extract_header};
use docpatch::discover::{check_root, find_headers};
use docpatch::filter::{FilterRule, RuleAction};
use docpatch::generate::OllamaGenerator;
use docpatch::patch::{SynthesisOptions, apply_patches, synthesize_patches};

#[derive(Parser, Debug)]
#[command(name = "docpatch", version, about)]
struct Args {
    /// Header file or directory tree to scan.
    path: PathBuf,

    /// Print documentation coverage statistics.
    #[arg(long)]
    stats: bool,

    /// Generate docstrings for undocumented declarations and write patches.
    #[arg(long)]
    generate_docs: bool,

    /// Print patches to stdout instead of writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Apply previously written patches with patch(1).
    #[arg(long)]
    apply_patches: bool,

    /// Directory for patch artifacts.
    #[arg(long, default_value = "patches")]
    patch_dir: PathBuf,

    /// Restrict documentation to the named function (repeatable).
    #[arg(long = "include-function-name", value_name = "NAME")]
    include_function_name: Vec<String>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<String>,
}

fn default_log_path() -> std::path::PathBuf {
    let dir = dirs_or_tmp();
    dir.join("docpatch.log")
}

fn dirs_or_tmp() -> std::path::PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = std::path::PathBuf::from(home).join(".docpatch");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

fn init_logging(args: &Args) {
    let stderr_filter = if args.verbose {
        EnvFilter::new("docpatch=debug")
    } else {
        EnvFilter::new("docpatch=info")
    };

    let file_filter = if args.verbose {
        EnvFilter::new("docpatch=debug,reqwest=info")
    } else {
        // Keep baseline run records without the heavy debug stream by default.
        EnvFilter::new("docpatch=info")
    };

    let log_path = args
        .log_file
        .as_ref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(std::path::Path::new(".")),
        log_path
            .file_name()
            .unwrap_or(std::ffi::OsStr::new("docpatch.log")),
    );

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .with_filter(file_filter);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    info!("docpatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> docpatch::Result<()> {
    let root = &args.path;
    check_root(root)?;

    let (config, config_path) = Config::load(root)?;
    if let Some(path) = &config_path {
        info!("Using config {}", path.display());
    }

    let mut rules = config.rule_set()?;
    for name in &args.include_function_name {
        rules.push(FilterRule::exact(RuleAction::Include, DeclKind::Function, name));
    }

    let headers = if root.is_file() { vec![root.clone()] } else { find_headers(root) };
    if headers.is_empty() {
        warn!("No header files under {}", root.display());
    }

    let mut table = DeclTable::new();
    for header in &headers {
        extract_header(&config.parser, header, &rules, &mut table);
    }
    info!("{} declaration(s) in {} header(s)", table.len(), headers.len());

    let map = correlate(&config.parser, &table, root);

    if args.stats {
        let report = CoverageReport::collect(&table, &map);
        println!("{report}");
    }

    if args.generate_docs {
        // Dry runs write nothing, audit captures included.
        let audit_dir = if args.dry_run { None } else { Some(config.generator.audit_dir.clone()) };
        let generator = OllamaGenerator::new(&config.generator, audit_dir)?;
        let options = SynthesisOptions {
            patch_dir: &args.patch_dir,
            dry_run: args.dry_run,
            warn_out_of_range: config.synthesis.warn_out_of_range,
        };
        let summary = synthesize_patches(&table, &map, &generator, &options)?;
        info!(
            "{} patch(es), {} insertion(s), {} skipped",
            summary.patches, summary.insertions, summary.skipped
        );
    }

    if args.apply_patches {
        apply_patches(&args.patch_dir);
    }

    Ok(())
}
