//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use guidegen_core::{build_audit, build_path_index};
use guidegen_loader::{ContentDocument, ContentLoader, FsLoader};
use guidegen_render::{JinjaRenderer, TemplateRenderer};
use guidegen_search::{SearchDocument, build_search_index, live};
use guidegen_shared::{AppConfig, BuildContext, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// guidegen — generate guide indexes and search records from a content corpus.
#[derive(Parser)]
#[command(
    name = "guidegen",
    version,
    about = "Walk a guide corpus and generate audit reports, path listings, and search records.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Corpus root directory (overrides config).
    #[arg(long, global = true)]
    pub content: Option<PathBuf>,

    /// Content locale prefix (overrides config).
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the corpus-wide guide audit report.
    Audit {
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Template directory overriding the built-in templates.
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// Build the guide listing for a single path.
    PathIndex {
        /// Path id (the basename of its directory, e.g. `learn`).
        path_id: String,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Template directory overriding the built-in templates.
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// Collect live documents into flat search records as JSON.
    SearchIndex {
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "guidegen=info",
        1 => "guidegen=debug",
        _ => "guidegen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Audit { out, templates } => {
            let build = BuildOptions::resolve(&cli)?;
            cmd_audit(&build, out.as_deref(), templates.as_deref()).await
        }
        Command::PathIndex {
            path_id,
            out,
            templates,
        } => {
            let build = BuildOptions::resolve(&cli)?;
            cmd_path_index(&build, path_id, out.as_deref(), templates.as_deref()).await
        }
        Command::SearchIndex { out } => {
            let build = BuildOptions::resolve(&cli)?;
            cmd_search_index(&build, out.as_deref()).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Merged build options: CLI flags over config file over defaults.
struct BuildOptions {
    content_dir: PathBuf,
    locale: String,
    template_dir: Option<PathBuf>,
}

impl BuildOptions {
    fn resolve(cli: &Cli) -> Result<Self> {
        let config = load_config()?;

        let content_dir = cli
            .content
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.defaults.content_dir));

        if !content_dir.is_dir() {
            return Err(eyre!(
                "content directory '{}' does not exist",
                content_dir.display()
            ));
        }

        Ok(Self {
            content_dir,
            locale: cli
                .locale
                .clone()
                .unwrap_or_else(|| config.defaults.locale.clone()),
            template_dir: config.defaults.template_dir.as_ref().map(PathBuf::from),
        })
    }

    fn loader(&self) -> FsLoader {
        FsLoader::new(&self.content_dir)
    }

    fn renderer(&self, override_dir: Option<&Path>) -> Result<JinjaRenderer> {
        match override_dir.or(self.template_dir.as_deref()) {
            Some(dir) => Ok(JinjaRenderer::with_template_dir(dir)?),
            None => Ok(JinjaRenderer::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_audit(
    build: &BuildOptions,
    out: Option<&Path>,
    templates: Option<&Path>,
) -> Result<()> {
    let loader = build.loader();
    let renderer = build.renderer(templates)?;
    let cf = BuildContext::new(build.locale.clone());

    info!(content = %build.content_dir.display(), locale = %build.locale, "building audit report");

    let spinner = spinner("Resolving guide trees");
    let report = build_audit(&loader, &renderer, &cf, &build.locale).await?;
    spinner.finish_and_clear();

    write_output(out, &report.content)?;

    if let Some(path) = out {
        println!();
        println!("  Audit report written!");
        println!("  Guides: {}", report.records.len());
        println!("  File:   {}", path.display());
        println!();
    }

    Ok(())
}

async fn cmd_path_index(
    build: &BuildOptions,
    path_id: &str,
    out: Option<&Path>,
    templates: Option<&Path>,
) -> Result<()> {
    let loader = build.loader();
    let renderer = build.renderer(templates)?;
    let cf = BuildContext::new(format!("{}/path/{path_id}", build.locale));

    info!(path_id, "building path index");

    let spinner = spinner("Resolving guide tree");
    let report = build_path_index(&loader, &renderer, &cf, &build.locale).await?;
    spinner.finish_and_clear();

    write_output(out, &report.content)?;

    if out.is_some() {
        println!();
        println!("  Path listing written!");
        println!("  Path:   {}", report.path_id);
        println!("  Topics: {}", report.categories.len());
        println!();
    }

    Ok(())
}

async fn cmd_search_index(build: &BuildOptions, out: Option<&Path>) -> Result<()> {
    let loader = build.loader();

    info!(content = %build.content_dir.display(), "collecting search documents");

    let spinner = spinner("Collecting documents");
    let pattern = format!("{}/**/*.md", build.locale);
    let mut documents = Vec::new();

    for doc in loader.contents(&pattern).await? {
        let config = doc.config().await?;
        let body = doc.body().await?;
        let fallback = page_url(doc.key(), &build.locale);
        documents.push(SearchDocument::from_parts(fallback, config, body));
    }

    spinner.set_message("Building search records");
    let records = build_search_index(&documents, live::live_today(), &build.locale);
    spinner.finish_and_clear();

    let json = serde_json::to_string_pretty(&records)?;
    write_output(out, &json)?;

    if out.is_some() {
        println!();
        println!("  Search index written!");
        println!("  Documents: {}", documents.len());
        println!("  Indexed:   {}", records.len());
        println!();
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Derive a page URL from a corpus key when the document's config has none:
/// `en/posts/fast-load.md` → `/posts/fast-load/`.
fn page_url(key: &str, locale: &str) -> Option<String> {
    let rel = key.strip_prefix(&format!("{locale}/"))?;
    if rel == "index.md" {
        return Some("/".to_string());
    }
    let rel = rel
        .strip_suffix("/index.md")
        .or_else(|| rel.strip_suffix(".md"))?;
    Some(format!("/{rel}/"))
}

/// Write `content` to `path`, or to stdout when no path is given.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            info!(path = %path.display(), bytes = content.len(), "output written");
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid spinner template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}
