//! `cmsite` CLI: inspect how the site sees its CMS.
//!
//! Resolves routes offline, fetches and resolves pages, lists the sections
//! a page would render, and probes the content API endpoints.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use cmsite_core::probe::DEFAULT_PROBE_DELAY;
use cmsite_core::{
    ApiConfig, ApiEnvironment, ContentRequest, ContentSource, DEBUG_ENDPOINTS, HttpContentFetcher,
    Location, PageKind, PageViewModel, Plan, ProbeOutcome, ProbeReport, RouteSelector, compose, plan,
    probe_all, resolve_page, resolve_route,
};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ── CLI structure ────────────────────────────────────────────────────

/// cmsite: CMS-driven landing pages.
#[derive(Parser)]
#[command(
    name = "cmsite",
    version,
    about = "cmsite CLI: resolve routes, inspect CMS pages, probe the content API",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         CMSITE_ENV            development or production (default: production)\n  \
         CMSITE_API_BASE       Content API base URL or path\n  \
         CMSITE_FRONTEND_URL   Value of the X-Frontend-Url header\n  \
         CMSITE_DEV_ORIGIN     Origin joined to relative API bases\n\n\
         {DIM}Examples:{RESET}\n  \
         cmsite route /features/pricing\n  \
         cmsite route / --hash '#debug-landing'\n  \
         cmsite resolve --slug sales-marketing\n  \
         cmsite sections --file page.json\n  \
         cmsite probe --endpoint /mypages/"
    ),
)]
struct Cli {
    /// Deployment environment selecting default API base and frontend origin.
    #[arg(long = "env", env = "CMSITE_ENV", default_value = "production")]
    environment: ApiEnvironment,

    /// Content API base, absolute or relative to the dev origin.
    #[arg(long, env = "CMSITE_API_BASE")]
    api_base: Option<String>,

    /// Frontend origin sent as `X-Frontend-Url`.
    #[arg(long, env = "CMSITE_FRONTEND_URL")]
    frontend_url: Option<String>,

    /// Origin that relative API bases are joined to.
    #[arg(long, env = "CMSITE_DEV_ORIGIN")]
    dev_origin: Option<String>,

    /// Print machine-readable JSON instead of formatted output.
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which view a path and hash resolve to. Never touches the network.
    Route {
        /// Location path, e.g. `/features/pricing`.
        path: String,
        /// Hash fragment, with or without the leading `#`.
        #[arg(long, default_value = "")]
        hash: String,
    },
    /// Fetch a page and print its resolved view model.
    Resolve {
        #[command(flatten)]
        page: PageArgs,
    },
    /// List the sections a page renders, in order.
    Sections {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Probe the content API listing endpoints.
    Probe {
        /// Probe a single endpoint instead of all of them.
        #[arg(long)]
        endpoint: Option<String>,
        /// Pause between probes, in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

#[derive(clap::Args)]
struct PageArgs {
    /// Features page slug. Without it the landing page is used.
    #[arg(long)]
    slug: Option<String>,
    /// Read the raw payload from a file (`-` for stdin) instead of the API.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl PageArgs {
    fn request(&self) -> ContentRequest {
        match &self.slug {
            Some(slug) => ContentRequest::Features { slug: slug.clone() },
            None => ContentRequest::Landing,
        }
    }
}

impl Cli {
    fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::for_environment(self.environment);
        if let Some(base) = &self.api_base {
            config.base.clone_from(base);
        }
        if let Some(url) = &self.frontend_url {
            config.frontend_url.clone_from(url);
        }
        if let Some(origin) = &self.dev_origin {
            config.dev_origin.clone_from(origin);
        }
        config
    }
}

// ── Pretty output helpers ────────────────────────────────────────────

fn header(icon: &str, title: &str) {
    println!("{BOLD}{CYAN}{icon} {title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<20}{RESET} {WHITE}{value}{RESET}");
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("failed to format JSON: {e}"),
    }
}

fn print_probe_report(report: &ProbeReport) {
    match &report.outcome {
        ProbeOutcome::Response { status, .. } if report.is_success() => {
            println!("  {GREEN}{BOLD}✓{RESET} {:<20} {GREEN}{status}{RESET}", report.endpoint);
        }
        ProbeOutcome::Response { status, .. } => {
            println!("  {YELLOW}{BOLD}⚠{RESET} {:<20} {YELLOW}{status}{RESET}", report.endpoint);
        }
        ProbeOutcome::Error { message } => {
            println!("  {RED}{BOLD}✗{RESET} {:<20} {RED}{message}{RESET}", report.endpoint);
        }
    }
    println!("    {DIM}{} at {}{RESET}", report.url, report.timestamp.to_rfc3339());
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.api_config();
    match cli.command {
        Commands::Route { path, hash } => {
            cmd_route(&config, &path, &hash, cli.json);
            Ok(())
        }
        Commands::Resolve { page } => cmd_resolve(config, &page, cli.json).await,
        Commands::Sections { page } => cmd_sections(config, &page, cli.json).await,
        Commands::Probe { endpoint, delay_ms } => {
            let delay = delay_ms.map_or(DEFAULT_PROBE_DELAY, Duration::from_millis);
            cmd_probe(config, endpoint.as_deref(), delay, cli.json).await
        }
    }
}

// ── route ────────────────────────────────────────────────────────────

fn cmd_route(config: &ApiConfig, path: &str, hash: &str, json: bool) {
    let hash = if hash.is_empty() || hash.starts_with('#') {
        hash.to_owned()
    } else {
        format!("#{hash}")
    };
    let location = Location::new(path, hash);
    let selector = resolve_route(&location);
    let resource = match plan(&selector) {
        Plan::Content(request) => Some(request.resource_path()),
        Plan::Static(_) => None,
    };

    if json {
        let mut value = json!(selector);
        value["resource"] = json!(resource);
        value["url"] = json!(resource.as_deref().map(|r| config.endpoint_url(r)));
        print_json(&value);
        return;
    }

    println!();
    header("🧭", "Route");
    kv_line("Path", &location.path);
    if !location.hash.is_empty() {
        kv_line("Hash", &location.hash);
    }
    kv_line("View", selector.name());
    if let RouteSelector::Features { slug } = &selector {
        kv_line("Slug", slug);
    }
    match resource {
        Some(resource) => kv_line("Fetches", &config.endpoint_url(&resource)),
        None => kv_line("Fetches", "nothing (static view)"),
    }
    println!();
}

// ── resolve / sections ───────────────────────────────────────────────

async fn load_raw(config: ApiConfig, page: &PageArgs) -> Result<Value> {
    let Some(file) = &page.file else {
        let request = page.request();
        let fetcher = HttpContentFetcher::new(config).context("failed to build content fetcher")?;
        let url = fetcher.config().endpoint_url(&request.resource_path());
        return fetcher
            .fetch(&request)
            .await
            .with_context(|| format!("failed to load {url}"));
    };

    let text = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("payload file not found: {}", file.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", file.display()))
}

async fn load_model(config: ApiConfig, page: &PageArgs) -> Result<PageViewModel> {
    let raw = load_raw(config, page).await?;
    resolve_page(&raw).context("payload is not a page")
}

async fn cmd_resolve(config: ApiConfig, page: &PageArgs, json: bool) -> Result<()> {
    let model = load_model(config, page).await?;
    let value = serde_json::to_value(&model).context("failed to serialize view model")?;

    if !json {
        println!();
        header("📄", "Resolved page");
        kv_line("Title", &model.identity.title);
        kv_line("Background", &model.theme.background_color);
        println!();
    }
    print_json(&value);
    Ok(())
}

async fn cmd_sections(config: ApiConfig, page: &PageArgs, json: bool) -> Result<()> {
    let model = load_model(config, page).await?;
    let kind = PageKind::from(&page.request());
    let layout = compose(kind, &model);

    if json {
        let slots: Vec<Value> = layout
            .sections
            .iter()
            .map(|slot| json!({ "key": slot.key, "reveal": slot.reveal }))
            .collect();
        print_json(&json!({ "meta": layout.meta, "sections": slots }));
        return Ok(());
    }

    println!();
    header("🧱", "Sections");
    kv_line("Title", &layout.meta.title);
    println!();
    for (n, slot) in layout.sections.iter().enumerate() {
        let reveal = slot.reveal.unwrap_or("-");
        println!("  {DIM}{:>2}.{RESET} {:<18} {DIM}{reveal}{RESET}", n + 1, slot.key.as_str());
    }
    println!();
    Ok(())
}

// ── probe ────────────────────────────────────────────────────────────

async fn cmd_probe(
    config: ApiConfig,
    endpoint: Option<&str>,
    delay: Duration,
    json: bool,
) -> Result<()> {
    if let Some(endpoint) = endpoint {
        if !DEBUG_ENDPOINTS.contains(&endpoint) {
            bail!(
                "unknown endpoint '{endpoint}', expected one of {}",
                DEBUG_ENDPOINTS.join(", ")
            );
        }
    }

    let fetcher = HttpContentFetcher::new(config).context("failed to build content fetcher")?;
    let reports = match endpoint {
        Some(endpoint) => vec![fetcher.probe(endpoint).await],
        None => probe_all(&fetcher, delay).await,
    };

    if json {
        print_json(&serde_json::to_value(&reports).context("failed to serialize reports")?);
    } else {
        println!();
        header("🔎", "Endpoint probe");
        kv_line("API base", &fetcher.config().base);
        println!();
        for report in &reports {
            print_probe_report(report);
        }
        println!();
    }

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        bail!("{failed} of {} endpoints failed", reports.len());
    }
    Ok(())
}
