//! `shoshiy build` renders the site into `dist/` and compiles the wasm
//! bundle next to it; `shoshiy serve` does the same and serves the result.

use std::path::{Path, PathBuf};
use std::process::Command as Process;
use std::time::SystemTime;

use anyhow::{bail, Context as _};
use clap::{Args, Parser, Subcommand};
use shoshiy_site::{logging, site, SiteConfig};

#[derive(Parser, Debug)]
#[command(name = "shoshiy", version)]
struct Cli {
    /// `tracing` filter directives, e.g. `shoshiy_site=debug`. Defaults to
    /// `RUST_LOG`, then `info`.
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the static site and build the wasm bundle.
    Build(BuildArgs),
    /// Build, then serve the output directory over HTTP.
    Serve {
        #[command(flatten)]
        build: BuildArgs,

        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Output directory.
    #[arg(long, default_value = "dist")]
    out: PathBuf,

    /// JSON file overriding the built-in site configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sitemap `lastmod` as RFC 3339 (defaults to now).
    #[arg(long, value_parser = humantime::parse_rfc3339)]
    lastmod: Option<SystemTime>,

    /// Directory of hand-written assets copied verbatim.
    #[arg(long = "static", default_value = "static")]
    static_dir: PathBuf,

    /// Skip `wasm-pack`, e.g. when only the markup changed.
    #[arg(long)]
    skip_wasm: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_host(cli.log.as_deref())?;
    match cli.cmd {
        Command::Build(args) => cmd_build(&args),
        Command::Serve { build, port } => {
            cmd_build(&build)?;
            cmd_serve(&build.out, port)
        }
    }
}

fn cmd_build(args: &BuildArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    let lastmod = args.lastmod.unwrap_or_else(SystemTime::now);

    let files = site::render_site(&config, lastmod).context("render site")?;
    site::write_site(&args.out, &files)
        .with_context(|| format!("write site to '{}'", args.out.display()))?;
    site::copy_static(&args.static_dir, &args.out).context("copy static assets")?;

    if args.skip_wasm {
        tracing::info!("skipping wasm build");
        return Ok(());
    }
    build_wasm(&args.out.join("pkg"))
}

fn build_wasm(pkg_dir: &Path) -> anyhow::Result<()> {
    tracing::info!(out = %pkg_dir.display(), "building wasm bundle");
    let status = Process::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir"])
        .arg(pkg_dir)
        .status()
        .context("run wasm-pack (https://rustwasm.github.io/wasm-pack/)")?;
    if !status.success() {
        bail!("wasm-pack exited with {status}");
    }
    Ok(())
}

fn cmd_serve(dir: &Path, port: u16) -> anyhow::Result<()> {
    tracing::info!(url = %format!("http://127.0.0.1:{port}"), dir = %dir.display(), "serving");
    let status = Process::new("python3")
        .args(["-m", "http.server"])
        .arg(port.to_string())
        .arg("--directory")
        .arg(dir)
        .status()
        .context("start python3 http.server")?;
    if !status.success() {
        bail!("http server exited with {status}");
    }
    Ok(())
}
