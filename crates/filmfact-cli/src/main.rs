//! Filmfact CLI - drive the generation engine from the command line.

mod cli;
mod profile;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use clap::Parser;
use filmfact_domain::{EntityKind, RecordId};
use filmfact_engine::{render_manifest, Engine, GenerationConfig, ProgressObserver, RunReport};
use filmfact_io::{FileFactSink, JsonRecordSource};
use filmfact_model::Model;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, GenerateArgs, ManifestArgs};
use profile::RunProfile;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(args).await,
        Command::Manifest(args) => manifest(args),
    }
}

/// Build the model and config from profile plus flags (flags win)
fn configure(
    profile_path: Option<&Path>,
    quota: Option<usize>,
    root: Option<&str>,
    random: bool,
    sub_kinds: &[String],
    links: &[String],
) -> Result<(Model, GenerationConfig)> {
    let mut model = Model::standard();
    let mut config = GenerationConfig::default();

    if let Some(path) = profile_path {
        let run_profile = RunProfile::load(path)?;
        run_profile.apply_config(&mut config)?;
        run_profile.apply_model(&mut model)?;
    }
    if let Some(quota) = quota {
        config.quota = quota;
    }
    if let Some(root) = root {
        config.root =
            EntityKind::parse(root).with_context(|| format!("unknown entity kind '{}'", root))?;
    }
    if random {
        config.random = true;
    }
    for flag in sub_kinds {
        profile::apply_sub_kind_flag(&mut model, flag)?;
    }
    for flag in links {
        profile::apply_link_flag(&mut model, flag)?;
    }
    Ok((model, config))
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let (model, config) = configure(
        args.profile.as_deref(),
        args.quota,
        args.root.as_deref(),
        args.random,
        &args.sub_kinds,
        &args.links,
    )?;

    let mut source = JsonRecordSource::open(&args.snapshot)
        .with_context(|| format!("cannot open snapshot {}", args.snapshot.display()))?;
    let mut sink = FileFactSink::create(&args.output)
        .with_context(|| format!("cannot create output {}", args.output.display()))?;

    if !args.no_manifest {
        let path = manifest_path(&args.output);
        fs::write(&path, render_manifest(&model, config.root))
            .with_context(|| format!("cannot write manifest {}", path.display()))?;
        info!(path = %path.display(), "wrote run manifest");
    }

    let root = config.root;
    let engine = Engine::new(model, config);
    let stop = engine.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing current record");
            stop.store(true, Ordering::Relaxed);
        }
    });

    info!(root = %root, quota = engine.config().quota, "starting generation");
    let report = tokio::task::spawn_blocking(move || {
        let mut progress = LogProgress;
        let report = engine.run(&mut source, &mut sink, &mut progress)?;
        sink.flush().map_err(|e| {
            filmfact_engine::EngineError::Sink(e.to_string())
        })?;
        Ok::<RunReport, filmfact_engine::EngineError>(report)
    })
    .await
    .context("engine task panicked")??;

    summarize(&report);
    Ok(())
}

fn manifest(args: ManifestArgs) -> Result<()> {
    let (model, config) = configure(
        args.profile.as_deref(),
        None,
        args.root.as_deref(),
        false,
        &args.sub_kinds,
        &args.links,
    )?;
    print!("{}", render_manifest(&model, config.root));
    Ok(())
}

/// Manifest lands next to the fact file as `<output>.manifest.txt`
fn manifest_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".manifest.txt");
    output.with_file_name(name)
}

fn summarize(report: &RunReport) {
    for (kind, accepted, rejected) in &report.per_kind {
        if *accepted > 0 || *rejected > 0 {
            info!(kind = %kind, accepted, rejected, "kind totals");
        }
    }
    if report.cancelled {
        warn!(total = report.total_accepted(), "run cancelled, output is partial");
    } else {
        info!(total = report.total_accepted(), "run complete");
    }
}

/// Logs each accepted record as it reaches the sink
struct LogProgress;

impl ProgressObserver for LogProgress {
    fn record_accepted(&mut self, kind: EntityKind, id: RecordId, total_accepted: usize) {
        info!(kind = %kind, id = %id, total_accepted, "accepted");
    }
}
