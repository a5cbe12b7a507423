//! Render command handler
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use super::ensure_exists;
use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use specview_core::{EndpointFailure, FailurePolicy, PreviewGenerator, PreviewReport};
use specview_schemas::LoaderConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Result of rendering one input, as reported to the user
#[derive(Debug, Serialize)]
pub struct RenderOutcome {
    pub input: PathBuf,
    /// Page location, absent when printed to stdout or on failure
    pub output: Option<PathBuf>,
    pub failures: Vec<EndpointFailure>,
    pub error: Option<String>,
}

/// Handle the render command
#[instrument(skip_all, fields(inputs = args.inputs.len()))]
pub async fn handle_render(args: RenderArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("render_command", &format!("inputs: {}", args.inputs.len()));

    if args.inputs.len() > 1 && (args.save_to.is_some() || args.stdout) {
        return Err(Error::invalid_args(
            "--save-to and --stdout take exactly one input",
        ));
    }

    let generator = build_generator(&args, config);
    let out_dir = args.out_dir.clone().or_else(|| config.paths.output_dir.clone());

    let progress = output.spinner(&format!("Rendering {} document(s)...", args.inputs.len()));

    // One blocking task per input; results are awaited in input order
    let tasks: Vec<_> = args
        .inputs
        .iter()
        .cloned()
        .map(|input| {
            let generator = generator.clone();
            tokio::task::spawn_blocking(move || {
                ensure_exists(&input)?;
                generator.generate_file(&input).map_err(Error::from)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        results.push(task.await?);
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let total = results.len();
    let mut outcomes = Vec::with_capacity(total);
    let mut first_error = None;

    for (input, result) in args.inputs.iter().zip(results) {
        match result {
            Ok(report) => {
                let destination = destination(&args, out_dir.as_deref(), input);
                if let Some(path) = &destination {
                    write_page(path, &report)?;
                    info!(input = %input.display(), output = %path.display(), "Page written");
                } else {
                    output.write(&report.html)?;
                }
                outcomes.push(RenderOutcome {
                    input: input.clone(),
                    output: destination,
                    failures: report.failures,
                    error: None,
                });
            }
            Err(e) => {
                warn!(input = %input.display(), error = %e, "Document failed to render");
                outcomes.push(RenderOutcome {
                    input: input.clone(),
                    output: None,
                    failures: Vec::new(),
                    error: Some(e.to_string()),
                });
                first_error.get_or_insert(e);
            }
        }
    }

    if !args.stdout {
        report_outcomes(&outcomes, output)?;
    }
    debug!(elapsed_ms = timer.elapsed().as_millis() as u64, "Render finished");

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    match first_error {
        Some(e) if total == 1 => Err(e),
        Some(_) => Err(Error::PartialFailure { failed, total }),
        None => Ok(()),
    }
}

/// Preview generator configured from the config file and command-line flags
fn build_generator(args: &RenderArgs, config: &Config) -> PreviewGenerator {
    let mut options = config.render.preview_options();
    if args.isolate_failures {
        options.failure_policy = FailurePolicy::Isolate;
    }
    if args.no_banner {
        options.include_banner = false;
    }
    if let Some(url) = &args.resource_base_url {
        options.resource_base_url = url.clone();
    }

    let loader_config = LoaderConfig {
        validate_structure: config.render.validate_structure && !args.skip_validation,
        ..LoaderConfig::default()
    };

    PreviewGenerator::with_options(options).with_loader_config(loader_config)
}

/// Where the page for `input` goes; `None` means stdout
fn destination(args: &RenderArgs, out_dir: Option<&Path>, input: &Path) -> Option<PathBuf> {
    if args.stdout {
        return None;
    }
    if let Some(path) = &args.save_to {
        return Some(path.clone());
    }

    let file_name = page_file_name(input);
    Some(match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    })
}

/// `<stem>.html` for an input path
fn page_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "preview".to_string());
    format!("{}.html", stem)
}

fn write_page(path: &Path, report: &PreviewReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &report.html)?;
    Ok(())
}

fn report_outcomes(outcomes: &[RenderOutcome], output: &mut OutputWriter) -> Result<()> {
    if output.format() != crate::cli::OutputFormat::Human {
        return output.data(&outcomes);
    }

    for outcome in outcomes {
        match (&outcome.output, &outcome.error) {
            (_, Some(error)) => {
                output.error(&format!("✗ {}: {}", outcome.input.display(), error))?;
            }
            (Some(path), None) => {
                output.success(&format!("✓ {} → {}", outcome.input.display(), path.display()))?;
            }
            (None, None) => {}
        }
        for failure in &outcome.failures {
            output.warning(&format!("  {} replaced by an error notice: {}", failure.label(), failure.message))?;
        }
    }

    Ok(())
}
