//! Validation command handler
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use super::ensure_exists;
use crate::cli::{OutputFormat, ValidateArgs};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use specview_core::ApiDocument;
use specview_schemas::{DocumentLoader, LoaderError, ValidationErrors};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Machine-readable validation outcome
#[derive(Debug, Serialize)]
struct ValidationReport {
    input: PathBuf,
    valid: bool,
    title: Option<String>,
    endpoints: usize,
    problems: ValidationErrors,
}

/// Handle the validate command
#[instrument(skip_all, fields(file = %args.input.display()))]
pub async fn handle_validate(args: ValidateArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.input.display()));
    output.info(&format!("Validating {}", args.input.display()))?;
    ensure_exists(&args.input)?;

    let mut loader = DocumentLoader::new();
    let report = match loader.load_file(&args.input) {
        Ok(value) => {
            let document = ApiDocument::from_value_strict(&value)?;
            info!(endpoints = document.endpoints.len(), "Document is valid");
            ValidationReport {
                input: args.input.clone(),
                valid: true,
                title: Some(document.title),
                endpoints: document.endpoints.len(),
                problems: ValidationErrors::new(),
            }
        }
        Err(LoaderError::Invalid { errors, .. }) => {
            warn!(problems = errors.len(), "Document failed structural validation");
            ValidationReport {
                input: args.input.clone(),
                valid: false,
                title: None,
                endpoints: 0,
                problems: errors,
            }
        }
        Err(other) => return Err(specview_core::Error::from(other).into()),
    };

    if output.format() == OutputFormat::Human {
        if report.valid {
            output.success(&format!(
                "✓ {} is valid ({} endpoint(s))",
                report.title.as_deref().unwrap_or_default(),
                report.endpoints
            ))?;
        } else {
            output.error(&format!("✗ {} failed validation", args.input.display()))?;
            output.validation_errors(&report.problems)?;
        }
    } else {
        output.data(&report)?;
    }

    if report.valid {
        Ok(())
    } else {
        Err(Error::InvalidDocument {
            path: args.input,
            count: report.problems.len(),
        })
    }
}
