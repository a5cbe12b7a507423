//! Preview generation entry points
//!
//! [`PreviewGenerator`] runs the loading pipeline and renders every endpoint
//! into its own result. What happens to a failed endpoint is decided by
//! [`FailurePolicy`].
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::render::{render_endpoint, render_endpoint_error, render_page};
use crate::types::ApiDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use specview_schemas::{DocumentLoader, LoaderConfig};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// What to do when one endpoint cannot be rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole document
    #[default]
    Abort,
    /// Replace the endpoint's section with an error notice and carry on
    Isolate,
}

/// Page-level rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewOptions {
    /// Heading of the preview banner
    pub banner_title: String,
    /// Documentation site linked from the banner and the title block
    pub docs_url: String,
    /// Prefix of every endpoint's resource URL
    pub resource_base_url: String,
    pub include_banner: bool,
    pub failure_policy: FailurePolicy,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            banner_title: "Fortellis API Documentation Preview".to_string(),
            docs_url: "https://apidocs.fortellis.io".to_string(),
            resource_base_url: "https://api.fortellis.io".to_string(),
            include_banner: true,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

/// An endpoint that was replaced by an error notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointFailure {
    pub method: String,
    pub path: String,
    pub message: String,
}

impl EndpointFailure {
    pub fn label(&self) -> String {
        format!("{} {}", self.method.to_uppercase(), self.path)
    }
}

/// Rendered page plus the endpoints that failed under [`FailurePolicy::Isolate`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewReport {
    pub html: String,
    pub failures: Vec<EndpointFailure>,
}

impl PreviewReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Turns API description documents into HTML previews
#[derive(Debug, Clone, Default)]
pub struct PreviewGenerator {
    options: PreviewOptions,
    loader_config: LoaderConfig,
}

impl PreviewGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PreviewOptions) -> Self {
        Self {
            options,
            loader_config: LoaderConfig::default(),
        }
    }

    /// Replace the loading pipeline configuration
    pub fn with_loader_config(mut self, loader_config: LoaderConfig) -> Self {
        self.loader_config = loader_config;
        self
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    /// Render raw YAML or JSON text into an HTML page
    pub fn generate(&self, content: &str) -> Result<String> {
        self.generate_report(content).map(|report| report.html)
    }

    /// Render raw YAML or JSON text, keeping the failure list
    #[instrument(skip_all, fields(bytes = content.len()))]
    pub fn generate_report(&self, content: &str) -> Result<PreviewReport> {
        let mut loader = DocumentLoader::with_config(self.loader_config.clone());
        let value = loader.load_str(content)?;
        self.render_value(&value)
    }

    /// Render a document file; external references resolve relative to it
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn generate_file(&self, path: &Path) -> Result<PreviewReport> {
        let mut loader = DocumentLoader::with_config(self.loader_config.clone());
        let value = loader.load_file(path)?;
        self.render_value(&value)
    }

    /// Render an already normalized document value
    pub fn render_value(&self, value: &Value) -> Result<PreviewReport> {
        let document = ApiDocument::from_value(value)?;
        self.render_document(&document)
    }

    /// Render every endpoint and assemble the page
    #[instrument(skip_all, fields(title = %document.title, endpoints = document.endpoints.len()))]
    pub fn render_document(&self, document: &ApiDocument) -> Result<PreviewReport> {
        let base_path = document.base_path.as_deref();
        let mut sections = Vec::with_capacity(document.endpoints.len());
        let mut failures = Vec::new();

        for entry in &document.endpoints {
            let outcome = match entry {
                Ok(endpoint) => render_endpoint(endpoint, base_path, &self.options).map_err(|error| {
                    (endpoint.method.clone(), endpoint.path.clone(), error)
                }),
                Err(Error::MalformedEndpoint {
                    method,
                    path,
                    reason,
                }) => Err((
                    method.clone(),
                    path.clone(),
                    Error::malformed_endpoint(method.clone(), path.clone(), reason.clone()),
                )),
                Err(other) => Err((
                    String::new(),
                    String::new(),
                    Error::malformed_document(other.to_string()),
                )),
            };

            match outcome {
                Ok(section) => sections.push(section),
                Err((method, path, error)) => {
                    let failure = EndpointFailure {
                        method,
                        path,
                        message: error.to_string(),
                    };

                    match self.options.failure_policy {
                        FailurePolicy::Abort => return Err(Error::render(failure.label(), error)),
                        FailurePolicy::Isolate => {
                            warn!(endpoint = %failure.label(), error = %failure.message, "endpoint replaced by error notice");
                            sections.push(render_endpoint_error(&failure.label(), &failure.message));
                            failures.push(failure);
                        }
                    }
                }
            }
        }

        debug!(sections = sections.len(), "endpoint sections rendered");
        let html = render_page(document, &sections, &self.options);
        info!(bytes = html.len(), failures = failures.len(), "preview generated");

        Ok(PreviewReport { html, failures })
    }
}

/// Render raw YAML or JSON text into an HTML page with default options
pub fn generate_preview(document: &str) -> Result<String> {
    PreviewGenerator::new().generate(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document_with_broken_endpoint() -> Value {
        json!({
            "info": {"title": "Pets"},
            "paths": {
                "/pets": {"get": {"operationId": "listPets", "tags": ["pets"], "parameters": []}},
                "/owners": {"get": {"operationId": "listOwners", "parameters": []}},
                "/vets": {"get": {"operationId": "listVets", "tags": ["vets"], "parameters": []}}
            }
        })
    }

    #[test]
    fn test_abort_policy_surfaces_render_error() {
        let err = PreviewGenerator::new()
            .render_value(&document_with_broken_endpoint())
            .unwrap_err();

        match err {
            Error::Render { endpoint, source } => {
                assert_eq!(endpoint, "GET /owners");
                assert!(matches!(*source, Error::MalformedEndpoint { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_isolate_policy_keeps_other_endpoints() -> Result<()> {
        let generator = PreviewGenerator::with_options(PreviewOptions {
            failure_policy: FailurePolicy::Isolate,
            ..PreviewOptions::default()
        });

        let report = generator.render_value(&document_with_broken_endpoint())?;
        assert!(!report.is_complete());
        assert_eq!(
            report.failures,
            vec![EndpointFailure {
                method: "get".to_string(),
                path: "/owners".to_string(),
                message: "Malformed endpoint GET /owners: missing 'tags'".to_string(),
            }]
        );

        let pets = report.html.find("listPets").unwrap();
        let notice = report.html.find("<div class=\"endpoint-error\">").unwrap();
        let vets = report.html.find("listVets").unwrap();
        assert!(pets < notice && notice < vets);
        Ok(())
    }

    #[test]
    fn test_generate_rejects_invalid_structure() {
        let err = generate_preview("info:\n  title: T\npaths:\n  /a:\n    get:\n      responses: {}\n").unwrap_err();
        assert!(matches!(err, Error::Loader(specview_schemas::LoaderError::Invalid { .. })));
    }

    #[test]
    fn test_failure_policy_serde() {
        assert_eq!(serde_json::to_string(&FailurePolicy::Isolate).unwrap(), "\"isolate\"");
        let policy: FailurePolicy = serde_json::from_str("\"abort\"").unwrap();
        assert_eq!(policy, FailurePolicy::Abort);
    }
}
