//! Endpoint sections
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::generator::PreviewOptions;
use crate::render::{ParameterSectionBuilder, ResponseSectionBuilder};
use crate::types::EndpointDescriptor;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Join a resource base URL, the document `basePath` and an endpoint path.
///
/// Slashes at each join collapse to one.
pub fn resource_url(base_url: &str, base_path: Option<&str>, path: &str) -> String {
    let mut url = base_url.trim_end_matches('/').to_string();
    if let Some(base_path) = base_path.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        url.push('/');
        url.push_str(base_path);
    }
    url.push('/');
    url.push_str(path.trim_start_matches('/'));
    url
}

/// Render one endpoint: header, resource details, request and response
pub fn render_endpoint(
    endpoint: &EndpointDescriptor,
    base_path: Option<&str>,
    options: &PreviewOptions,
) -> Result<String> {
    let request = ParameterSectionBuilder::render(endpoint)?;
    let response = ResponseSectionBuilder::render(endpoint)?;

    let method = endpoint.method.to_lowercase();
    let url = resource_url(&options.resource_base_url, base_path, &endpoint.path);

    let mut pieces = vec![
        "<div class=\"spec-endpoint\">".to_string(),
        "  <div class=\"spec-endpoint__header\">".to_string(),
        "    <h2 class=\"spec-endpoint__header-title\">".to_string(),
        format!(
            "      <span class=\"method {}\">{}</span> - {}",
            encode_double_quoted_attribute(&method),
            encode_text(&method.to_uppercase()),
            encode_text(&endpoint.operation_id)
        ),
        "    </h2>".to_string(),
        format!(
            "    <p class=\"spec-endpoint__header-description\">{}</p>",
            endpoint.description
        ),
        "  </div>".to_string(),
        "  <div class=\"spec-endpoint__body\">".to_string(),
        "    <h3>Resource URL</h3>".to_string(),
        "    <div class=\"resource-url\">".to_string(),
        format!("      <code>{}</code>", encode_text(&url)),
        "    </div>".to_string(),
        "    <h3>Resource Details</h3>".to_string(),
    ];

    if let Some(schemes) = &endpoint.schemes {
        pieces.push(resource_detail("Security", &encode_text(&schemes.join(", "))));
    }
    pieces.push(resource_detail("Category", &encode_text(&endpoint.tags.join(", "))));

    pieces.push("    <h2>Request</h2>".to_string());
    if !request.is_empty() {
        pieces.push(request);
    }
    pieces.push("    <h2>Response</h2>".to_string());
    if !response.is_empty() {
        pieces.push(response);
    }
    pieces.push("  </div>".to_string());
    pieces.push("</div>".to_string());

    Ok(pieces.join("\n"))
}

fn resource_detail(title: &str, content: &str) -> String {
    format!(
        "    <div class=\"resource-detail\">\n      <div class=\"resource-detail__title\">{}</div>\n      <div class=\"resource-detail__content\">{}</div>\n    </div>",
        title, content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_resource_url_collapses_slashes() {
        assert_eq!(
            resource_url("https://api.example.com", Some("/pet-store/v1"), "/pets/{id}"),
            "https://api.example.com/pet-store/v1/pets/{id}"
        );
        assert_eq!(
            resource_url("https://api.example.com/", Some("/v1/"), "//pets"),
            "https://api.example.com/v1/pets"
        );
        assert_eq!(resource_url("https://api.example.com", None, "/pets"), "https://api.example.com/pets");
        assert_eq!(resource_url("https://api.example.com", Some("/"), "/"), "https://api.example.com/");
    }

    #[test]
    fn test_endpoint_section() -> Result<()> {
        let endpoint = EndpointDescriptor::from_operation(
            "/pets/{id}",
            "delete",
            &json!({
                "operationId": "deletePet",
                "description": "Removes a pet",
                "tags": ["pets", "admin"],
                "parameters": [{"name": "id", "in": "path", "type": "string", "required": true}],
                "responses": {"204": {"description": "Deleted"}}
            }),
            Some(&["https".to_string()]),
        )?;

        let html = render_endpoint(&endpoint, Some("/store"), &PreviewOptions::default())?;

        assert!(html.starts_with("<div class=\"spec-endpoint\">"));
        assert!(html.ends_with("</div>"));
        assert!(html.contains("<span class=\"method delete\">DELETE</span> - deletePet"));
        assert!(html.contains("<p class=\"spec-endpoint__header-description\">Removes a pet</p>"));
        assert!(html.contains("<code>https://api.fortellis.io/store/pets/{id}</code>"));
        assert!(html.contains("<div class=\"resource-detail__title\">Security</div>\n      <div class=\"resource-detail__content\">https</div>"));
        assert!(html.contains("<div class=\"resource-detail__content\">pets, admin</div>"));

        let request = html.find("<h2>Request</h2>").unwrap();
        let path_params = html.find("<h3>Path Parameters</h3>").unwrap();
        let response = html.find("<h2>Response</h2>").unwrap();
        let codes = html.find("<h3>Response Code Details</h3>").unwrap();
        assert!(request < path_params && path_params < response && response < codes);
        Ok(())
    }

    #[test]
    fn test_security_only_with_schemes() -> Result<()> {
        let endpoint = EndpointDescriptor::from_operation(
            "/pets",
            "get",
            &json!({"tags": [], "parameters": []}),
            None,
        )?;

        let html = render_endpoint(&endpoint, None, &PreviewOptions::default())?;
        assert!(!html.contains("Security"));
        assert!(html.contains("<h2>Request</h2>\n    <h2>Response</h2>"));
        assert!(html.contains("<span class=\"method get\">GET</span> - \n    </h2>"));
        Ok(())
    }
}
