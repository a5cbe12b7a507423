//! Request section: parameter tables and body structure
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::render::{example_block, PropertyTreeRenderer, TableRenderer};
use crate::types::{EndpointDescriptor, ParameterLocation};
use html_escape::encode_text;

const PARAMETER_HEADINGS: [&str; 4] = ["Parameter", "Type", "Description", "Required"];

const TABLE_SECTIONS: [(ParameterLocation, &str); 3] = [
    (ParameterLocation::Path, "Path Parameters"),
    (ParameterLocation::Query, "Query Parameters"),
    (ParameterLocation::Header, "Header Parameters"),
];

/// Builds the request half of an endpoint section
#[derive(Debug, Default, Clone, Copy)]
pub struct ParameterSectionBuilder;

impl ParameterSectionBuilder {
    pub fn render(endpoint: &EndpointDescriptor) -> Result<String> {
        let mut blocks = Vec::new();

        for (location, title) in &TABLE_SECTIONS {
            let rows: Vec<Vec<String>> = endpoint
                .parameters_in(location)
                .map(|param| {
                    vec![
                        encode_text(&param.name).into_owned(),
                        encode_text(&param.type_name).into_owned(),
                        param.description.clone(),
                        param.required.to_string(),
                    ]
                })
                .collect();

            if !rows.is_empty() {
                blocks.push(format!(
                    "<div>\n  <h3>{}</h3>\n{}\n</div>",
                    title,
                    TableRenderer::render(&PARAMETER_HEADINGS, &rows)
                ));
            }
        }

        // At most one body parameter is meaningful; later ones are ignored
        if let Some(body) = endpoint.parameters_in(&ParameterLocation::Body).next() {
            if let Some(schema) = body.schema.as_ref().filter(|s| !s.properties.is_empty()) {
                blocks.push("<h3>Request Body Structure</h3>".to_string());
                blocks.push(PropertyTreeRenderer::render_structure(schema));
            }
            if let Some(example) = &body.example {
                blocks.push("<h3>Request Body Example</h3>".to_string());
                blocks.push(example_block(example)?);
            }
        }

        Ok(blocks.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn endpoint(parameters: serde_json::Value) -> EndpointDescriptor {
        EndpointDescriptor::from_operation(
            "/pets/{id}",
            "put",
            &json!({"tags": ["pets"], "parameters": parameters}),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_no_parameters_no_markup() -> Result<()> {
        assert_eq!(ParameterSectionBuilder::render(&endpoint(json!([])))?, "");
        Ok(())
    }

    #[test]
    fn test_partitions_keep_relative_order() -> Result<()> {
        let html = ParameterSectionBuilder::render(&endpoint(json!([
            {"name": "limit", "in": "query", "type": "integer"},
            {"name": "id", "in": "path", "type": "string", "required": true},
            {"name": "X-Trace", "in": "header", "type": "string"},
            {"name": "offset", "in": "query", "type": "integer"},
            {"name": "file", "in": "formData", "type": "file"}
        ])))?;

        let path = html.find("<h3>Path Parameters</h3>").unwrap();
        let query = html.find("<h3>Query Parameters</h3>").unwrap();
        let header = html.find("<h3>Header Parameters</h3>").unwrap();
        assert!(path < query && query < header);

        assert!(html.find("<td>limit</td>").unwrap() < html.find("<td>offset</td>").unwrap());
        assert!(!html.contains("file"));
        assert_eq!(html.matches("<tbody>").count(), 3);
        Ok(())
    }

    #[test]
    fn test_missing_fields_render_defaults() -> Result<()> {
        let html = ParameterSectionBuilder::render(&endpoint(json!([{"in": "query"}])))?;
        assert!(html.contains("        <td></td>\n        <td></td>\n        <td></td>\n        <td>false</td>"));
        Ok(())
    }

    #[test]
    fn test_body_structure_and_example() -> Result<()> {
        let html = ParameterSectionBuilder::render(&endpoint(json!([
            {
                "name": "pet",
                "in": "body",
                "schema": {
                    "required": ["name"],
                    "properties": {"name": {"type": "string"}, "age": {"type": "integer"}},
                    "example": {"name": "Rex", "age": 3}
                }
            },
            {"name": "ignored", "in": "body", "schema": {"properties": {"zzz": {}}}}
        ])))?;

        assert!(html.starts_with("<h3>Request Body Structure</h3>\n<ul class=\"schema-list first\">"));
        assert_eq!(html.matches("<li ").count(), 2);
        assert!(!html.contains("zzz"));
        assert!(html.contains(
            "<h3>Request Body Example</h3>\n<pre class=\"codeblock\">{\n    \"name\": \"Rex\",\n    \"age\": 3\n}</pre>"
        ));
        Ok(())
    }

    #[test]
    fn test_body_without_properties_has_no_structure_heading() -> Result<()> {
        let html = ParameterSectionBuilder::render(&endpoint(json!([
            {"name": "raw", "in": "body", "schema": {"type": "string"}}
        ])))?;
        assert_eq!(html, "");
        Ok(())
    }
}
