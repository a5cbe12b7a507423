//! Response section: success body structure and status code table
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::render::{example_block, PropertyTreeRenderer, TableRenderer};
use crate::types::EndpointDescriptor;
use html_escape::encode_text;

const RESPONSE_HEADINGS: [&str; 2] = ["HTTP Code", "Description"];

/// Builds the response half of an endpoint section
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseSectionBuilder;

impl ResponseSectionBuilder {
    pub fn render(endpoint: &EndpointDescriptor) -> Result<String> {
        if endpoint.responses.is_empty() {
            return Ok(String::new());
        }

        let mut blocks = Vec::new();

        // Only the literal "200" entry gets structure and example blocks
        if let Some(success) = endpoint.success_response() {
            if let Some(schema) = &success.schema {
                if !schema.properties.is_empty() {
                    blocks.push("<h3>Response Body Structure</h3>".to_string());
                    blocks.push(PropertyTreeRenderer::render_structure(schema));
                }
                if let Some(example) = &success.example {
                    blocks.push("<h3>Response Body Example</h3>".to_string());
                    blocks.push(example_block(example)?);
                }
            }
        }

        let rows: Vec<Vec<String>> = endpoint
            .responses
            .iter()
            .map(|response| {
                vec![
                    encode_text(&response.status_code).into_owned(),
                    response.description.clone(),
                ]
            })
            .collect();

        blocks.push("<h3>Response Code Details</h3>".to_string());
        blocks.push(TableRenderer::render(&RESPONSE_HEADINGS, &rows));

        Ok(blocks.join("\n"))
    }
}
