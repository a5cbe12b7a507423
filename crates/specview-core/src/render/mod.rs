//! HTML rendering
//!
//! Section builders compose [`TableRenderer`] and [`PropertyTreeRenderer`]
//! into endpoint sections; [`page`] wraps the sections into a document.
//!
//! Plain-text values from the document (names, types, status codes, tags,
//! operation ids, example JSON) are HTML-escaped by the builders. Description
//! strings are inserted as written.
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

pub mod endpoint;
pub mod markdown;
pub mod page;
pub mod parameters;
pub mod property_tree;
pub mod responses;
pub mod styles;
pub mod table;

pub use endpoint::{render_endpoint, resource_url};
pub use markdown::markdown_to_html;
pub use page::{render_endpoint_error, render_page};
pub use parameters::ParameterSectionBuilder;
pub use property_tree::PropertyTreeRenderer;
pub use responses::ResponseSectionBuilder;
pub use table::TableRenderer;

use crate::error::Result;
use html_escape::encode_text;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Serialize an example payload as JSON indented by four spaces
pub fn format_example(example: &Value) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    example.serialize(&mut serializer)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// `<pre class="codeblock">` holding an escaped, formatted example
pub fn example_block(example: &Value) -> Result<String> {
    Ok(format!(
        "<pre class=\"codeblock\">{}</pre>",
        encode_text(&format_example(example)?)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_format_example_four_spaces() -> Result<()> {
        let formatted = format_example(&json!({"id": 1, "tags": ["a", "b"], "owner": {"name": "Ann"}}))?;
        assert_eq!(
            formatted,
            "{\n    \"id\": 1,\n    \"tags\": [\n        \"a\",\n        \"b\"\n    ],\n    \"owner\": {\n        \"name\": \"Ann\"\n    }\n}"
        );
        Ok(())
    }

    #[test]
    fn test_format_example_scalars() -> Result<()> {
        assert_eq!(format_example(&json!("text"))?, "\"text\"");
        assert_eq!(format_example(&json!([]))?, "[]");
        assert_eq!(format_example(&json!({}))?, "{}");
        Ok(())
    }

    #[test]
    fn test_example_block_escapes_markup() -> Result<()> {
        assert_eq!(
            example_block(&json!({"html": "<b>&</b>"}))?,
            "<pre class=\"codeblock\">{\n    \"html\": \"&lt;b&gt;&amp;&lt;/b&gt;\"\n}</pre>"
        );
        Ok(())
    }
}
