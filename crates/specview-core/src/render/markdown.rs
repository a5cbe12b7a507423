//! Markdown to HTML for the API description
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use pulldown_cmark::{html, Options, Parser};

/// Convert CommonMark (with tables and strikethrough) to an HTML fragment
pub fn markdown_to_html(input: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(input, options);

    let mut output = String::with_capacity(input.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
