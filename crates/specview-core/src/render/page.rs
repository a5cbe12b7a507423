//! Page assembly
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::generator::PreviewOptions;
use crate::render::markdown_to_html;
use crate::render::styles::STYLESHEET;
use crate::types::ApiDocument;
use html_escape::{encode_double_quoted_attribute, encode_text};

const DOCUMENT_START: &str = "<!DOCTYPE html><html lang=\"en\">";
const DOCUMENT_END: &str = "</html>";
const FONTS_URL: &str =
    "https://fonts.googleapis.com/css?family=Montserrat:700|Raleway:400,500i,700&display=swap";
const BASE_PATH_FALLBACK: &str = "basePath";

/// Assemble the full HTML document around already-rendered endpoint sections
pub fn render_page(document: &ApiDocument, sections: &[String], options: &PreviewOptions) -> String {
    let mut body = Vec::with_capacity(sections.len() + 2);
    if options.include_banner {
        body.push(banner(options));
    }
    body.push(title_block(document, options));
    body.extend(sections.iter().cloned());

    format!(
        "{}{}\n<body>\n  <div>\n{}\n  </div>\n</body>\n{}",
        DOCUMENT_START,
        head(&document.title),
        body.join("\n"),
        DOCUMENT_END
    )
}

/// Notice block standing in for an endpoint that failed to render
pub fn render_endpoint_error(label: &str, message: &str) -> String {
    format!(
        "<div class=\"spec-endpoint\">\n  <div class=\"endpoint-error\">\n    <h2>{}</h2>\n    <p>This endpoint could not be rendered: {}</p>\n  </div>\n</div>",
        encode_text(label),
        encode_text(message)
    )
}

/// Link label derived from `basePath`: its first segment with dashes as spaces
pub fn base_path_label(base_path: Option<&str>) -> String {
    base_path
        .and_then(|path| path.split('/').nth(1))
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace('-', " "))
        .unwrap_or_else(|| BASE_PATH_FALLBACK.to_string())
}

fn head(title: &str) -> String {
    format!(
        "<head>\n  <meta charset=\"UTF-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  <title>{}</title>\n  <link href=\"{}\" rel=\"stylesheet\">\n  <style>{}</style>\n</head>",
        encode_text(title),
        encode_double_quoted_attribute(FONTS_URL),
        STYLESHEET
    )
}

fn banner(options: &PreviewOptions) -> String {
    format!(
        "<div class=\"preview-banner\">\n  <h1>{}</h1>\n  <p>This is a preview and is not an exact representation of what will be available on <a href=\"{}\">API docs</a> after spec publishing.</p>\n</div>",
        encode_text(&options.banner_title),
        encode_double_quoted_attribute(&options.docs_url)
    )
}

fn title_block(document: &ApiDocument, options: &PreviewOptions) -> String {
    format!(
        "<div class=\"spec-header\">\n  <div class=\"spec-header__description\">\n    <h1 class=\"spec-header__description-title\">{}</h1>\n    <a href=\"{}\">{}</a>\n    <div class=\"spec-header__description-description\">{}</div>\n  </div>\n</div>",
        encode_text(&document.title),
        encode_double_quoted_attribute(&options.docs_url),
        encode_text(&base_path_label(document.base_path.as_deref())),
        markdown_to_html(&document.description)
    )
}
