//! Tabular markup
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use std::fmt::{Display, Write};

/// Renders headings and rows of cells into a `table-container` block.
///
/// Cells are written with their `Display` form and are not escaped; callers
/// escape any text that needs it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn render<H, C>(headings: &[H], rows: &[Vec<C>]) -> String
    where
        H: AsRef<str>,
        C: Display,
    {
        let mut out = String::from("<div class=\"table-container\">\n  <table>\n    <thead>\n      <tr>\n");
        for heading in headings {
            // Writing into a String cannot fail
            let _ = writeln!(out, "        <th>{}</th>", heading.as_ref());
        }
        out.push_str("      </tr>\n    </thead>\n    <tbody>\n");

        for row in rows {
            out.push_str("      <tr>\n");
            for cell in row {
                let _ = writeln!(out, "        <td>{}</td>", cell);
            }
            out.push_str("      </tr>\n");
        }

        out.push_str("    </tbody>\n  </table>\n</div>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_rows() {
        let rows = vec![vec!["id".to_string(), "string".to_string(), String::new(), true.to_string()]];
        let html = TableRenderer::render(&["Parameter", "Type", "Description", "Required"], &rows);

        assert_eq!(
            html,
            "<div class=\"table-container\">\n  <table>\n    <thead>\n      <tr>\n        <th>Parameter</th>\n        <th>Type</th>\n        <th>Description</th>\n        <th>Required</th>\n      </tr>\n    </thead>\n    <tbody>\n      <tr>\n        <td>id</td>\n        <td>string</td>\n        <td></td>\n        <td>true</td>\n      </tr>\n    </tbody>\n  </table>\n</div>"
        );
    }

    #[test]
    fn test_empty_rows_render_headers_only() {
        let rows: Vec<Vec<String>> = Vec::new();
        let html = TableRenderer::render(&["HTTP Code", "Description"], &rows);

        assert_eq!(html.matches("<th>").count(), 2);
        assert_eq!(html.matches("<tr>").count(), 1);
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn test_cells_are_not_escaped() {
        let html = TableRenderer::render(&["A"], &[vec!["<b>x</b>"]]);
        assert!(html.contains("<td><b>x</b></td>"));
    }

    #[test]
    fn test_booleans_render_literally() {
        let html = TableRenderer::render(&["Required"], &[vec![false], vec![true]]);
        assert!(html.contains("<td>false</td>"));
        assert!(html.contains("<td>true</td>"));
    }
}
