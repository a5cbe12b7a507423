//! Nested list markup for schema property trees
//!
//! Each property becomes one `<li>` carrying its name, type, required marker
//! and description. Child properties follow in a nested `<ul>`; array element
//! properties follow in a nested `<ul>` between `[` and `]` markers. Both
//! blocks are emitted when a node has both.
//!
//! Whether a node is required is decided by its parent: the required list
//! passed for a node's children is that node's own `required`, and for its
//! array element's children the element's `required`.
//!
//! The walk uses an explicit work stack, so input depth is not limited by the
//! call stack.
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::types::SchemaProperty;
use html_escape::encode_text;
use std::fmt::Write;

const LIST_OPEN: &str = "<ul class=\"schema-list\">";
const FIRST_LIST_OPEN: &str = "<ul class=\"schema-list first\">";
const LIST_CLOSE: &str = "</ul>";
const ITEM_CLOSE: &str = "</li>";
const ARRAY_OPEN: &str = "<span class=\"array-bound\">[</span>";
const ARRAY_CLOSE: &str = "<span class=\"array-bound\">]</span>";
const REQUIRED_MARKER: &str = "<span class=\"required\">* required</span>";

enum Step<'a> {
    Node {
        name: &'a str,
        property: &'a SchemaProperty,
        required: &'a [String],
    },
    Emit(&'static str),
}

/// Renders one property and its descendants
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyTreeRenderer;

impl PropertyTreeRenderer {
    /// Render `property` under `name`; `required` is the parent's required list
    pub fn render(name: &str, property: &SchemaProperty, required: &[String]) -> String {
        let mut out = String::new();
        let mut stack = vec![Step::Node {
            name,
            property,
            required,
        }];

        while let Some(step) = stack.pop() {
            if !out.is_empty() {
                out.push('\n');
            }

            match step {
                Step::Emit(markup) => out.push_str(markup),
                Step::Node {
                    name,
                    property,
                    required,
                } => {
                    write_item_header(&mut out, name, property, required.iter().any(|r| r == name));

                    // Pushed in reverse: children block, then array block, then close
                    stack.push(Step::Emit(ITEM_CLOSE));
                    if let Some(items) = property.item_properties() {
                        stack.push(Step::Emit(ARRAY_CLOSE));
                        push_list(&mut stack, &items.properties, &items.required);
                        stack.push(Step::Emit(ARRAY_OPEN));
                    }
                    if !property.properties.is_empty() {
                        push_list(&mut stack, &property.properties, &property.required);
                    }
                }
            }
        }

        out
    }

    /// Render the top-level `<ul class="schema-list first">` for a body or response schema
    pub fn render_structure(schema: &SchemaProperty) -> String {
        let mut pieces = Vec::with_capacity(schema.properties.len() + 2);
        pieces.push(FIRST_LIST_OPEN.to_string());
        pieces.extend(
            schema
                .properties
                .iter()
                .map(|(name, property)| Self::render(name, property, &schema.required)),
        );
        pieces.push(LIST_CLOSE.to_string());
        pieces.join("\n")
    }
}

fn push_list<'a>(
    stack: &mut Vec<Step<'a>>,
    children: &'a [(String, SchemaProperty)],
    required: &'a [String],
) {
    stack.push(Step::Emit(LIST_CLOSE));
    for (name, property) in children.iter().rev() {
        stack.push(Step::Node {
            name,
            property,
            required,
        });
    }
    stack.push(Step::Emit(LIST_OPEN));
}

fn write_item_header(out: &mut String, name: &str, property: &SchemaProperty, required: bool) {
    let _ = write!(
        out,
        "<li class=\"schema-property\">\n  <div class=\"schema-property__description\">\n    <div class=\"schema-property__description-title\">{}</div>\n    <span class=\"schema-property__description-type\">({})</span>\n",
        encode_text(name),
        encode_text(&property.type_name),
    );
    if required {
        let _ = writeln!(out, "    {}", REQUIRED_MARKER);
    }
    let _ = write!(
        out,
        "    <div class=\"schema-property__description-description\">{}</div>\n  </div>",
        property.description
    );
}
