//! What a key means at the position it appears in
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

/// Keywords whose values are payload data and never rewritten
const LITERAL_KEYWORDS: &[&str] = &["example", "examples", "default", "enum", "const"];

/// Keywords whose object values map user-chosen names to schemas or objects
const NAME_MAP_KEYWORDS: &[&str] = &[
    "properties",
    "patternProperties",
    "definitions",
    "$defs",
    "schemas",
    "paths",
    "parameters",
    "responses",
    "headers",
    "securityDefinitions",
    "securitySchemes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeywordKind {
    /// Copied verbatim
    Literal,
    /// Keys are names; each value is walked as a node
    NameMap,
    /// Walked as a node
    Node,
}

/// Classify a key found on a node (not inside a name map)
pub(crate) fn classify(key: &str) -> KeywordKind {
    if key.starts_with("x-") || LITERAL_KEYWORDS.contains(&key) {
        KeywordKind::Literal
    } else if NAME_MAP_KEYWORDS.contains(&key) {
        KeywordKind::NameMap
    } else {
        KeywordKind::Node
    }
}
