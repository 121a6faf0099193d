// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use heck::ShoutySnakeCase;
use std::collections::HashSet;

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Allocates unique Java identifiers within one generated class.
#[derive(Debug, Default)]
pub struct NameAllocator {
    allocated: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a valid, unused identifier derived from `suggestion`, appending `_` until
    /// the name is free.
    pub fn new_name(&mut self, suggestion: &str) -> String {
        let mut name = to_java_identifier(suggestion);
        while JAVA_KEYWORDS.contains(&name.as_str()) || self.allocated.contains(&name) {
            name.push('_');
        }
        self.allocated.insert(name.clone());
        name
    }
}

/// Replace the characters that may not appear in a Java identifier with `_`.
pub fn to_java_identifier(suggestion: &str) -> String {
    let mut result = String::with_capacity(suggestion.len() + 1);
    for (index, c) in suggestion.chars().enumerate() {
        let valid = c.is_alphanumeric() || c == '_' || c == '$';
        if index == 0 && c.is_numeric() {
            result.push('_');
        }
        result.push(if valid { c } else { '_' });
    }
    if result.is_empty() {
        result.push('_');
    }
    result
}

/// Name of the static field holding an adapter: `BarTypeAdapter` -> `BAR_TYPE_ADAPTER`.
pub fn adapter_field_name(simple_name: &str) -> String {
    simple_name.to_shouty_snake_case()
}
