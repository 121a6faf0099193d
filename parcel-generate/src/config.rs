// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::indent::IndentConfig;
use std::collections::BTreeMap;

/// What to do when some properties of a value class cannot be written to a `Parcel`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailureMode {
    /// Stop at the first invalid property and return an error.
    Strict,
    /// Report every invalid property, then skip the class.
    Soft,
}

impl Default for FailureMode {
    fn default() -> Self {
        FailureMode::Soft
    }
}

/// Code generation options.
#[derive(Clone, Debug)]
pub struct CodeGeneratorConfig {
    pub(crate) failure_mode: FailureMode,
    pub(crate) comments: DocComments,
    pub(crate) indent: IndentConfig,
}

/// Track documentation to be attached to the generated classes.
pub type DocComments = std::collections::BTreeMap<
    /* qualified name of the value class */ String,
    /* comment */ String,
>;

/// How to copy generated source code and the adapter runtime.
pub trait SourceInstaller {
    type Error;

    /// Write the generated implementation of a value class.
    fn install_class(
        &self,
        package_name: &str,
        class_name: &str,
        source: &str,
    ) -> std::result::Result<(), Self::Error>;

    /// Install the `TypeAdapter` runtime.
    fn install_adapter_runtime(&self) -> std::result::Result<(), Self::Error>;
}

impl Default for CodeGeneratorConfig {
    fn default() -> Self {
        Self {
            failure_mode: FailureMode::default(),
            comments: BTreeMap::new(),
            indent: IndentConfig::Space(2),
        }
    }
}

impl CodeGeneratorConfig {
    /// Default config: soft failures, no comments, two-space indentation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }

    /// Comments attached to particular value classes.
    pub fn with_comments(mut self, comments: DocComments) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_indent(mut self, indent: IndentConfig) -> Self {
        self.indent = indent;
        self
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }
}
