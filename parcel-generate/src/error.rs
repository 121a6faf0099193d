// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Result type used in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of the code generator. Every user-facing failure is also reported
/// through the host's `Messager` before being returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("property {property} of {class} is not a supported Parcelable type")]
    UnsupportedType { class: String, property: String },
    #[error("property {property} of {class} is a Map without String keys or supported values")]
    InvalidMapType { class: String, property: String },
    #[error("property {property} of {class} has a ParcelAdapter annotation without an adapter")]
    MissingAdapter { class: String, property: String },
    #[error("{class} declares {member} by hand")]
    ConflictingMember { class: String, member: String },
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
