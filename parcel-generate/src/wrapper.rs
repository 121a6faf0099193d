// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    encoding::{lookup, DEST, IN},
    family::ParcelOp,
    java::ImportSet,
    property::{EncodingPath, PropertyDescriptor},
};
use serde::{Deserialize, Serialize};

/// The expression reading one property in `createFromParcel`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadFragment {
    pub code: String,
    pub requires_context: bool,
    pub unchecked_cast: bool,
}

/// The statement writing one property in `writeToParcel`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteFragment {
    /// Statement without the trailing semicolon.
    pub statement: String,
    /// Accessor call to test against `null` before writing a presence flag.
    pub presence_guard: Option<String>,
}

/// One property in the wire layout of a class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub property: String,
    /// Whether an `int` presence flag precedes the value.
    pub presence_flag: bool,
    pub op: ParcelOp,
    /// Whether the value itself may be absent.
    pub nullable: bool,
}

/// The ordered sequence of parcel operations used by a generated class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelLayout {
    pub class_name: String,
    pub slots: Vec<Slot>,
}

/// Whether `property` is preceded by a presence flag.
pub fn needs_presence_flag(property: &PropertyDescriptor, path: &EncodingPath) -> bool {
    property.nullable
        && match path {
            EncodingPath::Adapter(_) => true,
            EncodingPath::Family(family) => !lookup(*family).natively_nullable,
        }
}

pub fn wrap_read(
    property: &PropertyDescriptor,
    path: &EncodingPath,
    imports: &mut ImportSet,
) -> ReadFragment {
    let base = match path {
        EncodingPath::Adapter(adapter) => ReadFragment {
            code: format!("{}.fromParcel({})", adapter.field_name, IN),
            requires_context: false,
            unchecked_cast: false,
        },
        EncodingPath::Family(family) => {
            let encoding = lookup(*family);
            ReadFragment {
                code: encoding.read_expression(&property.declared_type, imports),
                requires_context: encoding.requires_context,
                unchecked_cast: encoding.requires_unchecked_cast(&property.declared_type),
            }
        }
    };
    if needs_presence_flag(property, path) {
        ReadFragment {
            code: format!("{}.readInt() == 0 ? {} : null", IN, base.code),
            ..base
        }
    } else {
        base
    }
}

pub fn wrap_write(
    property: &PropertyDescriptor,
    path: &EncodingPath,
    imports: &mut ImportSet,
) -> WriteFragment {
    let accessor = property.accessor();
    let statement = match path {
        EncodingPath::Adapter(adapter) => {
            format!("{}.toParcel({}, {})", adapter.field_name, accessor, DEST)
        }
        EncodingPath::Family(family) => lookup(*family).write_statement(&accessor, imports),
    };
    WriteFragment {
        statement,
        presence_guard: if needs_presence_flag(property, path) {
            Some(accessor)
        } else {
            None
        },
    }
}

pub fn slot(property: &PropertyDescriptor, path: &EncodingPath) -> Slot {
    Slot {
        property: property.name.clone(),
        presence_flag: needs_presence_flag(property, path),
        op: match path {
            EncodingPath::Adapter(_) => ParcelOp::Adapter,
            EncodingPath::Family(family) => lookup(*family).op,
        },
        nullable: property.nullable,
    }
}
