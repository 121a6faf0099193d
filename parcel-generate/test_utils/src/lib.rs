// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

//! An in-memory stand-in for `android.os.Parcel`: a positional stream of tagged values.
//! Reading with a different operation than the one used for writing is an error, which
//! makes asymmetric read and write sequences visible in tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected a value written by {expected}, found {found}")]
    TagMismatch { expected: String, found: String },
    #[error("unexpected end of parcel")]
    EndOfParcel,
    #[error("invalid presence flag {0}")]
    InvalidFlag(i32),
    #[error(transparent)]
    Encoding(#[from] bincode::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Values that can be written to the fake parcel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Byte(i8),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

#[derive(Serialize, Deserialize)]
struct Record {
    tag: String,
    value: Value,
}

/// A sequence of records, encoded with bincode.
#[derive(Debug, Default)]
pub struct Parcel {
    data: Vec<u8>,
    position: usize,
}

impl Parcel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` written by the operation `tag`.
    pub fn write(&mut self, tag: &str, value: Value) -> Result<()> {
        let record = Record {
            tag: tag.to_string(),
            value,
        };
        bincode::serialize_into(&mut self.data, &record)?;
        Ok(())
    }

    /// Read the next value, which must have been written by the operation `tag`.
    pub fn read(&mut self, tag: &str) -> Result<Value> {
        if self.position >= self.data.len() {
            return Err(Error::EndOfParcel);
        }
        let mut remaining = &self.data[self.position..];
        let before = remaining.len();
        let record: Record = bincode::deserialize_from(&mut remaining)?;
        self.position += before - remaining.len();
        if record.tag != tag {
            return Err(Error::TagMismatch {
                expected: tag.to_string(),
                found: record.tag,
            });
        }
        Ok(record.value)
    }

    pub fn write_int(&mut self, value: i32) -> Result<()> {
        self.write("int", Value::Int(value))
    }

    pub fn read_int(&mut self) -> Result<i32> {
        match self.read("int")? {
            Value::Int(value) => Ok(value),
            other => Err(Error::TagMismatch {
                expected: "int".to_string(),
                found: format!("{:?}", other),
            }),
        }
    }

    /// Write a presence flag: `0` when the value follows, `1` when it is absent.
    pub fn write_presence(&mut self, present: bool) -> Result<()> {
        self.write_int(if present { 0 } else { 1 })
    }

    pub fn read_presence(&mut self) -> Result<bool> {
        match self.read_int()? {
            0 => Ok(true),
            1 => Ok(false),
            flag => Err(Error::InvalidFlag(flag)),
        }
    }

    /// Move back to the beginning of the parcel, as `setDataPosition(0)`.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Whether every record has been read.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.data.len()
    }

    pub fn data_size(&self) -> usize {
        self.data.len()
    }
}
