// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use parcel_reflection::{names, PrimitiveKind, TypeRef};
use serde::{Deserialize, Serialize};

/// The ways a property value can be written to a `Parcel`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EncodingFamily {
    Primitive(PrimitiveKind),
    Boxed(PrimitiveKind),
    String,
    CharSequence,
    Parcelable,
    Map,
    List,
    ImmutableCollection,
    ImmutableMap,
    BooleanArray,
    ByteArray,
    CharArray,
    IntArray,
    LongArray,
    StringArray,
    ParcelableArray,
    ObjectArray,
    StrongBinder,
    Serializable,
    SparseArray,
    SparseBooleanArray,
    Bundle,
    PersistableBundle,
    Size,
    SizeF,
    Enum,
    /// Opaque values written with `writeValue`.
    Value,
}

impl EncodingFamily {
    /// Every family, primitive kinds first.
    pub fn all() -> Vec<EncodingFamily> {
        use EncodingFamily::*;
        let mut result = Vec::new();
        result.extend(PrimitiveKind::ALL.iter().map(|k| Primitive(*k)));
        result.extend(PrimitiveKind::ALL.iter().map(|k| Boxed(*k)));
        result.extend(vec![
            String,
            CharSequence,
            Parcelable,
            Map,
            List,
            ImmutableCollection,
            ImmutableMap,
            BooleanArray,
            ByteArray,
            CharArray,
            IntArray,
            LongArray,
            StringArray,
            ParcelableArray,
            ObjectArray,
            StrongBinder,
            Serializable,
            SparseArray,
            SparseBooleanArray,
            Bundle,
            PersistableBundle,
            Size,
            SizeF,
            Enum,
            Value,
        ]);
        result
    }

    /// The family of a declared type matched by its erased name, if this name is one of the
    /// types that a `Parcel` knows about.
    pub fn from_declared_name(name: &str) -> Option<EncodingFamily> {
        use EncodingFamily::*;
        if let Some(kind) = PrimitiveKind::from_boxed_name(name) {
            return Some(Boxed(kind));
        }
        let family = match name {
            names::STRING => String,
            names::CHAR_SEQUENCE => CharSequence,
            names::PARCELABLE => Parcelable,
            names::MAP => Map,
            names::LIST => List,
            names::IMMUTABLE_COLLECTION => ImmutableCollection,
            names::IMMUTABLE_MAP => ImmutableMap,
            names::IBINDER => StrongBinder,
            names::SERIALIZABLE => Serializable,
            names::SPARSE_ARRAY => SparseArray,
            names::SPARSE_BOOLEAN_ARRAY => SparseBooleanArray,
            names::BUNDLE => Bundle,
            names::PERSISTABLE_BUNDLE => PersistableBundle,
            names::SIZE => Size,
            names::SIZE_F => SizeF,
            _ => return None,
        };
        Some(family)
    }

    /// Arrays with a dedicated `Parcel` operation.
    pub fn from_array_component(component: &TypeRef) -> Option<EncodingFamily> {
        use EncodingFamily::*;
        match component {
            TypeRef::Primitive(PrimitiveKind::Boolean) => Some(BooleanArray),
            TypeRef::Primitive(PrimitiveKind::Byte) => Some(ByteArray),
            TypeRef::Primitive(PrimitiveKind::Char) => Some(CharArray),
            TypeRef::Primitive(PrimitiveKind::Int) => Some(IntArray),
            TypeRef::Primitive(PrimitiveKind::Long) => Some(LongArray),
            t if t.is_exactly(names::STRING) => Some(StringArray),
            t if t.is_exactly(names::PARCELABLE) => Some(ParcelableArray),
            t if t.is_exactly(names::OBJECT) => Some(ObjectArray),
            _ => None,
        }
    }

    pub fn is_map(self) -> bool {
        matches!(self, EncodingFamily::Map | EncodingFamily::ImmutableMap)
    }
}

/// A pair of matching read and write operations of `android.os.Parcel`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParcelOp {
    Byte,
    Int,
    Long,
    Float,
    Double,
    String,
    CharSequence,
    Parcelable,
    ParcelableArray,
    Map,
    List,
    BooleanArray,
    ByteArray,
    CharArray,
    IntArray,
    LongArray,
    StringArray,
    Array,
    StrongBinder,
    Serializable,
    SparseArray,
    SparseBooleanArray,
    Bundle,
    PersistableBundle,
    Size,
    SizeF,
    Value,
    /// Reads and writes delegated to a `TypeAdapter`.
    Adapter,
}

impl ParcelOp {
    pub fn read_method(self) -> &'static str {
        use ParcelOp::*;
        match self {
            Byte => "readByte",
            Int => "readInt",
            Long => "readLong",
            Float => "readFloat",
            Double => "readDouble",
            String => "readString",
            CharSequence => "createFromParcel",
            Parcelable => "readParcelable",
            ParcelableArray => "readParcelableArray",
            Map => "readHashMap",
            List => "readArrayList",
            BooleanArray => "createBooleanArray",
            ByteArray => "createByteArray",
            CharArray => "createCharArray",
            IntArray => "createIntArray",
            LongArray => "createLongArray",
            StringArray => "createStringArray",
            Array => "readArray",
            StrongBinder => "readStrongBinder",
            Serializable => "readSerializable",
            SparseArray => "readSparseArray",
            SparseBooleanArray => "readSparseBooleanArray",
            Bundle => "readBundle",
            PersistableBundle => "readPersistableBundle",
            Size => "readSize",
            SizeF => "readSizeF",
            Value => "readValue",
            Adapter => "fromParcel",
        }
    }

    pub fn write_method(self) -> &'static str {
        use ParcelOp::*;
        match self {
            Byte => "writeByte",
            Int => "writeInt",
            Long => "writeLong",
            Float => "writeFloat",
            Double => "writeDouble",
            String => "writeString",
            CharSequence => "writeToParcel",
            Parcelable => "writeParcelable",
            ParcelableArray => "writeParcelableArray",
            Map => "writeMap",
            List => "writeList",
            BooleanArray => "writeBooleanArray",
            ByteArray => "writeByteArray",
            CharArray => "writeCharArray",
            IntArray => "writeIntArray",
            LongArray => "writeLongArray",
            StringArray => "writeStringArray",
            Array => "writeArray",
            StrongBinder => "writeStrongBinder",
            Serializable => "writeSerializable",
            SparseArray => "writeSparseArray",
            SparseBooleanArray => "writeSparseBooleanArray",
            Bundle => "writeBundle",
            PersistableBundle => "writePersistableBundle",
            Size => "writeSize",
            SizeF => "writeSizeF",
            Value => "writeValue",
            Adapter => "toParcel",
        }
    }
}
