// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    classifier::resolve,
    family::{EncodingFamily, ParcelOp},
    java::ImportSet,
};
use once_cell::sync::Lazy;
use parcel_reflection::{names, PrimitiveKind, TypeRef};
use std::collections::BTreeMap;

/// Name of the `Parcel` parameter of `createFromParcel`.
pub const IN: &str = "in";
/// Name of the `Parcel` parameter of `writeToParcel`.
pub const DEST: &str = "dest";
/// Name of the `flags` parameter of `writeToParcel`.
pub const FLAGS: &str = "flags";
/// Name of the local `ClassLoader` variable of `createFromParcel`.
pub const LOADER: &str = "cl";

/// When the value read from the parcel must be cast to the declared type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastRule {
    Never,
    /// Unless the declared type is exactly the given type.
    UnlessExact(&'static str),
    Always,
}

/// Read and write templates of one encoding family.
///
/// Templates use the following placeholders:
/// * `{in}`, `{out}`, `{flags}`, `{loader}`: parameters and locals of the generated methods,
/// * `{value}`: the accessor call, e.g. `name()`,
/// * `{cast}`: a cast to the declared type, when needed, e.g. `(Foo) `,
/// * `{raw}`: the erased type of the property,
/// * `{type_args}`: explicit type arguments, e.g. `<String>`,
/// * `{helper}`: the helper class of the family.
#[derive(Clone, Debug)]
pub struct Encoding {
    pub family: EncodingFamily,
    pub op: ParcelOp,
    read: &'static str,
    write: &'static str,
    helper: Option<&'static str>,
    pub requires_context: bool,
    unchecked_cast: bool,
    pub natively_nullable: bool,
    pub cast: CastRule,
}

impl Encoding {
    fn new(
        family: EncodingFamily,
        op: ParcelOp,
        read: &'static str,
        write: &'static str,
    ) -> Self {
        Self {
            family,
            op,
            read,
            write,
            helper: None,
            requires_context: false,
            unchecked_cast: false,
            natively_nullable: false,
            cast: CastRule::Never,
        }
    }

    fn with_helper(mut self, helper: &'static str) -> Self {
        self.helper = Some(helper);
        self
    }

    fn with_context(mut self) -> Self {
        self.requires_context = true;
        self
    }

    fn with_unchecked_cast(mut self) -> Self {
        self.unchecked_cast = true;
        self
    }

    fn nullable(mut self) -> Self {
        self.natively_nullable = true;
        self
    }

    fn with_cast(mut self, cast: CastRule) -> Self {
        self.cast = cast;
        self
    }

    /// Whether reading a property of type `declared` casts to it.
    pub fn needs_cast(&self, declared: &TypeRef) -> bool {
        let by_rule = match self.cast {
            CastRule::Never => false,
            CastRule::UnlessExact(name) => !declared.is_exactly(name),
            CastRule::Always => true,
        };
        let primitive = matches!(
            self.family,
            EncodingFamily::Primitive(_) | EncodingFamily::Boxed(_)
        );
        by_rule || (declared.is_variable() && !primitive)
    }

    /// Whether the read of a property of type `declared` requires `@SuppressWarnings("unchecked")`.
    pub fn requires_unchecked_cast(&self, declared: &TypeRef) -> bool {
        self.unchecked_cast && (declared.is_parameterized() || declared.is_variable())
    }

    /// The read expression for a property of type `declared`.
    pub fn read_expression(&self, declared: &TypeRef, imports: &mut ImportSet) -> String {
        let resolved = resolve(declared);
        let cast = if self.needs_cast(declared) {
            format!("({}) ", imports.render(declared))
        } else {
            String::new()
        };
        let type_args = if resolved.is_parameterized() {
            format!(
                "<{}>",
                resolved
                    .type_arguments()
                    .iter()
                    .map(|t| imports.render(t))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        } else {
            String::new()
        };
        let raw = imports.render(&resolved.erasure());
        let helper = self.helper.map(|h| imports.name(h)).unwrap_or_default();
        self.read
            .replace("{in}", IN)
            .replace("{loader}", LOADER)
            .replace("{cast}", &cast)
            .replace("{raw}", &raw)
            .replace("{type_args}", &type_args)
            .replace("{helper}", &helper)
    }

    /// The write statement (without trailing semicolon) for a property read with `accessor`.
    pub fn write_statement(&self, accessor: &str, imports: &mut ImportSet) -> String {
        let helper = self.helper.map(|h| imports.name(h)).unwrap_or_default();
        self.write
            .replace("{out}", DEST)
            .replace("{flags}", FLAGS)
            .replace("{value}", accessor)
            .replace("{helper}", &helper)
    }
}

static TABLE: Lazy<BTreeMap<EncodingFamily, Encoding>> = Lazy::new(|| {
    encodings()
        .into_iter()
        .map(|encoding| (encoding.family, encoding))
        .collect()
});

/// The encoding of a family.
pub fn lookup(family: EncodingFamily) -> &'static Encoding {
    // Every family has an entry, see `test::table_is_total`.
    &TABLE[&family]
}

fn primitive(family: EncodingFamily, kind: PrimitiveKind) -> Encoding {
    use PrimitiveKind::*;
    let boxed = matches!(family, EncodingFamily::Boxed(_));
    match kind {
        Boolean => Encoding::new(
            family,
            ParcelOp::Int,
            "{in}.readInt() == 1",
            "{out}.writeInt({value} ? 1 : 0)",
        ),
        Byte => Encoding::new(
            family,
            ParcelOp::Byte,
            "{in}.readByte()",
            "{out}.writeByte({value})",
        ),
        Short if boxed => Encoding::new(
            family,
            ParcelOp::Int,
            "(short) {in}.readInt()",
            "{out}.writeInt({value}.intValue())",
        ),
        Short => Encoding::new(
            family,
            ParcelOp::Int,
            "(short) {in}.readInt()",
            "{out}.writeInt({value})",
        ),
        Char => Encoding::new(
            family,
            ParcelOp::Int,
            "(char) {in}.readInt()",
            "{out}.writeInt({value})",
        ),
        Int => Encoding::new(family, ParcelOp::Int, "{in}.readInt()", "{out}.writeInt({value})"),
        Long => Encoding::new(
            family,
            ParcelOp::Long,
            "{in}.readLong()",
            "{out}.writeLong({value})",
        ),
        Float => Encoding::new(
            family,
            ParcelOp::Float,
            "{in}.readFloat()",
            "{out}.writeFloat({value})",
        ),
        Double => Encoding::new(
            family,
            ParcelOp::Double,
            "{in}.readDouble()",
            "{out}.writeDouble({value})",
        ),
    }
}

fn encodings() -> Vec<Encoding> {
    use EncodingFamily as F;
    let mut result = Vec::new();
    for kind in PrimitiveKind::ALL.iter() {
        result.push(primitive(F::Primitive(*kind), *kind));
        result.push(primitive(F::Boxed(*kind), *kind));
    }
    result.extend(vec![
        Encoding::new(
            F::String,
            ParcelOp::String,
            "{cast}{in}.readString()",
            "{out}.writeString({value})",
        ),
        Encoding::new(
            F::CharSequence,
            ParcelOp::CharSequence,
            "{cast}{helper}.CHAR_SEQUENCE_CREATOR.createFromParcel({in})",
            "{helper}.writeToParcel({value}, {out}, {flags})",
        )
        .with_helper(names::TEXT_UTILS)
        .with_cast(CastRule::UnlessExact(names::CHAR_SEQUENCE)),
        Encoding::new(
            F::Parcelable,
            ParcelOp::Parcelable,
            "{cast}{in}.readParcelable({loader})",
            "{out}.writeParcelable({value}, {flags})",
        )
        .with_context()
        .with_unchecked_cast()
        .with_cast(CastRule::UnlessExact(names::PARCELABLE))
        .nullable(),
        Encoding::new(
            F::Map,
            ParcelOp::Map,
            "{cast}{in}.readHashMap({loader})",
            "{out}.writeMap({value})",
        )
        .with_context()
        .with_unchecked_cast()
        .with_cast(CastRule::Always)
        .nullable(),
        Encoding::new(
            F::List,
            ParcelOp::List,
            "{cast}{in}.readArrayList({loader})",
            "{out}.writeList({value})",
        )
        .with_context()
        .with_unchecked_cast()
        .with_cast(CastRule::Always)
        .nullable(),
        Encoding::new(
            F::ImmutableCollection,
            ParcelOp::List,
            "{cast}{raw}.{type_args}copyOf({in}.readArrayList({loader}))",
            "{out}.writeList({value}.asList())",
        )
        .with_context()
        .with_unchecked_cast(),
        Encoding::new(
            F::ImmutableMap,
            ParcelOp::Map,
            "{cast}{raw}.{type_args}copyOf({in}.readHashMap({loader}))",
            "{out}.writeMap({value})",
        )
        .with_context()
        .with_unchecked_cast(),
        Encoding::new(
            F::BooleanArray,
            ParcelOp::BooleanArray,
            "{in}.createBooleanArray()",
            "{out}.writeBooleanArray({value})",
        ),
        Encoding::new(
            F::ByteArray,
            ParcelOp::ByteArray,
            "{in}.createByteArray()",
            "{out}.writeByteArray({value})",
        ),
        Encoding::new(
            F::CharArray,
            ParcelOp::CharArray,
            "{in}.createCharArray()",
            "{out}.writeCharArray({value})",
        ),
        Encoding::new(
            F::IntArray,
            ParcelOp::IntArray,
            "{in}.createIntArray()",
            "{out}.writeIntArray({value})",
        ),
        Encoding::new(
            F::LongArray,
            ParcelOp::LongArray,
            "{in}.createLongArray()",
            "{out}.writeLongArray({value})",
        ),
        Encoding::new(
            F::StringArray,
            ParcelOp::StringArray,
            "{in}.createStringArray()",
            "{out}.writeStringArray({value})",
        ),
        Encoding::new(
            F::ParcelableArray,
            ParcelOp::ParcelableArray,
            "{in}.readParcelableArray({loader})",
            "{out}.writeParcelableArray({value}, {flags})",
        )
        .with_context(),
        Encoding::new(
            F::ObjectArray,
            ParcelOp::Array,
            "{in}.readArray({loader})",
            "{out}.writeArray({value})",
        )
        .with_context(),
        Encoding::new(
            F::StrongBinder,
            ParcelOp::StrongBinder,
            "{cast}{in}.readStrongBinder()",
            "{out}.writeStrongBinder({value})",
        )
        .with_cast(CastRule::UnlessExact(names::IBINDER)),
        Encoding::new(
            F::Serializable,
            ParcelOp::Serializable,
            "{cast}{in}.readSerializable()",
            "{out}.writeSerializable({value})",
        )
        .with_unchecked_cast()
        .with_cast(CastRule::UnlessExact(names::SERIALIZABLE)),
        Encoding::new(
            F::SparseArray,
            ParcelOp::SparseArray,
            "{cast}{in}.readSparseArray({loader})",
            "{out}.writeSparseArray({value})",
        )
        .with_context()
        .nullable(),
        Encoding::new(
            F::SparseBooleanArray,
            ParcelOp::SparseBooleanArray,
            "{in}.readSparseBooleanArray()",
            "{out}.writeSparseBooleanArray({value})",
        )
        .nullable(),
        Encoding::new(
            F::Bundle,
            ParcelOp::Bundle,
            "{in}.readBundle({loader})",
            "{out}.writeBundle({value})",
        )
        .with_context()
        .nullable(),
        Encoding::new(
            F::PersistableBundle,
            ParcelOp::PersistableBundle,
            "{in}.readPersistableBundle({loader})",
            "{out}.writePersistableBundle({value})",
        )
        .with_context()
        .nullable(),
        Encoding::new(F::Size, ParcelOp::Size, "{in}.readSize()", "{out}.writeSize({value})"),
        Encoding::new(F::SizeF, ParcelOp::SizeF, "{in}.readSizeF()", "{out}.writeSizeF({value})"),
        Encoding::new(
            F::Enum,
            ParcelOp::String,
            "{cast}{helper}.valueOf({raw}.class, {in}.readString())",
            "{out}.writeString({value}.name())",
        )
        .with_helper(names::ENUM),
        Encoding::new(
            F::Value,
            ParcelOp::Value,
            "{cast}{in}.readValue({loader})",
            "{out}.writeValue({value})",
        )
        .with_context()
        .with_unchecked_cast()
        .with_cast(CastRule::UnlessExact(names::OBJECT))
        .nullable(),
    ]);
    result
}
