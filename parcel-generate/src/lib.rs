// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

//! This crate generates implementations of [`android.os.Parcelable`](https://developer.android.com/reference/android/os/Parcelable)
//! for abstract Java value classes described with [`parcel_reflection`](https://crates.io/crates/parcel-reflection).
//!
//! For a value class `Foo` with abstract accessors, the generated class `AutoValue_Foo` extends
//! a given base class and provides:
//!
//! * a constructor taking every property, in declaration order,
//! * `writeToParcel`, writing each property with the matching `android.os.Parcel` operation,
//! * a `CREATOR` field reading the properties back in the same order,
//! * `describeContents`, unless the value class already implements it.
//!
//! ## Supported types
//!
//! The `Parcel` operation of a property is chosen from its type by walking the supertypes of
//! the type until a known type is found: primitives and their boxed forms, `String`,
//! `CharSequence`, `Parcelable`, `List`, `Map` (with `String` keys), Guava immutable
//! collections, primitive and `String` arrays, `IBinder`, `Serializable`, `SparseArray`,
//! `Bundle`, `Size`, enums and `Object`.
//!
//! Properties annotated with `@Nullable` are preceded by a presence flag, except for the
//! types that a `Parcel` can already write as `null`. Properties annotated with
//! `@ParcelAdapter(FooAdapter.class)` delegate to a `com.parcelgen.adapter.TypeAdapter`; each
//! adapter is instantiated once, in a static field.
//!
//! ## Quick Start
//!
//! ```
//! use parcel_generate::{CodeGeneratorConfig, ParcelExtension};
//! use parcel_reflection::{
//!     names, platform_registry, register, Diagnostics, ExecutableElement, Modifier, PrimitiveKind,
//!     TypeElement, TypeRef,
//! };
//!
//! # fn main() -> Result<(), parcel_generate::Error> {
//! let mut registry = platform_registry();
//! let value_class = TypeElement::class("test.Point")
//!     .with_modifier(Modifier::Abstract)
//!     .implements(TypeRef::declared(names::PARCELABLE))
//!     .with_method(ExecutableElement::accessor("x", TypeRef::Primitive(PrimitiveKind::Int)))
//!     .with_method(ExecutableElement::accessor("label", TypeRef::declared(names::STRING)));
//! register(&mut registry, value_class.clone());
//!
//! let mut diagnostics = Diagnostics::new();
//! let extension = ParcelExtension::new(CodeGeneratorConfig::new());
//! let mut context = extension.context(&value_class, &registry, &mut diagnostics);
//! assert!(extension.applicable(&mut context)?);
//!
//! let source = extension
//!     .generate(&mut context, "AutoValue_Point", "$AutoValue_Point", true)?
//!     .unwrap();
//! assert!(source.contains("final class AutoValue_Point extends $AutoValue_Point {"));
//! assert!(source.contains("dest.writeInt(x());\n    dest.writeString(label());"));
//! assert!(diagnostics.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Binary Tool
//!
//! The binary tool `parcelgen` reads declarations saved in a YAML file (see
//! `parcel_reflection::Registry`) and generates the implementation of one value class:
//! ```bash
//! cargo run -p parcel-generate -- --value-class test.Point types.yaml > AutoValue_Point.java
//! ```
//!
//! To write the class under `$DEST` together with the `TypeAdapter` runtime, you may run:
//! ```bash
//! cargo run -p parcel-generate -- --value-class test.Point --with-runtime --target-source-dir "$DEST" types.yaml
//! ```

/// Classification of types into encoding families.
pub mod classifier;
/// Read and write templates of each encoding family.
pub mod encoding;
/// Entry points called by the annotation-processing host.
pub mod extension;
/// Encoding families and the matching `Parcel` operations.
pub mod family;
/// Utility function to generate indented text
pub mod indent;
/// Printing of the generated Java class.
pub mod java;
/// Allocation of Java identifiers.
pub mod names;
/// Properties of value classes.
pub mod property;
/// Presence flags and adapter calls around the encoding templates.
pub mod wrapper;

#[doc(hidden)]
/// Utility functions to help testing code generators.
pub mod test_utils;

mod config;
mod error;

pub use config::*;
pub use error::{Error, Result};
pub use extension::{Context, ParcelExtension, Property};
