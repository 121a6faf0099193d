// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! This crate describes the Java declarations consumed by the Parcelable code generator
//! [`parcel-generate`](https://crates.io/crates/parcel-generate): type mirrors, type elements
//! and the services that a host compiler offers to inspect them.
//!
//! # Type mirrors
//!
//! A [`TypeRef`] is written using the syntax of Java sources. Bounded type variables are
//! written `T extends Bound`.
//!
//! ```rust
//! use parcel_reflection::{PrimitiveKind, TypeRef};
//!
//! let ty: TypeRef = "java.util.List<test.Foo>".parse().unwrap();
//! assert_eq!(ty.declared_name(), Some("java.util.List"));
//! assert_eq!(ty.erasure(), TypeRef::declared("java.util.List"));
//!
//! let ty: TypeRef = "int[]".parse().unwrap();
//! assert_eq!(ty, TypeRef::array_of(TypeRef::Primitive(PrimitiveKind::Int)));
//! ```
//!
//! # Registries and type introspection
//!
//! A [`Registry`] maps qualified names to [`TypeElement`]s. It implements
//! [`TypeIntrospection`], the capability interface through which code generators walk the
//! type hierarchy. [`platform_registry`] returns the JDK, Android and Guava declarations
//! that code generators rely on.
//!
//! ```rust
//! use parcel_reflection::{platform_registry, register, TypeElement, TypeIntrospection, TypeRef};
//!
//! let mut registry = platform_registry();
//! register(
//!     &mut registry,
//!     TypeElement::class("test.Point").implements(TypeRef::declared("android.os.Parcelable")),
//! );
//! assert!(registry.is_assignable(
//!     &TypeRef::declared("test.Point"),
//!     &TypeRef::declared("android.os.Parcelable"),
//! ));
//! ```
//!
//! Registries (de)serialize with Serde, so that type descriptions can be saved on disk, e.g.
//! in YAML:
//!
//! ```yaml
//! test.Point:
//!   name: test.Point
//!   kind: Class
//!   interfaces: [android.os.Parcelable]
//!   methods:
//!     - name: x
//!       return_type: int
//!       modifiers: [Public, Abstract]
//! ```

mod element;
mod error;
mod host;
/// Qualified names of well-known platform types.
pub mod names;
mod registry;
mod types;

pub use element::*;
pub use error::{Error, Result};
pub use host::*;
pub use registry::{platform_registry, register, Registry};
pub use types::{package_name, simple_name, PrimitiveKind, TypeRef};
