// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    element::{ExecutableElement, Modifier, TypeElement},
    host::TypeIntrospection,
    names,
    types::{PrimitiveKind, TypeRef},
};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// A set of type declarations indexed by qualified name.
pub type Registry = BTreeMap<String, TypeElement>;

impl TypeIntrospection for Registry {
    fn element(&self, name: &str) -> Option<&TypeElement> {
        self.get(name)
    }
}

/// Insert `element` in `registry`, replacing any previous declaration with the same name.
pub fn register(registry: &mut Registry, element: TypeElement) {
    registry.insert(element.name.clone(), element);
}

static PLATFORM: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::new();
    for element in platform_elements() {
        register(&mut registry, element);
    }
    registry
});

/// The JDK, Android and Guava declarations that the code generator knows about.
pub fn platform_registry() -> Registry {
    PLATFORM.clone()
}

fn ty(name: &str) -> TypeRef {
    TypeRef::declared(name)
}

fn generic(name: &str, args: &[&str]) -> TypeRef {
    TypeRef::parameterized(name, args.iter().map(|a| TypeRef::variable(*a, None)).collect())
}

fn platform_elements() -> Vec<TypeElement> {
    let int = TypeRef::Primitive(PrimitiveKind::Int);
    let mut elements = vec![
        TypeElement::class(names::OBJECT),
        TypeElement::interface(names::SERIALIZABLE),
        TypeElement::interface(names::COMPARABLE).with_type_parameter(TypeRef::variable("T", None)),
        TypeElement::interface(names::CHAR_SEQUENCE),
        TypeElement::class(names::STRING)
            .with_modifier(Modifier::Final)
            .implements(ty(names::SERIALIZABLE))
            .implements(TypeRef::parameterized(names::COMPARABLE, vec![ty(names::STRING)]))
            .implements(ty(names::CHAR_SEQUENCE)),
        TypeElement::class(names::NUMBER)
            .with_modifier(Modifier::Abstract)
            .implements(ty(names::SERIALIZABLE)),
        TypeElement::class(names::ENUM)
            .with_modifier(Modifier::Abstract)
            .with_type_parameter(TypeRef::variable(
                "E",
                Some(generic(names::ENUM, &["E"])),
            ))
            .implements(generic(names::COMPARABLE, &["E"]))
            .implements(ty(names::SERIALIZABLE)),
        // java.util
        TypeElement::interface(names::COLLECTION).with_type_parameter(TypeRef::variable("E", None)),
        TypeElement::interface(names::RANDOM_ACCESS),
        TypeElement::interface(names::LIST)
            .with_type_parameter(TypeRef::variable("E", None))
            .implements(generic(names::COLLECTION, &["E"])),
        TypeElement::class(names::ARRAY_LIST)
            .with_type_parameter(TypeRef::variable("E", None))
            .implements(generic(names::LIST, &["E"]))
            .implements(ty(names::RANDOM_ACCESS))
            .implements(ty(names::SERIALIZABLE)),
        TypeElement::interface(names::MAP)
            .with_type_parameter(TypeRef::variable("K", None))
            .with_type_parameter(TypeRef::variable("V", None)),
        TypeElement::class(names::HASH_MAP)
            .with_type_parameter(TypeRef::variable("K", None))
            .with_type_parameter(TypeRef::variable("V", None))
            .implements(generic(names::MAP, &["K", "V"]))
            .implements(ty(names::SERIALIZABLE)),
        // android
        TypeElement::interface(names::PARCELABLE)
            .with_method(ExecutableElement::accessor("describeContents", int.clone()))
            .with_method(
                ExecutableElement::accessor("writeToParcel", TypeRef::Void)
                    .with_parameter("dest", ty(names::PARCEL))
                    .with_parameter("flags", int),
            ),
        TypeElement::interface(names::PARCELABLE_CREATOR)
            .with_type_parameter(TypeRef::variable("T", None)),
        TypeElement::class(names::PARCEL).with_modifier(Modifier::Final),
        TypeElement::class(names::BUNDLE)
            .with_modifier(Modifier::Final)
            .implements(ty(names::PARCELABLE)),
        TypeElement::class(names::PERSISTABLE_BUNDLE)
            .with_modifier(Modifier::Final)
            .implements(ty(names::PARCELABLE)),
        TypeElement::interface(names::IBINDER),
        TypeElement::class(names::SIZE).with_modifier(Modifier::Final),
        TypeElement::class(names::SIZE_F).with_modifier(Modifier::Final),
        TypeElement::class(names::SPARSE_ARRAY).with_type_parameter(TypeRef::variable("E", None)),
        TypeElement::class(names::SPARSE_BOOLEAN_ARRAY).implements(ty(names::PARCELABLE)),
        TypeElement::class(names::TEXT_UTILS),
        // guava
        TypeElement::class(names::IMMUTABLE_COLLECTION)
            .with_modifier(Modifier::Abstract)
            .with_type_parameter(TypeRef::variable("E", None))
            .implements(generic(names::COLLECTION, &["E"]))
            .implements(ty(names::SERIALIZABLE)),
        TypeElement::class(names::IMMUTABLE_LIST)
            .with_modifier(Modifier::Abstract)
            .with_type_parameter(TypeRef::variable("E", None))
            .extends(generic(names::IMMUTABLE_COLLECTION, &["E"]))
            .implements(generic(names::LIST, &["E"]))
            .implements(ty(names::RANDOM_ACCESS)),
        TypeElement::class(names::IMMUTABLE_SET)
            .with_modifier(Modifier::Abstract)
            .with_type_parameter(TypeRef::variable("E", None))
            .extends(generic(names::IMMUTABLE_COLLECTION, &["E"])),
        TypeElement::class(names::IMMUTABLE_MAP)
            .with_modifier(Modifier::Abstract)
            .with_type_parameter(TypeRef::variable("K", None))
            .with_type_parameter(TypeRef::variable("V", None))
            .implements(generic(names::MAP, &["K", "V"]))
            .implements(ty(names::SERIALIZABLE)),
    ];
    for kind in PrimitiveKind::ALL.iter() {
        let boxed = TypeElement::class(kind.boxed_name()).with_modifier(Modifier::Final);
        let boxed = match kind {
            PrimitiveKind::Boolean | PrimitiveKind::Char => boxed
                .implements(ty(names::SERIALIZABLE))
                .implements(TypeRef::parameterized(
                    names::COMPARABLE,
                    vec![ty(kind.boxed_name())],
                )),
            _ => boxed
                .extends(ty(names::NUMBER))
                .implements(TypeRef::parameterized(
                    names::COMPARABLE,
                    vec![ty(kind.boxed_name())],
                )),
        };
        elements.push(boxed);
    }
    elements
}
