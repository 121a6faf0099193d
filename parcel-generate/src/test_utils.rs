// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    config::{CodeGeneratorConfig, DocComments, FailureMode},
    extension::ParcelExtension,
    java::ClassPlan,
    property::{NULLABLE, PARCEL_ADAPTER},
    Result,
};
use maplit::btreemap;
use parcel_reflection::{
    names, platform_registry, register, simple_name, Annotation, Diagnostics, ExecutableElement,
    Modifier, Registry, TypeElement, TypeRef,
};

/// Qualified name of the adapter interface installed with the runtime.
pub const TYPE_ADAPTER: &str = "com.parcelgen.adapter.TypeAdapter";

/// Parse a type written in the syntax of Java sources.
pub fn ty(descriptor: &str) -> TypeRef {
    descriptor.parse().unwrap()
}

pub fn accessor(name: &str, descriptor: &str) -> ExecutableElement {
    ExecutableElement::accessor(name, ty(descriptor))
}

pub fn nullable(method: ExecutableElement) -> ExecutableElement {
    method.with_annotation(Annotation::new(format!("android.support.annotation.{}", NULLABLE)))
}

pub fn with_adapter(method: ExecutableElement, adapter: &str) -> ExecutableElement {
    method.with_annotation(
        Annotation::new(format!("com.parcelgen.adapter.{}", PARCEL_ADAPTER))
            .with_value(TypeRef::declared(adapter)),
    )
}

/// An abstract class implementing `Parcelable` with the given accessors.
pub fn value_class(name: &str, accessors: Vec<ExecutableElement>) -> TypeElement {
    let mut element = TypeElement::class(name)
        .with_modifier(Modifier::Abstract)
        .implements(TypeRef::declared(names::PARCELABLE));
    for accessor in accessors {
        element = element.with_method(accessor);
    }
    element
}

/// Declarations used by the properties of test value classes.
pub fn get_fixtures() -> Registry {
    let parcelable = || TypeRef::declared(names::PARCELABLE);
    let adapter_of = |name: &str| {
        TypeRef::parameterized(TYPE_ADAPTER, vec![TypeRef::declared(name)])
    };
    btreemap! {
        "test.Foo".to_string() => TypeElement::class("test.Foo").implements(parcelable()),
        "test.Bar".to_string() => TypeElement::class("test.Bar").extends(ty("test.Foo")),
        "test.Color".to_string() => TypeElement::enumeration("test.Color"),
        "test.Kind".to_string() => TypeElement::enumeration("test.Kind").implements(parcelable()),
        "test.Plain".to_string() => TypeElement::class("test.Plain"),
        "java.util.Date".to_string() => TypeElement::class("java.util.Date")
            .implements(ty(names::SERIALIZABLE)),
        TYPE_ADAPTER.to_string() => TypeElement::interface(TYPE_ADAPTER)
            .with_type_parameter(TypeRef::variable("T", None)),
        "test.DateAdapter".to_string() => TypeElement::class("test.DateAdapter")
            .implements(adapter_of("java.util.Date")),
        "test.BarTypeAdapter".to_string() => TypeElement::class("test.BarTypeAdapter")
            .implements(adapter_of("test.Plain")),
        // Its field name collides with `CREATOR`.
        "test.Creator".to_string() => TypeElement::class("test.Creator")
            .implements(adapter_of("test.Plain")),
    }
}

/// The platform declarations, the fixtures and the given value classes.
pub fn get_registry(value_classes: Vec<TypeElement>) -> Registry {
    let mut registry = platform_registry();
    registry.extend(get_fixtures());
    for element in value_classes {
        register(&mut registry, element);
    }
    registry
}

pub fn get_doc_comments() -> DocComments {
    btreemap! {
        "test.Point".to_string() => "A point.\n\nCoordinates are in pixels.".to_string(),
    }
}

/// The name of the generated class for a value class: `test.Foo` -> `AutoValue_Foo`.
pub fn generated_name(value_class: &str) -> String {
    format!("AutoValue_{}", simple_name(value_class))
}

/// Run the extension on `value_class` (which must be in `registry`) and return the
/// generated source together with the reported diagnostics.
pub fn generate(
    registry: &Registry,
    value_class: &str,
    config: CodeGeneratorConfig,
) -> (Result<Option<String>>, Diagnostics) {
    let element = &registry[value_class];
    let name = generated_name(value_class);
    let extension = ParcelExtension::new(config);
    let mut diagnostics = Diagnostics::new();
    let mut context = extension.context(element, registry, &mut diagnostics);
    let result = extension
        .applicable(&mut context)
        .and_then(|_| extension.generate(&mut context, &name, &format!("${}", name), true));
    (result, diagnostics)
}

/// Same as `generate` but return the plan of the generated class.
pub fn plan(
    registry: &Registry,
    value_class: &str,
    failure_mode: FailureMode,
) -> (Result<Option<ClassPlan>>, Diagnostics) {
    let element = &registry[value_class];
    let name = generated_name(value_class);
    let extension = ParcelExtension::new(CodeGeneratorConfig::new());
    let mut diagnostics = Diagnostics::new();
    let mut context = extension
        .context(element, registry, &mut diagnostics)
        .with_failure_mode(failure_mode);
    let result = extension.plan(&mut context, &name, &format!("${}", name), true);
    (result, diagnostics)
}
