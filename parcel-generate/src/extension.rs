// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    classifier::{Classifier, Rejection},
    config::{CodeGeneratorConfig, FailureMode},
    error::{Error, Result},
    java::{ClassPlan, CodeGenerator, PlannedProperty, CREATOR},
    names::NameAllocator,
    property::PropertyModel,
};
use parcel_reflection::{
    names, DiagnosticKind, ElementPath, ExecutableElement, Messager, PrimitiveKind, TypeElement,
    TypeIntrospection, TypeRef,
};

const DESCRIBE_CONTENTS: &str = "describeContents";
const WRITE_TO_PARCEL: &str = "writeToParcel";

/// Methods of `Object` that are never properties.
const OBJECT_METHODS: &[&str] = &["equals", "hashCode", "toString"];

/// An abstract accessor of a value class.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    /// Name used for the constructor parameter.
    pub name: String,
    pub method: ExecutableElement,
}

/// The value class being processed, along with the services of the host.
pub struct Context<'a> {
    pub package_name: String,
    pub value_class: &'a TypeElement,
    /// Properties in declaration order. This order is the order of the wire format.
    pub properties: Vec<Property>,
    pub types: &'a dyn TypeIntrospection,
    pub messager: &'a mut dyn Messager,
    pub failure_mode: FailureMode,
}

impl<'a> Context<'a> {
    /// Create a context for `value_class`, enumerating its properties with `properties_of`.
    pub fn new(
        value_class: &'a TypeElement,
        types: &'a dyn TypeIntrospection,
        messager: &'a mut dyn Messager,
    ) -> Self {
        Self {
            package_name: value_class.package_name().to_string(),
            value_class,
            properties: properties_of(value_class, types),
            types,
            messager,
            failure_mode: FailureMode::default(),
        }
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }

    fn value_type(&self) -> TypeRef {
        TypeRef::declared(self.value_class.name.clone())
    }

    fn error(&mut self, message: &str, member: &str) {
        let owner = self.value_class.name.clone();
        self.error_at(owner, message, member);
    }

    /// Report an error on a member of `owner`, which may be a supertype of the value class.
    fn error_at(&mut self, owner: String, message: &str, member: &str) {
        let element = ElementPath::member(owner, member);
        tracing::debug!("{}: {}", element, message);
        self.messager
            .print_message(DiagnosticKind::Error, message, &element);
    }
}

/// Generates the `Parcelable` implementation of value classes.
pub struct ParcelExtension {
    config: CodeGeneratorConfig,
}

impl ParcelExtension {
    pub fn new(config: CodeGeneratorConfig) -> Self {
        Self { config }
    }

    /// A context for `value_class` using the configured failure mode.
    pub fn context<'a>(
        &self,
        value_class: &'a TypeElement,
        types: &'a dyn TypeIntrospection,
        messager: &'a mut dyn Messager,
    ) -> Context<'a> {
        Context::new(value_class, types, messager).with_failure_mode(self.config.failure_mode())
    }

    /// Whether the value class implements `Parcelable`. Hand-written `CREATOR` fields and
    /// `writeToParcel` implementations are reported and returned as errors.
    pub fn applicable(&self, context: &mut Context) -> Result<bool> {
        let ty = context.value_type();
        if !context
            .types
            .is_assignable(&ty, &TypeRef::declared(names::PARCELABLE))
        {
            return Ok(false);
        }

        let class = context.value_class.name.clone();
        let types = context.types;
        let mut conflicts = Vec::new();
        let creator = types.all_fields(&ty).into_iter().find(|(_, field)| {
            field.name == CREATOR
                && field.is_static()
                && field.ty.erasure().is_exactly(names::PARCELABLE_CREATOR)
        });
        if let Some((owner, _)) = creator {
            conflicts.push((
                owner.name.clone(),
                CREATOR,
                format!(
                    "Manual implementation of a static Parcelable.Creator<T> {} field found when \
                     processing {}. Remove it so that the implementation can be generated.",
                    CREATOR, class
                ),
            ));
        }
        let write_to_parcel = types
            .local_and_inherited_methods(&ty)
            .into_iter()
            .find(|(_, method)| is_write_to_parcel(method) && !method.is_abstract());
        if let Some((owner, _)) = write_to_parcel {
            conflicts.push((
                owner.name.clone(),
                WRITE_TO_PARCEL,
                format!(
                    "Manual implementation of Parcelable#{} found when processing {}. Remove it \
                     so that the implementation can be generated.",
                    WRITE_TO_PARCEL, class
                ),
            ));
        }

        for (owner, member, message) in &conflicts {
            context.error_at(owner.clone(), message, member);
        }
        match conflicts.into_iter().next() {
            Some((_, member, _)) => Err(Error::ConflictingMember {
                class,
                member: member.to_string(),
            }),
            None => Ok(true),
        }
    }

    /// Methods implemented by the generated class, which are not properties.
    pub fn consume_properties(&self) -> Vec<&'static str> {
        vec![DESCRIBE_CONTENTS, WRITE_TO_PARCEL]
    }

    pub fn must_be_final(&self) -> bool {
        true
    }

    /// Validate the properties of the value class and plan the generated class.
    ///
    /// Invalid properties are reported through the messager. In strict mode, the first one is
    /// returned as an error; otherwise all of them are reported and `Ok(None)` is returned.
    pub fn plan(
        &self,
        context: &mut Context,
        class_name: &str,
        class_to_extend: &str,
        is_final: bool,
    ) -> Result<Option<ClassPlan>> {
        let mut allocator = NameAllocator::new();
        allocator.new_name(CREATOR);
        let model = PropertyModel::build(&context.properties, &mut allocator);

        let classifier = Classifier::new(context.types);
        let mut properties = Vec::new();
        let mut failed = false;
        for descriptor in model.properties {
            match descriptor.encoding_path(&classifier) {
                Ok(path) => properties.push(PlannedProperty { descriptor, path }),
                Err(rejection) => {
                    let class = context.value_class.name.clone();
                    let (message, error) = match rejection {
                        Rejection::Unsupported => (
                            format!(
                                "Property {} of type {} is not a supported Parcelable type.",
                                descriptor.method_name, descriptor.declared_type
                            ),
                            Error::UnsupportedType {
                                class,
                                property: descriptor.method_name.clone(),
                            },
                        ),
                        Rejection::MissingAdapter => (
                            format!(
                                "Property {} is annotated with @ParcelAdapter but does not name \
                                 a TypeAdapter class.",
                                descriptor.method_name
                            ),
                            Error::MissingAdapter {
                                class,
                                property: descriptor.method_name.clone(),
                            },
                        ),
                        Rejection::InvalidMap => (
                            "Maps can only have String objects for keys and valid Parcelable \
                             types for values."
                                .to_string(),
                            Error::InvalidMapType {
                                class,
                                property: descriptor.method_name.clone(),
                            },
                        ),
                    };
                    context.error(&message, &descriptor.method_name);
                    if context.failure_mode == FailureMode::Strict {
                        return Err(error);
                    }
                    failed = true;
                }
            }
        }
        if failed {
            tracing::debug!("skipping {}", context.value_class.name);
            return Ok(None);
        }

        let describe_contents = !context
            .types
            .local_and_inherited_methods(&context.value_type())
            .into_iter()
            .any(|(_, method)| is_describe_contents(method) && !method.is_abstract());

        Ok(Some(ClassPlan {
            package_name: context.package_name.clone(),
            class_name: class_name.to_string(),
            superclass: class_to_extend.to_string(),
            value_class: context.value_class.name.clone(),
            type_parameters: context.value_class.type_parameters.clone(),
            is_final,
            properties,
            adapters: model.adapters,
            describe_contents,
        }))
    }

    /// The source code of the generated class, or `None` when the value class has
    /// unsupported properties and the failure mode is soft.
    pub fn generate(
        &self,
        context: &mut Context,
        class_name: &str,
        class_to_extend: &str,
        is_final: bool,
    ) -> Result<Option<String>> {
        tracing::debug!(
            "generating {} for {}",
            class_name,
            context.value_class.name
        );
        let plan = match self.plan(context, class_name, class_to_extend, is_final)? {
            Some(plan) => plan,
            None => return Ok(None),
        };
        let mut source = Vec::new();
        CodeGenerator::new(&self.config).output(&mut source, &plan)?;
        let source = String::from_utf8(source).map_err(|e| Error::Internal(e.to_string()))?;
        tracing::trace!("{}", source);
        Ok(Some(source))
    }
}

fn is_write_to_parcel(method: &ExecutableElement) -> bool {
    method.name == WRITE_TO_PARCEL
        && method.return_type == TypeRef::Void
        && method.parameters.len() == 2
        && method.parameters[0].ty.is_exactly(names::PARCEL)
        && method.parameters[1].ty == TypeRef::Primitive(PrimitiveKind::Int)
}

fn is_describe_contents(method: &ExecutableElement) -> bool {
    method.name == DESCRIBE_CONTENTS
        && method.parameters.is_empty()
        && method.return_type == TypeRef::Primitive(PrimitiveKind::Int)
}

/// The properties of a value class: its abstract, non-void accessors without parameters,
/// local or inherited, in declaration order. When every accessor is prefixed with `get` (or
/// `is`, for booleans), the prefix is dropped from the property names.
pub fn properties_of(value_class: &TypeElement, types: &dyn TypeIntrospection) -> Vec<Property> {
    let mut methods = types
        .local_and_inherited_methods(&TypeRef::declared(value_class.name.clone()))
        .into_iter()
        .map(|(_, method)| method)
        .collect::<Vec<_>>();
    if methods.is_empty() {
        methods = value_class.methods.iter().collect();
    }
    let accessors = methods
        .into_iter()
        .filter(|m| {
            m.is_abstract()
                && !m.is_static()
                && m.parameters.is_empty()
                && m.return_type != TypeRef::Void
                && !OBJECT_METHODS.contains(&m.name.as_str())
                && m.name != DESCRIBE_CONTENTS
                && m.name != WRITE_TO_PARCEL
        })
        .collect::<Vec<_>>();

    let prefixed = !accessors.is_empty()
        && accessors
            .iter()
            .all(|m| strip_prefix(&m.name, &m.return_type).is_some());
    accessors
        .into_iter()
        .map(|method| Property {
            name: if prefixed {
                strip_prefix(&method.name, &method.return_type)
                    .unwrap_or_else(|| method.name.clone())
            } else {
                method.name.clone()
            },
            method: method.clone(),
        })
        .collect()
}

/// `getFooBar` -> `fooBar`, `isEnabled` -> `enabled` (booleans only), `getURL` -> `URL`.
fn strip_prefix(name: &str, return_type: &TypeRef) -> Option<String> {
    let boolean = *return_type == TypeRef::Primitive(PrimitiveKind::Boolean)
        || return_type.is_exactly(PrimitiveKind::Boolean.boxed_name());
    let rest = name
        .strip_prefix("get")
        .or_else(|| name.strip_prefix("is").filter(|_| boolean))?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    if chars.next().map_or(false, char::is_uppercase) {
        return Some(rest.to_string());
    }
    Some(first.to_lowercase().chain(rest[first.len_utf8()..].chars()).collect())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefixes() {
        let int = TypeRef::Primitive(PrimitiveKind::Int);
        let boolean = TypeRef::Primitive(PrimitiveKind::Boolean);
        assert_eq!(strip_prefix("getFooBar", &int), Some("fooBar".to_string()));
        assert_eq!(strip_prefix("getURL", &int), Some("URL".to_string()));
        assert_eq!(strip_prefix("isAwesome", &boolean), Some("awesome".to_string()));
        assert_eq!(strip_prefix("isAwesome", &int), None);
        assert_eq!(strip_prefix("get", &int), None);
        assert_eq!(strip_prefix("getter", &int), None);
        assert_eq!(strip_prefix("name", &int), None);
    }
}
