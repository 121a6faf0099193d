// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::family::EncodingFamily;
use parcel_reflection::{names, ElementKind, TypeElement, TypeIntrospection, TypeRef};
use std::collections::HashSet;

/// Why a type cannot be written to a `Parcel`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// No encoding family applies.
    Unsupported,
    /// A map whose keys are not exactly `String`, or whose values are not supported.
    InvalidMap,
    /// A `ParcelAdapter` annotation that does not name an adapter class.
    MissingAdapter,
}

/// Maps types to encoding families by walking their supertype lattice.
pub struct Classifier<'a> {
    types: &'a dyn TypeIntrospection,
}

impl<'a> Classifier<'a> {
    pub fn new(types: &'a dyn TypeIntrospection) -> Self {
        Self { types }
    }

    /// The encoding family of `ty`, or `None` when no family applies.
    ///
    /// Maps are classified by their erased shape only; see `validate` for the constraints on
    /// their type arguments.
    pub fn classify(&self, ty: &TypeRef) -> Option<EncodingFamily> {
        let family = match ty {
            TypeRef::Void => None,
            TypeRef::Primitive(kind) => Some(EncodingFamily::Primitive(*kind)),
            TypeRef::Variable { bound, .. } => match bound {
                Some(bound) => self.classify(bound),
                None => None,
            },
            TypeRef::Array(component) => self.classify_array(component),
            TypeRef::Declared { .. } if ty.is_exactly(names::OBJECT) => {
                Some(EncodingFamily::Value)
            }
            TypeRef::Declared { .. } => self.classify_declared(ty),
        };
        tracing::debug!("classified {} as {:?}", ty, family);
        family
    }

    /// Classify `ty` and check the type arguments of maps, recursively.
    pub fn validate(&self, ty: &TypeRef) -> Result<EncodingFamily, Rejection> {
        let ty = resolve(ty);
        let family = self.classify(ty).ok_or(Rejection::Unsupported)?;
        if family.is_map() {
            match ty.type_arguments() {
                [key, value] if key.is_exactly(names::STRING) => {
                    if self.validate(value).is_err() {
                        return Err(Rejection::InvalidMap);
                    }
                }
                _ => return Err(Rejection::InvalidMap),
            }
        }
        Ok(family)
    }

    /// Whether the superclass chain of `ty` (starting with `ty` itself) contains `name`.
    pub fn extends(&self, ty: &TypeRef, name: &str) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(resolve(ty).erasure());
        while let Some(t) = current {
            match t.declared_name() {
                Some(n) if n == name => return true,
                Some(n) if visited.insert(n.to_string()) => (),
                _ => return false,
            }
            current = self.types.superclass(&t).map(|s| s.erasure());
        }
        false
    }

    fn classify_array(&self, component: &TypeRef) -> Option<EncodingFamily> {
        EncodingFamily::from_array_component(component).or_else(|| {
            self.validate(component)
                .ok()
                .map(|_| EncodingFamily::Value)
        })
    }

    fn classify_declared(&self, ty: &TypeRef) -> Option<EncodingFamily> {
        let element = self.types.as_element(ty)?;
        let family = self.walk(element, &mut HashSet::new())?;
        let promoted = match family {
            EncodingFamily::Parcelable => family,
            _ if element.kind == ElementKind::Enum => EncodingFamily::Enum,
            EncodingFamily::List if self.extends(ty, names::IMMUTABLE_COLLECTION) => {
                EncodingFamily::ImmutableCollection
            }
            EncodingFamily::Map if self.extends(ty, names::IMMUTABLE_MAP) => {
                EncodingFamily::ImmutableMap
            }
            _ => family,
        };
        Some(promoted)
    }

    /// First match over the lattice: the element itself, then each of its interfaces
    /// (recursively, in declaration order), then its superclass.
    fn walk(
        &self,
        start: &'a TypeElement,
        visited: &mut HashSet<&'a str>,
    ) -> Option<EncodingFamily> {
        let mut current = Some(start);
        while let Some(element) = current {
            if !visited.insert(element.name.as_str()) {
                return None;
            }
            if let Some(family) = EncodingFamily::from_declared_name(&element.name) {
                return Some(family);
            }
            for interface in &element.interfaces {
                if let Some(family) = self
                    .types
                    .as_element(interface)
                    .and_then(|e| self.walk(e, visited))
                {
                    return Some(family);
                }
            }
            current = self
                .types
                .superclass(&TypeRef::declared(element.name.clone()))
                .and_then(|s| self.types.as_element(&s));
        }
        None
    }
}

/// Replace bounded type variables by their bound.
pub(crate) fn resolve(ty: &TypeRef) -> &TypeRef {
    match ty {
        TypeRef::Variable {
            bound: Some(bound), ..
        } => resolve(bound),
        _ => ty,
    }
}
