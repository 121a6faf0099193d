// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    element::{ElementKind, ElementPath, ExecutableElement, TypeElement, VariableElement},
    names,
    types::TypeRef,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Type introspection services offered by the host compiler.
///
/// Only `element` is required. The other operations are derived from the element
/// declarations and may be overridden by hosts with a faster (or more precise) model.
pub trait TypeIntrospection {
    /// Look up the declaration of a type by qualified name.
    fn element(&self, name: &str) -> Option<&TypeElement>;

    /// The element declaring `ty`, if any. Type variables resolve through their bound.
    fn as_element(&self, ty: &TypeRef) -> Option<&TypeElement> {
        match ty {
            TypeRef::Declared { name, .. } => self.element(name),
            TypeRef::Variable { .. } => {
                let bound = self.upper_bound(ty)?;
                self.as_element(&bound)
            }
            _ => None,
        }
    }

    /// Upper bound of a type variable.
    fn upper_bound(&self, ty: &TypeRef) -> Option<TypeRef> {
        match ty {
            TypeRef::Variable {
                bound: Some(bound), ..
            } => Some(bound.as_ref().clone()),
            _ => None,
        }
    }

    /// Direct superclass of a declared type. `None` for interfaces, `java.lang.Object` and
    /// unknown types.
    fn superclass(&self, ty: &TypeRef) -> Option<TypeRef> {
        let element = self.as_element(ty)?;
        match (&element.superclass, element.kind) {
            (Some(superclass), _) => Some(superclass.clone()),
            (None, ElementKind::Interface) => None,
            (None, ElementKind::Enum) => Some(TypeRef::parameterized(
                names::ENUM,
                vec![TypeRef::declared(element.name.clone())],
            )),
            (None, ElementKind::Class) if element.name != names::OBJECT => {
                Some(TypeRef::declared(names::OBJECT))
            }
            (None, ElementKind::Class) => None,
        }
    }

    /// Directly declared interfaces of a type, in declaration order.
    fn interfaces(&self, ty: &TypeRef) -> Vec<TypeRef> {
        self.as_element(ty)
            .map(|element| element.interfaces.clone())
            .unwrap_or_default()
    }

    /// Whether a value of type `from` may be assigned to `to`, compared after erasure.
    fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        let (from, to) = (from.erasure(), to.erasure());
        match (&from, &to) {
            (TypeRef::Primitive(a), TypeRef::Primitive(b)) => a == b,
            (TypeRef::Array(a), TypeRef::Array(b)) => match (a.as_ref(), b.as_ref()) {
                (TypeRef::Primitive(x), TypeRef::Primitive(y)) => x == y,
                _ => self.is_assignable(a, b),
            },
            (TypeRef::Array(_), TypeRef::Declared { name, .. }) => {
                name == names::OBJECT || name == names::SERIALIZABLE
            }
            (TypeRef::Declared { .. }, TypeRef::Declared { name: target, .. }) => {
                if target == names::OBJECT {
                    return true;
                }
                let mut seen = BTreeSet::new();
                let mut stack = vec![from.clone()];
                while let Some(current) = stack.pop() {
                    let name = match current.declared_name() {
                        Some(name) => name.to_string(),
                        None => continue,
                    };
                    if &name == target {
                        return true;
                    }
                    if !seen.insert(name) {
                        continue;
                    }
                    stack.extend(self.interfaces(&current).iter().map(TypeRef::erasure));
                    if let Some(superclass) = self.superclass(&current) {
                        stack.push(superclass.erasure());
                    }
                }
                false
            }
            _ => false,
        }
    }

    /// All known declarations in the hierarchy of `ty`: the type itself and its superclass
    /// chain first, then every interface, breadth first in declaration order.
    fn hierarchy(&self, ty: &TypeRef) -> Vec<&TypeElement> {
        let mut visited = HashSet::new();
        let mut result = Vec::new();

        let mut current = Some(ty.clone());
        while let Some(t) = current {
            match self.as_element(&t) {
                Some(element) if visited.insert(element.name.clone()) => result.push(element),
                _ => break,
            }
            current = self.superclass(&t);
        }

        let mut queue = result
            .iter()
            .flat_map(|element| element.interfaces.iter().cloned())
            .collect::<VecDeque<_>>();
        while let Some(interface) = queue.pop_front() {
            if let Some(element) = self.as_element(&interface) {
                if visited.insert(element.name.clone()) {
                    queue.extend(element.interfaces.iter().cloned());
                    result.push(element);
                }
            }
        }
        result
    }

    /// Methods declared by `ty` or inherited from its supertypes, skipping those overridden
    /// by a more specific declaration. Static methods of supertypes are not inherited.
    fn local_and_inherited_methods(
        &self,
        ty: &TypeRef,
    ) -> Vec<(&TypeElement, &ExecutableElement)> {
        let mut signatures = HashSet::new();
        let mut result = Vec::new();
        for (depth, element) in self.hierarchy(ty).into_iter().enumerate() {
            for method in &element.methods {
                if depth > 0 && method.is_static() {
                    continue;
                }
                if signatures.insert(method.erased_signature()) {
                    result.push((element, method));
                }
            }
        }
        result
    }

    /// Fields declared by `ty` or any of its supertypes.
    fn all_fields(&self, ty: &TypeRef) -> Vec<(&TypeElement, &VariableElement)> {
        self.hierarchy(ty)
            .into_iter()
            .flat_map(|element| element.fields.iter().map(move |field| (element, field)))
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    Error,
    Warning,
    Note,
}

/// A message reported to the host, attached to a source element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub element: ElementPath,
}

/// Diagnostic channel of the host.
pub trait Messager {
    fn print_message(&mut self, kind: DiagnosticKind, message: &str, element: &ElementPath);
}

/// A `Messager` keeping every diagnostic in memory.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Messager for Diagnostics {
    fn print_message(&mut self, kind: DiagnosticKind, message: &str, element: &ElementPath) {
        self.entries.push(Diagnostic {
            kind,
            message: message.to_string(),
            element: element.clone(),
        });
    }
}
