// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::types::{self, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Class,
    Interface,
    Enum,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
}

/// An annotation on a method. Only the (simple or qualified) name and an optional
/// class-literal `value` are recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<TypeRef>,
}

impl Annotation {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: TypeRef) -> Self {
        self.value = Some(value);
        self
    }

    pub fn simple_name(&self) -> &str {
        types::simple_name(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// A method declared by a type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableElement {
    pub name: String,
    pub return_type: TypeRef,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ExecutableElement {
    pub fn new<S: Into<String>>(name: S, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// An `abstract` accessor, the usual shape of a value-class property.
    pub fn accessor<S: Into<String>>(name: S, return_type: TypeRef) -> Self {
        Self::new(name, return_type).with_modifier(Modifier::Abstract)
    }

    pub fn with_parameter<S: Into<String>>(mut self, name: S, ty: TypeRef) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    /// Find an annotation by simple name.
    pub fn annotation(&self, simple_name: &str) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|a| a.simple_name() == simple_name)
    }

    /// Erased parameter types, used to decide whether two methods override each other.
    pub fn erased_signature(&self) -> (String, Vec<TypeRef>) {
        (
            self.name.clone(),
            self.parameters.iter().map(|p| p.ty.erasure()).collect(),
        )
    }
}

/// A field declared by a type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableElement {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl VariableElement {
    pub fn new<S: Into<String>>(name: S, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

/// A class, interface or enum declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeElement {
    /// Qualified name, e.g. `test.Foo`.
    pub name: String,
    pub kind: ElementKind,
    /// Direct superclass. When absent, classes extend `java.lang.Object` and enums extend
    /// `java.lang.Enum`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeRef>,
    /// Directly implemented (or extended, for interfaces) interfaces, in declaration order.
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Type parameters, as type variables.
    #[serde(default)]
    pub type_parameters: Vec<TypeRef>,
    #[serde(default)]
    pub methods: Vec<ExecutableElement>,
    #[serde(default)]
    pub fields: Vec<VariableElement>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl TypeElement {
    fn new<S: Into<String>>(name: S, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn class<S: Into<String>>(name: S) -> Self {
        Self::new(name, ElementKind::Class)
    }

    pub fn interface<S: Into<String>>(name: S) -> Self {
        Self::new(name, ElementKind::Interface)
    }

    pub fn enumeration<S: Into<String>>(name: S) -> Self {
        Self::new(name, ElementKind::Enum)
    }

    pub fn extends(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_type_parameter(mut self, variable: TypeRef) -> Self {
        self.type_parameters.push(variable);
        self
    }

    pub fn with_method(mut self, method: ExecutableElement) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, field: VariableElement) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }

    pub fn simple_name(&self) -> &str {
        types::simple_name(&self.name)
    }

    pub fn package_name(&self) -> &str {
        types::package_name(&self.name)
    }

    /// The type declared by this element, parameterized by its own type variables.
    pub fn as_type(&self) -> TypeRef {
        TypeRef::parameterized(self.name.clone(), self.type_parameters.clone())
    }
}

/// Location of a diagnostic: a type, optionally narrowed to one of its members.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementPath {
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
}

impl ElementPath {
    pub fn class<S: Into<String>>(class: S) -> Self {
        Self {
            class: class.into(),
            member: None,
        }
    }

    pub fn member<S: Into<String>, M: Into<String>>(class: S, member: M) -> Self {
        Self {
            class: class.into(),
            member: Some(member.into()),
        }
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}#{}", self.class, member),
            None => write!(f, "{}", self.class),
        }
    }
}
