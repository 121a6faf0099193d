// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

/// The eight primitive types of the Java language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Char,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Source keyword, e.g. `int`.
    pub fn keyword(self) -> &'static str {
        use PrimitiveKind::*;
        match self {
            Boolean => "boolean",
            Byte => "byte",
            Short => "short",
            Char => "char",
            Int => "int",
            Long => "long",
            Float => "float",
            Double => "double",
        }
    }

    /// Qualified name of the wrapper class, e.g. `java.lang.Integer`.
    pub fn boxed_name(self) -> &'static str {
        use PrimitiveKind::*;
        match self {
            Boolean => "java.lang.Boolean",
            Byte => "java.lang.Byte",
            Short => "java.lang.Short",
            Char => "java.lang.Character",
            Int => "java.lang.Integer",
            Long => "java.lang.Long",
            Float => "java.lang.Float",
            Double => "java.lang.Double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.keyword() == keyword)
    }

    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.boxed_name() == name)
    }
}

/// A type mirror: the static type of an accessor, a parameter or a field.
///
/// `TypeRef` (de)serializes as a string using the syntax of Java sources, extended with
/// `T extends Bound` for bounded type variables:
/// * `int`, `void`, `java.lang.String`, `byte[]`
/// * `java.util.Map<java.lang.String, test.Foo>`
/// * `T extends android.os.Parcelable`
/// * `T` (a non-primitive identifier without any dot denotes an unbounded type variable)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Void,
    Primitive(PrimitiveKind),
    /// A class, interface or enum, with its (possibly empty) list of type arguments.
    Declared { name: String, args: Vec<TypeRef> },
    Array(Box<TypeRef>),
    Variable {
        name: String,
        bound: Option<Box<TypeRef>>,
    },
}

impl TypeRef {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeRef::Primitive(kind)
    }

    pub fn declared<S: Into<String>>(name: S) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn parameterized<S: Into<String>>(name: S, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args,
        }
    }

    pub fn array_of(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    pub fn variable<S: Into<String>>(name: S, bound: Option<TypeRef>) -> Self {
        TypeRef::Variable {
            name: name.into(),
            bound: bound.map(Box::new),
        }
    }

    /// Strip generic arguments. Type variables erase to the erasure of their bound
    /// (or `java.lang.Object` when unbounded).
    pub fn erasure(&self) -> TypeRef {
        match self {
            TypeRef::Declared { name, .. } => TypeRef::declared(name.clone()),
            TypeRef::Array(component) => TypeRef::array_of(component.erasure()),
            TypeRef::Variable { bound, .. } => match bound {
                Some(bound) => bound.erasure(),
                None => TypeRef::declared(crate::names::OBJECT),
            },
            TypeRef::Void | TypeRef::Primitive(_) => self.clone(),
        }
    }

    /// Qualified name of a declared type, ignoring type arguments.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeRef::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Declared { args, .. } => args,
            _ => &[],
        }
    }

    pub fn component_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Whether this is exactly the declared type `name` (no type arguments).
    pub fn is_exactly(&self, name: &str) -> bool {
        matches!(self, TypeRef::Declared { name: n, args } if n == name && args.is_empty())
    }

    pub fn is_parameterized(&self) -> bool {
        !self.type_arguments().is_empty()
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, TypeRef::Variable { .. })
    }

    /// Textual form accepted by `FromStr`, keeping the bounds of type variables.
    pub fn descriptor(&self) -> String {
        match self {
            TypeRef::Variable {
                name,
                bound: Some(bound),
            } => format!("{} extends {}", name, bound.descriptor()),
            TypeRef::Declared { name, args } if !args.is_empty() => format!(
                "{}<{}>",
                name,
                args.iter()
                    .map(TypeRef::descriptor)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            TypeRef::Array(component) => format!("{}[]", component.descriptor()),
            _ => self.to_string(),
        }
    }
}

/// Last segment of a qualified name: `android.os.Parcelable.Creator` -> `Creator`.
pub fn simple_name(qualified_name: &str) -> &str {
    match qualified_name.rfind('.') {
        Some(index) => &qualified_name[index + 1..],
        None => qualified_name,
    }
}

/// Package of a qualified name, guessed the usual way: the leading lower-case segments.
/// `android.os.Parcelable.Creator` -> `android.os`.
pub fn package_name(qualified_name: &str) -> &str {
    let mut end = 0;
    for (index, segment) in qualified_name.split('.').enumerate() {
        if segment.chars().next().map_or(true, char::is_uppercase) || segment.starts_with('$') {
            break;
        }
        end += segment.len() + if index == 0 { 0 } else { 1 };
    }
    &qualified_name[..end]
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Void => write!(f, "void"),
            TypeRef::Primitive(kind) => write!(f, "{}", kind.keyword()),
            TypeRef::Declared { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::Array(component) => write!(f, "{}[]", component),
            TypeRef::Variable { name, .. } => write!(f, "{}", name),
        }
    }
}

impl FromStr for TypeRef {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut parser = Parser::new(input);
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if let Some(c) = parser.peek() {
            return Err(parser.error(format!("unexpected character '{}'", c)));
        }
        Ok(ty)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.descriptor()
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            position: 0,
        }
    }

    fn error(&self, message: String) -> Error {
        Error::Parse {
            input: self.input.to_string(),
            message: format!("{} at offset {}", message, self.position),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.position += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", expected)))
        }
    }

    fn identifier(&mut self) -> Result<String> {
        self.skip_whitespace();
        let start = self.position;
        while self
            .peek()
            .map_or(false, |c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
        {
            self.position += 1;
        }
        if start == self.position {
            return Err(self.error("expected a type name".to_string()));
        }
        Ok(self.chars[start..self.position].iter().collect())
    }

    /// Consume the keyword `extends` if it comes next.
    fn eat_extends(&mut self) -> bool {
        self.skip_whitespace();
        let keyword: Vec<char> = "extends".chars().collect();
        let end = self.position + keyword.len();
        if end <= self.chars.len()
            && self.chars[self.position..end] == keyword[..]
            && self.chars.get(end).map_or(true, |c| c.is_whitespace())
        {
            self.position = end;
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef> {
        let name = self.identifier()?;
        let mut ty = if name == "void" {
            TypeRef::Void
        } else if let Some(kind) = PrimitiveKind::from_keyword(&name) {
            TypeRef::Primitive(kind)
        } else if !name.contains('.') {
            let bound = if self.eat_extends() {
                Some(self.parse_type()?)
            } else {
                None
            };
            TypeRef::variable(name, bound)
        } else {
            let mut args = Vec::new();
            if self.eat('<') {
                loop {
                    args.push(self.parse_type()?);
                    if !self.eat(',') {
                        break;
                    }
                }
                self.expect('>')?;
            }
            TypeRef::Declared { name, args }
        };
        while self.eat('[') {
            self.expect(']')?;
            ty = TypeRef::array_of(ty);
        }
        Ok(ty)
    }
}
