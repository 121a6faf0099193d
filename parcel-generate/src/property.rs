// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    classifier::{resolve, Classifier, Rejection},
    extension::Property,
    family::EncodingFamily,
    names::{adapter_field_name, NameAllocator},
};
use parcel_reflection::{simple_name, TypeRef};
use std::{collections::HashMap, rc::Rc};

/// Simple name of the annotation marking nullable properties.
pub const NULLABLE: &str = "Nullable";
/// Simple name of the annotation selecting a `TypeAdapter`.
pub const PARCEL_ADAPTER: &str = "ParcelAdapter";

/// A static field holding the instance of an adapter, shared by every property using it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterFieldBinding {
    pub adapter_type: TypeRef,
    pub field_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    /// Name of the constructor parameter.
    pub name: String,
    /// Name of the accessor.
    pub method_name: String,
    pub declared_type: TypeRef,
    /// `declared_type` with bounded type variables replaced by their bound.
    pub resolved_type: TypeRef,
    pub nullable: bool,
    pub adapter: Option<Rc<AdapterFieldBinding>>,
    /// Annotated with `ParcelAdapter` but without an adapter class.
    pub missing_adapter: bool,
}

/// How a property is written to the parcel.
#[derive(Clone, Debug, PartialEq)]
pub enum EncodingPath {
    Adapter(Rc<AdapterFieldBinding>),
    Family(EncodingFamily),
}

impl PropertyDescriptor {
    /// The accessor call, e.g. `name()`.
    pub fn accessor(&self) -> String {
        format!("{}()", self.method_name)
    }

    /// Adapters take precedence over the encoding families.
    pub fn encoding_path(&self, classifier: &Classifier) -> Result<EncodingPath, Rejection> {
        if self.missing_adapter {
            return Err(Rejection::MissingAdapter);
        }
        match &self.adapter {
            Some(adapter) => Ok(EncodingPath::Adapter(adapter.clone())),
            None => classifier
                .validate(&self.resolved_type)
                .map(EncodingPath::Family),
        }
    }
}

/// The properties of a value class together with the adapters they use.
#[derive(Clone, Debug, Default)]
pub struct PropertyModel {
    pub properties: Vec<PropertyDescriptor>,
    /// Distinct adapters, in order of first use.
    pub adapters: Vec<Rc<AdapterFieldBinding>>,
}

impl PropertyModel {
    /// Build the descriptors of `properties`, keeping their order. Adapter field names are
    /// taken from `allocator`; constructor parameters get their own namespace.
    pub fn build(properties: &[Property], allocator: &mut NameAllocator) -> Self {
        let mut model = PropertyModel::default();
        let mut parameters = NameAllocator::new();
        let mut bindings: HashMap<TypeRef, Rc<AdapterFieldBinding>> = HashMap::new();
        for property in properties {
            let method = &property.method;
            let annotation = method.annotation(PARCEL_ADAPTER);
            let adapter = annotation
                .and_then(|annotation| annotation.value.as_ref())
                .map(|adapter_type| {
                    bindings
                        .entry(adapter_type.clone())
                        .or_insert_with(|| {
                            let binding = Rc::new(AdapterFieldBinding {
                                adapter_type: adapter_type.clone(),
                                field_name: allocator.new_name(&adapter_field_name(
                                    simple_name(adapter_type.declared_name().unwrap_or("Adapter")),
                                )),
                            });
                            model.adapters.push(binding.clone());
                            binding
                        })
                        .clone()
                });
            model.properties.push(PropertyDescriptor {
                name: parameters.new_name(&property.name),
                method_name: method.name.clone(),
                declared_type: method.return_type.clone(),
                resolved_type: resolve(&method.return_type).clone(),
                // A primitive can never be null, whatever it is annotated with.
                nullable: method.annotation(NULLABLE).is_some()
                    && !matches!(method.return_type, TypeRef::Primitive(_)),
                missing_adapter: annotation.is_some() && adapter.is_none(),
                adapter,
            });
        }
        model
    }
}
