//! Runtime type-descriptor object model.
//!
//! Types are data: a [`Registry`] holds [`TypeDescriptor`]s, builds
//! [`Instance`]s by chaining constructors parent-first, and dispatches
//! methods by walking from the instance's type up to its root, taking the
//! first definition found.
//!
//! Invariants:
//! - A parent is registered before any type that extends it (no cycles).
//! - Inherited fields are all present before a derived type stores its own.
//! - Base and override bodies are never combined.
pub mod descriptor;
pub mod instance;
pub mod value;

use std::io::Write;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

pub use descriptor::{Arg, Effect, Method, ParentInit, TypeDescriptor};
pub use instance::Instance;
pub use value::Value;

use crate::error::{Error, Result};

#[derive(Debug, Default, Clone, Serialize)]
pub struct Registry {
    types: IndexMap<String, TypeDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `descriptor` after checking its parent exists and every
    /// parameter it forwards or stores is declared.
    pub fn define(&mut self, descriptor: TypeDescriptor) -> Result<()> {
        if self.types.contains_key(&descriptor.name) {
            return Err(Error::DuplicateType(descriptor.name));
        }
        for (i, param) in descriptor.params.iter().enumerate() {
            if descriptor.params[..i].contains(param) {
                return Err(Error::DuplicateParameter {
                    type_name: descriptor.name.clone(),
                    parameter: param.clone(),
                });
            }
        }
        let unbound = |parameter: &str| Error::UnboundParameter {
            type_name: descriptor.name.clone(),
            parameter: parameter.to_string(),
        };
        for field in &descriptor.fields {
            if !descriptor.params.contains(field) {
                return Err(unbound(field.as_str()));
            }
        }
        if let Some(parent) = &descriptor.parent {
            let parent_ty = self.types.get(&parent.type_name).ok_or_else(|| Error::UnknownParent {
                type_name: descriptor.name.clone(),
                parent: parent.type_name.clone(),
            })?;
            if let Some(args) = &parent.args {
                if args.len() != parent_ty.params.len() {
                    return Err(Error::Arity {
                        type_name: parent_ty.name.clone(),
                        expected: parent_ty.params.len(),
                        found: args.len(),
                    });
                }
                for arg in args {
                    if let Arg::Param(p) = arg {
                        if !descriptor.params.contains(p) {
                            return Err(unbound(p.as_str()));
                        }
                    }
                }
            }
        }
        debug!(type_name = %descriptor.name, parent = ?descriptor.parent_name(), "defined type");
        self.types.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn descriptor(&self, type_name: &str) -> Result<&TypeDescriptor> {
        self.types
            .get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Most specific first, root last.
    pub fn resolution_order(&self, type_name: &str) -> Result<Vec<&str>> {
        let mut order = Vec::new();
        let mut current = Some(type_name);
        while let Some(name) = current {
            let ty = self.descriptor(name)?;
            order.push(ty.name.as_str());
            current = ty.parent_name();
        }
        Ok(order)
    }

    /// Every field an instance of `type_name` must carry, root type's first.
    pub fn field_names(&self, type_name: &str) -> Result<Vec<&str>> {
        let mut names = Vec::<&str>::new();
        for name in self.resolution_order(type_name)?.into_iter().rev() {
            for field in &self.descriptor(name)?.fields {
                if !names.contains(&field.as_str()) {
                    names.push(field);
                }
            }
        }
        Ok(names)
    }

    pub fn construct<I>(&self, type_name: &str, args: I) -> Result<Instance>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<Value>>();
        self.construct_values(type_name, args)
    }

    fn construct_values(&self, type_name: &str, args: Vec<Value>) -> Result<Instance> {
        let ty = self.descriptor(type_name)?;
        if args.len() != ty.params.len() {
            return Err(Error::Arity {
                type_name: ty.name.clone(),
                expected: ty.params.len(),
                found: args.len(),
            });
        }
        let bound = ty.params.iter().map(String::as_str).zip(args).collect::<IndexMap<_, _>>();
        let lookup = |parameter: &str| {
            bound.get(parameter).cloned().ok_or_else(|| Error::UnboundParameter {
                type_name: ty.name.clone(),
                parameter: parameter.to_string(),
            })
        };

        // 1) parent first
        let mut fields = IndexMap::new();
        if let Some(ParentInit { type_name: parent, args: Some(parent_args) }) = &ty.parent {
            let parent_args = parent_args
                .iter()
                .map(|arg| match arg {
                    Arg::Param(p) => lookup(p.as_str()),
                    Arg::Fixed(v) => Ok(v.clone()),
                })
                .collect::<Result<Vec<_>>>()?;
            fields = self.construct_values(parent, parent_args)?.into_fields();
        }

        // 2) inherited fields must all be in place before our own
        if let Some(parent) = ty.parent_name() {
            for field in self.field_names(parent)? {
                if !fields.contains_key(field) {
                    return Err(Error::BaseNotInitialized {
                        type_name: ty.name.clone(),
                        field: field.to_string(),
                    });
                }
            }
        }

        // 3) own fields
        for field in &ty.fields {
            fields.insert(field.clone(), lookup(field.as_str())?);
        }

        debug!(type_name = %ty.name, fields = fields.len(), "constructed instance");
        Ok(Instance::new(ty.name.clone(), fields))
    }

    /// Finds the most specific definition of `method` for `type_name`,
    /// returning it with the type that defines it.
    pub fn resolve(&self, type_name: &str, method: &str) -> Result<(&TypeDescriptor, &Method)> {
        for name in self.resolution_order(type_name)? {
            let owner = self.descriptor(name)?;
            if let Some(found) = owner.methods.get(method) {
                debug!(type_name, method, owner = %owner.name, "resolved method");
                return Ok((owner, found));
            }
        }
        Err(Error::UnknownMethod {
            type_name: type_name.to_string(),
            method: method.to_string(),
        })
    }

    /// Runs `method` on `instance`. `Print` methods write a line to `out` and
    /// yield `None`; `Return` methods yield the text without writing.
    pub fn invoke(&self, instance: &Instance, method: &str, out: &mut dyn Write) -> Result<Option<String>> {
        let (_, found) = self.resolve(instance.type_name(), method)?;
        let text = found.body.render(|field| instance.get(field).map(ToString::to_string))?;
        match found.effect {
            Effect::Print => {
                writeln!(out, "{text}")?;
                Ok(None)
            }
            Effect::Return => Ok(Some(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> Registry {
        let mut registry = Registry::new();
        registry
            .define(
                TypeDescriptor::new("Animal")
                    .params(["name", "species"])
                    .stores("name")
                    .stores("species")
                    .prints("make_sound", "{name} makes a sound")
                    .prints("info", "{name} is a {species}"),
            )
            .unwrap();
        registry
            .define(
                TypeDescriptor::new("Dog")
                    .params(["name", "breed"])
                    .extends("Animal", [Arg::param("name"), Arg::fixed("Dog")])
                    .stores("breed")
                    .prints("make_sound", "{name} barks: Woof!"),
            )
            .unwrap();
        registry
    }

    fn run(registry: &Registry, instance: &Instance, method: &str) -> (Option<String>, String) {
        let mut out = Vec::<u8>::new();
        let returned = registry.invoke(instance, method, &mut out).unwrap();
        (returned, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parent_fields_come_first_and_fixed_args_apply() {
        let registry = animals();
        let dog = registry.construct("Dog", ["Buddy", "Golden Retriever"]).unwrap();
        let keys = dog.fields().keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, ["name", "species", "breed"]);
        assert_eq!(dog.get("species").unwrap(), &Value::from("Dog"));
        assert_eq!(dog.type_name(), "Dog");
    }

    #[test]
    fn override_wins_and_inherited_methods_still_resolve() {
        let registry = animals();
        let dog = registry.construct("Dog", ["Buddy", "Golden Retriever"]).unwrap();
        assert_eq!(run(&registry, &dog, "make_sound").1, "Buddy barks: Woof!\n");
        assert_eq!(run(&registry, &dog, "info").1, "Buddy is a Dog\n");
        let (owner, _) = registry.resolve("Dog", "info").unwrap();
        assert_eq!(owner.name, "Animal");
        let (owner, _) = registry.resolve("Dog", "make_sound").unwrap();
        assert_eq!(owner.name, "Dog");
    }

    #[test]
    fn base_instances_use_base_body() {
        let registry = animals();
        let generic = registry.construct("Animal", ["Rex", "Wolf"]).unwrap();
        assert_eq!(run(&registry, &generic, "make_sound").1, "Rex makes a sound\n");
    }

    #[test]
    fn return_effect_writes_nothing() {
        let mut registry = Registry::new();
        registry
            .define(
                TypeDescriptor::new("Dog")
                    .params(["name", "age", "breed"])
                    .stores("name")
                    .stores("age")
                    .stores("breed")
                    .returns("description", "{name} is a {age}-year-old {breed}"),
            )
            .unwrap();
        let dog = registry
            .construct("Dog", [Value::from("Max"), Value::from(5), Value::from("Bulldog")])
            .unwrap();
        let (returned, printed) = run(&registry, &dog, "description");
        assert_eq!(returned.as_deref(), Some("Max is a 5-year-old Bulldog"));
        assert!(printed.is_empty());
    }

    #[test]
    fn resolution_order_is_most_specific_first() {
        let registry = animals();
        assert_eq!(registry.resolution_order("Dog").unwrap(), ["Dog", "Animal"]);
        assert_eq!(registry.field_names("Dog").unwrap(), ["name", "species", "breed"]);
    }

    #[test]
    fn arity_mismatch_fails() {
        let registry = animals();
        let err = registry.construct("Dog", ["Buddy"]).unwrap_err();
        assert!(matches!(err, Error::Arity { expected: 2, found: 1, .. }));
    }

    #[test]
    fn unknown_method_and_type_fail() {
        let registry = animals();
        let dog = registry.construct("Dog", ["Buddy", "Golden Retriever"]).unwrap();
        let err = registry.invoke(&dog, "fetch", &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownMethod { ref method, .. } if method == "fetch"));
        let err = registry.construct("Cat", ["Whiskers", "Orange"]).unwrap_err();
        assert!(matches!(err, Error::UnknownType(ref name) if name == "Cat"));
    }

    #[test]
    fn method_reading_unset_field_fails() {
        let mut registry = animals();
        registry
            .define(
                TypeDescriptor::new("Cat")
                    .params(["name"])
                    .extends("Animal", [Arg::param("name"), Arg::fixed("Cat")])
                    .prints("make_sound", "{name} is {color}"),
            )
            .unwrap();
        let cat = registry.construct("Cat", ["Whiskers"]).unwrap();
        let err = registry.invoke(&cat, "make_sound", &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field, .. } if field == "color"));
    }

    #[test]
    fn skipping_parent_constructor_fails_at_construction() {
        let mut registry = animals();
        registry
            .define(
                TypeDescriptor::new("Cat")
                    .params(["name", "color"])
                    .extends_without_init("Animal")
                    .stores("color"),
            )
            .unwrap();
        let err = registry.construct("Cat", ["Whiskers", "Orange"]).unwrap_err();
        assert!(matches!(err, Error::BaseNotInitialized { ref field, .. } if field == "name"));
    }

    #[test]
    fn repeated_parameter_is_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .define(TypeDescriptor::new("Dog").params(["name", "name"]).stores("name"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateParameter { ref parameter, .. } if parameter == "name"));
        assert!(registry.descriptor("Dog").is_err());
    }

    #[test]
    fn bad_definitions_are_rejected() {
        let mut registry = animals();
        let err = registry.define(TypeDescriptor::new("Dog")).unwrap_err();
        assert!(matches!(err, Error::DuplicateType(_)));

        let err = registry
            .define(TypeDescriptor::new("Puppy").extends("Hound", []))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownParent { ref parent, .. } if parent == "Hound"));

        let err = registry
            .define(TypeDescriptor::new("Fish").params(["name"]).stores("fins"))
            .unwrap_err();
        assert!(matches!(err, Error::UnboundParameter { ref parameter, .. } if parameter == "fins"));

        let err = registry
            .define(
                TypeDescriptor::new("Bird")
                    .params(["name"])
                    .extends("Animal", [Arg::param("name")]),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Arity { expected: 2, found: 1, .. }));

        let err = registry
            .define(
                TypeDescriptor::new("Bird")
                    .params(["name"])
                    .extends("Animal", [Arg::param("nick"), Arg::fixed("Bird")]),
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnboundParameter { ref parameter, .. } if parameter == "nick"));
    }
}
