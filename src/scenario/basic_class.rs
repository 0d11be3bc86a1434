//! Example 1: one class, two objects, a returning method and a printing one.
use std::io::Write;

use crate::classes::basic::Dog;
use crate::error::Result;
use crate::model::{Instance, Registry, TypeDescriptor, Value};

pub const EXPECTED: &str = "\
Buddy is a 3-year-old Golden Retriever
Buddy says: Woof!
Max is a 5-year-old Bulldog
Max says: Woof!
";

pub fn registry() -> Result<Registry> {
    let mut registry = Registry::new();
    registry.define(
        TypeDescriptor::new("Dog")
            .params(["name", "age", "breed"])
            .stores("name")
            .stores("age")
            .stores("breed")
            .prints("bark", "{name} says: Woof!")
            .returns("description", "{name} is a {age}-year-old {breed}"),
    )?;
    Ok(registry)
}

pub fn instances(registry: &Registry) -> Result<Vec<Instance>> {
    Ok(vec![
        registry.construct("Dog", [Value::from("Buddy"), Value::from(3), Value::from("Golden Retriever")])?,
        registry.construct("Dog", [Value::from("Max"), Value::from(5), Value::from("Bulldog")])?,
    ])
}

pub fn run_static(out: &mut dyn Write) -> Result<()> {
    let dog1 = Dog::new("Buddy", 3, "Golden Retriever");
    let dog2 = Dog::new("Max", 5, "Bulldog");

    writeln!(out, "{}", dog1.description())?;
    dog1.bark(out)?;

    writeln!(out, "{}", dog2.description())?;
    dog2.bark(out)?;
    Ok(())
}

pub fn run_descriptor(out: &mut dyn Write) -> Result<()> {
    let registry = registry()?;
    for dog in instances(&registry)? {
        if let Some(text) = registry.invoke(&dog, "description", out)? {
            writeln!(out, "{text}")?;
        }
        registry.invoke(&dog, "bark", out)?;
    }
    Ok(())
}
