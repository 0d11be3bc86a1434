//! Example 2: a base class, two subclasses, and a loop over both.
use std::io::Write;

use crate::classes::inheritance::{Cat, Creature, Dog};
use crate::error::Result;
use crate::model::{Arg, Instance, Registry, TypeDescriptor};

pub const EXPECTED: &str = "\
Buddy is a Dog
Buddy barks: Woof!

Whiskers is a Cat
Whiskers meows: Meow!

";

pub fn registry() -> Result<Registry> {
    let mut registry = Registry::new();
    registry.define(
        TypeDescriptor::new("Animal")
            .params(["name", "species"])
            .stores("name")
            .stores("species")
            .prints("make_sound", "{name} makes a sound")
            .prints("info", "{name} is a {species}"),
    )?;
    registry.define(
        TypeDescriptor::new("Dog")
            .params(["name", "breed"])
            .extends("Animal", [Arg::param("name"), Arg::fixed("Dog")])
            .stores("breed")
            .prints("make_sound", "{name} barks: Woof!"),
    )?;
    registry.define(
        TypeDescriptor::new("Cat")
            .params(["name", "color"])
            .extends("Animal", [Arg::param("name"), Arg::fixed("Cat")])
            .stores("color")
            .prints("make_sound", "{name} meows: Meow!"),
    )?;
    Ok(registry)
}

pub fn instances(registry: &Registry) -> Result<Vec<Instance>> {
    Ok(vec![
        registry.construct("Dog", ["Buddy", "Golden Retriever"])?,
        registry.construct("Cat", ["Whiskers", "Orange"])?,
    ])
}

pub fn run_static(out: &mut dyn Write) -> Result<()> {
    let dog = Dog::new("Buddy", "Golden Retriever");
    let cat = Cat::new("Whiskers", "Orange");

    let animals: [&dyn Creature; 2] = [&dog, &cat];
    for animal in animals {
        animal.info(out)?;
        animal.make_sound(out)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn run_descriptor(out: &mut dyn Write) -> Result<()> {
    let registry = registry()?;
    for animal in instances(&registry)? {
        registry.invoke(&animal, "info", out)?;
        registry.invoke(&animal, "make_sound", out)?;
        writeln!(out)?;
    }
    Ok(())
}
