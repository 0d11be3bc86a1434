use std::io::{self, Write};

/// Base record shared by every creature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    pub name: String,
    pub species: String,
}

impl Animal {
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self { name: name.into(), species: species.into() }
    }
}

/// Operations declared on the base. Default bodies are the base behavior;
/// an implementor that defines one replaces it entirely.
pub trait Creature {
    fn animal(&self) -> &Animal;

    fn make_sound(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} makes a sound", self.animal().name)
    }

    fn info(&self, out: &mut dyn Write) -> io::Result<()> {
        let animal = self.animal();
        writeln!(out, "{} is a {}", animal.name, animal.species)
    }
}

impl Creature for Animal {
    fn animal(&self) -> &Animal {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    base: Animal,
    pub breed: String,
}

impl Dog {
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self { base: Animal::new(name, "Dog"), breed: breed.into() }
    }
}

impl Creature for Dog {
    fn animal(&self) -> &Animal {
        &self.base
    }

    fn make_sound(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} barks: Woof!", self.base.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cat {
    base: Animal,
    pub color: String,
}

impl Cat {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self { base: Animal::new(name, "Cat"), color: color.into() }
    }
}

impl Creature for Cat {
    fn animal(&self) -> &Animal {
        &self.base
    }

    fn make_sound(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} meows: Meow!", self.base.name)
    }
}
