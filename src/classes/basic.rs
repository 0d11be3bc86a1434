use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    pub name: String,
    pub age: u32,
    pub breed: String,
}

impl Dog {
    pub fn new(name: impl Into<String>, age: u32, breed: impl Into<String>) -> Self {
        Self { name: name.into(), age, breed: breed.into() }
    }

    pub fn bark(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} says: Woof!", self.name)
    }

    /// Returned, not printed; the caller prints it.
    pub fn description(&self) -> String {
        format!("{} is a {}-year-old {}", self.name, self.age, self.breed)
    }
}
