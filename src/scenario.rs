//! The runnable demonstrations, each available through both object models.
pub mod basic_class;
pub mod inheritance;

use std::io::Write;
use clap::ValueEnum;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::model::{Instance, Registry, Value};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// one class, two objects
    BasicClass,
    /// base class, two subclasses, polymorphic loop
    Inheritance,
}

/// Which object model executes a scenario. Output is identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Engine {
    /// plain structs and a trait
    #[default]
    Static,
    /// runtime type descriptors
    Descriptor,
}

/// JSON view of one constructed instance.
#[derive(Debug, Serialize)]
pub struct InstanceState<'a> {
    #[serde(rename = "type")]
    pub type_name: &'a str,
    pub resolution_order: Vec<&'a str>,
    pub fields: &'a IndexMap<String, Value>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::BasicClass, Scenario::Inheritance];

    pub fn registry(self) -> Result<Registry> {
        match self {
            Scenario::BasicClass => basic_class::registry(),
            Scenario::Inheritance => inheritance::registry(),
        }
    }

    pub fn instances(self, registry: &Registry) -> Result<Vec<Instance>> {
        match self {
            Scenario::BasicClass => basic_class::instances(registry),
            Scenario::Inheritance => inheritance::instances(registry),
        }
    }

    /// Exact stdout text of one run.
    pub fn expected_output(self) -> &'static str {
        match self {
            Scenario::BasicClass => basic_class::EXPECTED,
            Scenario::Inheritance => inheritance::EXPECTED,
        }
    }

    pub fn run(self, engine: Engine, out: &mut dyn Write) -> Result<()> {
        info!(scenario = ?self, engine = ?engine, "running scenario");
        match (self, engine) {
            (Scenario::BasicClass, Engine::Static) => basic_class::run_static(out),
            (Scenario::BasicClass, Engine::Descriptor) => basic_class::run_descriptor(out),
            (Scenario::Inheritance, Engine::Static) => inheritance::run_static(out),
            (Scenario::Inheritance, Engine::Descriptor) => inheritance::run_descriptor(out),
        }
    }

    pub fn render(self, engine: Engine) -> Result<String> {
        let mut out = Vec::<u8>::new();
        self.run(engine, &mut out)?;
        output_text(out)
    }

    pub fn types_json(self) -> Result<serde_json::Value> {
        let registry = self.registry()?;
        let types = registry.descriptors().collect::<Vec<_>>();
        Ok(serde_json::to_value(types)?)
    }

    pub fn state_json(self) -> Result<serde_json::Value> {
        let registry = self.registry()?;
        let instances = self.instances(&registry)?;
        let states = instances
            .iter()
            .map(|instance| {
                Ok(InstanceState {
                    type_name: instance.type_name(),
                    resolution_order: registry.resolution_order(instance.type_name())?,
                    fields: instance.fields(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(serde_json::to_value(states)?)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Captured output must be valid UTF-8; nothing is replaced.
fn output_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn invalid_utf8_output_is_an_error() {
        let err = output_text(vec![b'B', 0xff, b'\n']).unwrap_err();
        assert!(matches!(err, Error::Io(ref io) if io.kind() == std::io::ErrorKind::InvalidData));
        assert_eq!(output_text(b"Woof!\n".to_vec()).unwrap(), "Woof!\n");
    }

    #[test]
    fn every_scenario_matches_expected_text_on_both_engines() {
        for scenario in Scenario::ALL {
            for engine in [Engine::Static, Engine::Descriptor] {
                assert_eq!(
                    scenario.render(engine).unwrap(),
                    scenario.expected_output(),
                    "{scenario:?} via {engine:?}",
                );
            }
        }
    }

    #[test]
    fn basic_class_exact_lines() {
        let text = Scenario::BasicClass.render(Engine::Static).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines, [
            "Buddy is a 3-year-old Golden Retriever",
            "Buddy says: Woof!",
            "Max is a 5-year-old Bulldog",
            "Max says: Woof!",
        ]);
    }

    #[test]
    fn inheritance_blank_line_follows_each_animal() {
        let text = Scenario::Inheritance.render(Engine::Descriptor).unwrap();
        let lines = text.split('\n').collect::<Vec<_>>();
        assert_eq!(lines, [
            "Buddy is a Dog",
            "Buddy barks: Woof!",
            "",
            "Whiskers is a Cat",
            "Whiskers meows: Meow!",
            "",
            "",
        ]);
    }

    #[test]
    fn rerunning_is_byte_identical() {
        for scenario in Scenario::ALL {
            let first = scenario.render(Engine::Descriptor).unwrap();
            let second = scenario.render(Engine::Descriptor).unwrap();
            assert_eq!(first.as_bytes(), second.as_bytes());
        }
    }

    #[test]
    fn state_shows_fixed_species_and_field_order() {
        let state = Scenario::Inheritance.state_json().unwrap();
        assert_eq!(state[0]["type"], "Dog");
        assert_eq!(state[0]["resolution_order"], serde_json::json!(["Dog", "Animal"]));
        assert_eq!(state[0]["fields"]["species"], "Dog");
        assert_eq!(state[1]["fields"]["species"], "Cat");
        let keys = state[1]["fields"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, ["name", "species", "color"]);
    }

    #[test]
    fn basic_state_keeps_integer_age() {
        let state = Scenario::BasicClass.state_json().unwrap();
        assert_eq!(state[1]["fields"]["age"], 5);
    }

    #[test]
    fn types_view_lists_parent_init() {
        let types = Scenario::Inheritance.types_json().unwrap();
        assert_eq!(types[1]["name"], "Dog");
        assert_eq!(types[1]["parent"]["type_name"], "Animal");
        assert_eq!(types[1]["parent"]["args"][1], serde_json::json!({"fixed": "Dog"}));
        assert_eq!(types[2]["methods"]["make_sound"]["effect"], "print");
        assert!(types[0].get("parent").is_none());
    }
}
