use indexmap::IndexMap;
use serde::Serialize;

use super::Value;
use crate::template::Template;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// What a method does with its rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// write one line to the output sink, return nothing
    Print,
    /// hand the text back; the caller decides whether to print it
    Return,
}

#[derive(Debug, Clone, Serialize)]
pub struct Method {
    pub effect: Effect,
    pub body: Template,
}

/// One argument forwarded to the parent constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arg {
    /// forward one of this constructor's own parameters
    Param(String),
    /// a literal fixed by the derived type (e.g. species = "Dog")
    Fixed(Value),
}

#[derive(Debug, Clone, Serialize)]
pub struct ParentInit {
    pub type_name: String,
    /// `None` means the derived constructor never calls the parent's.
    pub args: Option<Vec<Arg>>,
}

/// A class: constructor parameters, fields it stores itself, an optional
/// parent, and named methods.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentInit>,
    /// own fields, each stored from the parameter of the same name
    pub fields: Vec<String>,
    pub methods: IndexMap<String, Method>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Arg {
    pub fn param(name: impl Into<String>) -> Self {
        Arg::Param(name.into())
    }
    pub fn fixed(value: impl Into<Value>) -> Self {
        Arg::Fixed(value.into())
    }
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            parent: None,
            fields: Vec::new(),
            methods: IndexMap::new(),
        }
    }

    pub fn params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Declares `parent` and the arguments passed to its constructor before
    /// this type stores its own fields.
    pub fn extends<I>(mut self, parent: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = Arg>,
    {
        self.parent = Some(ParentInit {
            type_name: parent.into(),
            args: Some(args.into_iter().collect()),
        });
        self
    }

    /// Declares `parent` without chaining to its constructor. Constructing
    /// such a type fails with `BaseNotInitialized` once the parent declares
    /// any field.
    pub fn extends_without_init(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(ParentInit { type_name: parent.into(), args: None });
        self
    }

    pub fn stores(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn prints(self, method: impl Into<String>, body: impl Into<Template>) -> Self {
        self.method(method, Effect::Print, body)
    }

    pub fn returns(self, method: impl Into<String>, body: impl Into<Template>) -> Self {
        self.method(method, Effect::Return, body)
    }

    fn method(mut self, method: impl Into<String>, effect: Effect, body: impl Into<Template>) -> Self {
        self.methods.insert(method.into(), Method { effect, body: body.into() });
        self
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.type_name.as_str())
    }
}
