pub mod classes;
pub mod cli;
pub mod error;
pub mod logging;
pub mod model;
pub mod scenario;
pub mod template;

pub use error::{Error, Result};
pub use scenario::{Engine, Scenario};
