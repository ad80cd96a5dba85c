#[allow(clippy::module_inception)]
mod chain;
pub use chain::*;

pub use llm::*;
pub mod llm;

pub mod sql_database;
pub use sql_database::*;

mod error;
pub use error::*;
