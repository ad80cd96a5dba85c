mod error;
pub use error::*;

mod value;
pub use value::*;

mod engine;
pub use engine::*;

mod postgres;
pub use postgres::*;

mod database;
pub use database::*;

#[cfg(test)]
pub(crate) mod memory;
