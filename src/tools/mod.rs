mod sql;
pub use sql::*;

#[cfg(test)]
pub(crate) use sql::memory;
