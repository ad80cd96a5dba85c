mod builder;
mod chain;
mod input;
mod output;
mod prompt;

pub use builder::*;
pub use chain::*;
pub use input::*;
pub use output::*;
pub use prompt::*;

pub(crate) const STOP_WORD: &str = "\nSQLResult:";
pub(crate) const QUERY_PREFIX_WITH: &str = "\nSQLQuery:";
pub(crate) const DEFAULT_TOP_K: usize = 5;
