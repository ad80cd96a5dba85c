mod builder;
pub use builder::*;

mod chain;
pub use chain::*;
