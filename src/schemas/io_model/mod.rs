mod chain_input;
pub use chain_input::*;

mod ctor;
pub use ctor::*;
