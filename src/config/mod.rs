mod error;
pub use error::*;

mod settings;
pub use settings::*;
