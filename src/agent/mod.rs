mod error;
pub use error::*;

mod prompt;
pub use prompt::*;

mod answerer;
pub use answerer::*;
