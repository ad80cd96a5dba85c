mod error;
pub use error::*;

mod message_template;
pub use message_template::*;

mod prompt_template;
pub use prompt_template::*;
