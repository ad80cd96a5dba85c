mod message_type;
pub use message_type::*;

pub mod messages;
pub use messages::*;

pub mod prompt;
pub use prompt::*;

mod io_model;
pub use io_model::*;

mod builder_error;
pub use builder_error::*;

mod get_prompt;
pub use get_prompt::*;

mod with_usage;
pub use with_usage::*;

mod token_usage;
pub use token_usage::*;
