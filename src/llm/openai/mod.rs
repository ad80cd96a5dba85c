mod helper;
mod request;
pub use request::OpenAIRequest;

mod client;
pub use client::*;

mod builder;
pub use builder::*;

mod models;
pub use models::*;
