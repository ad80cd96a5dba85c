#[allow(clippy::module_inception)]
mod output_parser;
pub use output_parser::*;

mod error;
pub use error::*;

mod regex_parser;
pub use regex_parser::*;

mod simple_parser;
pub use simple_parser::*;

mod sql_parser;
pub use sql_parser::*;
