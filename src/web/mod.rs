//! HTTP front end: the question form, a JSON API and a health check.

mod handlers;
pub use handlers::*;

mod page;

mod router;
pub use router::*;
