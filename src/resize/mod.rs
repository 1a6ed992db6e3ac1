pub mod errors;
pub mod extractors;
pub mod fetch;
pub mod handlers;
pub mod http;
pub mod img;
pub mod requests;
