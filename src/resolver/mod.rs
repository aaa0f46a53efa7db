pub mod era;
pub mod error;
pub mod path_resolver;
