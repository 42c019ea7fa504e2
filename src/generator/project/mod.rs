mod generate;
mod layout;

pub use generate::{CrudRequest, Generator, ModelRequest, RepositoryRequest};
