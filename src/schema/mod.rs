//! Table metadata: column types, the introspection trait and snapshot loading.
mod load;
mod types;

pub use load::*;
pub use types::*;
