pub mod errors;

pub use errors::{ResolverError, ResolverResult};
