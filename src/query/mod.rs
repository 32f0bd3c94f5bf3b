//! Query facade (noun module)

mod error;
mod facade;

pub use error::QueryError;
pub use facade::Query;
