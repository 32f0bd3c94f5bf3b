//! Schema registry module
//!
//! One-time build phase ([`RegistryBuilder`]) followed by a read-only phase
//! ([`Registry`]). Objects live in an arena keyed by [`ObjectId`](crate::schema::ObjectId),
//! which is what lets cyclic schemas resolve without recursion.

mod builder;
mod error;
mod global;
mod registry;

pub use builder::RegistryBuilder;
pub use error::RegistryError;
pub use global::{install_global, global};
pub use registry::{Registry, RegistryId, ObjectRef, RegistryPointers};
