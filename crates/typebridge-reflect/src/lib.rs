//! typebridge-reflect - Type graph reflection
//!
//! This crate provides:
//! - [`Reflector`]: cycle-safe traversal from root types to a [`Registry`] of
//!   [`typebridge_core::TypeNode`]s
//! - the kind mapper ([`Reflector::map_kind`]) turning source shapes into
//!   target type expressions
//! - [`Registry::check_unique_names`], run by [`Reflector::finish`]

mod error;
mod kind;
mod reflector;
mod registry;

pub use error::{ReflectError, ReflectResult};
pub use reflector::Reflector;
pub use registry::Registry;
