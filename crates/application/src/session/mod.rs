//! Explicit session context.
//!
//! Pages that make authenticated calls receive a [`Session`] instead of
//! reaching into ambient storage.

mod context;
mod memory;

pub use context::Session;
pub use memory::MemorySessionStore;
