//! Session storage.
//!
//! One implementation: an in-memory map owned by a single worker task. The
//! worker is the only shared mutable state in the crate; every other piece
//! is immutable after construction or request-local.

mod inmemory;

pub use inmemory::SessionStore;
