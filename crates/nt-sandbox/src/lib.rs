//! nt-sandbox: a small in-memory simulation for the Neon Twilight client
//!
//! One hand-drawn town, a bar with a barkeep and a patron, a thug on the
//! street and a few items. Enough to exercise every part of the client
//! without the real engine.

pub mod map;
pub mod sandbox;
pub mod world;

pub use map::MapError;
pub use nt_client::storage::MemoryStorage;
pub use sandbox::{CallLog, Sandbox};
pub use world::World;
