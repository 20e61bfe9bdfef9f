//! Persistence layer: the document-per-user store contract and its
//! implementations. The engine only ever uses the read/write contract in
//! `store`; everything else about the storage engine is out of scope.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgProfileStore;
pub use store::{ProfileStore, StoreError};
