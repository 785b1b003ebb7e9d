//! coffeeshop-store - Key-value stores backing the persisted session.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
