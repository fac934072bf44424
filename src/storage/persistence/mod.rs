//! Persistence backend implementations.

mod filesystem;
mod memory;

pub use filesystem::{FilesystemBackend, MAX_FILE_SIZE};
pub use memory::MemoryBackend;
