pub mod keys;

mod kv;
pub use kv::{KeyValueStore, StoreError};

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;
