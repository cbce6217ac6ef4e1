pub mod files;
pub mod migration;
pub mod store;

pub use files::{atomic_write, ensure_data_dir, get_data_dir, init_local_data_dir, log_file};
pub use migration::{load_and_migrate, save_board, LoadSource};
pub use store::{FileStore, Store};
#[cfg(test)]
pub use store::{MemoryStore, STATE_KEY};
