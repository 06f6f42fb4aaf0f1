pub mod store;

pub use store::{default_data_path, JsonFileStore, MemoryStore, DATA_FILE_NAME};
