mod storage;

pub use storage::{
    load_or_default, ConfigRepository, InMemoryRepository, JsonFileRepository, CONFIG_DOC_VERSION,
};
