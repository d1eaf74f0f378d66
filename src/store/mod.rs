pub mod kv;
pub mod settings;

pub use kv::KvStore;
pub use settings::Settings;
