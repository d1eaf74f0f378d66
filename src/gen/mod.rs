pub mod client;
pub mod service;

pub use service::TextGen;
