pub mod audio;
pub mod event;
pub mod gen;
pub mod share;
pub mod store;
pub mod ui;
pub mod util;
