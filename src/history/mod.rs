pub mod archive;
pub mod error;
pub mod frame;
pub mod store;
