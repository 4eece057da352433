pub mod backend;
pub mod codec;
pub mod credentials;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_store;
pub mod keys;
