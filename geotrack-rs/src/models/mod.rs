pub mod config;
pub mod errors;
pub mod session;
pub(crate) mod shutdown;
