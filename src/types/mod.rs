pub mod phase;
pub mod session;
pub mod summary;
