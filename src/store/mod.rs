pub mod manager;
pub mod types;

pub use manager::DomainStore;
pub use types::*;
