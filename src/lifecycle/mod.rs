pub mod controller;
pub mod types;

pub use controller::TaskLifecycleController;
pub use types::*;
