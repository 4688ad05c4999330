pub mod manager;
pub mod state;
pub mod store;

pub use manager::*;
pub use state::*;
pub use store::*;
