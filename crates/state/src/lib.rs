pub mod account;
pub mod hash;
pub mod state;
pub mod store;

pub use account::*;
pub use hash::*;
pub use state::*;
pub use store::*;
