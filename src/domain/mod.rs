pub mod stats;
pub mod user;

pub use stats::*;
pub use user::*;
