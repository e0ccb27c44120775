pub mod macros;
pub mod time;

pub use time::*;
