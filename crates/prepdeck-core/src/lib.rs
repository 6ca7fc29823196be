pub mod config;
pub mod error;
pub mod questions;
pub mod types;

pub use config::*;
pub use error::*;
pub use questions::*;
pub use types::*;
