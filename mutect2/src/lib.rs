pub mod commands;
pub mod error;
pub mod logic;

pub use commands::Mutect2;
pub use error::Mutect2Error;
