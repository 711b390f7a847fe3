pub mod arguments;
pub mod intervals;
pub mod invoke;
