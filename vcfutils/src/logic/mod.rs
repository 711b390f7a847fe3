pub mod header;
pub mod replace_sample;
