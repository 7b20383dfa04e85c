pub mod input;
pub mod types;
pub mod version;
