pub mod memory;
pub mod mistral;
pub mod sqlite;
