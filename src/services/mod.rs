pub mod controller;
pub mod preference_store;
pub mod prompt;
