pub mod client;
pub mod config;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod markdown;
pub mod providers;
pub mod server;
pub mod services;

pub use crate::client::RoutineBuilder;
pub use crate::config::Config;
pub use crate::domains::form::RoutineForm;
pub use crate::domains::preferences::{RoutinePreferences, SavedPreferences};
pub use crate::error::{Result, RoutineError};
pub use crate::services::controller::{FormController, ResultView, SubmitButton};
