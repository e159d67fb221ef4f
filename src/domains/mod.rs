pub mod form;
pub mod preferences;
