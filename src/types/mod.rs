// PantryChef shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod history;
pub mod recipe;
pub mod settings;
pub mod view;
