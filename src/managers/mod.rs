// PantryChef state managers
// Managers handle persisted state: the rolling recipe history.

pub mod history_manager;
