// PantryChef services
// Services provide the recipe flow: server client, response normalizing, markup, rendering, notifications.

pub mod history_view;
pub mod markup;
pub mod notifier;
pub mod recipe_api;
pub mod recipe_board;
pub mod response_normalizer;
pub mod result_renderer;
pub mod settings_engine;
pub mod view_surface;
