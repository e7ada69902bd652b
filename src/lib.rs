pub mod app;
pub mod config;
pub mod countdown;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod share;
pub mod state;
pub mod themes;
pub mod ticker;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use state::AppState;
