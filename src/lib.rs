mod commands;
mod config;
mod error;
mod handlers;
mod services;
mod state;
mod types;
mod view;

pub use commands::*;
pub use config::*;
pub use error::*;
pub use handlers::*;
pub use services::*;
pub use state::*;
pub use types::*;
pub use view::*;
