mod app;
mod message;
mod screens;
mod state;

pub use app::run;
pub use message::Message;
pub use state::AppState;
