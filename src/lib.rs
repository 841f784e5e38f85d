// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod runtime;
pub mod scoped;
pub mod session;
pub mod timer;
pub mod ui;

pub use app::App;
pub use session::{Action, Outcome, Screen, Session};
