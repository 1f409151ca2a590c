pub mod auth_handlers;
pub mod history_handlers;
pub mod outreach_handlers;
pub mod system_handlers;

pub use auth_handlers::*;
pub use history_handlers::*;
pub use outreach_handlers::*;
pub use system_handlers::*;
