//! Chain handlers: logging, session activity, command routing.

mod logging_handler;
mod router_handler;
mod session_handler;

pub use logging_handler::LoggingHandler;
pub use router_handler::RouterHandler;
pub use session_handler::SessionHandler;
