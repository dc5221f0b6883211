//! The student services directory and the campus events showcase.
//!
//! Both pages are static: their listings are compiled into the server.

mod events;
mod handlers;
mod services;

pub use handlers::{get_events_page, get_services_page};
