//! Ticketing integration adapters.

mod http;

pub use http::HttpTicketNotifier;
