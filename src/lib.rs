//! ticketflow drives a third-party event site's registration UI to
//! replace the default ticket type with an Early Bird / General pair.
//!
//! One HTTP request runs one strictly sequential browser workflow:
//! launch, sign in, navigate, delete the default ticket type, create two
//! ticket types, close, respond with the accumulated step log.

pub mod config;
pub mod errors;
pub mod server;
pub mod steplog;
pub mod steps;
pub mod tickets;
pub mod workflow;
