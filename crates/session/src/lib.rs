#![allow(clippy::new_without_default, clippy::single_match, clippy::identity_op)]

pub mod capture;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod frame;
pub mod host;
pub mod input;
pub mod persist;
pub mod present;
pub mod record;
pub mod session;
pub mod stepper;

#[cfg(test)]
mod test;

pub use error::SessionError;
pub use session::{Hotkey, Session, Transition};
