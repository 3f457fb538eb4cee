//! Authentication

pub mod credentials;
mod errors;
mod models;
mod password;
mod registry;
mod service;
mod sweeper;
mod token;

pub use errors::*;
pub use models::*;
pub use password::{PasswordError, PasswordHasherConfig, verify_password};
pub use registry::{DEFAULT_TOKEN_TTL, TokenRegistry};
pub use service::*;
pub use sweeper::{DEFAULT_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL, SessionSweeper};
pub use token::*;
