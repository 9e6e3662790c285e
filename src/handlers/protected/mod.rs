// handlers/protected/mod.rs - Protected handlers (JWT authentication required)

pub mod reports;
pub mod whoami;
