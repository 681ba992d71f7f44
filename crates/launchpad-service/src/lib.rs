//! HTTP relay for the token launchpad.
//!
//! Exposes `POST /api/deploy`, which deploys a token through the
//! [`launchpad_deploy::Launcher`], and `GET /api/health`.

pub mod apis;
pub mod server;
