pub mod deploy;
pub mod health;
