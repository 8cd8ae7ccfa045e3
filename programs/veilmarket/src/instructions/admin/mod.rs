//! Admin-only protocol maintenance

pub mod set_pause;
pub mod update_config;

pub use set_pause::*;
pub use update_config::*;
