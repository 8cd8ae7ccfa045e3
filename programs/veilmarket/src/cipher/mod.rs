//! Ciphertext handle plumbing shared by the program and its clients

pub mod binding;

pub use binding::*;
