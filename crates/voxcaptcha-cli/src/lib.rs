//! voxcaptcha CLI library.
//!
//! Command implementations behind the `voxcaptcha` binary.

pub mod commands;
