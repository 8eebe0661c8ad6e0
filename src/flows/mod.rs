// src/flows/mod.rs

//! Multi-step interactive flows.

pub mod password_reset;
pub mod upload;

pub use password_reset::{PasswordResetFlow, ResetBackend, ResetStep};
pub use upload::{ApiUploadBackend, MaterialDetails, UploadBackend, UploadStep, UploadWizard};
