// src/api/mod.rs

//! Typed clients for the backend REST API.
//!
//! Each resource family gets a thin client struct borrowing the shared
//! [`ApiClient`]; all of them speak the uniform `{statusCode, message, data}`
//! envelope.

mod academic;
mod auth;
pub mod http;
mod materials;
mod users;

pub use academic::{CoursesApi, SemestersApi, SubjectsApi, YearsApi};
pub use auth::AuthApi;
pub use http::{ApiClient, Envelope};
pub use materials::{FilesApi, MaterialsApi};
pub use users::{AdminApi, StatsApi, UsersApi};
