// src/models/mod.rs

//! Domain models for the repository client.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod academic;
mod config;
mod material;
mod user;

// Re-export all public types
pub use academic::{
    Course, CourseData, CourseDetails, Semester, SemesterData, Subject, SubjectData, Year,
    YearData, YearWithSemesters,
};
pub use config::{API_URL_ENV, ApiConfig, Config, UploadConfig};
pub use material::{Material, MaterialData, MaterialType, StoredFile};
pub use user::{
    ActivityEntry, AdminStats, AuthResponse, ForgotPasswordRequest, GenericStats, LoginRequest,
    RegisterRequest, ResetPasswordRequest, Role, UpdateEmail, UpdatePassword, UploadFileRef,
    UploadMaterialRef, UploadRecord, UploadStatus, UploadUser, User, UserPatch, UserStats,
    VerifyOtpRequest,
};
