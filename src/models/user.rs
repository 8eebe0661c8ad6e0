// src/models/user.rs

//! User, authentication, and admin data structures.

use serde::{Deserialize, Serialize};

/// User role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// An account on the repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    pub full_name: String,

    pub email: String,

    /// Student/staff code
    #[serde(default)]
    pub code: String,

    pub role: Role,

    /// Active flag
    #[serde(default)]
    pub status: bool,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub code: String,
}

/// Response of `POST /auth/login`: the token sits beside the envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub status_code: u16,
    pub message: String,
    pub token: String,
    pub data: User,
}

/// Body of `POST /auth/forgot-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `POST /auth/verify-otp`.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Body of `POST /auth/reset-password`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// Body of `PATCH /users/email`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEmail {
    pub email: String,
}

/// Body of `PATCH /users/password`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePassword {
    pub current_password: String,
    pub new_password: String,
}

/// Fields an administrator may change on a user.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

/// Aggregates shown on the admin dashboard.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    pub total_materials: u64,
    pub total_users: u64,
    pub total_downloads: u64,
    pub total_uploads: u64,
    pub pending_uploads: u64,
    pub materials_growth: f64,
    pub users_growth: f64,
    pub downloads_growth: f64,
    pub uploads_growth: f64,
}

/// Moderation state of an upload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Approved,
    Rejected,
}

/// One entry of the admin upload history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: String,
    pub user: UploadUser,
    pub file: UploadFileRef,
    pub material: UploadMaterialRef,
    pub status: UploadStatus,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRef {
    pub id: String,
    pub designation: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMaterialRef {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
}

/// Per-user activity aggregates.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_uploads: u64,
    pub total_downloads: u64,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub created_at: String,
}

/// Site-wide entity counts.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GenericStats {
    pub users: u64,
    pub materials: u64,
    pub courses: u64,
    pub subjects: u64,
}
