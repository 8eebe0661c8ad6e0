// src/api/auth.rs

//! Authentication endpoints.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    VerifyOtpRequest,
};

/// Client for `/auth` endpoints.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`. The token sits beside the envelope, so the whole
    /// body is deserialized.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post_raw("/auth/login", &body).await
    }

    /// `POST /auth/register`.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        code: &str,
    ) -> Result<AuthResponse> {
        let body = RegisterRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            code: code.to_string(),
        };
        self.client.post_raw("/auth/register", &body).await
    }

    /// `POST /auth/forgot-password`: request an OTP by email.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let body = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.client.post_unit("/auth/forgot-password", &body).await
    }

    /// `POST /auth/verify-otp`.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<()> {
        let body = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        self.client.post_unit("/auth/verify-otp", &body).await
    }

    /// `POST /auth/reset-password`.
    pub async fn reset_password(&self, email: &str, otp: &str, new_password: &str) -> Result<()> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
            otp: otp.to_string(),
            new_password: new_password.to_string(),
        };
        self.client.post_unit("/auth/reset-password", &body).await
    }
}
