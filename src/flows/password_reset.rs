// src/flows/password_reset.rs

//! Three-step OTP password-reset flow: email → code → new password.
//!
//! Each forward transition is gated by the corresponding backend call, with
//! local validation first. The flow lives in memory only; nothing survives a
//! restart. The single backward transition goes from the code step to the
//! email step.

use async_trait::async_trait;

use crate::api::AuthApi;
use crate::error::{AppError, Result};
use crate::utils;

/// Backend boundary of the flow.
#[async_trait]
pub trait ResetBackend {
    async fn forgot_password(&self, email: &str) -> Result<()>;
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<()>;
    async fn reset_password(&self, email: &str, otp: &str, new_password: &str) -> Result<()>;
}

#[async_trait]
impl ResetBackend for AuthApi<'_> {
    async fn forgot_password(&self, email: &str) -> Result<()> {
        AuthApi::forgot_password(self, email).await
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<()> {
        AuthApi::verify_otp(self, email, otp).await
    }

    async fn reset_password(&self, email: &str, otp: &str, new_password: &str) -> Result<()> {
        AuthApi::reset_password(self, email, otp, new_password).await
    }
}

/// Flow position. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStep {
    Email,
    Otp,
    Password,
    Done,
}

/// The password-reset state machine.
pub struct PasswordResetFlow {
    step: ResetStep,
    email: String,
    otp: String,
}

impl PasswordResetFlow {
    pub fn new() -> Self {
        Self {
            step: ResetStep::Email,
            email: String::new(),
            otp: String::new(),
        }
    }

    pub fn step(&self) -> ResetStep {
        self.step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Request an OTP for `email` and advance to the code step.
    pub async fn submit_email(&mut self, backend: &dyn ResetBackend, email: &str) -> Result<()> {
        if self.step != ResetStep::Email {
            return Err(AppError::validation("email already submitted"));
        }
        if !utils::is_valid_email(email) {
            return Err(AppError::validation("invalid email address"));
        }
        backend.forgot_password(email).await?;
        self.email = email.to_string();
        self.step = ResetStep::Otp;
        Ok(())
    }

    /// Verify the 6-digit code and advance to the password step.
    pub async fn submit_otp(&mut self, backend: &dyn ResetBackend, otp: &str) -> Result<()> {
        if self.step != ResetStep::Otp {
            return Err(AppError::validation("no pending code verification"));
        }
        if !utils::is_valid_otp(otp) {
            return Err(AppError::validation("the code must be 6 digits"));
        }
        backend.verify_otp(&self.email, otp).await?;
        self.otp = otp.to_string();
        self.step = ResetStep::Password;
        Ok(())
    }

    /// Set the new password; on success the flow is complete.
    pub async fn submit_password(
        &mut self,
        backend: &dyn ResetBackend,
        new_password: &str,
        confirm: &str,
    ) -> Result<()> {
        if self.step != ResetStep::Password {
            return Err(AppError::validation("the code was not verified yet"));
        }
        if new_password.len() < 6 {
            return Err(AppError::validation(
                "password must be at least 6 characters",
            ));
        }
        if new_password != confirm {
            return Err(AppError::validation("passwords do not match"));
        }
        backend
            .reset_password(&self.email, &self.otp, new_password)
            .await?;
        self.step = ResetStep::Done;
        Ok(())
    }

    /// Go back from the code step to the email step. No-op elsewhere.
    pub fn back(&mut self) {
        if self.step == ResetStep::Otp {
            self.otp.clear();
            self.step = ResetStep::Email;
        }
    }
}

impl Default for PasswordResetFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MockBackend {
        fail_verify: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockBackend {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResetBackend for MockBackend {
        async fn forgot_password(&self, _email: &str) -> Result<()> {
            self.calls.lock().unwrap().push("forgot");
            Ok(())
        }

        async fn verify_otp(&self, _email: &str, _otp: &str) -> Result<()> {
            self.calls.lock().unwrap().push("verify");
            if self.fail_verify {
                return Err(AppError::api(400, "invalid code"));
            }
            Ok(())
        }

        async fn reset_password(&self, _email: &str, _otp: &str, _pw: &str) -> Result<()> {
            self.calls.lock().unwrap().push("reset");
            Ok(())
        }
    }

    #[tokio::test]
    async fn happy_path_walks_all_three_steps() {
        let backend = MockBackend::default();
        let mut flow = PasswordResetFlow::new();

        flow.submit_email(&backend, "ana@example.com").await.unwrap();
        assert_eq!(flow.step(), ResetStep::Otp);

        flow.submit_otp(&backend, "123456").await.unwrap();
        assert_eq!(flow.step(), ResetStep::Password);

        flow.submit_password(&backend, "nova-senha", "nova-senha")
            .await
            .unwrap();
        assert_eq!(flow.step(), ResetStep::Done);
        assert_eq!(backend.calls(), vec!["forgot", "verify", "reset"]);
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_the_backend() {
        let backend = MockBackend::default();
        let mut flow = PasswordResetFlow::new();

        let err = flow.submit_email(&backend, "not-an-email").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(flow.step(), ResetStep::Email);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn short_or_nonnumeric_otp_is_rejected_locally() {
        let backend = MockBackend::default();
        let mut flow = PasswordResetFlow::new();
        flow.submit_email(&backend, "ana@example.com").await.unwrap();

        assert!(flow.submit_otp(&backend, "12345").await.unwrap_err().is_validation());
        assert!(flow.submit_otp(&backend, "12345a").await.unwrap_err().is_validation());
        assert_eq!(flow.step(), ResetStep::Otp);
        assert_eq!(backend.calls(), vec!["forgot"]);
    }

    #[tokio::test]
    async fn failed_verification_stays_on_otp_step() {
        let backend = MockBackend {
            fail_verify: true,
            ..MockBackend::default()
        };
        let mut flow = PasswordResetFlow::new();
        flow.submit_email(&backend, "ana@example.com").await.unwrap();

        let err = flow.submit_otp(&backend, "123456").await.unwrap_err();
        assert!(matches!(err, AppError::Api { status: 400, .. }));
        assert_eq!(flow.step(), ResetStep::Otp);
    }

    #[tokio::test]
    async fn password_mismatch_is_rejected_locally() {
        let backend = MockBackend::default();
        let mut flow = PasswordResetFlow::new();
        flow.submit_email(&backend, "ana@example.com").await.unwrap();
        flow.submit_otp(&backend, "123456").await.unwrap();

        assert!(
            flow.submit_password(&backend, "nova-senha", "outra")
                .await
                .unwrap_err()
                .is_validation()
        );
        assert!(
            flow.submit_password(&backend, "curta", "curta")
                .await
                .unwrap_err()
                .is_validation()
        );
        assert_eq!(flow.step(), ResetStep::Password);
        assert_eq!(backend.calls(), vec!["forgot", "verify"]);
    }

    #[tokio::test]
    async fn back_returns_from_otp_to_email_only() {
        let backend = MockBackend::default();
        let mut flow = PasswordResetFlow::new();

        flow.back();
        assert_eq!(flow.step(), ResetStep::Email);

        flow.submit_email(&backend, "ana@example.com").await.unwrap();
        flow.back();
        assert_eq!(flow.step(), ResetStep::Email);

        flow.submit_email(&backend, "ana@example.com").await.unwrap();
        flow.submit_otp(&backend, "123456").await.unwrap();
        flow.back();
        assert_eq!(flow.step(), ResetStep::Password);
    }

    #[tokio::test]
    async fn steps_cannot_be_skipped() {
        let backend = MockBackend::default();
        let mut flow = PasswordResetFlow::new();

        assert!(flow.submit_otp(&backend, "123456").await.unwrap_err().is_validation());
        assert!(
            flow.submit_password(&backend, "nova-senha", "nova-senha")
                .await
                .unwrap_err()
                .is_validation()
        );
        assert!(backend.calls().is_empty());
    }
}
