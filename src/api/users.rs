// src/api/users.rs

//! Account and administration endpoints.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{
    AdminStats, GenericStats, UpdateEmail, UpdatePassword, UploadRecord, User, UserPatch,
    UserStats,
};

/// Client for the authenticated user's own account endpoints.
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `PATCH /users/email`.
    pub async fn update_email(&self, email: &str) -> Result<()> {
        let body = UpdateEmail {
            email: email.to_string(),
        };
        self.client.patch_unit("/users/email", &body).await
    }

    /// `PATCH /users/password`.
    pub async fn update_password(&self, current: &str, new: &str) -> Result<()> {
        let body = UpdatePassword {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.client.patch_unit("/users/password", &body).await
    }

    /// `GET /users/stats`: the caller's activity aggregates.
    pub async fn stats(&self) -> Result<UserStats> {
        self.client.get_data("/users/stats").await
    }
}

/// Client for administrator endpoints.
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /users`.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.client.get_data("/users").await
    }

    /// `GET /users/:id`.
    pub async fn user(&self, id: &str) -> Result<User> {
        self.client.get_data(&format!("/users/{id}")).await
    }

    /// `PUT /users/:id`.
    pub async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<User> {
        self.client.put_data(&format!("/users/{id}"), patch).await
    }

    /// `DELETE /users/:id`.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("/users/{id}")).await
    }

    /// `GET /admin/stats`: dashboard aggregates.
    pub async fn stats(&self) -> Result<AdminStats> {
        self.client.get_data("/admin/stats").await
    }

    /// `GET /admin/uploads`: upload moderation history.
    pub async fn uploads(&self) -> Result<Vec<UploadRecord>> {
        self.client.get_data("/admin/uploads").await
    }
}

/// Client for the site-wide counts endpoint.
pub struct StatsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StatsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /stats`: entity counts for users, materials, courses, subjects.
    pub async fn generic(&self) -> Result<GenericStats> {
        self.client.get_data("/stats").await
    }
}
