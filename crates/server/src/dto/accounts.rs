//! # Account Data Transfer Objects
//!
//! Signup and login bodies for students, employers and admins.

use entity::sea_orm_active_enums::AdminRole;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::AccountSummary;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentSignupRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name:          String,
    #[validate(email(message = "Invalid email address"))]
    pub email:         String,
    pub password:      String,
    #[validate(length(min = 2, message = "College must be at least 2 characters"))]
    pub college:       String,
    #[validate(length(min = 2, message = "Degree must be at least 2 characters"))]
    pub degree:        String,
    #[validate(range(min = 1, max = 6, message = "Year must be between 1 and 6"))]
    pub year:          i32,
    #[validate(length(min = 1, message = "Select at least one interest"))]
    pub interests:     Vec<String>,
    pub university_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployerSignupRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name:        String,
    #[validate(email(message = "Invalid email address"))]
    pub email:       String,
    pub password:    String,
    #[validate(length(min = 2, message = "Company must be at least 2 characters"))]
    pub company:     String,
    #[validate(length(min = 2, message = "Designation must be at least 2 characters"))]
    pub designation: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminSignupRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name:     String,
    #[validate(email(message = "Invalid email address"))]
    pub email:    String,
    pub password: String,
    pub role:     Option<AdminRole>,
}

/// Login body shared by the three account kinds.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email:    String,
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

/// `{message, <role>: {id, name, email}}`
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub message:  String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student:  Option<AccountSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer: Option<AccountSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin:    Option<AdminSummary>,
}

impl AccountResponse {
    pub fn student(message: &str, account: AccountSummary) -> Self {
        Self {
            message:  message.to_string(),
            student:  Some(account),
            employer: None,
            admin:    None,
        }
    }

    pub fn employer(message: &str, account: AccountSummary) -> Self {
        Self {
            message:  message.to_string(),
            student:  None,
            employer: Some(account),
            admin:    None,
        }
    }

    pub fn admin(message: &str, account: AdminSummary) -> Self {
        Self {
            message:  message.to_string(),
            student:  None,
            employer: None,
            admin:    Some(account),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub id:    String,
    pub name:  String,
    pub email: String,
    pub role:  AdminRole,
}
