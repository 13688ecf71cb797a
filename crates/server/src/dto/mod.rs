//! # Data Transfer Objects Module
//!
//! Request and response types for API endpoints. Everything on the wire is
//! camelCase.

pub mod accounts;
pub mod analytics;
pub mod events;
pub mod jobs;
pub mod resources;
pub mod students;
pub mod tracking;
pub mod universities;

use serde::{Deserialize, Serialize};

/// `{id, name, email}` of a related account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id:    String,
    pub name:  String,
    pub email: String,
}

/// Employer fields embedded in job listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerSummary {
    pub id:      String,
    pub name:    String,
    pub company: String,
}

impl From<&entity::employers::Model> for EmployerSummary {
    fn from(employer: &entity::employers::Model) -> Self {
        Self {
            id:      employer.id.clone(),
            name:    employer.name.clone(),
            company: employer.company.clone(),
        }
    }
}

/// Body carrying a single id, e.g. `{"eventId": ".."}`.
///
/// Fields are optional so a missing id is answered with a readable 400
/// instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdRequest {
    pub event_id:   Option<String>,
    pub job_id:     Option<String>,
    pub student_id: Option<String>,
}
