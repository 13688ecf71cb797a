//! Simple enum tests for entity crate

use entity::sea_orm_active_enums::{AdminRole, EventType, JobStatus, UserType};
use sea_orm::{ActiveEnum, Iterable};

/// Display matches the stored string value
#[test]
fn test_display_matches_db_value() {
    for value in UserType::iter() {
        assert_eq!(value.to_string(), value.to_value());
    }
    for value in AdminRole::iter() {
        assert_eq!(value.to_string(), value.to_value());
    }
    for value in JobStatus::iter() {
        assert_eq!(value.to_string(), value.to_value());
    }
    for value in EventType::iter() {
        assert_eq!(value.to_string(), value.to_value());
    }
}

/// Test UserType enum values
#[test]
fn test_user_type_values() {
    assert_eq!(format!("{}", UserType::Anonymous), "ANONYMOUS");
    assert_eq!(format!("{}", UserType::Student), "STUDENT");
    assert_eq!(format!("{}", UserType::Employer), "EMPLOYER");
    assert_eq!(format!("{}", UserType::Admin), "ADMIN");
}

/// Defaults used when a field is omitted on create
#[test]
fn test_defaults() {
    assert_eq!(JobStatus::default(), JobStatus::Pending);
    assert_eq!(EventType::default(), EventType::Other);
    assert_eq!(AdminRole::default(), AdminRole::Admin);
}

/// Serde uses the same spelling as the database
#[test]
fn test_serde_spelling() {
    assert_eq!(serde_json::to_value(AdminRole::SuperAdmin).unwrap(), "SUPER_ADMIN");
    let parsed: EventType = serde_json::from_value(serde_json::json!("WORKSHOP")).unwrap();
    assert_eq!(parsed, EventType::Workshop);
    assert!(serde_json::from_value::<JobStatus>(serde_json::json!("approved")).is_err());
}

/// String round trip through ActiveEnum
#[test]
fn test_try_from_value() {
    assert_eq!(JobStatus::try_from_value(&"REJECTED".to_string()).unwrap(), JobStatus::Rejected);
    assert!(JobStatus::try_from_value(&"ARCHIVED".to_string()).is_err());
}
