use hr_portal::db::enums::{ApplicationStatus, EmploymentType, LeaveReason, NewsCategory, UserRole};

#[test]
fn test_enum_wire_names() {
    assert_eq!(serde_json::to_string(&EmploymentType::FullTime).unwrap(), "\"full_time\"");
    assert_eq!(serde_json::to_string(&LeaveReason::ContractEnd).unwrap(), "\"contract_end\"");
    assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");

    let status: ApplicationStatus = serde_json::from_str("\"shortlisted\"").unwrap();
    assert_eq!(status, ApplicationStatus::Shortlisted);
}

#[test]
fn test_unknown_values_are_rejected() {
    assert!("gossip".parse::<NewsCategory>().is_err());
    assert!(serde_json::from_str::<ApplicationStatus>("\"maybe\"").is_err());
}

#[test]
fn test_every_application_status_is_listed() {
    assert_eq!(ApplicationStatus::ALL.len(), 5);
    assert_eq!(ApplicationStatus::ALL[0], ApplicationStatus::Pending);
}
