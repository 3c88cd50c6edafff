use hr_portal::db::models::{NewEngagementSurvey, NewMessage, RegisterRequest};
use hr_portal::services::datasets::{DatasetService, EngagementService};
use validator::Validate;

#[test]
fn test_register_request_rules() {
    let ok = RegisterRequest {
        email: "new.hire@example.com".to_string(),
        name: "New Hire".to_string(),
        password: "Welcome1!".to_string(),
    };
    assert!(ok.validate().is_ok());

    let weak = RegisterRequest {
        password: "password".to_string(),
        ..ok
    };
    assert!(weak.validate().is_err());
}

#[test]
fn test_contact_message_rules() {
    let message = NewMessage {
        name: "Visitor".to_string(),
        email: "not-an-email".to_string(),
        subject: "Hello".to_string(),
        body: "Question about openings".to_string(),
    };
    assert!(message.validate().is_err());
}

#[test]
fn test_engagement_enps_accepts_both_spellings() {
    let survey: NewEngagementSurvey = serde_json::from_value(serde_json::json!({
        "period": "2025-05-01",
        "department": "Support",
        "score": 72.5,
        "participation_rate": 81.0,
        "e_nps": 120
    }))
    .unwrap();
    assert_eq!(survey.enps, 120);
    assert!(EngagementService::check(&survey).is_err());
}
