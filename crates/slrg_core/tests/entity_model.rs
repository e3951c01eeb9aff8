use slrg_core::{
    Appearances, Assessment, Entity, FurtherEducation, Member, SortValue, ValidationError,
};

fn rejected_fields(result: Result<(), ValidationError>) -> Vec<&'static str> {
    match result {
        Err(err) => err.field_errors().iter().map(|error| error.field).collect(),
        Ok(()) => Vec::new(),
    }
}

#[test]
fn member_json_uses_camel_case_and_defaults_active() {
    let member: Member = serde_json::from_str(
        r#"{"firstName":"Alice","lastName":"Keller","memberSince":"2015-03-01"}"#,
    )
    .unwrap();
    assert_eq!(member.id, None);
    assert!(member.active);
    assert_eq!(member.member_since.as_deref(), Some("2015-03-01"));

    let json = serde_json::to_value(member.with_id(4)).unwrap();
    assert_eq!(json["id"], 4);
    assert_eq!(json["firstName"], "Alice");
    assert_eq!(json["birthDate"], serde_json::Value::Null);
}

#[test]
fn member_dates_must_be_iso_and_ordered() {
    let mut member = Member::new("Alice", "Keller");
    member.birth_date = Some("1990-13-01".to_string());
    assert_eq!(rejected_fields(member.validate()), vec!["birthDate"]);

    member.birth_date = Some("1990-04-12".to_string());
    member.member_since = Some("1989-01-01".to_string());
    assert_eq!(rejected_fields(member.validate()), vec!["memberSince"]);

    member.member_since = Some("2005-06-30".to_string());
    assert!(member.validate().is_ok());
}

#[test]
fn assessment_requires_member_and_score_in_range() {
    let mut assessment = Assessment::new(1, 101);
    assessment.member_id = None;
    assert_eq!(
        rejected_fields(assessment.validate()),
        vec!["memberId", "score"]
    );

    let assessment = Assessment::new(1, 100);
    assert!(assessment.validate().is_ok());
}

#[test]
fn appearances_reject_negative_hours() {
    let mut appearance = Appearances::new(1, "Regatta guard duty");
    appearance.hours = Some(-2);
    assert_eq!(rejected_fields(appearance.validate()), vec!["hours"]);
}

#[test]
fn further_education_validity_window() {
    let mut course = FurtherEducation::new(1, "CPR refresher");
    course.completed_on = Some("2024-04-01".to_string());
    course.valid_until = Some("2023-04-01".to_string());
    assert_eq!(rejected_fields(course.validate()), vec!["validUntil"]);

    course.valid_until = Some("2026-04-01".to_string());
    assert!(course.validate().is_ok());

    course.valid_until = Some("2026-02-29".to_string());
    assert_eq!(rejected_fields(course.validate()), vec!["validUntil"]);
}

#[test]
fn sort_values_order_nulls_first() {
    let mut dated = Member::new("Alice", "Keller");
    dated.birth_date = Some("1990-04-12".to_string());
    let undated = Member::new("Bruno", "Meier");

    let dated_value = dated.sort_value("birthDate").unwrap();
    let undated_value = undated.sort_value("birthDate").unwrap();
    assert_eq!(undated_value, SortValue::Null);
    assert!(undated_value < dated_value);
    assert!(Member::is_sortable("id"));
    assert!(!Member::is_sortable("displayName"));
    assert_eq!(dated.sort_value("displayName"), None);
}
