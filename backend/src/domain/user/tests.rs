//! Tests for the user model business rules.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn user() -> User {
    User::new(
        UserId::from(1),
        &UserDraft {
            first_name: "John".into(),
            last_name: "Doe".into(),
            age: 30,
            money: 2_000.0,
            pet_name: "Buddy".into(),
            address: "123 Main St".into(),
            post_code: "ABC123".into(),
            status: Status::Regular,
            ..UserDraft::default()
        },
    )
}

fn aged(mut user: User, age: u32) -> User {
    user.age = age;
    user
}

fn with_money(mut user: User, money: f64) -> User {
    user.money = money;
    user
}

#[rstest]
fn total_money_counts_direct_children_only(user: User) {
    let child_a = with_money(User::new(UserId::from(2), &UserDraft::default()), 500.0);
    let child_b = with_money(User::new(UserId::from(3), &UserDraft::default()), 300.0);
    assert_eq!(user.total_money([&child_a, &child_b]), 2_800.0);
}

#[rstest]
fn total_money_without_children_is_own_money(user: User) {
    assert_eq!(user.total_money(Vec::<&User>::new()), 2_000.0);
}

#[rstest]
fn total_money_accepts_negative_balances(user: User) {
    let debtor = with_money(User::new(UserId::from(2), &UserDraft::default()), -2_500.0);
    assert_eq!(user.total_money([&debtor]), -500.0);
}

#[rstest]
#[case(999.0, Status::Outdated)]
#[case(999.99, Status::Outdated)]
#[case(1_000.0, Status::Regular)]
#[case(4_999.5, Status::Regular)]
#[case(5_000.0, Status::Vip)]
#[case(9_999.99, Status::Vip)]
#[case(10_000.0, Status::Admin)]
#[case(-10.0, Status::Outdated)]
fn proposed_status_follows_money_breakpoints(user: User, #[case] money: f64, #[case] expected: Status) {
    assert_eq!(with_money(user, money).propose_new_status(), expected);
}

#[rstest]
#[case(Status::Outdated, false)]
#[case(Status::Regular, false)]
#[case(Status::Vip, true)]
#[case(Status::Admin, true)]
fn discount_is_reserved_for_vip_and_admin(mut user: User, #[case] status: Status, #[case] eligible: bool) {
    user.status = status;
    assert_eq!(user.is_eligible_for_discount(), eligible);
}

#[rstest]
#[case(0, UserCategory::Child)]
#[case(17, UserCategory::Child)]
#[case(18, UserCategory::Adult)]
#[case(59, UserCategory::Adult)]
#[case(60, UserCategory::Senior)]
#[case(64, UserCategory::Senior)]
fn category_boundaries(user: User, #[case] age: u32, #[case] expected: UserCategory) {
    assert_eq!(aged(user, age).category(), expected);
}

#[rstest]
#[case(60, false)]
#[case(64, false)]
#[case(65, true)]
fn senior_citizen_starts_at_sixty_five(user: User, #[case] age: u32, #[case] expected: bool) {
    let user = aged(user, age);
    assert_eq!(user.is_senior_citizen(), expected);
    assert_eq!(user.category(), UserCategory::Senior);
}

#[rstest]
#[case(12, false)]
#[case(13, true)]
#[case(19, true)]
#[case(20, false)]
fn teenager_range_is_inclusive(user: User, #[case] age: u32, #[case] expected: bool) {
    assert_eq!(aged(user, age).is_teenager(), expected);
}

#[rstest]
#[case(30, 35)]
#[case(65, 0)]
#[case(75, 0)]
fn years_to_retirement_never_negative(user: User, #[case] age: u32, #[case] expected: u32) {
    let user = aged(user, age);
    assert_eq!(user.retirement_age(), RETIREMENT_AGE);
    assert_eq!(user.years_to_retirement(), expected);
}

#[rstest]
fn increment_age_until_reports_years_added(mut user: User) {
    assert_eq!(user.increment_age_until(40), Ok(10));
    assert_eq!(user.age, 40);
}

#[rstest]
#[case(0, AgeIncrementError::NotPositive)]
#[case(-5, AgeIncrementError::NotPositive)]
#[case(30, AgeIncrementError::NotAboveCurrentAge { current: 30, target: 30 })]
#[case(25, AgeIncrementError::NotAboveCurrentAge { current: 30, target: 25 })]
#[case(i64::MAX, AgeIncrementError::OutOfRange)]
fn increment_age_until_rejects_invalid_targets(
    mut user: User,
    #[case] target: i64,
    #[case] expected: AgeIncrementError,
) {
    assert_eq!(user.increment_age_until(target), Err(expected));
    assert_eq!(user.age, 30, "age is left unchanged");
}

#[rstest]
#[case(AgeIncrementError::NotPositive, "Target age must be greater than 0")]
#[case(
    AgeIncrementError::NotAboveCurrentAge { current: 30, target: 10 },
    "Target age must be greater than the current age"
)]
#[case(AgeIncrementError::NotANumber, "Target age must be a number")]
fn age_increment_errors_have_client_messages(#[case] error: AgeIncrementError, #[case] message: &str) {
    assert_eq!(error.to_string(), message);
}

#[rstest]
#[case("40", Ok(40))]
#[case(" -3 ", Ok(-3))]
#[case("+7", Ok(7))]
#[case("40.5", Ok(40))]
#[case("45years", Ok(45))]
#[case("forty", Err(AgeIncrementError::NotANumber))]
#[case("-", Err(AgeIncrementError::NotANumber))]
#[case(".5", Err(AgeIncrementError::NotANumber))]
#[case("", Err(AgeIncrementError::NotANumber))]
#[case("99999999999999999999", Err(AgeIncrementError::OutOfRange))]
fn parse_target_reads_the_leading_integer(#[case] raw: &str, #[case] expected: Result<i64, AgeIncrementError>) {
    assert_eq!(AgeIncrementError::parse_target(raw), expected);
}

#[rstest]
fn apply_merges_only_supplied_fields(mut user: User) {
    user.apply(UserChanges {
        first_name: Some("Updated".into()),
        money: Some(7_500.5),
        ..UserChanges::default()
    });
    assert_eq!(user.first_name, "Updated");
    assert_eq!(user.money, 7_500.5);
    assert_eq!(user.last_name, "Doe");
    assert_eq!(user.age, 30);
}

#[rstest]
#[case(json!("outdated"), Status::Outdated)]
#[case(json!("Regular"), Status::Regular)]
#[case(json!("vip"), Status::Vip)]
#[case(json!("VIP"), Status::Vip)]
#[case(json!("Admin"), Status::Admin)]
fn status_accepts_lowercase_and_capitalised_input(#[case] raw: serde_json::Value, #[case] expected: Status) {
    let status: Status = serde_json::from_value(raw).expect("status parses");
    assert_eq!(status, expected);
}

#[test]
fn status_serialises_lowercase() {
    assert_eq!(serde_json::to_value(Status::Vip).expect("serialise"), json!("vip"));
}

#[rstest]
#[case(json!(1500.5), 1_500.5)]
#[case(json!(1e3), 1_000.0)]
#[case(json!(250), 250.0)]
fn draft_accepts_any_json_number_as_money(#[case] money: serde_json::Value, #[case] expected: f64) {
    let draft: UserDraft =
        serde_json::from_value(json!({ "money": money })).expect("draft parses");
    assert_eq!(draft.money, expected);
}

#[test]
fn draft_defaults_missing_fields() {
    let draft: UserDraft =
        serde_json::from_value(json!({ "firstName": "Jane" })).expect("draft parses");
    assert_eq!(draft.first_name, "Jane");
    assert_eq!(draft.age, 0);
    assert!(draft.children.is_empty());
    assert_eq!(draft.status, Status::Regular);
}

#[test]
fn changes_ignore_identifier_and_children() {
    let changes: UserChanges = serde_json::from_value(json!({
        "id": "99",
        "children": [{ "firstName": "Ghost" }],
        "lastName": "Smith"
    }))
    .expect("changes parse");
    assert_eq!(
        changes,
        UserChanges {
            last_name: Some("Smith".into()),
            ..UserChanges::default()
        }
    );
}

#[rstest]
fn snapshot_uses_camel_case_field_names(user: User) {
    let value = serde_json::to_value(UserSnapshot::from_user(&user, Vec::new())).expect("serialise");
    assert_eq!(
        value,
        json!({
            "id": "1",
            "firstName": "John",
            "lastName": "Doe",
            "age": 30,
            "money": 2000.0,
            "children": [],
            "petName": "Buddy",
            "address": "123 Main St",
            "postCode": "ABC123",
            "status": "regular"
        })
    );
}
