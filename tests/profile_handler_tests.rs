
use chrono::NaiveDate;
use devconnect_backend::{
    entities::{
        education::NewEducation,
        experience::NewExperience,
        profile::ProfileRequest,
        user::User,
    },
    errors::AppError,
    repositories::user::UserRepository,
    AppState,
};
use test_user::*;
use test_utils::*;
use uuid::Uuid;

async fn create_user(state: &AppState, name: &str, email: &str) -> User {
    let insert = named_user(name, email).prepare_for_insert("not-a-real-hash".into());
    state.auth_handler.user_repo.create_user(&insert).await.unwrap()
}

fn developer_request() -> ProfileRequest {
    ProfileRequest {
        status: "Developer".into(),
        skills: "js, css".into(),
        ..Default::default()
    }
}

fn experience(title: &str) -> NewExperience {
    NewExperience {
        title: title.into(),
        company: "Acme".into(),
        location: None,
        from: NaiveDate::from_ymd_opt(2020, 1, 1),
        to: None,
        current: true,
        description: None,
    }
}

#[actix_rt::test]
async fn upsert_creates_then_updates_a_single_profile() {
    let (state, store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;
    let handler = &state.profile_handler;

    let created = handler.upsert_profile(&user.id, ProfileRequest {
        company: Some("Acme".into()),
        ..developer_request()
    }).await.unwrap();
    assert_eq!(store.profile_count(), 1);

    let updated = handler.upsert_profile(&user.id, ProfileRequest {
        status: "Senior Developer".into(),
        skills: "rust".into(),
        ..Default::default()
    }).await.unwrap();

    assert_eq!(store.profile_count(), 1);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status, "Senior Developer");
    assert_eq!(updated.skills, vec!["rust"]);
    assert_eq!(updated.company.as_deref(), Some("Acme"));
}

#[actix_rt::test]
async fn skills_are_split_and_trimmed() {
    let (state, _store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;

    let profile = state.profile_handler
        .upsert_profile(&user.id, developer_request())
        .await
        .unwrap();

    assert_eq!(profile.skills, vec!["js", "css"]);
}

#[actix_rt::test]
async fn missing_status_is_rejected_without_a_write() {
    let (state, store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;

    let err = state.profile_handler
        .upsert_profile(&user.id, ProfileRequest { skills: "js".into(), ..Default::default() })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationError(ref fields) if fields.iter().any(|f| f.field == "status")));
    assert_eq!(store.profile_count(), 0);
}

#[actix_rt::test]
async fn new_experience_goes_first() {
    let (state, _store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;
    let handler = &state.profile_handler;
    handler.upsert_profile(&user.id, developer_request()).await.unwrap();

    handler.add_experience(&user.id, experience("Junior")).await.unwrap();
    let profile = handler.add_experience(&user.id, experience("Senior")).await.unwrap();

    let titles: Vec<_> = profile.experience.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Senior", "Junior"]);
}

#[actix_rt::test]
async fn removing_unknown_experience_leaves_list_unchanged() {
    let (state, _store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;
    let handler = &state.profile_handler;
    handler.upsert_profile(&user.id, developer_request()).await.unwrap();
    let before = handler.add_experience(&user.id, experience("Junior")).await.unwrap();

    let err = handler
        .remove_experience(&user.id, &Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let after = handler.get_own_profile(&user.id).await.unwrap();
    assert_eq!(after.experience, before.experience);
}

#[actix_rt::test]
async fn experience_can_be_removed_by_id() {
    let (state, _store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;
    let handler = &state.profile_handler;
    handler.upsert_profile(&user.id, developer_request()).await.unwrap();
    let profile = handler.add_experience(&user.id, experience("Junior")).await.unwrap();

    let exp_id = profile.experience[0].id.to_string();
    let profile = handler.remove_experience(&user.id, &exp_id).await.unwrap();

    assert!(profile.experience.is_empty());
}

#[actix_rt::test]
async fn experience_without_profile_is_not_found() {
    let (state, _store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;

    let err = state.profile_handler
        .add_experience(&user.id, experience("Junior"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn education_requires_field_of_study() {
    let (state, _store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;
    state.profile_handler.upsert_profile(&user.id, developer_request()).await.unwrap();

    let err = state.profile_handler
        .add_education(&user.id, NewEducation {
            school: "MIT".into(),
            degree: "BSc".into(),
            major: " ".into(),
            from: NaiveDate::from_ymd_opt(2014, 9, 1),
            to: None,
            current: false,
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationError(ref fields) if fields[0].field == "major"));
}

#[actix_rt::test]
async fn deleting_account_removes_profile_and_user() {
    let (state, store) = test_state();
    let user = create_user(&state, "Ada", "ada@example.com").await;
    let handler = &state.profile_handler;
    handler.upsert_profile(&user.id, developer_request()).await.unwrap();

    handler.delete_own_account(&user.id).await.unwrap();

    assert_eq!(store.profile_count(), 0);
    assert_eq!(store.user_count(), 0);
    assert!(matches!(handler.get_own_profile(&user.id).await, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn listed_profiles_carry_owner_in_insertion_order() {
    let (state, _store) = test_state();
    let ada = create_user(&state, "Ada", "ada@example.com").await;
    let alan = create_user(&state, "Alan", "alan@example.com").await;
    let handler = &state.profile_handler;

    handler.upsert_profile(&ada.id, developer_request()).await.unwrap();
    handler.upsert_profile(&alan.id, developer_request()).await.unwrap();

    let profiles = handler.list_profiles().await.unwrap();
    let owners: Vec<_> = profiles.iter().map(|p| p.user.name.as_str()).collect();
    assert_eq!(owners, vec!["Ada", "Alan"]);
    assert_eq!(profiles[0].user.avatar, ada.avatar);
}

#[actix_rt::test]
async fn malformed_user_id_reads_as_missing_profile() {
    let (state, _store) = test_state();

    let err = state.profile_handler.get_profile_by_user_id("not-an-id").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg == "Profile not found"));
}
