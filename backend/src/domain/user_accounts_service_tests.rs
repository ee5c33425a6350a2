//! Tests for the user accounts service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    AccessToken, MockAccessTokenIssuer, MockPasswordHasher, MockUserRepository,
};
use crate::domain::{EmailAddress, ErrorCode, Password, PasswordHash, Username};

type Service = UserAccountsService<MockUserRepository, MockPasswordHasher, MockAccessTokenIssuer>;

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockAccessTokenIssuer,
) -> Service {
    UserAccountsService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
}

fn account(username: &str, email: &str) -> UserAccount {
    UserAccount {
        user: User::new(
            UserId::random(),
            Username::new(username).expect("username"),
            EmailAddress::new(email).expect("email"),
            Utc::now(),
        ),
        password_hash: PasswordHash::new("hash:secret"),
    }
}

fn hasher_accepting(password: &'static str) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .returning(move |candidate: &Password, _| Ok(candidate.expose() == password));
    hasher
        .expect_hash()
        .returning(|password: &Password| Ok(PasswordHash::new(format!("hash:{}", password.expose()))));
    hasher
}

fn registration() -> Registration {
    Registration::try_from_parts("ada", "ada@example.com", "secret").expect("registration")
}

#[rstest]
#[tokio::test]
async fn register_stores_hashed_account() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().return_once(|_| Ok(None));
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|account: &UserAccount| account.password_hash.as_str() == "hash:secret")
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(users, hasher_accepting("secret"), MockAccessTokenIssuer::new());
    let user = service.register(&registration()).await.expect("registered");

    assert_eq!(user.username().as_ref(), "ada");
    assert_eq!(user.email().as_ref(), "ada@example.com");
}

#[rstest]
#[case(true, false)]
#[case(false, true)]
#[tokio::test]
async fn register_rejects_taken_username_or_email(
    #[case] username_taken: bool,
    #[case] email_taken: bool,
) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().return_once(move |_| {
        Ok(username_taken.then(|| account("ada", "other@example.com")))
    });
    users.expect_find_by_email().returning(move |_| {
        Ok(email_taken.then(|| account("other", "ada@example.com")))
    });
    users.expect_insert().never();

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenIssuer::new());
    let err = service.register(&registration()).await.expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "Username or email already exists");
}

#[rstest]
#[tokio::test]
async fn register_maps_insert_race_to_conflict() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().return_once(|_| Ok(None));
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate("email")));

    let service = make_service(users, hasher_accepting("secret"), MockAccessTokenIssuer::new());
    let err = service.register(&registration()).await.expect_err("conflict");

    assert_eq!(err.message(), "Username or email already exists");
}

#[rstest]
#[tokio::test]
async fn authenticate_returns_user_and_token() {
    let stored = account("ada", "ada@example.com");
    let expected_id = stored.user.id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(stored)));
    let mut tokens = MockAccessTokenIssuer::new();
    tokens
        .expect_issue()
        .with(eq(expected_id.clone()))
        .return_once(|_| {
            Ok(AccessToken {
                token: "signed".to_owned(),
                expires_at: Utc::now() + Duration::minutes(30),
            })
        });

    let service = make_service(users, hasher_accepting("secret"), tokens);
    let creds = LoginCredentials::try_from_parts("ada@example.com", "secret").expect("creds");
    let outcome = service.authenticate(&creds).await.expect("logged in");

    assert_eq!(outcome.user.id(), &expected_id);
    assert_eq!(outcome.access_token.token, "signed");
}

#[rstest]
#[case(true, "wrong")]
#[case(false, "secret")]
#[tokio::test]
async fn authenticate_rejects_unknown_email_and_bad_password(
    #[case] exists: bool,
    #[case] password: &str,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(exists.then(|| account("ada", "ada@example.com"))));
    let mut tokens = MockAccessTokenIssuer::new();
    tokens.expect_issue().never();

    let service = make_service(users, hasher_accepting("secret"), tokens);
    let creds = LoginCredentials::try_from_parts("ada@example.com", password).expect("creds");
    let err = service.authenticate(&creds).await.expect_err("rejected");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Invalid email or password.");
}

#[rstest]
#[tokio::test]
async fn fetch_user_reports_missing_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenIssuer::new());
    let err = service
        .fetch_user(&UserId::random())
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

#[rstest]
#[case(
    UserPersistenceError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_error_codes(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(move |_| Err(failure));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenIssuer::new());
    let err = service
        .fetch_user(&UserId::random())
        .await
        .expect_err("failure");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn update_profile_rejects_username_held_by_another_user() {
    let current = account("ada", "ada@example.com");
    let current_id = current.user.id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(current)));
    users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(account("grace", "grace@example.com"))));
    users.expect_update_profile().never();

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenIssuer::new());
    let update = ProfileUpdate::try_from_parts(Some("grace"), None).expect("update");
    let err = service
        .update_profile(&current_id, &update)
        .await
        .expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "Username already taken");
}

#[rstest]
#[tokio::test]
async fn update_profile_skips_uniqueness_for_unchanged_fields() {
    let current = account("ada", "ada@example.com");
    let current_id = current.user.id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(current)));
    users.expect_find_by_username().never();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(None));
    users.expect_update_profile().return_once(|_| Ok(true));

    let service = make_service(users, MockPasswordHasher::new(), MockAccessTokenIssuer::new());
    let update =
        ProfileUpdate::try_from_parts(Some("ada"), Some("new@example.com")).expect("update");
    let user = service
        .update_profile(&current_id, &update)
        .await
        .expect("updated");

    assert_eq!(user.username().as_ref(), "ada");
    assert_eq!(user.email().as_ref(), "new@example.com");
}

#[rstest]
#[tokio::test]
async fn change_password_rejects_wrong_old_password() {
    let current = account("ada", "ada@example.com");
    let current_id = current.user.id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(current)));
    users.expect_update_password_hash().never();

    let service = make_service(users, hasher_accepting("secret"), MockAccessTokenIssuer::new());
    let change = PasswordChange::try_from_parts("guess", "newsecret").expect("change");
    let err = service
        .change_password(&current_id, &change)
        .await
        .expect_err("mismatch");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Old password is incorrect");
}

#[rstest]
#[tokio::test]
async fn change_password_stores_new_hash() {
    let current = account("ada", "ada@example.com");
    let current_id = current.user.id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(current)));
    users
        .expect_update_password_hash()
        .withf(|_, hash: &PasswordHash| hash.as_str() == "hash:newsecret")
        .times(1)
        .return_once(|_, _| Ok(true));

    let service = make_service(users, hasher_accepting("secret"), MockAccessTokenIssuer::new());
    let change = PasswordChange::try_from_parts("secret", "newsecret").expect("change");
    service
        .change_password(&current_id, &change)
        .await
        .expect("password changed");
}
