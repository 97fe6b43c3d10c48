//! Integration tests for the account service against an in-memory
//! store.

use carevault_auth::config::AuthConfig;
use carevault_auth::service::{AccountService, SignInInput, SignUpInput};
use carevault_auth::{password, token};
use carevault_core::error::VaultError;
use carevault_core::repository::AccountRepository;
use carevault_db::SurrealAccountRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret-not-for-production".into(),
        jwt_issuer: "carevault-test".into(),
        ..AuthConfig::default()
    }
}

/// Spin up an in-memory DB, run migrations, build the service.
async fn setup() -> (
    AccountService<SurrealAccountRepository<Db>>,
    SurrealAccountRepository<Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    carevault_db::run_migrations(&db).await.unwrap();

    let repo = SurrealAccountRepository::new(db.clone());
    (
        AccountService::new(SurrealAccountRepository::new(db), test_config()),
        repo,
    )
}

fn ada_signup() -> SignUpInput {
    SignUpInput {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    }
}

#[tokio::test]
async fn sign_up_happy_path() {
    let (svc, _repo) = setup().await;

    let out = svc.sign_up(ada_signup()).await.unwrap();

    assert_eq!(out.account.email, "ada@example.com");
    assert_eq!(out.account.first_name, "Ada");

    // Token decodes and carries the account identity.
    let claims = token::decode_access_token(&out.token, svc.config()).unwrap();
    assert_eq!(claims.sub, out.account.id.to_string());
    assert_eq!(claims.email, "ada@example.com");

    // The serialized account exposes no digest.
    let body = serde_json::to_value(&out.account).unwrap();
    assert!(body.get("passwordDigest").is_none());
    assert!(body.get("password_digest").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn sign_up_missing_field_is_rejected() {
    let (svc, repo) = setup().await;

    let err = svc
        .sign_up(SignUpInput {
            first_name: "  ".into(),
            ..ada_signup()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Validation { .. }));
    assert!(matches!(
        repo.get_by_email("ada@example.com").await.unwrap_err(),
        VaultError::NotFound { .. }
    ));
}

#[tokio::test]
async fn sign_up_password_mismatch_persists_nothing() {
    let (svc, repo) = setup().await;

    let err = svc
        .sign_up(SignUpInput {
            confirm_password: "secret2".into(),
            ..ada_signup()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Validation { .. }));

    // No account was created.
    assert!(matches!(
        repo.get_by_email("ada@example.com").await.unwrap_err(),
        VaultError::NotFound { .. }
    ));
}

#[tokio::test]
async fn sign_up_short_password_is_rejected() {
    let (svc, _repo) = setup().await;

    let err = svc
        .sign_up(SignUpInput {
            password: "abc".into(),
            confirm_password: "abc".into(),
            ..ada_signup()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Validation { .. }));
}

#[tokio::test]
async fn duplicate_email_normalizes_before_comparison() {
    let (svc, repo) = setup().await;

    svc.sign_up(SignUpInput {
        email: "A@x.com".into(),
        ..ada_signup()
    })
    .await
    .unwrap();

    let err = svc
        .sign_up(SignUpInput {
            email: "a@x.com ".into(),
            ..ada_signup()
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, VaultError::AlreadyExists { .. }),
        "expected AlreadyExists, got: {err:?}"
    );

    // Exactly one account exists, under the normalized email.
    assert!(repo.get_by_email("a@x.com").await.is_ok());
}

#[tokio::test]
async fn sign_in_happy_path_issues_a_fresh_token() {
    let (svc, _repo) = setup().await;

    let signup = svc.sign_up(ada_signup()).await.unwrap();
    let signin = svc
        .sign_in(SignInInput {
            email: "ada@example.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    assert_eq!(signin.account.id, signup.account.id);
    assert_ne!(signin.token, signup.token);
}

#[tokio::test]
async fn sign_in_normalizes_email() {
    let (svc, _repo) = setup().await;
    svc.sign_up(ada_signup()).await.unwrap();

    let result = svc
        .sign_in(SignInInput {
            email: "  ADA@Example.com ".into(),
            password: "secret1".into(),
        })
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_identically() {
    let (svc, _repo) = setup().await;
    svc.sign_up(ada_signup()).await.unwrap();

    let wrong_password = svc
        .sign_in(SignInInput {
            email: "ada@example.com".into(),
            password: "not-the-password".into(),
        })
        .await
        .unwrap_err();

    let unknown_email = svc
        .sign_in(SignInInput {
            email: "nobody@example.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap_err();

    // Same variant, same message — nothing distinguishes the two.
    match (&wrong_password, &unknown_email) {
        (
            VaultError::AuthenticationFailed { reason: a },
            VaultError::AuthenticationFailed { reason: b },
        ) => assert_eq!(a, b),
        other => panic!("expected two AuthenticationFailed errors, got {other:?}"),
    }
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn update_profile_ignores_credential_keys() {
    let (svc, repo) = setup().await;
    let signup = svc.sign_up(ada_signup()).await.unwrap();

    let updated = svc
        .update_profile(
            signup.account.id,
            serde_json::json!({
                "password": "new-password",
                "email": "stolen@example.com",
                "firstName": "Jo"
            }),
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Jo");
    assert_eq!(updated.email, "ada@example.com");

    // The stored digest still verifies against the original password.
    let stored = repo.get_by_email("ada@example.com").await.unwrap();
    assert!(password::verify_password("secret1", &stored.password_digest, None));
    assert!(!password::verify_password("new-password", &stored.password_digest, None));
}

#[tokio::test]
async fn update_profile_merges_opaque_substructures() {
    let (svc, _repo) = setup().await;
    let signup = svc.sign_up(ada_signup()).await.unwrap();

    svc.update_profile(
        signup.account.id,
        serde_json::json!({
            "address": { "city": "London" },
            "medical": { "bloodType": "O-" }
        }),
    )
    .await
    .unwrap();

    // A later patch of one key leaves the other untouched.
    let updated = svc
        .update_profile(
            signup.account.id,
            serde_json::json!({ "address": { "city": "Paris" } }),
        )
        .await
        .unwrap();

    assert_eq!(updated.profile["address"]["city"], "Paris");
    assert_eq!(updated.profile["medical"]["bloodType"], "O-");
}

#[tokio::test]
async fn update_profile_rejects_non_object_patch() {
    let (svc, _repo) = setup().await;
    let signup = svc.sign_up(ada_signup()).await.unwrap();

    let err = svc
        .update_profile(signup.account.id, serde_json::json!(["not", "an", "object"]))
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Validation { .. }));
}

#[tokio::test]
async fn get_account_for_missing_id_is_not_found() {
    let (svc, _repo) = setup().await;

    let err = svc.get_account(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, VaultError::NotFound { .. }));
}
