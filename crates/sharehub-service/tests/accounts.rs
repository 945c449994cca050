//! Account registration, login, and password reset flow tests.

mod support;

use sharehub_core::error::ErrorKind;
use sharehub_service::user::RegisterRequest;

use support::{register, test_env};

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let env = test_env();
    let user = register(&env, "Alice", "alice@example.com").await;
    assert_eq!(user.email, "alice@example.com");
    assert!(!user.is_owner);

    let (logged_in, token, expires_at) = env
        .user_service
        .authenticate("alice@example.com", "correct-horse-7battery")
        .await
        .unwrap();
    assert_eq!(logged_in.id, user.id);
    assert!(!token.is_empty());
    assert!(expires_at > chrono::Utc::now());
    assert!(logged_in.last_login_at.is_some());

    let err = env
        .user_service
        .authenticate("alice@example.com", "wrong-password-1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_register_validates_email_and_password() {
    let env = test_env();

    let err = env
        .user_service
        .register(RegisterRequest {
            name: "Bob".to_string(),
            email: "not-an-email".to_string(),
            password: "correct-horse-7battery".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = env
        .user_service
        .register(RegisterRequest {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "short".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let env = test_env();
    register(&env, "Alice", "alice@example.com").await;

    let err = env
        .user_service
        .register(RegisterRequest {
            name: "Imposter".to_string(),
            email: "ALICE@example.com".to_string(),
            password: "correct-horse-7battery".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_password_reset_flow_consumes_token() {
    let env = test_env();
    let user = register(&env, "Alice", "alice@example.com").await;

    env.user_service
        .request_password_reset("alice@example.com")
        .await
        .unwrap();

    let stored = env.user_service.get(user.id).await.unwrap();
    let token = stored.reset_token.clone().expect("token should be set");
    assert!(stored.reset_token_valid());

    env.user_service.verify_reset_token(&token).await.unwrap();

    env.user_service
        .reset_password(&token, "brand-new-pass9word")
        .await
        .unwrap();

    // Old password no longer works, new one does.
    assert!(
        env.user_service
            .authenticate("alice@example.com", "correct-horse-7battery")
            .await
            .is_err()
    );
    env.user_service
        .authenticate("alice@example.com", "brand-new-pass9word")
        .await
        .unwrap();

    // The token is single-use.
    let err = env
        .user_service
        .reset_password(&token, "another-pass5word")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_reset_request_for_unknown_email_is_silent() {
    let env = test_env();
    env.user_service
        .request_password_reset("ghost@example.com")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unknown_reset_token_is_rejected() {
    let env = test_env();
    let err = env
        .user_service
        .verify_reset_token("deadbeefdeadbeefdeadbeefdeadbeef")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}
