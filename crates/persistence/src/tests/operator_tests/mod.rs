// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for operator and session persistence.

use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_create_operator_normalizes_email() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let operator_id = persistence
        .create_operator("  Ops@SafeRay.test ", "password1")
        .unwrap();

    let operator = persistence
        .get_operator_by_email("OPS@saferay.TEST")
        .unwrap()
        .unwrap();
    assert_eq!(operator.operator_id, operator_id);
    assert_eq!(operator.email, "ops@saferay.test");
    assert_eq!(operator.theme, "light");
    assert!(operator.last_login_at.is_none());
}

#[test]
fn test_create_operator_rejects_duplicate_email() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();

    let result = persistence.create_operator("OPS@saferay.test", "password2");

    assert!(matches!(
        result,
        Err(PersistenceError::DuplicateOperator(email)) if email == "ops@saferay.test"
    ));
}

#[test]
fn test_password_is_stored_hashed() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();

    let operator = persistence
        .get_operator_by_id(operator_id)
        .unwrap()
        .unwrap();
    assert_ne!(operator.password_hash, "password1");
    assert!(
        persistence
            .verify_password("password1", &operator.password_hash)
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password("wrong", &operator.password_hash)
            .unwrap()
    );
}

#[test]
fn test_update_password_replaces_hash() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();

    persistence
        .update_password(operator_id, "new-password-2")
        .unwrap();

    let operator = persistence
        .get_operator_by_id(operator_id)
        .unwrap()
        .unwrap();
    assert!(
        persistence
            .verify_password("new-password-2", &operator.password_hash)
            .unwrap()
    );
}

#[test]
fn test_update_password_for_unknown_operator_fails() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.update_password(99, "whatever1");

    assert!(matches!(result, Err(PersistenceError::OperatorNotFound(_))));
}

#[test]
fn test_set_theme_persists_preference() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();

    persistence.set_theme(operator_id, "dark").unwrap();

    let operator = persistence
        .get_operator_by_id(operator_id)
        .unwrap()
        .unwrap();
    assert_eq!(operator.theme, "dark");
}

#[test]
fn test_set_theme_rejects_unknown_value() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();

    assert!(persistence.set_theme(operator_id, "sepia").is_err());
}

#[test]
fn test_update_last_login_sets_timestamp() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();

    persistence.update_last_login(operator_id).unwrap();

    let operator = persistence
        .get_operator_by_id(operator_id)
        .unwrap()
        .unwrap();
    let last_login = operator.last_login_at.unwrap();
    assert_eq!(last_login.len(), "2026-01-01T00:00:00".len());
    assert_eq!(&last_login[10..11], "T");
}

#[test]
fn test_session_round_trip_and_delete() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();

    let session_id = persistence
        .create_session("token-abc", operator_id, "2999-01-01T00:00:00")
        .unwrap();

    let session = persistence
        .get_session_by_token("token-abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.operator_id, operator_id);
    assert_eq!(session.expires_at, "2999-01-01T00:00:00");

    persistence.update_session_activity(session_id).unwrap();
    persistence.delete_session("token-abc").unwrap();

    assert!(
        persistence
            .get_session_by_token("token-abc")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_expired_sessions_keeps_live_ones() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();

    persistence
        .create_session("expired", operator_id, "2000-01-01T00:00:00")
        .unwrap();
    persistence
        .create_session("live", operator_id, "2999-01-01T00:00:00")
        .unwrap();

    let removed = persistence.delete_expired_sessions().unwrap();

    assert_eq!(removed, 1);
    assert!(persistence.get_session_by_token("expired").unwrap().is_none());
    assert!(persistence.get_session_by_token("live").unwrap().is_some());
}

#[test]
fn test_delete_sessions_for_operator() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let operator_id = persistence
        .create_operator("ops@saferay.test", "password1")
        .unwrap();
    persistence
        .create_session("one", operator_id, "2999-01-01T00:00:00")
        .unwrap();
    persistence
        .create_session("two", operator_id, "2999-01-01T00:00:00")
        .unwrap();

    assert_eq!(persistence.delete_sessions_for_operator(operator_id).unwrap(), 2);
    assert!(persistence.get_session_by_token("one").unwrap().is_none());
}
