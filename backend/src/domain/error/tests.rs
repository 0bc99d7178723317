//! Tests for the declarative error taxonomy.

use std::collections::HashSet;

use super::*;
use rstest::rstest;

#[rstest]
fn every_variant_declares_code_and_message() {
    for kind in ErrorKind::ALL {
        assert!(!kind.error_code().is_empty(), "{kind:?} has no error code");
        assert!(
            !kind.default_message().trim().is_empty(),
            "{kind:?} has no message"
        );
        assert!((400..600).contains(&kind.status_code()), "{kind:?} status");
    }
}

#[rstest]
fn status_and_code_pairs_are_unique() {
    let pairs: HashSet<_> = ErrorKind::ALL
        .iter()
        .map(|kind| (kind.status_code(), kind.error_code()))
        .collect();
    assert_eq!(pairs.len(), ErrorKind::ALL.len());
}

#[rstest]
#[case(ErrorKind::Unauthorized, 403, "UNAUTHORIZED")]
#[case(ErrorKind::InvalidCredentials, 401, "LOGIN_BAD_CREDENTIALS")]
#[case(ErrorKind::UserNotFound, 404, "USER_NOT_FOUND")]
#[case(ErrorKind::UserDisabled, 400, "USER_DISABLE")]
#[case(ErrorKind::UserInactive, 400, "USER_INACTIVE")]
fn variants_carry_fixed_status_and_code(
    #[case] kind: ErrorKind,
    #[case] status: u16,
    #[case] code: &str,
) {
    let err = DeclaredError::from(kind);
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
    assert_eq!(err.message(), kind.default_message());
    assert!(err.field().is_none());
}

#[rstest]
fn auth_group_contains_only_auth_variants() {
    let auth: Vec<_> = ErrorKind::ALL.into_iter().filter(|k| k.is_auth()).collect();
    assert_eq!(auth, ErrorKind::AUTH.to_vec());
}

#[rstest]
fn constructor_overrides_message_and_field() {
    let err = DeclaredError::new(ErrorKind::UserInactive, Some("X"), Some("Y"));
    assert_eq!(err.message(), "X");
    assert_eq!(err.field(), Some("Y"));
    assert_eq!(err.kind(), ErrorKind::UserInactive);
}

#[rstest]
fn constructor_falls_back_to_defaults() {
    let err = DeclaredError::new(ErrorKind::UserNotFound, None::<&str>, None::<&str>);
    assert_eq!(err, DeclaredError::from(ErrorKind::UserNotFound));
}

#[rstest]
fn empty_message_override_keeps_default() {
    let built = DeclaredError::from(ErrorKind::UserDisabled).with_message("");
    let raised = DeclaredError::new(ErrorKind::UserDisabled, Some(""), None::<&str>);
    assert_eq!(built.message(), "User have disabled status");
    assert_eq!(raised.message(), "User have disabled status");
}

#[rstest]
fn whitespace_message_override_is_kept_verbatim() {
    let built = DeclaredError::from(ErrorKind::UserDisabled).with_message("   ");
    let raised = DeclaredError::new(ErrorKind::UserDisabled, Some("   "), None::<&str>);
    assert_eq!(built.message(), "   ");
    assert_eq!(raised.message(), "   ");
}

#[rstest]
fn empty_field_is_treated_as_unset() {
    let err = DeclaredError::from(ErrorKind::UserDisabled).with_field("");
    assert!(err.field().is_none());
}

#[rstest]
fn display_includes_code_and_message() {
    let err = DeclaredError::from(ErrorKind::UserNotFound);
    assert_eq!(err.to_string(), "USER_NOT_FOUND: NOT FOUND");
}
