#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{ADA, GRACE, admin, article, authorable_as, principal, post, user};
use modkit_authorable::{AuthorableConfig, AuthorableError, Principal};

fn post_by(created_by: Option<i64>) -> post::Model {
    post::Model {
        id: 1,
        title: "hello".to_owned(),
        created_by,
        updated_by: created_by,
    }
}

#[test]
fn owner_matches_created_by() {
    let authorable = authorable_as(None);
    let post = post_by(Some(ADA));

    assert!(authorable.is_owner(&post, &principal(ADA)).unwrap());
    assert!(!authorable.is_owner(&post, &principal(GRACE)).unwrap());
}

#[test]
fn owner_requires_configured_user_type() {
    let authorable = authorable_as(None);
    let post = post_by(Some(ADA));

    let admin = Principal::new("admins", "id", ADA);
    assert!(!authorable.is_owner(&post, &admin).unwrap());
}

#[test]
fn owner_from_loaded_models() {
    let authorable = authorable_as(None);
    let post = post_by(Some(ADA));

    let ada = user::Model {
        id: ADA,
        name: "ada".to_owned(),
        deleted_at: None,
    };
    let root = admin::Model {
        id: ADA,
        name: "root".to_owned(),
    };
    assert!(authorable.is_owner_model(&post, &ada).unwrap());
    assert!(!authorable.is_owner_model(&post, &root).unwrap());
}

#[test]
fn owner_compares_keys_across_integer_widths() {
    let authorable = authorable_as(None);
    let post = post_by(Some(ADA));

    let narrow = Principal::new("users", "id", 7_i32);
    assert!(authorable.is_owner(&post, &narrow).unwrap());

    let text = Principal::new("users", "id", "7");
    assert!(!authorable.is_owner(&post, &text).unwrap());
}

#[test]
fn record_without_author_has_no_owner() {
    let authorable = authorable_as(None);
    let post = post_by(None);

    assert!(!authorable.is_owner(&post, &principal(ADA)).unwrap());
}

#[test]
fn owner_uses_entity_created_by_column() {
    let authorable = authorable_as(None);
    let article = article::Model {
        id: 1,
        title: "news".to_owned(),
        author_id: Some(GRACE),
        editor_id: Some(ADA),
    };

    assert!(authorable.is_owner(&article, &principal(GRACE)).unwrap());
    assert!(!authorable.is_owner(&article, &principal(ADA)).unwrap());
}

#[test]
fn owner_with_unknown_column_is_an_error() {
    let config = AuthorableConfig {
        created_by_column_name: "creator".to_owned(),
        ..AuthorableConfig::default()
    };
    let authorable = common::authorable_with(config, None);

    let err = authorable
        .is_owner(&post_by(Some(ADA)), &principal(ADA))
        .unwrap_err();
    assert!(matches!(err, AuthorableError::UnknownColumn { .. }));
}
