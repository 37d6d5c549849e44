use super::*;
use shared::error::ErrorCode;

fn setup() -> ApiContext {
    ApiContext::with_users(demo_users())
}

#[tokio::test]
async fn created_users_get_next_id_and_are_appended() {
    let ctx = setup();
    let user = create_user(&ctx, UserPayload::new("Dana", "dana@x.com"))
        .await
        .expect("create");
    assert_eq!(user, User::new(UserId(6), "Dana", "dana@x.com"));

    let users = list_users(&ctx).await;
    assert_eq!(users.len(), 6);
    assert_eq!(users.last(), Some(&user));
}

#[tokio::test]
async fn ids_are_not_reused_after_deleting_a_middle_record() {
    let ctx = setup();
    delete_user(&ctx, UserId(3)).await.expect("delete");
    let user = create_user(&ctx, UserPayload::new("Eve", "eve@x.com"))
        .await
        .expect("create");
    assert_eq!(user.id, UserId(6));
}

#[tokio::test]
async fn first_user_in_empty_directory_gets_id_one() {
    let ctx = ApiContext::new();
    let user = create_user(&ctx, UserPayload::new("A", "a@x.com"))
        .await
        .expect("create");
    assert_eq!(user.id, UserId(1));
}

#[tokio::test]
async fn update_replaces_fields_in_place() {
    let ctx = setup();
    let updated = update_user(&ctx, UserId(2), UserPayload::new("Ervin", "e@x.com"))
        .await
        .expect("update");
    assert_eq!(updated, User::new(UserId(2), "Ervin", "e@x.com"));

    let ids: Vec<i64> = list_users(&ctx).await.iter().map(|u| u.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(get_user(&ctx, UserId(2)).await.expect("get"), updated);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let ctx = setup();
    let err = update_user(&ctx, UserId(99), UserPayload::new("X", "x@x.com"))
        .await
        .expect_err("should fail");
    assert!(matches!(err.code, ErrorCode::NotFound));

    let err = delete_user(&ctx, UserId(99)).await.expect_err("should fail");
    assert!(matches!(err.code, ErrorCode::NotFound));

    let err = get_user(&ctx, UserId(99)).await.expect_err("should fail");
    assert_eq!(err.message, "user 99 not found");
}

#[tokio::test]
async fn blank_name_or_malformed_email_is_rejected() {
    let ctx = setup();
    let err = create_user(&ctx, UserPayload::new("  ", "a@x.com"))
        .await
        .expect_err("blank name");
    assert_eq!(err.code, ErrorCode::Validation);

    let err = update_user(&ctx, UserId(1), UserPayload::new("A", "not-an-email"))
        .await
        .expect_err("bad email");
    assert_eq!(err.code, ErrorCode::Validation);

    assert_eq!(list_users(&ctx).await, demo_users());
}
