//! Integration tests for permission management.

mod helpers;

use serde_json::json;

use shophub_entity::user::Permission;

const UPDATE_PERMISSIONS: &str = "mutation($userId: ID!, $permissions: [Permission!]!) {
    updatePermissions(userId: $userId, permissions: $permissions) { id email permissions }
}";

const USERS: &str = "{ users { email permissions } }";

#[tokio::test]
async fn test_anonymous_users_and_update_are_auth_errors() {
    let app = helpers::TestApp::new();
    let res = app.graphql(USERS, json!({}), None).await;
    assert_eq!(res.error_code(), Some("AUTH_ERROR"));

    let res = app
        .graphql(
            UPDATE_PERMISSIONS,
            json!({ "userId": uuid::Uuid::new_v4().to_string(), "permissions": ["ADMIN"] }),
            None,
        )
        .await;
    assert_eq!(res.error_code(), Some("AUTH_ERROR"));
}

#[tokio::test]
async fn test_plain_user_cannot_list_users() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;

    let res = app.graphql(USERS, json!({}), Some(&cookie)).await;

    assert_eq!(res.error_code(), Some("PERMISSION_ERROR"));
    let message = res.error_message().expect("message");
    assert!(message.starts_with("You do not have permission to do that"));
    assert!(message.contains("ADMIN"));
    assert!(message.contains("PERMISSIONUPDATE"));
}

#[tokio::test]
async fn test_admin_lists_users() {
    let app = helpers::TestApp::new();
    let admin = app.signup("admin@example.com", "root", "Admin").await;
    app.signup("wes@example.com", "dogs", "Wes").await;
    app.grant("admin@example.com", &[Permission::Admin, Permission::User])
        .await;

    let res = app.graphql(USERS, json!({}), Some(&admin)).await;

    assert!(res.is_ok(), "{}", res.body);
    assert_eq!(
        res.data()["users"],
        json!([
            { "email": "admin@example.com", "permissions": ["ADMIN", "USER"] },
            { "email": "wes@example.com", "permissions": ["USER"] },
        ])
    );
}

#[tokio::test]
async fn test_update_permissions_overwrites_wholesale() {
    let app = helpers::TestApp::new();
    let manager = app.signup("boss@example.com", "root", "Boss").await;
    let wes = app.signup("wes@example.com", "dogs", "Wes").await;
    app.grant("boss@example.com", &[Permission::PermissionUpdate])
        .await;
    let wes_id = app.me(Some(&wes)).await["id"].clone();

    let res = app
        .graphql(
            UPDATE_PERMISSIONS,
            json!({ "userId": wes_id, "permissions": ["ITEMDELETE"] }),
            Some(&manager),
        )
        .await;

    assert!(res.is_ok(), "{}", res.body);
    assert_eq!(
        res.data()["updatePermissions"]["permissions"],
        json!(["ITEMDELETE"])
    );
    assert_eq!(app.me(Some(&wes)).await["permissions"], json!(["ITEMDELETE"]));
}

#[tokio::test]
async fn test_granted_permission_takes_effect_on_next_request() {
    let app = helpers::TestApp::new();
    let admin = app.signup("admin@example.com", "root", "Admin").await;
    let owner = app.signup("wes@example.com", "dogs", "Wes").await;
    let kait = app.signup("kait@example.com", "cats", "Kait").await;
    app.grant("admin@example.com", &[Permission::Admin]).await;
    let item = app.create_item(&owner, "Hat", 1000).await;
    let kait_id = app.me(Some(&kait)).await["id"].clone();

    let delete = "mutation($id: ID!) { deleteItem(id: $id) { id } }";
    let res = app
        .graphql(delete, json!({ "id": item }), Some(&kait))
        .await;
    assert_eq!(res.error_code(), Some("PERMISSION_ERROR"));

    app.graphql(
        UPDATE_PERMISSIONS,
        json!({ "userId": kait_id, "permissions": ["USER", "ITEMDELETE"] }),
        Some(&admin),
    )
    .await;

    let res = app
        .graphql(delete, json!({ "id": item }), Some(&kait))
        .await;
    assert!(res.is_ok(), "{}", res.body);
}

#[tokio::test]
async fn test_update_permissions_for_missing_user() {
    let app = helpers::TestApp::new();
    let admin = app.signup("admin@example.com", "root", "Admin").await;
    app.grant("admin@example.com", &[Permission::Admin]).await;

    let res = app
        .graphql(
            UPDATE_PERMISSIONS,
            json!({ "userId": uuid::Uuid::new_v4().to_string(), "permissions": ["USER"] }),
            Some(&admin),
        )
        .await;

    assert_eq!(res.error_code(), Some("NOT_FOUND"));
}
