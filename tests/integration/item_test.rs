//! Integration tests for item listing and item mutations.

mod helpers;

use serde_json::json;

use shophub_entity::user::Permission;

const DELETE_ITEM: &str = "mutation($id: ID!) { deleteItem(id: $id) { id title } }";

#[tokio::test]
async fn test_anonymous_create_item_is_auth_error() {
    let app = helpers::TestApp::new();

    let res = app
        .graphql(
            "mutation { createItem(title: \"Hat\", description: \"Warm\", price: 1000) { id } }",
            json!({}),
            None,
        )
        .await;

    assert_eq!(res.error_code(), Some("AUTH_ERROR"));
    assert_eq!(
        res.error_message(),
        Some("You must be logged in to do that!")
    );
    assert_eq!(app.store.item_count(), 0);
}

#[tokio::test]
async fn test_created_item_is_listed_with_owner() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;
    let id = app.create_item(&cookie, "Hat", 1000).await;

    let res = app
        .graphql(
            "mutation($id: ID!) { updateItem(id: $id, price: 1200) { id } }",
            json!({ "id": id }),
            Some(&cookie),
        )
        .await;
    assert!(res.is_ok(), "{}", res.body);

    let res = app
        .graphql(
            "query($id: ID!) { item(where: { id: $id }) { title description price user { name email } } }",
            json!({ "id": id }),
            Some(&cookie),
        )
        .await;

    assert!(res.is_ok(), "{}", res.body);
    let item = &res.data()["item"];
    assert_eq!(item["title"], "Hat");
    assert_eq!(item["description"], "A fine thing");
    assert_eq!(item["price"], 1200);
    assert_eq!(item["user"]["name"], "Wes");
    assert_eq!(item["user"]["email"], "wes@example.com");
}

const OWNER_DETAILS: &str = "{ items { title user { name email permissions cart { quantity } } } }";

#[tokio::test]
async fn test_owner_private_fields_hidden_from_other_callers() {
    let app = helpers::TestApp::new();
    let wes = app.signup("wes@example.com", "dogs", "Wes").await;
    let kait = app.signup("kait@example.com", "cats", "Kait").await;
    let item = app.create_item(&wes, "Hat", 1000).await;
    app.graphql(
        "mutation($id: ID!) { addToCart(id: $id) { id } }",
        json!({ "id": item }),
        Some(&wes),
    )
    .await;

    let public = app
        .graphql("{ items { title user { id name } } }", json!({}), None)
        .await;
    assert!(public.is_ok(), "{}", public.body);
    assert_eq!(public.data()["items"][0]["user"]["name"], "Wes");

    let anonymous = app.graphql(OWNER_DETAILS, json!({}), None).await;
    assert_eq!(anonymous.error_code(), Some("AUTH_ERROR"));
    assert_eq!(anonymous.data()["items"][0]["title"], "Hat");
    assert!(anonymous.data()["items"][0]["user"].is_null());
    assert!(!anonymous.body.to_string().contains("wes@example.com"));

    let stranger = app.graphql(OWNER_DETAILS, json!({}), Some(&kait)).await;
    assert_eq!(stranger.error_code(), Some("PERMISSION_ERROR"));
    assert!(stranger.data()["items"][0]["user"].is_null());
    assert!(!stranger.body.to_string().contains("wes@example.com"));

    let owner = app.graphql(OWNER_DETAILS, json!({}), Some(&wes)).await;
    assert!(owner.is_ok(), "{}", owner.body);
    let user = &owner.data()["items"][0]["user"];
    assert_eq!(user["email"], "wes@example.com");
    assert_eq!(user["permissions"], json!(["USER"]));
    assert_eq!(user["cart"], json!([{ "quantity": 1 }]));
}

#[tokio::test]
async fn test_admin_sees_owner_private_fields() {
    let app = helpers::TestApp::new();
    let wes = app.signup("wes@example.com", "dogs", "Wes").await;
    let admin = app.signup("admin@example.com", "root", "Admin").await;
    app.grant("admin@example.com", &[Permission::Admin]).await;
    app.create_item(&wes, "Hat", 1000).await;

    let res = app.graphql(OWNER_DETAILS, json!({}), Some(&admin)).await;

    assert!(res.is_ok(), "{}", res.body);
    assert_eq!(res.data()["items"][0]["user"]["email"], "wes@example.com");
    assert_eq!(res.data()["items"][0]["user"]["cart"], json!([]));
}

#[tokio::test]
async fn test_unknown_item_is_null() {
    let app = helpers::TestApp::new();

    let res = app
        .graphql(
            "query($id: ID!) { item(where: { id: $id }) { id } }",
            json!({ "id": uuid::Uuid::new_v4().to_string() }),
            None,
        )
        .await;

    assert!(res.is_ok(), "{}", res.body);
    assert!(res.data()["item"].is_null());
}

#[tokio::test]
async fn test_filter_order_and_window() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;
    app.create_item(&cookie, "Red Hat", 1500).await;
    app.create_item(&cookie, "Blue hat", 900).await;
    app.create_item(&cookie, "Shoes", 5000).await;

    let res = app
        .graphql(
            "{ items(where: { titleContains: \"HAT\" }, orderBy: price_DESC) { title }
               itemsConnection(where: { titleContains: \"hat\" }) { aggregate { count } } }",
            json!({}),
            None,
        )
        .await;
    assert!(res.is_ok(), "{}", res.body);
    assert_eq!(
        res.data()["items"],
        json!([{ "title": "Red Hat" }, { "title": "Blue hat" }])
    );
    assert_eq!(res.data()["itemsConnection"]["aggregate"]["count"], 2);

    let res = app
        .graphql(
            "{ items(orderBy: price_ASC, skip: 1, first: 1) { title } }",
            json!({}),
            None,
        )
        .await;
    assert_eq!(res.data()["items"], json!([{ "title": "Red Hat" }]));
}

#[tokio::test]
async fn test_update_item_requires_ownership_or_permission() {
    let app = helpers::TestApp::new();
    let owner = app.signup("wes@example.com", "dogs", "Wes").await;
    let other = app.signup("kait@example.com", "cats", "Kait").await;
    let id = app.create_item(&owner, "Hat", 1000).await;

    let update = "mutation($id: ID!, $title: String) { updateItem(id: $id, title: $title) { title price } }";

    let res = app
        .graphql(update, json!({ "id": id, "title": "Stolen" }), Some(&other))
        .await;
    assert_eq!(res.error_code(), Some("PERMISSION_ERROR"));

    app.grant("kait@example.com", &[Permission::User, Permission::ItemUpdate])
        .await;
    let res = app
        .graphql(update, json!({ "id": id, "title": "Fedora" }), Some(&other))
        .await;
    assert!(res.is_ok(), "{}", res.body);
    assert_eq!(res.data()["updateItem"]["title"], "Fedora");
    assert_eq!(res.data()["updateItem"]["price"], 1000);
}

#[tokio::test]
async fn test_non_owner_delete_is_permission_error() {
    let app = helpers::TestApp::new();
    let owner = app.signup("wes@example.com", "dogs", "Wes").await;
    let other = app.signup("kait@example.com", "cats", "Kait").await;
    let id = app.create_item(&owner, "Hat", 1000).await;

    let res = app
        .graphql(DELETE_ITEM, json!({ "id": id }), Some(&other))
        .await;

    assert_eq!(res.error_code(), Some("PERMISSION_ERROR"));
    assert!(
        res.error_message()
            .is_some_and(|m| m.starts_with("You do not have permission to do that"))
    );
    assert_eq!(app.store.item_count(), 1);
}

#[tokio::test]
async fn test_owner_deletes_without_special_permissions() {
    let app = helpers::TestApp::new();
    let owner = app.signup("wes@example.com", "dogs", "Wes").await;
    let id = app.create_item(&owner, "Hat", 1000).await;

    let res = app
        .graphql(DELETE_ITEM, json!({ "id": id }), Some(&owner))
        .await;

    assert!(res.is_ok(), "{}", res.body);
    assert_eq!(res.data()["deleteItem"]["title"], "Hat");
    assert_eq!(app.store.item_count(), 0);
}

#[tokio::test]
async fn test_item_delete_permission_allows_any_item() {
    let app = helpers::TestApp::new();
    let owner = app.signup("wes@example.com", "dogs", "Wes").await;
    let moderator = app.signup("mod@example.com", "keys", "Mod").await;
    app.grant("mod@example.com", &[Permission::User, Permission::ItemDelete])
        .await;
    let id = app.create_item(&owner, "Hat", 1000).await;

    let res = app
        .graphql(DELETE_ITEM, json!({ "id": id }), Some(&moderator))
        .await;

    assert!(res.is_ok(), "{}", res.body);
}

#[tokio::test]
async fn test_delete_missing_item_is_not_found() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;

    let res = app
        .graphql(
            DELETE_ITEM,
            json!({ "id": uuid::Uuid::new_v4().to_string() }),
            Some(&cookie),
        )
        .await;

    assert_eq!(res.error_code(), Some("NOT_FOUND"));
}
