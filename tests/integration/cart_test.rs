//! Integration tests for the shopping cart.

mod helpers;

use serde_json::json;
use tokio::task::JoinSet;

const ADD_TO_CART: &str = "mutation($id: ID!) { addToCart(id: $id) { id quantity item { id } } }";
const REMOVE_FROM_CART: &str = "mutation($id: ID!) { removeFromCart(id: $id) { id } }";

#[tokio::test]
async fn test_anonymous_add_to_cart_is_auth_error() {
    let app = helpers::TestApp::new();
    let owner = app.signup("wes@example.com", "dogs", "Wes").await;
    let item = app.create_item(&owner, "Hat", 1000).await;

    let res = app.graphql(ADD_TO_CART, json!({ "id": item }), None).await;

    assert_eq!(res.error_code(), Some("AUTH_ERROR"));
    assert_eq!(app.store.cart_item_count(), 0);
}

#[tokio::test]
async fn test_adding_twice_increments_one_row() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;
    let item = app.create_item(&cookie, "Hat", 1000).await;

    let first = app
        .graphql(ADD_TO_CART, json!({ "id": item }), Some(&cookie))
        .await;
    let second = app
        .graphql(ADD_TO_CART, json!({ "id": item }), Some(&cookie))
        .await;

    assert_eq!(first.data()["addToCart"]["quantity"], 1);
    assert_eq!(second.data()["addToCart"]["quantity"], 2);
    assert_eq!(
        first.data()["addToCart"]["id"],
        second.data()["addToCart"]["id"]
    );

    let me = app.me(Some(&cookie)).await;
    let cart = me["cart"].as_array().expect("cart list");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["quantity"], 2);
    assert_eq!(cart[0]["item"]["id"], json!(item));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_not_lost() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;
    let item = app.create_item(&cookie, "Hat", 1000).await;

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let app = app.clone();
        let cookie = cookie.clone();
        let item = item.clone();
        tasks.spawn(async move {
            app.graphql(ADD_TO_CART, json!({ "id": item }), Some(&cookie))
                .await
                .is_ok()
        });
    }
    while let Some(ok) = tasks.join_next().await {
        assert!(ok.expect("task panicked"));
    }

    let me = app.me(Some(&cookie)).await;
    assert_eq!(me["cart"][0]["quantity"], 8);
    assert_eq!(app.store.cart_item_count(), 1);
}

#[tokio::test]
async fn test_add_missing_item_is_not_found() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;

    let res = app
        .graphql(
            ADD_TO_CART,
            json!({ "id": uuid::Uuid::new_v4().to_string() }),
            Some(&cookie),
        )
        .await;

    assert_eq!(res.error_code(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_remove_from_cart_checks_owner() {
    let app = helpers::TestApp::new();
    let wes = app.signup("wes@example.com", "dogs", "Wes").await;
    let kait = app.signup("kait@example.com", "cats", "Kait").await;
    let item = app.create_item(&wes, "Hat", 1000).await;

    let added = app
        .graphql(ADD_TO_CART, json!({ "id": item }), Some(&wes))
        .await;
    let row = added.data()["addToCart"]["id"].clone();

    let res = app
        .graphql(REMOVE_FROM_CART, json!({ "id": row }), Some(&kait))
        .await;
    assert_eq!(res.error_code(), Some("PERMISSION_ERROR"));

    let res = app
        .graphql(REMOVE_FROM_CART, json!({ "id": row }), Some(&wes))
        .await;
    assert!(res.is_ok(), "{}", res.body);
    assert!(app.me(Some(&wes)).await["cart"]
        .as_array()
        .is_some_and(Vec::is_empty));

    let res = app
        .graphql(REMOVE_FROM_CART, json!({ "id": row }), Some(&wes))
        .await;
    assert_eq!(res.error_code(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_deleting_item_empties_carts() {
    let app = helpers::TestApp::new();
    let cookie = app.signup("wes@example.com", "dogs", "Wes").await;
    let item = app.create_item(&cookie, "Hat", 1000).await;
    app.graphql(ADD_TO_CART, json!({ "id": item }), Some(&cookie))
        .await;

    app.graphql(
        "mutation($id: ID!) { deleteItem(id: $id) { id } }",
        json!({ "id": item }),
        Some(&cookie),
    )
    .await;

    assert_eq!(app.store.cart_item_count(), 0);
}
