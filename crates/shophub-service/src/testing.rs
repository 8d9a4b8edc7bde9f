//! Shared fixtures for service tests.

use std::sync::Arc;

use shophub_core::config::{AuthConfig, FrontendConfig};
use shophub_database::{MemoryStore, Repositories, UserRepository};
use shophub_entity::item::Item;
use shophub_entity::user::{Permission, PermissionSet};

use crate::auth::{AuthService, SignupRequest};
use crate::cart::CartService;
use crate::context::RequestContext;
use crate::item::{CreateItemRequest, ItemService};
use crate::mail::RecordingMailer;
use crate::user::UserService;

pub(crate) struct Harness {
    pub store: MemoryStore,
    pub mailer: RecordingMailer,
    pub auth: AuthService,
    pub items: ItemService,
    pub carts: CartService,
    pub users: UserService,
}

impl Harness {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let repos = Repositories::from_memory(store.clone());
        let mailer = RecordingMailer::new();
        let auth_config = AuthConfig {
            bcrypt_cost: 4,
            ..AuthConfig::default()
        };

        Self {
            auth: AuthService::new(
                Arc::clone(&repos.users),
                Arc::new(mailer.clone()),
                &auth_config,
                &FrontendConfig::default(),
            ),
            items: ItemService::new(Arc::clone(&repos.items), Arc::clone(&repos.users)),
            carts: CartService::new(Arc::clone(&repos.cart_items), Arc::clone(&repos.items)),
            users: UserService::new(Arc::clone(&repos.users)),
            store,
            mailer,
        }
    }

    /// Sign up `email` and grant exactly `permissions` (plus USER).
    pub async fn user(&self, email: &str, permissions: &[Permission]) -> RequestContext {
        let session = self
            .auth
            .signup(SignupRequest {
                email: email.to_string(),
                name: email.split('@').next().unwrap_or("user").to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap();

        let mut set = PermissionSet::new_user();
        for p in permissions {
            set.insert(*p);
        }
        let user = self
            .store
            .update_permissions(session.user.id, set)
            .await
            .unwrap();
        RequestContext::authenticated(user)
    }

    pub async fn item(&self, owner: &RequestContext, title: &str, price: i32) -> Item {
        self.items
            .create_item(
                owner,
                CreateItemRequest {
                    title: title.to_string(),
                    description: format!("A lovely {title}"),
                    image: None,
                    large_image: None,
                    price,
                },
            )
            .await
            .unwrap()
    }

    pub async fn reset_token_for(&self, email: &str) -> String {
        self.store
            .find_by_email(email)
            .await
            .unwrap()
            .and_then(|u| u.reset_token)
            .expect("reset token stored")
    }
}
