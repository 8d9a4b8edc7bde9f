//! The session cookie.

use axum_extra::extract::CookieJar;

use shophub_core::config::AuthConfig;

/// Builds and reads the HTTP-only session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    max_age_seconds: u64,
    secure: bool,
}

impl SessionCookie {
    /// Cookie settings from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            max_age_seconds: config.session_ttl_days * 24 * 60 * 60,
            secure: config.cookie_secure,
        }
    }

    /// `Set-Cookie` value carrying `token`.
    pub fn set(&self, token: &str) -> String {
        self.render(token, self.max_age_seconds)
    }

    /// `Set-Cookie` value that removes the cookie.
    pub fn clear(&self) -> String {
        self.render("", 0)
    }

    /// The session token sent by the client, if any.
    pub fn read(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name).map(|c| c.value().to_string())
    }

    fn render(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}
