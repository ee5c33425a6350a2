//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{
    MockCalculationsCommand, MockCalculationsQuery, MockLoginService, MockReportsQuery,
    MockUserAccountsCommand, MockUserProfileQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked driving ports; set expectations, then convert into [`HttpState`].
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub profile: MockUserProfileQuery,
    pub accounts: MockUserAccountsCommand,
    pub calculations: MockCalculationsCommand,
    pub calculations_query: MockCalculationsQuery,
    pub reports: MockReportsQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            profile: Arc::new(self.profile),
            accounts: Arc::new(self.accounts),
            calculations: Arc::new(self.calculations),
            calculations_query: Arc::new(self.calculations_query),
            reports: Arc::new(self.reports),
        })
    }
}
