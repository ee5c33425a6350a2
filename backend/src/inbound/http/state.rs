//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CalculationsCommand, CalculationsQuery, LoginService, ReportsQuery, UserAccountsCommand,
    UserProfileQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub calculations: Arc<dyn CalculationsCommand>,
    pub calculations_query: Arc<dyn CalculationsQuery>,
    pub reports: Arc<dyn ReportsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub calculations: Arc<dyn CalculationsCommand>,
    pub calculations_query: Arc<dyn CalculationsQuery>,
    pub reports: Arc<dyn ReportsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use calculator_backend::domain::{CalculationsService, UserAccountsService};
    /// use calculator_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use calculator_backend::outbound::memory::{
    ///     InMemoryCalculationRepository, InMemoryUserRepository,
    /// };
    /// use calculator_backend::outbound::security::{Argon2PasswordHasher, JwtAccessTokenIssuer};
    ///
    /// let accounts = Arc::new(UserAccountsService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(Argon2PasswordHasher::new()),
    ///     Arc::new(JwtAccessTokenIssuer::new(b"secret", chrono::Duration::minutes(30))),
    /// ));
    /// let calculations = Arc::new(CalculationsService::new(Arc::new(
    ///     InMemoryCalculationRepository::default(),
    /// )));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     profile: accounts.clone(),
    ///     accounts,
    ///     calculations: calculations.clone(),
    ///     calculations_query: calculations.clone(),
    ///     reports: calculations,
    /// });
    /// let _reports = state.reports.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            profile,
            accounts,
            calculations,
            calculations_query,
            reports,
        } = ports;
        Self {
            login,
            profile,
            accounts,
            calculations,
            calculations_query,
            reports,
        }
    }
}
