//! Builders wiring repositories and security adapters into HTTP state.

use std::sync::Arc;

use crate::domain::ports::{CalculationRepository, UserRepository};
use crate::domain::{CalculationsService, UserAccountsService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryCalculationRepository, InMemoryUserRepository};
use crate::outbound::persistence::{DbPool, DieselCalculationRepository, DieselUserRepository};
use crate::outbound::security::{Argon2PasswordHasher, JwtAccessTokenIssuer};

/// Assemble HTTP state from a user and a calculation repository.
///
/// One accounts service backs the login, profile and account ports; one
/// calculations service backs the calculation and report ports.
pub fn build_state_with<U, C>(
    users: Arc<U>,
    calculations: Arc<C>,
    token_issuer: JwtAccessTokenIssuer,
) -> HttpState
where
    U: UserRepository + 'static,
    C: CalculationRepository + 'static,
{
    let accounts = Arc::new(UserAccountsService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(token_issuer),
    ));
    let calculations = Arc::new(CalculationsService::new(calculations));

    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        profile: accounts.clone(),
        accounts,
        calculations: calculations.clone(),
        calculations_query: calculations.clone(),
        reports: calculations,
    })
}

/// Build HTTP state from the configured pool, or in-memory storage when
/// no pool is available.
pub fn build_http_state(db_pool: Option<&DbPool>, token_issuer: JwtAccessTokenIssuer) -> HttpState {
    match db_pool {
        Some(pool) => build_state_with(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselCalculationRepository::new(pool.clone())),
            token_issuer,
        ),
        None => build_state_with(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryCalculationRepository::new()),
            token_issuer,
        ),
    }
}
