//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by
//! inbound adapters. Driven ports ([`UserRepository`],
//! [`CalculationRepository`], [`PasswordHasher`], [`AccessTokenIssuer`]) are
//! implemented by outbound adapters and report strongly typed errors.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_issuer;
mod calculation_repository;
mod calculations_command;
mod calculations_query;
mod login_service;
mod password_hasher;
mod reports_query;
mod user_accounts_command;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use access_token_issuer::MockAccessTokenIssuer;
pub use access_token_issuer::{
    AccessToken, AccessTokenError, AccessTokenIssuer, BEARER_TOKEN_TYPE,
};
#[cfg(test)]
pub use calculation_repository::MockCalculationRepository;
pub use calculation_repository::{CalculationPersistenceError, CalculationRepository};
#[cfg(test)]
pub use calculations_command::MockCalculationsCommand;
pub use calculations_command::CalculationsCommand;
#[cfg(test)]
pub use calculations_query::MockCalculationsQuery;
pub use calculations_query::CalculationsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{AuthenticatedUser, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use reports_query::MockReportsQuery;
pub use reports_query::ReportsQuery;
#[cfg(test)]
pub use user_accounts_command::MockUserAccountsCommand;
pub use user_accounts_command::UserAccountsCommand;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
