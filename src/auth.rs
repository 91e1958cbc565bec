//! API token resolution.
//!
//! Token resolution prefers an explicit CLI value, then `BITQUERY_API_TOKEN`.
//! Empty values are ignored at every level, so a variable exported as an
//! empty string behaves exactly like an unset one.

use crate::environment;

/// Environment variable holding the Bitquery bearer token.
pub const TOKEN_ENV_VAR: &str = "BITQUERY_API_TOKEN";

/// Resolve the bearer token, or `None` when no usable value exists.
///
/// The lookup here is the only place the process environment is consulted
/// for the credential; everything downstream receives it as a parameter.
#[must_use]
pub fn resolve_api_token(cli: Option<&str>) -> Option<String> {
    cli.filter(|token| !token.is_empty())
        .map(str::to_owned)
        .or_else(|| {
            environment::var(TOKEN_ENV_VAR)
                .ok()
                .filter(|token| !token.is_empty())
        })
}
