//! Gateway — the `user@host` identity used to reach the fleet.

use std::fmt;

/// Conventional account used when the caller supplies no identity.
pub const DEFAULT_GATEWAY_USER: &str = "vcap";

/// The `user@host` credential the tunnel connects through.
///
/// A caller-supplied identity is kept verbatim; the default is a pure
/// function of the director endpoint, not hidden state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayIdentity(String);

impl GatewayIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    /// `<user>@<director host>`, with any `:port` suffix stripped from
    /// the endpoint.
    pub fn for_user(user: &str, director_endpoint: &str) -> Self {
        Self(format!("{user}@{}", host_of(director_endpoint)))
    }

    /// `vcap@<director host>`.
    pub fn default_for(director_endpoint: &str) -> Self {
        Self::for_user(DEFAULT_GATEWAY_USER, director_endpoint)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GatewayIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host part of a `host[:port]` endpoint.
pub fn host_of(endpoint: &str) -> &str {
    endpoint.split(':').next().unwrap_or(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_vcap_at_director_host() {
        assert_eq!(
            GatewayIdentity::default_for("some-director.com").as_str(),
            "vcap@some-director.com"
        );
    }

    #[test]
    fn default_strips_the_port() {
        assert_eq!(
            GatewayIdentity::default_for("some-director.com:25555").as_str(),
            "vcap@some-director.com"
        );
    }

    #[test]
    fn caller_supplied_identity_is_verbatim() {
        assert_eq!(
            GatewayIdentity::new("someuser@somehost.com").as_str(),
            "someuser@somehost.com"
        );
    }

    #[test]
    fn for_user_honors_the_configured_account() {
        assert_eq!(
            GatewayIdentity::for_user("admin", "some-director.com").as_str(),
            "admin@some-director.com"
        );
    }

    #[test]
    fn host_of_handles_bare_hosts() {
        assert_eq!(host_of("some-director.com"), "some-director.com");
        assert_eq!(host_of("some-director.com:25555"), "some-director.com");
    }
}
