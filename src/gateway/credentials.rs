/// Source of the bearer token attached to gateway requests.
pub trait CredentialProvider: Send + Sync {
    /// `None` means the request goes out without an `Authorization` header.
    fn bearer_token(&self) -> Option<String>;
}

/// A token fixed at startup, usually from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Blank tokens count as no token.
    pub fn new(token: Option<String>) -> Self {
        Self(
            token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        )
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}
