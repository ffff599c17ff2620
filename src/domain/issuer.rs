//! Authority Information Access entries and the issuer location they yield.

use std::fmt;

/// One decoded `AccessDescription`, named the way OpenSSL prints it
/// (for example `"CA Issuers - URI"` / `"http://ca.example/issuer.der"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDescriptor {
    pub name: String,
    pub location: String,
}

impl AccessDescriptor {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// Location of the issuing CA certificate. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerUri(String);

impl IssuerUri {
    /// Returns `None` for an empty location.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Option<Self> {
        let uri = uri.into();
        if uri.is_empty() {
            None
        } else {
            Some(IssuerUri(uri))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssuerUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
