//! Base URL used to build full short links.

/// Prefix that every short link starts with, e.g. `http://localhost:8000/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBase {
    base: String,
}

impl LinkBase {
    /// Builds the base from the public domain and port.
    ///
    /// The port is left out when it is 80 or when `omit_port` is set
    /// (production deployments behind a proxy on the default port).
    pub fn new(domain: &str, port: u16, omit_port: bool) -> Self {
        let base = if port == 80 || omit_port {
            format!("http://{}/", domain)
        } else {
            format!("http://{}:{}/", domain, port)
        };

        Self { base }
    }

    /// Returns the full short link for `token`.
    pub fn link_for(&self, token: &str) -> String {
        format!("{}{}", self.base, token)
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }
}
