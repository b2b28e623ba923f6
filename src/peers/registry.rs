use std::collections::BTreeSet;

use url::Url;

/// Registry of known peers, keyed by normalized network location
/// (`host:port`). Purely informational: it owns no remote state and is
/// append-only in normal operation. Unauthenticated; normalization is the
/// seam where peer authentication would slot in later.
#[derive(Debug, Clone, Default)]
pub struct PeerSet {
    peers: BTreeSet<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer given a full URL or a bare `host:port` authority.
    /// Returns the normalized network location, or `None` for input that
    /// has no recognizable host.
    pub fn add(&mut self, address: &str) -> Option<String> {
        let netloc = normalize(address)?;
        self.peers.insert(netloc.clone());
        Some(netloc)
    }

    pub fn contains(&self, netloc: &str) -> bool {
        self.peers.contains(netloc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.peers.iter().map(String::as_str)
    }

    pub fn addresses(&self) -> Vec<String> {
        self.peers.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

fn normalize(address: &str) -> Option<String> {
    let url = if address.contains("://") {
        Url::parse(address).ok()?
    } else {
        Url::parse(&format!("http://{address}")).ok()?
    };
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
