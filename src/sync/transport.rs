use std::sync::OnceLock;
use std::time::Duration;

use super::{RemoteChain, SyncError};

/// Per-peer request budget; a slow or unreachable peer must not stall the
/// evaluation of the others.
pub const PEER_TIMEOUT_SECS: u64 = 5;

/// One client for the process lifetime, so every sync reuses the same
/// connection pool instead of rebuilding it per peer.
fn client() -> &'static reqwest::blocking::Client {
    static CLIENT: OnceLock<reqwest::blocking::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(PEER_TIMEOUT_SECS))
            .build()
            .expect("http client configuration is static and valid")
    })
}

/// HTTP implementation of the peer transport collaborator: fetch a peer's
/// full chain from its `/blockchain` endpoint.
pub fn http_fetch(peer: &str) -> Result<RemoteChain, SyncError> {
    let response = client()
        .get(format!("http://{peer}/blockchain"))
        .send()
        .map_err(|e| SyncError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(SyncError::MalformedResponse(format!(
            "unexpected status {}",
            response.status()
        )));
    }

    response
        .json::<RemoteChain>()
        .map_err(|e| SyncError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::client;

    #[test]
    fn client_is_built_once_and_shared() {
        assert!(std::ptr::eq(client(), client()));
    }
}
