use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};

use super::models::{AddNodesRequest, AddNodesResponse, NodeState, SyncResponse};
use crate::sync;

/// Register peer addresses, normalized to `host:port`.
#[post("/nodes/add_nodes")]
pub async fn add_nodes(
    state: web::Data<NodeState>,
    body: web::Json<AddNodesRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().body("no nodes provided");
    }

    let mut peers = state.peers.lock().expect("mutex poisoned");
    let mut added = 0usize;
    for address in &body.nodes {
        match peers.add(address) {
            Some(netloc) => {
                info!("PEERS - registered {netloc}");
                added += 1;
            }
            None => warn!("PEERS - rejected unparsable address {address:?}"),
        }
    }
    if added == 0 {
        return HttpResponse::BadRequest().body("no valid peer addresses provided");
    }

    HttpResponse::Ok().json(AddNodesResponse {
        message: "peers registered",
        nodes: peers.addresses(),
    })
}

/// Reconcile the local chain against all known peers under the
/// longest-valid-chain rule.
///
/// The network scan runs on the blocking pool with no chain lock held; the
/// lock is only taken to snapshot the local length and to commit a winning
/// candidate. The cancel token aborts any in-flight nonce search so this
/// handler never waits behind an unbounded mining run.
#[get("/nodes/sync")]
pub async fn sync_chain(state: web::Data<NodeState>) -> impl Responder {
    state.mining_cancel.cancel();

    let (local_len, difficulty_prefix) = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        (bc.len(), bc.difficulty_prefix().to_string())
    };
    let peers = state.peers.lock().expect("mutex poisoned").clone();

    let scan = web::block(move || {
        sync::scan_peers(local_len, &peers, sync::http_fetch, &difficulty_prefix)
    })
    .await;
    let candidate = match scan {
        Ok(candidate) => candidate,
        Err(err) => {
            warn!("SYNC - scan task failed: {err}");
            return HttpResponse::InternalServerError().body("synchronization failed");
        }
    };

    if candidate.is_some() {
        // A miner may have restarted while the scan was running; abort it
        // again before committing the replacement.
        state.mining_cancel.cancel();
    }

    let mut bc = state.blockchain.lock().expect("mutex poisoned");
    let updated = match candidate {
        Some(chain) => bc.adopt_if_longer(chain),
        None => false,
    };
    if updated {
        info!("SYNC - adopted remote chain of length {}", bc.len());
    } else {
        debug!("SYNC - local chain of length {} retained", bc.len());
    }

    HttpResponse::Ok().json(SyncResponse {
        updated,
        length: bc.len(),
        chain: &bc.chain,
    })
}
