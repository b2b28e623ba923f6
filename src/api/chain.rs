use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, info, warn};

use super::models::{ChainResponse, MineResponse, NodeState};
use crate::blockchain::{MINING_REWARD, MINING_SENDER, hasher, pow};

/// Get the full chain together with its length.
#[get("/blockchain")]
pub async fn get_chain(state: web::Data<NodeState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        chain: &bc.chain,
        length: bc.len(),
    };
    HttpResponse::Ok().json(resp)
}

/// Mine the next block:
/// - queue the reward transaction for this node's identity
/// - snapshot the tip and search for a nonce over the pending buffer
/// - append the block, which clears the buffer
///
/// The chain lock is held for the whole search; a concurrent sync aborts
/// the search through the cancel token instead of waiting it out.
#[get("/mine")]
pub async fn mine_block(state: web::Data<NodeState>) -> impl Responder {
    let mut bc = state.blockchain.lock().expect("mutex poisoned");
    // Re-arm only once the lock is held: searches run under this lock, so
    // a reset taken here can never erase a cancel aimed at an in-flight
    // search by another request.
    state.mining_cancel.reset();
    bc.add_transaction(MINING_SENDER, state.node_id.as_str(), MINING_REWARD);

    let last_block_hash = hasher::hash_value(bc.last_block());
    let index = bc.len() as u64;
    let pending = bc.pending().to_vec();
    debug!(
        "MINER - searching nonce for block #{index} over {} txs",
        pending.len()
    );

    match pow::proof_of_work(
        index,
        &last_block_hash,
        &pending,
        bc.difficulty_prefix(),
        &state.mining_cancel,
    ) {
        Some(nonce) => {
            let block = bc.append_block(last_block_hash, nonce);
            info!("MINER - sealed block #{} (nonce={})", block.index, block.nonce);
            HttpResponse::Ok().json(MineResponse {
                message: "new block has been added",
                index: block.index,
                hash_of_previous_block: block.hash_of_previous_block.clone(),
                nonce: block.nonce,
                transactions: block.transactions.clone(),
            })
        }
        None => {
            // Retract the reward queued for this aborted attempt.
            bc.pop_pending();
            warn!("MINER - search for block #{index} aborted by synchronization");
            HttpResponse::Conflict().body("mining aborted by chain synchronization")
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    use crate::api::{self, NodeState};

    #[actix_web::test]
    async fn mine_commits_pending_plus_reward_and_clears_buffer() {
        let state = web::Data::new(NodeState::new("00"));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(api::init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(serde_json::json!({"sender": "A", "recipient": "B", "amount": 10}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get().uri("/mine").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let txs = body["transactions"].as_array().unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(
            txs[0],
            serde_json::json!({"sender": "A", "recipient": "B", "amount": 10})
        );
        assert_eq!(txs[1]["sender"], "0");
        assert_eq!(txs[1]["recipient"].as_str().unwrap(), state.node_id);
        assert_eq!(txs[1]["amount"], 1);

        let bc = state.blockchain.lock().unwrap();
        assert_eq!(bc.len(), 2);
        assert!(bc.pending().is_empty());
    }

    #[actix_web::test]
    async fn blockchain_endpoint_reports_chain_and_length() {
        let state = web::Data::new(NodeState::new("00"));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(api::init_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/blockchain").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 1);
        assert_eq!(body["chain"].as_array().unwrap().len(), 1);
    }
}
