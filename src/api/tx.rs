use actix_web::{HttpResponse, Responder, post, web};
use log::debug;

use super::models::{NewTxRequest, NewTxResponse, NodeState};

/// Submit a new transaction into the pending buffer. Only presence is
/// checked; sender/recipient semantics are out of scope here.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<NodeState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    if body.sender.trim().is_empty() || body.recipient.trim().is_empty() {
        return HttpResponse::BadRequest().body("sender and recipient are required");
    }

    let block_index = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.add_transaction(body.sender.clone(), body.recipient.clone(), body.amount)
    };
    debug!(
        "POST /transactions/new - {} -> {} ({}) queued for block #{block_index}",
        body.sender, body.recipient, body.amount
    );

    HttpResponse::Ok().json(NewTxResponse {
        message: format!("transaction will be added to block {block_index}"),
        block_index,
    })
}
