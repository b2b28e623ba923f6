mod chain;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::ServiceConfig;

pub use models::NodeState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    // Registered at the root so peers can fetch `/blockchain` directly
    // during synchronization.
    cfg.service(health::health_check)
        .service(chain::get_chain)
        .service(chain::mine_block)
        .service(tx::new_transaction)
        .service(nodes::add_nodes)
        .service(nodes::sync_chain);
}
