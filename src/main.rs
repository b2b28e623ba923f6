mod api;
mod blockchain;
mod peers;
mod sync;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::env;

use api::NodeState;
use blockchain::DIFFICULTY_PREFIX;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let difficulty_prefix =
        env::var("DIFFICULTY_PREFIX").unwrap_or_else(|_| DIFFICULTY_PREFIX.to_string());

    println!("⛓️ Starting node API at http://{host}:{port}");

    // Solves the genesis proof-of-work before accepting requests.
    let state = web::Data::new(NodeState::new(difficulty_prefix));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
