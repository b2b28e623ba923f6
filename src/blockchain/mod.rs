pub mod block;
pub mod hasher;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use model::Blockchain;

/// Hex prefix every block digest must carry (16 bits of leading zeros).
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Sentinel value hashed to produce the genesis block's previous-hash link.
pub const GENESIS_MARKER: &str = "genesis_block";

/// Sender identity used for mining reward transactions.
pub const MINING_SENDER: &str = "0";

/// Reward credited to the node identity for each mined block.
pub const MINING_REWARD: u64 = 1;
