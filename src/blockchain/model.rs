use chrono::Utc;

use super::{Block, GENESIS_MARKER, hasher, pow};
use crate::transaction::Transaction;

/// In-memory block store: the chain itself plus the buffer of transactions
/// waiting for the next block. Lives for the process lifetime; replaced
/// wholesale (never merged) when synchronization adopts a longer chain.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pending: Vec<Transaction>,
    difficulty_prefix: String,
}

impl Blockchain {
    /// Initialize a new chain, solving the genesis block's proof-of-work
    /// against an empty transaction list and the hash of a fixed sentinel.
    pub fn new(difficulty_prefix: impl Into<String>) -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            pending: Vec::new(),
            difficulty_prefix: difficulty_prefix.into(),
        };
        let genesis_hash = hasher::hash_value(&GENESIS_MARKER);
        let nonce = pow::proof_of_work(
            0,
            &genesis_hash,
            &[],
            &bc.difficulty_prefix,
            &pow::CancelToken::new(),
        )
        .expect("uncancelled search always yields a nonce");
        bc.append_block(genesis_hash, nonce);
        bc
    }

    /// Return the tip. An empty chain is an invariant violation that cannot
    /// happen once the constructor has run.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    /// Build a block from the pending buffer and the wall clock, append it,
    /// and clear the buffer.
    pub fn append_block(&mut self, hash_of_previous_block: String, nonce: u64) -> &Block {
        let block = Block {
            index: self.chain.len() as u64,
            timestamp: Utc::now().timestamp(),
            transactions: std::mem::take(&mut self.pending),
            nonce,
            hash_of_previous_block,
        };
        self.chain.push(block);
        self.last_block()
    }

    /// Queue a transaction for the next block; returns the index of the
    /// block it will belong to (the current chain length).
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: u64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        self.chain.len() as u64
    }

    /// Drop the most recently queued transaction. Compensates an aborted
    /// mining attempt that had already queued its reward.
    pub fn pop_pending(&mut self) -> Option<Transaction> {
        self.pending.pop()
    }

    /// Commit step of synchronization: swap in `candidate` iff it is
    /// strictly longer than the local chain. Ties never replace.
    pub fn adopt_if_longer(&mut self, candidate: Vec<Block>) -> bool {
        if candidate.len() > self.chain.len() {
            self.chain = candidate;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn difficulty_prefix(&self) -> &str {
        &self.difficulty_prefix
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}
