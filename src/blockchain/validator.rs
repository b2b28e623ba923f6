use super::{Block, hasher, pow};

/// Validate a candidate chain: hash linkage plus proof-of-work for every
/// block past the genesis, which is the trusted base case. A single-block
/// chain is trivially valid; an empty one never is.
///
/// Each block's stored index must also equal its position, otherwise a
/// chain with self-consistent wrong indices (proofs solved over them)
/// would slip through.
///
/// Pure function, O(n) in chain length. Validity failures are ordinary
/// outcomes here, not errors: callers decide policy on a `false`.
pub fn valid_chain(chain: &[Block], difficulty_prefix: &str) -> bool {
    let Some(mut last) = chain.first() else {
        return false;
    };

    for (position, block) in chain.iter().enumerate().skip(1) {
        if block.index != position as u64 {
            return false;
        }
        if block.hash_of_previous_block != hasher::hash_value(last) {
            return false;
        }
        if !pow::valid_proof(
            block.index,
            &block.hash_of_previous_block,
            &block.transactions,
            block.nonce,
            difficulty_prefix,
        ) {
            return false;
        }
        last = block;
    }

    true
}
