//! Stable 32-bit identifiers for services and methods.
//!
//! Generated servers and clients never exchange an ID table. Both sides hash
//! the same strings with the same function, so whatever [`IdHasher`] the
//! generator uses must match the one the RPC runtime dispatches with, byte
//! for byte.

/// Maps a service or method path to its 32-bit identifier.
///
/// Implementations must be pure: the same input always yields the same ID,
/// regardless of call order or previous calls.
pub trait IdHasher {
    /// Hash a path string.
    ///
    /// Method IDs hash the bare method name (`"Echo"`), service IDs hash the
    /// service's fully-qualified dotted path (`"my.pkg.Echo"`).
    fn hash(&self, path: &str) -> u32;
}

impl<F> IdHasher for F
where
    F: Fn(&str) -> u32,
{
    fn hash(&self, path: &str) -> u32 {
        self(path)
    }
}

/// Multiplier of the tokenizer hash.
pub const HASH_CONSTANT: u32 = 65599;

/// The pw_tokenizer 65599 hash, as used by the pw_rpc runtime.
///
/// The hash is seeded with the byte length of the input. Each byte is
/// multiplied by a running power of [`HASH_CONSTANT`] and accumulated. All
/// arithmetic wraps modulo 2^32.
///
/// # Example
///
/// ```
/// use rpcgen_core::{IdHasher, TokenizerHash};
///
/// assert_eq!(TokenizerHash.hash("Echo"), 0x8b47_0ee9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerHash;

impl IdHasher for TokenizerHash {
    fn hash(&self, path: &str) -> u32 {
        let mut hash = path.len() as u32;
        let mut coefficient = HASH_CONSTANT;

        for &byte in path.as_bytes() {
            hash = hash.wrapping_add(coefficient.wrapping_mul(u32::from(byte)));
            coefficient = coefficient.wrapping_mul(HASH_CONSTANT);
        }

        hash
    }
}

/// Format an identifier the way generated code spells it (`0x8b470ee9`).
pub fn format_id(id: u32) -> String {
    format!("0x{:08x}", id)
}
