//! Session identifier minting.

use crate::rng::DeterministicRng;

/// Number of characters in a minted session identifier.
pub const SESSION_ID_LEN: usize = 16;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mints a base-36 session identifier of [`SESSION_ID_LEN`] characters.
///
/// With an OS-seeded generator this gives roughly 82 bits of entropy.
pub fn mint_session_id(rng: &mut dyn DeterministicRng) -> String {
    (0..SESSION_ID_LEN)
        .map(|_| {
            let index = rng.next_u32_range(0, 35) as usize;
            char::from(ALPHABET[index])
        })
        .collect()
}
