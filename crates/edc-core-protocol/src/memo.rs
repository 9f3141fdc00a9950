//! Transfer memo payload.

use serde::{Deserialize, Serialize};

/// An encrypted note attached to a transfer.
///
/// The core treats the message as opaque bytes; decryption keys and
/// framing belong to the wallet layer. The memo's packed size feeds the
/// per-kilobyte portion of operation fees.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Memo {
    /// One-time nonce mixed into the shared secret.
    pub nonce: u64,
    /// Ciphertext of the sender's note.
    pub message: Vec<u8>,
}
