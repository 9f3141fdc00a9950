//! Deterministic packed-size measurement.
//!
//! Operation fees charge a per-kilobyte component proportional to the
//! serialized size of the operation. The exact wire bytes are framed by an
//! outer layer; the only property the evaluation core relies on is that
//! `packed_size` is deterministic and identical across nodes, so the fixed
//! bincode encoding is measured without ever materializing the buffer.

use serde::Serialize;

use crate::{Result, ValidationError};

/// Serialized size of `value` in bytes under the canonical encoding.
pub fn packed_size<T: Serialize>(value: &T) -> Result<u64> {
    bincode::serialized_size(value).map_err(|e| ValidationError::PackedSize(e.to_string()))
}
