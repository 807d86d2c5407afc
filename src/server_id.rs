//! Server identifier (ServerGuid) carried in the NEGOTIATE response.

use std::fmt;

/// 16-byte opaque server identifier.
///
/// The bytes are not interpreted; `Display` renders the Windows GUID text
/// form, in which the first three groups are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ServerId([u8; 16]);

impl ServerId {
    /// Width of the identifier on the wire.
    pub const LEN: usize = 16;

    pub const fn new(bytes: [u8; 16]) -> Self {
        ServerId(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl From<[u8; 16]> for ServerId {
    fn from(bytes: [u8; 16]) -> Self {
        ServerId(bytes)
    }
}

impl From<ServerId> for [u8; 16] {
    fn from(id: ServerId) -> Self {
        id.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        let data1 = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
        let data2 = u16::from_le_bytes([b[4], b[5]]);
        let data3 = u16::from_le_bytes([b[6], b[7]]);
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            data1, data2, data3, b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15],
        )
    }
}
