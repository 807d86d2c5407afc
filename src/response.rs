//! SMB2 NEGOTIATE response body.
//! MS-SMB2 Section 2.2.4
//!
//! The body is a 64-byte fixed region followed by two variable regions the
//! header points into: the security buffer (a GSS token, opaque here) and,
//! for dialect 3.1.1, the negotiation context list. Nothing in the buffer
//! can be trusted until [`Response::valid`] has confirmed that the declared
//! offsets and lengths are consistent with the buffer's actual length.

use tracing::trace;

use crate::capabilities::Capabilities;
use crate::context::{ContextList, CONTEXT_HEADER_LEN};
use crate::dialect::Dialect;
use crate::filetime::FileTime;
use crate::security_mode::SecurityMode;
use crate::server_id::ServerId;

/// Size of the fixed region of the response body.
pub const RESPONSE_FIXED_LEN: usize = 64;

/// Required value of the StructureSize field. [MS-SMB2] fixes this at 65
/// regardless of the size of the security buffer or the number of
/// negotiation contexts.
pub const RESPONSE_STRUCTURE_SIZE: u16 = 65;

/// View of a NEGOTIATE response body.
///
/// Wraps a caller-owned byte buffer without copying or allocating;
/// construction never fails and performs no checks. Field accessors decode
/// little-endian values at fixed offsets and require the 64-byte fixed
/// region to be present; on a shorter buffer they panic via slice bounds
/// checking rather than read garbage. [`Response::valid`] is the exception:
/// it is callable on any buffer, and a true verdict is what makes every
/// other accessor, [`Response::security_buffer`], and
/// [`Response::context_list`] safe.
///
/// Reading works through any `B: AsRef<[u8]>`; the setters additionally
/// need `B: AsMut<[u8]>` and write straight into the underlying bytes.
#[derive(Debug, Clone, Copy)]
pub struct Response<B> {
    buf: B,
}

impl<B: AsRef<[u8]>> Response<B> {
    /// Wrap a buffer. No copy, no validation.
    pub fn new(buf: B) -> Self {
        Response { buf }
    }

    /// Release the wrapped buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// True if the buffer is structurally consistent: long enough for the
    /// fixed region, carrying the required structure size, with the
    /// security buffer and (for dialect 3.1.1) the negotiation context list
    /// fully inside the buffer.
    ///
    /// Pure and idempotent. The verdict is a bare boolean; a caller that
    /// wants to know *which* check failed can repeat the individual
    /// comparisons itself.
    pub fn valid(&self) -> bool {
        let buf = self.buf.as_ref();
        if buf.len() < RESPONSE_FIXED_LEN {
            trace!("negotiate response too short: {} bytes", buf.len());
            return false;
        }

        // [MS-SMB2] requires the structure size field to be 65.
        if self.structure_size() != RESPONSE_STRUCTURE_SIZE {
            trace!("negotiate response structure size {} != 65", self.structure_size());
            return false;
        }

        // The security buffer must not run past the end. Summed in u64 so a
        // near-max offset/length pair cannot wrap the comparison.
        let security_end = u64::from(self.security_buffer_offset())
            + u64::from(self.security_buffer_length());
        if security_end > buf.len() as u64 {
            trace!("security buffer ends at {} in a {} byte response", security_end, buf.len());
            return false;
        }

        // In SMB 3.1.1 the negotiation contexts must not run past the end
        // either. Records are variable-sized but at least 8 bytes, which
        // bounds the list from below; the same widened arithmetic applies.
        if self.dialect_revision() == Dialect::Smb311 {
            let minimum_len = u64::from(self.context_offset())
                + u64::from(self.context_count()) * CONTEXT_HEADER_LEN as u64;
            if minimum_len > buf.len() as u64 {
                trace!(
                    "{} contexts at offset {} cannot fit in a {} byte response",
                    self.context_count(),
                    self.context_offset(),
                    buf.len()
                );
                return false;
            }

            // The list makes its own judgment about the records it holds.
            if !self.context_list().valid(self.context_count()) {
                return false;
            }
        }

        true
    }

    /// The StructureSize field. Must be 65 for the response to be valid.
    pub fn structure_size(&self) -> u16 {
        let b = self.buf.as_ref();
        u16::from_le_bytes([b[0], b[1]])
    }

    pub fn security_mode(&self) -> SecurityMode {
        let b = self.buf.as_ref();
        SecurityMode::from_bits_retain(u16::from_le_bytes([b[2], b[3]]))
    }

    /// The dialect revision the server selected.
    pub fn dialect_revision(&self) -> Dialect {
        let b = self.buf.as_ref();
        Dialect::from_u16(u16::from_le_bytes([b[4], b[5]]))
    }

    /// Number of negotiation context records.
    ///
    /// Only meaningful in the 3.1.1 dialect; earlier dialects leave the
    /// field as padding.
    pub fn context_count(&self) -> u16 {
        let b = self.buf.as_ref();
        u16::from_le_bytes([b[6], b[7]])
    }

    pub fn server_id(&self) -> ServerId {
        let b = self.buf.as_ref();
        let mut id = [0u8; 16];
        id.copy_from_slice(&b[8..24]);
        ServerId::new(id)
    }

    pub fn capabilities(&self) -> Capabilities {
        let b = self.buf.as_ref();
        Capabilities::from_bits_retain(u32::from_le_bytes([b[24], b[25], b[26], b[27]]))
    }

    /// Largest transaction the server accepts, in bytes.
    pub fn max_transact_size(&self) -> u32 {
        let b = self.buf.as_ref();
        u32::from_le_bytes([b[28], b[29], b[30], b[31]])
    }

    /// Largest read the server accepts, in bytes.
    pub fn max_read_size(&self) -> u32 {
        let b = self.buf.as_ref();
        u32::from_le_bytes([b[32], b[33], b[34], b[35]])
    }

    /// Largest write the server accepts, in bytes.
    pub fn max_write_size(&self) -> u32 {
        let b = self.buf.as_ref();
        u32::from_le_bytes([b[36], b[37], b[38], b[39]])
    }

    pub fn system_time(&self) -> FileTime {
        let b = self.buf.as_ref();
        FileTime::from_ticks(u64::from_le_bytes([
            b[40], b[41], b[42], b[43], b[44], b[45], b[46], b[47],
        ]))
    }

    /// When the server started. Zero means the server did not say.
    pub fn server_start_time(&self) -> FileTime {
        let b = self.buf.as_ref();
        FileTime::from_ticks(u64::from_le_bytes([
            b[48], b[49], b[50], b[51], b[52], b[53], b[54], b[55],
        ]))
    }

    /// Byte offset of the security buffer, measured from the start of the
    /// SMB2 header per [MS-SMB2] — i.e. from the start of this buffer when
    /// the transport layer has stripped everything before the body's frame.
    pub fn security_buffer_offset(&self) -> u16 {
        let b = self.buf.as_ref();
        u16::from_le_bytes([b[56], b[57]])
    }

    pub fn security_buffer_length(&self) -> u16 {
        let b = self.buf.as_ref();
        u16::from_le_bytes([b[58], b[59]])
    }

    /// Byte offset of the first negotiation context record.
    ///
    /// Only meaningful in the 3.1.1 dialect.
    pub fn context_offset(&self) -> u32 {
        let b = self.buf.as_ref();
        u32::from_le_bytes([b[60], b[61], b[62], b[63]])
    }

    /// The security buffer as a borrowed sub-slice, no copy.
    ///
    /// The range is taken from the offset/length fields as-is; it is known
    /// to be in bounds only after [`Response::valid`], and an out-of-range
    /// pair panics.
    pub fn security_buffer(&self) -> &[u8] {
        let start = usize::from(self.security_buffer_offset());
        let end = start + usize::from(self.security_buffer_length());
        &self.buf.as_ref()[start..end]
    }

    /// The negotiation context list: a view over the buffer tail starting
    /// at [`Response::context_offset`].
    ///
    /// Only meaningful in the 3.1.1 dialect. The offset is applied as-is,
    /// so call this after [`Response::valid`]; if the response is valid,
    /// the returned list is guaranteed to hold
    /// [`Response::context_count`] records.
    pub fn context_list(&self) -> ContextList<&[u8]> {
        ContextList::new(&self.buf.as_ref()[self.context_offset() as usize..])
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Response<B> {
    pub fn set_structure_size(&mut self, size: u16) {
        self.buf.as_mut()[0..2].copy_from_slice(&size.to_le_bytes());
    }

    pub fn set_security_mode(&mut self, mode: SecurityMode) {
        self.buf.as_mut()[2..4].copy_from_slice(&mode.bits().to_le_bytes());
    }

    pub fn set_dialect_revision(&mut self, dialect: Dialect) {
        self.buf.as_mut()[4..6].copy_from_slice(&dialect.as_u16().to_le_bytes());
    }

    /// Only meaningful in the 3.1.1 dialect.
    pub fn set_context_count(&mut self, count: u16) {
        self.buf.as_mut()[6..8].copy_from_slice(&count.to_le_bytes());
    }

    pub fn set_server_id(&mut self, id: ServerId) {
        self.buf.as_mut()[8..24].copy_from_slice(id.as_bytes());
    }

    pub fn set_capabilities(&mut self, caps: Capabilities) {
        self.buf.as_mut()[24..28].copy_from_slice(&caps.bits().to_le_bytes());
    }

    pub fn set_max_transact_size(&mut self, size: u32) {
        self.buf.as_mut()[28..32].copy_from_slice(&size.to_le_bytes());
    }

    pub fn set_max_read_size(&mut self, size: u32) {
        self.buf.as_mut()[32..36].copy_from_slice(&size.to_le_bytes());
    }

    pub fn set_max_write_size(&mut self, size: u32) {
        self.buf.as_mut()[36..40].copy_from_slice(&size.to_le_bytes());
    }

    pub fn set_system_time(&mut self, time: FileTime) {
        self.buf.as_mut()[40..48].copy_from_slice(&time.ticks().to_le_bytes());
    }

    pub fn set_server_start_time(&mut self, time: FileTime) {
        self.buf.as_mut()[48..56].copy_from_slice(&time.ticks().to_le_bytes());
    }

    pub fn set_security_buffer_offset(&mut self, offset: u16) {
        self.buf.as_mut()[56..58].copy_from_slice(&offset.to_le_bytes());
    }

    pub fn set_security_buffer_length(&mut self, length: u16) {
        self.buf.as_mut()[58..60].copy_from_slice(&length.to_le_bytes());
    }

    /// Only meaningful in the 3.1.1 dialect.
    pub fn set_context_offset(&mut self, offset: u32) {
        self.buf.as_mut()[60..64].copy_from_slice(&offset.to_le_bytes());
    }
}
