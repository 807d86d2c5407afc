//! Negotiation context records, the variable tail of an SMB 3.1.1
//! NEGOTIATE exchange.
//! MS-SMB2 Section 2.2.3.1
//!
//! Every record starts with the same 8-byte header: ContextType (u16),
//! DataLength (u16), and 4 reserved bytes, followed by DataLength bytes of
//! type-specific data. Records after the first are aligned to an 8-byte
//! boundary measured from the start of the list; no padding follows the
//! last record. The data itself is opaque at this layer.

use tracing::trace;

/// Size of the header common to every negotiation context record. This is
/// also the smallest possible record, so `offset + count * CONTEXT_HEADER_LEN`
/// is a lower bound on the bytes a list of `count` records occupies.
pub const CONTEXT_HEADER_LEN: usize = 8;

/// Negotiation context types.
/// MS-SMB2 Section 2.2.3.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextType {
    PreauthIntegrityCapabilities,
    EncryptionCapabilities,
    CompressionCapabilities,
    NetnameNegotiateContextId,
    TransportCapabilities,
    RdmaTransformCapabilities,
    SigningCapabilities,
    /// A type outside the assigned range. Unknown contexts are carried, not
    /// rejected.
    Other(u16),
}

impl ContextType {
    pub fn from_u16(v: u16) -> Self {
        match v {
            0x0001 => Self::PreauthIntegrityCapabilities,
            0x0002 => Self::EncryptionCapabilities,
            0x0003 => Self::CompressionCapabilities,
            0x0005 => Self::NetnameNegotiateContextId,
            0x0006 => Self::TransportCapabilities,
            0x0007 => Self::RdmaTransformCapabilities,
            0x0008 => Self::SigningCapabilities,
            v => Self::Other(v),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            Self::PreauthIntegrityCapabilities => 0x0001,
            Self::EncryptionCapabilities => 0x0002,
            Self::CompressionCapabilities => 0x0003,
            Self::NetnameNegotiateContextId => 0x0005,
            Self::TransportCapabilities => 0x0006,
            Self::RdmaTransformCapabilities => 0x0007,
            Self::SigningCapabilities => 0x0008,
            Self::Other(v) => *v,
        }
    }
}

/// View of a single negotiation context record.
///
/// Wraps the record's bytes without copying. Field accessors assume the
/// 8-byte header is present; check [`Context::valid`] first when the bytes
/// are untrusted.
#[derive(Debug, Clone, Copy)]
pub struct Context<B> {
    buf: B,
}

impl<B: AsRef<[u8]>> Context<B> {
    pub fn new(buf: B) -> Self {
        Context { buf }
    }

    /// True if the header is present and the declared data fits in the
    /// wrapped bytes.
    pub fn valid(&self) -> bool {
        let buf = self.buf.as_ref();
        if buf.len() < CONTEXT_HEADER_LEN {
            return false;
        }
        CONTEXT_HEADER_LEN as u64 + u64::from(self.data_length()) <= buf.len() as u64
    }

    pub fn context_type(&self) -> ContextType {
        let b = self.buf.as_ref();
        ContextType::from_u16(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Length in bytes of the type-specific data that follows the header.
    pub fn data_length(&self) -> u16 {
        let b = self.buf.as_ref();
        u16::from_le_bytes([b[2], b[3]])
    }

    /// Total size of the record: header plus data, excluding any alignment
    /// padding that precedes the next record.
    pub fn size(&self) -> usize {
        CONTEXT_HEADER_LEN + usize::from(self.data_length())
    }

    /// The type-specific data. In bounds only for a record that passed
    /// [`Context::valid`].
    pub fn data(&self) -> &[u8] {
        &self.buf.as_ref()[CONTEXT_HEADER_LEN..self.size()]
    }
}

/// View of the negotiation context list at the tail of a buffer.
///
/// The list does not carry its own record count; the count travels in the
/// NEGOTIATE message that points at the list, and every operation here takes
/// it as a parameter.
#[derive(Debug, Clone, Copy)]
pub struct ContextList<B> {
    buf: B,
}

impl<B: AsRef<[u8]>> ContextList<B> {
    pub fn new(buf: B) -> Self {
        ContextList { buf }
    }

    /// True if exactly `count` records can be read from the wrapped bytes
    /// without running past the end.
    ///
    /// Walks the records front to back, honoring the 8-byte alignment of
    /// every record after the first. Bytes past the last record are ignored.
    /// A true verdict guarantees that [`ContextList::iter`] with the same
    /// count yields `count` in-bounds records.
    pub fn valid(&self, count: u16) -> bool {
        let buf = self.buf.as_ref();
        let mut offset = 0usize;
        for i in 0..usize::from(count) {
            if i > 0 {
                offset = align8(offset);
            }
            if offset > buf.len() {
                trace!("context list ends inside alignment padding at record {}", i);
                return false;
            }
            let record = Context::new(&buf[offset..]);
            if !record.valid() {
                trace!("context record {} at offset {} is truncated", i, offset);
                return false;
            }
            offset += record.size();
        }
        true
    }

    /// Iterate over the first `count` records.
    ///
    /// Safe to call on anything, but only guaranteed to yield `count`
    /// records after [`ContextList::valid`] returned true for the same
    /// count; on truncated input the iterator simply stops early.
    pub fn iter(&self, count: u16) -> Contexts<'_> {
        Contexts {
            buf: self.buf.as_ref(),
            offset: 0,
            remaining: count,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }
}

/// Iterator over the records of a [`ContextList`].
#[derive(Debug)]
pub struct Contexts<'a> {
    buf: &'a [u8],
    offset: usize,
    remaining: u16,
}

impl<'a> Iterator for Contexts<'a> {
    type Item = Context<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tail = self.buf.get(self.offset..)?;
        let record = Context::new(tail);
        if !record.valid() {
            self.remaining = 0;
            return None;
        }
        let size = record.size();
        self.offset = align8(self.offset + size);
        self.remaining -= 1;
        Some(Context::new(&tail[..size]))
    }
}

/// Round up to the next multiple of 8.
const fn align8(n: usize) -> usize {
    (n + 7) & !7
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    /// Append one record: header, data, no trailing padding.
    fn put_context(buf: &mut BytesMut, context_type: u16, data: &[u8]) {
        buf.put_u16_le(context_type);
        buf.put_u16_le(data.len() as u16);
        buf.put_u32_le(0); // Reserved
        buf.put_slice(data);
    }

    fn pad_to_8(buf: &mut BytesMut) {
        while buf.len() % 8 != 0 {
            buf.put_u8(0);
        }
    }

    #[test]
    fn test_context_type_roundtrip() {
        assert_eq!(ContextType::from_u16(0x0002), ContextType::EncryptionCapabilities);
        assert_eq!(ContextType::EncryptionCapabilities.as_u16(), 0x0002);
        assert_eq!(ContextType::from_u16(0x0004), ContextType::Other(0x0004));
        assert_eq!(ContextType::Other(0x0004).as_u16(), 0x0004);
    }

    #[test]
    fn test_record_header_too_short() {
        assert!(!Context::new(&[0u8; 7][..]).valid());
        assert!(Context::new(&[0u8; 8][..]).valid());
    }

    #[test]
    fn test_record_data_must_fit() {
        let mut buf = BytesMut::new();
        put_context(&mut buf, 0x0001, &[1, 2, 3, 4]);
        let record = Context::new(&buf[..]);
        assert!(record.valid());
        assert_eq!(record.size(), 12);

        // Same record with the last data byte missing.
        let record = Context::new(&buf[..11]);
        assert!(!record.valid());
    }

    #[test]
    fn test_record_fields() {
        let mut buf = BytesMut::new();
        put_context(&mut buf, 0x0008, &[0xAB, 0xCD]);
        let record = Context::new(&buf[..]);
        assert_eq!(record.context_type(), ContextType::SigningCapabilities);
        assert_eq!(record.data_length(), 2);
        assert_eq!(record.data(), &[0xAB, 0xCD]);
    }

    #[test]
    fn test_list_walks_aligned_records() {
        let mut buf = BytesMut::new();
        put_context(&mut buf, 0x0001, &[1, 2, 3, 4, 5, 6]); // size 14
        pad_to_8(&mut buf); // next record at 16
        put_context(&mut buf, 0x0002, &[7, 8]); // size 10, unpadded tail

        let list = ContextList::new(&buf[..]);
        assert!(list.valid(0));
        assert!(list.valid(1));
        assert!(list.valid(2));
        // There is no third record.
        assert!(!list.valid(3));
    }

    #[test]
    fn test_list_missing_padding_between_records() {
        let mut buf = BytesMut::new();
        put_context(&mut buf, 0x0001, &[1, 2, 3, 4, 5, 6]); // ends at 14
        put_context(&mut buf, 0x0002, &[]); // starts unaligned at 14

        let list = ContextList::new(&buf[..]);
        assert!(list.valid(1));
        // Record 1 is expected at offset 16, where only 6 bytes remain.
        assert!(!list.valid(2));
    }

    #[test]
    fn test_list_trailing_bytes_ignored() {
        let mut buf = BytesMut::new();
        put_context(&mut buf, 0x0003, &[]);
        buf.put_slice(&[0xEE; 5]);
        assert!(ContextList::new(&buf[..]).valid(1));
    }

    #[test]
    fn test_empty_list() {
        let list = ContextList::new(&[][..]);
        assert!(list.valid(0));
        assert!(!list.valid(1));
    }

    #[test]
    fn test_iter_yields_validated_records() {
        let mut buf = BytesMut::new();
        put_context(&mut buf, 0x0001, &[0x11; 6]);
        pad_to_8(&mut buf);
        put_context(&mut buf, 0x0005, b"share");
        pad_to_8(&mut buf);
        put_context(&mut buf, 0x0100, &[]);

        let list = ContextList::new(&buf[..]);
        assert!(list.valid(3));

        let records: Vec<_> = list.iter(3).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].context_type(), ContextType::PreauthIntegrityCapabilities);
        assert_eq!(records[0].data(), &[0x11; 6]);
        assert_eq!(records[1].context_type(), ContextType::NetnameNegotiateContextId);
        assert_eq!(records[1].data(), b"share");
        assert_eq!(records[2].context_type(), ContextType::Other(0x0100));
        assert_eq!(records[2].data(), &[] as &[u8]);
    }

    #[test]
    fn test_iter_stops_on_truncated_input() {
        let mut buf = BytesMut::new();
        put_context(&mut buf, 0x0001, &[]);
        buf.put_slice(&[0u8; 3]); // half a header

        let list = ContextList::new(&buf[..]);
        assert_eq!(list.iter(5).count(), 1);
    }
}
