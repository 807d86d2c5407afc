//! Zero-copy decoding and structural validation of the SMB2 NEGOTIATE
//! response.
//! MS-SMB2 Section 2.2.4
//!
//! The NEGOTIATE response is the message a server returns during protocol
//! negotiation: a 64-byte fixed header followed by a security buffer and,
//! in the 3.1.1 dialect, a list of negotiation context records, both
//! addressed by offset/length fields inside the header. The buffer arrives
//! from the network and nothing in it can be trusted as-is; [`Response`]
//! wraps the raw bytes without copying and [`Response::valid`] establishes
//! that every declared offset and length is consistent with the buffer
//! before any field is handed to session-setup logic.
//!
//! This crate does no I/O and allocates nothing: the transport layer that
//! produces the buffer, the GSS token inside the security buffer, and the
//! meaning of the advertised capability bits all belong to other layers.
//!
//! # Example
//!
//! ```
//! use smb2_nego::{Dialect, Response, RESPONSE_STRUCTURE_SIZE};
//!
//! // A minimal SMB 2.1 response: fixed region only, empty security buffer.
//! let mut raw = [0u8; 64];
//! let mut response = Response::new(&mut raw[..]);
//! response.set_structure_size(RESPONSE_STRUCTURE_SIZE);
//! response.set_dialect_revision(Dialect::Smb210);
//! response.set_security_buffer_offset(64);
//!
//! assert!(response.valid());
//! assert!(response.security_buffer().is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod capabilities;
pub mod context;
pub mod dialect;
pub mod filetime;
pub mod response;
pub mod security_mode;
pub mod server_id;

pub use capabilities::Capabilities;
pub use context::{Context, ContextList, ContextType, Contexts, CONTEXT_HEADER_LEN};
pub use dialect::Dialect;
pub use filetime::FileTime;
pub use response::{Response, RESPONSE_FIXED_LEN, RESPONSE_STRUCTURE_SIZE};
pub use security_mode::SecurityMode;
pub use server_id::ServerId;
