//! SMB2 global capability flags.
//! MS-SMB2 Section 2.2.4

use bitflags::bitflags;

bitflags! {
    /// Capabilities the server advertises in the NEGOTIATE response.
    ///
    /// This crate only transports the bits; acting on them is the session
    /// layer's concern. Decoded with [`Capabilities::from_bits_retain`] so
    /// unassigned bits survive a round trip.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u32 {
        const DFS                = 0x00000001;
        const LEASING            = 0x00000002;
        const LARGE_MTU          = 0x00000004;
        const MULTI_CHANNEL      = 0x00000008;
        const PERSISTENT_HANDLES = 0x00000010;
        const DIRECTORY_LEASING  = 0x00000020;
        const ENCRYPTION         = 0x00000040;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values() {
        assert_eq!(Capabilities::DFS.bits(), 0x00000001);
        assert_eq!(Capabilities::ENCRYPTION.bits(), 0x00000040);
    }

    #[test]
    fn test_union() {
        let caps = Capabilities::LEASING | Capabilities::LARGE_MTU;
        assert!(caps.contains(Capabilities::LEASING));
        assert!(!caps.contains(Capabilities::ENCRYPTION));
        assert_eq!(caps.bits(), 0x00000006);
    }

    #[test]
    fn test_unassigned_bits_retained() {
        let caps = Capabilities::from_bits_retain(0x8000_0041);
        assert!(caps.contains(Capabilities::DFS));
        assert_eq!(caps.bits(), 0x8000_0041);
    }
}
