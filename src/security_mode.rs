//! SMB2 security mode flags.
//! MS-SMB2 Section 2.2.3

use bitflags::bitflags;

bitflags! {
    /// Message signing configuration advertised in a negotiation message.
    ///
    /// Decoded with [`SecurityMode::from_bits_retain`], so bits outside the
    /// assigned ones are preserved rather than dropped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SecurityMode: u16 {
        const SIGNING_ENABLED  = 0x0001;
        const SIGNING_REQUIRED = 0x0002;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values() {
        assert_eq!(SecurityMode::SIGNING_ENABLED.bits(), 0x0001);
        assert_eq!(SecurityMode::SIGNING_REQUIRED.bits(), 0x0002);
    }

    #[test]
    fn test_unassigned_bits_retained() {
        let mode = SecurityMode::from_bits_retain(0xFFF0 | 0x0001);
        assert!(mode.contains(SecurityMode::SIGNING_ENABLED));
        assert_eq!(mode.bits(), 0xFFF1);
    }
}
