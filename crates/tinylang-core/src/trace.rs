//! Trace configuration for compilation output.

use bitflags::bitflags;

bitflags! {
    /// Flags selecting what extra commentary compilation leaves behind.
    ///
    /// All flags are off by default; the generated instructions are the same
    /// either way, only the listing commentary changes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TraceFlags: u8 {
        /// Echo the source program into the listing header.
        const SOURCE = 1 << 0;
        /// Emit construct banners (`-> if`, `<- if`, ...) around each
        /// control-flow construct in the listing.
        const CODE = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(TraceFlags::default().is_empty());
    }

    #[test]
    fn flags_compose() {
        let flags = TraceFlags::SOURCE | TraceFlags::CODE;
        assert!(flags.contains(TraceFlags::CODE));
        assert!(flags.contains(TraceFlags::SOURCE));
    }
}
