//! Manifest of the fortified symbols this workspace provides.
//!
//! A fortified symbol is a `_chk` variant of a libc function that carries an
//! extra declared-buffer-size argument. Some Android NDK stub libraries (API
//! level 28) lack these, so links against fortified headers fail. The shims
//! satisfy the link and forward to the unfortified function. The declared
//! size is accepted and never checked.

/// One exported fortified symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FortifiedSymbol {
    /// `void *__memchr_chk(const void *s, int c, size_t n, size_t buf_size)`
    MemchrChk,
    /// `int __poll_chk(struct pollfd *fds, nfds_t nfds, int timeout, size_t fds_size)`
    PollChk,
}

impl FortifiedSymbol {
    /// Every exported symbol, in export order.
    pub const ALL: [Self; 2] = [Self::MemchrChk, Self::PollChk];

    /// Linker-visible symbol name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MemchrChk => "__memchr_chk",
            Self::PollChk => "__poll_chk",
        }
    }

    /// The unfortified function the shim forwards to.
    #[must_use]
    pub const fn unfortified(self) -> &'static str {
        match self {
            Self::MemchrChk => "memchr",
            Self::PollChk => "poll",
        }
    }

    /// Header the unfortified function is declared in.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::MemchrChk => "string.h",
            Self::PollChk => "poll.h",
        }
    }

    /// Parameter names in calling-convention order.
    #[must_use]
    pub const fn parameters(self) -> &'static [&'static str] {
        match self {
            Self::MemchrChk => &["s", "c", "n", "buf_size"],
            Self::PollChk => &["fds", "nfds", "timeout", "fds_size"],
        }
    }

    /// Position of the declared-size argument. Always the trailing one.
    #[must_use]
    pub const fn declared_size_index(self) -> usize {
        self.parameters().len() - 1
    }

    /// Whether the shim compares the declared size against the count.
    ///
    /// Always false: matching the non-validating platform behaviour is the
    /// point of the shim.
    #[must_use]
    pub const fn declared_size_enforced(self) -> bool {
        false
    }

    /// Look a symbol up by its linker name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl std::fmt::Display for FortifiedSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_counterparts() {
        assert_eq!(FortifiedSymbol::MemchrChk.name(), "__memchr_chk");
        assert_eq!(FortifiedSymbol::MemchrChk.unfortified(), "memchr");
        assert_eq!(FortifiedSymbol::PollChk.name(), "__poll_chk");
        assert_eq!(FortifiedSymbol::PollChk.unfortified(), "poll");
    }

    #[test]
    fn fortified_name_wraps_unfortified_name() {
        for sym in FortifiedSymbol::ALL {
            assert_eq!(sym.name(), format!("__{}_chk", sym.unfortified()));
        }
    }

    #[test]
    fn declared_size_is_trailing_and_unenforced() {
        for sym in FortifiedSymbol::ALL {
            assert_eq!(sym.parameters().len(), 4);
            assert_eq!(sym.declared_size_index(), 3);
            assert!(!sym.declared_size_enforced());
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            FortifiedSymbol::from_name("__poll_chk"),
            Some(FortifiedSymbol::PollChk)
        );
        assert_eq!(
            FortifiedSymbol::from_name("__memchr_chk"),
            Some(FortifiedSymbol::MemchrChk)
        );
        assert_eq!(FortifiedSymbol::from_name("__memcpy_chk"), None);
        assert_eq!(FortifiedSymbol::from_name("memchr"), None);
    }

    #[test]
    fn display_is_linker_name() {
        assert_eq!(FortifiedSymbol::PollChk.to_string(), "__poll_chk");
    }
}
