//! Platform detection for capability gating.

use std::fmt;

/// Detected operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux, macOS, and other Unix-like systems.
    Unix,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        let os = if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            Os::Unix
        };
        Self { os }
    }

    /// Create a platform with an explicit OS (for testing).
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this platform is a Unix-like system.
    #[must_use]
    pub fn is_unix(&self) -> bool {
        self.os == Os::Unix
    }

    /// Whether file mode bits can be applied on this platform.
    #[must_use]
    pub fn supports_modes(&self) -> bool {
        self.is_unix()
    }

    /// Whether hook files can be executed on this platform.
    ///
    /// Hooks rely on Unix execute permission semantics; on Windows they are
    /// reported as unsupported rather than attempted.
    #[must_use]
    pub fn supports_hooks(&self) -> bool {
        self.is_unix()
    }
}
