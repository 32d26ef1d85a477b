//! Compile-time build metadata exposed through `elebee --version`.

/// Version block used by `elebee --version`: package version, commit hash
/// and build timestamp captured by `build.rs`.
pub const CLI_VERSION_TEXT: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("ELEBEE_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("ELEBEE_BUILD_TIMESTAMP")
);
