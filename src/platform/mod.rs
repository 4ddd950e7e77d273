// Platform-specific code module

pub mod host;

pub use host::SysinfoHost;
