//! Git credential-helper protocol.

pub mod request;

pub use request::GitRequest;
