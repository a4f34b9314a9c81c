//! Transport layer. Only stdio is supported; the protocol stream owns
//! stdout, diagnostics go to stderr.

mod stdio;

pub use stdio::StdioTransport;
