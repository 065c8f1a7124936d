//! Input collaborator: directory scanning and still-image decoding.

/// Directory scan and RGBA8 decoding.
pub mod decode;
