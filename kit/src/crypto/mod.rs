//! Hashing helpers. Only one-way digests live here; nothing in this module
//! holds key material.

pub mod digest;
