//! Encoders for exported layers. Only PNG is written.

pub mod png;
