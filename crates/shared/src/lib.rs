//! Types shared between the navigator client and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
