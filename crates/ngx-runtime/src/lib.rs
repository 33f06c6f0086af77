//! `ngx-runtime` describes the NVIDIA NGX runtime the way the integration
//! layer sees it: the status codes it returns, the parameter block it reads,
//! the resource descriptors it accepts and the entry points of its two
//! graphics API flavours.
//!
//! The runtime itself (model weights, temporal history, the actual pixels) is
//! a closed black box. Everything in this crate is the contract around it, so
//! the layer above can be written, and tested, without the vendor binaries.
#![deny(missing_docs)]

pub mod error;
pub use error::*;
pub mod status;
pub use status::*;
pub mod names;
pub mod parameter;
pub use parameter::*;
pub mod feature;
pub use feature::*;
pub mod directx;
pub mod vulkan;

#[cfg(feature = "mock")]
pub mod mock;
