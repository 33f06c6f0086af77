//! # ngx-bridge
//!
//! Creates, evaluates and destroys NVIDIA NGX upscaling features (Super
//! Sampling, "DLSS", and Ray Reconstruction, "DLSS-RR") through two
//! structurally different graphics APIs:
//!
//! - [`dx`]: a command-list API with explicit multi-adapter node masks;
//! - [`vk`]: a command-buffer API paired with an explicit logical device.
//!
//! Both present the same contract, implemented once in [`ngx::lifecycle`]:
//! a feature is created into a [`ngx::FeatureHandle`] tagged with the
//! backend that made it, evaluated any number of times by recording work
//! into a command list/buffer, and destroyed exactly once.
//!
//! ## Usage
//! ```rust,ignore
//! use ngx_bridge::{ngx::*, vk::System};
//!
//! let descriptor = SystemDescriptorBuilder::default()
//!     .engine_version("1.0")
//!     .application_data_path(std::env::temp_dir())
//!     .build()?;
//! let system = System::new(runtime, descriptor, instance, physical_device, device)?;
//! system.capability_parameters()?.supports_super_sampling()?;
//!
//! let settings = system.optimal_settings(3840, 2160, PerfQuality::Balanced)?;
//! let create_parameters = SuperSamplingCreateParameters::from(settings);
//! let mut feature = system.create_super_sampling_feature(
//!     command_buffer,
//!     &create_parameters,
//!     &first_frame_parameters,
//! )?;
//!
//! // Once per frame:
//! system.evaluate(command_buffer, feature.handle(), &evaluation_parameters, &FeatureParameters::new())?;
//!
//! // Only once the GPU has finished every submission referencing the feature:
//! system.release_feature(feature.handle_mut())?;
//! ```
//!
//! ## Threading and GPU lifetime
//!
//! This crate adds no locking and no synchronisation:
//!
//! - a command list/buffer must be recorded by one thread at a time, so
//!   concurrent evaluations into the *same* recording context are undefined
//!   behaviour, exactly as they are for the native API;
//! - evaluations of one feature from several recording contexts are ordered
//!   by queue submission, not by call order here;
//! - evaluation only records work. Destroying a feature while recorded work
//!   referencing it hasn't finished on the GPU is a bug in the caller: this
//!   crate can't observe GPU completion, the engine must wait for it (fence,
//!   idle queue) before calling `release_feature`.
#![deny(missing_docs)]

pub mod ngx;

#[cfg(feature = "dx")]
pub mod dx;
#[cfg(feature = "vk")]
pub mod vk;

pub use ngx_runtime as runtime;
pub use ngx_runtime::{Error, Result};
