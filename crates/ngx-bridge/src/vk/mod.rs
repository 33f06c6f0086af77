//! The command-buffer (Vulkan) backend.
//!
//! Unlike the command-list backend, every creation names the logical device
//! explicitly, next to the command buffer the initialisation is recorded
//! into.

use std::sync::atomic::{AtomicUsize, Ordering};

use ash::vk;
use ngx_runtime::{
    vulkan::CommandBufferRuntime, BackendKind, Error, FeatureKind, NodeMasks, Parameters,
    PerfQuality, RawHandle, Result, Status,
};

use crate::ngx::{
    self, Backend, EvaluationParameters, Feature, FeatureHandle, FeatureParameters,
    OptimalSettings, RayReconstructionCreateParameters, SuperSamplingCreateParameters,
    SystemDescriptor,
};

pub mod resource;
pub use resource::*;

fn convert_slice_of_strings_to_cstrings(data: &[String]) -> Result<Vec<std::ffi::CString>> {
    data.iter()
        .cloned()
        .map(std::ffi::CString::new)
        .collect::<Result<_, _>>()
        .map_err(|_| Error::from("Couldn't convert the extensions to CStrings."))
}

/// Vulkan extensions required for the NVIDIA NGX operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredExtensions {
    /// Vulkan device extensions required for NVIDIA NGX.
    pub device: Vec<String>,
    /// Vulkan instance extensions required for NVIDIA NGX.
    pub instance: Vec<String>,
}

impl RequiredExtensions {
    /// Returns a list of device extensions as a list of
    /// [`std::ffi::CString`].
    pub fn get_device_extensions_c_strings(&self) -> Result<Vec<std::ffi::CString>> {
        convert_slice_of_strings_to_cstrings(&self.device)
    }

    /// Returns a list of instance extensions as a list of
    /// [`std::ffi::CString`].
    pub fn get_instance_extensions_c_strings(&self) -> Result<Vec<std::ffi::CString>> {
        convert_slice_of_strings_to_cstrings(&self.instance)
    }

    /// Returns a list of required vulkan extensions for NGX to work.
    /// Can be queried before the instance is even created.
    pub fn get<R: CommandBufferRuntime + ?Sized>(runtime: &R) -> Result<Self> {
        let mut instance = Vec::new();
        let mut device = Vec::new();
        Result::from(runtime.required_extensions(&mut instance, &mut device))?;
        Ok(Self { device, instance })
    }
}

/// NVIDIA NGX system, initialised on a Vulkan logical device.
///
/// The runtime is shut down when the system is dropped. Every feature
/// created through the system has to be released before that.
///
/// The system is `Sync` whenever its runtime is, so one system can be used
/// by every thread recording command buffers; recording into one command
/// buffer is still done by a single thread at a time.
#[derive(Debug)]
pub struct System<R: CommandBufferRuntime> {
    runtime: R,
    device: vk::Device,
    descriptor: SystemDescriptor,
    live_features: AtomicUsize,
}

impl<R: CommandBufferRuntime> System<R> {
    /// Creates a new NVIDIA NGX system.
    pub fn new(
        runtime: R,
        mut descriptor: SystemDescriptor,
        instance: vk::Instance,
        physical_device: vk::PhysicalDevice,
        logical_device: vk::Device,
    ) -> Result<Self> {
        descriptor.resolve_project_id();
        let info = descriptor.application_info()?;
        log::debug!(
            "Initialising the command-buffer runtime for {:?} on {logical_device:?}",
            info.project_id
        );
        Result::from(runtime.init(&info, instance, physical_device, logical_device))?;

        Ok(Self {
            runtime,
            device: logical_device,
            descriptor,
            live_features: AtomicUsize::new(0),
        })
    }

    fn shutdown(&self) -> Result {
        self.runtime.shutdown(self.device).into()
    }

    /// Returns the runtime.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Returns the descriptor the system was initialised with.
    pub fn descriptor(&self) -> &SystemDescriptor {
        &self.descriptor
    }

    /// Returns the logical device used to create this [`System`].
    pub fn device(&self) -> vk::Device {
        self.device
    }

    /// Returns the number of features created and not yet released.
    pub fn live_features(&self) -> usize {
        self.live_features.load(Ordering::Acquire)
    }

    fn feature_created(&self) {
        self.live_features.fetch_add(1, Ordering::AcqRel);
    }

    fn feature_released(&self) {
        let _ = self
            .live_features
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                Some(live.saturating_sub(1))
            });
    }

    /// Returns the capability parameters of the system.
    pub fn capability_parameters(&self) -> Result<FeatureParameters> {
        let mut parameters = Parameters::new();
        Result::from(self.runtime.get_capability_parameters(&mut parameters))?;
        Ok(parameters.into())
    }

    /// Returns the size of the scratch buffer a `feature` created with
    /// `parameters` needs.
    pub fn scratch_buffer_size(
        &self,
        feature: FeatureKind,
        parameters: &FeatureParameters,
    ) -> Result<usize> {
        let mut size = 0usize;
        Result::from(self.runtime.get_scratch_buffer_size(
            feature,
            parameters.as_parameters(),
            &mut size,
        ))?;
        Ok(size)
    }

    /// Returns the optimal settings for the display resolution and quality
    /// level, within the device limits of the descriptor.
    pub fn optimal_settings(
        &self,
        target_width: u32,
        target_height: u32,
        quality: PerfQuality,
    ) -> Result<OptimalSettings> {
        OptimalSettings::resolve(
            target_width,
            target_height,
            quality,
            self.descriptor.device_limits,
        )
    }

    /// Creates a new feature with the logical device used to create this
    /// [`System`], recording its initialisation into the `command_buffer`.
    pub fn create_feature(
        &self,
        command_buffer: vk::CommandBuffer,
        feature: FeatureKind,
        parameters: &FeatureParameters,
    ) -> Result<FeatureHandle> {
        ngx::create(
            self,
            command_buffer,
            NodeMasks::SINGLE_ADAPTER,
            feature,
            parameters,
        )
    }

    /// Creates a supersampling (or "DLSS") feature.
    pub fn create_super_sampling_feature(
        &self,
        command_buffer: vk::CommandBuffer,
        create_parameters: &SuperSamplingCreateParameters,
        resources: &EvaluationParameters,
    ) -> Result<Feature> {
        ngx::create_with(
            self,
            command_buffer,
            NodeMasks::SINGLE_ADAPTER,
            create_parameters,
            resources,
            &FeatureParameters::new(),
        )
    }

    /// Creates a ray reconstruction feature.
    pub fn create_ray_reconstruction_feature(
        &self,
        command_buffer: vk::CommandBuffer,
        create_parameters: &RayReconstructionCreateParameters,
        resources: &EvaluationParameters,
    ) -> Result<Feature> {
        ngx::create_with(
            self,
            command_buffer,
            NodeMasks::SINGLE_ADAPTER,
            create_parameters,
            resources,
            &FeatureParameters::new(),
        )
    }

    /// Records the evaluation of a feature into the `command_buffer`.
    pub fn evaluate_feature(
        &self,
        command_buffer: vk::CommandBuffer,
        handle: &FeatureHandle,
        parameters: &FeatureParameters,
    ) -> Result {
        ngx::evaluate(self, command_buffer, handle, parameters)
    }

    /// Records the evaluation of a feature into the `command_buffer`, with
    /// typed evaluation parameters on top of `extra`.
    pub fn evaluate(
        &self,
        command_buffer: vk::CommandBuffer,
        handle: &FeatureHandle,
        evaluation_parameters: &EvaluationParameters,
        extra: &FeatureParameters,
    ) -> Result {
        ngx::evaluate_with(self, command_buffer, handle, evaluation_parameters, extra)
    }

    /// Releases a feature. The GPU must be done with every submission
    /// referencing it.
    pub fn release_feature(&self, handle: &mut FeatureHandle) -> Result {
        ngx::destroy(self, handle)
    }
}

impl<R: CommandBufferRuntime> Backend for System<R> {
    const KIND: BackendKind = BackendKind::CommandBuffer;
    type RecordingContext = vk::CommandBuffer;

    fn create_raw(
        &self,
        recording_context: vk::CommandBuffer,
        node_masks: NodeMasks,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status {
        let status = self.runtime.create_feature(
            self.device,
            recording_context,
            node_masks.creation,
            node_masks.visibility,
            feature,
            parameters,
            out_handle,
        );
        if status.is_success() && !out_handle.is_null() {
            self.feature_created();
        }
        status
    }

    fn evaluate_raw(
        &self,
        recording_context: vk::CommandBuffer,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status {
        self.runtime
            .evaluate_feature(recording_context, handle, parameters)
    }

    fn release_raw(&self, handle: RawHandle) -> Status {
        let status = self.runtime.release_feature(handle);
        if status.is_success() {
            self.feature_released();
        }
        status
    }

    fn has_visibility_node_mask(&self) -> bool {
        false
    }
}

impl<R: CommandBufferRuntime> Drop for System<R> {
    fn drop(&mut self) {
        let live = self.live_features();
        if live > 0 {
            log::warn!("Shutting the NGX system down with {live} features still alive.");
        }
        if let Err(e) = self.shutdown() {
            log::error!("Couldn't shutdown the NGX system on {:?}: {e}", self.device);
        }
    }
}
