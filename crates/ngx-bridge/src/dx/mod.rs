//! The command-list (Direct3D 12 style) backend.
//!
//! The device a feature is created on is implied by the command list, and
//! creation takes a pair of multi-adapter node masks. The masks are
//! forwarded as they are: only the runtime knows which combinations are
//! valid.

use std::sync::atomic::{AtomicUsize, Ordering};

use ngx_runtime::{
    directx::CommandListRuntime, BackendKind, FeatureKind, NodeMasks, Parameters, PerfQuality,
    RawHandle, Result, Status,
};

pub use ngx_runtime::directx::{CommandList, D3D12Device, D3D12Resource};

use crate::ngx::{
    self, Backend, EvaluationParameters, Feature, FeatureHandle, FeatureParameters,
    OptimalSettings, RayReconstructionCreateParameters, SuperSamplingCreateParameters,
    SystemDescriptor,
};

/// NVIDIA NGX system, initialised on a Direct3D 12 device.
///
/// The runtime is shut down when the system is dropped. Every feature
/// created through the system has to be released before that.
///
/// The system is `Sync` whenever its runtime is, so one system can be used
/// by every thread recording command lists; recording into one command
/// list is still done by a single thread at a time.
#[derive(Debug)]
pub struct System<R: CommandListRuntime> {
    runtime: R,
    device: D3D12Device,
    descriptor: SystemDescriptor,
    live_features: AtomicUsize,
}

impl<R: CommandListRuntime> System<R> {
    /// Creates a new NVIDIA NGX system.
    pub fn new(
        runtime: R,
        mut descriptor: SystemDescriptor,
        device: D3D12Device,
    ) -> Result<Self> {
        descriptor.resolve_project_id();
        let info = descriptor.application_info()?;
        log::debug!(
            "Initialising the command-list runtime for {:?} on {device:?}",
            info.project_id
        );
        Result::from(runtime.init(&info, device))?;

        Ok(Self {
            runtime,
            device,
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

    /// Returns the device the system was initialised on.
    pub fn device(&self) -> D3D12Device {
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

    /// Creates a new feature, recording its initialisation into the
    /// `command_list`.
    pub fn create_feature(
        &self,
        command_list: CommandList,
        node_masks: NodeMasks,
        feature: FeatureKind,
        parameters: &FeatureParameters,
    ) -> Result<FeatureHandle> {
        ngx::create(self, command_list, node_masks, feature, parameters)
    }

    /// Creates a supersampling (or "DLSS") feature.
    pub fn create_super_sampling_feature(
        &self,
        command_list: CommandList,
        node_masks: NodeMasks,
        create_parameters: &SuperSamplingCreateParameters,
        resources: &EvaluationParameters,
    ) -> Result<Feature> {
        ngx::create_with(
            self,
            command_list,
            node_masks,
            create_parameters,
            resources,
            &FeatureParameters::new(),
        )
    }

    /// Creates a ray reconstruction feature.
    pub fn create_ray_reconstruction_feature(
        &self,
        command_list: CommandList,
        node_masks: NodeMasks,
        create_parameters: &RayReconstructionCreateParameters,
        resources: &EvaluationParameters,
    ) -> Result<Feature> {
        ngx::create_with(
            self,
            command_list,
            node_masks,
            create_parameters,
            resources,
            &FeatureParameters::new(),
        )
    }

    /// Records the evaluation of a feature into the `command_list`.
    pub fn evaluate_feature(
        &self,
        command_list: CommandList,
        handle: &FeatureHandle,
        parameters: &FeatureParameters,
    ) -> Result {
        ngx::evaluate(self, command_list, handle, parameters)
    }

    /// Records the evaluation of a feature into the `command_list`, with
    /// typed evaluation parameters on top of `extra`.
    pub fn evaluate(
        &self,
        command_list: CommandList,
        handle: &FeatureHandle,
        evaluation_parameters: &EvaluationParameters,
        extra: &FeatureParameters,
    ) -> Result {
        ngx::evaluate_with(self, command_list, handle, evaluation_parameters, extra)
    }

    /// Releases a feature. The GPU must be done with every submission
    /// referencing it.
    pub fn release_feature(&self, handle: &mut FeatureHandle) -> Result {
        ngx::destroy(self, handle)
    }
}

impl<R: CommandListRuntime> Backend for System<R> {
    const KIND: BackendKind = BackendKind::CommandList;
    type RecordingContext = CommandList;

    fn create_raw(
        &self,
        recording_context: CommandList,
        node_masks: NodeMasks,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status {
        let status = self.runtime.create_feature(
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
        recording_context: CommandList,
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
}

impl<R: CommandListRuntime> Drop for System<R> {
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
