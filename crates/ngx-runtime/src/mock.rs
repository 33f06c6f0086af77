//! An in-process stand-in for the runtime, recording every call it gets.
//!
//! It implements both runtime flavours and keeps just enough state to
//! behave like the real thing at the lifecycle level: it has to be
//! initialised, refuses features the capability parameters say are
//! unavailable, hands out unique handles and forgets them on release.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use ash::vk;

use crate::{
    directx::{CommandList, CommandListRuntime, D3D12Device},
    names,
    vulkan::CommandBufferRuntime,
    ApplicationInfo, BackendKind, FeatureKind, ParameterValue, Parameters, RawHandle, Status,
};

/// A call received by the [`MockRuntime`].
#[derive(Debug, Clone)]
pub enum Call {
    /// The runtime was initialised.
    Init {
        /// Through which flavour.
        backend: BackendKind,
        /// The project id it was initialised with.
        project_id: String,
    },
    /// The runtime was shut down.
    Shutdown {
        /// Through which flavour.
        backend: BackendKind,
    },
    /// A feature creation.
    Create {
        /// Through which flavour.
        backend: BackendKind,
        /// The requested feature.
        feature: FeatureKind,
        /// The creation node mask, as received.
        creation_node_mask: u32,
        /// The visibility node mask, as received.
        visibility_node_mask: u32,
        /// A copy of the parameters received.
        parameters: Parameters,
    },
    /// A feature evaluation.
    Evaluate {
        /// Through which flavour.
        backend: BackendKind,
        /// The handle evaluated.
        handle: RawHandle,
        /// A copy of the parameters received.
        parameters: Parameters,
    },
    /// A feature release.
    Release {
        /// Through which flavour.
        backend: BackendKind,
        /// The handle released.
        handle: RawHandle,
    },
}

/// A feature the mock runtime currently holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockFeature {
    /// The flavour it was created through.
    pub backend: BackendKind,
    /// The feature variant.
    pub feature: FeatureKind,
}

/// The mock runtime. It can be shared between threads, every call is
/// serialised on one lock.
#[derive(Debug)]
pub struct MockRuntime {
    state: Mutex<MockState>,
}

#[derive(Debug)]
struct MockState {
    capabilities: Parameters,
    initialised: bool,
    next_id: u32,
    next_create_status: Option<Status>,
    next_evaluate_status: Option<Status>,
    scratch_buffer_size: usize,
    features: HashMap<RawHandle, MockFeature>,
    calls: Vec<Call>,
}

impl MockState {
    fn record(&mut self, call: Call) {
        log::trace!("Mock runtime call: {call:?}");
        self.calls.push(call);
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRuntime {
    /// A runtime supporting both Super Sampling and Ray Reconstruction.
    pub fn new() -> Self {
        let mut capabilities = Parameters::new();
        for name in [
            names::SUPER_SAMPLING_AVAILABLE,
            names::RAY_RECONSTRUCTION_AVAILABLE,
            names::SUPER_SAMPLING_FEATURE_INIT_RESULT,
            names::RAY_RECONSTRUCTION_FEATURE_INIT_RESULT,
        ] {
            capabilities.set(name, ParameterValue::Int32(1));
        }
        for name in [
            names::SUPER_SAMPLING_NEEDS_UPDATED_DRIVER,
            names::RAY_RECONSTRUCTION_NEEDS_UPDATED_DRIVER,
        ] {
            capabilities.set(name, ParameterValue::Int32(0));
        }

        Self {
            state: Mutex::new(MockState {
                capabilities,
                initialised: false,
                next_id: 1,
                next_create_status: None,
                next_evaluate_status: None,
                scratch_buffer_size: 0,
                features: HashMap::new(),
                calls: Vec::new(),
            }),
        }
    }

    // A test panicking while holding the lock mustn't hide the state from
    // the others.
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Overrides a capability parameter.
    pub fn set_capability(&self, name: &str, value: ParameterValue) {
        self.state().capabilities.set(name, value);
    }

    /// Marks a feature as unavailable on this "system".
    pub fn disable(&self, feature: FeatureKind) {
        self.set_capability(available_key(feature), ParameterValue::Int32(0));
    }

    /// Makes the next creation fail with `status`.
    pub fn fail_next_create(&self, status: Status) {
        self.state().next_create_status = Some(status);
    }

    /// Makes the next evaluation fail with `status`.
    pub fn fail_next_evaluate(&self, status: Status) {
        self.state().next_evaluate_status = Some(status);
    }

    /// Sets the scratch buffer size reported for every feature.
    pub fn set_scratch_buffer_size(&self, size: usize) {
        self.state().scratch_buffer_size = size;
    }

    /// Returns [`true`] between a successful init and shutdown.
    pub fn is_initialised(&self) -> bool {
        self.state().initialised
    }

    /// All the calls received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// The features currently alive.
    pub fn live_features(&self) -> HashMap<RawHandle, MockFeature> {
        self.state().features.clone()
    }

    fn init_common(&self, backend: BackendKind, info: &ApplicationInfo) -> Status {
        let mut state = self.state();
        state.record(Call::Init {
            backend,
            project_id: info.project_id.to_string_lossy().into_owned(),
        });
        state.initialised = true;
        Status::Success
    }

    fn shutdown_common(&self, backend: BackendKind) -> Status {
        let mut state = self.state();
        state.record(Call::Shutdown { backend });
        if !std::mem::replace(&mut state.initialised, false) {
            return Status::NotInitialized;
        }
        Status::Success
    }

    fn capability_parameters_common(&self, out_parameters: &mut Parameters) -> Status {
        let state = self.state();
        if !state.initialised {
            return Status::NotInitialized;
        }
        *out_parameters = state.capabilities.clone();
        Status::Success
    }

    fn scratch_buffer_size_common(&self, out_size_in_bytes: &mut usize) -> Status {
        let state = self.state();
        if !state.initialised {
            return Status::NotInitialized;
        }
        *out_size_in_bytes = state.scratch_buffer_size;
        Status::Success
    }

    fn create_common(
        &self,
        backend: BackendKind,
        creation_node_mask: u32,
        visibility_node_mask: u32,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status {
        let mut state = self.state();
        state.record(Call::Create {
            backend,
            feature,
            creation_node_mask,
            visibility_node_mask,
            parameters: parameters.clone(),
        });

        if !state.initialised {
            return Status::NotInitialized;
        }
        let available = matches!(
            state
                .capabilities
                .get(available_key(feature), crate::ParameterType::Int32),
            Ok(ParameterValue::Int32(1))
        );
        if !available {
            return Status::FeatureNotSupported;
        }
        if let Some(status) = state.next_create_status.take() {
            return status;
        }

        let id = state.next_id;
        state.next_id += 1;
        *out_handle = RawHandle(id);
        state
            .features
            .insert(*out_handle, MockFeature { backend, feature });
        Status::Success
    }

    fn evaluate_common(
        &self,
        backend: BackendKind,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status {
        let mut state = self.state();
        state.record(Call::Evaluate {
            backend,
            handle,
            parameters: parameters.clone(),
        });

        if !state.initialised {
            return Status::NotInitialized;
        }
        match state.features.get(&handle) {
            Some(feature) if feature.backend == backend => {}
            _ => return Status::FeatureNotFound,
        }
        state.next_evaluate_status.take().unwrap_or(Status::Success)
    }

    fn release_common(&self, backend: BackendKind, handle: RawHandle) -> Status {
        let mut state = self.state();
        state.record(Call::Release { backend, handle });

        match state.features.remove(&handle) {
            Some(_) => Status::Success,
            None => Status::FeatureNotFound,
        }
    }
}

fn available_key(feature: FeatureKind) -> &'static str {
    match feature {
        FeatureKind::SuperSampling => names::SUPER_SAMPLING_AVAILABLE,
        FeatureKind::RayReconstruction => names::RAY_RECONSTRUCTION_AVAILABLE,
    }
}

impl CommandListRuntime for MockRuntime {
    fn init(&self, info: &ApplicationInfo, _device: D3D12Device) -> Status {
        self.init_common(BackendKind::CommandList, info)
    }

    fn shutdown(&self, _device: D3D12Device) -> Status {
        self.shutdown_common(BackendKind::CommandList)
    }

    fn get_capability_parameters(&self, out_parameters: &mut Parameters) -> Status {
        self.capability_parameters_common(out_parameters)
    }

    fn get_scratch_buffer_size(
        &self,
        _feature: FeatureKind,
        _parameters: &Parameters,
        out_size_in_bytes: &mut usize,
    ) -> Status {
        self.scratch_buffer_size_common(out_size_in_bytes)
    }

    fn create_feature(
        &self,
        _command_list: CommandList,
        creation_node_mask: u32,
        visibility_node_mask: u32,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status {
        self.create_common(
            BackendKind::CommandList,
            creation_node_mask,
            visibility_node_mask,
            feature,
            parameters,
            out_handle,
        )
    }

    fn evaluate_feature(
        &self,
        _command_list: CommandList,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status {
        self.evaluate_common(BackendKind::CommandList, handle, parameters)
    }

    fn release_feature(&self, handle: RawHandle) -> Status {
        self.release_common(BackendKind::CommandList, handle)
    }
}

impl CommandBufferRuntime for MockRuntime {
    fn required_extensions(
        &self,
        out_instance_extensions: &mut Vec<String>,
        out_device_extensions: &mut Vec<String>,
    ) -> Status {
        *out_instance_extensions = vec![
            "VK_KHR_get_physical_device_properties2".to_owned(),
            "VK_KHR_external_memory_capabilities".to_owned(),
        ];
        *out_device_extensions = vec![
            "VK_NVX_binary_import".to_owned(),
            "VK_NVX_image_view_handle".to_owned(),
            "VK_KHR_push_descriptor".to_owned(),
        ];
        Status::Success
    }

    fn init(
        &self,
        info: &ApplicationInfo,
        _instance: vk::Instance,
        _physical_device: vk::PhysicalDevice,
        _device: vk::Device,
    ) -> Status {
        self.init_common(BackendKind::CommandBuffer, info)
    }

    fn shutdown(&self, _device: vk::Device) -> Status {
        self.shutdown_common(BackendKind::CommandBuffer)
    }

    fn get_capability_parameters(&self, out_parameters: &mut Parameters) -> Status {
        self.capability_parameters_common(out_parameters)
    }

    fn get_scratch_buffer_size(
        &self,
        _feature: FeatureKind,
        _parameters: &Parameters,
        out_size_in_bytes: &mut usize,
    ) -> Status {
        self.scratch_buffer_size_common(out_size_in_bytes)
    }

    fn create_feature(
        &self,
        _device: vk::Device,
        _command_buffer: vk::CommandBuffer,
        creation_node_mask: u32,
        visibility_node_mask: u32,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status {
        self.create_common(
            BackendKind::CommandBuffer,
            creation_node_mask,
            visibility_node_mask,
            feature,
            parameters,
            out_handle,
        )
    }

    fn evaluate_feature(
        &self,
        _command_buffer: vk::CommandBuffer,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status {
        self.evaluate_common(BackendKind::CommandBuffer, handle, parameters)
    }

    fn release_feature(&self, handle: RawHandle) -> Status {
        self.release_common(BackendKind::CommandBuffer, handle)
    }
}
