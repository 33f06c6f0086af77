//! Entry points of the command-list (Direct3D 12) flavour of the runtime.
//!
//! Graphics objects are passed as opaque COM pointers; this crate never
//! dereferences them. They are `Send` and `Sync`: the runtime owns the
//! thread-safety of the objects behind them.

use std::ffi::c_void;

use crate::{ApplicationInfo, FeatureKind, Parameters, RawHandle, Status};

macro_rules! opaque_pointer {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub *mut c_void);

        impl $name {
            /// A null pointer.
            pub const fn null() -> Self {
                Self(std::ptr::null_mut())
            }

            /// Returns [`true`] if the pointer is null.
            pub fn is_null(&self) -> bool {
                self.0.is_null()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::null()
            }
        }

        unsafe impl Send for $name {}
        unsafe impl Sync for $name {}
    };
}

opaque_pointer!(
    /// An `ID3D12Device *`.
    D3D12Device
);
opaque_pointer!(
    /// An `ID3D12GraphicsCommandList *`.
    CommandList
);
opaque_pointer!(
    /// An `ID3D12Resource *`.
    D3D12Resource
);

/// The command-list flavour of the runtime.
///
/// The device a feature lives on is implied by the command list it is
/// created with. Node masks are forwarded untouched; the runtime alone
/// validates them.
pub trait CommandListRuntime {
    /// `NVSDK_NGX_D3D12_Init_with_ProjectID`.
    fn init(&self, info: &ApplicationInfo, device: D3D12Device) -> Status;

    /// `NVSDK_NGX_D3D12_Shutdown1`.
    fn shutdown(&self, device: D3D12Device) -> Status;

    /// `NVSDK_NGX_D3D12_GetCapabilityParameters`.
    fn get_capability_parameters(&self, out_parameters: &mut Parameters) -> Status;

    /// `NVSDK_NGX_D3D12_GetScratchBufferSize`.
    fn get_scratch_buffer_size(
        &self,
        feature: FeatureKind,
        parameters: &Parameters,
        out_size_in_bytes: &mut usize,
    ) -> Status;

    /// `NGX_D3D12_CREATE_DLSS_EXT` / `NGX_D3D12_CREATE_DLSSD_EXT`.
    fn create_feature(
        &self,
        command_list: CommandList,
        creation_node_mask: u32,
        visibility_node_mask: u32,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status;

    /// `NGX_D3D12_EVALUATE_DLSS_EXT` / `NGX_D3D12_EVALUATE_DLSSD_EXT`.
    fn evaluate_feature(
        &self,
        command_list: CommandList,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status;

    /// `NVSDK_NGX_D3D12_ReleaseFeature`.
    fn release_feature(&self, handle: RawHandle) -> Status;
}

impl<T: CommandListRuntime + ?Sized> CommandListRuntime for &T {
    fn init(&self, info: &ApplicationInfo, device: D3D12Device) -> Status {
        (**self).init(info, device)
    }

    fn shutdown(&self, device: D3D12Device) -> Status {
        (**self).shutdown(device)
    }

    fn get_capability_parameters(&self, out_parameters: &mut Parameters) -> Status {
        (**self).get_capability_parameters(out_parameters)
    }

    fn get_scratch_buffer_size(
        &self,
        feature: FeatureKind,
        parameters: &Parameters,
        out_size_in_bytes: &mut usize,
    ) -> Status {
        (**self).get_scratch_buffer_size(feature, parameters, out_size_in_bytes)
    }

    fn create_feature(
        &self,
        command_list: CommandList,
        creation_node_mask: u32,
        visibility_node_mask: u32,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status {
        (**self).create_feature(
            command_list,
            creation_node_mask,
            visibility_node_mask,
            feature,
            parameters,
            out_handle,
        )
    }

    fn evaluate_feature(
        &self,
        command_list: CommandList,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status {
        (**self).evaluate_feature(command_list, handle, parameters)
    }

    fn release_feature(&self, handle: RawHandle) -> Status {
        (**self).release_feature(handle)
    }
}
