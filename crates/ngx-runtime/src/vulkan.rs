//! Entry points of the command-buffer (Vulkan) flavour of the runtime.

use ash::vk;

use crate::{ApplicationInfo, FeatureKind, Parameters, RawHandle, Status};

/// Image view information. Mirrors `NVSDK_NGX_ImageViewInfo_VK`.
#[derive(Debug, Default, Copy, Clone)]
pub struct ImageViewInfo {
    /// The image view.
    pub image_view: vk::ImageView,
    /// The image.
    pub image: vk::Image,
    /// The subresource range.
    pub subresource_range: vk::ImageSubresourceRange,
    /// The format.
    pub format: vk::Format,
    /// The width of the image.
    pub width: u32,
    /// The height of the image.
    pub height: u32,
}

/// Buffer information. Mirrors `NVSDK_NGX_BufferInfo_VK`.
#[derive(Debug, Default, Copy, Clone)]
pub struct BufferInfo {
    /// The buffer.
    pub buffer: vk::Buffer,
    /// The size of the buffer in bytes.
    pub size_in_bytes: u32,
}

/// What a [`VkResource`] points at.
#[derive(Debug, Copy, Clone)]
pub enum VkResourceInfo {
    /// An image view.
    ImageView(ImageViewInfo),
    /// A buffer.
    Buffer(BufferInfo),
}

impl Default for VkResourceInfo {
    fn default() -> Self {
        Self::ImageView(ImageViewInfo::default())
    }
}

/// A Vulkan resource. Mirrors `NVSDK_NGX_Resource_VK`.
#[derive(Debug, Default, Copy, Clone)]
pub struct VkResource {
    /// The resource.
    pub info: VkResourceInfo,
    /// Whether the runtime may write to the resource.
    pub read_write: bool,
}

impl VkResource {
    /// Returns [`true`] if the resource has no underlying Vulkan object.
    pub fn is_null(&self) -> bool {
        match &self.info {
            VkResourceInfo::ImageView(info) => {
                info.image_view == vk::ImageView::null() || info.image == vk::Image::null()
            }
            VkResourceInfo::Buffer(info) => info.buffer == vk::Buffer::null(),
        }
    }
}

/// The command-buffer flavour of the runtime.
///
/// Unlike the command-list flavour, every feature creation names the
/// logical device explicitly, next to the command buffer.
pub trait CommandBufferRuntime {
    /// `NVSDK_NGX_VULKAN_RequiredExtensions`.
    fn required_extensions(
        &self,
        out_instance_extensions: &mut Vec<String>,
        out_device_extensions: &mut Vec<String>,
    ) -> Status;

    /// `NVSDK_NGX_VULKAN_Init_with_ProjectID`.
    fn init(
        &self,
        info: &ApplicationInfo,
        instance: vk::Instance,
        physical_device: vk::PhysicalDevice,
        device: vk::Device,
    ) -> Status;

    /// `NVSDK_NGX_VULKAN_Shutdown1`.
    fn shutdown(&self, device: vk::Device) -> Status;

    /// `NVSDK_NGX_VULKAN_GetCapabilityParameters`.
    fn get_capability_parameters(&self, out_parameters: &mut Parameters) -> Status;

    /// `NVSDK_NGX_VULKAN_GetScratchBufferSize`.
    fn get_scratch_buffer_size(
        &self,
        feature: FeatureKind,
        parameters: &Parameters,
        out_size_in_bytes: &mut usize,
    ) -> Status;

    /// `NGX_VULKAN_CREATE_DLSS_EXT1` / `NGX_VULKAN_CREATE_DLSSD_EXT1`.
    #[allow(clippy::too_many_arguments)]
    fn create_feature(
        &self,
        device: vk::Device,
        command_buffer: vk::CommandBuffer,
        creation_node_mask: u32,
        visibility_node_mask: u32,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status;

    /// `NGX_VULKAN_EVALUATE_DLSS_EXT` / `NGX_VULKAN_EVALUATE_DLSSD_EXT`.
    fn evaluate_feature(
        &self,
        command_buffer: vk::CommandBuffer,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status;

    /// `NVSDK_NGX_VULKAN_ReleaseFeature`.
    fn release_feature(&self, handle: RawHandle) -> Status;
}

impl<T: CommandBufferRuntime + ?Sized> CommandBufferRuntime for &T {
    fn required_extensions(
        &self,
        out_instance_extensions: &mut Vec<String>,
        out_device_extensions: &mut Vec<String>,
    ) -> Status {
        (**self).required_extensions(out_instance_extensions, out_device_extensions)
    }

    fn init(
        &self,
        info: &ApplicationInfo,
        instance: vk::Instance,
        physical_device: vk::PhysicalDevice,
        device: vk::Device,
    ) -> Status {
        (**self).init(info, instance, physical_device, device)
    }

    fn shutdown(&self, device: vk::Device) -> Status {
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

    #[allow(clippy::too_many_arguments)]
    fn create_feature(
        &self,
        device: vk::Device,
        command_buffer: vk::CommandBuffer,
        creation_node_mask: u32,
        visibility_node_mask: u32,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status {
        (**self).create_feature(
            device,
            command_buffer,
            creation_node_mask,
            visibility_node_mask,
            feature,
            parameters,
            out_handle,
        )
    }

    fn evaluate_feature(
        &self,
        command_buffer: vk::CommandBuffer,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status {
        (**self).evaluate_feature(command_buffer, handle, parameters)
    }

    fn release_feature(&self, handle: RawHandle) -> Status {
        (**self).release_feature(handle)
    }
}

#[cfg(test)]
mod tests {
    use ash::vk::{self, Handle as _};

    use super::*;

    #[test]
    fn null_resources() {
        assert!(VkResource::default().is_null());

        let image = VkResource {
            info: VkResourceInfo::ImageView(ImageViewInfo {
                image_view: vk::ImageView::from_raw(1),
                image: vk::Image::from_raw(2),
                ..Default::default()
            }),
            read_write: false,
        };
        assert!(!image.is_null());

        let buffer = VkResource {
            info: VkResourceInfo::Buffer(BufferInfo::default()),
            read_write: true,
        };
        assert!(buffer.is_null());
    }
}
