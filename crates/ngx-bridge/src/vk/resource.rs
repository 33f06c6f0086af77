//! Vulkan resource descriptions.

use ash::vk;
use ngx_runtime::{
    vulkan::{BufferInfo, ImageViewInfo, VkResource, VkResourceInfo},
    Resource,
};

/// A mode that a vulkan resource might have.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum VkResourceMode {
    /// Indicates that the resource can only be read.
    #[default]
    Readable,
    /// Indicates that the resource can be written to.
    Writable,
}

/// A buffer, as passed in the evaluation parameters.
#[derive(Debug, Default, Copy, Clone)]
pub struct VkBufferResourceDescription {
    /// The buffer!
    pub buffer: vk::Buffer,
    /// The size of the buffer in bytes.
    pub size_in_bytes: u32,
    /// The mode this resource has.
    pub mode: VkResourceMode,
}

/// An image view, as passed in the evaluation parameters.
#[derive(Debug, Default, Copy, Clone)]
pub struct VkImageResourceDescription {
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
    /// The mode this resource has.
    pub mode: VkResourceMode,
}

impl VkImageResourceDescription {
    /// Sets the writable bit. The output of an evaluation must be
    /// writable.
    pub fn set_writable(&mut self) {
        self.mode = VkResourceMode::Writable;
    }
}

impl From<VkImageResourceDescription> for VkResource {
    fn from(value: VkImageResourceDescription) -> Self {
        Self {
            info: VkResourceInfo::ImageView(ImageViewInfo {
                image_view: value.image_view,
                image: value.image,
                subresource_range: value.subresource_range,
                format: value.format,
                width: value.width,
                height: value.height,
            }),
            read_write: value.mode == VkResourceMode::Writable,
        }
    }
}

impl From<VkBufferResourceDescription> for VkResource {
    fn from(value: VkBufferResourceDescription) -> Self {
        Self {
            info: VkResourceInfo::Buffer(BufferInfo {
                buffer: value.buffer,
                size_in_bytes: value.size_in_bytes,
            }),
            read_write: value.mode == VkResourceMode::Writable,
        }
    }
}

impl From<VkImageResourceDescription> for Resource {
    fn from(value: VkImageResourceDescription) -> Self {
        Resource::Vulkan(value.into())
    }
}

impl From<VkBufferResourceDescription> for Resource {
    fn from(value: VkBufferResourceDescription) -> Self {
        Resource::Vulkan(value.into())
    }
}
