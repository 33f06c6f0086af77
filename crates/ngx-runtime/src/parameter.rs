//! The runtime's parameter block: string keys mapped onto tagged values.
//!
//! A value is always read back with the type it was written with. Reading
//! it with any other type is an error, never a coercion.

use std::collections::HashMap;

use crate::{directx::D3D12Resource, vulkan::VkResource, BackendKind, Error, Result};

/// A GPU resource referenced by a parameter.
#[derive(Debug, Copy, Clone)]
pub enum Resource {
    /// A command-buffer (Vulkan) resource.
    Vulkan(VkResource),
    /// A command-list (Direct3D 12) resource.
    D3D12(D3D12Resource),
}

impl Resource {
    /// The backend this resource belongs to.
    pub fn backend(&self) -> BackendKind {
        match self {
            Resource::Vulkan(_) => BackendKind::CommandBuffer,
            Resource::D3D12(_) => BackendKind::CommandList,
        }
    }

    /// Returns [`true`] if the resource doesn't reference anything.
    pub fn is_null(&self) -> bool {
        match self {
            Resource::Vulkan(resource) => resource.is_null(),
            Resource::D3D12(resource) => resource.is_null(),
        }
    }
}

impl From<VkResource> for Resource {
    fn from(value: VkResource) -> Self {
        Self::Vulkan(value)
    }
}

impl From<D3D12Resource> for Resource {
    fn from(value: D3D12Resource) -> Self {
        Self::D3D12(value)
    }
}

/// The type tag of a [`ParameterValue`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// A signed 32-bit integer.
    Int32,
    /// An unsigned 32-bit integer.
    UInt32,
    /// A 32-bit float.
    Float32,
    /// A type-erased pointer.
    Pointer,
    /// A GPU resource.
    Resource,
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ParameterType::Int32 => "Int32",
            ParameterType::UInt32 => "UInt32",
            ParameterType::Float32 => "Float32",
            ParameterType::Pointer => "Pointer",
            ParameterType::Resource => "Resource",
        })
    }
}

/// A single tagged parameter value. The set of variants is closed.
#[derive(Debug, Copy, Clone)]
pub enum ParameterValue {
    /// A signed 32-bit integer, also used for booleans (`0`/`1`).
    Int32(i32),
    /// An unsigned 32-bit integer.
    UInt32(u32),
    /// A 32-bit float.
    Float32(f32),
    /// A type-erased (`void *`) pointer.
    Pointer(*mut std::ffi::c_void),
    /// A GPU resource.
    Resource(Resource),
}

// The pointer is opaque here, whoever sets it owns what it points at.
unsafe impl Send for ParameterValue {}
unsafe impl Sync for ParameterValue {}

impl ParameterValue {
    /// The type tag of this value.
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            ParameterValue::Int32(_) => ParameterType::Int32,
            ParameterValue::UInt32(_) => ParameterType::UInt32,
            ParameterValue::Float32(_) => ParameterType::Float32,
            ParameterValue::Pointer(_) => ParameterType::Pointer,
            ParameterValue::Resource(_) => ParameterType::Resource,
        }
    }
}

/// The parameter block. Mirrors `NVSDK_NGX_Parameter`.
///
/// Entries have no order. Setting a key overwrites whatever was stored
/// under it before, whatever its type.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: HashMap<String, ParameterValue>,
}

impl Parameters {
    /// Creates an empty parameter block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, returning the previous value.
    pub fn set(&mut self, name: &str, value: ParameterValue) -> Option<ParameterValue> {
        self.values.insert(name.to_owned(), value)
    }

    /// Returns the value stored under `name`, provided it was written with
    /// the `expected` type.
    pub fn get(&self, name: &str, expected: ParameterType) -> Result<ParameterValue> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| Error::KeyNotFound(name.to_owned()))?;

        let stored = value.parameter_type();
        if stored != expected {
            return Err(Error::TypeMismatch {
                name: name.to_owned(),
                stored,
                requested: expected,
            });
        }

        Ok(*value)
    }

    /// Returns the type the value under `name` was written with.
    pub fn type_of(&self, name: &str) -> Option<ParameterType> {
        self.values.get(name).map(ParameterValue::parameter_type)
    }

    /// Returns [`true`] if there is a value stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Removes the value stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        self.values.remove(name)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns [`true`] if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all the entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_regardless_of_type() {
        let mut parameters = Parameters::new();
        assert!(parameters.set("Width", ParameterValue::UInt32(1920)).is_none());
        let previous = parameters.set("Width", ParameterValue::Int32(-1));
        assert!(matches!(previous, Some(ParameterValue::UInt32(1920))));
        assert_eq!(parameters.type_of("Width"), Some(ParameterType::Int32));
        assert_eq!(parameters.len(), 1);
    }

    #[test]
    fn get_checks_the_type() {
        let mut parameters = Parameters::new();
        parameters.set("Sharpness", ParameterValue::Float32(0.6));

        assert!(matches!(
            parameters.get("Sharpness", ParameterType::Float32),
            Ok(ParameterValue::Float32(v)) if v == 0.6
        ));
        assert_eq!(
            parameters.get("Sharpness", ParameterType::Int32).unwrap_err(),
            Error::TypeMismatch {
                name: "Sharpness".to_owned(),
                stored: ParameterType::Float32,
                requested: ParameterType::Int32,
            }
        );
    }

    #[test]
    fn missing_keys() {
        let parameters = Parameters::new();
        assert_eq!(
            parameters.get("Reset", ParameterType::Int32).unwrap_err(),
            Error::KeyNotFound("Reset".to_owned())
        );
        assert!(parameters.is_empty());
    }

    #[test]
    fn null_resources() {
        let resource = Resource::from(D3D12Resource::null());
        assert!(resource.is_null());
        assert_eq!(resource.backend(), BackendKind::CommandList);
        assert!(Resource::from(VkResource::default()).is_null());
    }

    #[test]
    fn parameters_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parameters>();
        assert_send_sync::<Resource>();

        let mut parameters = Parameters::new();
        parameters.set("Color", ParameterValue::Resource(D3D12Resource::null().into()));
        let handle = std::thread::spawn(move || parameters.contains("Color"));
        assert!(handle.join().unwrap());
    }
}
