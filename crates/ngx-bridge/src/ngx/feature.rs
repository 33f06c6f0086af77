//! The feature parameter dictionary.

use ngx_runtime::{names, Error, ParameterType, ParameterValue, Parameters, Resource, Result};

/// A type alias for a feature parameter name, like
/// [`ngx_runtime::names::SUPER_SAMPLING_AVAILABLE`].
pub type FeatureParameterName = str;

/// Inserts a parameter into the debug map.
#[macro_export]
macro_rules! insert_parameter_debug {
    ($map:ident, $parameters:ident, ($key:path, bool),) => {
        if let Ok(value) = $parameters.get_bool($key) {
            $map.insert($key.to_owned(), format!("{:?}", value));
        }
    };
    ($map:ident, $parameters:ident, ($key:path, i32),) => {
        if let Ok(value) = $parameters.get_i32($key) {
            $map.insert($key.to_owned(), format!("{:?}", value));
        }
    };
    ($map:ident, $parameters:ident, ($key:path, u32),) => {
        if let Ok(value) = $parameters.get_u32($key) {
            $map.insert($key.to_owned(), format!("{:?}", value));
        }
    };
    ($map:ident, $parameters:ident, ($key:path, f32),) => {
        if let Ok(value) = $parameters.get_f32($key) {
            $map.insert($key.to_owned(), format!("{:?}", value));
        }
    };
    ($map:ident, $parameters:ident, ($key:path, $typ:ident), $(($next_key:path, $next_type:ident)),+,) => {
        $crate::insert_parameter_debug!($map, $parameters, ($key, $typ),);
        $crate::insert_parameter_debug!($map, $parameters, $(($next_key, $next_type)),+,);
    };
}

/// Feature parameters is a collection of parameters of a feature (ha!).
///
/// It is the only configuration channel into feature creation, evaluation
/// and the capability query. A value can only be read back with the type it
/// was written with; anything else is a [`Error::TypeMismatch`].
///
/// A dictionary configures a single call. Nothing in this crate keeps it
/// after that call returns.
#[derive(Clone, Default)]
pub struct FeatureParameters(pub(crate) Parameters);

impl std::fmt::Debug for FeatureParameters {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::collections::BTreeMap;

        let mut map = BTreeMap::new();
        let parameters = self;
        insert_parameter_debug!(
            map,
            parameters,
            (names::SUPER_SAMPLING_AVAILABLE, bool),
            (names::SUPER_SAMPLING_NEEDS_UPDATED_DRIVER, bool),
            (names::SUPER_SAMPLING_FEATURE_INIT_RESULT, bool),
            (names::RAY_RECONSTRUCTION_AVAILABLE, bool),
            (names::RAY_RECONSTRUCTION_NEEDS_UPDATED_DRIVER, bool),
            (names::RAY_RECONSTRUCTION_FEATURE_INIT_RESULT, bool),
            (names::WIDTH, u32),
            (names::HEIGHT, u32),
            (names::OUT_WIDTH, u32),
            (names::OUT_HEIGHT, u32),
            (names::PERF_QUALITY_VALUE, i32),
            (names::FEATURE_CREATE_FLAGS, i32),
            (names::SHARPNESS, f32),
        );

        fmt.debug_struct("FeatureParameters")
            .field("len", &self.0.len())
            .field("parameters", &map)
            .finish()
    }
}

impl From<Parameters> for FeatureParameters {
    fn from(value: Parameters) -> Self {
        Self(value)
    }
}

impl FeatureParameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying parameter block, as the runtime sees it.
    pub fn as_parameters(&self) -> &Parameters {
        &self.0
    }

    /// Sets a raw tagged value, overwriting whatever was stored before.
    pub fn set(&mut self, name: &FeatureParameterName, value: ParameterValue) {
        self.0.set(name, value);
    }

    /// Returns the raw tagged value, checking its type.
    pub fn get(&self, name: &FeatureParameterName, expected: ParameterType) -> Result<ParameterValue> {
        self.0.get(name, expected)
    }

    /// Returns [`true`] if the parameter named `name` is set.
    pub fn contains(&self, name: &FeatureParameterName) -> bool {
        self.0.contains(name)
    }

    /// Removes the parameter named `name`.
    pub fn remove(&mut self, name: &FeatureParameterName) -> Option<ParameterValue> {
        self.0.remove(name)
    }

    /// Copies every entry of `other` over this set.
    pub fn extend_from(&mut self, other: &FeatureParameters) {
        for (name, value) in other.0.iter() {
            self.0.set(name, *value);
        }
    }

    /// Sets the value for the parameter named `name` to be a
    /// type-erased (`void *`) pointer.
    pub fn set_ptr<T>(&mut self, name: &FeatureParameterName, ptr: *mut T) {
        self.set(name, ParameterValue::Pointer(ptr.cast()));
    }

    /// Returns a type-erased pointer associated with the provided
    /// `name`.
    pub fn get_ptr(&self, name: &FeatureParameterName) -> Result<*mut std::ffi::c_void> {
        match self.get(name, ParameterType::Pointer)? {
            ParameterValue::Pointer(ptr) => Ok(ptr),
            _ => unreachable!("the type was checked"),
        }
    }

    /// Sets a GPU resource for the parameter named `name`.
    pub fn set_resource(&mut self, name: &FeatureParameterName, resource: impl Into<Resource>) {
        self.set(name, ParameterValue::Resource(resource.into()));
    }

    /// Returns the GPU resource of a parameter named `name`.
    pub fn get_resource(&self, name: &FeatureParameterName) -> Result<Resource> {
        match self.get(name, ParameterType::Resource)? {
            ParameterValue::Resource(resource) => Ok(resource),
            _ => unreachable!("the type was checked"),
        }
    }

    /// Sets an [`bool`] value for the parameter named `name`. The
    /// [`bool`] type isn't supported in NGX, but the semantics - are. The
    /// boolean values are stored as integers with value `1` being
    /// `true` and `0` being `false`.
    pub fn set_bool(&mut self, name: &FeatureParameterName, value: bool) {
        self.set_i32(name, if value { 1 } else { 0 });
    }

    /// Returns a [`bool`] value of a parameter named `name`.
    /// The [`bool`] type isn't supported in NGX, but the semantics - are.
    /// The boolean values are stored as integers with value `1` being
    /// `true` and `0` being `false`.
    pub fn get_bool(&self, name: &FeatureParameterName) -> Result<bool> {
        self.get_i32(name).map(|value| value == 1)
    }

    /// Sets an [`f32`] value for the parameter named `name`.
    pub fn set_f32(&mut self, name: &FeatureParameterName, value: f32) {
        self.set(name, ParameterValue::Float32(value));
    }

    /// Returns a [`f32`] value of a parameter named `name`.
    pub fn get_f32(&self, name: &FeatureParameterName) -> Result<f32> {
        match self.get(name, ParameterType::Float32)? {
            ParameterValue::Float32(value) => Ok(value),
            _ => unreachable!("the type was checked"),
        }
    }

    /// Sets an [`u32`] value for the parameter named `name`.
    pub fn set_u32(&mut self, name: &FeatureParameterName, value: u32) {
        self.set(name, ParameterValue::UInt32(value));
    }

    /// Returns a [`u32`] value of a parameter named `name`.
    pub fn get_u32(&self, name: &FeatureParameterName) -> Result<u32> {
        match self.get(name, ParameterType::UInt32)? {
            ParameterValue::UInt32(value) => Ok(value),
            _ => unreachable!("the type was checked"),
        }
    }

    /// Sets an [`i32`] value for the parameter named `name`.
    pub fn set_i32(&mut self, name: &FeatureParameterName, value: i32) {
        self.set(name, ParameterValue::Int32(value));
    }

    /// Returns a [`i32`] value of a parameter named `name`.
    pub fn get_i32(&self, name: &FeatureParameterName) -> Result<i32> {
        match self.get(name, ParameterType::Int32)? {
            ParameterValue::Int32(value) => Ok(value),
            _ => unreachable!("the type was checked"),
        }
    }

    /// Returns [`Ok`] if the parameters claim to support the
    /// super sampling feature ([`names::SUPER_SAMPLING_AVAILABLE`]).
    pub fn supports_super_sampling(&self) -> Result<()> {
        if self.get_bool(names::SUPER_SAMPLING_NEEDS_UPDATED_DRIVER)? {
            let major = self.get_u32(names::SUPER_SAMPLING_MIN_DRIVER_VERSION_MAJOR)?;
            let minor = self.get_u32(names::SUPER_SAMPLING_MIN_DRIVER_VERSION_MINOR)?;
            return Err(Error::UnsupportedFeature(format!("The SuperSampling feature requires a driver update. The driver version required should be higher or equal to {major}.{minor}")));
        }
        match self.get_bool(names::SUPER_SAMPLING_AVAILABLE) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::UnsupportedFeature(
                "The SuperSampling feature isn't supported on this platform.".to_string(),
            )),
            Err(e) => Err(e),
        }
    }

    /// Returns [`Ok`] if the parameters claim to support the
    /// ray reconstruction feature ([`names::RAY_RECONSTRUCTION_AVAILABLE`]).
    pub fn supports_ray_reconstruction(&self) -> Result<()> {
        if self.get_bool(names::RAY_RECONSTRUCTION_NEEDS_UPDATED_DRIVER)? {
            let major = self.get_u32(names::RAY_RECONSTRUCTION_MIN_DRIVER_VERSION_MAJOR)?;
            let minor = self.get_u32(names::RAY_RECONSTRUCTION_MIN_DRIVER_VERSION_MINOR)?;
            return Err(Error::UnsupportedFeature(format!("The Ray Reconstruction feature requires a driver update. The driver version required should be higher or equal to {major}.{minor}")));
        }
        match self.get_bool(names::RAY_RECONSTRUCTION_AVAILABLE) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::UnsupportedFeature(
                "The Ray Reconstruction feature isn't supported on this platform.".to_string(),
            )),
            Err(e) => Err(e),
        }
    }

    /// Returns [`true`] if the SuperSampling feature is initialised
    /// correctly.
    pub fn is_super_sampling_initialised(&self) -> bool {
        self.get_bool(names::SUPER_SAMPLING_FEATURE_INIT_RESULT)
            .unwrap_or(false)
    }

    /// Returns [`true`] if the Ray Reconstruction feature is initialised
    /// correctly.
    pub fn is_ray_reconstruction_initialised(&self) -> bool {
        self.get_bool(names::RAY_RECONSTRUCTION_FEATURE_INIT_RESULT)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn typed_round_trip_and_mismatch() {
        let mut parameters = FeatureParameters::new();
        parameters.set_f32("sharpness", 0.6);

        assert_eq!(parameters.get_f32("sharpness"), Ok(0.6));
        assert!(matches!(
            parameters.get_i32("sharpness"),
            Err(Error::TypeMismatch {
                stored: ParameterType::Float32,
                requested: ParameterType::Int32,
                ..
            })
        ));
        assert_eq!(
            parameters.get_u32("missing"),
            Err(Error::KeyNotFound("missing".to_owned()))
        );
    }

    #[test]
    fn booleans_are_stored_as_integers() {
        let mut parameters = FeatureParameters::new();
        parameters.set_bool(names::RESET, true);
        assert_eq!(parameters.get_i32(names::RESET), Ok(1));
        assert_eq!(parameters.get_bool(names::RESET), Ok(true));
        parameters.set_bool(names::RESET, false);
        assert_eq!(parameters.get_bool(names::RESET), Ok(false));
    }

    #[test]
    fn pointers() {
        let mut value = 42u64;
        let mut parameters = FeatureParameters::new();
        parameters.set_ptr("Custom.Pointer", &mut value as *mut u64);
        assert_eq!(
            parameters.get_ptr("Custom.Pointer").unwrap(),
            (&mut value as *mut u64).cast()
        );
        assert!(parameters.get_resource("Custom.Pointer").is_err());
    }

    #[test]
    fn extend_overwrites() {
        let mut base = FeatureParameters::new();
        base.set_u32(names::WIDTH, 1);
        base.set_u32(names::HEIGHT, 2);
        let mut other = FeatureParameters::new();
        other.set_u32(names::WIDTH, 10);

        base.extend_from(&other);
        assert_eq!(base.get_u32(names::WIDTH), Ok(10));
        assert_eq!(base.get_u32(names::HEIGHT), Ok(2));
    }

    #[test]
    fn capability_checks() {
        let mut parameters = FeatureParameters::new();
        parameters.set_bool(names::SUPER_SAMPLING_NEEDS_UPDATED_DRIVER, false);
        parameters.set_bool(names::SUPER_SAMPLING_AVAILABLE, true);
        assert!(parameters.supports_super_sampling().is_ok());

        parameters.set_bool(names::RAY_RECONSTRUCTION_NEEDS_UPDATED_DRIVER, true);
        parameters.set_u32(names::RAY_RECONSTRUCTION_MIN_DRIVER_VERSION_MAJOR, 535);
        parameters.set_u32(names::RAY_RECONSTRUCTION_MIN_DRIVER_VERSION_MINOR, 98);
        match parameters.supports_ray_reconstruction() {
            Err(Error::UnsupportedFeature(message)) => assert!(message.contains("535.98")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!parameters.is_ray_reconstruction_initialised());
    }

    #[test]
    fn insert_parameter_debug_macro() {
        let mut map = HashMap::new();
        let mut parameters = FeatureParameters::new();
        parameters.set_u32(names::WIDTH, 1280);
        parameters.set_f32(names::SHARPNESS, 0.25);
        crate::insert_parameter_debug!(
            map,
            parameters,
            (names::WIDTH, u32),
            (names::SHARPNESS, f32),
            (names::HEIGHT, u32),
        );

        assert_eq!(map.get(names::WIDTH).map(String::as_str), Some("1280"));
        assert_eq!(map.get(names::SHARPNESS).map(String::as_str), Some("0.25"));
        assert!(!map.contains_key(names::HEIGHT));
    }
}
