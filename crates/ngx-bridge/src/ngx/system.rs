//! What a runtime is initialised with.

use std::path::PathBuf;

use derive_builder::Builder;
use ngx_runtime::{ApplicationInfo, EngineType, Error, Result};

use super::DeviceLimits;

/// Describes the application to the runtime. Passed to the `System::new`
/// of either backend.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct SystemDescriptor {
    /// The project id. A random one is generated when unset.
    #[builder(default, setter(strip_option))]
    pub project_id: Option<uuid::Uuid>,
    /// The engine type.
    #[builder(default)]
    pub engine_type: EngineType,
    /// The engine version.
    pub engine_version: String,
    /// A folder the runtime writes its logs and temporary files to. Write
    /// access is required.
    pub application_data_path: PathBuf,
    /// The limits the optimal settings are resolved within.
    #[builder(default)]
    pub device_limits: DeviceLimits,
}

impl SystemDescriptor {
    /// Returns the project id, generating and storing a random one first
    /// when it is unset. The id stays the same from then on.
    pub fn resolve_project_id(&mut self) -> uuid::Uuid {
        *self.project_id.get_or_insert_with(uuid::Uuid::new_v4)
    }

    /// Converts the descriptor into what the runtime is initialised with.
    pub fn application_info(&self) -> Result<ApplicationInfo> {
        let project_id = self.project_id.unwrap_or_else(uuid::Uuid::new_v4);
        let project_id = std::ffi::CString::new(project_id.to_string())
            .map_err(|e| Error::InvalidParameter(format!("The project id is invalid: {e}")))?;
        let engine_version = std::ffi::CString::new(self.engine_version.as_str()).map_err(|e| {
            Error::InvalidParameter(format!("The engine version is invalid: {e}"))
        })?;
        let application_data_path =
            widestring::WideCString::from_os_str(self.application_data_path.as_os_str()).map_err(
                |e| Error::InvalidParameter(format!("The application data path is invalid: {e}")),
            )?;

        Ok(ApplicationInfo {
            project_id,
            engine_type: self.engine_type,
            engine_version,
            application_data_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let descriptor = SystemDescriptorBuilder::default()
            .engine_version("0.1.0")
            .application_data_path("/tmp/ngx")
            .build()
            .unwrap();
        assert!(descriptor.project_id.is_none());
        assert_eq!(descriptor.engine_type, EngineType::Custom);
        assert_eq!(descriptor.device_limits, DeviceLimits::default());

        let first = descriptor.application_info().unwrap();
        let second = descriptor.application_info().unwrap();
        assert_ne!(first.project_id, second.project_id);
        assert!(uuid::Uuid::parse_str(first.project_id.to_str().unwrap()).is_ok());
    }

    #[test]
    fn resolved_project_id_is_stable() {
        let mut descriptor = SystemDescriptorBuilder::default()
            .engine_version("0.1.0")
            .application_data_path("/tmp/ngx")
            .build()
            .unwrap();
        let id = descriptor.resolve_project_id();
        assert_eq!(descriptor.project_id, Some(id));
        assert_eq!(descriptor.resolve_project_id(), id);

        let first = descriptor.application_info().unwrap();
        let second = descriptor.application_info().unwrap();
        assert_eq!(first.project_id, second.project_id);
        assert_eq!(first.project_id.to_str().unwrap(), id.to_string());
    }

    #[test]
    fn project_id_is_kept() {
        let id = uuid::Uuid::new_v4();
        let descriptor = SystemDescriptorBuilder::default()
            .project_id(id)
            .engine_type(EngineType::Unreal)
            .engine_version("5.3")
            .application_data_path("/tmp/ngx")
            .build()
            .unwrap();
        let info = descriptor.application_info().unwrap();
        assert_eq!(info.project_id.to_str().unwrap(), id.to_string());
        assert_eq!(info.engine_version.to_str().unwrap(), "5.3");
        assert_eq!(info.application_data_path.to_string_lossy(), "/tmp/ngx");
    }

    #[test]
    fn interior_nul_is_refused() {
        let descriptor = SystemDescriptorBuilder::default()
            .engine_version("1\0")
            .application_data_path("/tmp/ngx")
            .build()
            .unwrap();
        assert!(matches!(
            descriptor.application_info(),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn required_fields() {
        assert!(SystemDescriptorBuilder::default()
            .engine_version("1.0")
            .build()
            .is_err());
    }
}
