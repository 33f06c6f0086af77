//! Features, backends, quality levels and the raw feature handle.

/// The graphics API flavour a feature was created through.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// A command-list API with explicit multi-adapter node masks
    /// (Direct3D 12 style).
    CommandList,
    /// A command-buffer API paired with an explicit logical device
    /// (Vulkan style).
    CommandBuffer,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BackendKind::CommandList => "command-list",
            BackendKind::CommandBuffer => "command-buffer",
        })
    }
}

/// The feature variants this layer knows how to drive.
/// Mirrors the relevant part of `NVSDK_NGX_Feature`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Super Sampling, or "DLSS".
    SuperSampling,
    /// Ray Reconstruction, or "DLSS-RR" (denoising super sampling).
    RayReconstruction,
}

impl FeatureKind {
    /// The raw `NVSDK_NGX_Feature` value.
    pub const fn as_raw(self) -> u32 {
        match self {
            FeatureKind::SuperSampling => 1,
            FeatureKind::RayReconstruction => 13,
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FeatureKind::SuperSampling => "SuperSampling",
            FeatureKind::RayReconstruction => "RayReconstruction",
        })
    }
}

/// The quality level requested from the upscaler.
/// Mirrors `NVSDK_NGX_PerfQuality_Value`.
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PerfQuality {
    /// The fastest, lowest quality level.
    MaxPerf = 0,
    /// The balanced quality level.
    Balanced = 1,
    /// The highest quality level that still upscales noticeably.
    MaxQuality = 2,
    /// Even faster than [`PerfQuality::MaxPerf`].
    UltraPerformance = 3,
    /// Even better looking than [`PerfQuality::MaxQuality`].
    UltraQuality = 4,
    /// Anti-aliasing only, rendered at the display resolution.
    Dlaa = 5,
}

impl PerfQuality {
    /// All the quality levels.
    pub const ALL: [PerfQuality; 6] = [
        PerfQuality::MaxPerf,
        PerfQuality::Balanced,
        PerfQuality::MaxQuality,
        PerfQuality::UltraPerformance,
        PerfQuality::UltraQuality,
        PerfQuality::Dlaa,
    ];

    /// The raw value written into the `PerfQualityValue` parameter.
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Converts the raw parameter value back.
    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|q| q.as_raw() == raw)
    }
}

bitflags::bitflags! {
    /// Flags used when creating a Super Sampling or Ray Reconstruction
    /// feature. Mirrors `NVSDK_NGX_DLSS_Feature_Flags`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct DlssFeatureFlags: i32 {
        /// The input color is in HDR.
        const IS_HDR = 1 << 0;
        /// Motion vectors are at the render resolution.
        const MV_LOW_RES = 1 << 1;
        /// Motion vectors already contain the jitter.
        const MV_JITTERED = 1 << 2;
        /// The depth buffer is inverted (1.0 is near).
        const DEPTH_INVERTED = 1 << 3;
        /// Apply sharpening to the output.
        const DO_SHARPENING = 1 << 5;
        /// Let the runtime compute the exposure itself.
        const AUTO_EXPOSURE = 1 << 6;
        /// Upscale the alpha channel as well.
        const ALPHA_UPSCALING = 1 << 7;
    }
}

/// Denoiser mode of the Ray Reconstruction feature.
#[repr(i32)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DenoiseMode {
    /// No denoising.
    Off = 0,
    /// The unified, learned denoiser.
    #[default]
    DlUnified = 1,
}

/// How the roughness guide buffer is supplied to Ray Reconstruction.
#[repr(i32)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RoughnessMode {
    /// Roughness is a separate texture.
    #[default]
    Unpacked = 0,
    /// Roughness lives in the alpha channel of the normals.
    Packed = 1,
}

/// The kind of depth supplied to Ray Reconstruction.
#[repr(i32)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DepthType {
    /// Linear view-space depth.
    #[default]
    Linear = 0,
    /// Hardware (post-projection) depth.
    Hardware = 1,
}

/// A raw feature handle as returned by the runtime. Mirrors
/// `NVSDK_NGX_Handle`, whose only member is the feature id. An id of zero
/// is never produced by a successful creation.
#[repr(transparent)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawHandle(pub u32);

impl RawHandle {
    /// The handle before the runtime filled it in.
    pub const NULL: RawHandle = RawHandle(0);

    /// Returns [`true`] if the runtime never filled this handle in.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Multi-adapter node masks passed on feature creation.
///
/// The creation mask selects which physical adapter(s) allocate the
/// feature's internal state, the visibility mask which adapter(s) may
/// reference it during evaluation. Validity of the pair is checked by the
/// runtime only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeMasks {
    /// The creation node mask.
    pub creation: u32,
    /// The visibility node mask.
    pub visibility: u32,
}

impl Default for NodeMasks {
    fn default() -> Self {
        Self::SINGLE_ADAPTER
    }
}

impl NodeMasks {
    /// Masks for a single-adapter configuration.
    pub const SINGLE_ADAPTER: NodeMasks = NodeMasks {
        creation: 1,
        visibility: 1,
    };
}

/// The engine type reported on initialisation. Mirrors
/// `NVSDK_NGX_EngineType`.
#[repr(i32)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EngineType {
    /// A custom engine.
    #[default]
    Custom = 0,
    /// Unreal Engine.
    Unreal = 1,
    /// Unity.
    Unity = 2,
    /// Omniverse.
    Omniverse = 3,
}

/// Application information handed to the runtime on initialisation.
#[derive(Debug, Clone)]
pub struct ApplicationInfo {
    /// The project id, a UUID in its textual form.
    pub project_id: std::ffi::CString,
    /// The engine type.
    pub engine_type: EngineType,
    /// The engine version.
    pub engine_version: std::ffi::CString,
    /// A folder the runtime writes its logs and temporary files to.
    pub application_data_path: widestring::WideCString,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perf_quality_raw_values_match_the_runtime() {
        assert_eq!(PerfQuality::MaxPerf.as_raw(), 0);
        assert_eq!(PerfQuality::Dlaa.as_raw(), 5);
        assert_eq!(PerfQuality::from_raw(3), Some(PerfQuality::UltraPerformance));
        assert_eq!(PerfQuality::from_raw(6), None);
    }

    #[test]
    fn feature_flags_bits() {
        let flags = DlssFeatureFlags::IS_HDR | DlssFeatureFlags::AUTO_EXPOSURE;
        assert_eq!(flags.bits(), 0b100_0001);
        assert!(DlssFeatureFlags::default().is_empty());
    }

    #[test]
    fn null_handle() {
        assert!(RawHandle::default().is_null());
        assert!(!RawHandle(7).is_null());
    }
}
