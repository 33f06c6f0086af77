//! The Ray Reconstruction feature.

use derive_builder::Builder;
use ngx_runtime::{
    names, DenoiseMode, DepthType, DlssFeatureFlags, FeatureKind, PerfQuality, RoughnessMode,
};

use super::{
    super_sampling::write_common_create_parameters, FeatureCreateParameters, FeatureParameters,
    OptimalSettings,
};

/// Create parameters for the Ray Reconstruction feature.
///
/// Ray Reconstruction reads the normals and roughness guide buffers on top
/// of what Super Sampling reads, even when the roughness is packed into the
/// normals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Builder)]
pub struct RayReconstructionCreateParameters {
    /// The width the engine renders at.
    pub render_width: u32,
    /// The height the engine renders at.
    pub render_height: u32,
    /// The width the feature upscales to.
    pub target_width: u32,
    /// The height the feature upscales to.
    pub target_height: u32,
    /// The quality level, left to the runtime when unset.
    #[builder(default, setter(strip_option))]
    pub quality: Option<PerfQuality>,
    /// The feature flags.
    #[builder(default)]
    pub flags: DlssFeatureFlags,
    /// Whether the output may be a subrectangle of the output resource.
    #[builder(default)]
    pub enable_output_subrects: bool,
    /// The denoiser mode.
    #[builder(default)]
    pub denoise_mode: DenoiseMode,
    /// How the roughness is supplied.
    #[builder(default)]
    pub roughness_mode: RoughnessMode,
    /// The kind of depth supplied.
    #[builder(default)]
    pub depth_type: DepthType,
}

impl RayReconstructionCreateParameters {
    /// Creates a new set of create parameters for the Ray Reconstruction
    /// feature.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        render_width: u32,
        render_height: u32,
        target_width: u32,
        target_height: u32,
        quality: Option<PerfQuality>,
        denoise_mode: Option<DenoiseMode>,
        roughness_mode: Option<RoughnessMode>,
        depth_type: Option<DepthType>,
    ) -> Self {
        Self {
            render_width,
            render_height,
            target_width,
            target_height,
            quality,
            flags: DlssFeatureFlags::empty(),
            enable_output_subrects: false,
            denoise_mode: denoise_mode.unwrap_or_default(),
            roughness_mode: roughness_mode.unwrap_or_default(),
            depth_type: depth_type.unwrap_or_default(),
        }
    }
}

impl From<OptimalSettings> for RayReconstructionCreateParameters {
    fn from(value: OptimalSettings) -> Self {
        Self::new(
            value.render_width,
            value.render_height,
            value.target_width,
            value.target_height,
            Some(value.desired_quality_level),
            None,
            None,
            None,
        )
    }
}

impl FeatureCreateParameters for RayReconstructionCreateParameters {
    fn feature(&self) -> FeatureKind {
        FeatureKind::RayReconstruction
    }

    fn write(&self, parameters: &mut FeatureParameters) {
        write_common_create_parameters(
            parameters,
            self.rendering_resolution(),
            self.target_resolution(),
            self.quality,
            self.flags,
            self.enable_output_subrects,
        );
        parameters.set_i32(names::DENOISE_MODE, self.denoise_mode as i32);
        parameters.set_i32(names::ROUGHNESS_MODE, self.roughness_mode as i32);
        parameters.set_i32(names::USE_HW_DEPTH, self.depth_type as i32);
    }

    fn rendering_resolution(&self) -> [u32; 2] {
        [self.render_width, self.render_height]
    }

    fn target_resolution(&self) -> [u32; 2] {
        [self.target_width, self.target_height]
    }
}
