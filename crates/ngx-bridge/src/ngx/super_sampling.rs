//! The Super Sampling feature.

use derive_builder::Builder;
use ngx_runtime::{names, DlssFeatureFlags, FeatureKind, PerfQuality};

use super::{FeatureCreateParameters, FeatureParameters, OptimalSettings};

/// Create parameters for the SuperSampling feature.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Builder)]
pub struct SuperSamplingCreateParameters {
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
}

impl SuperSamplingCreateParameters {
    /// Creates a new set of create parameters for the SuperSampling
    /// feature.
    pub fn new(
        render_width: u32,
        render_height: u32,
        target_width: u32,
        target_height: u32,
        quality: Option<PerfQuality>,
        flags: Option<DlssFeatureFlags>,
    ) -> Self {
        Self {
            render_width,
            render_height,
            target_width,
            target_height,
            quality,
            flags: flags.unwrap_or_default(),
            enable_output_subrects: false,
        }
    }
}

impl From<OptimalSettings> for SuperSamplingCreateParameters {
    fn from(value: OptimalSettings) -> Self {
        Self::new(
            value.render_width,
            value.render_height,
            value.target_width,
            value.target_height,
            Some(value.desired_quality_level),
            None,
        )
    }
}

/// Writes the creation keys shared by every variant.
pub(crate) fn write_common_create_parameters(
    parameters: &mut FeatureParameters,
    rendering_resolution: [u32; 2],
    target_resolution: [u32; 2],
    quality: Option<PerfQuality>,
    flags: DlssFeatureFlags,
    enable_output_subrects: bool,
) {
    parameters.set_u32(names::WIDTH, rendering_resolution[0]);
    parameters.set_u32(names::HEIGHT, rendering_resolution[1]);
    parameters.set_u32(names::OUT_WIDTH, target_resolution[0]);
    parameters.set_u32(names::OUT_HEIGHT, target_resolution[1]);
    if let Some(quality) = quality {
        parameters.set_i32(names::PERF_QUALITY_VALUE, quality.as_raw());
    }
    parameters.set_i32(names::FEATURE_CREATE_FLAGS, flags.bits());
    parameters.set_bool(names::ENABLE_OUTPUT_SUBRECTS, enable_output_subrects);
}

impl FeatureCreateParameters for SuperSamplingCreateParameters {
    fn feature(&self) -> FeatureKind {
        FeatureKind::SuperSampling
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
    }

    fn rendering_resolution(&self) -> [u32; 2] {
        [self.render_width, self.render_height]
    }

    fn target_resolution(&self) -> [u32; 2] {
        [self.target_width, self.target_height]
    }
}

#[cfg(test)]
mod tests {
    use crate::ngx::DeviceLimits;

    use super::*;

    #[test]
    fn from_optimal_settings() {
        let settings =
            OptimalSettings::resolve(1920, 1080, PerfQuality::MaxQuality, DeviceLimits::default())
                .unwrap();
        let parameters = SuperSamplingCreateParameters::from(settings);
        assert_eq!(parameters.rendering_resolution(), settings.get_rendering_resolution());
        assert_eq!(parameters.target_resolution(), [1920, 1080]);
        assert_eq!(parameters.quality, Some(PerfQuality::MaxQuality));
        assert!(parameters.flags.is_empty());
    }

    #[test]
    fn writes_the_creation_keys() {
        let create_parameters = SuperSamplingCreateParametersBuilder::default()
            .render_width(1280)
            .render_height(720)
            .target_width(2560)
            .target_height(1440)
            .quality(PerfQuality::MaxPerf)
            .flags(DlssFeatureFlags::IS_HDR | DlssFeatureFlags::MV_LOW_RES)
            .build()
            .unwrap();

        let mut parameters = FeatureParameters::new();
        create_parameters.write(&mut parameters);
        assert_eq!(parameters.get_u32(names::WIDTH), Ok(1280));
        assert_eq!(parameters.get_u32(names::HEIGHT), Ok(720));
        assert_eq!(parameters.get_u32(names::OUT_WIDTH), Ok(2560));
        assert_eq!(parameters.get_u32(names::OUT_HEIGHT), Ok(1440));
        assert_eq!(
            parameters.get_i32(names::PERF_QUALITY_VALUE),
            Ok(PerfQuality::MaxPerf.as_raw())
        );
        assert_eq!(parameters.get_i32(names::FEATURE_CREATE_FLAGS), Ok(0b11));
        assert_eq!(parameters.get_bool(names::ENABLE_OUTPUT_SUBRECTS), Ok(false));
    }

    #[test]
    fn the_builder_requires_dimensions() {
        assert!(SuperSamplingCreateParametersBuilder::default()
            .render_width(1280)
            .build()
            .is_err());
    }
}
