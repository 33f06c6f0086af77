//! Render resolutions for a display resolution and a quality level.

use ngx_runtime::{Error, PerfQuality, Result};

/// The largest render target the device accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeviceLimits {
    /// The maximum render width.
    pub max_render_width: u32,
    /// The maximum render height.
    pub max_render_height: u32,
}

impl Default for DeviceLimits {
    fn default() -> Self {
        Self {
            max_render_width: 16384,
            max_render_height: 16384,
        }
    }
}

impl DeviceLimits {
    /// Creates a new set of device limits.
    pub const fn new(max_render_width: u32, max_render_height: u32) -> Self {
        Self {
            max_render_width,
            max_render_height,
        }
    }
}

/// Per quality level scale factors, `min <= optimal <= max <= 1`.
#[derive(Debug, Copy, Clone, PartialEq)]
struct QualityScale {
    optimal: f64,
    min: f64,
    max: f64,
    sharpness: f32,
}

impl QualityScale {
    fn of(quality: PerfQuality) -> Self {
        const THIRD: f64 = 1.0 / 3.0;
        const TWO_THIRDS: f64 = 2.0 / 3.0;

        let (optimal, min, max, sharpness) = match quality {
            PerfQuality::MaxPerf => (0.5, THIRD, TWO_THIRDS, 0.15),
            PerfQuality::Balanced => (0.58, 0.5, TWO_THIRDS, 0.1),
            PerfQuality::MaxQuality => (TWO_THIRDS, 0.58, 0.77, 0.05),
            PerfQuality::UltraPerformance => (THIRD, THIRD, 0.5, 0.2),
            PerfQuality::UltraQuality => (0.77, TWO_THIRDS, 1.0, 0.0),
            PerfQuality::Dlaa => (1.0, 1.0, 1.0, 0.0),
        };
        Self {
            optimal,
            min,
            max,
            sharpness,
        }
    }
}

/// Rounds to the nearest even integer.
fn round_to_even(value: f64) -> u32 {
    ((value / 2.0).round() * 2.0) as u32
}

/// The largest even integer not above `value`.
const fn even_floor(value: u32) -> u32 {
    value & !1
}

/// Optimal settings for the upscaler based on the desired quality level
/// and display resolution.
///
/// Every dimension is even and at least `2`, and
/// `dynamic_min <= render <= dynamic_max` holds on both axes. The value
/// depends on its inputs only, so it can be cached by them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OptimalSettings {
    /// The render width which the renderer must render to before
    /// upscaling.
    pub render_width: u32,
    /// The render height which the renderer must render to before
    /// upscaling.
    pub render_height: u32,
    /// The smallest render width dynamic resolution may go down to.
    pub dynamic_min_render_width: u32,
    /// The largest render width dynamic resolution may go up to.
    pub dynamic_max_render_width: u32,
    /// The smallest render height dynamic resolution may go down to.
    pub dynamic_min_render_height: u32,
    /// The largest render height dynamic resolution may go up to.
    pub dynamic_max_render_height: u32,
    /// The default sharpness of the quality level. May be overridden.
    pub sharpness: f32,
    /// The requested quality level.
    pub desired_quality_level: PerfQuality,
    /// The target width desired, to which the feature will upscale to.
    pub target_width: u32,
    /// The target height desired, to which the feature will upscale to.
    pub target_height: u32,
}

impl OptimalSettings {
    /// Returns a set of optimal settings for the display resolution and
    /// quality level, within the device limits.
    ///
    /// Fails with [`Error::UnsupportedResolution`] when no consistent
    /// render resolution exists: a zero display resolution or limits too
    /// tight to fit even a `2x2` target.
    pub fn resolve(
        target_width: u32,
        target_height: u32,
        desired_quality_level: PerfQuality,
        limits: DeviceLimits,
    ) -> Result<Self> {
        if target_width == 0 || target_height == 0 {
            return Err(Error::UnsupportedResolution(format!(
                "The display resolution {target_width}x{target_height} is empty"
            )));
        }

        let width_bound = even_floor(target_width.min(limits.max_render_width));
        let height_bound = even_floor(target_height.min(limits.max_render_height));
        if width_bound < 2 || height_bound < 2 {
            return Err(Error::UnsupportedResolution(format!(
                "No even render resolution fits in {target_width}x{target_height} with {limits:?}"
            )));
        }

        let scale = QualityScale::of(desired_quality_level);
        let dimension =
            |display: u32, factor: f64, bound: u32| round_to_even(display as f64 * factor).clamp(2, bound);

        let settings = Self {
            render_width: dimension(target_width, scale.optimal, width_bound),
            render_height: dimension(target_height, scale.optimal, height_bound),
            dynamic_min_render_width: dimension(target_width, scale.min, width_bound),
            dynamic_max_render_width: dimension(target_width, scale.max, width_bound),
            dynamic_min_render_height: dimension(target_height, scale.min, height_bound),
            dynamic_max_render_height: dimension(target_height, scale.max, height_bound),
            sharpness: scale.sharpness,
            desired_quality_level,
            target_width,
            target_height,
        };

        if !settings.is_ordered() {
            return Err(Error::UnsupportedResolution(format!(
                "The requested quality level {desired_quality_level:?} has no consistent render resolution for {target_width}x{target_height}: {settings:?}"
            )));
        }

        log::trace!("Resolved {settings:?}");
        Ok(settings)
    }

    /// Returns [`true`] if `min <= optimal <= max` on both axes.
    pub fn is_ordered(&self) -> bool {
        self.dynamic_min_render_width <= self.render_width
            && self.render_width <= self.dynamic_max_render_width
            && self.dynamic_min_render_height <= self.render_height
            && self.render_height <= self.dynamic_max_render_height
    }

    /// Returns the rendering resolution.
    pub const fn get_rendering_resolution(&self) -> [u32; 2] {
        [self.render_width, self.render_height]
    }

    /// Returns the target resolution.
    pub const fn get_target_resolution(&self) -> [u32; 2] {
        [self.target_width, self.target_height]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimensions(settings: &OptimalSettings) -> [u32; 6] {
        [
            settings.render_width,
            settings.render_height,
            settings.dynamic_min_render_width,
            settings.dynamic_min_render_height,
            settings.dynamic_max_render_width,
            settings.dynamic_max_render_height,
        ]
    }

    #[test]
    fn balanced_4k() {
        let settings = OptimalSettings::resolve(
            3840,
            2160,
            PerfQuality::Balanced,
            DeviceLimits::new(3840, 2160),
        )
        .unwrap();
        assert_eq!(settings.get_rendering_resolution(), [2228, 1252]);
        assert!(settings.render_width < 3840 && settings.render_height < 2160);
        assert!(settings.is_ordered());
        assert_eq!(settings.get_target_resolution(), [3840, 2160]);
        assert_eq!(settings.sharpness, 0.1);
    }

    #[test]
    fn ultra_performance_vga() {
        let settings = OptimalSettings::resolve(
            640,
            480,
            PerfQuality::UltraPerformance,
            DeviceLimits::new(3840, 2160),
        )
        .unwrap();
        assert_eq!(settings.get_rendering_resolution(), [214, 160]);
        for dimension in dimensions(&settings) {
            assert!(dimension >= 2 && dimension % 2 == 0);
        }
    }

    #[test]
    fn dlaa_is_native() {
        let settings =
            OptimalSettings::resolve(1920, 1080, PerfQuality::Dlaa, DeviceLimits::default()).unwrap();
        assert_eq!(dimensions(&settings), [1920, 1080, 1920, 1080, 1920, 1080]);
    }

    #[test]
    fn every_level_is_even_ordered_and_bounded() {
        let limits = DeviceLimits::new(2560, 1440);
        for quality in PerfQuality::ALL {
            for (width, height) in [(2, 2), (3, 5), (7, 3), (640, 480), (1281, 721), (3840, 2160), (7680, 4320)] {
                let settings = OptimalSettings::resolve(width, height, quality, limits).unwrap();
                assert!(settings.is_ordered(), "{settings:?}");
                for dimension in dimensions(&settings) {
                    assert!(dimension >= 2, "{settings:?}");
                    assert_eq!(dimension % 2, 0, "{settings:?}");
                }
                assert!(settings.dynamic_max_render_width <= limits.max_render_width);
                assert!(settings.dynamic_max_render_height <= limits.max_render_height);
            }
        }
    }

    #[test]
    fn deterministic() {
        for quality in PerfQuality::ALL {
            let a = OptimalSettings::resolve(2560, 1440, quality, DeviceLimits::default());
            let b = OptimalSettings::resolve(2560, 1440, quality, DeviceLimits::default());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn unsupported_resolutions() {
        assert!(matches!(
            OptimalSettings::resolve(0, 1080, PerfQuality::Balanced, DeviceLimits::default()),
            Err(Error::UnsupportedResolution(_))
        ));
        assert!(matches!(
            OptimalSettings::resolve(1920, 1080, PerfQuality::Balanced, DeviceLimits::new(1, 1080)),
            Err(Error::UnsupportedResolution(_))
        ));
    }

    #[test]
    fn scales_are_ordered() {
        for quality in PerfQuality::ALL {
            let scale = QualityScale::of(quality);
            assert!(scale.min <= scale.optimal && scale.optimal <= scale.max && scale.max <= 1.0);
        }
    }
}
