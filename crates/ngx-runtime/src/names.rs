//! Names of the parameters read and written by the runtime.
//!
//! The runtime's parameter schema evolves independently of this crate, so
//! the list is not exhaustive: any other key is passed through as is.

// Capabilities.

/// Whether Super Sampling is available on this system (`Int32`, boolean).
pub const SUPER_SAMPLING_AVAILABLE: &str = "SuperSampling.Available";
/// Whether Super Sampling needs a newer driver (`Int32`, boolean).
pub const SUPER_SAMPLING_NEEDS_UPDATED_DRIVER: &str = "SuperSampling.NeedsUpdatedDriver";
/// Minimum driver version, major part (`UInt32`).
pub const SUPER_SAMPLING_MIN_DRIVER_VERSION_MAJOR: &str = "SuperSampling.MinDriverVersionMajor";
/// Minimum driver version, minor part (`UInt32`).
pub const SUPER_SAMPLING_MIN_DRIVER_VERSION_MINOR: &str = "SuperSampling.MinDriverVersionMinor";
/// Whether Super Sampling initialised correctly (`Int32`, boolean).
pub const SUPER_SAMPLING_FEATURE_INIT_RESULT: &str = "SuperSampling.FeatureInitResult";
/// Whether Ray Reconstruction is available on this system (`Int32`, boolean).
pub const RAY_RECONSTRUCTION_AVAILABLE: &str = "SuperSamplingDenoising.Available";
/// Whether Ray Reconstruction needs a newer driver (`Int32`, boolean).
pub const RAY_RECONSTRUCTION_NEEDS_UPDATED_DRIVER: &str =
    "SuperSamplingDenoising.NeedsUpdatedDriver";
/// Minimum driver version, major part (`UInt32`).
pub const RAY_RECONSTRUCTION_MIN_DRIVER_VERSION_MAJOR: &str =
    "SuperSamplingDenoising.MinDriverVersionMajor";
/// Minimum driver version, minor part (`UInt32`).
pub const RAY_RECONSTRUCTION_MIN_DRIVER_VERSION_MINOR: &str =
    "SuperSamplingDenoising.MinDriverVersionMinor";
/// Whether Ray Reconstruction initialised correctly (`Int32`, boolean).
pub const RAY_RECONSTRUCTION_FEATURE_INIT_RESULT: &str =
    "SuperSamplingDenoising.FeatureInitResult";

// Creation.

/// Render width (`UInt32`).
pub const WIDTH: &str = "Width";
/// Render height (`UInt32`).
pub const HEIGHT: &str = "Height";
/// Output (target) width (`UInt32`).
pub const OUT_WIDTH: &str = "OutWidth";
/// Output (target) height (`UInt32`).
pub const OUT_HEIGHT: &str = "OutHeight";
/// The requested quality level (`Int32`).
pub const PERF_QUALITY_VALUE: &str = "PerfQualityValue";
/// Creation flags (`Int32`).
pub const FEATURE_CREATE_FLAGS: &str = "DLSS.Feature.Create.Flags";
/// Whether output subrects are used (`Int32`, boolean).
pub const ENABLE_OUTPUT_SUBRECTS: &str = "DLSS.Enable.Output.Subrects";
/// Ray Reconstruction denoiser mode (`Int32`).
pub const DENOISE_MODE: &str = "DLSS.Denoise.Mode";
/// Ray Reconstruction roughness mode (`Int32`).
pub const ROUGHNESS_MODE: &str = "DLSS.Roughness.Mode";
/// Ray Reconstruction depth type (`Int32`).
pub const USE_HW_DEPTH: &str = "DLSS.Use.HW.Depth";

// Evaluation.

/// The image to upscale (resource).
pub const COLOR: &str = "Color";
/// The upscaled image (resource).
pub const OUTPUT: &str = "Output";
/// The depth buffer (resource).
pub const DEPTH: &str = "Depth";
/// The motion vectors (resource).
pub const MOTION_VECTORS: &str = "MotionVectors";
/// The exposure texture (resource).
pub const EXPOSURE_TEXTURE: &str = "ExposureTexture";
/// The bias current color mask (resource).
pub const BIAS_CURRENT_COLOR_MASK: &str = "DLSS.Input.Bias.Current.Color.Mask";
/// Diffuse albedo guide (resource).
pub const DIFFUSE_ALBEDO: &str = "DiffuseAlbedo";
/// Specular albedo guide (resource).
pub const SPECULAR_ALBEDO: &str = "SpecularAlbedo";
/// Shading normals guide (resource).
pub const GBUFFER_NORMALS: &str = "GBuffer.Normals";
/// Linear roughness guide (resource).
pub const GBUFFER_ROUGHNESS: &str = "GBuffer.Roughness";
/// Specular motion vectors (resource).
pub const SPECULAR_MOTION_VECTORS: &str = "DLSSD.SpecularMotionVectors";
/// Transparent effects rendered apart from the color input (resource).
pub const TRANSPARENCY_LAYER: &str = "TransparencyLayer";
/// Output sharpness (`Float32`).
pub const SHARPNESS: &str = "Sharpness";
/// Jitter offset, x (`Float32`).
pub const JITTER_OFFSET_X: &str = "Jitter.Offset.X";
/// Jitter offset, y (`Float32`).
pub const JITTER_OFFSET_Y: &str = "Jitter.Offset.Y";
/// Resets temporal history (`Int32`, boolean).
pub const RESET: &str = "Reset";
/// Motion vector scale, x (`Float32`).
pub const MV_SCALE_X: &str = "MV.Scale.X";
/// Motion vector scale, y (`Float32`).
pub const MV_SCALE_Y: &str = "MV.Scale.Y";
/// Pre-exposure (`Float32`).
pub const PRE_EXPOSURE: &str = "DLSS.Pre.Exposure";
/// Exposure scale (`Float32`).
pub const EXPOSURE_SCALE: &str = "DLSS.Exposure.Scale";
/// Color subrect base, x (`UInt32`).
pub const COLOR_SUBRECT_BASE_X: &str = "DLSS.Input.Color.Subrect.Base.X";
/// Color subrect base, y (`UInt32`).
pub const COLOR_SUBRECT_BASE_Y: &str = "DLSS.Input.Color.Subrect.Base.Y";
/// Depth subrect base, x (`UInt32`).
pub const DEPTH_SUBRECT_BASE_X: &str = "DLSS.Input.Depth.Subrect.Base.X";
/// Depth subrect base, y (`UInt32`).
pub const DEPTH_SUBRECT_BASE_Y: &str = "DLSS.Input.Depth.Subrect.Base.Y";
/// Motion vectors subrect base, x (`UInt32`).
pub const MV_SUBRECT_BASE_X: &str = "DLSS.Input.MV.Subrect.Base.X";
/// Motion vectors subrect base, y (`UInt32`).
pub const MV_SUBRECT_BASE_Y: &str = "DLSS.Input.MV.Subrect.Base.Y";
/// Render subrect width (`UInt32`).
pub const RENDER_SUBRECT_WIDTH: &str = "DLSS.Render.Subrect.Dimensions.Width";
/// Render subrect height (`UInt32`).
pub const RENDER_SUBRECT_HEIGHT: &str = "DLSS.Render.Subrect.Dimensions.Height";

// Miscellaneous.

/// Size of the scratch buffer a feature needs (`UInt32`).
pub const SCRATCH_SIZE_IN_BYTES: &str = "ScratchSizeInBytes";
