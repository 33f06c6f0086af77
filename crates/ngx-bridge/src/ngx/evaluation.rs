//! Per-frame evaluation parameters.
//!
//! The resources referenced here are only borrowed by the runtime for the
//! submission the evaluation is recorded into: they have to stay alive
//! until that submission completes on the GPU.

use ngx_runtime::{names, Resource};

use super::FeatureParameters;

/// Evaluation parameters of the Super Sampling and Ray Reconstruction
/// features.
///
/// Unset resources aren't written at all, so the feature can fall back to
/// whatever it does without them (or fail the evaluation if it needs them).
#[derive(Debug, Clone)]
pub struct EvaluationParameters {
    color_input: Option<Resource>,
    color_output: Option<Resource>,
    depth: Option<Resource>,
    motion_vectors: Option<Resource>,
    motion_vectors_scale: [f32; 2],
    exposure: Option<Resource>,
    pre_exposure: f32,
    exposure_scale: f32,
    bias_current_color_mask: Option<Resource>,
    diffuse_albedo: Option<Resource>,
    specular_albedo: Option<Resource>,
    normals: Option<Resource>,
    roughness: Option<Resource>,
    specular_motion_vectors: Option<Resource>,
    transparency_overlay: Option<Resource>,
    jitter_offsets: [f32; 2],
    reset: bool,
    sharpness: Option<f32>,
    rendering_dimensions: Option<([u32; 2], [u32; 2])>,
}

impl Default for EvaluationParameters {
    fn default() -> Self {
        Self {
            color_input: None,
            color_output: None,
            depth: None,
            motion_vectors: None,
            // 1.0f32 means no scaling (they are already in the pixel space).
            motion_vectors_scale: [1.0, 1.0],
            exposure: None,
            pre_exposure: 1.0,
            exposure_scale: 1.0,
            bias_current_color_mask: None,
            diffuse_albedo: None,
            specular_albedo: None,
            normals: None,
            roughness: None,
            specular_motion_vectors: None,
            transparency_overlay: None,
            jitter_offsets: [0.0, 0.0],
            reset: false,
            sharpness: None,
            rendering_dimensions: None,
        }
    }
}

impl EvaluationParameters {
    /// Creates a new, empty set of evaluation parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the color input parameter (the image to upscale).
    pub fn set_color_input(&mut self, resource: impl Into<Resource>) {
        self.color_input = Some(resource.into());
    }

    /// Sets the color output (the upscaled image).
    pub fn set_color_output(&mut self, resource: impl Into<Resource>) {
        self.color_output = Some(resource.into());
    }

    /// Sets the depth buffer.
    pub fn set_depth_buffer(&mut self, resource: impl Into<Resource>) {
        self.depth = Some(resource.into());
    }

    /// Sets the motion vectors.
    /// In case the `scale` argument is omitted, the `1.0f32` scaling is
    /// used.
    pub fn set_motion_vectors(&mut self, resource: impl Into<Resource>, scale: Option<[f32; 2]>) {
        self.motion_vectors = Some(resource.into());
        self.motion_vectors_scale = scale.unwrap_or([1.0, 1.0]);
    }

    /// Sets the exposure texture, a `1x1` texture the input color is
    /// divided by. Not needed with [`crate::ngx::DlssFeatureFlags::AUTO_EXPOSURE`].
    pub fn set_exposure(&mut self, resource: impl Into<Resource>) {
        self.exposure = Some(resource.into());
    }

    /// Sets the pre-exposure the input color was multiplied with and the
    /// exposure scale.
    pub fn set_exposure_values(&mut self, pre_exposure: f32, exposure_scale: f32) {
        self.pre_exposure = pre_exposure;
        self.exposure_scale = exposure_scale;
    }

    /// Sets the mask biasing the feature towards the current frame's color.
    pub fn set_bias_current_color_mask(&mut self, resource: impl Into<Resource>) {
        self.bias_current_color_mask = Some(resource.into());
    }

    /// Sets the **Diffuse Albedo**: the diffuse component of the
    /// reflectance material, at input resolution. Ray Reconstruction only.
    pub fn set_diffuse_albedo(&mut self, resource: impl Into<Resource>) {
        self.diffuse_albedo = Some(resource.into());
    }

    /// Sets the **Specular Albedo**: the specular component of the
    /// reflectance material, at input resolution. Ray Reconstruction only.
    pub fn set_specular_albedo(&mut self, resource: impl Into<Resource>) {
        self.specular_albedo = Some(resource.into());
    }

    /// Sets the **Shading Normals** (normalized, view or world space) at
    /// input resolution. Required by Ray Reconstruction.
    pub fn set_shading_normals(&mut self, resource: impl Into<Resource>) {
        self.normals = Some(resource.into());
    }

    /// Sets the **linear roughness** at input resolution. Required by Ray
    /// Reconstruction.
    ///
    /// When the roughness is packed into the alpha channel of the normals
    /// ([`crate::ngx::RoughnessMode::Packed`]), pass the normals here too.
    pub fn set_linear_roughness(&mut self, resource: impl Into<Resource>) {
        self.roughness = Some(resource.into());
    }

    /// Sets the **Specular Motion Vectors**, the motion of reflected
    /// geometry. Ray Reconstruction only.
    pub fn set_specular_motion_vectors(&mut self, resource: impl Into<Resource>) {
        self.specular_motion_vectors = Some(resource.into());
    }

    /// Sets the transparency overlay: particles and other transparent
    /// effects rendered into their own buffer instead of the color input.
    /// RGB is premultiplied with alpha, alpha is the blending factor.
    pub fn set_transparency_overlay(&mut self, resource: impl Into<Resource>) {
        self.transparency_overlay = Some(resource.into());
    }

    /// Sets the jitter offsets (like TAA).
    pub fn set_jitter_offsets(&mut self, x: f32, y: f32) {
        self.jitter_offsets = [x, y];
    }

    /// Sets/unsets the reset flag, dropping the temporal history.
    pub fn set_reset(&mut self, should_reset: bool) {
        self.reset = should_reset;
    }

    /// Overrides the sharpness.
    pub fn set_sharpness(&mut self, sharpness: f32) {
        self.sharpness = Some(sharpness);
    }

    /// Sets the rendering dimensions: the subrectangle of the inputs the
    /// engine rendered into.
    pub fn set_rendering_dimensions(&mut self, rendering_offset: [u32; 2], rendering_size: [u32; 2]) {
        self.rendering_dimensions = Some((rendering_offset, rendering_size));
    }

    /// Writes the evaluation keys into `parameters`, overwriting the ones
    /// already there.
    pub fn write_to(&self, parameters: &mut FeatureParameters) {
        let resources = [
            (names::COLOR, self.color_input),
            (names::OUTPUT, self.color_output),
            (names::DEPTH, self.depth),
            (names::MOTION_VECTORS, self.motion_vectors),
            (names::EXPOSURE_TEXTURE, self.exposure),
            (names::BIAS_CURRENT_COLOR_MASK, self.bias_current_color_mask),
            (names::DIFFUSE_ALBEDO, self.diffuse_albedo),
            (names::SPECULAR_ALBEDO, self.specular_albedo),
            (names::GBUFFER_NORMALS, self.normals),
            (names::GBUFFER_ROUGHNESS, self.roughness),
            (names::SPECULAR_MOTION_VECTORS, self.specular_motion_vectors),
            (names::TRANSPARENCY_LAYER, self.transparency_overlay),
        ];
        for (name, resource) in resources {
            if let Some(resource) = resource {
                parameters.set_resource(name, resource);
            }
        }

        parameters.set_f32(names::MV_SCALE_X, self.motion_vectors_scale[0]);
        parameters.set_f32(names::MV_SCALE_Y, self.motion_vectors_scale[1]);
        parameters.set_f32(names::PRE_EXPOSURE, self.pre_exposure);
        parameters.set_f32(names::EXPOSURE_SCALE, self.exposure_scale);
        parameters.set_f32(names::JITTER_OFFSET_X, self.jitter_offsets[0]);
        parameters.set_f32(names::JITTER_OFFSET_Y, self.jitter_offsets[1]);
        parameters.set_bool(names::RESET, self.reset);
        if let Some(sharpness) = self.sharpness {
            parameters.set_f32(names::SHARPNESS, sharpness);
        }

        if let Some((offset, size)) = self.rendering_dimensions {
            for (x, y) in [
                (names::COLOR_SUBRECT_BASE_X, names::COLOR_SUBRECT_BASE_Y),
                (names::DEPTH_SUBRECT_BASE_X, names::DEPTH_SUBRECT_BASE_Y),
                (names::MV_SUBRECT_BASE_X, names::MV_SUBRECT_BASE_Y),
            ] {
                parameters.set_u32(x, offset[0]);
                parameters.set_u32(y, offset[1]);
            }
            parameters.set_u32(names::RENDER_SUBRECT_WIDTH, size[0]);
            parameters.set_u32(names::RENDER_SUBRECT_HEIGHT, size[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use ngx_runtime::{directx::D3D12Resource, BackendKind, ParameterType};

    use super::*;

    fn resource(address: usize) -> D3D12Resource {
        D3D12Resource(address as *mut std::ffi::c_void)
    }

    #[test]
    fn only_set_resources_are_written() {
        let mut evaluation = EvaluationParameters::new();
        evaluation.set_color_input(resource(0x10));
        evaluation.set_color_output(resource(0x20));
        evaluation.set_motion_vectors(resource(0x30), None);

        let mut parameters = FeatureParameters::new();
        evaluation.write_to(&mut parameters);

        let color = parameters.get_resource(names::COLOR).unwrap();
        assert_eq!(color.backend(), BackendKind::CommandList);
        assert!(matches!(color, Resource::D3D12(r) if r == resource(0x10)));
        assert!(parameters.get_resource(names::OUTPUT).is_ok());
        assert!(!parameters.contains(names::DEPTH));
        assert!(!parameters.contains(names::GBUFFER_NORMALS));
        assert!(!parameters.contains(names::SHARPNESS));
        assert!(!parameters.contains(names::TRANSPARENCY_LAYER));
        assert_eq!(parameters.get_f32(names::MV_SCALE_X), Ok(1.0));
        assert_eq!(parameters.get_bool(names::RESET), Ok(false));
    }

    #[test]
    fn scalars() {
        let mut evaluation = EvaluationParameters::new();
        evaluation.set_motion_vectors(resource(0x30), Some([-1280.0, 720.0]));
        evaluation.set_jitter_offsets(0.25, -0.25);
        evaluation.set_reset(true);
        evaluation.set_sharpness(0.6);
        evaluation.set_rendering_dimensions([8, 16], [1280, 720]);

        let mut parameters = FeatureParameters::new();
        evaluation.write_to(&mut parameters);

        assert_eq!(parameters.get_f32(names::MV_SCALE_X), Ok(-1280.0));
        assert_eq!(parameters.get_f32(names::JITTER_OFFSET_Y), Ok(-0.25));
        assert_eq!(parameters.get_bool(names::RESET), Ok(true));
        assert_eq!(parameters.get_f32(names::SHARPNESS), Ok(0.6));
        assert_eq!(parameters.get_u32(names::DEPTH_SUBRECT_BASE_Y), Ok(16));
        assert_eq!(parameters.get_u32(names::RENDER_SUBRECT_WIDTH), Ok(1280));
        assert_eq!(
            parameters.as_parameters().type_of(names::MV_SUBRECT_BASE_X),
            Some(ParameterType::UInt32)
        );
    }

    #[test]
    fn transparency_overlay() {
        let mut evaluation = EvaluationParameters::new();
        evaluation.set_transparency_overlay(resource(0x90));

        let mut parameters = FeatureParameters::new();
        evaluation.write_to(&mut parameters);

        assert!(matches!(
            parameters.get_resource(names::TRANSPARENCY_LAYER),
            Ok(Resource::D3D12(r)) if r == resource(0x90)
        ));
    }
}
