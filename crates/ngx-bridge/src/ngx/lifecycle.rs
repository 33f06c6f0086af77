//! The feature lifecycle, shared by both backends.
//!
//! A feature moves through three states:
//!
//! ```text
//! Uninitialized --create--> Created --destroy--> Destroyed
//!                            |    ^
//!                            +----+ evaluate
//! ```
//!
//! The checks performed here are the only ones done locally: the handle
//! state, the backend tag carried by the handle, and the presence of the
//! fields each variant requires. Everything else is the runtime's job, and
//! its status is surfaced as is.

use ngx_runtime::{
    names, BackendKind, Error, FeatureKind, NodeMasks, Parameters, PerfQuality, RawHandle, Result,
    Status,
};

use super::{EvaluationParameters, FeatureParameters};

/// The dimensions a feature can't be created without.
const REQUIRED_DIMENSIONS: [&str; 4] = [names::WIDTH, names::HEIGHT, names::OUT_WIDTH, names::OUT_HEIGHT];

/// The resources every variant reads.
const SUPER_SAMPLING_RESOURCES: [&str; 4] = [
    names::COLOR,
    names::DEPTH,
    names::MOTION_VECTORS,
    names::OUTPUT,
];

/// The guide buffers Ray Reconstruction reads on top of
/// [`SUPER_SAMPLING_RESOURCES`].
const RAY_RECONSTRUCTION_GUIDES: [&str; 2] = [names::GBUFFER_NORMALS, names::GBUFFER_ROUGHNESS];

/// Returns the names of the resources the `feature` can't be created or
/// evaluated without.
pub fn required_resources(feature: FeatureKind) -> impl Iterator<Item = &'static str> {
    let guides: &'static [&'static str] = match feature {
        FeatureKind::SuperSampling => &[],
        FeatureKind::RayReconstruction => &RAY_RECONSTRUCTION_GUIDES,
    };
    SUPER_SAMPLING_RESOURCES.into_iter().chain(guides.iter().copied())
}

/// The lifecycle state of a [`FeatureHandle`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeatureState {
    /// Never created.
    #[default]
    Uninitialized,
    /// Created and not yet destroyed.
    Created,
    /// Destroyed. Nothing can be done with the handle anymore.
    Destroyed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct FeatureInfo {
    backend: BackendKind,
    feature: FeatureKind,
    creation_node_mask: u32,
    visibility_node_mask: Option<u32>,
}

/// An opaque handle to one created feature.
///
/// The handle is owned by the caller and can't be cloned, so there is never
/// a second reference to the same feature. It is tagged with the backend
/// that created it and can only be used through that backend.
///
/// Dropping a handle which is still [`FeatureState::Created`] leaks the
/// feature inside the runtime; a warning is logged when that happens.
#[derive(Debug, Default)]
pub struct FeatureHandle {
    raw: RawHandle,
    state: FeatureState,
    info: Option<FeatureInfo>,
}

impl FeatureHandle {
    /// Creates a handle which was never created. Using it for anything
    /// fails with [`Error::InvalidHandle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The lifecycle state.
    pub const fn state(&self) -> FeatureState {
        self.state
    }

    /// The raw runtime handle.
    pub const fn raw(&self) -> RawHandle {
        self.raw
    }

    /// The backend the feature was created through.
    pub fn backend(&self) -> Option<BackendKind> {
        self.info.map(|info| info.backend)
    }

    /// The feature variant.
    pub fn feature_kind(&self) -> Option<FeatureKind> {
        self.info.map(|info| info.feature)
    }

    /// The creation node mask the feature was created with.
    pub fn creation_node_mask(&self) -> Option<u32> {
        self.info.map(|info| info.creation_node_mask)
    }

    /// The visibility node mask the feature was created with. Only the
    /// command-list backend has one.
    pub fn visibility_node_mask(&self) -> Option<u32> {
        self.info.and_then(|info| info.visibility_node_mask)
    }

    /// Returns [`true`] if the handle can be evaluated.
    pub fn is_created(&self) -> bool {
        self.state == FeatureState::Created
    }

    /// Returns the creation info of a handle which can be evaluated.
    fn live_info(&self) -> Result<FeatureInfo> {
        match (self.state, self.info) {
            (FeatureState::Created, Some(info)) => Ok(info),
            _ => Err(Error::InvalidHandle),
        }
    }
}

impl Drop for FeatureHandle {
    fn drop(&mut self) {
        if self.state == FeatureState::Created {
            log::warn!(
                "The feature handle {:?} was dropped without being destroyed, the feature leaks.",
                self.raw
            );
        }
    }
}

/// A backend the lifecycle can drive: a thin forwarding layer over one
/// flavour of the runtime.
pub trait Backend {
    /// The tag given to every feature created through this backend.
    const KIND: BackendKind;

    /// The object GPU work is recorded into.
    type RecordingContext: Copy + std::fmt::Debug;

    /// Forwards a creation to the runtime.
    fn create_raw(
        &self,
        recording_context: Self::RecordingContext,
        node_masks: NodeMasks,
        feature: FeatureKind,
        parameters: &Parameters,
        out_handle: &mut RawHandle,
    ) -> Status;

    /// Forwards an evaluation to the runtime.
    fn evaluate_raw(
        &self,
        recording_context: Self::RecordingContext,
        handle: RawHandle,
        parameters: &Parameters,
    ) -> Status;

    /// Forwards a release to the runtime.
    fn release_raw(&self, handle: RawHandle) -> Status;

    /// Returns [`true`] if the runtime flavour takes a visibility node
    /// mask, so it is worth recording on the handle.
    fn has_visibility_node_mask(&self) -> bool {
        Self::KIND == BackendKind::CommandList
    }
}

fn invalid_parameter(name: &str, error: Error) -> Error {
    match error {
        Error::KeyNotFound(_) => Error::InvalidParameter(format!("{name:?} is required")),
        Error::TypeMismatch {
            stored, requested, ..
        } => Error::InvalidParameter(format!(
            "{name:?} must be a {requested} value, but is a {stored} value"
        )),
        other => other,
    }
}

/// Checks that the parameters carry every field a `feature` needs to be
/// created.
pub fn validate_creation_parameters(
    feature: FeatureKind,
    backend: BackendKind,
    parameters: &FeatureParameters,
) -> Result {
    for name in REQUIRED_DIMENSIONS {
        let value = parameters
            .get_u32(name)
            .map_err(|e| invalid_parameter(name, e))?;
        if value == 0 {
            return Err(Error::InvalidParameter(format!("{name:?} can't be zero")));
        }
    }

    if parameters.contains(names::PERF_QUALITY_VALUE) {
        let raw = parameters
            .get_i32(names::PERF_QUALITY_VALUE)
            .map_err(|e| invalid_parameter(names::PERF_QUALITY_VALUE, e))?;
        if PerfQuality::from_raw(raw).is_none() {
            return Err(Error::InvalidParameter(format!(
                "{raw} isn't a quality level"
            )));
        }
    }

    validate_resources(feature, backend, parameters)
}

/// Checks that the parameters carry every resource a `feature` reads, each
/// of them non-null and belonging to the `backend`.
pub fn validate_resources(
    feature: FeatureKind,
    backend: BackendKind,
    parameters: &FeatureParameters,
) -> Result {
    for name in required_resources(feature) {
        let resource = parameters
            .get_resource(name)
            .map_err(|e| invalid_parameter(name, e))?;
        if resource.is_null() {
            return Err(Error::InvalidParameter(format!(
                "The resource {name:?} is null"
            )));
        }
        if resource.backend() != backend {
            return Err(Error::InvalidParameter(format!(
                "The resource {name:?} is a {} resource, but the feature is used with the {backend} backend",
                resource.backend()
            )));
        }
    }
    Ok(())
}

/// Creates a feature, returning a handle tagged with `B::KIND`.
pub fn create<B: Backend + ?Sized>(
    backend: &B,
    recording_context: B::RecordingContext,
    node_masks: NodeMasks,
    feature: FeatureKind,
    parameters: &FeatureParameters,
) -> Result<FeatureHandle> {
    validate_creation_parameters(feature, B::KIND, parameters)?;

    log::debug!(
        "Creating a {feature} feature through the {} backend on {recording_context:?} with {node_masks:?}",
        B::KIND
    );
    let mut raw = RawHandle::NULL;
    Result::from(backend.create_raw(
        recording_context,
        node_masks,
        feature,
        parameters.as_parameters(),
        &mut raw,
    ))?;

    if raw.is_null() {
        return Err(Error::Runtime(Status::Fail));
    }

    Ok(FeatureHandle {
        raw,
        state: FeatureState::Created,
        info: Some(FeatureInfo {
            backend: B::KIND,
            feature,
            creation_node_mask: node_masks.creation,
            visibility_node_mask: backend
                .has_visibility_node_mask()
                .then_some(node_masks.visibility),
        }),
    })
}

/// Records the evaluation of a created feature into the
/// `recording_context`. Doesn't wait for anything: the work executes once
/// the recording context is submitted.
pub fn evaluate<B: Backend + ?Sized>(
    backend: &B,
    recording_context: B::RecordingContext,
    handle: &FeatureHandle,
    parameters: &FeatureParameters,
) -> Result {
    let info = handle.live_info()?;
    if info.backend != B::KIND {
        return Err(Error::BackendMismatch {
            created: info.backend,
            used: B::KIND,
        });
    }
    validate_resources(info.feature, B::KIND, parameters)?;

    log::debug!(
        "Evaluating the {} feature {:?} on {recording_context:?}",
        info.feature,
        handle.raw
    );
    backend
        .evaluate_raw(recording_context, handle.raw, parameters.as_parameters())
        .into()
}

/// Destroys a created feature.
///
/// The caller must make sure no recorded work referencing the feature is
/// still pending on the GPU. If the runtime refuses the release, the
/// handle stays [`FeatureState::Created`].
pub fn destroy<B: Backend + ?Sized>(backend: &B, handle: &mut FeatureHandle) -> Result {
    let info = match handle.state {
        FeatureState::Destroyed => return Err(Error::AlreadyDestroyed),
        FeatureState::Uninitialized => return Err(Error::InvalidHandle),
        FeatureState::Created => handle.live_info()?,
    };
    if info.backend != B::KIND {
        return Err(Error::BackendMismatch {
            created: info.backend,
            used: B::KIND,
        });
    }

    log::debug!("Releasing the {} feature {:?}", info.feature, handle.raw);
    Result::from(backend.release_raw(handle.raw))?;
    handle.state = FeatureState::Destroyed;
    Ok(())
}

/// Creation parameters of one feature variant.
pub trait FeatureCreateParameters {
    /// The variant these parameters create.
    fn feature(&self) -> FeatureKind;

    /// Writes the creation keys into `parameters`.
    fn write(&self, parameters: &mut FeatureParameters);

    /// The resolution the engine renders at, before upscaling.
    fn rendering_resolution(&self) -> [u32; 2];

    /// The resolution the feature upscales to.
    fn target_resolution(&self) -> [u32; 2];
}

/// A created feature along with the resolutions it was created for.
#[derive(Debug)]
pub struct Feature {
    handle: FeatureHandle,
    rendering_resolution: [u32; 2],
    target_resolution: [u32; 2],
}

impl Feature {
    /// Returns the handle.
    pub fn handle(&self) -> &FeatureHandle {
        &self.handle
    }

    /// Returns the handle (mutable), used for destroying the feature.
    pub fn handle_mut(&mut self) -> &mut FeatureHandle {
        &mut self.handle
    }

    /// Unwraps the handle.
    pub fn into_handle(self) -> FeatureHandle {
        self.handle
    }

    /// Returns the rendering resolution.
    pub const fn get_rendering_resolution(&self) -> [u32; 2] {
        self.rendering_resolution
    }

    /// Returns the target resolution.
    pub const fn get_target_resolution(&self) -> [u32; 2] {
        self.target_resolution
    }
}

/// Creates a feature from typed creation parameters and the resources of
/// the first frame. Entries of `extra` are passed through as they are,
/// unless a typed parameter overwrites them.
pub fn create_with<B, C>(
    backend: &B,
    recording_context: B::RecordingContext,
    node_masks: NodeMasks,
    create_parameters: &C,
    resources: &EvaluationParameters,
    extra: &FeatureParameters,
) -> Result<Feature>
where
    B: Backend + ?Sized,
    C: FeatureCreateParameters + ?Sized,
{
    let mut parameters = extra.clone();
    create_parameters.write(&mut parameters);
    resources.write_to(&mut parameters);

    let handle = create(
        backend,
        recording_context,
        node_masks,
        create_parameters.feature(),
        &parameters,
    )?;

    Ok(Feature {
        handle,
        rendering_resolution: create_parameters.rendering_resolution(),
        target_resolution: create_parameters.target_resolution(),
    })
}

/// Evaluates a feature with typed evaluation parameters. Entries of
/// `extra` are passed through as they are, unless a typed parameter
/// overwrites them.
pub fn evaluate_with<B: Backend + ?Sized>(
    backend: &B,
    recording_context: B::RecordingContext,
    handle: &FeatureHandle,
    evaluation_parameters: &EvaluationParameters,
    extra: &FeatureParameters,
) -> Result {
    let mut parameters = extra.clone();
    evaluation_parameters.write_to(&mut parameters);
    evaluate(backend, recording_context, handle, &parameters)
}
