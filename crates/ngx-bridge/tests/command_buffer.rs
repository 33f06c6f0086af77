#![cfg(feature = "vk")]

use ash::vk::{self, Handle as _};
use ngx_bridge::{
    ngx::*,
    vk::{RequiredExtensions, System, VkImageResourceDescription},
    Error,
};
use ngx_runtime::mock::{Call, MockRuntime};

fn descriptor() -> SystemDescriptor {
    SystemDescriptorBuilder::default()
        .engine_version("0.1.0")
        .application_data_path(std::env::temp_dir())
        .build()
        .unwrap()
}

fn system(runtime: &MockRuntime) -> System<&MockRuntime> {
    System::new(
        runtime,
        descriptor(),
        vk::Instance::from_raw(1),
        vk::PhysicalDevice::from_raw(2),
        vk::Device::from_raw(3),
    )
    .unwrap()
}

fn command_buffer() -> vk::CommandBuffer {
    vk::CommandBuffer::from_raw(0xcb)
}

fn image(id: u64) -> VkImageResourceDescription {
    VkImageResourceDescription {
        image_view: vk::ImageView::from_raw(id),
        image: vk::Image::from_raw(id + 1),
        format: vk::Format::R16G16B16A16_SFLOAT,
        width: 1920,
        height: 1080,
        ..Default::default()
    }
}

fn frame() -> EvaluationParameters {
    let mut output = image(0x200);
    output.set_writable();

    let mut parameters = EvaluationParameters::new();
    parameters.set_color_input(image(0x100));
    parameters.set_color_output(output);
    parameters.set_depth_buffer(image(0x300));
    parameters.set_motion_vectors(image(0x400), Some([-1.0, 1.0]));
    parameters
}

fn ray_reconstruction_frame() -> EvaluationParameters {
    let mut parameters = frame();
    parameters.set_shading_normals(image(0x500));
    parameters.set_linear_roughness(image(0x500));
    parameters
}

#[test]
fn create_evaluate_destroy() {
    let runtime = MockRuntime::new();
    let system = system(&runtime);
    system
        .capability_parameters()
        .unwrap()
        .supports_super_sampling()
        .unwrap();

    let settings = system
        .optimal_settings(1920, 1080, PerfQuality::MaxQuality)
        .unwrap();
    let mut feature = system
        .create_super_sampling_feature(
            command_buffer(),
            &SuperSamplingCreateParameters::from(settings),
            &frame(),
        )
        .unwrap();
    assert_eq!(feature.handle().backend(), Some(BackendKind::CommandBuffer));
    assert_eq!(feature.handle().visibility_node_mask(), None);
    assert!(matches!(
        runtime.calls().as_slice(),
        [
            Call::Init {
                backend: BackendKind::CommandBuffer,
                ..
            },
            Call::Create {
                backend: BackendKind::CommandBuffer,
                creation_node_mask: 1,
                visibility_node_mask: 1,
                ..
            }
        ]
    ));

    system
        .evaluate(
            command_buffer(),
            feature.handle(),
            &frame(),
            &FeatureParameters::new(),
        )
        .unwrap();
    system.release_feature(feature.handle_mut()).unwrap();

    assert_eq!(
        system.release_feature(feature.handle_mut()),
        Err(Error::AlreadyDestroyed)
    );
    assert_eq!(
        system.evaluate_feature(command_buffer(), feature.handle(), &FeatureParameters::new()),
        Err(Error::InvalidHandle)
    );
}

#[test]
#[cfg(feature = "dx")]
fn features_stay_with_their_backend() {
    use ngx_bridge::dx;

    let command_list_runtime = MockRuntime::new();
    let command_list_system = dx::System::new(
        &command_list_runtime,
        descriptor(),
        dx::D3D12Device(0xd3d as *mut std::ffi::c_void),
    )
    .unwrap();
    let resource = |address: usize| dx::D3D12Resource(address as *mut std::ffi::c_void);
    let mut command_list_frame = EvaluationParameters::new();
    command_list_frame.set_color_input(resource(0x10));
    command_list_frame.set_color_output(resource(0x20));
    command_list_frame.set_depth_buffer(resource(0x30));
    command_list_frame.set_motion_vectors(resource(0x40), None);
    let mut command_list_feature = command_list_system
        .create_super_sampling_feature(
            dx::CommandList(0xc0 as *mut std::ffi::c_void),
            NodeMasks::default(),
            &SuperSamplingCreateParameters::new(960, 540, 1920, 1080, None, None),
            &command_list_frame,
        )
        .unwrap();

    let runtime = MockRuntime::new();
    let system = system(&runtime);
    let mismatch = Err(Error::BackendMismatch {
        created: BackendKind::CommandList,
        used: BackendKind::CommandBuffer,
    });
    assert_eq!(
        system.evaluate(
            command_buffer(),
            command_list_feature.handle(),
            &frame(),
            &FeatureParameters::new()
        ),
        mismatch
    );
    assert_eq!(
        system.release_feature(command_list_feature.handle_mut()),
        mismatch
    );
    assert!(runtime.live_features().is_empty());
    assert!(command_list_feature.handle().is_created());

    let mut feature = system
        .create_super_sampling_feature(
            command_buffer(),
            &SuperSamplingCreateParameters::new(960, 540, 1920, 1080, None, None),
            &frame(),
        )
        .unwrap();
    assert_eq!(
        command_list_system.evaluate(
            dx::CommandList(0xc0 as *mut std::ffi::c_void),
            feature.handle(),
            &command_list_frame,
            &FeatureParameters::new()
        ),
        Err(Error::BackendMismatch {
            created: BackendKind::CommandBuffer,
            used: BackendKind::CommandList,
        })
    );

    system.release_feature(feature.handle_mut()).unwrap();
    command_list_system
        .release_feature(command_list_feature.handle_mut())
        .unwrap();
}

#[test]
fn ray_reconstruction_with_packed_roughness() {
    let runtime = MockRuntime::new();
    let system = system(&runtime);
    let create_parameters = RayReconstructionCreateParametersBuilder::default()
        .render_width(960)
        .render_height(540)
        .target_width(1920)
        .target_height(1080)
        .roughness_mode(RoughnessMode::Packed)
        .build()
        .unwrap();

    assert!(matches!(
        system.create_ray_reconstruction_feature(command_buffer(), &create_parameters, &frame()),
        Err(Error::InvalidParameter(_))
    ));

    let mut feature = system
        .create_ray_reconstruction_feature(
            command_buffer(),
            &create_parameters,
            &ray_reconstruction_frame(),
        )
        .unwrap();
    assert_eq!(feature.get_rendering_resolution(), [960, 540]);
    system
        .evaluate(
            command_buffer(),
            feature.handle(),
            &ray_reconstruction_frame(),
            &FeatureParameters::new(),
        )
        .unwrap();
    system.release_feature(feature.handle_mut()).unwrap();
}

#[test]
fn null_resources_are_refused() {
    let runtime = MockRuntime::new();
    let system = system(&runtime);
    let mut evaluation = frame();
    evaluation.set_depth_buffer(VkImageResourceDescription::default());

    assert!(matches!(
        system.create_super_sampling_feature(
            command_buffer(),
            &SuperSamplingCreateParameters::new(960, 540, 1920, 1080, None, None),
            &evaluation,
        ),
        Err(Error::InvalidParameter(_))
    ));
    assert_eq!(system.live_features(), 0);
}

#[test]
fn extra_parameters_are_passed_through() {
    let runtime = MockRuntime::new();
    let system = system(&runtime);
    let mut feature = system
        .create_super_sampling_feature(
            command_buffer(),
            &SuperSamplingCreateParameters::new(960, 540, 1920, 1080, None, None),
            &frame(),
        )
        .unwrap();

    let mut extra = FeatureParameters::new();
    extra.set_u32("DLSS.Some.Future.Key", 7);
    extra.set_f32(ngx_runtime::names::SHARPNESS, 0.3);
    system
        .evaluate(command_buffer(), feature.handle(), &frame(), &extra)
        .unwrap();

    match runtime.calls().last() {
        Some(Call::Evaluate { parameters, .. }) => {
            assert!(matches!(
                parameters.get("DLSS.Some.Future.Key", ParameterType::UInt32),
                Ok(ParameterValue::UInt32(7))
            ));
            assert!(matches!(
                parameters.get(ngx_runtime::names::SHARPNESS, ParameterType::Float32),
                Ok(ParameterValue::Float32(s)) if s == 0.3
            ));
        }
        call => panic!("unexpected call {call:?}"),
    }
    system.release_feature(feature.handle_mut()).unwrap();
}

#[test]
fn required_extensions() {
    let runtime = MockRuntime::new();
    let extensions = RequiredExtensions::get(&runtime).unwrap();
    assert!(!extensions.instance.is_empty());
    assert_eq!(
        extensions.get_device_extensions_c_strings().unwrap().len(),
        extensions.device.len()
    );
}

#[test]
fn evaluation_checks_the_resources() {
    let runtime = MockRuntime::new();
    let system = system(&runtime);
    let mut feature = system
        .create_super_sampling_feature(
            command_buffer(),
            &SuperSamplingCreateParameters::new(960, 540, 1920, 1080, None, None),
            &frame(),
        )
        .unwrap();

    let mut null_depth = frame();
    null_depth.set_depth_buffer(VkImageResourceDescription::default());
    let mut null_motion_vectors = frame();
    null_motion_vectors.set_motion_vectors(VkImageResourceDescription::default(), None);
    let mut evaluations = vec![null_depth, null_motion_vectors];

    #[cfg(feature = "dx")]
    {
        let mut foreign_motion_vectors = frame();
        foreign_motion_vectors.set_motion_vectors(
            ngx_bridge::dx::D3D12Resource(0x40 as *mut std::ffi::c_void),
            None,
        );
        evaluations.push(foreign_motion_vectors);
    }

    for evaluation in &evaluations {
        assert!(matches!(
            system.evaluate(
                command_buffer(),
                feature.handle(),
                evaluation,
                &FeatureParameters::new()
            ),
            Err(Error::InvalidParameter(_))
        ));
    }
    assert!(!runtime
        .calls()
        .iter()
        .any(|call| matches!(call, Call::Evaluate { .. })));
    system.release_feature(feature.handle_mut()).unwrap();
}

fn assert_sync<T: Send + Sync>() {}

#[test]
fn one_system_is_shared_by_every_recording_thread() {
    assert_sync::<System<MockRuntime>>();

    let runtime = MockRuntime::new();
    let system = system(&runtime);
    let mut feature = system
        .create_super_sampling_feature(
            command_buffer(),
            &SuperSamplingCreateParameters::new(960, 540, 1920, 1080, None, None),
            &frame(),
        )
        .unwrap();

    std::thread::scope(|scope| {
        for thread in 0..4u64 {
            let system = &system;
            let handle = feature.handle();
            scope.spawn(move || {
                system
                    .evaluate(
                        vk::CommandBuffer::from_raw(0xcb + thread),
                        handle,
                        &frame(),
                        &FeatureParameters::new(),
                    )
                    .unwrap();
            });
        }
    });

    assert_eq!(
        runtime
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Evaluate { .. }))
            .count(),
        4
    );
    assert_eq!(system.live_features(), 1);
    system.release_feature(feature.handle_mut()).unwrap();
    assert_eq!(system.live_features(), 0);
}
