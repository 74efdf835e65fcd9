use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use showroom_assets::{TextureKind, TextureStore};
use showroom_render::Renderer;
use showroom_scene::{MeshVertex, SceneSnapshot, Side, TextureHandle};
use showroom_viewport::DrawingSurface;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const ENV_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    ambient: [f32; 4],
    light_color: [f32; 4],
    light_direction: [f32; 4],
    base_color: [f32; 4],
    material: [f32; 4],
}

impl FrameUniforms {
    fn from_scene(scene: &SceneSnapshot, env_intensity: f32) -> Self {
        let lights = &scene.lights;
        let m = &scene.material;
        Self {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            camera_position: scene.camera.position.extend(1.0).to_array(),
            ambient: lights.ambient.color.scaled(lights.ambient.intensity),
            light_color: lights.directional.color.scaled(lights.directional.intensity),
            light_direction: lights.directional.direction().extend(0.0).to_array(),
            base_color: m.color.scaled(1.0),
            material: [m.metalness, m.roughness, env_intensity, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

impl From<&MeshVertex> for Vertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
}

impl From<Mat4> for InstanceData {
    fn from(model: Mat4) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Offscreen color and depth targets at the capped render resolution.
struct RenderTargets {
    color: wgpu::TextureView,
    depth: wgpu::TextureView,
    blit_bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

/// Render resolution for a logical size at `pixel_ratio`, clamped to
/// `[1, max_dimension]` on each axis.
pub fn target_size(width: u32, height: u32, pixel_ratio: f64, max_dimension: u32) -> (u32, u32) {
    let scale = |v: u32| {
        let scaled = (v as f64 * pixel_ratio).round();
        (scaled as u32).clamp(1, max_dimension.max(1))
    };
    (scale(width), scale(height))
}

/// wgpu-based showroom renderer.
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    blit_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    scene_layout: wgpu::BindGroupLayout,
    scene_bind_group: wgpu::BindGroup,
    blit_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    env_view: wgpu::TextureView,
    env_handle: Option<TextureHandle>,
    env_ready: bool,
    meshes: Vec<GpuMesh>,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    targets: Option<RenderTargets>,
    logical_size: (u32, u32),
    pixel_ratio: f64,
    max_dimension: u32,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    /// Build pipelines and upload one mesh per scene object.
    ///
    /// The scene's structure is fixed, so mesh buffers are created once and
    /// drawn in object order.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        scene: &SceneSnapshot,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::from_scene(scene, 1.0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let blit_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blit_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Neutral stand-in until the environment cubemap has been decoded
        let env_view =
            Self::create_cube_texture(device, queue, 1, 1, &[[128u8, 128, 128, 255]; 6]);
        let scene_bind_group = Self::create_scene_bind_group(
            device,
            &scene_layout,
            &uniform_buffer,
            &env_view,
            &sampler,
        );

        let mesh_pipeline = Self::create_mesh_pipeline(
            device,
            &scene_layout,
            surface_format,
            scene.material.side,
        );
        let blit_pipeline = Self::create_blit_pipeline(device, &blit_layout, surface_format);

        let meshes = scene
            .objects
            .iter()
            .map(|object| {
                let data = object.mesh.build();
                let vertices: Vec<Vertex> = data.vertices.iter().map(Vertex::from).collect();
                let name = object.name.as_str();
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(name),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(name),
                    contents: bytemuck::cast_slice(&data.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                tracing::debug!(
                    object = name,
                    vertices = vertices.len(),
                    triangles = data.triangle_count(),
                    "mesh uploaded"
                );
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: data.indices.len() as u32,
                }
            })
            .collect::<Vec<_>>();

        let max_instances = meshes.len().max(1) as u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            mesh_pipeline,
            blit_pipeline,
            uniform_buffer,
            scene_layout,
            scene_bind_group,
            blit_layout,
            sampler,
            env_view,
            env_handle: None,
            env_ready: false,
            meshes,
            instance_buffer,
            max_instances,
            targets: None,
            logical_size: (1, 1),
            pixel_ratio: 1.0,
            max_dimension: device.limits().max_texture_dimension_2d,
            surface_format,
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Current offscreen render resolution.
    pub fn render_size(&self) -> (u32, u32) {
        target_size(
            self.logical_size.0,
            self.logical_size.1,
            self.pixel_ratio,
            self.max_dimension,
        )
    }

    /// Whether the decoded environment cubemap has replaced the stand-in.
    pub fn has_environment(&self) -> bool {
        self.env_ready
    }

    /// Upload the scene's environment cubemap once it appears in `store`.
    pub fn sync_textures(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &SceneSnapshot,
        store: &TextureStore,
    ) {
        let Some(handle) = scene.material.env_map else {
            return;
        };
        if self.env_handle == Some(handle) {
            return;
        }
        let Some(data) = store.get(handle) else {
            return;
        };
        if data.kind != TextureKind::Cube || data.layers.len() != 6 {
            tracing::warn!(?handle, "environment texture is not a cubemap, ignoring");
            self.env_handle = Some(handle);
            return;
        }

        self.env_view = Self::create_cube_texture(
            device,
            queue,
            data.width,
            data.height,
            &data.layers,
        );
        self.scene_bind_group = Self::create_scene_bind_group(
            device,
            &self.scene_layout,
            &self.uniform_buffer,
            &self.env_view,
            &self.sampler,
        );
        self.env_handle = Some(handle);
        self.env_ready = true;
        tracing::info!(
            width = data.width,
            height = data.height,
            "environment map uploaded"
        );
    }

    /// Render one frame into the offscreen target, then scale it onto `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &SceneSnapshot,
    ) {
        self.ensure_targets(device);
        let Some(targets) = self.targets.as_ref() else {
            return;
        };

        let env_intensity = if self.has_environment() { 1.0 } else { 0.0 };
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from_scene(scene, env_intensity)),
        );

        let instances: Vec<InstanceData> = scene
            .objects
            .iter()
            .take(self.max_instances as usize)
            .map(|object| InstanceData::from(object.transform.matrix()))
            .collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &targets.color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.scene_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (i, mesh) in self.meshes.iter().enumerate().take(instances.len()) {
                let instance = i as u32;
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, instance..instance + 1);
            }
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("blit_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });
            pass.set_pipeline(&self.blit_pipeline);
            pass.set_bind_group(0, &targets.blit_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn ensure_targets(&mut self, device: &wgpu::Device) {
        let size = self.render_size();
        if self.targets.as_ref().is_some_and(|t| t.size == size) {
            return;
        }
        let (width, height) = size;
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let color = device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("scene_color"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: self.surface_format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            })
            .create_view(&Default::default());

        let depth = device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("scene_depth"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&Default::default());

        let blit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blit_bind_group"),
            layout: &self.blit_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        tracing::debug!(width, height, "render targets rebuilt");
        self.targets = Some(RenderTargets {
            color,
            depth,
            blit_bind_group,
            size,
        });
    }

    fn create_scene_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        env_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(env_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Six-layer cube texture from RGBA8 layers of `width * height` pixels.
    fn create_cube_texture<L: AsRef<[u8]>>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        layers: &[L],
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&Self::cube_descriptor(wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        }));
        for (layer, pixels) in layers.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                pixels.as_ref(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }
        texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("environment_view"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        })
    }

    fn cube_descriptor(size: wgpu::Extent3d) -> wgpu::TextureDescriptor<'static> {
        wgpu::TextureDescriptor {
            label: Some("environment_map"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ENV_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        }
    }

    fn create_mesh_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        side: Side,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pbr_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::PBR_SHADER.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                            2 => Float32x2,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: cull_mode(side),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_blit_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BLIT_SHADER.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blit_pipeline_layout"),
            bind_group_layouts: &[layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blit_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_blit"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_blit"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }
}

fn cull_mode(side: Side) -> Option<wgpu::Face> {
    match side {
        Side::Front => Some(wgpu::Face::Back),
        Side::Back => Some(wgpu::Face::Front),
        Side::Double => None,
    }
}

impl DrawingSurface for WgpuRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.logical_size = (width.max(1), height.max(1));
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }
}

/// One frame's worth of GPU context, usable as a scene [`Renderer`].
pub struct GpuFrame<'a> {
    pub renderer: &'a mut WgpuRenderer,
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub view: &'a wgpu::TextureView,
}

impl Renderer for GpuFrame<'_> {
    type Output = ();

    fn render(&mut self, scene: &SceneSnapshot) {
        self.renderer.render(self.device, self.queue, self.view, scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_common::ShowroomConfig;

    #[test]
    fn target_size_applies_ratio() {
        assert_eq!(target_size(1280, 720, 2.0, 8192), (2560, 1440));
        assert_eq!(target_size(1280, 720, 1.5, 8192), (1920, 1080));
    }

    #[test]
    fn target_size_is_clamped() {
        assert_eq!(target_size(0, 0, 1.0, 8192), (1, 1));
        assert_eq!(target_size(6000, 100, 2.0, 8192), (8192, 200));
    }

    #[test]
    fn uniforms_match_scene() {
        let scene = SceneSnapshot::showcase(&ShowroomConfig::default(), None);
        let u = FrameUniforms::from_scene(&scene, 0.0);
        assert_eq!(u.camera_position, [0.0, 0.0, 5.0, 1.0]);
        assert_eq!(u.ambient, [0.5, 0.5, 0.5, 1.0]);
        assert!((u.material[0] - 0.7).abs() < 1e-6);
        assert!((u.material[1] - 0.2).abs() < 1e-6);
        assert_eq!(u.material[2], 0.0);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 160);
    }

    #[test]
    fn showroom_material_disables_culling() {
        assert_eq!(cull_mode(Side::Double), None);
        assert_eq!(cull_mode(Side::Front), Some(wgpu::Face::Back));
    }

    #[test]
    fn instance_layout_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let inst = InstanceData::from(m);
        assert_eq!(inst.model_3, [1.0, 2.0, 3.0, 1.0]);
    }
}
