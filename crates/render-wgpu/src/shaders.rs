/// WGSL shader for the metalness/roughness meshes.
pub const PBR_SHADER: &str = r#"
struct Frame {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    ambient: vec4<f32>,
    light_color: vec4<f32>,
    light_direction: vec4<f32>,
    base_color: vec4<f32>,
    // x: metalness, y: roughness, z: environment intensity
    material: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;
@group(0) @binding(1)
var env_map: texture_cube<f32>;
@group(0) @binding(2)
var env_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

const PI: f32 = 3.14159265;

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.uv = vertex.uv;
    return out;
}

fn distribution_ggx(n_dot_h: f32, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let a2 = a * a;
    let d = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    return a2 / (PI * d * d);
}

fn geometry_smith(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    let k = (roughness + 1.0) * (roughness + 1.0) / 8.0;
    let gv = n_dot_v / (n_dot_v * (1.0 - k) + k);
    let gl = n_dot_l / (n_dot_l * (1.0 - k) + k);
    return gv * gl;
}

fn fresnel_schlick(cos_theta: f32, f0: vec3<f32>) -> vec3<f32> {
    return f0 + (vec3<f32>(1.0) - f0) * pow(clamp(1.0 - cos_theta, 0.0, 1.0), 5.0);
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    let geometric_normal = normalize(in.world_normal);
    let n = select(-geometric_normal, geometric_normal, front);
    let v = normalize(frame.camera_position.xyz - in.world_position);
    let l = normalize(frame.light_direction.xyz);
    let h = normalize(v + l);

    let metalness = frame.material.x;
    let roughness = clamp(frame.material.y, 0.04, 1.0);
    let albedo = frame.base_color.rgb;
    let f0 = mix(vec3<f32>(0.04), albedo, metalness);

    let n_dot_l = max(dot(n, l), 0.0);
    let n_dot_v = max(dot(n, v), 1e-4);
    let n_dot_h = max(dot(n, h), 0.0);

    let f = fresnel_schlick(max(dot(h, v), 0.0), f0);
    let d = distribution_ggx(n_dot_h, roughness);
    let g = geometry_smith(n_dot_v, n_dot_l, roughness);
    let specular = d * g * f / (4.0 * n_dot_v * max(n_dot_l, 1e-4));
    let kd = (vec3<f32>(1.0) - f) * (1.0 - metalness);
    let direct = (kd * albedo / PI + specular) * frame.light_color.rgb * n_dot_l * PI;

    let ambient = frame.ambient.rgb * albedo * (1.0 - metalness);

    let r = reflect(-v, n);
    let env = textureSample(env_map, env_sampler, r).rgb;
    let env_weight = fresnel_schlick(n_dot_v, f0) * (1.0 - 0.75 * roughness);
    let reflection = env * env_weight * frame.material.z;

    return vec4<f32>(direct + ambient + reflection, frame.base_color.a);
}
"#;

/// WGSL shader that scales the offscreen target onto the swapchain.
pub const BLIT_SHADER: &str = r#"
@group(0) @binding(0)
var source: texture_2d<f32>;
@group(0) @binding(1)
var source_sampler: sampler;

struct BlitOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

// One triangle covering the whole screen
@vertex
fn vs_blit(@builtin(vertex_index) index: u32) -> BlitOutput {
    let corner = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BlitOutput;
    out.clip_position = vec4<f32>(corner * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(corner.x, 1.0 - corner.y);
    return out;
}

@fragment
fn fs_blit(in: BlitOutput) -> @location(0) vec4<f32> {
    return textureSample(source, source_sampler, in.uv);
}
"#;
