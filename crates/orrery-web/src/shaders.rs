//! GLSL ES 3.00 sources for the WebGL2 backend.

/// Point lights the mesh shader evaluates per fragment.
pub const MAX_LIGHTS: usize = 4;

pub const MESH_VERTEX: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world;
out vec3 v_normal;
out vec2 v_uv;

void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    v_normal = mat3(u_model) * a_normal;
    v_uv = a_uv;
    gl_Position = u_projection * u_view * world;
}
"#;

// Each light is two vec4s: [x, y, z, distance] and [r, g, b, decay],
// matching the packed LightState layout.
pub const MESH_FRAGMENT: &str = r#"#version 300 es
precision highp float;

const int MAX_LIGHTS = 4;

in vec3 v_world;
in vec3 v_normal;
in vec2 v_uv;

uniform sampler2D u_texture;
uniform vec3 u_color;
uniform int u_lit;
uniform vec3 u_ambient;
uniform int u_light_count;
uniform vec4 u_lights[MAX_LIGHTS * 2];

out vec4 frag_color;

void main() {
    vec4 base = texture(u_texture, v_uv) * vec4(u_color, 1.0);
    if (u_lit == 0) {
        frag_color = base;
        return;
    }

    vec3 n = normalize(v_normal);
    if (!gl_FrontFacing) {
        n = -n;
    }

    vec3 light = u_ambient;
    for (int i = 0; i < MAX_LIGHTS; i++) {
        if (i >= u_light_count) {
            break;
        }
        vec4 p = u_lights[i * 2];
        vec4 c = u_lights[i * 2 + 1];
        vec3 to_light = p.xyz - v_world;
        float dist = length(to_light);
        float atten = p.w > 0.0 ? pow(clamp(1.0 - dist / p.w, 0.0, 1.0), c.w) : 1.0;
        light += c.rgb * max(dot(n, to_light / max(dist, 1e-4)), 0.0) * atten;
    }
    frag_color = vec4(base.rgb * light, base.a);
}
"#;

pub const SKY_VERTEX: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;

uniform mat4 u_view_projection;

out vec3 v_direction;

void main() {
    v_direction = a_position;
    vec4 clip = u_view_projection * vec4(a_position, 1.0);
    gl_Position = clip.xyww;
}
"#;

pub const SKY_FRAGMENT: &str = r#"#version 300 es
precision highp float;

in vec3 v_direction;

uniform samplerCube u_skybox;

out vec4 frag_color;

void main() {
    frag_color = texture(u_skybox, v_direction);
}
"#;

/// Unit cube drawn around the eye for the skybox, 12 triangles.
#[rustfmt::skip]
pub const SKY_CUBE: [f32; 108] = [
    -1.0,  1.0, -1.0,  -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,  -1.0,  1.0, -1.0,
    -1.0, -1.0,  1.0,  -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,  -1.0, -1.0,  1.0,
     1.0, -1.0, -1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,   1.0,  1.0, -1.0,   1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
    -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,   1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,
];
