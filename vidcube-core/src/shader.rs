/// GLSL sources for the textured, lit cube and the matching CPU lighting model
use nalgebra::{Matrix4, Vector3};

use crate::config::LightingConfig;

pub const ATTRIB_POSITION: &str = "aVertexPosition";
pub const ATTRIB_NORMAL: &str = "aVertexNormal";
pub const ATTRIB_TEX_COORD: &str = "aTextureCoord";

pub const UNIFORM_PROJECTION: &str = "uProjectionMatrix";
pub const UNIFORM_MODEL_VIEW: &str = "uModelViewMatrix";
pub const UNIFORM_NORMAL: &str = "uNormalMatrix";
pub const UNIFORM_SAMPLER: &str = "uSampler";

const FRAGMENT_SHADER_SOURCE: &str = r#"
varying highp vec2 vTextureCoord;
varying highp vec3 vLighting;

uniform sampler2D uSampler;

void main(void) {
    highp vec4 texelColor = texture2D(uSampler, vTextureCoord);
    gl_FragColor = vec4(texelColor.rgb * vLighting, texelColor.a);
}
"#;

/// Vertex and fragment shader text for one program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Generate the shader pair with the light baked in as constants
    pub fn new(lighting: &LightingConfig) -> Self {
        Self {
            vertex: vertex_shader_source(lighting),
            fragment: FRAGMENT_SHADER_SOURCE.to_string(),
        }
    }
}

fn glsl_vec3(v: &Vector3<f32>) -> String {
    format!("vec3({:.4}, {:.4}, {:.4})", v.x, v.y, v.z)
}

fn vertex_shader_source(lighting: &LightingConfig) -> String {
    format!(
        r#"
attribute vec4 {position};
attribute vec3 {normal};
attribute vec2 {tex_coord};

uniform mat4 {normal_matrix};
uniform mat4 {model_view};
uniform mat4 {projection};

varying highp vec2 vTextureCoord;
varying highp vec3 vLighting;

void main(void) {{
    gl_Position = {projection} * {model_view} * {position};
    vTextureCoord = {tex_coord};

    highp vec3 ambientLight = {ambient};
    highp vec3 directionalLightColor = {color};
    highp vec3 directionalVector = normalize({direction});

    highp vec4 transformedNormal = {normal_matrix} * vec4({normal}, 1.0);
    highp float directional = max(dot(normalize(transformedNormal.xyz), directionalVector), 0.0);
    vLighting = ambientLight + (directionalLightColor * directional);
}}
"#,
        position = ATTRIB_POSITION,
        normal = ATTRIB_NORMAL,
        tex_coord = ATTRIB_TEX_COORD,
        normal_matrix = UNIFORM_NORMAL,
        model_view = UNIFORM_MODEL_VIEW,
        projection = UNIFORM_PROJECTION,
        ambient = glsl_vec3(&lighting.ambient),
        color = glsl_vec3(&lighting.directional_color),
        direction = glsl_vec3(&lighting.direction),
    )
}

/// Per-vertex lighting factor, evaluated the same way the vertex shader does
pub fn lighting_factor(
    lighting: &LightingConfig,
    normal_matrix: &Matrix4<f32>,
    normal: &Vector3<f32>,
) -> Vector3<f32> {
    let transformed = normal_matrix * normal.push(1.0);
    let directional = transformed
        .xyz()
        .normalize()
        .dot(&lighting.light_direction())
        .max(0.0);
    lighting.ambient + lighting.directional_color * directional
}

/// Fragment color: texel RGB modulated by the lighting factor, alpha kept
pub fn shade_texel(texel: [f32; 4], lighting: &Vector3<f32>) -> [f32; 4] {
    [
        texel[0] * lighting.x,
        texel[1] * lighting.y,
        texel[2] * lighting.z,
        texel[3],
    ]
}
