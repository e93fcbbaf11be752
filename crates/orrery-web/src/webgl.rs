//! WebGL2 render backend.
//!
//! Geometry is uploaded once per distinct `Geometry` value. Every texture
//! gets a GPU object immediately, filled with a 1×1 white pixel until its
//! image arrives, so a mesh whose image is still loading (or failed to
//! load) draws untextured instead of blocking the frame.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::{Mat3, Mat4};
use orrery_engine::{
    Background, CubeTextureId, FrameData, Geometry, MeshData, Renderer, Side, TextureId,
    TextureRegistry, LIGHT_FLOATS,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::{WebError, WebResult};
use crate::shaders::{self, MAX_LIGHTS};

const WHITE_PIXEL: [u8; 4] = [255, 255, 255, 255];

/// Cube-map face targets in manifest order (+X, -X, +Y, -Y, +Z, -Z).
const CUBE_FACES: [u32; 6] = [
    GL::TEXTURE_CUBE_MAP_POSITIVE_X,
    GL::TEXTURE_CUBE_MAP_NEGATIVE_X,
    GL::TEXTURE_CUBE_MAP_POSITIVE_Y,
    GL::TEXTURE_CUBE_MAP_NEGATIVE_Y,
    GL::TEXTURE_CUBE_MAP_POSITIVE_Z,
    GL::TEXTURE_CUBE_MAP_NEGATIVE_Z,
];

/// Hashable identity of a `Geometry` (f32 fields compared bitwise).
type GeometryKey = (u8, [u32; 3]);

fn geometry_key(geometry: &Geometry) -> GeometryKey {
    match *geometry {
        Geometry::Sphere { radius, width_segments, height_segments } => {
            (0, [radius.to_bits(), width_segments, height_segments])
        }
        Geometry::Ring { inner_radius, outer_radius, theta_segments } => {
            (1, [inner_radius.to_bits(), outer_radius.to_bits(), theta_segments])
        }
    }
}

struct GpuMesh {
    vao: WebGlVertexArrayObject,
    _vertices: WebGlBuffer,
    _indices: WebGlBuffer,
    index_count: i32,
}

struct MeshProgram {
    program: WebGlProgram,
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    lit: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    light_count: Option<WebGlUniformLocation>,
    lights: Option<WebGlUniformLocation>,
}

struct SkyProgram {
    program: WebGlProgram,
    view_projection: Option<WebGlUniformLocation>,
    skybox: Option<WebGlUniformLocation>,
    vao: WebGlVertexArrayObject,
    _vertices: WebGlBuffer,
}

struct CubeMap {
    texture: WebGlTexture,
    /// Faces whose image has arrived. Drawn only once all six are in.
    loaded: Rc<Cell<u8>>,
}

/// WebGL2 implementation of `Renderer`.
pub struct WebGlRenderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    mesh_program: MeshProgram,
    sky: SkyProgram,
    meshes: HashMap<GeometryKey, GpuMesh>,
    textures: Vec<WebGlTexture>,
    white: WebGlTexture,
    skybox: Option<CubeMap>,
    lights: Vec<f32>,
    width: u32,
    height: u32,
}

impl WebGlRenderer {
    /// Acquire a WebGL2 context on `canvas` and start loading every image
    /// the registry names.
    pub fn new(canvas: HtmlCanvasElement, textures: &TextureRegistry) -> WebResult<Self> {
        let gl = canvas
            .get_context("webgl2")?
            .ok_or(WebError::NoWebGl)?
            .dyn_into::<GL>()
            .map_err(|_| WebError::NoWebGl)?;

        let mesh_program = MeshProgram::new(&gl)?;
        let sky = SkyProgram::new(&gl)?;
        let white = create_texture_2d(&gl)?;

        let mut loaded = Vec::with_capacity(textures.len());
        for (id, path) in textures.iter() {
            let texture = create_texture_2d(&gl)?;
            load_image(&gl, &texture, GL::TEXTURE_2D, path, None)?;
            log::debug!("texture {} <- {}", id.0, path);
            loaded.push(texture);
        }

        let skybox = match textures.skybox().and_then(|id| textures.skybox_faces(id)) {
            Some(faces) => Some(CubeMap::load(&gl, faces)?),
            None => None,
        };

        let width = canvas.width();
        let height = canvas.height();
        log::info!("WebGL2 backend ready: {} textures, skybox {}", loaded.len(), skybox.is_some());

        Ok(Self {
            gl,
            canvas,
            mesh_program,
            sky,
            meshes: HashMap::new(),
            textures: loaded,
            white,
            skybox,
            lights: vec![0.0; MAX_LIGHTS * LIGHT_FLOATS],
            width,
            height,
        })
    }

    fn mesh(&mut self, geometry: &Geometry) -> WebResult<&GpuMesh> {
        let key = geometry_key(geometry);
        if !self.meshes.contains_key(&key) {
            let mesh = upload_mesh(&self.gl, &MeshData::from_geometry(geometry))?;
            self.meshes.insert(key, mesh);
        }
        self.meshes.get(&key).ok_or(WebError::Allocation("mesh"))
    }

    fn texture(&self, id: Option<TextureId>) -> &WebGlTexture {
        id.and_then(|t| self.textures.get(t.0 as usize)).unwrap_or(&self.white)
    }

    fn draw_skybox(&self, id: CubeTextureId, view: Mat4, projection: Mat4) -> bool {
        let Some(cube) = self.skybox.as_ref().filter(|_| id.0 == 0) else {
            return false;
        };
        if cube.loaded.get() < CUBE_FACES.len() as u8 {
            return false;
        }
        let gl = &self.gl;
        let rotation_only = Mat4::from_mat3(Mat3::from_mat4(view));
        gl.use_program(Some(&self.sky.program));
        gl.uniform_matrix4fv_with_f32_array(
            self.sky.view_projection.as_ref(),
            false,
            &(projection * rotation_only).to_cols_array(),
        );
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_CUBE_MAP, Some(&cube.texture));
        gl.uniform1i(self.sky.skybox.as_ref(), 0);
        gl.disable(GL::DEPTH_TEST);
        gl.depth_mask(false);
        gl.disable(GL::CULL_FACE);
        gl.bind_vertex_array(Some(&self.sky.vao));
        gl.draw_arrays(GL::TRIANGLES, 0, (shaders::SKY_CUBE.len() / 3) as i32);
        gl.depth_mask(true);
        true
    }
}

impl Renderer for WebGlRenderer {
    fn backend(&self) -> &'static str {
        "webgl2"
    }

    fn render(&mut self, frame: &FrameData) {
        let view = Mat4::from_cols_array_2d(&frame.camera.view);
        let projection = Mat4::from_cols_array_2d(&frame.camera.projection);

        self.gl.viewport(0, 0, self.width as i32, self.height as i32);
        let clear = match frame.background {
            Background::Color(color) => color,
            Background::CubeMap(_) => frame.clear_color,
        };
        self.gl.clear_color(clear.r, clear.g, clear.b, 1.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        if let Background::CubeMap(id) = frame.background {
            self.draw_skybox(id, view, projection);
        }

        let count = fill_light_uniforms(frame.lighting.packed(), &mut self.lights);

        {
            let gl = &self.gl;
            let p = &self.mesh_program;
            gl.enable(GL::DEPTH_TEST);
            gl.use_program(Some(&p.program));
            gl.uniform_matrix4fv_with_f32_array(p.view.as_ref(), false, &view.to_cols_array());
            gl.uniform_matrix4fv_with_f32_array(p.projection.as_ref(), false, &projection.to_cols_array());
            gl.uniform3fv_with_f32_array(p.ambient.as_ref(), &frame.lighting.ambient().radiance());
            gl.uniform1i(p.light_count.as_ref(), count as i32);
            gl.uniform4fv_with_f32_array(p.lights.as_ref(), &self.lights);
            gl.uniform1i(p.texture.as_ref(), 0);
            gl.active_texture(GL::TEXTURE0);
        }

        for item in frame.items {
            let (vao, index_count) = match self.mesh(&item.mesh.geometry) {
                Ok(mesh) => (mesh.vao.clone(), mesh.index_count),
                Err(err) => {
                    log::error!("skipping node {}: {}", item.node.0, err);
                    continue;
                }
            };
            let material = &item.mesh.material;
            let gl = &self.gl;
            let p = &self.mesh_program;

            if material.side == Side::Double {
                gl.disable(GL::CULL_FACE);
            } else {
                gl.enable(GL::CULL_FACE);
                gl.cull_face(GL::BACK);
            }
            gl.uniform_matrix4fv_with_f32_array(p.model.as_ref(), false, &item.model.to_cols_array());
            gl.uniform3fv_with_f32_array(p.color.as_ref(), &material.color.to_array());
            gl.uniform1i(p.lit.as_ref(), material.is_lit() as i32);
            gl.bind_texture(GL::TEXTURE_2D, Some(self.texture(material.texture)));
            gl.bind_vertex_array(Some(&vao));
            gl.draw_elements_with_i32(GL::TRIANGLES, index_count, GL::UNSIGNED_INT, 0);
        }
        self.gl.bind_vertex_array(None);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.canvas.set_width(self.width);
        self.canvas.set_height(self.height);
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl MeshProgram {
    fn new(gl: &GL) -> WebResult<Self> {
        let program = link_program(gl, shaders::MESH_VERTEX, shaders::MESH_FRAGMENT)?;
        let loc = |name: &str| gl.get_uniform_location(&program, name);
        Ok(Self {
            model: loc("u_model"),
            view: loc("u_view"),
            projection: loc("u_projection"),
            texture: loc("u_texture"),
            color: loc("u_color"),
            lit: loc("u_lit"),
            ambient: loc("u_ambient"),
            light_count: loc("u_light_count"),
            lights: loc("u_lights[0]"),
            program,
        })
    }
}

impl SkyProgram {
    fn new(gl: &GL) -> WebResult<Self> {
        let program = link_program(gl, shaders::SKY_VERTEX, shaders::SKY_FRAGMENT)?;
        let vao = gl.create_vertex_array().ok_or(WebError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        let vertices = gl.create_buffer().ok_or(WebError::Allocation("buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
        gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, bytemuck::cast_slice(&shaders::SKY_CUBE), GL::STATIC_DRAW);
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 12, 0);
        gl.bind_vertex_array(None);

        Ok(Self {
            view_projection: gl.get_uniform_location(&program, "u_view_projection"),
            skybox: gl.get_uniform_location(&program, "u_skybox"),
            program,
            vao,
            _vertices: vertices,
        })
    }
}

impl CubeMap {
    fn load(gl: &GL, faces: &[String; 6]) -> WebResult<Self> {
        let texture = gl.create_texture().ok_or(WebError::Allocation("texture"))?;
        gl.bind_texture(GL::TEXTURE_CUBE_MAP, Some(&texture));
        gl.tex_parameteri(GL::TEXTURE_CUBE_MAP, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_CUBE_MAP, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_CUBE_MAP, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_CUBE_MAP, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);

        let loaded = Rc::new(Cell::new(0u8));
        for (target, path) in CUBE_FACES.iter().zip(faces) {
            load_image(gl, &texture, *target, path, Some(loaded.clone()))?;
        }
        Ok(Self { texture, loaded })
    }
}

/// Copy packed lights into the fixed-size uniform array, zeroing unused
/// slots. Lights past `MAX_LIGHTS` are dropped. Returns the lights written.
fn fill_light_uniforms(packed: &[f32], uniforms: &mut [f32]) -> usize {
    uniforms.fill(0.0);
    let len = packed.len().min(uniforms.len()) / LIGHT_FLOATS * LIGHT_FLOATS;
    uniforms[..len].copy_from_slice(&packed[..len]);
    len / LIGHT_FLOATS
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> WebResult<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(WebError::Allocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        Err(WebError::Shader(gl.get_shader_info_log(&shader).unwrap_or_default()))
    }
}

fn link_program(gl: &GL, vertex: &str, fragment: &str) -> WebResult<WebGlProgram> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vertex)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, fragment)?;
    let program = gl.create_program().ok_or(WebError::Allocation("program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    if gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(program)
    } else {
        Err(WebError::Link(gl.get_program_info_log(&program).unwrap_or_default()))
    }
}

fn upload_mesh(gl: &GL, data: &MeshData) -> WebResult<GpuMesh> {
    let vao = gl.create_vertex_array().ok_or(WebError::Allocation("vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let vertices = gl.create_buffer().ok_or(WebError::Allocation("buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
    gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, bytemuck::cast_slice(&data.interleaved()), GL::STATIC_DRAW);

    let stride = (MeshData::VERTEX_FLOATS * 4) as i32;
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, stride, 0);
    gl.enable_vertex_attrib_array(1);
    gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, stride, 12);
    gl.enable_vertex_attrib_array(2);
    gl.vertex_attrib_pointer_with_i32(2, 2, GL::FLOAT, false, stride, 24);

    let indices = gl.create_buffer().ok_or(WebError::Allocation("buffer"))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
    gl.buffer_data_with_u8_array(GL::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(&data.indices), GL::STATIC_DRAW);

    gl.bind_vertex_array(None);
    Ok(GpuMesh {
        vao,
        _vertices: vertices,
        _indices: indices,
        index_count: data.indices.len() as i32,
    })
}

/// A 2D texture holding one white pixel until its image replaces it.
fn create_texture_2d(gl: &GL) -> WebResult<WebGlTexture> {
    let texture = gl.create_texture().ok_or(WebError::Allocation("texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        1,
        1,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(&WHITE_PIXEL),
    )?;
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    Ok(texture)
}

/// Fetch `path` and upload it into `target` of `texture` once decoded.
/// Cube faces bump `faces_loaded`; 2D textures get mipmaps.
fn load_image(
    gl: &GL,
    texture: &WebGlTexture,
    target: u32,
    path: &str,
    faces_loaded: Option<Rc<Cell<u8>>>,
) -> WebResult<()> {
    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));

    let onload = {
        let gl = gl.clone();
        let texture = texture.clone();
        let image = image.clone();
        let path = path.to_string();
        Closure::<dyn FnMut()>::new(move || {
            let bind_target = if faces_loaded.is_some() { GL::TEXTURE_CUBE_MAP } else { GL::TEXTURE_2D };
            gl.bind_texture(bind_target, Some(&texture));
            gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, faces_loaded.is_none() as i32);
            let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
                target,
                0,
                GL::RGBA as i32,
                GL::RGBA,
                GL::UNSIGNED_BYTE,
                &image,
            );
            gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
            if let Err(err) = uploaded {
                log::warn!("failed to upload {}: {:?}", path, err);
                return;
            }
            match &faces_loaded {
                Some(count) => count.set(count.get() + 1),
                None => {
                    gl.generate_mipmap(GL::TEXTURE_2D);
                    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR_MIPMAP_LINEAR as i32);
                }
            }
        })
    };
    let onerror = {
        let path = path.to_string();
        Closure::<dyn FnMut()>::new(move || {
            log::warn!("image failed to load, drawing untextured: {}", path);
        })
    };

    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    image.set_src(path);
    // The image element owns the callbacks for the lifetime of the page.
    onload.forget();
    onerror.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_uniforms_cap_at_max_lights() {
        let packed: Vec<f32> = (0..(MAX_LIGHTS + 2) * LIGHT_FLOATS).map(|i| i as f32 + 1.0).collect();
        let mut uniforms = vec![-1.0; MAX_LIGHTS * LIGHT_FLOATS];
        assert_eq!(fill_light_uniforms(&packed, &mut uniforms), MAX_LIGHTS);
        assert_eq!(uniforms[..], packed[..MAX_LIGHTS * LIGHT_FLOATS]);

        let one = &packed[..LIGHT_FLOATS];
        assert_eq!(fill_light_uniforms(one, &mut uniforms), 1);
        assert_eq!(&uniforms[..LIGHT_FLOATS], one);
        assert!(uniforms[LIGHT_FLOATS..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn equal_geometries_share_a_key() {
        assert_eq!(geometry_key(&Geometry::sphere(6.0)), geometry_key(&Geometry::sphere(6.0)));
        assert_ne!(geometry_key(&Geometry::sphere(6.0)), geometry_key(&Geometry::sphere(6.5)));
        assert_ne!(
            geometry_key(&Geometry::ring(10.0, 20.0)),
            geometry_key(&Geometry::ring(7.0, 12.0))
        );
    }
}
