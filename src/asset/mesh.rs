//! glTF/GLB import into a single flattened triangle list.
//!
//! Node transforms are baked into the vertices so the model keeps its
//! authored layout; the scene then places the whole mesh with one matrix.
//! The base color texture is sampled per vertex (nearest, repeat) and folded
//! into the vertex color. Metallic-roughness, normal and emissive textures
//! are not read; roughness comes from the scene options.

use glam::{Mat3, Mat4, Vec3, Vec4};

use super::AssetError;

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Model-space unit normal.
    pub normal: [f32; 3],
    /// Base color (material factor times vertex color times base color
    /// texel), linear RGBA.
    pub color: [f32; 4],
}

/// CPU-side model geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMesh {
    /// Vertex data.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl ModelMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    fn append_primitive(
        &mut self,
        primitive: &gltf::Primitive<'_>,
        buffers: &[gltf::buffer::Data],
        images: &[gltf::image::Data],
        transform: Mat4,
    ) {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            return;
        }
        let reader = primitive
            .reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            return;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| transform.transform_point3(Vec3::from(p)))
            .collect();
        if positions.is_empty() {
            return;
        }

        let local_indices: Vec<u32> = reader.read_indices().map_or_else(
            || (0..positions.len() as u32).collect(),
            |indices| indices.into_u32().collect(),
        );
        if local_indices.len() < 3
            || local_indices.iter().any(|&i| i as usize >= positions.len())
        {
            log::warn!("skipping primitive with out-of-range indices");
            return;
        }

        let normal_matrix = normal_matrix(transform);
        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero())
                .collect(),
            None => generate_normals(&positions, &local_indices),
        };

        let pbr = primitive.material().pbr_metallic_roughness();
        let base = Vec4::from(pbr.base_color_factor());
        let colors: Option<Vec<Vec4>> = reader
            .read_colors(0)
            .map(|colors| colors.into_rgba_f32().map(Vec4::from).collect());
        let texels: Option<Vec<Vec4>> = pbr.base_color_texture().and_then(|info| {
            let image = images.get(info.texture().source().index())?;
            let uvs = reader.read_tex_coords(info.tex_coord())?;
            Some(
                uvs.into_f32()
                    .map(|uv| sample_texel(image, uv).unwrap_or(Vec4::ONE))
                    .collect(),
            )
        });

        let offset = self.vertices.len() as u32;
        self.vertices.extend(positions.iter().enumerate().map(|(i, p)| {
            let tint = colors
                .as_ref()
                .and_then(|c| c.get(i).copied())
                .unwrap_or(Vec4::ONE);
            let texel = texels
                .as_ref()
                .and_then(|t| t.get(i).copied())
                .unwrap_or(Vec4::ONE);
            MeshVertex {
                position: p.to_array(),
                normal: normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                color: (base * tint * texel).to_array(),
            }
        }));
        let whole_triangles = local_indices.len() - local_indices.len() % 3;
        self.indices
            .extend(local_indices[..whole_triangles].iter().map(|i| i + offset));
    }

    fn append_node(
        &mut self,
        node: &gltf::Node<'_>,
        buffers: &[gltf::buffer::Data],
        images: &[gltf::image::Data],
        parent: Mat4,
    ) {
        let transform =
            parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            for primitive in mesh.primitives() {
                self.append_primitive(&primitive, buffers, images, transform);
            }
        }
        for child in node.children() {
            self.append_node(&child, buffers, images, transform);
        }
    }
}

/// Parse a GLB or glTF JSON document (with embedded or data-URI buffers).
///
/// Walks the default scene, or the first scene, or failing both every mesh
/// with an identity transform.
///
/// # Errors
///
/// Returns [`AssetError::Parse`] if the document or its buffers cannot be
/// read and [`AssetError::Empty`] if it holds no triangle geometry.
pub fn parse_model(bytes: &[u8]) -> Result<ModelMesh, AssetError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&document, None, blob)?;
    let images = gltf::import_images(&document, None, &buffers).unwrap_or_else(|e| {
        log::warn!("model textures unavailable, using material colors: {e}");
        Vec::new()
    });

    let mut mesh = ModelMesh::default();
    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                mesh.append_node(&node, &buffers, &images, Mat4::IDENTITY);
            }
        }
        None => {
            for gltf_mesh in document.meshes() {
                for primitive in gltf_mesh.primitives() {
                    mesh.append_primitive(&primitive, &buffers, &images, Mat4::IDENTITY);
                }
            }
        }
    }

    if mesh.indices.is_empty() {
        return Err(AssetError::Empty);
    }
    Ok(mesh)
}

fn normal_matrix(transform: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(transform);
    if linear.determinant().abs() < f32::EPSILON {
        linear
    } else {
        linear.inverse().transpose()
    }
}

/// Nearest texel of an 8-bit image at `uv` with repeat wrapping, converted
/// from sRGB to linear. Other pixel formats yield `None`.
fn sample_texel(image: &gltf::image::Data, uv: [f32; 2]) -> Option<Vec4> {
    use gltf::image::Format;

    let channels = match image.format {
        Format::R8 => 1,
        Format::R8G8 => 2,
        Format::R8G8B8 => 3,
        Format::R8G8B8A8 => 4,
        _ => return None,
    };
    if image.width == 0 || image.height == 0 {
        return None;
    }
    let wrap = |t: f32, size: u32| {
        let t = t - t.floor();
        ((t * size as f32) as usize).min(size as usize - 1)
    };
    let x = wrap(uv[0], image.width);
    let y = wrap(uv[1], image.height);
    let start = (y * image.width as usize + x) * channels;
    let texel = image.pixels.get(start..start + channels)?;
    let unorm = |i: usize| f32::from(texel[i]) / 255.0;

    let rgb = if channels < 3 {
        Vec3::splat(unorm(0))
    } else {
        Vec3::new(unorm(0), unorm(1), unorm(2))
    };
    let alpha = match channels {
        2 => unorm(1),
        4 => unorm(3),
        _ => 1.0,
    };
    Some(srgb_to_linear(rgb).extend(alpha))
}

fn srgb_to_linear(c: Vec3) -> Vec3 {
    let channel = |v: f32| {
        if v <= 0.040_45 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(c.x), channel(c.y), channel(c.z))
}

/// Area-weighted vertex normals for primitives that ship without them.
fn generate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}
