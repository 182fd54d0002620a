//! Triangulation of closed shapes for filled display.

use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

use shapekit_core::Vec3;

use super::ShapeObject;
use crate::error::ShapeError;

/// World-space triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillMesh {
    pub vertices: Vec<Vec3>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl FillMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl ShapeObject {
    /// Floor triangles, plus a roof cap when the shape has height.
    ///
    /// Open shapes and shapes with fewer than three points have no fill.
    /// The outline is triangulated in the local XY plane; local Z rides
    /// along as an interpolated attribute.
    pub fn fill_mesh(&self) -> Result<FillMesh, ShapeError> {
        if !self.closed || self.points.len() < 3 {
            return Ok(FillMesh::default());
        }

        let mut builder = Path::builder_with_attributes(1);
        let first = self.points[0];
        builder.begin(point(first.x as f32, first.y as f32), &[first.z as f32]);
        for p in &self.points[1..] {
            builder.line_to(point(p.x as f32, p.y as f32), &[p.z as f32]);
        }
        builder.end(true);
        let path = builder.build();

        let mut buffers: VertexBuffers<Vec3, u32> = VertexBuffers::new();
        let mut tessellator = FillTessellator::new();
        tessellator
            .tessellate_path(
                &path,
                &FillOptions::default(),
                &mut BuffersBuilder::new(&mut buffers, |mut vertex: FillVertex| {
                    let position = vertex.position();
                    let z = vertex.interpolated_attributes().first().copied().unwrap_or(0.0);
                    Vec3::new(position.x as f64, position.y as f64, z as f64)
                }),
            )
            .map_err(|err| ShapeError::Triangulation(format!("{:?}", err)))?;

        let mut vertices: Vec<Vec3> = buffers
            .vertices
            .iter()
            .map(|v| self.transform.transform_point(v))
            .collect();
        let mut indices = buffers.indices;

        if self.height > 0.0 {
            let offset = vertices.len() as u32;
            let roof: Vec<Vec3> = vertices.iter().map(|v| self.roof_point(v)).collect();
            let roof_indices: Vec<u32> = indices.iter().map(|i| i + offset).collect();
            vertices.extend(roof);
            indices.extend(roof_indices);
        }

        Ok(FillMesh { vertices, indices })
    }
}
