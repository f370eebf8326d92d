use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::grid::GridDescriptor;

use super::ctx::{RenderCtx, RenderTarget};
use super::error::RenderError;

/// Background color every pass clears to.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.25,
    a: 1.0,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CellVertex {
    pos: [f32; 2],
}

impl CellVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CellVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two triangles covering one cell in [-1, 1] local space.
const CELL_VERTICES: [CellVertex; 6] = [
    CellVertex { pos: [-1.0, -1.0] },
    CellVertex { pos: [1.0, -1.0] },
    CellVertex { pos: [1.0, 1.0] },
    CellVertex { pos: [-1.0, -1.0] },
    CellVertex { pos: [1.0, 1.0] },
    CellVertex { pos: [-1.0, 1.0] },
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GridUniform {
    size: [f32; 2],
}

/// Instanced cell-grid renderer.
///
/// All GPU resources are created once in [`GridRenderer::new`]: the static
/// cell geometry, the grid-parameter uniform, one read-only storage buffer
/// per state array, and one bind group pairing the uniform with each state
/// buffer. Nothing is written after construction; per-tick work is limited
/// to recording the pass, so re-invoking [`render`](Self::render) never
/// mutates geometry or state.
pub struct GridRenderer {
    grid: GridDescriptor,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    // Written once here, read only by the shader afterwards. The bind
    // groups reference them; the fields pin exclusive ownership.
    _grid_params: wgpu::Buffer,
    _state_buffers: Vec<wgpu::Buffer>,
    bind_groups: Vec<wgpu::BindGroup>,
}

impl GridRenderer {
    /// Creates the pipeline and uploads all static data.
    ///
    /// `states` holds one host-side activation array per binding set; every
    /// array's length must equal `grid.cell_count()`. A mismatch fails
    /// before any device work happens.
    pub fn new(
        ctx: &RenderCtx<'_>,
        grid: GridDescriptor,
        states: &[Vec<u32>],
    ) -> Result<Self, RenderError> {
        validate_state_lengths(grid.cell_count() as usize, states)?;

        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("cellgrid shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/grid.wgsl").into()),
            });

        // The layout is declared explicitly and must mirror the shader's
        // resource bindings: grid params at 0, state array at 1.
        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("cellgrid bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(
                                    std::mem::size_of::<GridUniform>() as u64,
                                ),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Storage { read_only: true },
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(
                                    std::mem::size_of::<u32>() as u64,
                                ),
                            },
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("cellgrid pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("cellgrid pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[CellVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cellgrid cell vbo"),
                contents: bytemuck::cast_slice(&CELL_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let grid_params = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cellgrid grid params"),
                contents: bytemuck::bytes_of(&GridUniform {
                    size: grid.as_uniform(),
                }),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let mut state_buffers = Vec::with_capacity(states.len());
        let mut bind_groups = Vec::with_capacity(states.len());

        for (i, state) in states.iter().enumerate() {
            let buffer = ctx
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("cellgrid cell state"),
                    contents: bytemuck::cast_slice(state),
                    usage: wgpu::BufferUsages::STORAGE,
                });

            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("cellgrid bind group"),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: grid_params.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: buffer.as_entire_binding(),
                    },
                ],
            });

            log::debug!("state buffer {i}: {} cells uploaded", state.len());
            state_buffers.push(buffer);
            bind_groups.push(bind_group);
        }

        Ok(Self {
            grid,
            pipeline,
            vertex_buffer,
            _grid_params: grid_params,
            _state_buffers: state_buffers,
            bind_groups,
        })
    }

    /// Number of binding sets (one per state buffer).
    pub fn binding_count(&self) -> usize {
        self.bind_groups.len()
    }

    /// Instance count of the grid draw call.
    pub fn instance_count(&self) -> u32 {
        self.grid.cell_count()
    }

    /// Records one grid pass into `target`: clears to the background color,
    /// binds the pipeline, the selected binding set and the static cell
    /// geometry, then issues a single instanced draw over every cell.
    ///
    /// The sequence has no branching; it is identical every tick except for
    /// which binding set is bound.
    pub fn render(&self, target: &mut RenderTarget<'_>, set_index: usize) {
        debug_assert!(set_index < self.bind_groups.len());
        let Some(bind_group) = self.bind_groups.get(set_index) else {
            return;
        };

        let mut rpass = target
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cellgrid pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..CELL_VERTICES.len() as u32, 0..self.grid.cell_count());
    }
}

fn validate_state_lengths(expected: usize, states: &[Vec<u32>]) -> Result<(), RenderError> {
    for state in states {
        if state.len() != expected {
            return Err(RenderError::BufferLengthMismatch {
                expected,
                actual: state.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── state length validation ───────────────────────────────────────────

    #[test]
    fn matching_lengths_pass() {
        let states = [vec![0u32; 16], vec![1u32; 16]];
        assert_eq!(validate_state_lengths(16, &states), Ok(()));
    }

    #[test]
    fn short_buffer_fails_fast() {
        let states = [vec![0u32; 16], vec![1u32; 15]];
        assert_eq!(
            validate_state_lengths(16, &states),
            Err(RenderError::BufferLengthMismatch {
                expected: 16,
                actual: 15,
            })
        );
    }

    #[test]
    fn long_buffer_fails_fast() {
        let states = [vec![1u32; 17]];
        assert_eq!(
            validate_state_lengths(16, &states),
            Err(RenderError::BufferLengthMismatch {
                expected: 16,
                actual: 17,
            })
        );
    }

    #[test]
    fn no_states_is_vacuously_valid() {
        assert_eq!(validate_state_lengths(16, &[]), Ok(()));
    }

    // ── static geometry ───────────────────────────────────────────────────

    #[test]
    fn cell_geometry_is_two_triangles_in_unit_space() {
        assert_eq!(CELL_VERTICES.len(), 6);
        for v in &CELL_VERTICES {
            assert!(v.pos[0] >= -1.0 && v.pos[0] <= 1.0);
            assert!(v.pos[1] >= -1.0 && v.pos[1] <= 1.0);
        }
        // All four corners appear, so the two triangles cover the cell.
        for corner in [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]] {
            assert!(CELL_VERTICES.iter().any(|v| v.pos == corner));
        }
    }

    #[test]
    fn vertex_stride_is_two_packed_floats() {
        assert_eq!(std::mem::size_of::<CellVertex>(), 8);
    }
}
