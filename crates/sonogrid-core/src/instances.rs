//! Per-instance transform/color store shared with the GPU uploader.

use crate::constants::INITIAL_INSTANCE_COLOR;
use crate::grid::GridLayout;
use glam::Vec3;

/// One instance as laid out in the vertex buffer (step mode: instance).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
}

/// Which halves of the store changed since the last upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub transforms: bool,
    pub colors: bool,
}

impl DirtyFlags {
    pub fn any(self) -> bool {
        self.transforms || self.colors
    }
}

/// Instance records, mutated in place every frame and never destroyed.
///
/// Writers call [`InstanceStore::apply`] per cell and [`InstanceStore::commit`]
/// once after the last cell; the upload signal is raised by `commit` only.
#[derive(Clone, Debug)]
pub struct InstanceStore {
    instances: Vec<InstanceRaw>,
    dirty: DirtyFlags,
    commits: u64,
}

impl InstanceStore {
    /// Flat grid at height zero, initial color, flagged for the first upload.
    pub fn new(layout: &GridLayout, scale: f32) -> Self {
        let [r, g, b] = INITIAL_INSTANCE_COLOR;
        let instances = layout
            .cells()
            .map(|(_, x, y)| InstanceRaw {
                position: layout.position(x, y, 0.0).to_array(),
                scale,
                color: [r, g, b, 1.0],
            })
            .collect();
        Self {
            instances,
            dirty: DirtyFlags {
                transforms: true,
                colors: true,
            },
            commits: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Write cell `i`. Out-of-range indices are ignored.
    #[inline]
    pub fn apply(&mut self, i: usize, position: Vec3, color: [f32; 3]) {
        if let Some(slot) = self.instances.get_mut(i) {
            slot.position = position.to_array();
            slot.color = [color[0], color[1], color[2], 1.0];
        }
    }

    /// Mark transforms and colors for upload. Call once per frame.
    pub fn commit(&mut self) {
        self.dirty = DirtyFlags {
            transforms: true,
            colors: true,
        };
        self.commits += 1;
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Consume the upload signal.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    /// Number of `commit` calls so far.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    pub fn as_slice(&self) -> &[InstanceRaw] {
        &self.instances
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
