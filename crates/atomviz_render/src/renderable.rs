//! Renderable scene - bridges the scene graph to GPU instance data
//!
//! Every visible mesh node becomes one instance (world matrix + color).
//! Instances sharing a shape are grouped so each shape is drawn with a
//! single instanced draw call.

use std::ops::Range;

use atomviz_core::{Scene, ShapeKey};

use crate::pipeline::InstanceRaw;

/// A run of instances that share one shape
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceBatch {
    pub shape: ShapeKey,
    /// Range into [`RenderableScene::instances`]
    pub range: Range<u32>,
}

impl InstanceBatch {
    pub fn len(&self) -> u32 {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// GPU-ready instance data collected from a scene
#[derive(Default)]
pub struct RenderableScene {
    instances: Vec<InstanceRaw>,
    batches: Vec<InstanceBatch>,
}

impl RenderableScene {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every visible mesh node of `scene`
    ///
    /// Batches come out in the order their shape is first met during the
    /// depth-first walk.
    pub fn collect(scene: &Scene) -> Self {
        let mut result = Self::new();
        result.rebuild(scene);
        result
    }

    /// Refill from `scene`, reusing allocations
    pub fn rebuild(&mut self, scene: &Scene) {
        let mut groups: Vec<(ShapeKey, Vec<InstanceRaw>)> = Vec::new();

        scene.visit_visible(|_, node, world| {
            let Some(shape) = node.shape() else { return };
            let instance = InstanceRaw {
                model: world.to_cols_array_2d(),
                color: node.material().linear_rgba(),
            };
            match groups.iter_mut().find(|(key, _)| *key == shape) {
                Some((_, list)) => list.push(instance),
                None => groups.push((shape, vec![instance])),
            }
        });

        self.instances.clear();
        self.batches.clear();
        for (shape, list) in groups {
            let start = self.instances.len() as u32;
            self.instances.extend(list);
            self.batches.push(InstanceBatch {
                shape,
                range: start..self.instances.len() as u32,
            });
        }
    }

    /// All instances, batch after batch
    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    pub fn batches(&self) -> &[InstanceBatch] {
        &self.batches
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.batches.clear();
    }
}
