use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use tiltscenes_gpu_shared::palette::Rgba;
use tiltscenes_gpu_shared::uniforms::{ShapeInstance, ShapeKind};

/// Handle store mapping opaque u64 handles to values. Ordered, so meshes
/// are drawn in creation order and overlaps do not flicker between frames.
pub struct HandleStore<T> {
    items: BTreeMap<u64, T>,
    next_handle: u64,
}

impl<T> HandleStore<T> {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Insert an item and return its opaque handle. Handles are never reused.
    pub fn insert(&mut self, item: T) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.items.insert(handle, item);
        handle
    }

    pub fn get(&self, handle: u64) -> Option<&T> {
        self.items.get(&handle)
    }

    pub fn get_mut(&mut self, handle: u64) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: u64) -> Option<T> {
        self.items.remove(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u64, &T)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for HandleStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Box { width: f32, height: f32 },
    Circle { radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: MaterialHandle,
    pub position: Vec3,
    pub rotation: f32,
    pub visible: bool,
}

/// CPU side of a scene's display list. Every mesh owns exactly one
/// material; disposing the mesh releases both.
#[derive(Default)]
pub struct SceneGraph {
    meshes: HandleStore<Mesh>,
    materials: HandleStore<Material>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, geometry: Geometry, color: Rgba) -> MeshHandle {
        let material = MaterialHandle(self.materials.insert(Material { color }));
        MeshHandle(self.meshes.insert(Mesh {
            geometry,
            material,
            position: Vec3::ZERO,
            rotation: 0.0,
            visible: true,
        }))
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0)
    }

    pub fn set_transform(&mut self, handle: MeshHandle, position: Vec2, rotation: f32) {
        if let Some(mesh) = self.meshes.get_mut(handle.0) {
            mesh.position.x = position.x;
            mesh.position.y = position.y;
            mesh.rotation = rotation;
        }
    }

    pub fn set_geometry(&mut self, handle: MeshHandle, geometry: Geometry) {
        if let Some(mesh) = self.meshes.get_mut(handle.0) {
            mesh.geometry = geometry;
        }
    }

    pub fn set_visible(&mut self, handle: MeshHandle, visible: bool) {
        if let Some(mesh) = self.meshes.get_mut(handle.0) {
            mesh.visible = visible;
        }
    }

    /// Drop a mesh and its material. Returns `false` if it was already gone.
    pub fn dispose(&mut self, handle: MeshHandle) -> bool {
        match self.meshes.remove(handle.0) {
            Some(mesh) => {
                self.materials.remove(mesh.material.0);
                true
            }
            None => false,
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Visible meshes as GPU instances, in creation order.
    pub fn instances(&self) -> Vec<ShapeInstance> {
        self.meshes
            .iter()
            .filter(|(_, mesh)| mesh.visible)
            .map(|(_, mesh)| {
                let color = self
                    .materials
                    .get(mesh.material.0)
                    .map(|m| m.color)
                    .unwrap_or([1.0; 4]);
                let (kind, half_size) = match mesh.geometry {
                    Geometry::Box { width, height } => (ShapeKind::Rect, [width / 2.0, height / 2.0]),
                    Geometry::Circle { radius } => (ShapeKind::Disc, [radius, radius]),
                };
                ShapeInstance::new(kind, mesh.position.to_array(), half_size, mesh.rotation, color)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

    // ── HandleStore ──

    #[test]
    fn test_handles_are_not_reused() {
        let mut store = HandleStore::new();
        let a = store.insert("a");
        store.remove(a);
        let b = store.insert("b");
        assert_ne!(a, b);
        assert!(store.get(a).is_none());
        assert_eq!(store.get(b), Some(&"b"));
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let mut store = HandleStore::new();
        for i in 0..5 {
            store.insert(i);
        }
        let values: Vec<i32> = store.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    // ── SceneGraph ──

    #[test]
    fn test_dispose_releases_mesh_and_material() {
        let mut graph = SceneGraph::new();
        let keep = graph.add_mesh(Geometry::Circle { radius: 5.0 }, RED);
        let gone = graph.add_mesh(Geometry::Box { width: 2.0, height: 4.0 }, RED);
        assert_eq!((graph.mesh_count(), graph.material_count()), (2, 2));

        assert!(graph.dispose(gone));
        assert_eq!((graph.mesh_count(), graph.material_count()), (1, 1));
        assert!(graph.mesh(keep).is_some());

        assert!(!graph.dispose(gone));
        assert_eq!((graph.mesh_count(), graph.material_count()), (1, 1));
    }

    #[test]
    fn test_instances_skip_hidden() {
        let mut graph = SceneGraph::new();
        let a = graph.add_mesh(Geometry::Box { width: 2.0, height: 4.0 }, RED);
        let b = graph.add_mesh(Geometry::Circle { radius: 3.0 }, RED);
        graph.set_visible(a, false);
        graph.set_transform(b, Vec2::new(10.0, 20.0), 0.5);

        let instances = graph.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].kind, ShapeKind::Disc as u32);
        assert_eq!(instances[0].center, [10.0, 20.0, 0.0]);
        assert_eq!(instances[0].half_size, [3.0, 3.0]);
        assert_eq!(instances[0].rotation, 0.5);
    }

    #[test]
    fn test_box_half_size() {
        let mut graph = SceneGraph::new();
        graph.add_mesh(Geometry::Box { width: 2.0, height: 4.0 }, RED);
        assert_eq!(graph.instances()[0].half_size, [1.0, 2.0]);
    }
}
