use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use bevy::render::primitives::Aabb;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::window::PrimaryWindow;

use crate::scene_index::ContactShadow;
use crate::MainCamera;

/// Mesh entity under the cursor this frame, nearest first.
#[derive(Resource, Default, Debug, PartialEq)]
pub struct PointerHit(pub Option<Entity>);

pub struct PickingPlugin;
impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerHit>()
            .add_systems(PreUpdate, update_pointer_hit);
    }
}

/// Slab test. Returns the ray parameter of the entry point (or 0 when the
/// origin is inside the box).
pub fn ray_box(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    (t_far >= 0.0).then_some(t_near.max(0.0))
}

/// Möller-Trumbore. Both faces count as hits.
pub fn ray_triangle(origin: Vec3, dir: Vec3, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-12 {
        return None;
    }
    let inv = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t > 0.0).then_some(t)
}

/// Nearest triangle hit of a triangle-list mesh, ray in mesh space.
pub fn ray_mesh(origin: Vec3, dir: Vec3, mesh: &Mesh) -> Option<f32> {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        return None;
    }
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return None;
    };
    let vertex = |i: usize| positions.get(i).map(|p| Vec3::from(*p));
    let indices: Vec<usize> = match mesh.indices() {
        Some(indices) => indices.iter().collect(),
        None => (0..positions.len()).collect(),
    };

    indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let corners = [vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?];
            ray_triangle(origin, dir, corners)
        })
        .min_by(f32::total_cmp)
}

/// Nearest hit along `ray`. Boxes (in their own local space) are the broad
/// phase; a loaded mesh confirms the hit against its triangles. Without a
/// mesh, a box enclosing the ray origin never counts.
pub fn nearest_hit<'a>(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (Entity, &'a Aabb, &'a GlobalTransform, Option<&'a Mesh>)>,
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for (entity, aabb, gt, mesh) in candidates {
        let to_local = gt.affine().inverse();
        let origin = to_local.transform_point3(ray.origin);
        let dir = to_local.transform_vector3(*ray.direction);
        let min = Vec3::from(aabb.min());
        let max = Vec3::from(aabb.max());
        let Some(entry) = ray_box(origin, dir, min, max) else {
            continue;
        };
        if best.is_some_and(|(_, bt)| entry >= bt) {
            continue;
        }
        let t = match mesh {
            Some(mesh) => ray_mesh(origin, dir, mesh),
            None => (entry > 0.0).then_some(entry),
        };
        // the local ray is a linear image of the world ray, so `t` compares
        // across meshes
        if let Some(t) = t.filter(|&t| best.map_or(true, |(_, bt)| t < bt)) {
            best = Some((entity, t));
        }
    }
    best.map(|(e, _)| e)
}

fn update_pointer_hit(
    windows: Query<&Window, With<PrimaryWindow>>,
    q_cam: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    meshes: Query<
        (Entity, &Handle<Mesh>, &Aabb, &GlobalTransform, &ViewVisibility),
        Without<ContactShadow>,
    >,
    mesh_assets: Res<Assets<Mesh>>,
    mut hit: ResMut<PointerHit>,
) {
    let ray = windows.get_single().ok().and_then(|win| {
        let cursor = win.cursor_position()?;
        let (cam, gt) = q_cam.get_single().ok()?;
        cam.viewport_to_world(gt, cursor)
    });

    let next = ray.and_then(|ray| {
        nearest_hit(
            ray,
            meshes
                .iter()
                .filter(|(_, _, _, _, vis)| vis.get())
                .map(|(e, handle, aabb, gt, _)| (e, aabb, gt, mesh_assets.get(handle))),
        )
    });
    hit.set_if_neq(PointerHit(next));
}
