// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;

use std::str::FromStr;

const SAH_BUCKETS: usize = 12;

/// How interior nodes choose their partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMethod {
    /// Median primitive along the widest centroid axis.
    Naive,
    /// Surface area heuristic over fixed buckets.
    Sah,
}

impl FromStr for SplitMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(SplitMethod::Naive),
            "sah" => Ok(SplitMethod::Sah),
            other => Err(format!("unknown split method '{}', expected naive or sah", other)),
        }
    }
}

#[derive(Clone)]
struct BVHNode {
    bounds: AABB,
    left: Option<usize>,
    right: Option<usize>,
    start: usize,
    count: usize,
}

impl BVHNode {
    fn leaf(bounds: AABB, start: usize, count: usize) -> Self {
        Self { bounds, left: None, right: None, start, count }
    }

    fn interior(bounds: AABB, left: usize, right: usize) -> Self {
        Self { bounds, left: Some(left), right: Some(right), start: 0, count: 0 }
    }

    fn is_leaf(&self) -> bool {
        self.count > 0
    }
}

pub struct BVH {
    nodes: Vec<BVHNode>,
    indices: Vec<usize>,
    prim_bounds: Vec<AABB>,
    prim_centroids: Vec<Vector3f>,
    max_leaf_size: usize,
    split_method: SplitMethod,
}

impl BVH {
    pub fn new(prim_bounds: Vec<AABB>, prim_centroids: Vec<Vector3f>) -> Self {
        Self::with_options(prim_bounds, prim_centroids, 4, SplitMethod::Sah)
    }

    pub fn with_options(
        prim_bounds: Vec<AABB>,
        prim_centroids: Vec<Vector3f>,
        max_leaf_size: usize,
        split_method: SplitMethod,
    ) -> Self {
        // BVH stores only primitive bounds/centroids; intersection is delegated via callbacks.
        let mut bvh = Self {
            indices: (0..prim_bounds.len()).collect(),
            nodes: Vec::new(),
            prim_bounds,
            prim_centroids,
            max_leaf_size: max_leaf_size.max(1),
            split_method,
        };

        if !bvh.indices.is_empty() {
            let (bounds, centroid_bounds) = bvh.compute_bounds(0, bvh.indices.len());
            bvh.build(0, bvh.indices.len(), bounds, centroid_bounds);
        }

        bvh
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the closest hit reported by `hit_fn` together with the index of
    /// the primitive that produced it.
    pub fn ray_intersection<F, T>(&self, ray: &Ray3f, mut hit_fn: F) -> Option<(usize, T)>
    where
        F: FnMut(usize, &Ray3f) -> Option<(T, Float)>,
    {
        if self.nodes.is_empty() {
            return None;
        }

        let mut closest: Option<(usize, T)> = None;
        // Shrinks to the closest hit so farther nodes are culled.
        let mut query = *ray;
        let mut stack = vec![0usize];

        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if !node.bounds.ray_intersect(&query) {
                continue;
            }

            if node.is_leaf() {
                for i in 0..node.count {
                    let prim_idx = self.indices[node.start + i];
                    if let Some((hit, t)) = hit_fn(prim_idx, &query) {
                        if query.update(t) {
                            closest = Some((prim_idx, hit));
                        }
                    }
                }
            } else {
                // Depth-first traversal with an explicit stack.
                if let Some(left) = node.left {
                    stack.push(left);
                }
                if let Some(right) = node.right {
                    stack.push(right);
                }
            }
        }

        closest
    }

    fn build(&mut self, start: usize, end: usize, bounds: AABB, centroid_bounds: AABB) -> usize {
        let count = end - start;
        if count <= self.max_leaf_size {
            // Small enough: create a leaf.
            return self.push_leaf(bounds, start, count);
        }

        let axis = centroid_bounds.max_extent();
        let axis_min = centroid_bounds.p_min[axis];
        let axis_max = centroid_bounds.p_max[axis];
        if (axis_max - axis_min).abs() < 1e-6 && self.split_method == SplitMethod::Sah {
            // Degenerate centroid bounds: fall back to leaf.
            return self.push_leaf(bounds, start, count);
        }

        let mid = match self.split_method {
            SplitMethod::Naive => Some(self.partition_median(start, end, axis)),
            SplitMethod::Sah => self.partition_sah(start, end, axis, axis_min, axis_max, &bounds),
        };

        let mid = match mid {
            Some(mid) if mid != start && mid != end => mid,
            // Partition failed or a leaf is cheaper.
            _ => return self.push_leaf(bounds, start, count),
        };

        // Build child nodes and stitch them into an interior node.
        let (left_bounds, left_centroids) = self.compute_bounds(start, mid);
        let (right_bounds, right_centroids) = self.compute_bounds(mid, end);
        let node_idx = self.nodes.len();
        self.nodes.push(BVHNode::leaf(bounds, 0, 0));
        let left = self.build(start, mid, left_bounds, left_centroids);
        let right = self.build(mid, end, right_bounds, right_centroids);
        self.nodes[node_idx] = BVHNode::interior(bounds, left, right);
        node_idx
    }

    fn push_leaf(&mut self, bounds: AABB, start: usize, count: usize) -> usize {
        let node_idx = self.nodes.len();
        self.nodes.push(BVHNode::leaf(bounds, start, count));
        node_idx
    }

    fn partition_median(&mut self, start: usize, end: usize, axis: usize) -> usize {
        let mid = start + (end - start) / 2;
        let centroids = &self.prim_centroids;
        self.indices[start..end].select_nth_unstable_by(mid - start, |a, b| {
            centroids[*a][axis].total_cmp(&centroids[*b][axis])
        });
        mid
    }

    fn bucket_of(&self, prim_idx: usize, axis: usize, axis_min: Float, axis_max: Float) -> usize {
        let c = self.prim_centroids[prim_idx][axis];
        let b = ((c - axis_min) / (axis_max - axis_min) * SAH_BUCKETS as Float) as usize;
        b.min(SAH_BUCKETS - 1)
    }

    fn partition_sah(
        &mut self,
        start: usize,
        end: usize,
        axis: usize,
        axis_min: Float,
        axis_max: Float,
        bounds: &AABB,
    ) -> Option<usize> {
        // SAH with fixed buckets along the split axis.
        let mut buckets = vec![(0usize, AABB::default()); SAH_BUCKETS];
        for i in start..end {
            let idx = self.indices[i];
            let b = self.bucket_of(idx, axis, axis_min, axis_max);
            buckets[b].0 += 1;
            buckets[b].1.expand_by_aabb(&self.prim_bounds[idx]);
        }

        let area = bounds.surface_area().max(1e-6);
        let mut min_cost = Float::MAX;
        let mut min_split = 0usize;
        for i in 0..(SAH_BUCKETS - 1) {
            let mut b0 = AABB::default();
            let mut b1 = AABB::default();
            let mut count0 = 0usize;
            let mut count1 = 0usize;
            for bucket in &buckets[..=i] {
                count0 += bucket.0;
                b0.expand_by_aabb(&bucket.1);
            }
            for bucket in &buckets[(i + 1)..] {
                count1 += bucket.0;
                b1.expand_by_aabb(&bucket.1);
            }
            let cost0 = if count0 > 0 { (count0 as Float) * b0.surface_area() } else { 0.0 };
            let cost1 = if count1 > 0 { (count1 as Float) * b1.surface_area() } else { 0.0 };
            let cost = 1.0 + (cost0 + cost1) / area;
            if cost < min_cost {
                min_cost = cost;
                min_split = i;
            }
        }

        // If SAH says leaf is cheaper, stop splitting.
        if min_cost >= (end - start) as Float {
            return None;
        }

        // Partition indices in-place by bucket.
        let mut mid = start;
        for i in start..end {
            let idx = self.indices[i];
            if self.bucket_of(idx, axis, axis_min, axis_max) <= min_split {
                self.indices.swap(i, mid);
                mid += 1;
            }
        }
        Some(mid)
    }

    fn compute_bounds(&self, start: usize, end: usize) -> (AABB, AABB) {
        let mut bounds = AABB::default();
        let mut centroid_bounds = AABB::default();
        for i in start..end {
            let idx = self.indices[i];
            bounds.expand_by_aabb(&self.prim_bounds[idx]);
            centroid_bounds.expand_by_point(&self.prim_centroids[idx]);
        }
        (bounds, centroid_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::{SplitMethod, BVH};
    use crate::core::shape::Shape;
    use crate::math::constants::{Float, Vector3f};
    use crate::math::ray::Ray3f;
    use crate::shapes::triangle::Triangle;

    fn build_triangles() -> Vec<Triangle> {
        let mut tris = Vec::new();
        for i in 0..8 {
            let x = i as Float * 2.0;
            // Staggered depths so rays can hit several triangles.
            let z = (i % 3) as Float;
            let p0 = Vector3f::new(x, 0.0, z);
            let p1 = Vector3f::new(x + 2.5, 0.0, z);
            let p2 = Vector3f::new(x, 2.5, z);
            tris.push(Triangle::new(p0, p1, p2));
        }
        tris
    }

    fn build_bvh(triangles: &[Triangle], split: SplitMethod) -> BVH {
        let mut prim_bounds = Vec::with_capacity(triangles.len());
        let mut prim_centroids = Vec::with_capacity(triangles.len());
        for tri in triangles {
            let b = tri.bounding_box();
            prim_centroids.push(b.center());
            prim_bounds.push(b);
        }
        BVH::with_options(prim_bounds, prim_centroids, 1, split)
    }

    fn bvh_t(bvh: &BVH, triangles: &[Triangle], ray: &Ray3f) -> Option<Float> {
        bvh.ray_intersection(ray, |prim_idx, ray| {
            triangles[prim_idx].ray_intersection(ray).map(|h| (h.t(), h.t()))
        })
        .map(|(_, t)| t)
    }

    fn naive_t(triangles: &[Triangle], ray: &Ray3f) -> Option<Float> {
        triangles
            .iter()
            .filter_map(|tri| tri.ray_intersection(ray).map(|h| h.t()))
            .fold(None, |acc: Option<Float>, t| Some(acc.map_or(t, |cur| cur.min(t))))
    }

    #[test]
    fn test_bvh_vs_naive_triangles() {
        let triangles = build_triangles();
        for split in [SplitMethod::Naive, SplitMethod::Sah] {
            let bvh = build_bvh(&triangles, split);
            assert!(bvh.node_count() > 1);

            for i in 0..32 {
                let origin = Vector3f::new(i as Float * 0.55 + 0.1, 0.3, 10.0);
                let ray = Ray3f::new(origin, Vector3f::new(0.0, 0.0, -1.0), None, None);
                let expected = naive_t(&triangles, &ray);
                let got = bvh_t(&bvh, &triangles, &ray);
                match (expected, got) {
                    (Some(a), Some(b)) => assert!((a - b).abs() < 1e-5, "ray {} with {:?}", i, split),
                    (None, None) => {}
                    other => panic!("mismatch for ray {} with {:?}: {:?}", i, split, other),
                }
            }

            let miss_ray = Ray3f::new(Vector3f::new(100.0, 100.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
            assert!(bvh_t(&bvh, &triangles, &miss_ray).is_none());
        }
    }

    #[test]
    fn test_empty_bvh_never_hits() {
        let bvh = BVH::new(Vec::new(), Vec::new());
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let hit: Option<(usize, ())> = bvh.ray_intersection(&ray, |_, _| Some(((), 1.0)));
        assert!(hit.is_none());
        assert_eq!(bvh.node_count(), 0);
    }

    #[test]
    fn test_split_method_from_str() {
        assert_eq!("naive".parse::<SplitMethod>(), Ok(SplitMethod::Naive));
        assert_eq!("SAH".parse::<SplitMethod>(), Ok(SplitMethod::Sah));
        assert!("octree".parse::<SplitMethod>().is_err());
    }
}
