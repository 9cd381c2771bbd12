use rstar::{PointDistance, RTree, primitives::GeomWithData};

use crate::problem::{
    location::Location,
    package::{Package, PackageIdx},
};

type IndexedPackage = GeomWithData<[f64; 2], PackageIdx>;

/// R-tree over package positions, used to prune the package graph to its nearest neighbors.
pub struct PackageLocationIndex {
    tree: RTree<IndexedPackage>,
}

impl PackageLocationIndex {
    pub fn new(packages: &[Package]) -> PackageLocationIndex {
        let tree = RTree::bulk_load(
            PackageIdx::range(packages.len())
                .map(|package_id| {
                    IndexedPackage::new(packages[package_id].location().as_array(), package_id)
                })
                .collect(),
        );

        PackageLocationIndex { tree }
    }

    /// The `k` packages closest to `location`, nearest first. Packages at the same distance are
    /// ordered by index, so the cut at the k-th neighbor is deterministic.
    pub fn k_nearest(
        &self,
        location: &Location,
        k: usize,
        exclude: Option<PackageIdx>,
    ) -> Vec<PackageIdx> {
        if k == 0 {
            return vec![];
        }

        let point = location.as_array();
        let mut candidates: Vec<(PackageIdx, f64)> = Vec::with_capacity(k + 1);

        for item in self.tree.nearest_neighbor_iter(&point) {
            if Some(item.data) == exclude {
                continue;
            }

            let distance_2 = item.geom().distance_2(&point);
            if candidates.len() >= k
                && candidates
                    .last()
                    .is_some_and(|&(_, last)| distance_2 > last)
            {
                break;
            }

            candidates.push((item.data, distance_2));
        }

        candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        candidates.truncate(k);
        candidates.into_iter().map(|(package_id, _)| package_id).collect()
    }
}
