//! Cross-check nearest-neighbor results against an independent spatial index.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::{RTree, AABB};

use crate::{KdTree, Point};

fn random_coords(rng: &mut StdRng, n: usize) -> Vec<[f64; 2]> {
    (0..n)
        .map(|_| [rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)])
        .collect()
}

fn sq_dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Every point strictly closer than the returned neighbor would have to fall inside the
/// bounding box of the search circle, so querying rstar for that box must not turn up one.
fn check_against_rstar(rstar_tree: &RTree<[f64; 2]>, nearest: &Point<f64>, query: [f64; 2]) {
    let best = sq_dist([nearest[0], nearest[1]], query);
    let r = best.sqrt();
    let aabb = AABB::from_corners([query[0] - r, query[1] - r], [query[0] + r, query[1] + r]);

    for candidate in rstar_tree.locate_in_envelope(&aabb) {
        assert!(
            sq_dist(*candidate, query) >= best,
            "{:?} is closer to {:?} than {}",
            candidate,
            query,
            nearest
        );
    }
}

#[test]
fn pruned_search_matches_rstar() {
    let mut rng = StdRng::seed_from_u64(42);
    let coords = random_coords(&mut rng, 5000);

    let rstar_tree = RTree::bulk_load(coords.clone());
    let tree = KdTree::build(coords.iter().map(|&c| Point::from(c)).collect()).unwrap();

    for query in random_coords(&mut rng, 500) {
        let nearest = tree.nearest(&Point::from(query)).unwrap();
        assert!(coords.contains(&[nearest[0], nearest[1]]));
        check_against_rstar(&rstar_tree, &nearest, query);
    }
}

#[test]
fn brute_force_matches_rstar() {
    let mut rng = StdRng::seed_from_u64(43);
    let coords = random_coords(&mut rng, 300);

    let rstar_tree = RTree::bulk_load(coords.clone());
    let tree = KdTree::build(coords.iter().map(|&c| Point::from(c)).collect()).unwrap();

    for query in random_coords(&mut rng, 100) {
        let nearest = tree.nearest_brute_force(&Point::from(query)).unwrap();
        check_against_rstar(&rstar_tree, &nearest, query);
    }
}
