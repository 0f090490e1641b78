use approx::assert_relative_eq;
use scadgeom::math::{Point, Point2, Point3, Real, EPSILON};
use scadgeom::query;

fn square(center: [Real; 2]) -> Vec<Point2<Real>> {
    [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]]
        .iter()
        .map(|[x, y]| Point2::new(center[0] + x / 2.0, center[1] + y / 2.0))
        .collect()
}

fn cube(origin: [Real; 3]) -> Vec<Point3<Real>> {
    (0..8)
        .map(|i| {
            Point3::new(
                origin[0] + (i & 1) as Real,
                origin[1] + ((i >> 1) & 1) as Real,
                origin[2] + ((i >> 2) & 1) as Real,
            )
        })
        .collect()
}

#[test]
fn separated_squares() {
    let a = square([0.0, 0.0]);
    let b = square([3.0, 0.0]);
    assert_relative_eq!(
        query::convex_distance(&a, &b, EPSILON).unwrap(),
        2.0,
        epsilon = 1.0e-9
    );
    assert!(!query::convex_collision(&a, &b, EPSILON).unwrap());
}

#[test]
fn overlapping_squares() {
    let a = square([0.0, 0.0]);
    let b = square([1.0, 1.0]);
    let b_overlapping = square([0.5, 0.5]);

    assert!(query::convex_distance(&a, &b, EPSILON).unwrap() < 1.0e-9);
    assert!(query::convex_collision(&a, &b, EPSILON).unwrap());
    assert_eq!(query::convex_distance(&a, &b_overlapping, EPSILON).unwrap(), 0.0);
    assert!(query::convex_collision(&a, &b_overlapping, EPSILON).unwrap());
}

#[test]
fn separated_cubes() {
    let a = cube([0.0, 0.0, 0.0]);
    let b = cube([3.0, 0.5, 0.2]);
    assert_relative_eq!(
        query::convex_distance(&a, &b, EPSILON).unwrap(),
        2.0,
        epsilon = 1.0e-9
    );
    assert!(!query::convex_collision(&a, &b, EPSILON).unwrap());

    let (p1, p2) = query::convex_closest_points(&a, &b, EPSILON).unwrap();
    assert_relative_eq!(p1.x, 1.0, epsilon = 1.0e-9);
    assert_relative_eq!(p2.x, 3.0, epsilon = 1.0e-9);
    assert_relative_eq!((p2 - p1).norm(), 2.0, epsilon = 1.0e-9);

    let c = cube([0.5, 0.5, 0.5]);
    assert!(query::convex_collision(&a, &c, EPSILON).unwrap());
    assert_eq!(query::convex_distance(&a, &c, EPSILON).unwrap(), 0.0);
}

fn random_cloud<const D: usize>(
    rng: &mut oorandom::Rand64,
    len: usize,
    offset: Real,
) -> Vec<Point<D>> {
    (0..len)
        .map(|_| Point::from(core::array::from_fn(|_| rng.rand_float() + offset)))
        .collect()
}

fn check_agreement<const D: usize>(seed: u128) {
    let mut rng = oorandom::Rand64::new(seed);

    for _ in 0..100 {
        let offset = rng.rand_float() * 2.0;
        let a = random_cloud::<D>(&mut rng, 6, 0.0);
        let b = random_cloud::<D>(&mut rng, 6, offset);

        let dist = query::convex_distance(&a, &b, EPSILON).unwrap();
        let collide = query::convex_collision(&a, &b, EPSILON).unwrap();
        assert_eq!(collide, dist < 1.0e-6, "distance: {}", dist);
    }
}

#[test]
fn distance_and_collision_agree() {
    check_agreement::<2>(12);
    check_agreement::<3>(13);
}
