use crate::engine::errors::MergeError;
use crate::engine::merge::plan::{Origin, SequencePlanner};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn origins(plan: &crate::engine::merge::plan::Plan) -> Vec<Origin> {
    plan.iter().map(|s| s.origin).collect()
}

#[test]
fn unshuffled_plan_places_existing_first() {
    let plan = SequencePlanner::new(false).build(3, 2).unwrap();
    assert_eq!(
        origins(&plan),
        vec![
            Origin::Existing,
            Origin::Existing,
            Origin::Existing,
            Origin::New,
            Origin::New
        ]
    );
    let positions: Vec<u64> = plan.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    assert_eq!(plan.existing_count(), 3);
    assert_eq!(plan.new_count(), 2);
}

#[test]
fn shuffled_plan_preserves_origin_multiset() {
    for seed in 0..100 {
        let plan = SequencePlanner::new(true)
            .with_seed(Some(seed))
            .build(3, 2)
            .unwrap();
        assert_eq!(plan.len(), 5);
        let existing = plan.iter().filter(|s| s.origin == Origin::Existing).count();
        let new = plan.iter().filter(|s| s.origin == Origin::New).count();
        assert_eq!((existing, new), (3, 2), "seed {}", seed);
        for (i, slot) in plan.iter().enumerate() {
            assert_eq!(slot.position, i as u64);
        }
    }
}

#[test]
fn same_seed_gives_same_plan() {
    let a = SequencePlanner::new(true).with_seed(Some(11)).build(50, 50).unwrap();
    let b = SequencePlanner::new(true).with_seed(Some(11)).build(50, 50).unwrap();
    assert_eq!(a.slots(), b.slots());
}

#[test]
fn build_with_rng_uses_the_given_generator() {
    let mut rng_a = StdRng::seed_from_u64(3);
    let mut rng_b = StdRng::seed_from_u64(3);
    let planner = SequencePlanner::new(true);
    let a = planner.build_with_rng(20, 30, &mut rng_a).unwrap();
    let b = planner.build_with_rng(20, 30, &mut rng_b).unwrap();
    assert_eq!(origins(&a), origins(&b));
}

#[test]
fn shuffle_eventually_moves_a_new_record_first() {
    let moved = (0..100).any(|seed| {
        let plan = SequencePlanner::new(true)
            .with_seed(Some(seed))
            .build(3, 2)
            .unwrap();
        plan.slots()[0].origin == Origin::New
    });
    assert!(moved);
}

#[test]
fn zero_counts_are_rejected() {
    assert!(matches!(
        SequencePlanner::new(false).build(0, 2),
        Err(MergeError::InvalidInput(_))
    ));
    assert!(matches!(
        SequencePlanner::new(true).build(3, 0),
        Err(MergeError::InvalidInput(_))
    ));
}
