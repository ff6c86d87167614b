use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::config::Algorithm;
use crate::frames::Page;
use crate::simulator::{simulate, Outcome, SimulationResult};

const RUNS: u64 = 200;

/// Random runs with a small page alphabet, so hits and evictions are both common
fn random_runs() -> impl Iterator<Item = (Vec<Page>, usize)> {
    (0..RUNS).map(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let length: usize = rng.gen_range(0..60);
        let pages: Page = rng.gen_range(1..10);
        let frames: usize = rng.gen_range(1..6);
        let references: Vec<Page> = (0..length).map(|_| rng.gen_range(0..pages)).collect();
        (references, frames)
    })
}

/// The slot the reference ended up in at each step
fn used_slots(result: &SimulationResult) -> Vec<usize> {
    result
        .steps
        .iter()
        .map(|s| s.frames.iter().position(|f| *f == Some(s.reference)).unwrap())
        .collect()
}

fn next_use(references: &[Page], after: usize, page: Page) -> Option<usize> {
    references[after + 1..].iter().position(|p| *p == page)
}

#[test]
fn counts_add_up_for_every_prefix() {
    for (references, frames) in random_runs() {
        for algorithm in Algorithm::ALL {
            let result = simulate(&references, frames, algorithm).unwrap();
            assert_eq!(result.len(), references.len());
            assert_eq!(result.hits + result.faults, references.len() as u64);
            let mut hits = 0;
            let mut faults = 0;
            for (index, step) in result.steps.iter().enumerate() {
                match step.outcome {
                    Outcome::Hit => hits += 1,
                    Outcome::Fault => faults += 1,
                }
                assert_eq!(hits + faults, index + 1);
            }
            assert_eq!(hits as u64, result.hits);
            assert_eq!(faults as u64, result.faults);
        }
    }
}

#[test]
fn snapshots_are_well_formed() {
    for (references, frames) in random_runs() {
        for algorithm in Algorithm::ALL {
            let result = simulate(&references, frames, algorithm).unwrap();
            let mut previous: Vec<Option<Page>> = vec![None; frames];
            for step in &result.steps {
                assert_eq!(step.frames.len(), frames);
                let resident: Vec<Page> = step.frames.iter().flatten().copied().collect();
                assert!(resident.iter().all(|p| references.contains(p)));
                let mut unique = resident.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), resident.len(), "a page is resident twice");
                assert_eq!(step.outcome == Outcome::Hit, previous.contains(&Some(step.reference)));
                if step.outcome == Outcome::Hit {
                    assert_eq!(step.frames, previous);
                }
                if let Some(slot) = step.replaced_slot {
                    assert!(previous[slot].is_some());
                    assert_eq!(step.frames[slot], Some(step.reference));
                }
                previous = step.frames.clone();
            }
        }
    }
}

#[test]
fn fifo_victims_follow_slot_order() {
    for (references, frames) in random_runs() {
        let result = simulate(&references, frames, Algorithm::Fifo).unwrap();
        let slots = used_slots(&result);
        let fault_slots: Vec<usize> = result
            .steps
            .iter()
            .zip(slots)
            .filter(|(s, _)| s.outcome == Outcome::Fault)
            .map(|(_, slot)| slot)
            .collect();
        let expected: Vec<usize> = (0..fault_slots.len()).map(|i| i % frames).collect();
        assert_eq!(fault_slots, expected);
    }
}

#[test]
fn fifo_victims_are_independent_of_page_values() {
    for (references, frames) in random_runs() {
        let shifted: Vec<Page> = references.iter().map(|p| p * 7 + 100).collect();
        let a = simulate(&references, frames, Algorithm::Fifo).unwrap();
        let b = simulate(&shifted, frames, Algorithm::Fifo).unwrap();
        let slots_a: Vec<_> = a.steps.iter().map(|s| s.replaced_slot).collect();
        let slots_b: Vec<_> = b.steps.iter().map(|s| s.replaced_slot).collect();
        assert_eq!(slots_a, slots_b);
    }
}

#[test]
fn lru_evicts_least_recently_used_slot() {
    for (references, frames) in random_runs() {
        let result = simulate(&references, frames, Algorithm::Lru).unwrap();
        let slots = used_slots(&result);
        let mut last_used: Vec<Option<usize>> = vec![None; frames];
        for (index, step) in result.steps.iter().enumerate() {
            if let Some(victim) = step.replaced_slot {
                let oldest = last_used.iter().map(|t| t.unwrap()).min().unwrap();
                assert_eq!(last_used[victim], Some(oldest));
            }
            last_used[slots[index]] = Some(index);
        }
    }
}

#[test]
fn optimal_evicts_page_used_farthest_away() {
    for (references, frames) in random_runs() {
        let result = simulate(&references, frames, Algorithm::Optimal).unwrap();
        let mut previous: Vec<Option<Page>> = vec![None; frames];
        for (index, step) in result.steps.iter().enumerate() {
            if let Some(victim) = step.replaced_slot {
                let victim_next = next_use(&references, index, previous[victim].unwrap());
                for (slot, page) in previous.iter().enumerate() {
                    let other_next = next_use(&references, index, page.unwrap());
                    match (victim_next, other_next) {
                        (None, None) => assert!(victim <= slot),
                        (None, Some(_)) => {}
                        (Some(_), None) => panic!("evicted a page which is used again over one which is not"),
                        (Some(v), Some(o)) => assert!(v >= o),
                    }
                }
            }
            previous = step.frames.clone();
        }
    }
}

#[test]
fn optimal_never_faults_more_than_fifo_or_lru() {
    for (references, frames) in random_runs() {
        let optimal = simulate(&references, frames, Algorithm::Optimal).unwrap();
        let fifo = simulate(&references, frames, Algorithm::Fifo).unwrap();
        let lru = simulate(&references, frames, Algorithm::Lru).unwrap();
        assert!(optimal.faults <= fifo.faults);
        assert!(optimal.faults <= lru.faults);
    }
}
