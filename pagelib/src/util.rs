use crate::config::Algorithm;
use crate::frames::Page;

/// A reference sequence with a known outcome under one policy
pub struct Scenario {
    pub name: &'static str,
    pub references: Vec<Page>,
    pub frames: usize,
    pub algorithm: Algorithm,
    pub hits: u64,
    pub faults: u64,
    /// Frame contents after the last reference
    pub final_frames: Vec<Option<Page>>,
}

pub fn get_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "fifo_no_reuse_in_window",
            references: vec![1, 2, 3, 4, 1, 2, 5],
            frames: 3,
            algorithm: Algorithm::Fifo,
            hits: 0,
            faults: 7,
            final_frames: vec![Some(5), Some(1), Some(2)],
        },
        Scenario {
            name: "fifo_textbook",
            references: vec![7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1],
            frames: 3,
            algorithm: Algorithm::Fifo,
            hits: 5,
            faults: 15,
            final_frames: vec![Some(7), Some(0), Some(1)],
        },
        Scenario {
            name: "fifo_belady",
            references: vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5],
            frames: 4,
            algorithm: Algorithm::Fifo,
            hits: 2,
            faults: 10,
            final_frames: vec![Some(4), Some(5), Some(2), Some(3)],
        },
        Scenario {
            name: "lru_no_reuse_in_window",
            references: vec![1, 2, 3, 1, 4],
            frames: 2,
            algorithm: Algorithm::Lru,
            hits: 0,
            faults: 5,
            final_frames: vec![Some(4), Some(1)],
        },
        Scenario {
            name: "lru_single_hit",
            references: vec![1, 2, 1, 3, 4],
            frames: 2,
            algorithm: Algorithm::Lru,
            hits: 1,
            faults: 4,
            final_frames: vec![Some(4), Some(3)],
        },
        Scenario {
            name: "lru_textbook",
            references: vec![7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1],
            frames: 3,
            algorithm: Algorithm::Lru,
            hits: 8,
            faults: 12,
            final_frames: vec![Some(1), Some(0), Some(7)],
        },
        Scenario {
            name: "optimal_short",
            references: vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3],
            frames: 3,
            algorithm: Algorithm::Optimal,
            hits: 4,
            faults: 6,
            final_frames: vec![Some(3), Some(2), Some(5)],
        },
        Scenario {
            name: "optimal_textbook",
            references: vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5],
            frames: 3,
            algorithm: Algorithm::Optimal,
            hits: 5,
            faults: 7,
            final_frames: vec![Some(4), Some(2), Some(5)],
        },
        Scenario {
            name: "optimal_textbook_twenty",
            references: vec![7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1],
            frames: 3,
            algorithm: Algorithm::Optimal,
            hits: 11,
            faults: 9,
            final_frames: vec![Some(7), Some(0), Some(1)],
        },
    ]
}
