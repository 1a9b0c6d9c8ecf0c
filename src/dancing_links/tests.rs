use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::backtracking::exact_covers_bits;

fn random_matrix(rng: &mut ChaCha8Rng) -> Vec<Vec<u8>> {
    let rows = rng.gen_range(1..=9);
    let cols = rng.gen_range(1..=6);
    let density = rng.gen_range(0.2..0.6);
    (0..rows)
        .map(|_| (0..cols).map(|_| u8::from(rng.gen_bool(density))).collect())
        .collect()
}

fn stepping(links: DancingLinks) -> ExactCoverSearch {
    let config = SearchConfig {
        mode: StepMode::Step,
        ..SearchConfig::default()
    };
    ExactCoverSearch::new(links, config)
}

/// Solutions with rows sorted, in sorted order, for set comparison.
fn normalized(mut solutions: Vec<Vec<RowId>>) -> Vec<Vec<RowId>> {
    for rows in &mut solutions {
        rows.sort_unstable();
    }
    solutions.sort();
    solutions
}

#[test]
fn test_four_by_four_matches_brute_force() {
    let matrix = vec![
        vec![1, 0, 1, 0],
        vec![1, 1, 0, 0],
        vec![0, 1, 0, 1],
        vec![0, 0, 1, 1],
    ];
    let solved = normalized(solve_all(&matrix).unwrap());
    assert_eq!(solved, normalized(exact_covers_bits(&matrix)));
    assert!(!solved.is_empty());
}

#[test]
fn test_random_matrices_match_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    for case in 0..200 {
        let matrix = random_matrix(&mut rng);
        let solved = normalized(solve_all(&matrix).unwrap());
        let expected = normalized(exact_covers_bits(&matrix));
        assert_eq!(solved, expected, "case {} matrix {:?}", case, matrix);
    }
}

#[test]
fn test_duplicate_rows_give_distinct_solutions() {
    let matrix = vec![vec![1, 1], vec![1, 1], vec![1, 0], vec![0, 1]];
    let solved = normalized(solve_all(&matrix).unwrap());
    assert_eq!(solved, vec![vec![0], vec![1], vec![2, 3]]);
}

#[test]
fn test_no_solution_when_a_column_is_empty() {
    let matrix = vec![vec![1, 0, 1], vec![1, 0, 0]];
    assert!(solve_all(&matrix).unwrap().is_empty());
}

#[test]
fn test_sizes_equal_column_counts_on_random_matrices() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..50 {
        let matrix = random_matrix(&mut rng);
        let links = DancingLinks::from_bits(&matrix).unwrap();
        for c in 0..links.num_columns() {
            let ones = matrix.iter().filter(|row| row[c] == 1).count();
            assert_eq!(links.column_size(c), ones);
        }
    }
}

#[test]
fn test_cover_uncover_pairs_restore_random_structures() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..50 {
        let matrix = random_matrix(&mut rng);
        let mut links = DancingLinks::from_bits(&matrix).unwrap();
        // Start from a partially covered state, not just the fresh build
        if let Some(c) = links.select_column() {
            links.cover(c);
        }
        let before = links.clone();
        for c in links.active_columns() {
            links.cover(c);
            links.uncover(c);
            assert_eq!(links, before, "column {}", c);
        }
    }
}

#[test]
fn test_exhausted_search_restores_structure() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    for _ in 0..50 {
        let matrix = random_matrix(&mut rng);
        let pristine = DancingLinks::from_bits(&matrix).unwrap();

        let mut stepped = stepping(pristine.clone());
        while stepped.advance().is_some() {}
        assert!(stepped.is_finished());
        assert_eq!(stepped.links(), &pristine);

        let mut run = ExactCoverSearch::new(pristine.clone(), SearchConfig::default());
        while run.advance().is_some() {}
        assert_eq!(run.links(), &pristine);
        assert!(run.links().covered_columns().is_empty());
    }
}

#[test]
fn test_selected_column_has_minimum_size() {
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    for _ in 0..50 {
        let matrix = random_matrix(&mut rng);
        let mut search = stepping(DancingLinks::from_bits(&matrix).unwrap());
        loop {
            let expected = search.links().select_column();
            match search.advance() {
                Some(StepEvent::ColumnPicked(c)) => {
                    assert_eq!(Some(c), expected);
                    let links = search.links();
                    let active = links.active_columns();
                    assert!(active.contains(&c));
                    let size = links.column_size(c);
                    for &other in &active {
                        assert!(size <= links.column_size(other));
                    }
                    // Nothing smaller or equal sits left of the pick
                    for &other in active.iter().take_while(|&&o| o != c) {
                        assert!(size < links.column_size(other));
                    }
                }
                Some(_) => {}
                None => break,
            }
        }
    }
}

#[test]
fn test_step_mode_matches_run_mode_between_solutions() {
    let mut rng = ChaCha8Rng::seed_from_u64(47);
    for _ in 0..100 {
        let matrix = random_matrix(&mut rng);
        let links = DancingLinks::from_bits(&matrix).unwrap();

        // Suspension points between consecutive solutions, plus the tail
        let mut stepped_gaps = Vec::new();
        let mut stepped_solutions = Vec::new();
        let mut gap = 0;
        for event in stepping(links.clone()) {
            match event {
                StepEvent::SolutionFound(rows) => {
                    stepped_gaps.push(gap);
                    stepped_solutions.push(rows);
                    gap = 0;
                }
                _ => gap += 1,
            }
        }
        stepped_gaps.push(gap);

        let mut run = ExactCoverSearch::new(links, SearchConfig::default());
        let mut run_gaps = Vec::new();
        let mut run_solutions = Vec::new();
        let mut seen = 0;
        while let Some(event) = run.advance() {
            match event {
                StepEvent::SolutionFound(rows) => run_solutions.push(rows),
                other => panic!("run mode surfaced {:?}", other),
            }
            run_gaps.push(run.stats().operations() - seen);
            seen = run.stats().operations();
        }
        run_gaps.push(run.stats().operations() - seen);

        assert_eq!(stepped_solutions, run_solutions);
        assert_eq!(stepped_gaps, run_gaps, "matrix {:?}", matrix);
    }
}

#[test]
fn test_search_is_deterministic() {
    let mut rng = ChaCha8Rng::seed_from_u64(59);
    let matrix = random_matrix(&mut rng);
    let first: Vec<_> = stepping(DancingLinks::from_bits(&matrix).unwrap()).collect();
    let second: Vec<_> = stepping(DancingLinks::from_bits(&matrix).unwrap()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_stats_count_every_event() {
    let matrix = vec![
        vec![0, 0, 1, 0, 1, 1, 0],
        vec![1, 0, 0, 1, 0, 0, 1],
        vec![0, 1, 1, 0, 0, 1, 0],
        vec![1, 0, 0, 1, 0, 0, 0],
        vec![0, 1, 0, 0, 0, 0, 1],
        vec![0, 0, 0, 1, 1, 0, 1],
    ];
    let mut search = stepping(DancingLinks::from_bits(&matrix).unwrap());
    let mut events = 0;
    while search.advance().is_some() {
        events += 1;
    }
    let stats = search.stats();
    assert_eq!(stats.solutions, 1);
    assert_eq!(stats.operations() + stats.solutions, events);
    assert_eq!(stats.covers, stats.uncovers);
    assert!(stats.column_picks <= stats.covers);
}

#[test]
fn test_solutions_iterator_yields_rows_in_pick_order() {
    let links = DancingLinks::from_bits(&[vec![1, 0], vec![0, 1], vec![1, 1]]).unwrap();
    let solutions: Vec<_> = stepping(links).solutions().collect();
    assert_eq!(solutions, vec![vec![0, 1], vec![2]]);
}
