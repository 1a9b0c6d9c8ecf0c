//! A plain backtracking enumeration of exact covers, without dancing links.
//!
//! It walks the rows in order and decides include/exclude for each one,
//! skipping a row whenever it would cover an already covered column. This is
//! the subset enumeration over the matrix's rows, pruned only by conflicts,
//! and serves as the reference the linked solver is checked against.
//!
//! # Examples
//! ```
//! use dlx_stepper::backtracking::exact_covers;
//!
//! let matrix = vec![
//!     vec![true, false, true, false],
//!     vec![true, true, false, false],
//!     vec![false, true, false, true],
//!     vec![false, false, true, true],
//! ];
//! assert_eq!(exact_covers(&matrix), vec![vec![0, 2], vec![1, 3]]);
//! ```

/// Returns every set of rows covering each column exactly once.
///
/// Each solution is sorted ascending. Solutions come out in depth-first order,
/// trying to include a row before skipping it.
/// All-zero rows are never included: they cover nothing, so the dancing-links
/// structure has no cell through which to pick them.
pub fn exact_covers(matrix: &[Vec<bool>]) -> Vec<Vec<usize>> {
    let cols = matrix.first().map_or(0, Vec::len);
    let mut results = Vec::new();
    let mut chosen = Vec::new();
    let mut covered = vec![false; cols];
    backtrack_covers(matrix, 0, &mut covered, &mut chosen, &mut results);
    results
}

/// Same as [`exact_covers`] for a matrix of `0`/`1` bytes; any non-zero byte
/// counts as a 1.
pub fn exact_covers_bits(matrix: &[Vec<u8>]) -> Vec<Vec<usize>> {
    let flags: Vec<Vec<bool>> = matrix
        .iter()
        .map(|row| row.iter().map(|&v| v != 0).collect())
        .collect();
    exact_covers(&flags)
}

fn backtrack_covers(
    matrix: &[Vec<bool>],
    start: usize,
    covered: &mut [bool],
    chosen: &mut Vec<usize>,
    results: &mut Vec<Vec<usize>>,
) {
    if start == matrix.len() {
        if covered.iter().all(|&c| c) {
            results.push(chosen.clone());
        }
        return;
    }

    let row = &matrix[start];
    let fits = row.iter().any(|&v| v)
        && row
            .iter()
            .zip(covered.iter())
            .all(|(&v, &c)| !(v && c));
    if fits {
        set_row(row, covered, true);
        chosen.push(start);
        backtrack_covers(matrix, start + 1, covered, chosen, results);
        chosen.pop();
        set_row(row, covered, false);
    }

    backtrack_covers(matrix, start + 1, covered, chosen, results);
}

fn set_row(row: &[bool], covered: &mut [bool], value: bool) {
    for (c, &v) in row.iter().enumerate() {
        if v {
            covered[c] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_exact_cover(matrix: &[Vec<bool>], rows: &[usize]) -> bool {
        let cols = matrix[0].len();
        (0..cols).all(|c| rows.iter().filter(|&&r| matrix[r][c]).count() == 1)
    }

    #[test]
    fn test_every_result_is_an_exact_cover() {
        let matrix = vec![
            vec![true, false, true, false],
            vec![true, false, false, true],
            vec![false, true, true, false],
            vec![false, true, false, true],
            vec![true, false, true, false],
            vec![false, true, false, true],
        ];
        let covers = exact_covers(&matrix);
        assert_eq!(
            covers,
            vec![vec![0, 3], vec![0, 5], vec![1, 2], vec![3, 4], vec![4, 5]]
        );
        for rows in &covers {
            assert!(is_exact_cover(&matrix, rows), "{:?}", rows);
        }
    }

    #[test]
    fn test_zero_rows_are_skipped() {
        let matrix = vec![vec![false, false], vec![true, true], vec![false, false]];
        assert_eq!(exact_covers(&matrix), vec![vec![1]]);
    }

    #[test]
    fn test_uncoverable_column() {
        let matrix = vec![vec![true, false], vec![true, false]];
        assert!(exact_covers(&matrix).is_empty());
    }

    #[test]
    fn test_bits_variant() {
        let matrix = vec![vec![1, 0], vec![0, 1], vec![1, 1]];
        assert_eq!(exact_covers_bits(&matrix), vec![vec![0, 1], vec![2]]);
    }
}
