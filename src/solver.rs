//! Algorithm C engine and the lazy solution iterator built on top of it.

use crate::state::SearchState;
use crate::types::OptionId;
use crate::Matrix;
use std::marker::PhantomData;

/// One open branch point: the MRV item's candidate options, snapshotted at
/// the moment the item was selected, plus a cursor into them.
struct Frame {
    candidates: Vec<OptionId>,
    /// Number of candidates already attempted. `next - 1` is covered right
    /// now whenever `next > 0`.
    next: usize,
}

/// The backtracking search itself: an explicit frame stack standing in for
/// recursion, so the public iterator can suspend between solutions without
/// relying on coroutines. Each call to `next_solution` resumes exactly where
/// the previous one left off.
struct Solver {
    state: SearchState,
    frames: Vec<Frame>,
    exhausted: bool,
}

impl Solver {
    fn new(state: SearchState) -> Self {
        Solver {
            state,
            frames: Vec::new(),
            exhausted: false,
        }
    }

    /// Returns the next solution in canonical order, or `None` once the
    /// search space is exhausted. Every subsequent call after exhaustion
    /// also returns `None`.
    fn next_solution(&mut self) -> Option<Vec<OptionId>> {
        if self.exhausted {
            return None;
        }
        loop {
            match self.state.select_item() {
                None => {
                    let solution = self.state.solution().to_vec();
                    log::debug!("solution found: {} options", solution.len());
                    if !self.backtrack() {
                        log::debug!("search exhausted");
                        self.exhausted = true;
                    }
                    return Some(solution);
                }
                Some(item) => {
                    if self.state.active_len(item) == 0 {
                        log::trace!("dead end, no options left for selected item");
                        if !self.backtrack() {
                            log::debug!("search exhausted");
                            self.exhausted = true;
                            return None;
                        }
                        continue;
                    }
                    let candidates = self.state.snapshot_options(item);
                    self.frames.push(Frame { candidates, next: 0 });
                    if !self.advance_top_frame() {
                        self.frames.pop();
                        if !self.backtrack() {
                            log::debug!("search exhausted");
                            self.exhausted = true;
                            return None;
                        }
                    }
                }
            }
        }
    }

    /// Tries `frame.candidates[frame.next..]` in order until one covers
    /// without a color conflict, leaving it covered. Returns `false` if
    /// every remaining candidate conflicts.
    fn advance_top_frame(&mut self) -> bool {
        let frame = self.frames.last_mut().expect("no open frame");
        while frame.next < frame.candidates.len() {
            let option = frame.candidates[frame.next];
            frame.next += 1;
            if self.state.try_cover(option) {
                return true;
            }
        }
        false
    }

    /// Undoes the current frame's covered candidate (if any), then tries the
    /// next one; climbs to the parent frame once a frame's candidates are
    /// exhausted. Returns `false` when the whole search is exhausted.
    fn backtrack(&mut self) -> bool {
        loop {
            match self.frames.last_mut() {
                None => return false,
                Some(frame) => {
                    if frame.next > 0 {
                        self.state.uncover();
                    }
                }
            }
            if self.advance_top_frame() {
                return true;
            }
            self.frames.pop();
        }
    }
}

/// A solution to an exact cover problem.
///
/// The usual way to use this is to call `Matrix::solve_all()`, then for each
/// Solution returned, call `meanings()` to get the meanings of the options.
///
/// # Example
///
/// ```
/// let toy = xcc::samples::toy();
/// toy.solve_all().into_iter().for_each(|solution| {
///    println!("Solution: {:?}", solution.meanings(&toy));
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    cells: Vec<OptionId>,
}

impl Solution {
    /// Returns the option numbers for the options in this solution. These are
    /// the 0-based indices of the options in the order they were originally
    /// added.
    /// ```
    /// use xcc::Matrix;
    /// let mut builder = Matrix::builder();
    /// builder.add_primary_items(["p", "q", "r"]);
    /// builder.add_secondary_items(["x", "y"]);
    /// builder.add_option(1, ["p", "q", "x", "y:A"]);
    /// builder.add_option(2, ["p", "r", "x:A", "y"]);
    /// builder.add_option(3, ["p", "x:B"]);
    /// builder.add_option(4, ["q", "x:A"]);
    /// builder.add_option(5, ["r", "y:B"]);
    /// let matrix = builder.build();
    /// let solution = matrix.solve_all().pop().unwrap();
    /// let mut numbers = solution.option_numbers();
    /// numbers.sort_unstable();
    /// assert_eq!(numbers, [1, 3]);
    /// ```
    pub fn option_numbers(&self) -> Vec<usize> {
        self.cells.iter().map(|o| o.index()).collect()
    }

    /// Returns the meanings of the options in this solution, in the order
    /// they were selected. The meanings come from the parameter to
    /// `Builder::add_option()`.
    ///
    /// # Example
    ///
    /// ```
    /// use xcc::Matrix;
    /// let mut builder = Matrix::builder();
    /// builder.add_primary_items(["p", "q", "r"]);
    /// builder.add_secondary_items(["x", "y"]);
    /// builder.add_option("option one", ["p", "q", "x", "y:A"]);
    /// builder.add_option("option two", ["p", "r", "x:A", "y"]);
    /// builder.add_option("option three", ["p", "x:B"]);
    /// builder.add_option("option four", ["q", "x:A"]);
    /// builder.add_option("option five", ["r", "y:B"]);
    /// let matrix = builder.build();
    /// let solution = matrix.solve_all().pop().unwrap();
    /// assert_eq!(solution.meanings(&matrix), [&"option four", &"option two"]);
    /// ```
    pub fn meanings<'a, T>(&self, matrix: &'a Matrix<T>) -> Vec<&'a T> {
        self.cells.iter().map(|&o| matrix.meaning(o)).collect()
    }
}

/// A lazy, single-pass sequence of solutions borrowed from a [`Matrix`].
///
/// Each call to `next()` resumes the search from wherever the previous call
/// left off; nothing is computed ahead of time. A fresh `Solutions` can be
/// created at any time from the same `Matrix`, but two `Solutions` values
/// never share search state.
pub struct Solutions<'a, T> {
    solver: Solver,
    _matrix: PhantomData<&'a Matrix<T>>,
}

impl<'a, T> Solutions<'a, T> {
    pub(crate) fn new(state: SearchState) -> Self {
        Solutions {
            solver: Solver::new(state),
            _matrix: PhantomData,
        }
    }
}

impl<T> Iterator for Solutions<'_, T> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        self.solver.next_solution().map(|cells| Solution { cells })
    }
}

/// The lazy sequence of solutions produced by the free function
/// [`crate::covers`]. Each item is a list of option indices referring back
/// into the `options` sequence that was passed in, in the order they were
/// chosen.
pub struct OwnedSolutions {
    solver: Solver,
}

impl OwnedSolutions {
    pub(crate) fn new(state: SearchState) -> Self {
        OwnedSolutions {
            solver: Solver::new(state),
        }
    }
}

impl Iterator for OwnedSolutions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        self.solver
            .next_solution()
            .map(|cells| cells.iter().map(|o| o.index()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::Matrix;
    use std::collections::HashSet;

    #[test]
    fn lazy_iterator_stops_after_exhaustion() {
        let mut builder = Matrix::builder();
        builder.add_primary_item("a");
        builder.add_option(1, ["a"]);
        builder.add_option(2, ["a"]);
        let matrix = builder.build();
        let mut solutions = matrix.solutions();
        assert!(solutions.next().is_some());
        assert!(solutions.next().is_none());
        assert!(solutions.next().is_none());
    }

    #[test]
    fn solve_all_finds_every_solution_once() {
        let mut builder = Matrix::builder();
        builder.add_primary_item("a");
        builder.add_primary_item("b");
        builder.add_option(1, ["a"]);
        builder.add_option(2, ["b"]);

        let matrix = builder.build();
        let solutions = matrix
            .solve_all()
            .into_iter()
            .map(|s| s.meanings(&matrix))
            .collect::<Vec<_>>();
        assert_eq!(solutions, [vec![&1, &2]]);
    }

    #[test]
    fn colors_force_the_only_compatible_solution() {
        let mut builder = Matrix::builder();
        builder.add_primary_item("a");
        builder.add_primary_item("b");
        builder.add_secondary_item("c");
        builder.add_option(1, ["a", "c:1"]);
        builder.add_option(2, ["b", "c:2"]);
        builder.add_option(3, ["a", "b", "c:3"]);

        let matrix = builder.build();
        let solutions = matrix
            .solve_all()
            .into_iter()
            .map(|s| s.meanings(&matrix))
            .collect::<Vec<_>>();

        // The only way to get both a and b is to take option 3. In
        // particular, the solution cannot be [1, 2] because that would
        // require c to have two different colors.
        assert_eq!(
            solutions.as_slice(),
            [vec![&3]],
            "Should only have [3] as a solution"
        );
    }

    fn build_two_options_over_one_item() -> Matrix<usize> {
        let mut builder = Matrix::builder();
        builder.add_primary_item("a");
        builder.add_option(0, ["a"]);
        builder.add_option(1, ["a"]);
        builder.build()
    }

    #[test]
    fn repeated_enumeration_is_deterministic() {
        let first: Vec<_> = build_two_options_over_one_item()
            .solve_all()
            .into_iter()
            .map(|s| s.option_numbers())
            .collect();
        let second: Vec<_> = build_two_options_over_one_item()
            .solve_all()
            .into_iter()
            .map(|s| s.option_numbers())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn reversing_option_order_permutes_but_preserves_the_solution_set() {
        fn solve(reverse: bool) -> HashSet<Vec<i32>> {
            let mut builder = Matrix::builder();
            builder.add_primary_items(["a", "b"]);
            let mut options: Vec<(i32, Vec<&str>)> =
                vec![(1, vec!["a"]), (2, vec!["b"]), (3, vec!["a", "b"])];
            if reverse {
                options.reverse();
            }
            for (meaning, items) in options {
                builder.add_option(meaning, items);
            }
            let matrix = builder.build();
            matrix
                .solve_all()
                .into_iter()
                .map(|s| {
                    let mut meanings: Vec<i32> = s.meanings(&matrix).into_iter().copied().collect();
                    meanings.sort_unstable();
                    meanings
                })
                .collect()
        }

        assert_eq!(solve(false), solve(true));
    }

    #[test]
    fn zero_primary_items_and_zero_options_emits_one_empty_solution() {
        let matrix = Matrix::<()>::new(0, 0);
        let solutions = matrix.solve_all();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].option_numbers(), Vec::<usize>::new());
    }

    #[test]
    fn zero_options_with_a_primary_item_emits_no_solutions() {
        // Built directly via `Matrix::new` (bypassing the builder's own
        // `EmptyPrimary` normalization check) to exercise the engine's
        // behavior when a primary item simply has no options at all: the
        // search terminates cleanly with zero solutions rather than erroring.
        let matrix = Matrix::<()>::new(1, 0);
        assert!(matrix.solve_all().is_empty());
    }
}
