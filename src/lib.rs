//! Colored Exact Cover Solver
//!
//! This is a Rust implementation of Exact Cover, with the addition of the
//! ability to color secondary items. The algorithm is based on Donald Knuth's
//! Algorithm C, as described in _The Art of Computer Programming_, Volume 4B,
//! under "Color-controlled covering".
//!
//! The solver takes:
//! * a set of _primary items_;
//! * a set of _secondary items_;
//! * a set of _options_, which are subsets of the primary and secondary items.
//!
//! The solver's job is to find a subset of the options that
//! * includes each primary item once and only once, and
//! * colors each secondary item consistently.
//!
//! Options can contain secondary items with or without colors.  If a secondary
//! item has no color, then the solver will not use it more than once (so that
//! it defines a "zero or one" constraint).  If an option has a secondary item
//! with a color, then the solver can use it _with the same color_ as many times
//! as it wants, but not uncolored or with a different color.
//!
//! The solver can be used to solve many different kinds of problems:
//! - Sudoku-like puzzles
//! - Shape puzzles, such as "tile a 6x10 rectangle with the 12 pentominos"
//! - Word puzzles, such as "fill a 5x4 grid with words from a dictionary"
//! - Most Nikoli puzzles
//! - Graph coloring
//! - Scheduling
//! - Many more!
//!
//! There are many examples in the `examples` directory.
//!

mod builder;
mod error;
mod matrix;
pub mod samples;
mod solver;
mod state;
mod types;
mod unique;

pub use self::builder::Builder;
pub use self::error::BuildError;
pub use self::matrix::Matrix;
pub use self::solver::{OwnedSolutions, Solution, Solutions};
pub use self::types::{Color, ColoredItem, ItemId, OptionId};
pub use self::unique::Unique;

use crate::state::SearchState;
use crate::types::ItemId as Item;

/// Solves an exact cover with colors problem described directly in terms of
/// string tokens, without going through [`Builder`].
///
/// `options` is a list of options, each a list of `name` or `name:color`
/// tokens (when `colored` is true). `primary` and `secondary` declare the
/// item universe explicitly; pass an empty `primary` slice to infer primary
/// items from usage, the same way [`Builder`] does when no primary items are
/// ever declared.
///
/// Returns a lazy sequence of solutions, each a list of option indices into
/// `options` in the order they were chosen.
///
/// # Example
///
/// ```
/// let solutions: Vec<_> = xcc::covers(&[vec!["a"], vec!["b"]], &[], &[], true)
///     .unwrap()
///     .collect();
/// assert_eq!(solutions, [vec![0, 1]]);
/// ```
pub fn covers(
    options: &[Vec<&str>],
    primary: &[&str],
    secondary: &[&str],
    colored: bool,
) -> Result<OwnedSolutions, BuildError> {
    let mut builder: Builder<()> = Builder::new();
    builder.colored(colored);
    builder.add_primary_items(primary.iter().copied());
    builder.add_secondary_items(secondary.iter().copied());
    for option in options {
        builder.add_option((), option.iter().copied());
    }
    let matrix = builder.try_build()?;
    Ok(matrix.into_owned_solutions())
}

/// Solves a plain exact cover problem given as a boolean incidence matrix:
/// `matrix[option][item]` is `true` when `option` covers `item`. Every item
/// is primary and uncolored. This is the simplest possible entry point,
/// useful when the caller already has a dense 0/1 matrix on hand.
///
/// # Example
///
/// ```
/// let rows = vec![vec![true, false], vec![false, true], vec![true, true]];
/// let solutions: Vec<_> = xcc::covers_bool(&rows).unwrap().collect();
/// assert_eq!(solutions, [vec![0, 1], vec![2]]);
/// ```
pub fn covers_bool(matrix: &[Vec<bool>]) -> Result<OwnedSolutions, BuildError> {
    let num_items = matrix.first().map_or(0, |row| row.len());
    let mut entries: Vec<Vec<(ItemId, Option<crate::types::ColorId>)>> =
        Vec::with_capacity(matrix.len());
    let mut item_used = vec![false; num_items];
    for (opt_idx, row) in matrix.iter().enumerate() {
        if row.len() != num_items {
            return Err(BuildError::UnknownItem(
                opt_idx,
                "row has the wrong number of items".to_string(),
            ));
        }
        let mut entry = Vec::new();
        for (item, &present) in row.iter().enumerate() {
            if present {
                item_used[item] = true;
                entry.push((Item::new(item), None));
            }
        }
        entries.push(entry);
    }
    if let Some(item) = item_used.iter().position(|&used| !used) {
        return Err(BuildError::EmptyPrimary(format!("item {item}")));
    }
    let state = SearchState::new(num_items, num_items, entries);
    Ok(OwnedSolutions::new(state))
}
