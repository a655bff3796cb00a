use crate::error::BuildError;
use crate::types::{ColorId, ItemId};
use crate::Matrix;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::fmt::Display;

/// A builder for a matrix.
///
/// The usual way to use this is to call `Matrix::builder()` to get a Builder,
/// call `add_primary_items()`, `add_secondary_items()`, and `add_option()` to
/// configure the matrix, and finally call `build()` to get a Matrix.
///
/// The `add_option()` method takes a parameter of type `T`, which can carry any
/// data you want.  The solver will not look at the meanings, but simply returns
/// them to you when you call `meanings()` on a Solution.  Typically, this
/// meaning is a struct or enum that helps you reconstruct a solution from a
/// chosen set of options.  For example, if you are solving a Sudoku puzzle, the
/// meaning might be a struct that contains the row, column, and value of a
/// cell. You can then reconstruct the puzzle by starting from a blank grid and
/// filling in the cells.  See `demos/sudoku.rs` for an example.
///
/// Every option must contain at least one primary item; secondary items are
/// optional. If no primary or secondary items are ever declared explicitly,
/// every item name used in an option becomes a primary item, in the order it
/// was first seen. This is convenient for quick one-off problems. Once any
/// item has been declared explicitly, every item used in an option must have
/// been declared.
///
/// # Example
/// ```
/// use xcc::Matrix;
///
/// let mut builder = Matrix::builder();
/// builder.add_primary_items(["p", "q", "r"]);
/// builder.add_secondary_items(["x", "y"]);
/// builder.add_option(1, ["p", "q", "x", "y:A"]);
/// builder.add_option(2, ["p", "r", "x:A", "y"]);
/// builder.add_option(3, ["p", "x:B"]);
/// builder.add_option(4, ["q", "x:A"]);
/// builder.add_option(5, ["r", "y:B"]);
/// let matrix = builder.build();
/// ```
///
#[derive(Debug, Clone)]
pub struct Builder<T> {
    primary_items: Vec<String>,
    secondary_items: Vec<String>,
    /// Set the first time `add_primary_item(s)` is called, even with an
    /// empty list, so that an explicit-but-empty declaration is still
    /// distinguishable from "never declared".
    primary_declared: bool,
    /// Same as `primary_declared`, for `add_secondary_item(s)`.
    secondary_declared: bool,
    options: Vec<(T, Vec<String>)>,
    colored: bool,
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self {
            primary_items: Vec::new(),
            secondary_items: Vec::new(),
            primary_declared: false,
            secondary_declared: false,
            options: Vec::new(),
            colored: true,
        }
    }
}

impl<T> Builder<T> {
    /// Creates a new Builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controls whether a `name:color` token splits into a colored item.
    /// Defaults to `true`. Turn this off if item names legitimately contain
    /// a colon.
    pub fn colored(&mut self, colored: bool) -> &mut Self {
        self.colored = colored;
        self
    }

    /// Adds primary items to the matrix. Calling this even with an empty
    /// list marks the primary item list as explicit, disabling inference.
    pub fn add_primary_items<S: Display>(&mut self, items: impl IntoIterator<Item = S>) {
        self.primary_declared = true;
        self.primary_items
            .extend(items.into_iter().map(|t| t.to_string()));
    }

    /// Adds secondary items to the matrix. Calling this even with an empty
    /// list marks the secondary item list as explicit, disabling inference.
    pub fn add_secondary_items<S: Display>(&mut self, items: impl IntoIterator<Item = S>) {
        self.secondary_declared = true;
        self.secondary_items
            .extend(items.into_iter().map(|t| t.to_string()));
    }

    /// Adds a single primary item to the matrix.
    pub fn add_primary_item(&mut self, item: impl Display) {
        self.primary_declared = true;
        self.primary_items.push(item.to_string());
    }

    /// Adds a single secondary item to the matrix.
    pub fn add_secondary_item(&mut self, item: impl Display) {
        self.secondary_declared = true;
        self.secondary_items.push(item.to_string());
    }

    /// Adds an option to the matrix. Item tokens are parsed at `build()`
    /// time, so malformed input is reported there rather than here.
    pub fn add_option<S: Display>(&mut self, meaning: T, items: impl IntoIterator<Item = S>) {
        let items: Vec<_> = items.into_iter().map(|i| i.to_string()).collect();
        self.options.push((meaning, items));
    }

    /// Builds the matrix. If there is a problem, this will panic; use
    /// `try_build()` if you want to handle the error yourself.
    pub fn build(self) -> Matrix<T> {
        self.try_build().unwrap()
    }

    /// Builds the matrix, returning a Result. If there is a problem, this
    /// will return a [`BuildError`].
    pub fn try_build(self) -> Result<Matrix<T>, BuildError> {
        let explicit = self.primary_declared || self.secondary_declared;

        let mut secondary_names: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for name in &self.secondary_items {
            if seen.insert(name.as_str()) {
                secondary_names.push(name.clone());
            }
        }

        let mut primary_names: Vec<String> = Vec::new();
        seen.clear();
        for name in &self.primary_items {
            if seen.insert(name.as_str()) {
                primary_names.push(name.clone());
            }
        }
        if !explicit {
            let secondary_set: HashSet<&str> =
                secondary_names.iter().map(String::as_str).collect();
            for (_, tokens) in &self.options {
                for token in tokens {
                    let name = Self::split_name(self.colored, token);
                    if !secondary_set.contains(name) && seen.insert(name) {
                        primary_names.push(name.to_string());
                    }
                }
            }
        }

        let num_primary = primary_names.len();
        let item_names: Vec<String> = primary_names
            .into_iter()
            .chain(secondary_names)
            .collect();
        let mut item_ids: HashMap<&str, usize> = HashMap::new();
        for (i, name) in item_names.iter().enumerate() {
            item_ids.insert(name.as_str(), i);
        }

        let mut item_used = vec![false; item_names.len()];
        let mut colors: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<Vec<(ItemId, Option<ColorId>)>> = Vec::with_capacity(self.options.len());
        let mut meanings: Vec<T> = Vec::with_capacity(self.options.len());

        for (opt_idx, (meaning, tokens)) in self.options.into_iter().enumerate() {
            let mut seen_in_option: HashSet<usize> = HashSet::new();
            let mut row = Vec::with_capacity(tokens.len());
            for token in &tokens {
                let (name, color_label) = match (self.colored, token.split_once(':')) {
                    (true, Some((name, color))) => (name, Some(color)),
                    _ => (token.as_str(), None),
                };
                let id = *item_ids
                    .get(name)
                    .ok_or_else(|| BuildError::UnknownItem(opt_idx, name.to_string()))?;
                if !seen_in_option.insert(id) {
                    return Err(BuildError::DuplicateItem(opt_idx, name.to_string()));
                }
                item_used[id] = true;
                let color_id = match color_label {
                    Some(label) => {
                        if id < num_primary {
                            return Err(BuildError::ColorOnPrimary(opt_idx, name.to_string()));
                        }
                        let next = colors.len();
                        let cid = *colors.entry(label.to_string()).or_insert(next);
                        Some(ColorId::new(cid))
                    }
                    None => None,
                };
                row.push((ItemId::new(id), color_id));
            }
            entries.push(row);
            meanings.push(meaning);
        }

        for (id, name) in item_names.iter().enumerate().take(num_primary) {
            if !item_used[id] {
                return Err(BuildError::EmptyPrimary(name.clone()));
            }
        }

        Ok(Matrix::from_parts(
            num_primary,
            item_names.len(),
            entries,
            meanings,
        ))
    }

    fn split_name(colored: bool, token: &str) -> &str {
        match (colored, token.split_once(':')) {
            (true, Some((name, _))) => name,
            _ => token,
        }
    }
}

impl<T: Debug> Builder<T> {
    /// Prints the configuration to stdout in a format that can be read by Knuth's dlx2 program.
    /// Only available if the type of meanings is Debug.
    pub fn dump_knuth_format(&self) {
        println!("| primary items: {}", self.primary_items.len());
        println!("| secondary items: {}", self.secondary_items.len());
        println!("| options: {}", self.options.len());
        print!("{}", self.primary_items.join(" "));
        if !self.secondary_items.is_empty() {
            print!(" | ");
            print!("{}", self.secondary_items.join(" "));
        }
        println!();
        for (i, (meaning, items)) in self.options.iter().enumerate() {
            println!("| Option {}: {:?}", i, meaning);
            println!("{}", items.join(" "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_primary_items_when_none_declared() {
        let mut builder: Builder<usize> = Builder::new();
        builder.add_option(0, ["a", "b"]);
        builder.add_option(1, ["b", "c"]);
        let matrix = builder.build();
        assert_eq!(matrix.num_primary_items(), 3);
        assert_eq!(matrix.num_items(), 3);
    }

    #[test]
    fn rejects_color_on_primary_item() {
        let mut builder: Builder<usize> = Builder::new();
        builder.add_primary_item("a");
        builder.add_option(0, ["a:1"]);
        assert_eq!(
            builder.try_build().unwrap_err(),
            BuildError::ColorOnPrimary(0, "a".to_string())
        );
    }

    #[test]
    fn rejects_duplicate_item_in_one_option() {
        let mut builder: Builder<usize> = Builder::new();
        builder.add_primary_item("a");
        builder.add_option(0, ["a", "a"]);
        assert_eq!(
            builder.try_build().unwrap_err(),
            BuildError::DuplicateItem(0, "a".to_string())
        );
    }

    #[test]
    fn rejects_unused_primary_item() {
        let mut builder: Builder<usize> = Builder::new();
        builder.add_primary_items(["a", "b"]);
        builder.add_option(0, ["a"]);
        assert_eq!(
            builder.try_build().unwrap_err(),
            BuildError::EmptyPrimary("b".to_string())
        );
    }

    #[test]
    fn rejects_unknown_item_once_declarations_are_explicit() {
        let mut builder: Builder<usize> = Builder::new();
        builder.add_primary_item("a");
        builder.add_option(0, ["a", "z"]);
        assert_eq!(
            builder.try_build().unwrap_err(),
            BuildError::UnknownItem(0, "z".to_string())
        );
    }

    #[test]
    fn declaring_empty_item_lists_still_disables_inference() {
        // Calling add_secondary_items with an empty list (or none at all)
        // must still count as an explicit declaration once add_primary_items
        // has been called, even with zero items: inference must not kick in
        // just because the primary list happens to be empty.
        let mut builder: Builder<usize> = Builder::new();
        builder.add_primary_items(Vec::<&str>::new());
        builder.add_option(0, ["a"]);
        assert_eq!(
            builder.try_build().unwrap_err(),
            BuildError::UnknownItem(0, "a".to_string())
        );
    }

    #[test]
    fn colored_false_treats_colon_as_part_of_the_name() {
        let mut builder: Builder<usize> = Builder::new();
        builder.colored(false);
        builder.add_option(0, ["a:1"]);
        let matrix = builder.build();
        assert_eq!(matrix.num_primary_items(), 1);
    }
}
