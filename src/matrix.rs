use super::Solution;
use crate::state::SearchState;
use crate::types::{ColorId, ColoredItem, ItemId, OptionId};
use crate::Builder;
use crate::OwnedSolutions;
use crate::Solutions;
use crate::Unique;

/// A compiled specification of an exact cover problem with colored items.
///
/// To build a matrix, use the `builder()` method:
/// ```
/// use xcc::Matrix;
/// let mut builder = Matrix::builder();
/// builder.add_primary_item("a");
/// builder.add_option(1, ["a"]);
/// let matrix = builder.build();
/// ```
///
#[derive(Debug)]
pub struct Matrix<T> {
    num_primary: usize,
    num_items: usize,
    entries: Vec<Vec<(ItemId, Option<ColorId>)>>,
    meanings: Vec<T>,
}

impl<T> Matrix<T> {
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    pub fn num_primary_items(&self) -> usize {
        self.num_primary
    }

    pub fn num_options(&self) -> usize {
        self.entries.len()
    }

    /// Creates a `Builder` to configure a matrix.
    ///
    /// # Example
    ///
    /// ```
    /// use xcc::Matrix;
    /// let mut builder = Matrix::builder();
    /// builder.add_primary_item("a");
    /// builder.add_option(1, ["a"]);
    /// let matrix = builder.build();
    /// ```
    pub fn builder() -> Builder<T> {
        Builder::default()
    }

    /// Low-level constructor. You almost certainly want to use the
    /// `builder()` method instead of this.
    ///
    /// Creates a new, empty matrix with the given number of primary and
    /// secondary items.
    pub fn new(num_primary_items: usize, num_secondary_items: usize) -> Self {
        Matrix {
            num_primary: num_primary_items,
            num_items: num_primary_items + num_secondary_items,
            entries: Vec::new(),
            meanings: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        num_primary: usize,
        num_items: usize,
        entries: Vec<Vec<(ItemId, Option<ColorId>)>>,
        meanings: Vec<T>,
    ) -> Self {
        Matrix {
            num_primary,
            num_items,
            entries,
            meanings,
        }
    }

    /// Adds an option (row) to the matrix.
    pub fn add_option(&mut self, items: &[ColoredItem], meaning: T) {
        let row = items
            .iter()
            .map(|ci| (ci.item(), ci.color().map(crate::types::intern_color)))
            .collect();
        self.entries.push(row);
        self.meanings.push(meaning);
    }

    pub fn meaning(&self, option: OptionId) -> &T {
        &self.meanings[option.index()]
    }

    /// A fresh, lazy sequence of this matrix's solutions. Each call produces
    /// an independent search starting from scratch.
    ///
    /// # Example
    ///
    /// ```
    /// let matrix = xcc::samples::toy();
    /// let solutions: Vec<_> = matrix.solutions().collect();
    /// assert_eq!(solutions.len(), 1);
    /// ```
    pub fn solutions(&self) -> Solutions<'_, T> {
        let state = SearchState::new(self.num_primary, self.num_items, self.entries.clone());
        Solutions::new(state)
    }

    /// Consumes this matrix and returns a lazy sequence of raw option-index
    /// solutions, discarding the per-option meanings. Used by the free
    /// function [`crate::covers`], which has no meaning to carry (`T = ()`).
    pub(crate) fn into_owned_solutions(self) -> OwnedSolutions {
        let state = SearchState::new(self.num_primary, self.num_items, self.entries);
        OwnedSolutions::new(state)
    }

    /// Solves the exact cover problem represented by this matrix, returning all solutions.
    ///
    /// # Example
    ///
    /// ```
    /// let matrix = xcc::samples::toy();
    /// let solutions = matrix.solve_all();
    /// assert_eq!(solutions.len(), 1);
    /// let mut numbers = solutions[0].option_numbers();
    /// numbers.sort_unstable();
    /// assert_eq!(numbers, [1, 3]);
    /// ```
    pub fn solve_all(&self) -> Vec<Solution> {
        self.solutions().collect()
    }

    /// Returns the first solution found, or `None` if there are none.
    pub fn solve_once(&self) -> Option<Solution> {
        self.solutions().next()
    }

    /// Solves the matrix, returning a unique solution if there is one, or `Unique::Ambiguous` if there are multiple
    /// solutions. If there are no solutions, `Unique::None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use xcc::{Matrix, Unique};
    ///
    /// // The following problem is ambiguous, because options
    /// // a and b are identical.
    /// let mut builder = Matrix::builder();
    /// builder.add_primary_item("x");
    /// builder.add_primary_item("y");
    /// builder.add_option("a", vec!["x", "y"]);
    /// builder.add_option("b", vec!["x", "y"]);
    /// let matrix = builder.build();
    /// assert!(matrix.solve_unique().is_ambiguous());
    /// ```
    pub fn solve_unique(&self) -> Unique<Solution> {
        let mut solutions = self.solutions();
        match (solutions.next(), solutions.next()) {
            (None, _) => Unique::None,
            (Some(s1), None) => Unique::One(s1),
            (Some(s1), Some(s2)) => Unique::Ambiguous(s1, s2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_no_colors() {
        // This is the example shown in Table 1 (page 68 of Knuth 7.2.2.1):
        let mut builder = Matrix::builder();
        builder.add_primary_items(["a", "b", "c", "d", "e", "f", "g"]);
        builder.add_option(Some(0), ["c", "e"]);
        builder.add_option(Some(1), vec!["a", "d", "g"]);
        builder.add_option(Some(2), vec!["b", "c", "f"]);
        builder.add_option(Some(3), vec!["a", "d", "f"]);
        builder.add_option(Some(4), vec!["b", "g"]);
        builder.add_option(Some(5), vec!["d", "e", "g"]);

        let matrix = builder.build();
        assert_eq!(matrix.num_items(), 7);
        assert_eq!(matrix.num_primary_items(), 7);
        assert_eq!(matrix.num_options(), 6);

        let names = |opt: &Vec<(ItemId, Option<ColorId>)>| -> Vec<usize> {
            opt.iter().map(|(item, _)| item.index()).collect()
        };
        assert_eq!(names(&matrix.entries[0]), [2, 4]);
        assert_eq!(names(&matrix.entries[1]), [0, 3, 6]);
    }

    #[test]
    fn test_colored_items() {
        // p q x y:A
        // p r x:A y
        // p x:B
        // q x:A
        // r y:B
        let mut builder = Matrix::builder();

        builder.add_primary_items(["p", "q", "r"]);
        builder.add_secondary_items(["x", "y"]);
        builder.add_option("p q x y:A", ["p", "q", "x", "y:A"]);
        builder.add_option("p r x:A y", ["p", "r", "x:A", "y"]);
        builder.add_option("p x:B", ["p", "x:B"]);
        builder.add_option("q x:A", ["q", "x:A"]);
        builder.add_option("r y:B", ["r", "y:B"]);
        let matrix = builder.build();

        let solutions = matrix
            .solve_all()
            .into_iter()
            .map(|s| s.meanings(&matrix))
            .collect::<Vec<_>>();

        assert_eq!(solutions, [[&"q x:A", &"p r x:A y"]]);
    }

    #[test]
    fn low_level_add_option_matches_builder() {
        let mut matrix = Matrix::<&str>::new(2, 0);
        matrix.add_option(&[ColoredItem::new(ItemId::new(0))], "a");
        matrix.add_option(&[ColoredItem::new(ItemId::new(1))], "b");
        let solutions = matrix
            .solve_all()
            .into_iter()
            .map(|s| s.meanings(&matrix))
            .collect::<Vec<_>>();
        assert_eq!(solutions, [[&"a", &"b"]]);
    }
}
