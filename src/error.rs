/// Errors produced while normalizing a set of options into a solvable
/// instance.
///
/// All of these are detected eagerly, before the search ever starts. See
/// the crate-level docs for the error surface this crate guarantees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A primary item never appears in any option, so no solution can ever
    /// cover it.
    #[error("primary item {0:?} does not appear in any option")]
    EmptyPrimary(String),

    /// An option lists the same item twice.
    #[error("option {0} lists item {1:?} more than once")]
    DuplicateItem(usize, String),

    /// A color label was attached to a primary item.
    #[error("option {0} attaches a color to primary item {1:?}")]
    ColorOnPrimary(usize, String),

    /// A token in an option is neither a declared primary nor secondary
    /// item. Only raised when explicit item lists were supplied.
    #[error("option {0} uses undeclared item {1:?}")]
    UnknownItem(usize, String),
}
