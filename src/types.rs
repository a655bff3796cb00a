/// ID of an option (row) in the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(usize);

impl OptionId {
    /// Creates a new `OptionId`.
    #[must_use]
    pub fn new(id: usize) -> Self {
        OptionId(id)
    }

    /// Returns the index of the option in the matrix.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// ID of an item (column) in the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
    /// Creates a new `ItemId`.
    #[must_use]
    pub fn new(id: usize) -> Self {
        ItemId(id)
    }

    /// Returns the index of the item in the matrix.
    #[must_use]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Color of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(usize);

impl Color {
    /// Creates a new `Color`.
    #[must_use]
    pub fn new(id: usize) -> Self {
        Color(id)
    }
}

/// An interned color id, as tracked inside the search engine.
///
/// Distinct from the public [`Color`] type so that `0` can be a safe
/// sentinel internally without constraining which `usize` values callers
/// may pass to [`Color::new`]. `ColorId`s from [`crate::Builder`]'s string
/// labels are interned once per build, across all items; the search engine
/// only ever compares two `ColorId`s that were committed to the *same*
/// item, so it does not matter that two unrelated items could incidentally
/// share a `ColorId` if their labels happen to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ColorId(usize);

impl ColorId {
    pub(crate) fn new(id: usize) -> Self {
        ColorId(id)
    }
}

/// Represents an item as it occurs within one option: a reference to the
/// item's column, plus an optional color.
///
/// A color here is just an integer.
///
/// # Examples
///
/// ```
/// use xcc::{Color, ColoredItem, ItemId};
///
/// let item = ColoredItem::new(ItemId::new(1));
/// assert_eq!(item.color(), None);
///
/// let item = ColoredItem::with_color(ItemId::new(1), Color::new(100));
/// assert_eq!(item.color(), Some(Color::new(100)));
/// ```
#[derive(Clone, Copy)]
pub struct ColoredItem {
    item_id: ItemId,
    color: Option<Color>,
}

impl ColoredItem {
    /// Creates a new `ColoredItem` with no color.
    ///
    /// # Examples
    /// ```
    /// use xcc::{ColoredItem, ItemId};
    ///
    /// let item = ColoredItem::new(ItemId::new(42));
    /// assert_eq!(item.item(), ItemId::new(42));
    /// assert_eq!(item.color(), None);
    /// ```
    #[must_use]
    pub fn new(item_id: ItemId) -> Self {
        ColoredItem {
            item_id,
            color: None,
        }
    }

    /// Returns the item this occurrence refers to.
    #[must_use]
    pub fn item(&self) -> ItemId {
        self.item_id
    }

    /// Returns the color of this item, if any.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Creates a new `ColoredItem` with the given color.
    ///
    /// # Examples
    /// ```
    /// use xcc::{ColoredItem, Color, ItemId};
    /// let item = ColoredItem::with_color(ItemId::new(42), Color::new(100));
    /// assert_eq!(item.item(), ItemId::new(42));
    /// assert_eq!(item.color(), Some(Color::new(100)));
    /// ```
    #[must_use]
    pub fn with_color(item_id: ItemId, color: Color) -> Self {
        ColoredItem {
            item_id,
            color: Some(color),
        }
    }
}

pub(crate) fn intern_color(color: Color) -> ColorId {
    ColorId::new(color.0)
}
