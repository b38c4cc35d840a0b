//! Ingredient row editor.
//!
//! A row is a read-only view over one line item of the draft. It never
//! mutates anything itself: user input is turned into a [`RowEvent`] that the
//! owning form applies.

use crate::form::draft::{LineField, LineItem, RecipeDraft};
use crate::model::IngredientRef;

/// Label of the empty choice in the ingredient selector.
pub const INGREDIENT_PLACEHOLDER: &str = "-- choose ingredient --";

/// A change reported by a row editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    Changed {
        index: usize,
        field: LineField,
        value: String,
    },
    Removed {
        index: usize,
    },
}

/// One entry of a selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    /// Options for a selector: a placeholder with an empty value, then one per entry.
    pub(crate) fn list<'a>(
        placeholder: &str,
        entries: impl Iterator<Item = (i64, &'a str)>,
        current: &str,
    ) -> Vec<SelectOption> {
        let current = current.trim();
        let mut options = vec![SelectOption {
            value: String::new(),
            label: placeholder.to_string(),
            selected: current.is_empty(),
        }];
        options.extend(entries.map(|(id, name)| {
            let value = id.to_string();
            SelectOption {
                selected: value == current,
                value,
                label: name.to_string(),
            }
        }));
        options
    }
}

/// Editor for the line item at one index.
#[derive(Debug, Clone, Copy)]
pub struct IngredientRow<'a> {
    index: usize,
    item: &'a LineItem,
    options: &'a [IngredientRef],
    removable: bool,
}

impl<'a> IngredientRow<'a> {
    pub fn new(
        index: usize,
        item: &'a LineItem,
        options: &'a [IngredientRef],
        removable: bool,
    ) -> Self {
        Self {
            index,
            item,
            options,
            removable,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item(&self) -> &'a LineItem {
        self.item
    }

    pub fn is_removable(&self) -> bool {
        self.removable
    }

    pub fn value(&self, field: LineField) -> &'a str {
        self.item.get(field)
    }

    /// Choices for the ingredient selector, with the current one marked.
    pub fn ingredient_options(&self) -> Vec<SelectOption> {
        SelectOption::list(
            INGREDIENT_PLACEHOLDER,
            self.options.iter().map(|i| (i.id, i.name.as_str())),
            &self.item.ingredient_id,
        )
    }

    /// The known ingredient the row currently points at, if any.
    pub fn selected_ingredient(&self) -> Option<&'a IngredientRef> {
        let id: i64 = self.item.ingredient_id.trim().parse().ok()?;
        self.options.iter().find(|option| option.id == id)
    }

    pub fn change(&self, field: LineField, value: impl Into<String>) -> RowEvent {
        RowEvent::Changed {
            index: self.index,
            field,
            value: value.into(),
        }
    }

    /// `None` when this row does not offer removal.
    pub fn remove(&self) -> Option<RowEvent> {
        self.removable.then_some(RowEvent::Removed { index: self.index })
    }
}

/// Row editors for every line item of `draft`, in order.
pub fn rows<'a>(
    draft: &'a RecipeDraft,
    options: &'a [IngredientRef],
) -> impl Iterator<Item = IngredientRow<'a>> + 'a {
    draft
        .ingredients()
        .iter()
        .enumerate()
        .map(move |(index, item)| IngredientRow::new(index, item, options, draft.is_removable(index)))
}
