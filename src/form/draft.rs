use log::debug;

use crate::model::{IngredientLine, LocSegment, RecipeCreateRequest, ValidationErrorEntry};

/// Message attached to a locally detected empty field.
pub const FIELD_REQUIRED: &str = "field required";

/// Top-level text fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    AuthorId,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::AuthorId => "author_id",
        }
    }
}

/// Fields of one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    IngredientId,
    Quantity,
    Unit,
}

impl LineField {
    pub const ALL: [LineField; 3] = [LineField::IngredientId, LineField::Quantity, LineField::Unit];

    pub fn as_str(&self) -> &'static str {
        match self {
            LineField::IngredientId => "ingredient_id",
            LineField::Quantity => "quantity",
            LineField::Unit => "unit",
        }
    }
}

/// One ingredient row as typed, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    pub ingredient_id: String,
    pub quantity: String,
    pub unit: String,
}

impl LineItem {
    pub fn get(&self, field: LineField) -> &str {
        match field {
            LineField::IngredientId => &self.ingredient_id,
            LineField::Quantity => &self.quantity,
            LineField::Unit => &self.unit,
        }
    }

    fn set(&mut self, field: LineField, value: String) {
        match field {
            LineField::IngredientId => self.ingredient_id = value,
            LineField::Quantity => self.quantity = value,
            LineField::Unit => self.unit = value,
        }
    }

    fn to_line(&self) -> IngredientLine {
        IngredientLine {
            ingredient_id: parse_id(&self.ingredient_id),
            quantity: parse_quantity(&self.quantity),
            unit: self.unit.clone(),
        }
    }
}

/// The in-progress recipe.
///
/// Always holds at least one line item; the fields are private so that only
/// the mutation operations below can change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    title: String,
    description: String,
    author_id: String,
    ingredients: Vec<LineItem>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author_id: String::new(),
            ingredients: vec![LineItem::default()],
        }
    }
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn ingredients(&self) -> &[LineItem] {
        &self.ingredients
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
            DraftField::AuthorId => &self.author_id,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
            DraftField::AuthorId => self.author_id = value,
        }
    }

    /// Replace one field of the line item at `index`.
    ///
    /// Returns `false` and leaves the draft untouched when `index` is out of range.
    pub fn update_ingredient(
        &mut self,
        index: usize,
        field: LineField,
        value: impl Into<String>,
    ) -> bool {
        match self.ingredients.get_mut(index) {
            Some(item) => {
                item.set(field, value.into());
                true
            }
            None => {
                debug!("Ignoring update of missing line item {}", index);
                false
            }
        }
    }

    /// Append an empty line item.
    pub fn add_ingredient(&mut self) {
        self.ingredients.push(LineItem::default());
    }

    /// Remove the line item at `index`.
    ///
    /// Removing the last remaining item, or an index out of range, is a no-op
    /// and returns `false`.
    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        if self.ingredients.len() <= 1 || index >= self.ingredients.len() {
            debug!(
                "Ignoring removal of line item {} ({} present)",
                index,
                self.ingredients.len()
            );
            return false;
        }
        self.ingredients.remove(index);
        true
    }

    /// Whether the row editor offers removal of the line item at `index`.
    ///
    /// The first row is never removable; any later row is.
    pub fn is_removable(&self, index: usize) -> bool {
        index > 0 && index < self.ingredients.len()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Entries for every required field left empty, in form order.
    ///
    /// Whitespace counts as a value; the backend decides whether it is acceptable.
    pub fn missing_required(&self) -> Vec<ValidationErrorEntry> {
        let mut missing = Vec::new();

        for field in [DraftField::Title, DraftField::Description, DraftField::AuthorId] {
            if self.field(field).is_empty() {
                missing.push(ValidationErrorEntry::new(
                    vec!["body".into(), field.as_str().into()],
                    FIELD_REQUIRED,
                ));
            }
        }

        for (index, item) in self.ingredients.iter().enumerate() {
            for field in LineField::ALL {
                if item.get(field).is_empty() {
                    missing.push(ValidationErrorEntry::new(
                        vec![
                            "body".into(),
                            "ingredients".into(),
                            LocSegment::from(index),
                            field.as_str().into(),
                        ],
                        FIELD_REQUIRED,
                    ));
                }
            }
        }

        missing
    }

    /// Build the wire request. Numbers that do not parse become `None`.
    ///
    /// Surrounding whitespace is ignored, but any trailing text (`"200g"`)
    /// makes a number unparseable.
    pub fn to_request(&self) -> RecipeCreateRequest {
        RecipeCreateRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            author_id: parse_id(&self.author_id),
            ingredients: self.ingredients.iter().map(LineItem::to_line).collect(),
        }
    }
}

fn parse_id(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn parse_quantity(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|quantity| quantity.is_finite())
}
