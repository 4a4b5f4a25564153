// Form state for the create-comparison screen and the product overlay.
//
// Both forms are a flat list of focusable fields. Focus is an index into that
// list; typing edits the focused text field. `validate` turns the form into
// request bodies or returns the message shown to the user.

use ranking_core::model::{
    Attribute, AttributeValueInput, DataType, NewAttribute, NewComparison, Product, ProductUpdate,
};

/// Trim a field, mapping blank input to `None`.
fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Create comparison
// ---------------------------------------------------------------------------

/// One attribute row of the create-comparison form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRow {
    pub name: String,
    pub data_type: DataType,
    pub unit: String,
}

/// Which field of the create-comparison form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonField {
    Name,
    Description,
    AttrName(usize),
    AttrType(usize),
    AttrUnit(usize),
}

/// Number of focusable fields per attribute row (name, type, unit).
const ROW_FIELDS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonForm {
    pub name: String,
    pub description: String,
    pub attributes: Vec<AttributeRow>,
    pub focus: usize,
}

impl Default for ComparisonForm {
    fn default() -> Self {
        ComparisonForm {
            name: String::new(),
            description: String::new(),
            attributes: vec![AttributeRow::default()],
            focus: 0,
        }
    }
}

impl ComparisonForm {
    fn field_count(&self) -> usize {
        2 + self.attributes.len() * ROW_FIELDS
    }

    pub fn focused_field(&self) -> ComparisonField {
        match self.focus {
            0 => ComparisonField::Name,
            1 => ComparisonField::Description,
            n => {
                let row = (n - 2) / ROW_FIELDS;
                match (n - 2) % ROW_FIELDS {
                    0 => ComparisonField::AttrName(row),
                    1 => ComparisonField::AttrType(row),
                    _ => ComparisonField::AttrUnit(row),
                }
            }
        }
    }

    /// Attribute row under focus, if any.
    pub fn focused_row(&self) -> Option<usize> {
        match self.focused_field() {
            ComparisonField::AttrName(row)
            | ComparisonField::AttrType(row)
            | ComparisonField::AttrUnit(row) => Some(row),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        self.focus = (self.focus + count - 1) % count;
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focused_field() {
            ComparisonField::Name => Some(&mut self.name),
            ComparisonField::Description => Some(&mut self.description),
            ComparisonField::AttrName(row) => Some(&mut self.attributes[row].name),
            ComparisonField::AttrUnit(row) => Some(&mut self.attributes[row].unit),
            ComparisonField::AttrType(_) => None,
        }
    }

    /// Type a character. On a type selector, a space cycles the type.
    pub fn insert_char(&mut self, c: char) {
        if let ComparisonField::AttrType(_) = self.focused_field() {
            if c == ' ' {
                self.cycle_type(true);
            }
            return;
        }
        if let Some(text) = self.text_mut() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    /// Cycle the data type of the focused row. No-op unless a type selector
    /// has focus.
    pub fn cycle_type(&mut self, forward: bool) {
        if let ComparisonField::AttrType(row) = self.focused_field() {
            let current = self.attributes[row].data_type;
            self.attributes[row].data_type = if forward {
                current.next()
            } else {
                current.prev()
            };
        }
    }

    /// Append an empty row and focus its name field.
    pub fn add_attribute(&mut self) {
        self.attributes.push(AttributeRow::default());
        self.focus = 2 + (self.attributes.len() - 1) * ROW_FIELDS;
    }

    /// Remove the focused row (or the last one when focus is above the rows).
    /// The last remaining row is never removed.
    pub fn remove_attribute(&mut self) -> bool {
        if self.attributes.len() <= 1 {
            return false;
        }
        let row = self
            .focused_row()
            .unwrap_or(self.attributes.len() - 1);
        self.attributes.remove(row);
        if self.focus >= self.field_count() {
            self.focus = self.field_count() - ROW_FIELDS;
        }
        true
    }

    /// Build the request bodies, or return the validation message.
    pub fn validate(&self) -> Result<(NewComparison, Vec<NewAttribute>), &'static str> {
        let name = non_blank(&self.name).ok_or("Please enter a comparison name")?;

        let attributes: Vec<NewAttribute> = self
            .attributes
            .iter()
            .filter_map(|row| {
                non_blank(&row.name).map(|name| NewAttribute {
                    name,
                    data_type: row.data_type,
                    unit: non_blank(&row.unit),
                })
            })
            .collect();
        if attributes.is_empty() {
            return Err("Please add at least one attribute");
        }

        let comparison = NewComparison {
            name,
            description: non_blank(&self.description),
        };
        Ok((comparison, attributes))
    }
}

// ---------------------------------------------------------------------------
// Product form
// ---------------------------------------------------------------------------

/// A product form's input for one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueField {
    pub attribute: Attribute,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
    Value(usize),
}

/// Add/edit product overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    /// `None` when adding a new product.
    pub product_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub values: Vec<ValueField>,
    pub focus: usize,
}

impl ProductForm {
    /// Empty form with one blank value per attribute.
    pub fn new(attributes: &[Attribute]) -> Self {
        ProductForm {
            product_id: None,
            name: String::new(),
            description: String::new(),
            values: attributes
                .iter()
                .map(|attribute| ValueField {
                    attribute: attribute.clone(),
                    value: String::new(),
                })
                .collect(),
            focus: 0,
        }
    }

    /// Form prefilled from an existing product.
    pub fn from_existing(product: &Product, attributes: &[Attribute]) -> Self {
        let mut form = ProductForm::new(attributes);
        form.product_id = Some(product.id);
        form.name = product.name.clone();
        form.description = product.description.clone().unwrap_or_default();
        for field in &mut form.values {
            if let Some(existing) = product.value_for(field.attribute.id) {
                field.value = existing.value.clone();
            }
        }
        form
    }

    pub fn is_edit(&self) -> bool {
        self.product_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Product"
        } else {
            "Add Product"
        }
    }

    fn field_count(&self) -> usize {
        2 + self.values.len()
    }

    pub fn focused_field(&self) -> ProductField {
        match self.focus {
            0 => ProductField::Name,
            1 => ProductField::Description,
            n => ProductField::Value(n - 2),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        self.focus = (self.focus + count - 1) % count;
    }

    /// Type a character. Number attributes reject non-numeric input.
    pub fn insert_char(&mut self, c: char) {
        match self.focused_field() {
            ProductField::Name => self.name.push(c),
            ProductField::Description => self.description.push(c),
            ProductField::Value(i) => {
                let field = &mut self.values[i];
                if field.attribute.data_type.accepts_char(c) {
                    field.value.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focused_field() {
            ProductField::Name => {
                self.name.pop();
            }
            ProductField::Description => {
                self.description.pop();
            }
            ProductField::Value(i) => {
                self.values[i].value.pop();
            }
        }
    }

    /// Build the product fields and the non-blank attribute values, or
    /// return the validation message.
    pub fn validate(&self) -> Result<(ProductUpdate, Vec<AttributeValueInput>), &'static str> {
        let name = non_blank(&self.name).ok_or("Please enter a product name")?;
        let attribute_data = self
            .values
            .iter()
            .filter_map(|field| {
                non_blank(&field.value).map(|value| AttributeValueInput {
                    attribute_id: field.attribute.id,
                    value,
                })
            })
            .collect();
        let fields = ProductUpdate {
            name,
            description: non_blank(&self.description),
        };
        Ok((fields, attribute_data))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
