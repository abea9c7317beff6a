//! Product module - structured records extracted from model output

use serde::{Deserialize, Serialize};

/// Ordered list of recommended products, in order of appearance
pub type RecommendationList = Vec<ProductRecord>;

/// A single recommended product
///
/// Every field is optional. Only presence is tracked; content is never
/// validated. Absent fields are omitted from the JSON form, and a field
/// that was present but empty serializes as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Brief description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Environmental impact reduction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_reduction: Option<String>,

    /// Price range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
}

impl ProductRecord {
    /// Start a record seeded with a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Read a field
    pub fn get(&self, field: ProductField) -> Option<&str> {
        match field {
            ProductField::Name => self.name.as_deref(),
            ProductField::Description => self.description.as_deref(),
            ProductField::ImpactReduction => self.impact_reduction.as_deref(),
            ProductField::PriceRange => self.price_range.as_deref(),
        }
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, field: ProductField, value: impl Into<String>) {
        let slot = match field {
            ProductField::Name => &mut self.name,
            ProductField::Description => &mut self.description,
            ProductField::ImpactReduction => &mut self.impact_reduction,
            ProductField::PriceRange => &mut self.price_range,
        };
        *slot = Some(value.into());
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        ProductField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// True when all four fields are present
    pub fn is_complete(&self) -> bool {
        ProductField::ALL.iter().all(|f| self.get(*f).is_some())
    }
}

/// The recognized fields of a [`ProductRecord`]
///
/// Each field has a human-readable label that the model is asked to use as
/// a line marker (`- <label>: <value>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    /// `- Product name:`; starts a new record
    Name,

    /// `- Brief description:`
    Description,

    /// `- Environmental impact reduction:`
    ImpactReduction,

    /// `- Price range:`
    PriceRange,
}

impl ProductField {
    /// All fields, in the order the model is asked to emit them
    pub const ALL: [ProductField; 4] = [
        ProductField::Name,
        ProductField::Description,
        ProductField::ImpactReduction,
        ProductField::PriceRange,
    ];

    /// The marker label, without bullet or colon
    pub fn label(&self) -> &'static str {
        match self {
            ProductField::Name => "Product name",
            ProductField::Description => "Brief description",
            ProductField::ImpactReduction => "Environmental impact reduction",
            ProductField::PriceRange => "Price range",
        }
    }

    /// JSON key used for this field
    pub fn key(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::ImpactReduction => "impact_reduction",
            ProductField::PriceRange => "price_range",
        }
    }
}
