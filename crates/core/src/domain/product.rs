use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cognitive::{Dimension, NeuralImpact};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Memory,
    Focus,
    Sleep,
    Energy,
    Mood,
    Gadgets,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Focus => "focus",
            Self::Sleep => "sleep",
            Self::Energy => "energy",
            Self::Mood => "mood",
            Self::Gadgets => "gadgets",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "focus" => Ok(Self::Focus),
            "sleep" => Ok(Self::Sleep),
            "energy" => Ok(Self::Energy),
            "mood" => Ok(Self::Mood),
            "gadgets" => Ok(Self::Gadgets),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub neural_impact: Option<NeuralImpact>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub ai_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        price: Decimal,
    ) -> Self {
        Self {
            id: ProductId(id.into()),
            name: name.into(),
            description: String::new(),
            price,
            category,
            image_url: None,
            neural_impact: None,
            ingredients: Vec::new(),
            in_stock: true,
            ai_score: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_ai_score(mut self, ai_score: f64) -> Self {
        self.ai_score = Some(ai_score);
        self
    }

    pub fn with_impact(mut self, impact: NeuralImpact) -> Self {
        self.neural_impact = Some(impact);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Stored catalog ranking value; an unscored product ranks at zero.
    pub fn base_score(&self) -> f64 {
        self.ai_score.unwrap_or(0.0)
    }

    pub fn impact(&self, dimension: Dimension) -> f64 {
        self.neural_impact.map(|impact| impact.get(dimension)).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::cognitive::{Dimension, NeuralImpact};

    use super::{Category, Product};

    #[test]
    fn unscored_product_without_impact_defaults_to_zero() {
        let product = Product::new("p-1", "Plain", Category::Gadgets, Decimal::new(999, 2));

        assert_eq!(product.base_score(), 0.0);
        assert_eq!(product.impact(Dimension::Focus), 0.0);
    }

    #[test]
    fn category_parse_rejects_unknown_values() {
        assert_eq!("SLEEP".parse::<Category>().expect("sleep"), Category::Sleep);

        let error = "wellness".parse::<Category>().expect_err("unknown category");
        assert!(error.to_string().contains("wellness"));
    }

    #[test]
    fn product_json_uses_camel_case_and_defaults() {
        let raw = r#"{
            "id": "7",
            "name": "Focus Tea",
            "description": "Loose leaf",
            "price": "12.50",
            "category": "focus",
            "createdAt": "2026-01-01T00:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(raw).expect("deserialize product");

        assert!(product.in_stock);
        assert_eq!(product.ai_score, None);
        assert_eq!(product.neural_impact, None);

        let product = product.with_impact(NeuralImpact::default().with(Dimension::Focus, 4.0));
        let json = serde_json::to_value(&product).expect("serialize product");
        assert_eq!(json["neuralImpact"]["focus"], 4.0);
        assert!(json.get("inStock").is_some());
    }
}
