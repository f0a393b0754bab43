use crate::utils::error::Result;
use crate::utils::validation::{
    validate_min_decimal, validate_min_integer, validate_non_empty_string, Validate,
};
use serde::{Deserialize, Serialize};

pub const MIN_QUANTITY: u32 = 1;
pub const MIN_WEIGHT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    /// Kilograms.
    pub weight: f64,
}

/// A parcel without its id: what the form submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub weight: f64,
}

impl Parcel {
    pub fn from_input(id: String, input: ParcelInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            quantity: input.quantity,
            weight: input.weight,
        }
    }

    /// Overwrites every field except `id`.
    pub fn apply(&mut self, input: ParcelInput) {
        self.name = input.name;
        self.description = input.description;
        self.quantity = input.quantity;
        self.weight = input.weight;
    }

    pub fn to_input(&self) -> ParcelInput {
        ParcelInput {
            name: self.name.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            weight: self.weight,
        }
    }
}

impl ParcelInput {
    pub fn new(name: impl Into<String>, quantity: u32, weight: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            weight,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Default for ParcelInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            quantity: MIN_QUANTITY,
            weight: MIN_WEIGHT,
        }
    }
}

impl Validate for ParcelInput {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_min_integer("quantity", self.quantity, MIN_QUANTITY)?;
        validate_min_decimal("weight", self.weight, MIN_WEIGHT)?;
        Ok(())
    }
}
