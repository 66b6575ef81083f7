//! Living being domain model.
//!
//! # Responsibility
//! - Define the aquarium species record stored by living-being repositories.
//! - Provide lifecycle helpers for timestamp refresh.
//!
//! # Invariants
//! - `id` is stable and never reused for another living being.
//! - `name` is the human-readable unique key enforced by repositories.

use crate::model::record::{Record, RecordId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-supplied fields for creating or replacing a living being.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivingBeingProps {
    pub name: String,
    pub scientific_name: String,
    /// Native region, free text.
    pub location: String,
    /// Adult size as entered by curators (units are not normalized).
    pub size: String,
    /// Years.
    pub life_expectancy: u32,
    pub ph: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    pub description: String,
    pub water_type_id: Uuid,
    pub category_id: Uuid,
}

/// Stored living being record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivingBeing {
    pub id: RecordId,
    pub name: String,
    pub scientific_name: String,
    pub location: String,
    pub size: String,
    pub life_expectancy: u32,
    pub ph: f64,
    pub temperature: f64,
    pub description: String,
    pub water_type_id: Uuid,
    pub category_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LivingBeing {
    /// Replaces every caller-owned field, keeping identity and `created_at`.
    ///
    /// `updated_at` is left untouched; call [`LivingBeing::touch`] after.
    pub fn replace_props(&mut self, props: LivingBeingProps) {
        let LivingBeingProps {
            name,
            scientific_name,
            location,
            size,
            life_expectancy,
            ph,
            temperature,
            description,
            water_type_id,
            category_id,
        } = props;
        self.name = name;
        self.scientific_name = scientific_name;
        self.location = location;
        self.size = size;
        self.life_expectancy = life_expectancy;
        self.ph = ph;
        self.temperature = temperature;
        self.description = description;
        self.water_type_id = water_type_id;
        self.category_id = category_id;
    }

    /// Refreshes `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Record for LivingBeing {
    type Props = LivingBeingProps;

    const ENTITY: &'static str = "Living being";

    fn from_props(
        id: RecordId,
        created_at: Timestamp,
        updated_at: Timestamp,
        props: Self::Props,
    ) -> Self {
        Self {
            id,
            name: props.name,
            scientific_name: props.scientific_name,
            location: props.location,
            size: props.size,
            life_expectancy: props.life_expectancy,
            ph: props.ph,
            temperature: props.temperature,
            description: props.description,
            water_type_id: props.water_type_id,
            category_id: props.category_id,
            created_at,
            updated_at,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
