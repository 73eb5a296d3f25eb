//! Display text bundles. Only the front end reads these; the calculation core
//! never looks inside.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, Result};
use crate::session::Field;

const EN_BUNDLE: &str = include_str!("../locales/en.json");
const HU_BUNDLE: &str = include_str!("../locales/hu.json");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Hu,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Titles {
    pub main: String,
    pub results: String,
    pub empty_results: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buttons {
    pub clear: String,
    pub submit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    pub amount: String,
    pub term: String,
    pub rate: String,
    pub method: String,
    pub repayment: String,
    pub interest_only: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adornments {
    pub amount: String,
    pub term: String,
    pub rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    pub required: String,
    pub invalid_magnitude: String,
    pub invalid_number: String,
    pub empty_hint: String,
    pub results_hint: String,
    pub monthly: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleBundle {
    pub titles: Titles,
    pub buttons: Buttons,
    pub labels: Labels,
    pub adornments: Adornments,
    pub messages: Messages,
    pub currency_unit: String,
}

impl LocaleBundle {
    /// One of the bundles compiled into the binary.
    pub fn embedded(locale: Locale) -> Result<Self> {
        let raw = match locale {
            Locale::En => EN_BUNDLE,
            Locale::Hu => HU_BUNDLE,
        };
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            CalculatorError::Locale(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn label(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.labels.amount,
            Field::Term => &self.labels.term,
            Field::Rate => &self.labels.rate,
            Field::Method => &self.labels.method,
        }
    }

    pub fn adornment(&self, field: Field) -> Option<&str> {
        match field {
            Field::Amount => Some(&self.adornments.amount),
            Field::Term => Some(&self.adornments.term),
            Field::Rate => Some(&self.adornments.rate),
            Field::Method => None,
        }
    }
}
