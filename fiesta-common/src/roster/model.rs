//! Roster data model and its field-map encoding

use crate::import::canonical_size;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Stored field names, shared with data written by earlier versions
const F_ID: &str = "id";
pub(crate) const F_GIVEN_NAME: &str = "nombre";
const F_SURNAME1: &str = "apellido1";
const F_SURNAME2: &str = "apellido2";
const F_SIZE: &str = "talla";
const F_PAID: &str = "pagado";
const F_PAID_AT: &str = "fechaPagado";
const F_PICKED_UP: &str = "recogido";
const F_PICKED_UP_AT: &str = "fechaRecogido";
pub(crate) const F_ORDER: &str = "orden";

/// Minimum length of given name and first surname on single-add
pub const MIN_NAME_LEN: usize = 2;

/// One attendee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: String,
    pub given_name: String,
    pub surname1: String,
    pub surname2: String,
    pub size_label: String,
    pub paid: bool,
    pub paid_at: String,
    pub picked_up: bool,
    pub picked_up_at: String,
    pub order: i64,
}

impl RosterEntry {
    /// A fresh, unpaid, not-picked-up entry
    pub fn new(
        id: String,
        given_name: String,
        surname1: String,
        surname2: String,
        size_label: String,
        order: i64,
    ) -> Self {
        Self {
            id,
            given_name,
            surname1,
            surname2,
            size_label,
            paid: false,
            paid_at: String::new(),
            picked_up: false,
            picked_up_at: String::new(),
            order,
        }
    }

    /// Given name and surnames joined with single spaces
    pub fn full_name(&self) -> String {
        [&self.given_name, &self.surname1, &self.surname2]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Encode as a field map, `order` included
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            (F_ID.to_string(), self.id.clone()),
            (F_GIVEN_NAME.to_string(), self.given_name.clone()),
            (F_SURNAME1.to_string(), self.surname1.clone()),
            (F_SURNAME2.to_string(), self.surname2.clone()),
            (F_SIZE.to_string(), self.size_label.clone()),
            (F_PAID.to_string(), self.paid.to_string()),
            (F_PAID_AT.to_string(), self.paid_at.clone()),
            (F_PICKED_UP.to_string(), self.picked_up.to_string()),
            (F_PICKED_UP_AT.to_string(), self.picked_up_at.clone()),
            (F_ORDER.to_string(), self.order.to_string()),
        ]
    }

    /// Decode a stored field map
    ///
    /// `position` is the 1-based place of the entry in score order; it
    /// becomes `order` only when the map has no usable stored order. Returns
    /// `None` for an empty (missing) map.
    pub fn from_fields(id: &str, fields: &HashMap<String, String>, position: usize) -> Option<Self> {
        if fields.is_empty() {
            return None;
        }
        let text = |name: &str| fields.get(name).cloned().unwrap_or_default();
        let flag = |name: &str| fields.get(name).map(|v| v == "true").unwrap_or(false);

        let order = fields
            .get(F_ORDER)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(position as i64);

        Some(Self {
            id: fields.get(F_ID).cloned().unwrap_or_else(|| id.to_string()),
            given_name: text(F_GIVEN_NAME),
            surname1: text(F_SURNAME1),
            surname2: text(F_SURNAME2),
            size_label: text(F_SIZE),
            paid: flag(F_PAID),
            paid_at: text(F_PAID_AT),
            picked_up: flag(F_PICKED_UP),
            picked_up_at: text(F_PICKED_UP_AT),
            order,
        })
    }
}

/// The two toggleable status flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusField {
    Paid,
    PickedUp,
}

impl StatusField {
    /// Stored name of the boolean field
    pub fn flag_field(&self) -> &'static str {
        match self {
            StatusField::Paid => F_PAID,
            StatusField::PickedUp => F_PICKED_UP,
        }
    }

    /// Stored name of the companion date field
    pub fn date_field(&self) -> &'static str {
        match self {
            StatusField::Paid => F_PAID_AT,
            StatusField::PickedUp => F_PICKED_UP_AT,
        }
    }
}

/// Single-add form input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub given_name: String,
    pub surname1: String,
    #[serde(default)]
    pub surname2: Option<String>,
    pub size: String,
}

/// Validated single-add input with trimmed names and canonical size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMember {
    pub given_name: String,
    pub surname1: String,
    pub surname2: String,
    pub size_label: String,
}

impl NewMember {
    /// Check minimum lengths and canonicalize the size label
    pub fn validate(&self) -> Result<ValidMember> {
        let given_name = self.given_name.trim();
        let surname1 = self.surname1.trim();
        let surname2 = self.surname2.as_deref().unwrap_or("").trim();
        let size = self.size.trim();

        if given_name.chars().count() < MIN_NAME_LEN {
            return Err(Error::InvalidInput(
                "El nombre es obligatorio".to_string(),
            ));
        }
        if surname1.chars().count() < MIN_NAME_LEN {
            return Err(Error::InvalidInput(
                "El apellido 1 es obligatorio".to_string(),
            ));
        }
        if size.is_empty() {
            return Err(Error::InvalidInput("La talla es obligatoria".to_string()));
        }

        Ok(ValidMember {
            given_name: given_name.to_string(),
            surname1: surname1.to_string(),
            surname2: surname2.to_string(),
            size_label: canonical_size(size),
        })
    }
}
