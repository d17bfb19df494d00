//! Searchable entity snapshots.
//!
//! Three entity kinds participate in unified search: vendors, their items,
//! and taxonomic categories. Each carries a weighted searchable corpus, an
//! ordered list of text fields with a role and a relative weight, which is
//! the only surface the text matchers ever look at.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, OpeningHours};
use crate::geo::GeoPoint;

/// Catalog-wide entity identifier.
pub type EntityId = String;

/// Weight attached to an entity's primary display name.
const NAME_WEIGHT: f32 = 3.0;
/// Weight attached to free-text descriptions.
const DESCRIPTION_WEIGHT: f32 = 1.0;
/// Weight attached to secondary fields (cuisines, ingredients).
const SECONDARY_WEIGHT: f32 = 1.5;

/// The kind of a searchable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Vendor,
    Item,
    Category,
}

impl EntityKind {
    /// Every kind, in merge order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Vendor, EntityKind::Item, EntityKind::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Vendor => "vendor",
            EntityKind::Item => "item",
            EntityKind::Category => "category",
        }
    }

    /// Whether entities of this kind carry (or inherit) a coordinate and are
    /// therefore eligible for distance filtering and scoring.
    pub fn is_geo_bound(&self) -> bool {
        matches!(self, EntityKind::Vendor | EntityKind::Item)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a corpus field, used to select fuzzy-match thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Name,
    Description,
    Secondary,
}

/// One weighted searchable text field of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusField {
    /// Stable field label, e.g. `"name"` or `"ingredients"`.
    pub field: &'static str,
    pub role: FieldRole,
    /// Raw field text; matchers normalize it before comparing.
    pub text: String,
    pub weight: f32,
}

/// A vendor (storefront) snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vendor {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cuisines: Vec<String>,
    /// Aggregate rating in [0, 5].
    pub rating: f32,
    /// Administrative flag; inactive vendors never surface.
    pub is_active: bool,
    /// Daily opening window; `None` means always open.
    #[serde(default)]
    pub hours: Option<OpeningHours>,
    pub location: GeoPoint,
}

impl Vendor {
    /// Availability gate: active and inside the opening window at `clock`'s
    /// notion of now.
    pub fn is_open(&self, clock: &dyn Clock) -> bool {
        self.is_active
            && self
                .hours
                .map_or(true, |hours| hours.is_open_at(clock.now()))
    }
}

/// An item sold by a vendor. Items carry no coordinate of their own; they
/// inherit their vendor's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: EntityId,
    pub vendor_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Aggregate rating in [0, 5].
    pub rating: f32,
    pub is_available: bool,
    pub is_veg: bool,
    pub price: f64,
}

/// A taxonomic category. Categories have no coordinate and no availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A snapshot of any searchable entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchableEntity {
    Vendor(Vendor),
    Item(Item),
    Category(Category),
}

impl SearchableEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            SearchableEntity::Vendor(_) => EntityKind::Vendor,
            SearchableEntity::Item(_) => EntityKind::Item,
            SearchableEntity::Category(_) => EntityKind::Category,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SearchableEntity::Vendor(v) => &v.id,
            SearchableEntity::Item(i) => &i.id,
            SearchableEntity::Category(c) => &c.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SearchableEntity::Vendor(v) => &v.name,
            SearchableEntity::Item(i) => &i.name,
            SearchableEntity::Category(c) => &c.name,
        }
    }

    /// Aggregate rating; categories carry none and contribute 0.0.
    pub fn rating(&self) -> f32 {
        match self {
            SearchableEntity::Vendor(v) => v.rating,
            SearchableEntity::Item(i) => i.rating,
            SearchableEntity::Category(_) => 0.0,
        }
    }

    /// Own coordinate, if any. Items inherit their vendor's coordinate at
    /// retrieval time and report `None` here.
    pub fn location(&self) -> Option<GeoPoint> {
        match self {
            SearchableEntity::Vendor(v) => Some(v.location),
            SearchableEntity::Item(_) | SearchableEntity::Category(_) => None,
        }
    }

    pub fn as_vendor(&self) -> Option<&Vendor> {
        match self {
            SearchableEntity::Vendor(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            SearchableEntity::Item(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<&Category> {
        match self {
            SearchableEntity::Category(c) => Some(c),
            _ => None,
        }
    }

    /// Build the weighted searchable corpus for this entity.
    ///
    /// Field order is stable; empty fields are omitted so matchers never see
    /// degenerate text.
    pub fn corpus(&self) -> Vec<CorpusField> {
        let mut fields = Vec::with_capacity(3);
        match self {
            SearchableEntity::Vendor(v) => {
                push_field(&mut fields, "name", FieldRole::Name, &v.name, NAME_WEIGHT);
                push_field(
                    &mut fields,
                    "description",
                    FieldRole::Description,
                    &v.description,
                    DESCRIPTION_WEIGHT,
                );
                push_field(
                    &mut fields,
                    "cuisines",
                    FieldRole::Secondary,
                    &v.cuisines.join(" "),
                    SECONDARY_WEIGHT,
                );
            }
            SearchableEntity::Item(i) => {
                push_field(&mut fields, "name", FieldRole::Name, &i.name, NAME_WEIGHT);
                push_field(
                    &mut fields,
                    "description",
                    FieldRole::Description,
                    &i.description,
                    DESCRIPTION_WEIGHT,
                );
                push_field(
                    &mut fields,
                    "ingredients",
                    FieldRole::Secondary,
                    &i.ingredients.join(" "),
                    SECONDARY_WEIGHT,
                );
            }
            SearchableEntity::Category(c) => {
                push_field(&mut fields, "name", FieldRole::Name, &c.name, NAME_WEIGHT);
                push_field(
                    &mut fields,
                    "description",
                    FieldRole::Description,
                    &c.description,
                    DESCRIPTION_WEIGHT,
                );
            }
        }
        fields
    }
}

fn push_field(
    fields: &mut Vec<CorpusField>,
    field: &'static str,
    role: FieldRole,
    text: &str,
    weight: f32,
) {
    if text.trim().is_empty() {
        return;
    }
    fields.push(CorpusField {
        field,
        role,
        text: text.to_string(),
        weight,
    });
}
