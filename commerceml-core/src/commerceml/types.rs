//! Typed records for the CommerceML blocks this crate extracts.
//!
//! Field names follow the dialect's Russian tag names translated the way
//! existing 1C integrations translate them. String-typed fields keep the
//! source representation; only stock counts are parsed numerically,
//! because that is the one field consumers count with.

use serde::Serialize;

/// Attributes of the document root `КоммерческаяИнформация`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommercialInformation {
    pub schema_version: String,
    pub creation_timestamp: String,
}

/// A counterparty (`Владелец` block): company or person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counterparty {
    pub id: String,
    pub name: String,
    pub company_info: Option<CompanyInfo>,
    pub person_info: Option<PersonInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyInfo {
    pub official_name: String,
    pub inn: Option<String>,
    pub kpp: Option<String>,
    pub okpo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonInfo {
    pub full_name: Option<String>,
}

/// Classifier header (`Классификатор`), without property details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classifier {
    pub id: String,
    pub name: String,
    pub owner: Counterparty,
}

/// One classifier property (`Свойства/Свойство`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub value_type: Option<String>,
}

/// Offers package header (`ПакетПредложений`) with its price types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffersPackage {
    pub changes_only: Option<bool>,
    pub id: String,
    pub name: String,
    pub catalog_id: Option<String>,
    pub classifier_id: Option<String>,
    pub owner: Option<Counterparty>,
    pub price_types: Vec<PriceType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceType {
    pub id: String,
    pub name: String,
    pub currency: Option<String>,
    pub tax: Option<Tax>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tax {
    pub name: String,
    pub included_in_sum: Option<bool>,
    pub excise: Option<bool>,
}

/// Warehouse (`Склады/Склад`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
}

/// One offer (`Предложения/Предложение`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offer {
    pub id: String,
    pub article: Option<String>,
    pub name: String,
    pub base_unit: Option<BaseUnit>,
    pub quantity: Option<String>,
    pub prices: Vec<Price>,
    pub stocks: Vec<Stock>,
}

/// `БазоваяЕдиница` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseUnit {
    pub code: Option<String>,
    pub full_name: Option<String>,
    pub international_acronym: Option<String>,
}

/// One price line (`Цены/Цена`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Price {
    pub representation: Option<String>,
    pub price_type_id: String,
    pub price_per_unit: String,
    pub currency: Option<String>,
    pub unit: Option<String>,
    pub coefficient: Option<String>,
}

/// Per-warehouse stock level (`Склад` attributes on an offer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stock {
    pub warehouse_id: String,
    pub quantity: i64,
}

/// Order document header (`Документ`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: String,
    pub number: String,
    pub date: Option<String>,
    pub operation: Option<String>,
    pub role: Option<String>,
    pub currency: Option<String>,
    pub sum: Option<String>,
}
