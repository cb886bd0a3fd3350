//! Typed CommerceML layer on top of the generic engine.
//!
//! The engine emits schema-free [`Node`](crate::Node) records; this module
//! holds the rule tables for the two CommerceML document kinds this crate
//! understands (offer packages and orders) and maps their records into
//! typed structs. Field access is explicit: a field the dialect requires
//! raises [`Error::MissingField`] when absent, optional fields come back
//! as `Option`, and unknown tags are simply never read.

mod offers;
mod orders;
mod types;

pub use offers::OffersParser;
pub use orders::OrdersParser;
pub use types::{
    BaseUnit, Classifier, CommercialInformation, CompanyInfo, Counterparty, Document, Offer,
    OffersPackage, PersonInfo, Price, PriceType, Property, Stock, Tax, Warehouse,
};

use crate::error::Error;
use crate::record::{Node, Value};

/// Root element of every CommerceML document.
pub(crate) const ROOT: &str = "КоммерческаяИнформация";

pub(crate) fn req_text(node: &Node, name: &str, context: &str) -> Result<String, Error> {
    node.child_text(name)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingField {
            field: name.to_string(),
            context: context.to_string(),
        })
}

pub(crate) fn opt_text(node: &Node, name: &str) -> Option<String> {
    node.child_text(name).map(str::to_string)
}

pub(crate) fn req_attr(node: &Node, name: &str, context: &str) -> Result<String, Error> {
    node.attr(name)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingField {
            field: name.to_string(),
            context: context.to_string(),
        })
}

/// 1C serializes booleans as the literals "true"/"false".
pub(crate) fn flag(text: Option<&str>) -> Option<bool> {
    text.map(|t| t == "true")
}

/// Structured view of a value, or a missing-field error naming what the
/// caller was after inside it.
pub(crate) fn structured<'a>(
    value: &'a Value,
    field: &str,
    context: &str,
) -> Result<&'a Node, Error> {
    value.as_node().ok_or_else(|| Error::MissingField {
        field: field.to_string(),
        context: context.to_string(),
    })
}

/// Counterparty blocks (`Владелец`) carry either company or person
/// details; which one is detected by the presence of the official name,
/// the same way 1C integrations do it.
pub(crate) fn map_counterparty(node: &Node, context: &str) -> Result<Counterparty, Error> {
    let mut counterparty = Counterparty {
        id: req_text(node, "Ид", context)?,
        name: req_text(node, "Наименование", context)?,
        company_info: None,
        person_info: None,
    };

    if let Some(official_name) = opt_text(node, "ОфициальноеНаименование") {
        counterparty.company_info = Some(CompanyInfo {
            official_name,
            inn: opt_text(node, "ИНН"),
            kpp: opt_text(node, "КПП"),
            okpo: opt_text(node, "ОКПО"),
        });
    } else {
        counterparty.person_info = Some(PersonInfo {
            full_name: opt_text(node, "ПолноеНаименование"),
        });
    }

    Ok(counterparty)
}

pub(crate) fn map_commercial_information(
    node: &Node,
) -> Result<CommercialInformation, Error> {
    Ok(CommercialInformation {
        schema_version: req_attr(node, "ВерсияСхемы", ROOT)?,
        creation_timestamp: req_attr(node, "ДатаФормирования", ROOT)?,
    })
}
