//! Offers-package documents (`ПакетПредложений`).

use std::io::BufRead;

use super::types::{
    BaseUnit, Classifier, CommercialInformation, Offer, OffersPackage, Price, PriceType,
    Property, Stock, Tax, Warehouse,
};
use super::{
    flag, map_commercial_information, map_counterparty, opt_text, req_attr, req_text,
    structured, ROOT,
};
use crate::error::Error;
use crate::parser::StreamParser;
use crate::reader;
use crate::record::Node;
use crate::rule::{Rule, RuleSet};

const COMMERCIAL_INFORMATION: &str = "commercialInformation";
const CLASSIFIER: &str = "classifier";
const CLASSIFIER_PROPERTY: &str = "classifierProperty";
const OFFERS_PACKAGE: &str = "offersPackage";
const WAREHOUSE: &str = "warehouse";
const OFFER: &str = "offer";

/// Streaming parser for offers-package documents.
///
/// Register the callbacks you care about, then feed the document once.
/// Offers are delivered one by one as their subtrees close, so a package
/// with tens of thousands of offers never lives in memory at once.
///
/// ```no_run
/// use std::fs::File;
/// use std::io::BufReader;
/// use commerceml_core::commerceml::OffersParser;
///
/// let mut parser = OffersParser::new();
/// parser.on_offer(|offer| println!("{}: {}", offer.id, offer.name));
/// parser.parse(BufReader::new(File::open("offers.xml")?))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct OffersParser {
    parser: StreamParser,
}

impl OffersParser {
    pub fn new() -> Self {
        OffersParser {
            parser: StreamParser::new(rules()),
        }
    }

    /// Document root attributes: schema version and creation timestamp.
    /// Delivered when the root closes, i.e. after everything else.
    pub fn on_commercial_information<F>(&mut self, mut callback: F)
    where
        F: FnMut(CommercialInformation) + 'static,
    {
        self.parser.on(COMMERCIAL_INFORMATION, move |record| {
            callback(map_commercial_information(record)?);
            Ok(())
        });
    }

    /// Classifier block header, without property details.
    pub fn on_classifier<F>(&mut self, mut callback: F)
    where
        F: FnMut(Classifier) + 'static,
    {
        self.parser.on(CLASSIFIER, move |record| {
            callback(map_classifier(record)?);
            Ok(())
        });
    }

    /// One classifier property per invocation.
    pub fn on_classifier_property<F>(&mut self, mut callback: F)
    where
        F: FnMut(Property) + 'static,
    {
        self.parser.on(CLASSIFIER_PROPERTY, move |record| {
            callback(map_property(record)?);
            Ok(())
        });
    }

    /// Offers package header with its price types (offers excluded - they
    /// stream separately through [`on_offer`](Self::on_offer)).
    pub fn on_offers_package<F>(&mut self, mut callback: F)
    where
        F: FnMut(OffersPackage) + 'static,
    {
        self.parser.on(OFFERS_PACKAGE, move |record| {
            callback(map_offers_package(record)?);
            Ok(())
        });
    }

    /// One warehouse per invocation.
    pub fn on_warehouse<F>(&mut self, mut callback: F)
    where
        F: FnMut(Warehouse) + 'static,
    {
        self.parser.on(WAREHOUSE, move |record| {
            callback(map_warehouse(record)?);
            Ok(())
        });
    }

    /// One offer per invocation, as its subtree closes.
    pub fn on_offer<F>(&mut self, mut callback: F)
    where
        F: FnMut(Offer) + 'static,
    {
        self.parser.on(OFFER, move |record| {
            callback(map_offer(record)?);
            Ok(())
        });
    }

    /// Feed a whole document.
    pub fn parse<R: BufRead>(&mut self, src: R) -> Result<(), Error> {
        reader::parse_reader(src, &mut self.parser)
    }

    /// Feed an in-memory document.
    pub fn parse_str(&mut self, input: &str) -> Result<(), Error> {
        reader::parse_str(input, &mut self.parser)
    }

    /// The underlying engine, for generic listeners alongside the typed
    /// ones.
    pub fn engine(&mut self) -> &mut StreamParser {
        &mut self.parser
    }
}

impl Default for OffersParser {
    fn default() -> Self {
        Self::new()
    }
}

fn rules() -> RuleSet {
    let mut rules = RuleSet::new();
    let table = [
        // Root header: attributes only, so a root-level rule never
        // buffers the document body.
        Rule::new(COMMERCIAL_INFORMATION, [ROOT]).retain(Vec::<Vec<String>>::new()),
        Rule::new(CLASSIFIER, [ROOT, "Классификатор"]).retain([
            vec![ROOT, "Классификатор", "Ид"],
            vec![ROOT, "Классификатор", "Наименование"],
            vec![ROOT, "Классификатор", "Владелец"],
        ]),
        Rule::new(
            CLASSIFIER_PROPERTY,
            [ROOT, "Классификатор", "Свойства", "Свойство"],
        ),
        Rule::new(OFFERS_PACKAGE, [ROOT, "ПакетПредложений"]).retain([
            vec![ROOT, "ПакетПредложений", "Ид"],
            vec![ROOT, "ПакетПредложений", "Наименование"],
            vec![ROOT, "ПакетПредложений", "ИдКаталога"],
            vec![ROOT, "ПакетПредложений", "ИдКлассификатора"],
            vec![ROOT, "ПакетПредложений", "Владелец"],
            vec![ROOT, "ПакетПредложений", "ТипыЦен"],
        ]),
        Rule::new(WAREHOUSE, [ROOT, "ПакетПредложений", "Склады", "Склад"]),
        Rule::new(
            OFFER,
            [ROOT, "ПакетПредложений", "Предложения", "Предложение"],
        ),
    ];
    for rule in table {
        rules.register(rule).expect("offer rule names are distinct");
    }
    rules
}

fn map_classifier(node: &Node) -> Result<Classifier, Error> {
    let context = "Классификатор";
    let owner = node
        .child_node("Владелец")
        .ok_or_else(|| Error::MissingField {
            field: "Владелец".to_string(),
            context: context.to_string(),
        })?;
    Ok(Classifier {
        id: req_text(node, "Ид", context)?,
        name: req_text(node, "Наименование", context)?,
        owner: map_counterparty(owner, "Владелец")?,
    })
}

fn map_property(node: &Node) -> Result<Property, Error> {
    let context = "Свойство";
    Ok(Property {
        id: req_text(node, "Ид", context)?,
        name: req_text(node, "Наименование", context)?,
        value_type: opt_text(node, "ТипЗначений"),
    })
}

fn map_offers_package(node: &Node) -> Result<OffersPackage, Error> {
    let context = "ПакетПредложений";
    let mut price_types = Vec::new();
    if let Some(container) = node.child_node("ТипыЦен") {
        for value in container.values("ТипЦены") {
            price_types.push(map_price_type(structured(value, "ТипЦены", context)?)?);
        }
    }

    Ok(OffersPackage {
        changes_only: flag(node.attr("СодержитТолькоИзменения")),
        id: req_text(node, "Ид", context)?,
        name: req_text(node, "Наименование", context)?,
        catalog_id: opt_text(node, "ИдКаталога"),
        classifier_id: opt_text(node, "ИдКлассификатора"),
        owner: node
            .child_node("Владелец")
            .map(|n| map_counterparty(n, "Владелец"))
            .transpose()?,
        price_types,
    })
}

fn map_price_type(node: &Node) -> Result<PriceType, Error> {
    let context = "ТипЦены";
    Ok(PriceType {
        id: req_text(node, "Ид", context)?,
        name: req_text(node, "Наименование", context)?,
        currency: opt_text(node, "Валюта"),
        tax: node
            .child_node("Налог")
            .map(|tax| {
                Ok::<_, Error>(Tax {
                    name: req_text(tax, "Наименование", "Налог")?,
                    included_in_sum: flag(tax.child_text("УчтеноВСумме")),
                    excise: flag(tax.child_text("Акциз")),
                })
            })
            .transpose()?,
    })
}

fn map_warehouse(node: &Node) -> Result<Warehouse, Error> {
    let context = "Склад";
    Ok(Warehouse {
        id: req_text(node, "Ид", context)?,
        name: req_text(node, "Наименование", context)?,
    })
}

fn map_offer(node: &Node) -> Result<Offer, Error> {
    let context = "Предложение";

    let mut prices = Vec::new();
    if let Some(container) = node.child_node("Цены") {
        for value in container.values("Цена") {
            prices.push(map_price(structured(value, "Цена", context)?)?);
        }
    }

    let mut stocks = Vec::new();
    for value in node.values("Склад") {
        let stock = structured(value, "Склад", context)?;
        let raw = req_attr(stock, "КоличествоНаСкладе", "Склад")?;
        stocks.push(Stock {
            warehouse_id: req_attr(stock, "ИдСклада", "Склад")?,
            quantity: raw.parse().map_err(|_| Error::InvalidNumber {
                field: "КоличествоНаСкладе".to_string(),
                value: raw.clone(),
            })?,
        });
    }

    Ok(Offer {
        id: req_text(node, "Ид", context)?,
        article: opt_text(node, "Артикул"),
        name: req_text(node, "Наименование", context)?,
        base_unit: node.child_node("БазоваяЕдиница").map(|unit| BaseUnit {
            code: unit.attr("Код").map(str::to_string),
            full_name: unit.attr("НаименованиеПолное").map(str::to_string),
            international_acronym: unit
                .attr("МеждународноеСокращение")
                .map(str::to_string),
        }),
        quantity: opt_text(node, "Количество"),
        prices,
        stocks,
    })
}

fn map_price(node: &Node) -> Result<Price, Error> {
    let context = "Цена";
    Ok(Price {
        representation: opt_text(node, "Представление"),
        price_type_id: req_text(node, "ИдТипаЦены", context)?,
        price_per_unit: req_text(node, "ЦенаЗаЕдиницу", context)?,
        currency: opt_text(node, "Валюта"),
        unit: opt_text(node, "Единица"),
        coefficient: opt_text(node, "Коэффициент"),
    })
}
