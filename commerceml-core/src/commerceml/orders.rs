//! Order documents (`Документ`).

use std::io::BufRead;

use super::types::{CommercialInformation, Document};
use super::{map_commercial_information, opt_text, req_text, ROOT};
use crate::error::Error;
use crate::parser::StreamParser;
use crate::reader;
use crate::record::Node;
use crate::rule::{Rule, RuleSet};

const COMMERCIAL_INFORMATION: &str = "commercialInformation";
const DOCUMENT: &str = "document";

/// Streaming parser for order documents.
pub struct OrdersParser {
    parser: StreamParser,
}

impl OrdersParser {
    pub fn new() -> Self {
        OrdersParser {
            parser: StreamParser::new(rules()),
        }
    }

    /// Document root attributes: schema version and creation timestamp.
    pub fn on_commercial_information<F>(&mut self, mut callback: F)
    where
        F: FnMut(CommercialInformation) + 'static,
    {
        self.parser.on(COMMERCIAL_INFORMATION, move |record| {
            callback(map_commercial_information(record)?);
            Ok(())
        });
    }

    /// One order document block per invocation.
    pub fn on_document<F>(&mut self, mut callback: F)
    where
        F: FnMut(Document) + 'static,
    {
        self.parser.on(DOCUMENT, move |record| {
            callback(map_document(record)?);
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

impl Default for OrdersParser {
    fn default() -> Self {
        Self::new()
    }
}

fn rules() -> RuleSet {
    let mut rules = RuleSet::new();
    let table = [
        Rule::new(COMMERCIAL_INFORMATION, [ROOT]).retain(Vec::<Vec<String>>::new()),
        Rule::new(DOCUMENT, [ROOT, "Документ"]),
    ];
    for rule in table {
        rules.register(rule).expect("order rule names are distinct");
    }
    rules
}

fn map_document(node: &Node) -> Result<Document, Error> {
    let context = "Документ";
    Ok(Document {
        id: req_text(node, "Ид", context)?,
        number: req_text(node, "Номер", context)?,
        date: opt_text(node, "Дата"),
        operation: opt_text(node, "ХозОперация"),
        role: opt_text(node, "Роль"),
        currency: opt_text(node, "Валюта"),
        sum: opt_text(node, "Сумма"),
    })
}
