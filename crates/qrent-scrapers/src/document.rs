//! Narrow query interface over a parsed HTML page.
//!
//! Extraction code only needs class lookups, inner text, attributes and the raw
//! serialized markup of a subtree, so that is all this exposes.

use qrent_core::{QrentError, Result};
use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
}

/// An element inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| QrentError::Selector(format!("{}: {}", selector, e)))
}

fn class_selector(class: &str) -> Result<Selector> {
    parse_selector(&format!(".{}", class))
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    pub fn find_all_by_class(&self, class: &str) -> Result<Vec<Node<'_>>> {
        let selector = class_selector(class)?;
        Ok(self.html.select(&selector).map(Node::new).collect())
    }

    pub fn find_first_by_class(&self, class: &str) -> Result<Option<Node<'_>>> {
        let selector = class_selector(class)?;
        Ok(self.html.select(&selector).next().map(Node::new))
    }
}

impl<'a> Node<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    pub fn find_first_by_class(&self, class: &str) -> Result<Option<Node<'a>>> {
        let selector = class_selector(class)?;
        Ok(self.element.select(&selector).next().map(Node::new))
    }

    /// First descendant matching a full CSS selector.
    pub fn find_first(&self, selector: &str) -> Result<Option<Node<'a>>> {
        let selector = parse_selector(selector)?;
        Ok(self.element.select(&selector).next().map(Node::new))
    }

    /// Concatenated text of all descendant text nodes, untrimmed.
    pub fn inner_text(&self) -> String {
        self.element.text().collect()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Serialized markup of this element and its subtree.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }
}
