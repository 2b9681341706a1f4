//! Listing detail page extraction.

use crate::document::{Document, Node};
use qrent_core::{AreaValue, ExtractionError, ListingRecord, Result};

const PRICE_CLASS: &str = "property-price";
const CURRENCY: &str = "QAR";
const FACTS_CLASS: &str = "property-facts";
const FACT_ITEM_CLASS: &str = "property-facts__list";
const FACT_CONTENT_CLASS: &str = "property-facts__content";
const AMENITY_GROUP_CLASS: &str = "property-amenities__list";
const ICON_END: &str = "</svg>";
const GROUP_END: &str = "</div>";

/// Labels probed in the raw fact block. A label's slot is its index + 1.
pub const FACT_LABELS: [&str; 4] = ["Property type", "Property size", "Bedrooms", "Bathrooms"];
const AREA_POSITION: usize = 1;

/// Turns one listing detail page into a [`ListingRecord`].
///
/// Extraction is a pure function of the page and the card's raw location text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_html(&self, body: &str, raw_location: &str) -> Result<ListingRecord> {
        self.extract(&Document::parse(body), raw_location)
    }

    pub fn extract(&self, document: &Document, raw_location: &str) -> Result<ListingRecord> {
        let price_text = document
            .find_first_by_class(PRICE_CLASS)?
            .map(|node| node.inner_text())
            .unwrap_or_default();
        let price = parse_price(&price_text)?;

        let raw_facts = document
            .find_first_by_class(FACTS_CLASS)?
            .map(|node| node.outer_html())
            .unwrap_or_default();
        let missing = missing_fact_slots(&raw_facts);
        let facts = document
            .find_all_by_class(FACT_ITEM_CLASS)?
            .iter()
            .map(fact_text)
            .collect::<Result<Vec<_>>>()?;
        let [property_type, area, bedrooms, bathrooms] = align_facts(facts, &missing);
        let area_sqm = parse_area(&area)?;

        let groups = amenity_groups(document)?;
        let furnishing = groups.first().cloned().unwrap_or_default();
        let amenities = join_amenities(&groups);

        let location = parse_location(raw_location)?;

        Ok(ListingRecord {
            price,
            property_type,
            area_sqm,
            bedrooms,
            bathrooms,
            furnishing,
            amenities,
            location,
        })
    }
}

/// Amount next to the currency token, e.g. `"12,345 QAR/month"` or `"QAR 12,345 / month"`.
pub fn parse_price(text: &str) -> std::result::Result<i64, ExtractionError> {
    let amount = text
        .split(CURRENCY)
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or_default();
    let amount = amount.split('/').next().unwrap_or_default();
    let cleaned: String = amount
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    cleaned
        .parse::<i64>()
        .map_err(|_| ExtractionError::price(text.trim()))
}

/// Slots (1-based) whose label does not appear in the raw fact block.
pub fn missing_fact_slots(raw_facts: &str) -> Vec<usize> {
    FACT_LABELS
        .iter()
        .enumerate()
        .filter(|(_, label)| !raw_facts.contains(*label))
        .map(|(index, _)| index + 1)
        .collect()
}

/// Rebuild the four fact positions by inserting an empty placeholder for each missing
/// slot, in ascending order, into the growing sequence.
///
/// The placeholder goes in at the slot number itself used as an index, appending
/// when that is past the end. Only a missing "Bathrooms" lands where its label
/// says; any other gap shifts the following facts, e.g. slots 1 and 3 missing
/// from `[size, bathrooms]` gives `[size, "", bathrooms, ""]`.
pub fn align_facts(mut facts: Vec<String>, missing: &[usize]) -> [String; 4] {
    for &slot in missing {
        let index = slot.min(facts.len());
        facts.insert(index, String::new());
    }
    facts.resize(FACT_LABELS.len(), String::new());
    let mut aligned: [String; 4] = Default::default();
    for (position, fact) in facts.into_iter().enumerate() {
        aligned[position] = fact;
    }
    aligned
}

fn fact_text(item: &Node<'_>) -> Result<String> {
    Ok(item
        .find_first_by_class(FACT_CONTENT_CLASS)?
        .map(|content| strip_fact(&content.inner_text()))
        .unwrap_or_default())
}

fn strip_fact(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

/// `"1200sqft/111sqm"` becomes 111 square metres. Anything without `sqft` passes through.
pub fn parse_area(fact: &str) -> std::result::Result<AreaValue, ExtractionError> {
    if !fact.contains("sqft") {
        return Ok(AreaValue::Raw(fact.to_string()));
    }
    fact.split('/')
        .nth(1)
        .and_then(|metric| metric.split("sqm").next())
        .and_then(|sqm| sqm.trim().parse::<i64>().ok())
        .map(AreaValue::Sqm)
        .ok_or_else(|| ExtractionError::area(fact))
}

fn amenity_groups(document: &Document) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for group in document.find_all_by_class(AMENITY_GROUP_CLASS)? {
        names.push(amenity_name(&group.outer_html())?);
    }
    Ok(names)
}

/// Name of one amenity group: the first text line following its icon.
///
/// Blank lines after the icon are skipped rather than taken as an empty name.
pub fn amenity_name(group_html: &str) -> std::result::Result<String, ExtractionError> {
    let snippet = || group_html.chars().take(80).collect::<String>();
    let (_, after_icon) = group_html
        .split_once(ICON_END)
        .ok_or_else(|| ExtractionError::amenity(snippet()))?;
    let block = after_icon.split(GROUP_END).next().unwrap_or_default();

    let mut lines = block.split('\n');
    let icon_line = lines.next().unwrap_or_default().trim();
    let name = lines
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(icon_line);

    if name.is_empty() {
        return Err(ExtractionError::amenity(snippet()));
    }
    Ok(name.to_string())
}

/// One group stands on its own. With several, only the groups after the first are joined.
pub fn join_amenities(groups: &[String]) -> String {
    match groups {
        [] => String::new(),
        [only] => only.clone(),
        [_, rest @ ..] => rest.join(","),
    }
}

/// The area: second-to-last comma segment of the card's location text.
pub fn parse_location(raw_location: &str) -> std::result::Result<String, ExtractionError> {
    let segments: Vec<&str> = raw_location.split(',').collect();
    if segments.len() < 2 {
        return Err(ExtractionError::location(raw_location));
    }
    Ok(segments[segments.len() - 2].trim().to_string())
}
