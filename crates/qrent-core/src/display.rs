use tabled::{Table, Tabled};
use tabled::settings::{Style, Width, object::Columns, Modify};

use crate::ListingRecord;

#[derive(Tabled)]
pub struct RecordTableRow {
    #[tabled(rename = "Price", display_with = "display_right_8")]
    pub price: String,
    #[tabled(rename = "Type")]
    pub property_type: String,
    #[tabled(rename = "Area (m²)", display_with = "display_right_8")]
    pub area: String,
    #[tabled(rename = "Beds", display_with = "display_right_5")]
    pub bedrooms: String,
    #[tabled(rename = "Baths", display_with = "display_right_5")]
    pub bathrooms: String,
    #[tabled(rename = "Furnishing")]
    pub furnishing: String,
    #[tabled(rename = "Amenities")]
    pub amenities: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

fn display_right_5(s: &str) -> String {
    format!("{:>5}", s)
}

fn display_right_8(s: &str) -> String {
    format!("{:>8}", s)
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

impl From<&ListingRecord> for RecordTableRow {
    fn from(record: &ListingRecord) -> Self {
        Self {
            price: record.price.to_string(),
            property_type: or_dash(&record.property_type),
            area: or_dash(&record.area_sqm.to_string()),
            bedrooms: or_dash(&record.bedrooms),
            bathrooms: or_dash(&record.bathrooms),
            furnishing: or_dash(&record.furnishing),
            amenities: or_dash(&record.amenities),
            location: or_dash(&record.location),
        }
    }
}

/// Render at most `limit` records as a terminal table.
pub fn create_record_table(records: &[ListingRecord], limit: usize) -> String {
    let table_rows: Vec<RecordTableRow> = records.iter()
        .take(limit)
        .map(RecordTableRow::from)
        .collect();

    let mut table = Table::new(&table_rows);

    table
        .with(Style::modern())
        .with(Modify::new(Columns::single(1)).with(Width::truncate(20)))     // Type column
        .with(Modify::new(Columns::single(5)).with(Width::truncate(16)))     // Furnishing column
        .with(Modify::new(Columns::single(6)).with(Width::wrap(40)))         // Amenities column
        .with(Modify::new(Columns::single(7)).with(Width::truncate(30)));    // Location column

    table.to_string()
}
