use crate::fixtures::Listing;
use qrent_core::{CsvSink, Dataset, DatasetSink};
use qrent_scrapers::FieldExtractor;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_extracted_records_export_in_order() {
    let temp_dir = tempdir().unwrap();
    let sink = CsvSink::new(temp_dir.path(), "rentals.csv");
    let extractor = FieldExtractor::new();

    let mut dataset = Dataset::new();
    for price in ["9,000", "4,500", "21,000"] {
        let html = Listing::apartment(price).render();
        dataset.push(extractor.extract_html(&html, "Fox Hills, Lusail, Doha").unwrap());
    }

    let path = sink.write_final(&dataset).unwrap();
    let content = fs::read_to_string(path).unwrap();
    let prices: Vec<&str> = content
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(prices, vec!["9000", "4500", "21000"]);
    assert!(content.lines().all(|line| line.ends_with("Location") || line.ends_with("Lusail")));
}

#[test]
fn test_listing_without_amenities_exports_empty_columns() {
    let temp_dir = tempdir().unwrap();
    let sink = CsvSink::new(temp_dir.path(), "final.csv");

    let mut listing = Listing::apartment("6,000");
    listing.amenities.clear();
    listing.facts.remove(3);
    let record = FieldExtractor::new()
        .extract_html(&listing.render(), "Al Sadd, Doha")
        .unwrap();

    let mut dataset = Dataset::new();
    dataset.push(record);
    let path = sink.write_checkpoint(5, &dataset).unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert_eq!(content.lines().nth(1), Some("6000,Apartment,111,2,,,,Al Sadd"));
}
