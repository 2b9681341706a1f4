use crate::fixtures::{results_page, Listing, StaticSite, ORIGIN};
use qrent_core::{CrawlConfig, CsvSink, QrentError};
use qrent_scrapers::CrawlOrchestrator;
use std::fs;
use tempfile::tempdir;

fn config(output_dir: &std::path::Path, checkpoint_interval: u32) -> CrawlConfig {
    CrawlConfig {
        origin: ORIGIN.to_string(),
        checkpoint_interval,
        output_dir: output_dir.to_path_buf(),
        ..CrawlConfig::default()
    }
}

/// Three pages by count, so pages 1 and 2 are crawled.
fn two_page_site() -> StaticSite {
    StaticSite::default()
        .results(
            1,
            results_page(
                5,
                &[
                    ("whole-building-lusail", "Marina District, Lusail, Doha"),
                    ("apartment-pearl", "Porto Arabia, The Pearl, Doha"),
                ],
            ),
        )
        .results(2, results_page(5, &[("apartment-waab", "Al Waab Street, Al Waab, Doha")]))
        .listing(
            "whole-building-lusail",
            Listing::apartment("250,000").with_type("Whole Building").render(),
        )
        .listing("apartment-pearl", Listing::apartment("12,345").render())
        .listing("apartment-waab", Listing::apartment("8,000").render())
}

#[tokio::test]
async fn test_crawl_writes_final_csv() {
    let temp_dir = tempdir().unwrap();
    let config = config(temp_dir.path(), 5);
    let sink = CsvSink::new(&config.output_dir, &config.final_file_name);
    let orchestrator = CrawlOrchestrator::new(two_page_site(), sink, config).unwrap();

    let outcome = orchestrator.run().await.unwrap();
    assert_eq!(outcome.dataset.len(), 2);
    assert_eq!(outcome.report.listings_excluded, 1);

    let content = fs::read_to_string(temp_dir.path().join("final.csv")).unwrap();
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Price", "Type", "Area(sqm)", "NoBedrooms", "NoBathrooms", "Furnishing", "Amenities", "Location"]
    );

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        vec!["12345", "Apartment", "111", "2", "3", "Furnished", "Balcony,Shared Pool", "The Pearl"]
    );
    assert_eq!(rows[1][0], "8000");
    assert_eq!(rows[1][7], "Al Waab");

    // No page number reached the interval.
    assert!(!temp_dir.path().join("Backup_after_1_pages.csv").exists());
    assert!(!temp_dir.path().join("Backup_after_2_pages.csv").exists());
}

#[tokio::test]
async fn test_crawl_checkpoints_every_page() {
    let temp_dir = tempdir().unwrap();
    let config = config(temp_dir.path(), 1);
    let sink = CsvSink::new(&config.output_dir, &config.final_file_name);
    let orchestrator = CrawlOrchestrator::new(two_page_site(), sink, config).unwrap();

    let outcome = orchestrator.run().await.unwrap();
    assert_eq!(outcome.report.checkpoints.len(), 2);

    let first = fs::read_to_string(temp_dir.path().join("Backup_after_1_pages.csv")).unwrap();
    let second = fs::read_to_string(temp_dir.path().join("Backup_after_2_pages.csv")).unwrap();
    assert_eq!(first.lines().count(), 2);
    assert_eq!(second.lines().count(), 3);
    assert!(!first.contains("WholeBuilding"));
}

#[tokio::test]
async fn test_checkpoint_survives_failed_results_page() {
    let temp_dir = tempdir().unwrap();
    let site = StaticSite::default()
        .results(1, results_page(3, &[("apartment-pearl", "Porto Arabia, The Pearl, Doha")]))
        .listing("apartment-pearl", Listing::apartment("12,345").render());
    let config = config(temp_dir.path(), 1);
    let sink = CsvSink::new(&config.output_dir, &config.final_file_name);
    let orchestrator = CrawlOrchestrator::new(site, sink, config).unwrap();

    let result = orchestrator.run().await;
    assert!(matches!(result, Err(QrentError::Fetch { .. })));

    let backup = fs::read_to_string(temp_dir.path().join("Backup_after_1_pages.csv")).unwrap();
    assert!(backup.contains("12345"));
    assert!(!temp_dir.path().join("final.csv").exists());
}

#[tokio::test]
async fn test_crawl_aborts_without_count() {
    let temp_dir = tempdir().unwrap();
    let site = StaticSite::default().results(1, "<html><body>Service unavailable</body></html>".to_string());
    let config = config(temp_dir.path(), 5);
    let sink = CsvSink::new(&config.output_dir, &config.final_file_name);
    let orchestrator = CrawlOrchestrator::new(site, sink, config).unwrap();

    assert!(matches!(orchestrator.run().await, Err(QrentError::MalformedCount(_))));
    assert!(!temp_dir.path().join("final.csv").exists());
}
