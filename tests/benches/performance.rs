use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qrent_scrapers::{Document, FieldExtractor, ListingDiscoverer};
use std::time::Duration;
use url::Url;

fn detail_page(amenity_count: usize) -> String {
    let amenities: String = (0..amenity_count)
        .map(|i| {
            format!(
                "<div class=\"property-amenities__list\"><svg viewBox=\"0 0 24 24\"><path d=\"M0 0h24v24H0z\"></path></svg>\n  Amenity {}\n</div>\n",
                i
            )
        })
        .collect();
    format!(
        r#"<html><body>
<div class="property-price">12,345 QAR/month</div>
<div class="property-facts"><ul>
<li class="property-facts__list">Property type<div class="property-facts__content">Apartment</div></li>
<li class="property-facts__list">Property size<div class="property-facts__content">1,200 sqft / 111 sqm</div></li>
<li class="property-facts__list">Bedrooms<div class="property-facts__content">2</div></li>
<li class="property-facts__list">Bathrooms<div class="property-facts__content">3</div></li>
</ul></div>
<div class="property-amenities">{}</div>
</body></html>"#,
        amenities
    )
}

fn results_page(cards: usize) -> String {
    let cards: String = (0..cards)
        .map(|i| {
            format!(
                "<li class=\"card-list__item\"><a class=\"card--clickable\" href=\"/en/plp/rent/listing-{}.html\"></a><p class=\"card__location\">Tower {}, The Pearl, Doha</p></li>",
                i, i
            )
        })
        .collect();
    format!(
        "<html><body><span class=\"property-header__list-count\">482 results</span><ul>{}</ul></body></html>",
        cards
    )
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(5));

    let extractor = FieldExtractor::new();
    for amenity_count in [0, 5, 25].iter() {
        let html = detail_page(*amenity_count);
        group.bench_with_input(
            BenchmarkId::new("detail_page", amenity_count),
            &html,
            |b, html| {
                b.iter(|| black_box(extractor.extract_html(html, "Tower 1, The Pearl, Doha").unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("discover");
    group.sample_size(50);

    let discoverer = ListingDiscoverer::new(&Url::parse("https://www.propertyfinder.qa").unwrap());
    for cards in [25, 100].iter() {
        let html = results_page(*cards);
        group.bench_with_input(BenchmarkId::new("results_page", cards), &html, |b, html| {
            b.iter(|| {
                let document = Document::parse(html);
                black_box(discoverer.discover(&document).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_discovery);
criterion_main!(benches);
