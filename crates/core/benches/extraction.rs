use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vestio_core::{Document, NormalizeConfig, RawRecord, extract_cards, transform_records};

fn synthetic_page(cards: usize) -> String {
    let mut html = String::from("<html><body><main class=\"collection-grid\">");
    for i in 0..cards {
        html.push_str(&format!(
            r#"<div class="collection-card">
                 <h3 class="product-title">Jacket {i}</h3>
                 <div class="price-container"><span class="price">${}.99</span></div>
                 <p>Rating: {}.{} / 5</p>
                 <p>{} Colors</p>
                 <p>Size: M</p>
                 <p>Gender: Unisex</p>
               </div>"#,
            50 + i % 400,
            1 + i % 4,
            i % 10,
            1 + i % 8,
        ));
    }
    html.push_str("</main></body></html>");
    html
}

fn bench_extract_cards(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_cards");

    for cards in [20usize, 100, 500] {
        let html = synthetic_page(cards);
        group.bench_with_input(BenchmarkId::from_parameter(cards), &html, |b, html| {
            b.iter(|| {
                let doc = Document::parse(black_box(html));
                extract_cards(&doc)
            })
        });
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let html = synthetic_page(500);
    let doc = Document::parse(&html);
    let records: Vec<RawRecord> = extract_cards(&doc)
        .into_iter()
        .map(|fields| RawRecord::stamped(fields, "2025-01-01T00:00:00"))
        .collect();
    let config = NormalizeConfig::default();

    c.bench_function("transform_records", |b| {
        b.iter(|| transform_records(black_box(&records), black_box(&config)))
    });
}

criterion_group!(benches, bench_extract_cards, bench_transform);
criterion_main!(benches);
