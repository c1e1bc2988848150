use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dom_query::Document;
use html_microdata::{extract_from_document, extract_from_markup};
use url::Url;

fn generate_article_html() -> String {
    r#"
        <article itemscope itemtype="http://schema.org/Article">
            <header>
                <h1 itemprop="headline">Benchmarking microdata</h1>
                <div class="meta">
                    <time itemprop="datePublished" datetime="2024-01-15T09:30:00Z">January 15</time>
                    <div itemprop="author" itemscope itemtype="http://schema.org/Person">
                        <span itemprop="name">Jane Developer</span>
                        <a itemprop="url" href="/authors/jane">profile</a>
                    </div>
                </div>
            </header>
            <div class="content">
                <p itemprop="description">How fast is extraction?</p>
                <img itemprop="images" src="img/chart.png">
                <img itemprop="images" src="img/table.png">
            </div>
            <div class="tags">
                <span itemprop="keywords">rust</span>
                <span itemprop="keywords">html</span>
            </div>
        </article>
    "#
    .to_string()
}

fn generate_listing_html(count: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..count {
        html.push_str(&format!(
            r#"<div itemscope itemtype="http://schema.org/Product">
                <span itemprop="name">Product {i}</span>
                <img itemprop="image" src="/p/{i}.jpg">
                <div itemprop="offers" itemscope itemtype="http://schema.org/Offer">
                    <data itemprop="price" value="{i}.99">{i}.99</data>
                </div>
            </div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_extract_article(c: &mut Criterion) {
    let html = generate_article_html();
    let base = Url::parse("https://blog.test/posts/1").unwrap();

    c.bench_function("extract_article", |b| {
        b.iter(|| extract_from_markup(black_box(Some(&base)), black_box(&html)))
    });
}

fn bench_extract_parsed_document(c: &mut Criterion) {
    let html = generate_article_html();
    let doc = Document::from(html.as_str());

    c.bench_function("extract_parsed_document", |b| {
        b.iter(|| extract_from_document(black_box(None), black_box(&doc)))
    });
}

fn bench_listing_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing_scale");
    let base = Url::parse("https://shop.test/").unwrap();

    for count in [10, 100, 500] {
        let html = generate_listing_html(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &html, |b, html| {
            b.iter(|| extract_from_markup(Some(&base), black_box(html)))
        });
    }

    group.finish();
}

criterion_group!(
    extraction_benches,
    bench_extract_article,
    bench_extract_parsed_document,
    bench_listing_scale
);

criterion_main!(extraction_benches);
