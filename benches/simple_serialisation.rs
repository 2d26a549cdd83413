use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rustic_hal::{HalResource, hal};
use serde_json::{from_str, to_string};

const SOURCE: &str = r#"{
    "_links": {
        "self": {"href": "https://www.test.com"},
        "curies": [{"name": "t", "href": "https://www.test.com/rels/{rel}", "templated": true}],
        "t:items": [{"href": "https://www.test.com/items/1"}, {"href": "https://www.test.com/items/2"}]
    },
    "_embedded": {"t:item": {"_links": {"self": {"href": "https://www.test.com/items/1"}}, "n": 1}},
    "a": "123",
    "b": 456
}"#;

fn serialisation(c: &mut Criterion) {
    let hal: HalResource = from_str(SOURCE).unwrap();
    c.bench_function("simple serialisation", |b| b.iter(|| to_string(black_box(&hal)).unwrap()));
}

fn deserialisation(c: &mut Criterion) {
    c.bench_function("simple deserialisation", |b| {
        b.iter(|| from_str::<HalResource>(black_box(SOURCE)).unwrap())
    });
}

fn macro_construction(c: &mut Criterion) {
    c.bench_function("macro construction", |b| {
        b.iter(|| {
            hal!(serde_json::json!({"a": "123", "b": 456}),
                "self" > "https://www.test.com",
                "t:find" >> "https://www.test.com/items{?id}",
                "c" = black_box(789)
            )
        })
    });
}

criterion_group!(benches, serialisation, deserialisation, macro_construction);
criterion_main!(benches);
