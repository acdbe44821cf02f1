use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fitroute::router::RouteTableBuilder;
use fitroute::{math, Dispatcher, Request, Response};
use http::Method;
use std::hint::black_box;

fn bench_math_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(math::routes());
    let mut group = c.benchmark_group("math_dispatch");
    for target in ["/add/3/4", "/add/3.5/4", "/divide/9/3", "/add/abc/4", "/foo"] {
        let request = Request::new(Method::GET, target);
        group.bench_with_input(BenchmarkId::from_parameter(target), &request, |b, req| {
            b.iter(|| black_box(dispatcher.dispatch(black_box(req))))
        });
    }
    group.finish();
}

fn bench_resolve_wide_table(c: &mut Criterion) {
    let mut builder = RouteTableBuilder::new();
    for i in 0..100 {
        builder
            .get(
                &format!("/resource{i}/{{Integer}}/items/{{String}}"),
                |res: &mut Response, (id, name): (i32, String)| {
                    res.message(200, format!("{id}:{name}"))
                },
            )
            .unwrap_or_else(|err| panic!("bench route rejected: {err}"));
    }
    let table = builder.build();
    let first = ["resource0", "7", "items", "widget"];
    let last = ["resource99", "7", "items", "widget"];
    let miss = ["resource99", "x", "items", "widget"];

    c.bench_function("resolve_first_of_100", |b| {
        b.iter(|| black_box(table.resolve(&Method::GET, black_box(&first)).entry().is_some()))
    });
    c.bench_function("resolve_last_of_100", |b| {
        b.iter(|| black_box(table.resolve(&Method::GET, black_box(&last)).entry().is_some()))
    });
    c.bench_function("resolve_best_fit_of_100", |b| {
        b.iter(|| black_box(table.resolve(&Method::GET, black_box(&miss)).entry().is_some()))
    });
}

criterion_group!(benches, bench_math_dispatch, bench_resolve_wide_table);
criterion_main!(benches);
