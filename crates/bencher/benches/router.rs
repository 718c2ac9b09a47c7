use std::hint::black_box;

use bencher::{TestCase, TestRequest};
use bytes::Bytes;
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use http::{Request, header};
use route_codec::RequestData;
use site_routes::{AccountRoute, EpisodeId, EpisodeRoute, InvoiceId, InvoicesRoute, SiteRoute, SiteRouter};

static HOME: TestRequest = TestRequest::new("GET", "/");
static EPISODE: TestRequest = TestRequest::new("GET", "/episodes/42");
static INVOICE: TestRequest = TestRequest::new("GET", "/account/invoices/in_1Hx2Yz");
static SEARCH: TestRequest = TestRequest::new("GET", "/search?q=parser+printer&tag=swift&tag=rust");
static SUBSCRIBE: TestRequest = TestRequest::with_body(
    "POST",
    "/subscribe",
    "application/x-www-form-urlencoded",
    "pricing[billing]=yearly&pricing[quantity]=4&teammates[0]=a%40example.com&teammates[1]=b%40example.com",
);
static STRIPE: TestRequest = TestRequest::with_body(
    "POST",
    "/webhooks/stripe",
    "application/json",
    r#"{"id":"evt_1","type":"invoice.paid","created":1700000000,"data":{"object":{"id":"in_1","customer":"cus_1"}}}"#,
);

fn create_test_cases() -> Vec<TestCase> {
    vec![
        TestCase::shallow("home", HOME),
        TestCase::shallow("episode", EPISODE),
        TestCase::nested("invoice", INVOICE),
        TestCase::nested("search", SEARCH),
        TestCase::with_body("subscribe_form", SUBSCRIBE),
        TestCase::with_body("stripe_json", STRIPE),
    ]
}

fn http_request(request: &TestRequest) -> Request<Bytes> {
    let mut builder = Request::builder().method(request.method()).uri(request.uri());
    let body = match request.body() {
        Some((content_type, body)) => {
            builder = builder.header(header::CONTENT_TYPE, content_type);
            Bytes::from_static(body.as_bytes())
        }
        None => Bytes::new(),
    };
    builder.body(body).expect("fixture should be a valid request")
}

fn benchmark_parse(criterion: &mut Criterion) {
    let router = SiteRouter::new("https://www.example.com").expect("base url should be valid");
    let mut group = criterion.benchmark_group("parse");

    for case in create_test_cases() {
        group.throughput(Throughput::Bytes(case.request().len() as u64));
        group.bench_with_input(BenchmarkId::new(format!("{:?}", case.group()), case.name()), &case, |b, case| {
            b.iter_batched(
                || RequestData::from(http_request(case.request())),
                |data| {
                    let route = router.match_request(data).expect("fixture should match a route");
                    black_box(route);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_print(criterion: &mut Criterion) {
    let router = SiteRouter::new("https://www.example.com").expect("base url should be valid");
    let routes = [
        ("home", SiteRoute::Home),
        ("episode", SiteRoute::Episode(EpisodeId(42), EpisodeRoute::Comments { page: 2 })),
        (
            "invoice",
            SiteRoute::Account(AccountRoute::Invoices(InvoicesRoute::Show(
                InvoiceId::new("in_1Hx2Yz").expect("invoice id should be valid"),
            ))),
        ),
    ];
    let mut group = criterion.benchmark_group("print");

    for (name, route) in &routes {
        group.bench_with_input(BenchmarkId::new("url_for", name), route, |b, route| {
            b.iter(|| black_box(router.url_for(route)));
        });
        group.bench_with_input(BenchmarkId::new("request_for", name), route, |b, route| {
            b.iter(|| black_box(router.request_for(route)));
        });
    }

    group.finish();
}

fn benchmark_round_trip(criterion: &mut Criterion) {
    let router = SiteRouter::new("https://www.example.com").expect("base url should be valid");
    let route = SiteRoute::Episode(EpisodeId(42), EpisodeRoute::Progress { percent: 80 });

    criterion.bench_function("round_trip", |b| {
        b.iter(|| {
            let data = router.print(&route);
            let reparsed = RequestData::from_uri(data.method(), &data.path_string()).expect("printed path should parse");
            black_box(router.match_request(reparsed))
        });
    });
}

criterion_group!(routing, benchmark_parse, benchmark_print, benchmark_round_trip);
criterion_main!(routing);

