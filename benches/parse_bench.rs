use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fast_browser::c_api::{free_user_agent, get_browser_major_version, is_chrome, parse_user_agent};
use fast_browser::{Parser, UserAgent, UserAgentCache};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::ffi::CString;
use std::hint::black_box;
use std::num::NonZeroUsize;

const CORPUS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1",
    "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2228.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/46.0.2486.0 Safari/537.36 Edge/13.10586",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36 OPR/34.0.2036.50",
    "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80 (S60; SymbOS; Opera Mobi/23.348; U; en) Presto/2.5.25 Version/10.54",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_3) AppleWebKit/537.75.14 (KHTML, like Gecko) Version/7.0.3 Safari/7046A194A",
    "Mozilla/5.0 (iPad; CPU OS 6_0 like Mac OS X) AppleWebKit/536.26 (KHTML, like Gecko) Version/6.0 Mobile/10A5355d Safari/8536.25",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 9_1 like Mac OS X) AppleWebKit/601.1.46 (KHTML, like Gecko) CriOS/47.0.2526.70 Mobile/13B143 Safari/601.1.46",
    "Mozilla/5.0 (Linux; Android 4.4.2; Nexus 5 Build/KOT49H) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.99 Mobile Safari/537.36",
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)",
    "Mozilla/5.0 (compatible; Baiduspider/2.0; +http://www.baidu.com/search/spider.html)",
    "Go-http-client/1.1",
    "abc123",
];

fn generate_requests(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut requests: Vec<String> = CORPUS
        .iter()
        .cycle()
        .take(count)
        .map(|ua| ua.to_string())
        .collect();
    requests.shuffle(&mut rng);
    requests
}

fn bench_single(c: &mut Criterion) {
    let parser = Parser::new();
    let mut group = c.benchmark_group("single");

    for (i, ua) in CORPUS.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("classify", i), ua, |b, ua| {
            b.iter(|| black_box(parser.classify(black_box(ua.as_bytes()))));
        });
    }

    group.finish();
}

fn bench_owned_vs_c(c: &mut Criterion) {
    let requests = generate_requests(1_000);
    let c_requests: Vec<CString> = requests
        .iter()
        .map(|ua| CString::new(ua.as_str()).unwrap())
        .collect();

    c.benchmark_group("owned_vs_c")
        .throughput(Throughput::Elements(requests.len() as u64))
        .bench_function("rust", |b| {
            b.iter(|| {
                for ua in requests.iter() {
                    black_box(UserAgent::parse(ua));
                }
            });
        })
        .bench_function("c_handle", |b| {
            b.iter(|| {
                for ua in c_requests.iter() {
                    unsafe {
                        let handle = parse_user_agent(ua.as_ptr());
                        black_box(is_chrome(handle));
                        black_box(get_browser_major_version(handle));
                        free_user_agent(handle);
                    }
                }
            });
        });
}

fn bench_batch_vs_single(c: &mut Criterion) {
    let parser = Parser::new();
    let mut group = c.benchmark_group("batch_vs_single");

    for count in [100, 1_000, 10_000].iter() {
        let requests = generate_requests(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("single", count), &requests, |b, requests| {
            b.iter(|| {
                for ua in requests.iter() {
                    black_box(parser.parse(ua));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("batch", count), &requests, |b, requests| {
            b.iter(|| black_box(parser.parse_batch(requests)));
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let requests = generate_requests(10_000);
    let mut group = c.benchmark_group("cache");
    group.throughput(Throughput::Elements(requests.len() as u64));

    for capacity in [4, 64].iter() {
        group.bench_with_input(BenchmarkId::new("lru", capacity), &requests, |b, requests| {
            let mut cache = UserAgentCache::new(NonZeroUsize::new(*capacity).unwrap());
            b.iter(|| {
                for ua in requests.iter() {
                    black_box(cache.classify(ua));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single,
    bench_owned_vs_c,
    bench_batch_vs_single,
    bench_cache
);
criterion_main!(benches);
