//! Response decoding benchmarks.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use packagist_core::from_json_slice;
use packagist_repository::{PackageListResponse, SecurityAdvisoriesResponse};

fn advisories_payload(packages: usize, per_package: usize) -> Vec<u8> {
    let mut body = String::from(r#"{"advisories":{"#);
    for p in 0..packages {
        if p > 0 {
            body.push(',');
        }
        body.push_str(&format!(r#""vendor-{p}/package":["#));
        for a in 0..per_package {
            if a > 0 {
                body.push(',');
            }
            body.push_str(&format!(
                r#"{{"advisoryId":"PKSA-{p}-{a}","packageName":"vendor-{p}/package","remoteId":"GHSA-{p}-{a}","title":"Issue {a}","link":"https://example.com/{p}/{a}","cve":null,"affectedVersions":">=1.0.0,<1.{a}.0","source":"GitHub","reportedAt":"2024-01-01 00:00:00","composerRepository":"https://packagist.org","sources":[{{"name":"GitHub","remoteId":"GHSA-{p}-{a}"}}]}}"#
            ));
        }
        body.push(']');
    }
    body.push_str("}}");
    body.into_bytes()
}

fn index_payload(count: usize) -> Vec<u8> {
    let names: Vec<String> = (0..count).map(|i| format!(r#""vendor-{i}/package-{i}""#)).collect();
    format!(r#"{{"packageNames":[{}]}}"#, names.join(",")).into_bytes()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let advisories = advisories_payload(200, 5);
    group.bench_function("advisories_1000", |b| {
        b.iter(|| from_json_slice::<SecurityAdvisoriesResponse>(black_box(&advisories)).unwrap());
    });

    let index = index_payload(50_000);
    group.bench_function("index_50k", |b| {
        b.iter(|| from_json_slice::<PackageListResponse>(black_box(&index)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
