use criterion::{criterion_group, criterion_main, Criterion};

use bignum::{mod_pow, parse_hex};

fn bench_mod_pow(c: &mut Criterion) {
    let base = parse_hex("DEADBEEFCAFEBABE0123456789ABCDEF");
    let exponent = parse_hex("FEDCBA98765432100F1E2D3C4B5A6978");
    let modulus = parse_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFF61");

    let mut group = c.benchmark_group("modular");
    group.sample_size(10);
    group.bench_function("mod_pow_128", |b| {
        b.iter(|| mod_pow(&base, &exponent, &modulus).expect("nonzero modulus"));
    });
    group.finish();
}

criterion_group!(benches, bench_mod_pow);
criterion_main!(benches);
