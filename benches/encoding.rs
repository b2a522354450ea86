use criterion::{criterion_group, criterion_main, Criterion};

use ctt_sat::timetable::{encode, EncodeConfig, Instance, Mode};

const TOY: &str = include_str!("../data/toy.ctt");

fn encoding_benches(c: &mut Criterion) {
    let instance: Instance = TOY.parse().unwrap();

    let mut group = c.benchmark_group("Encoding");
    group.bench_function("parse toy", |b| b.iter(|| TOY.parse::<Instance>().unwrap()));
    for mode in Mode::ALL {
        let config = EncodeConfig::new(mode);
        group.bench_with_input(format!("encode toy ({})", mode.key()), &config, |b, config| {
            b.iter(|| encode(&instance, config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, encoding_benches);
criterion_main!(benches);
