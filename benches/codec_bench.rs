use cheevos::memory::{byte, dword, lit, word};
use cheevos::{decode_logic, encode_logic, Flag, LogicSet};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn medium_logic_set() -> LogicSet {
    let mut set = LogicSet::new();
    for stage in 0..16u64 {
        set = set.add_core(vec![
            byte(0x00d0 + stage).eq(lit(stage as i64)),
            byte(0x00c0 + stage)
                .delta()
                .lt(byte(0x00c0 + stage))
                .with_flag(Flag::ResetIf),
            dword(0x1000 + stage * 4).point_to(byte(0x20)).gt(lit(50)),
        ]);
    }
    for alt in 0..4u64 {
        set = set.add_alt(vec![
            word(0x00e0 + alt * 2).ge(lit(1000)),
            byte(0x00a1).eq(lit(alt as i64)).with_hits(10),
        ]);
    }
    set
}

fn encode_benchmark(c: &mut Criterion) {
    let set = medium_logic_set();

    c.bench_function("encode medium logic set", |b| {
        b.iter(|| encode_logic(black_box(&set)).unwrap())
    });
}

fn decode_benchmark(c: &mut Criterion) {
    let wire = encode_logic(&medium_logic_set()).unwrap();

    c.bench_function("decode medium logic set", |b| {
        b.iter(|| decode_logic(black_box(&wire)).unwrap())
    });
}

criterion_group!(benches, encode_benchmark, decode_benchmark);
criterion_main!(benches);
