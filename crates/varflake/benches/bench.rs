use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::{
    sync::atomic::{AtomicI64, Ordering},
    thread::scope,
    time::Instant,
};
use varflake::{
    Base64Ext, EPOCH_2020_01_01, LockVarGenerator, ThreadRandom, TimeSource, VarId,
    VarSnowflakeGenerator, VarSnowflakeId, decode_base64,
};

/// Advances one second per 1024 reads so the hot path never stalls.
struct TickingMockTime {
    reads: AtomicI64,
}

impl TimeSource for TickingMockTime {
    fn current_secs(&self) -> i64 {
        self.reads.fetch_add(1, Ordering::Relaxed) >> 10
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

fn ticking_generator() -> LockVarGenerator<VarSnowflakeId, TickingMockTime, ThreadRandom> {
    let time = TickingMockTime {
        reads: AtomicI64::new(0),
    };
    LockVarGenerator::from_components(i64::MIN, 1, 0, time, ThreadRandom)
}

/// Benchmarks the hot path where the sequence never runs out.
fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("lock/ticking");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = ticking_generator();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id());
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks contention on one shared generator.
fn bench_generator_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("lock/ticking/threads");

    for threads in [2, 4, 8] {
        group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));
        group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    let generator = ticking_generator();
                    scope(|s| {
                        for _ in 0..threads {
                            s.spawn(|| {
                                for _ in 0..TOTAL_IDS {
                                    black_box(generator.next_id());
                                }
                            });
                        }
                    });
                }
                start.elapsed()
            });
        });
    }

    group.finish();
}

/// Benchmarks the real wall clock for a burst that fits in one second.
fn bench_wall_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("lock/wall_clock");
    group.throughput(Throughput::Elements(256));

    group.bench_function("elems/256", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                // Fresh generator per burst so the sequence never stalls.
                let generator = match VarSnowflakeGenerator::new(EPOCH_2020_01_01, 1) {
                    Ok(generator) => generator,
                    Err(e) => panic!("failed to build generator: {e}"),
                };
                for _ in 0..256 {
                    black_box(generator.next_id());
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

fn bench_base64(c: &mut Criterion) {
    let mut group = c.benchmark_group("base64");
    let id = VarSnowflakeId::from_components(511, 123_456, 42, 1000).obfuscate();
    let encoded = id.encode();

    group.bench_function("encode", |b| b.iter(|| black_box(black_box(id).encode())));
    group.bench_function("decode", |b| {
        b.iter(|| black_box(decode_base64(black_box(&encoded))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_generator,
    bench_generator_threaded,
    bench_wall_clock,
    bench_base64
);
criterion_main!(benches);
