//! `__memchr_chk` against the safe core scan and the platform `memchr`.

use std::ffi::c_int;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use fortify_shim_abi::__memchr_chk;
use fortify_shim_core::string::mem;

fn bench_memchr_miss(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 64, 256, 1024, 4096, 65536];
    let mut group = c.benchmark_group("memchr_miss");

    for &size in sizes {
        // Needle absent: every byte is scanned.
        let region = vec![0xABu8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("memchr_chk", size), &size, |b, &sz| {
            b.iter(|| {
                let hit = unsafe {
                    __memchr_chk(black_box(region.as_ptr().cast()), 0x11 as c_int, sz, 1)
                };
                black_box(hit);
            });
        });

        group.bench_with_input(BenchmarkId::new("core", size), &size, |b, &sz| {
            b.iter(|| black_box(mem::memchr(black_box(&region), 0x11, sz)));
        });

        group.bench_with_input(BenchmarkId::new("libc", size), &size, |b, &sz| {
            b.iter(|| {
                let hit = unsafe { libc::memchr(black_box(region.as_ptr().cast()), 0x11, sz) };
                black_box(hit);
            });
        });
    }
    group.finish();
}

fn bench_memchr_early_hit(c: &mut Criterion) {
    let mut region = vec![0u8; 4096];
    region[7] = b'!';
    c.bench_function("memchr_chk_early_hit", |b| {
        b.iter(|| {
            let hit = unsafe {
                __memchr_chk(region.as_ptr().cast(), black_box(b'!' as c_int), 4096, 0)
            };
            black_box(hit);
        });
    });
}

criterion_group!(benches, bench_memchr_miss, bench_memchr_early_hit);
criterion_main!(benches);
