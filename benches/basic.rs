//! Compares `HybridVec` against `Vec` and `SmallVec` for the operations the
//! container is built around: append, prepend, indexing and reversal.

use core::hint;
use criterion::{Bencher, Criterion, criterion_group, criterion_main};
use hybridvec::HybridVec;
use smallvec::SmallVec;
use std::sync::OnceLock;

use rand::Rng;

const SMALL_SIZE: usize = 16;

/// A function used to generate a random amount of data.
///
/// Random sizes keep the compiler from specializing on a known length.
#[inline(never)]
fn gen_one(start: usize, end: usize) -> usize {
    let mut rng = rand::rng();
    rng.random_range(start..end)
}

/// Element count for small runs, always below the inline threshold.
static SMALL_BOUND: OnceLock<usize> = OnceLock::new();

/// Element count for large runs, far past the inline threshold.
static LARGE_BOUND: OnceLock<usize> = OnceLock::new();

#[inline(never)]
fn gen_rand(len: usize, start: u64, end: u64) -> Box<[u64]> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_range(start..end)).collect()
}

/// The operations every benchmarked container provides.
trait VecLike: Default {
    fn push(&mut self, value: u64);
    fn push_front(&mut self, value: u64);
    fn clear(&mut self);
    fn get_mut(&mut self, index: usize) -> &mut u64;
    fn reversed(&self) -> Self;
}

impl VecLike for Vec<u64> {
    #[inline(always)]
    fn push(&mut self, value: u64) {
        Vec::push(self, value)
    }
    #[inline(always)]
    fn push_front(&mut self, value: u64) {
        self.insert(0, value)
    }
    #[inline(always)]
    fn clear(&mut self) {
        Vec::clear(self)
    }
    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> &mut u64 {
        &mut self[index]
    }
    #[inline(always)]
    fn reversed(&self) -> Self {
        self.iter().rev().copied().collect()
    }
}

impl VecLike for SmallVec<[u64; SMALL_SIZE]> {
    #[inline(always)]
    fn push(&mut self, value: u64) {
        SmallVec::push(self, value)
    }
    #[inline(always)]
    fn push_front(&mut self, value: u64) {
        self.insert(0, value)
    }
    #[inline(always)]
    fn clear(&mut self) {
        SmallVec::clear(self)
    }
    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> &mut u64 {
        &mut self[index]
    }
    #[inline(always)]
    fn reversed(&self) -> Self {
        self.iter().rev().copied().collect()
    }
}

impl VecLike for HybridVec<u64, SMALL_SIZE> {
    #[inline(always)]
    fn push(&mut self, value: u64) {
        HybridVec::push(self, value)
    }
    #[inline(always)]
    fn push_front(&mut self, value: u64) {
        HybridVec::push_front(self, value)
    }
    #[inline(always)]
    fn clear(&mut self) {
        HybridVec::clear(self)
    }
    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> &mut u64 {
        &mut self[index]
    }
    #[inline(always)]
    fn reversed(&self) -> Self {
        HybridVec::reversed(self)
    }
}

macro_rules! gen_bench_group {
    ($c:ident => $fn_name:ident) => {{
        let mut group = $c.benchmark_group(stringify!($fn_name));
        group.bench_function("Vec", |b| $fn_name::<Vec<u64>>(b));
        group.bench_function("SmallVec", |b| {
            $fn_name::<SmallVec<[u64; SMALL_SIZE]>>(b)
        });
        group.bench_function("HybridVec", |b| {
            $fn_name::<HybridVec<u64, SMALL_SIZE>>(b)
        });
    }};
}

fn bench_vec(c: &mut Criterion) {
    SMALL_BOUND.get_or_init(|| gen_one(12, 15));
    LARGE_BOUND.get_or_init(|| gen_one(36000, 36003));
    gen_bench_group!(c => new_empty);
    gen_bench_group!(c => push_small);
    gen_bench_group!(c => push_large);
    gen_bench_group!(c => push_front_small);
    gen_bench_group!(c => index_large);
    gen_bench_group!(c => reverse_large);
}

/// Creation of an empty container. Nothing allocates.
#[inline(never)]
fn new_empty<T: VecLike>(b: &mut Bencher) {
    b.iter(|| hint::black_box(T::default()));
}

/// Appends 12-14 values starting from empty. Only `Vec` allocates.
#[inline(never)]
fn push_small<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*SMALL_BOUND.get().unwrap(), 0, 9999);
    let index = gen_one(0, *SMALL_BOUND.get().unwrap());

    b.iter(|| {
        let mut vec = T::default();
        for item in &data {
            vec.push(*item);
        }
        hint::black_box(*vec.get_mut(index))
    });
}

/// Appends about 36000 values starting from empty; every container grows.
#[inline(never)]
fn push_large<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999);
    let index = gen_rand(10, 0, *LARGE_BOUND.get().unwrap() as _);

    b.iter(|| {
        let mut vec = T::default();
        for item in &data {
            vec.push(*item);
        }
        let mut counter = 0u64;
        for item in &index {
            counter += *vec.get_mut(*item as usize);
        }
        hint::black_box(counter)
    });
}

/// Prepends 12-14 values, shifting the whole run each time.
#[inline(never)]
fn push_front_small<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*SMALL_BOUND.get().unwrap(), 0, 9999);
    let mut vec = T::default();

    b.iter(|| {
        vec.clear();
        for item in &data {
            vec.push_front(*item);
        }
        hint::black_box(*vec.get_mut(0))
    });
}

/// Random reads and writes on a large heap-backed container.
#[inline(never)]
fn index_large<T: VecLike>(b: &mut Bencher) {
    let len = *LARGE_BOUND.get().unwrap();
    let mut vec = T::default();
    for item in gen_rand(len, 0, 9999) {
        vec.push(item);
    }
    let range = gen_rand(2000, 0, len as u64);

    b.iter(|| {
        for item in &range {
            *vec.get_mut(*item as usize) += *item;
        }
        hint::black_box(*vec.get_mut(0))
    });
}

/// Builds a reversed copy of a large container.
#[inline(never)]
fn reverse_large<T: VecLike>(b: &mut Bencher) {
    let mut vec = T::default();
    for item in gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999) {
        vec.push(item);
    }

    b.iter(|| hint::black_box(vec.reversed()));
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(200)
        .warm_up_time(core::time::Duration::from_secs(3))
        .measurement_time(core::time::Duration::from_secs(8))
        .confidence_level(0.96)
        .noise_threshold(0.04);
    targets = bench_vec,
}
criterion_main!(benches);
