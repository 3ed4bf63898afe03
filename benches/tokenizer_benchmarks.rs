use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsonlex::tokenizer_from_str;

/// Deterministic pseudo-random source so benchmark inputs are reproducible
/// across runs without pulling in a rand dependency
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// Generates a JSON document with the value mix of a typical API payload:
/// mostly strings, some numbers, occasional nested objects and arrays
struct JsonGenerator {
    rng: Lcg,
    out: String,
}

impl JsonGenerator {
    fn new(seed: u64) -> Self {
        Self {
            rng: Lcg::new(seed),
            out: String::new(),
        }
    }

    fn generate(mut self, field_count: usize) -> String {
        self.object(field_count);
        self.out
    }

    fn object(&mut self, field_count: usize) {
        self.out.push('{');
        for i in 0..field_count {
            if i > 0 {
                self.out.push(',');
            }
            self.string(6, 24);
            self.out.push_str(": ");
            self.value();
        }
        self.out.push('}');
    }

    fn array(&mut self, length: usize) {
        self.out.push('[');
        for i in 0..length {
            if i > 0 {
                self.out.push(',');
            }
            self.value();
        }
        self.out.push(']');
    }

    fn value(&mut self) {
        match self.rng.below(256) {
            0..=2 => {
                let fields = self.rng.below(20) as usize + 1;
                self.object(fields);
            }
            3..=5 => {
                let length = self.rng.below(10) as usize + 1;
                self.array(length);
            }
            6..=8 => self.out.push_str("null"),
            9..=19 => {
                self.out
                    .push_str(if self.rng.below(2) == 0 { "true" } else { "false" });
            }
            20..=174 => self.string(1, 512),
            _ => self.number(),
        }
    }

    fn number(&mut self) {
        if self.rng.below(2) == 0 {
            self.out.push('-');
        }
        self.out.push((b'1' + self.rng.below(9) as u8) as char);
        for _ in 0..self.rng.below(10) {
            self.out.push((b'0' + self.rng.below(10) as u8) as char);
        }
        if self.rng.below(8) == 0 {
            self.out.push('.');
            for _ in 0..self.rng.below(10) + 1 {
                self.out.push((b'0' + self.rng.below(10) as u8) as char);
            }
        }
        if self.rng.below(8) == 0 {
            self.out.push('e');
            for _ in 0..self.rng.below(3) + 1 {
                self.out.push((b'0' + self.rng.below(10) as u8) as char);
            }
        }
    }

    fn string(&mut self, min_length: usize, max_length: usize) {
        let length = self.rng.below((max_length - min_length + 1) as u32) as usize + min_length;
        self.out.push('"');
        for _ in 0..length {
            match self.rng.below(256) {
                0..=2 => self.out.push('\u{1f4a9}'),
                3..=5 => self.out.push_str("\\ud83d\\udca9"),
                6..=11 => self.out.push_str("\\n"),
                _ => self.out.push('a'),
            }
        }
        self.out.push('"');
    }
}

fn drain_tokens(input: &str) -> usize {
    let mut count = 0;
    let mut tokenizer = tokenizer_from_str(input);
    while let Some(token) = tokenizer.next_token() {
        black_box(&token);
        count += 1;
    }
    count
}

fn bench_tokenize_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_throughput");
    for (name, fields) in [("small", 20), ("medium", 500), ("large", 5000)] {
        let json = JsonGenerator::new(12).generate(fields);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &json, |b, json| {
            b.iter(|| drain_tokens(black_box(json)));
        });
    }
    group.finish();
}

fn bench_against_serde_json(c: &mut Criterion) {
    let json = JsonGenerator::new(12).generate(500);
    let mut group = c.benchmark_group("vs_serde_json");
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.bench_with_input(BenchmarkId::new("jsonlex", "tokens"), &json, |b, json| {
        b.iter(|| drain_tokens(black_box(json)));
    });
    group.bench_with_input(BenchmarkId::new("serde_json", "value"), &json, |b, json| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(json)).unwrap());
    });
    group.finish();
}

fn bench_string_heavy(c: &mut Criterion) {
    // Escape-dense strings hit the slowest scanning path.
    let mut escaped = String::from("[");
    for i in 0..500 {
        if i > 0 {
            escaped.push(',');
        }
        escaped.push_str(r#""line\none\ttwo Aé 💩""#);
    }
    escaped.push(']');

    let mut group = c.benchmark_group("string_heavy");
    group.throughput(Throughput::Bytes(escaped.len() as u64));
    group.bench_function("escape_dense", |b| {
        b.iter(|| drain_tokens(black_box(&escaped)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize_throughput,
    bench_against_serde_json,
    bench_string_heavy
);
criterion_main!(benches);
