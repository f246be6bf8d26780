//! Performance benchmarks for domain derivation and multi-recipient ElGamal

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gq_elgamal::{
    Ciphertext, ElGamal, GqGroup, GqGroupGenerator, HomomorphicOperations, KeyPair, Message,
    PublicKey, SecurityLevel,
};
use rand::thread_rng;

const SLOT_COUNTS: [usize; 3] = [1, 4, 16];

fn election_group() -> GqGroup {
    GqGroupGenerator::new(SecurityLevel::TestingOnly)
        .derive_domain("Election_name")
        .expect("Failed to derive domain")
}

fn generator_message(group: &GqGroup, slots: usize) -> Message {
    Message::new(vec![group.generator(); slots]).expect("Failed to build message")
}

fn benchmark_domain_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain_derivation");
    let generator = GqGroupGenerator::new(SecurityLevel::TestingOnly);

    group.bench_function("derive_testing_only", |b| {
        b.iter(|| {
            generator
                .derive_domain(black_box("Election_name"))
                .expect("Derivation failed")
        });
    });

    let domain = election_group();
    group.bench_function("verify_testing_only", |b| {
        b.iter(|| generator.verify_domain(black_box("Election_name"), &domain));
    });

    group.finish();
}

fn benchmark_key_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_generation");
    let domain = election_group();

    for slots in SLOT_COUNTS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(slots), slots, |b, &slots| {
            b.iter(|| KeyPair::generate(&domain, slots, &mut thread_rng()).expect("Keygen failed"));
        });
    }

    group.finish();
}

fn benchmark_encryption(c: &mut Criterion) {
    let mut group = c.benchmark_group("encryption");
    let domain = election_group();

    for slots in SLOT_COUNTS.iter() {
        let keypair = KeyPair::generate(&domain, *slots, &mut thread_rng()).expect("Keygen failed");
        let elgamal = ElGamal::new(keypair.public_key);
        let message = generator_message(&domain, *slots);

        group.bench_with_input(BenchmarkId::from_parameter(slots), slots, |b, _| {
            b.iter(|| {
                elgamal
                    .encrypt(black_box(&message), &mut thread_rng())
                    .expect("Encryption failed")
            });
        });
    }

    group.finish();
}

fn benchmark_decryption(c: &mut Criterion) {
    let mut group = c.benchmark_group("decryption");
    let domain = election_group();

    for slots in SLOT_COUNTS.iter() {
        let keypair = KeyPair::generate(&domain, *slots, &mut thread_rng()).expect("Keygen failed");
        let ciphertext = ElGamal::new(keypair.public_key.clone())
            .encrypt(&generator_message(&domain, *slots), &mut thread_rng())
            .expect("Encryption failed");

        group.bench_with_input(BenchmarkId::from_parameter(slots), slots, |b, _| {
            b.iter(|| {
                black_box(&ciphertext)
                    .decrypt(&keypair.private_key)
                    .expect("Decryption failed")
            });
        });
    }

    group.finish();
}

fn benchmark_key_combination(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_combination");
    let domain = election_group();

    for trustees in [2usize, 5, 10].iter() {
        let shares: Vec<PublicKey> = (0..*trustees)
            .map(|_| {
                KeyPair::generate(&domain, 4, &mut thread_rng())
                    .expect("Keygen failed")
                    .public_key
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(trustees), trustees, |b, _| {
            b.iter(|| PublicKey::combine(black_box(&shares)).expect("Combine failed"));
        });
    }

    group.finish();
}

fn benchmark_homomorphic_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("homomorphic");
    let domain = election_group();
    let keypair = KeyPair::generate(&domain, 4, &mut thread_rng()).expect("Keygen failed");
    let elgamal = ElGamal::new(keypair.public_key);
    let message = generator_message(&domain, 4);

    let ciphertexts: Vec<Ciphertext> = (0..32)
        .map(|_| elgamal.encrypt(&message, &mut thread_rng()).expect("Encryption failed"))
        .collect();

    group.bench_function("pairwise_product", |b| {
        b.iter(|| {
            ciphertexts[0]
                .homomorphic_operation(black_box(&ciphertexts[1]))
                .expect("Operation failed")
        });
    });

    group.bench_function("batch_product_32", |b| {
        b.iter(|| {
            Ciphertext::homomorphic_batch_operation(black_box(&ciphertexts))
                .expect("Batch operation failed")
        });
    });

    group.bench_function("rerandomize", |b| {
        b.iter(|| {
            elgamal
                .rerandomize(black_box(&ciphertexts[0]), &mut thread_rng())
                .expect("Rerandomization failed")
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_domain_derivation,
    benchmark_key_generation,
    benchmark_encryption,
    benchmark_decryption,
    benchmark_key_combination,
    benchmark_homomorphic_operations
);
criterion_main!(benches);
