use auth::password::{hash_password, verify_password};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use secrecy::{ExposeSecret, SecretString};

fn bench_hash_password(c: &mut Criterion) {
    let password = SecretString::from("StudentPass1".to_string());
    c.bench_function("hash_password", |b| {
        b.iter(|| hash_password(black_box(&password), black_box(None)))
    });
}

fn bench_verify_password(c: &mut Criterion) {
    let password = SecretString::from("StudentPass1".to_string());
    let hash = hash_password(&password, None).unwrap();
    c.bench_function("verify_password", |b| {
        b.iter(|| verify_password(black_box(&password), black_box(hash.expose_secret())))
    });
}

fn bench_identity_cookies(c: &mut Criterion) {
    let header = "theme=dark; employerId=ckz3q0x1b0000emp; adminId=ckz3q0x1b0000adm; _ga=GA1.1.1";
    c.bench_function("identity_from_cookie_header", |b| {
        b.iter(|| auth::Identity::resolve(&auth::IdentityCookies::parse(black_box(header))))
    });
}

criterion_group!(benches, bench_hash_password, bench_verify_password, bench_identity_cookies);
criterion_main!(benches);
