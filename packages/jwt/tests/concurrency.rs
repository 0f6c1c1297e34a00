//! Shared builders, parsers and keys under concurrent use

mod common;

use common::{signer, verifier, Which};
use compact_jwt::{parse, Algorithm, Builder, HsAlg, Parser};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const ROUNDS: usize = 64;

#[test]
fn test_shared_hmac_builder_is_deterministic() {
    let hs = Arc::new(HsAlg::new(Algorithm::HS512, b"shared-key").expect("HMAC should succeed"));
    let builder = Builder::new(Arc::clone(&hs)).expect("builder should succeed");
    let parser = Parser::new(Arc::clone(&hs));

    let expected: Vec<Vec<u8>> = (0..ROUNDS)
        .map(|i| {
            builder
                .build(format!(r#"{{"n":{i}}}"#).as_bytes())
                .expect("build should succeed")
                .into_raw()
        })
        .collect();

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for (i, want) in expected.iter().enumerate() {
                    let claims = format!(r#"{{"n":{i}}}"#);
                    let token = builder.build(claims.as_bytes()).expect("build should succeed");
                    // pooled MAC state must never leak between calls
                    assert_eq!(token.raw_bytes(), want.as_slice());
                    let parsed = parser.parse(token.raw_bytes()).expect("parse should succeed");
                    assert_eq!(parsed.claims_bytes(), claims.as_bytes());
                }
            });
        }
    });
}

#[test]
fn test_shared_signers_across_families() {
    for alg in [Algorithm::ES256, Algorithm::PS256, Algorithm::EdDSA] {
        let builder = Builder::new(signer(&alg, Which::A)).expect("builder should succeed");
        let verifier = verifier(&alg, Which::A);

        thread::scope(|scope| {
            for t in 0..4 {
                let alg = &alg;
                let builder = &builder;
                let verifier = &verifier;
                scope.spawn(move || {
                    for i in 0..4 {
                        let claims = format!(r#"{{"t":{t},"i":{i}}}"#);
                        let token = builder.build(claims.as_bytes()).expect("build should succeed");
                        let parsed = parse(token.raw_bytes(), verifier)
                            .unwrap_or_else(|e| panic!("{alg}: {e}"));
                        assert_eq!(parsed.claims_bytes(), claims.as_bytes());
                    }
                });
            }
        });
    }
}
