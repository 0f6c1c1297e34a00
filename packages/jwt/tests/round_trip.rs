//! Build, parse and verify across every algorithm family

mod common;

use common::{signer, verifier, with_signature, Which};
use compact_jwt::{parse, Algorithm, Builder, JwtError, Signer, Verifier};

const CLAIMS: &[u8] = br#"{"sub":"1234567890","name":"John Doe","iat":1516239022}"#;

#[test]
fn test_round_trip_every_algorithm() {
    for alg in Algorithm::SUPPORTED {
        let signer = signer(&alg, Which::A);
        let verifier = verifier(&alg, Which::A);
        let builder = Builder::new(&signer).expect("builder should succeed");

        let token = builder.build(CLAIMS).expect("build should succeed");
        assert_eq!(token.header().alg, alg);
        assert_eq!(token.claims_bytes(), CLAIMS);
        assert_eq!(token.signature_bytes().len(), signer.signature_size());

        let parsed = parse(token.raw_bytes(), &verifier)
            .unwrap_or_else(|e| panic!("{alg} round trip failed: {e}"));
        assert_eq!(parsed, token);
        assert_eq!(parsed.claims_bytes(), CLAIMS);
        assert_eq!(parsed.header().alg, *signer.algorithm());
    }
}

#[test]
fn test_signature_size_matches_verifier() {
    for alg in Algorithm::SUPPORTED {
        assert_eq!(
            signer(&alg, Which::A).signature_size(),
            verifier(&alg, Which::A).signature_size(),
            "{alg}"
        );
    }
    assert_eq!(signer(&Algorithm::ES256, Which::A).signature_size(), 64);
    assert_eq!(signer(&Algorithm::ES384, Which::A).signature_size(), 96);
    assert_eq!(signer(&Algorithm::ES512, Which::A).signature_size(), 132);
    assert_eq!(signer(&Algorithm::RS256, Which::A).signature_size(), 256);
    assert_eq!(signer(&Algorithm::HS384, Which::A).signature_size(), 48);
    assert_eq!(signer(&Algorithm::EdDSA, Which::A).signature_size(), 64);
}

#[test]
fn test_empty_claims_round_trip() {
    for alg in [Algorithm::HS256, Algorithm::ES256, Algorithm::EdDSA] {
        let token = Builder::new(signer(&alg, Which::A))
            .expect("builder should succeed")
            .build(b"")
            .expect("build should succeed");
        let parsed = parse(token.raw_bytes(), &verifier(&alg, Which::A))
            .expect("parse should succeed");
        assert!(parsed.claims_bytes().is_empty());
        assert!(parsed.claims_part().is_empty());
    }
}

#[test]
fn test_flipped_signature_byte_is_rejected() {
    for alg in Algorithm::SUPPORTED {
        let verifier = verifier(&alg, Which::A);
        let token = Builder::new(signer(&alg, Which::A))
            .expect("builder should succeed")
            .build(CLAIMS)
            .expect("build should succeed");

        let signature = token.signature_bytes();
        for index in [0, signature.len() / 2, signature.len() - 1] {
            let mut tampered = signature.to_vec();
            tampered[index] ^= 0x01;
            let raw = with_signature(token.payload_bytes(), &tampered);
            assert_eq!(
                parse(&raw, &verifier),
                Err(JwtError::InvalidSignature),
                "{alg} accepted a signature with byte {index} flipped"
            );
        }
    }
}

#[test]
fn test_modified_claims_are_rejected() {
    for alg in Algorithm::SUPPORTED {
        let verifier = verifier(&alg, Which::A);
        let token = Builder::new(signer(&alg, Which::A))
            .expect("builder should succeed")
            .build(CLAIMS)
            .expect("build should succeed");
        let forged = Builder::new(signer(&alg, Which::B))
            .expect("builder should succeed")
            .build(br#"{"sub":"admin"}"#)
            .expect("build should succeed");

        // forged payload, genuine signature
        let raw = with_signature(forged.payload_bytes(), token.signature_bytes());
        assert_eq!(parse(&raw, &verifier), Err(JwtError::InvalidSignature), "{alg}");
    }
}

#[test]
fn test_signature_from_another_key_is_rejected() {
    for alg in Algorithm::SUPPORTED {
        let token = Builder::new(signer(&alg, Which::A))
            .expect("builder should succeed")
            .build(CLAIMS)
            .expect("build should succeed");
        assert_eq!(
            parse(token.raw_bytes(), &verifier(&alg, Which::B)),
            Err(JwtError::InvalidSignature),
            "{alg} verified under the wrong key"
        );
    }
}

#[test]
fn test_truncated_signature_is_rejected() {
    for alg in Algorithm::SUPPORTED {
        let token = Builder::new(signer(&alg, Which::A))
            .expect("builder should succeed")
            .build(CLAIMS)
            .expect("build should succeed");
        let signature = token.signature_bytes();
        let raw = with_signature(token.payload_bytes(), &signature[..signature.len() - 1]);
        // the wrong-length error from the verifier is folded into InvalidSignature
        assert_eq!(
            parse(&raw, &verifier(&alg, Which::A)),
            Err(JwtError::InvalidSignature),
            "{alg}"
        );
    }
}

#[test]
fn test_verifier_reports_wrong_length_as_format_error() {
    for alg in Algorithm::SUPPORTED {
        let verifier = verifier(&alg, Which::A);
        let short = vec![0u8; verifier.signature_size() - 1];
        assert_eq!(
            verifier.verify(b"payload", &short),
            Err(JwtError::InvalidSignatureFormat),
            "{alg}"
        );
    }
}

#[test]
fn test_pss_and_pkcs1_signatures_are_not_interchangeable() {
    let token = Builder::new(signer(&Algorithm::PS256, Which::A))
        .expect("builder should succeed")
        .build(CLAIMS)
        .expect("build should succeed");
    let rs256 = verifier(&Algorithm::RS256, Which::A);
    assert_eq!(
        rs256.verify(token.payload_bytes(), token.signature_bytes()),
        Err(JwtError::InvalidSignature)
    );
}

/// PS256 over rsa1.pem, signed by openssl with `rsa_pss_saltlen:max`.
const PS256_MAX_SALT: &str = include_str!("fixtures/ps256_max_salt.jwt");

#[test]
fn test_pss_accepts_maximum_salt_length() {
    let verifier = verifier(&Algorithm::PS256, Which::A);
    let token = parse(PS256_MAX_SALT.trim(), &verifier).expect("max-salt PS256 should verify");
    assert_eq!(token.claims_bytes(), br#"{"sub":"max-salt"}"#);

    let other = common::verifier(&Algorithm::PS256, Which::B);
    assert_eq!(
        parse(PS256_MAX_SALT.trim(), &other).err(),
        Some(JwtError::InvalidSignature)
    );

    let mut tampered = PS256_MAX_SALT.trim().as_bytes().to_vec();
    let last = tampered.len() - 1;
    tampered[last] = if tampered[last] == b'A' { b'Q' } else { b'A' };
    assert_eq!(
        parse(&tampered, &verifier).err(),
        Some(JwtError::InvalidSignature)
    );
}

#[test]
fn test_public_key_derivation_verifies() {
    for alg in Algorithm::SUPPORTED {
        let private = common::private_key(&alg, Which::A);
        let public = private.public_key().expect("public key should derive");
        let token = Builder::new(
            compact_jwt::new_signer(alg.clone(), private).expect("signer should succeed"),
        )
        .expect("builder should succeed")
        .build(CLAIMS)
        .expect("build should succeed");
        let verifier =
            compact_jwt::new_verifier(alg.clone(), public).expect("verifier should succeed");
        assert!(parse(token.raw_bytes(), &verifier).is_ok(), "{alg}");
    }
}
