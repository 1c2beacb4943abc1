use jsonwebtoken::{EncodingKey, Header, encode};
use poliza_auth::jwt::{is_expired, peek_claims};
use serde_json::json;

fn mint(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-only-secret"),
    )
    .unwrap()
}

fn at(seconds: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_second(seconds).unwrap()
}

#[test]
fn claims_are_read_without_the_signing_key() {
    let token = mint(json!({"sub": "u-1", "email": "ana@example.com", "exp": 2_000_000_000}));
    let claims = peek_claims(&token).unwrap();
    assert_eq!(claims.sub.as_deref(), Some("u-1"));
    assert_eq!(claims.email.as_deref(), Some("ana@example.com"));
    assert_eq!(claims.exp, Some(2_000_000_000));
}

#[test]
fn token_past_exp_is_expired() {
    let token = mint(json!({"sub": "u-1", "exp": 1_700_000_000}));
    assert!(is_expired(&token, at(1_700_000_001)).unwrap());
    assert!(!is_expired(&token, at(1_699_999_999)).unwrap());
}

#[test]
fn token_without_exp_never_expires() {
    let token = mint(json!({"sub": "u-1"}));
    assert!(!is_expired(&token, at(4_000_000_000)).unwrap());
}

#[test]
fn garbage_is_an_error() {
    assert!(peek_claims("not-a-jwt").is_err());
    assert!(is_expired("a.b.c", at(0)).is_err());
}
