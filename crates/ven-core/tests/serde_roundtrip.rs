use ven_core::{Config, MatMulMode, PowerMode, Round, RoundingBackend, VenError};

#[test]
fn config_roundtrips_through_json() {
    let config = Config {
        rounding: RoundingBackend::None,
        power: PowerMode::Slow,
        matmul: MatMulMode::Slow,
        ..Config::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn config_deserializes_from_partial_json() {
    let config: Config = serde_json::from_str(r#"{"rounding": "none"}"#).unwrap();
    assert_eq!(config.rounding, RoundingBackend::None);
    assert_eq!(config.matmul, MatMulMode::Fast);
}

#[test]
fn round_directions_serialize_as_snake_case() {
    assert_eq!(serde_json::to_string(&Round::Up).unwrap(), r#""up""#);
    assert_eq!(serde_json::to_string(&Round::ToZero).unwrap(), r#""to_zero""#);
}

#[test]
fn errors_roundtrip_with_context() {
    let err = VenError::DimensionMismatch(
        ven_core::ErrorInfo::new("matmul_inner", "(2, 3) * (4, 5)")
            .with_context("lhs_cols", "3")
            .with_context("rhs_rows", "4"),
    );
    let json = serde_json::to_string(&err).unwrap();
    let back: VenError = serde_json::from_str(&json).unwrap();
    assert_eq!(err, back);
    assert_eq!(back.code(), "matmul_inner");
    assert!(back.to_string().contains("dimension mismatch"));
}
