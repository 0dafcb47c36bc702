use hyval::{AnyConstant, IntegerConstant, ParseConstantError, RealConstant, lift_signed, lift_unsigned};

fn int(literal: &str) -> IntegerConstant {
    literal.parse().expect("valid integer literal")
}

fn real(literal: &str) -> RealConstant {
    literal.parse().expect("valid real literal")
}

#[test]
fn integer_literals() {
    assert_eq!(int("42"), lift_unsigned(42));
    assert_eq!(int("0x2"), lift_unsigned(2));
    assert_eq!(int("0o17"), lift_unsigned(0o17));
    assert_eq!(int("0b11"), lift_unsigned(3));
    assert_eq!(int("0xf000_0000_0000_0000"), lift_unsigned(0xf000_0000_0000_0000));
    assert_eq!(int("-0x8000"), lift_signed(-0x8000));
    assert_eq!(int("+7"), lift_unsigned(7));
    assert_eq!(int("18446744073709551615"), lift_unsigned(u64::MAX));
    assert!(int("-0").is_negative());
}

#[test]
fn integer_literal_errors() {
    assert!(matches!(
        "18446744073709551616".parse::<IntegerConstant>(),
        Err(ParseConstantError::Overflow(_))
    ));
    assert!(matches!(
        "0b102".parse::<IntegerConstant>(),
        Err(ParseConstantError::InvalidDigit { digit: '2', .. })
    ));
    assert!("0x".parse::<IntegerConstant>().unwrap_err().is_empty());
    assert!("".parse::<IntegerConstant>().unwrap_err().is_empty());
    assert!("1.5".parse::<IntegerConstant>().unwrap_err().is_invalid_digit());
}

#[test]
fn real_literals() {
    assert_eq!(real(".2e1"), RealConstant::lift(2.0));
    assert_eq!(real("0.5"), RealConstant::lift(0.5));
    assert_eq!(real("2."), RealConstant::lift(2.0));
    assert_eq!(real("-1_000.25"), RealConstant::lift(-1000.25));
    assert_eq!(real("1.5e3").convert_to::<f64>(), Ok(1500.0));
    assert_eq!(real("6.25e-2").convert_to::<f32>(), Ok(0.0625_f32));
    // read with 64 significant bits, 1e-3 is not the f64 nearest to it
    assert!(real("1e-3").convert_to::<f64>().is_err());
    assert!(real("-inf").is_infinite() && real("-inf").is_sign_negative());
    assert!(real("NaN").is_nan());
}

#[test]
fn real_literals_keep_extended_precision() {
    // 0.1 rounded to 64 significant bits is not an f64 nor an f32
    let tenth = real("0.1");
    assert_eq!(tenth.parts(), Some((false, 0xCCCC_CCCC_CCCC_CCCD, -67)));
    assert!(tenth.convert_to::<f64>().is_err());
    assert!(tenth.convert_to::<f32>().is_err());

    // huge and tiny literals keep their order of magnitude
    assert!(real("1e4000").is_finite());
    assert!(real("1e4000").convert_to::<f64>().is_err());
    assert!(real("1e-4000").convert_to::<f64>().is_err());
}

#[test]
fn real_literal_errors() {
    assert!(".".parse::<RealConstant>().unwrap_err().is_empty());
    assert!("1e".parse::<RealConstant>().unwrap_err().is_empty());
    assert!("1.2.3".parse::<RealConstant>().unwrap_err().is_invalid_digit());
    assert!(
        "1e10001"
            .parse::<RealConstant>()
            .unwrap_err()
            .is_exponent_out_of_range()
    );
}

#[test]
fn exponent_bound_applies_to_the_value_not_the_spelling() {
    assert_eq!(real("100000e-10001"), real("1e-9996"));
    assert_eq!(real("0.00001e10004"), real("1e9999"));

    let one = format!("1.{}", "0".repeat(10_001));
    assert_eq!(real(&one), RealConstant::lift(1.0));
    let tiny_zero = format!("0.{}", "0".repeat(20_000));
    assert_eq!(real(&tiny_zero), RealConstant::ZERO);

    assert!(
        "10e10000"
            .parse::<RealConstant>()
            .unwrap_err()
            .is_exponent_out_of_range()
    );
    assert!(
        "0.1e-10000"
            .parse::<RealConstant>()
            .unwrap_err()
            .is_exponent_out_of_range()
    );
}

#[test]
fn any_constant_picks_the_kind_from_the_spelling() {
    assert_eq!("0x10".parse::<AnyConstant>(), Ok(AnyConstant::Int(lift_unsigned(16))));
    assert_eq!("-12".parse::<AnyConstant>(), Ok(AnyConstant::Int(lift_signed(-12))));
    assert!("12.0".parse::<AnyConstant>().is_ok_and(|c| c.is_real()));
    assert!("1e3".parse::<AnyConstant>().is_ok_and(|c| c.is_real()));
    assert!("inf".parse::<AnyConstant>().is_ok_and(|c| c.is_real()));
}
