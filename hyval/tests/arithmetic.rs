use std::panic::{self, AssertUnwindSafe};

use hyval::prelude::*;

/// Runs `f`, expecting it to panic with a value-preserving cast failure.
fn assert_rejected(f: impl FnOnce()) {
    let payload = panic::catch_unwind(AssertUnwindSafe(f))
        .expect_err("the conversion should have been rejected");
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or_default();
    assert_eq!(message, "conversion is not value preserving");
}

#[test]
fn integer_accumulator() {
    let mut a: i32 = lift_unsigned(1).cast();
    a += lift_unsigned(0x2);
    a -= lift_unsigned(0o2);
    a *= lift_unsigned(0b11);
    assert_eq!(a, 3_i32);
    a /= "0.2e1".parse::<RealConstant>().expect("valid literal");
    assert_eq!(a, 1_i32);
}

#[test]
fn float_accumulator_and_short_circuit() {
    let mut b: f32 = (-lift_unsigned(0xf000_0000_0000_0000)).cast();
    b *= lift_unsigned(2);
    b /= lift_unsigned(0x100_0002);
    b += lift_real(0.5);
    let expected = -17_293_822_569_102_704_640.0_f32 * 2.0 / 16_777_218.0 + 0.5;
    assert_eq!(b, expected);

    // would need 25 significand bits
    assert_rejected(|| b += lift_unsigned(0x100_0001));
    assert_eq!(b, expected);

    assert_rejected(|| b += lift_real(0.1));
    assert_eq!(b, expected);
}

#[test]
fn short_accumulator() {
    let mut c: i16 = lift_unsigned(100).cast();
    c += lift_unsigned(0x7000);
    c += -lift_unsigned(0x8000);
    c = c * lift_signed(1);
    assert_eq!(c, -3996_i16);

    // larger than i16::MAX
    assert_rejected(|| c += lift_unsigned(0x8000));
    assert_eq!(c, -3996_i16);
}

#[test]
fn lifted_minimum_compares_to_negated_literal() {
    let a: i32 = lift_signed(-0x8000_0000).cast();
    assert!(a == -lift_unsigned(0x8000_0000));
    assert_eq!(a, i32::MIN);
}

#[test]
fn negative_zero_is_zero() {
    let zero: i32 = (-lift_unsigned(0)).cast();
    assert_eq!(zero, 0_i32);
    assert!(0_u8 == -lift_unsigned(0));
}
