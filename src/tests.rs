use crate::{CapabilityFlags, Tier, Upcaser, instruction_set, try_upcase, upcase, upcase_with_tier};

#[test]
fn test_upcase_mixed_ascii() {
    assert_eq!(upcase(b"abcXYZ123"), b"ABCXYZ123");
    assert_eq!(upcase(b"Hello, World!"), b"HELLO, WORLD!");
}

#[test]
fn test_upcase_empty() {
    assert!(upcase(b"").is_empty());
}

#[test]
fn test_letter_boundaries() {
    // '`' and '{' sit just outside a..z
    assert_eq!(upcase(b"`az{"), b"`AZ{");
    assert_eq!(upcase(b"@AZ["), b"@AZ[");
}

#[test]
fn test_instruction_set_is_known_label() {
    let labels: Vec<&str> = Tier::ALL.iter().map(|t| t.label()).collect();
    assert!(labels.contains(&instruction_set()));
    assert_eq!(instruction_set(), CapabilityFlags::detect().instruction_set());
}

#[test]
fn test_instruction_set_is_stable() {
    let first = instruction_set();
    for _ in 0..10 {
        assert_eq!(instruction_set(), first);
    }
}

#[test]
fn test_block_boundary_lengths() {
    let pattern = b"the quick brown fox jumps over the lazy dog ";
    for len in [0, 1, 15, 16, 17, 31, 32, 33, 63, 64, 65, 127, 128, 129] {
        let input: Vec<u8> = pattern.iter().cycle().take(len).copied().collect();
        let output = upcase(&input);
        assert_eq!(output.len(), len, "length changed at {}", len);
        assert_eq!(output, input.to_ascii_uppercase(), "mismatch at {}", len);
    }
}

#[test]
fn test_idempotent() {
    let input = b"Mixed Case 0123 with punctuation {}[]~".repeat(5);
    let once = upcase(&input);
    assert_eq!(upcase(&once), once);
}

#[test]
fn test_all_ascii_bytes() {
    let input: Vec<u8> = (0u8..0x80).collect();
    assert_eq!(upcase(&input), input.to_ascii_uppercase());
}

#[test]
fn test_non_ascii_goes_to_fallback() {
    assert_eq!(upcase("straße".as_bytes()), "STRASSE".as_bytes());
    assert_eq!(upcase("café".as_bytes()), "CAFÉ".as_bytes());
}

#[test]
fn test_non_ascii_at_end_of_long_input() {
    let mut input = b"a".repeat(200);
    input.extend_from_slice("é".as_bytes());
    let mut expected = b"A".repeat(200);
    expected.extend_from_slice("É".as_bytes());
    assert_eq!(upcase(&input), expected);
}

#[test]
fn test_try_upcase_matches_upcase() {
    let input = b"fallible allocation path";
    assert_eq!(try_upcase(input).unwrap(), upcase(input));
}

#[test]
fn test_every_supported_tier_agrees() {
    let input = b"0123456789abcdefghijklmnopqrstuvwxyz!?".repeat(9);
    let expected = input.to_ascii_uppercase();
    for tier in CapabilityFlags::detect().supported_tiers() {
        assert_eq!(
            upcase_with_tier(&input, tier).as_deref(),
            Some(expected.as_slice()),
            "tier {} disagrees",
            tier
        );
    }
}

#[test]
fn test_custom_upcaser_independent_of_default() {
    let scalar = Upcaser::with_capabilities(CapabilityFlags::NONE);
    assert_eq!(scalar.instruction_set(), "DEFAULT");
    assert_eq!(scalar.upcase(b"independent"), upcase(b"independent"));
}
