use cfm_kernel::SAFE_ALPHABET;
use cfm_kernel::safe_nanoid;

#[test]
fn generates_expected_length_and_charset() {
    let id = safe_nanoid!();
    assert_eq!(id.len(), 21);

    for ch in id.chars() {
        assert!(SAFE_ALPHABET.contains(&ch), "unexpected character in nanoid: {ch}");
    }
}

#[test]
fn custom_length() {
    let id = safe_nanoid!(8);
    assert_eq!(id.len(), 8);
}

#[test]
fn ids_do_not_collide_under_repetition() {
    let mut seen = std::collections::HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(safe_nanoid!()), "duplicate id generated");
    }
}
