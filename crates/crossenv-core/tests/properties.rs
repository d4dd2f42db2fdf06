use crossenv_core::{CanonicalTarget, Error, RustTriple, TripleSuffix};
use proptest::prelude::*;
use proptest::sample::select;

const ARCHES: [&str; 7] = ["aarch64", "x86_64", "riscv64", "arm", "i386", "powerpc64le", "s390x"];

fn suffix() -> impl Strategy<Value = TripleSuffix> { select(TripleSuffix::ALL.to_vec()) }

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn normalization_is_idempotent(raw in "[A-Za-z0-9_.-]{1,32}") {
        let once = CanonicalTarget::parse(&raw).unwrap();
        let twice = CanonicalTarget::parse(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalization_is_deterministic(raw in "[A-Za-z0-9_.-]{1,32}") {
        prop_assert_eq!(CanonicalTarget::parse(&raw).unwrap(), CanonicalTarget::parse(&raw).unwrap());
    }

    #[test]
    fn foreign_characters_are_rejected(
        head in "[A-Za-z0-9_.-]{0,12}",
        bad in "[^A-Za-z0-9_.-]",
        tail in "[A-Za-z0-9_.-]{0,12}",
    ) {
        let raw = format!("{head}{bad}{tail}");
        prop_assert!(matches!(CanonicalTarget::parse(&raw), Err(Error::InvalidTarget(_))));
    }

    #[test]
    fn rust_spelling_round_trips(
        arch in select(ARCHES.to_vec()),
        suffix in suffix(),
        version in proptest::option::of("[0-9]{1,2}\\.[0-9]{1,2}"),
    ) {
        let version = version.map(|v| format!(".{v}")).unwrap_or_default();
        let rust = format!("{arch}-{}{version}", suffix.foreign());

        let canonical = CanonicalTarget::parse(&rust).unwrap();
        prop_assert_eq!(canonical.as_str(), format!("{arch}-{}{version}", suffix.canonical()));
        let mapped = RustTriple::from_canonical(&canonical);
        prop_assert_eq!(mapped.as_str(), rust.as_str());
    }

    #[test]
    fn rust_spelling_survives_mapping(arch in select(ARCHES.to_vec()), suffix in suffix()) {
        let canonical = CanonicalTarget::parse(&format!("{arch}-{}", suffix.canonical())).unwrap();
        let triple = RustTriple::from_canonical(&canonical);

        prop_assert!(triple.as_str().ends_with(suffix.foreign()));
        prop_assert!(triple.linker_var().chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
    }
}
