// src/states.rs

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The only country this tool understands.
pub const COUNTRY_CODE: &str = "MY";

/// GeoNames admin1 short codes → ISO 3166-2 codes for Malaysia.
/// Keys are the 3-letter codes exactly as they appear in column 5 of MY.txt.
static STATE_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("JHR", "MY-01"), // Johor
        ("KDH", "MY-02"), // Kedah
        ("KTN", "MY-03"), // Kelantan
        ("MLK", "MY-04"), // Melaka
        ("NSN", "MY-05"), // Negeri Sembilan
        ("PHG", "MY-06"), // Pahang
        ("PNG", "MY-07"), // Pulau Pinang
        ("PRK", "MY-08"), // Perak
        ("PLS", "MY-09"), // Perlis
        ("SGR", "MY-10"), // Selangor
        ("SBH", "MY-11"), // Sabah
        ("SWK", "MY-12"), // Sarawak
        ("TRG", "MY-13"), // Terengganu
        ("KUL", "MY-14"), // Kuala Lumpur (Federal Territory)
        ("LBN", "MY-15"), // Labuan (Federal Territory)
        ("PJY", "MY-16"), // Putrajaya (Federal Territory)
    ])
});

/// Exact-case lookup of a GeoNames state code. Unknown or differently-cased
/// codes return `None`; callers surface those rather than defaulting.
pub fn map_state_code(code: &str) -> Option<&'static str> {
    STATE_CODES.get(code).copied()
}
