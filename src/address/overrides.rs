/// Addresses the general rules get wrong, matched as substrings of the whole
/// address. First match wins.
pub const OVERRIDES: &[(&str, &str, &str)] = &[
    ("송월길 155", "종로구", "교북동"),
    ("한강대로23길 55", "용산구", "한강로동"),
    ("가로수길 59", "강남구", "신사동"),
];

/// Fragments stripped before parsing.
pub const NOISE: &[&str] = &["1522-3232"];

// road or area name in the address -> likely neighborhood
pub const HINTS: &[(&str, &str)] = &[
    ("명동", "명동"),
    ("을지로", "을지로"),
    ("종로", "종로"),
    ("세종대로", "세종로"),
    ("퇴계로", "회현동/충무로/명동"),
];

pub fn find(address: &str) -> Option<(&'static str, &'static str)> {
    OVERRIDES
        .iter()
        .find(|(needle, _, _)| address.contains(needle))
        .map(|(_, district, neighborhood)| (*district, *neighborhood))
}
