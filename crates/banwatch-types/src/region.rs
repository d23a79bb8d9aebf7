//! Free Fire server regions

/// A game server cluster: short code used by the lookup service plus a
/// human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
}

/// Every known region, in the order the resolver queries them.
pub const REGIONS: [Region; 13] = [
    Region { code: "ind", name: "India" },
    Region { code: "br", name: "Brazil" },
    Region { code: "sg", name: "Singapore" },
    Region { code: "ru", name: "Russia" },
    Region { code: "id", name: "Indonesia" },
    Region { code: "tw", name: "Taiwan" },
    Region { code: "us", name: "United States" },
    Region { code: "vn", name: "Vietnam" },
    Region { code: "th", name: "Thailand" },
    Region { code: "me", name: "Middle East" },
    Region { code: "pk", name: "Pakistan" },
    Region { code: "cis", name: "CIS" },
    Region { code: "bd", name: "Bangladesh" },
];

/// Region codes in query order.
pub fn region_codes() -> Vec<String> {
    REGIONS.iter().map(|r| r.code.to_string()).collect()
}

/// Look up a region by code.
pub fn find_region(code: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.code == code)
}

/// Display name for a region code, falling back to the raw code when the
/// lookup service reports a region we don't know about.
pub fn region_display_name(code: &str) -> &str {
    match find_region(code) {
        Some(region) => region.name,
        None => code,
    }
}
