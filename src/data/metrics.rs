//! UK co-benefits dataset, level-3 snapshot.
//!
//! All monetary values are millions of GBP, summed over 2025-2050 unless noted.

use crate::foundation::core::Color;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_small_areas: u64,
    pub total_population: u64,
    pub total_households: u64,
    pub years_span: &'static str,
    pub total_years: u32,
}

/// A positive co-benefit category.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BenefitRecord {
    pub name: &'static str,
    pub value: f64,
    pub icon: &'static str,
    pub color: Color,
    pub description: &'static str,
}

/// A negative impact; `value <= 0`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CostRecord {
    pub name: &'static str,
    pub value: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DamageTypeRecord {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: f64,
    pub color: Color,
}

/// Benefit split by damage pathway (the mechanism through which it is realized).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PathwayRecord {
    pub pathway: &'static str,
    pub value: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RegionalRecord {
    pub region: &'static str,
    pub value: f64,
    pub color: Color,
    pub lat: f64,
    pub lng: f64,
    pub population: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AuthorityRecord {
    pub name: &'static str,
    pub value: f64,
    pub lat: f64,
    pub lng: f64,
    pub population: u64,
}

/// Annual benefits for one year of the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyPoint {
    pub year: u16,
    pub physical_activity: f64,
    pub air_quality: f64,
    pub noise: f64,
    pub excess_cold: f64,
    /// As published; not recomputed from the categories.
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CumulativePoint {
    pub year: u16,
    pub cumulative: f64,
}

/// Headline outcome card (health outcomes, economic breakdown).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OutcomeRecord {
    pub name: &'static str,
    pub value: f64,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: Color,
}

/// Tracked series of the timeline chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimelineSeries {
    Total,
    PhysicalActivity,
    AirQuality,
    Noise,
    ExcessCold,
}

impl TimelineSeries {
    pub const ALL: [Self; 5] = [
        Self::Total,
        Self::PhysicalActivity,
        Self::AirQuality,
        Self::Noise,
        Self::ExcessCold,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Total => "Total Benefits",
            Self::PhysicalActivity => "Physical Activity",
            Self::AirQuality => "Air Quality",
            Self::Noise => "Noise Reduction",
            Self::ExcessCold => "Excess Cold",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Total => Color::hex(0x10b981),
            Self::PhysicalActivity => Color::hex(0x3b82f6),
            Self::AirQuality => Color::hex(0x8b5cf6),
            Self::Noise => Color::hex(0xf59e0b),
            Self::ExcessCold => Color::hex(0xec4899),
        }
    }

    pub fn value(self, point: &YearlyPoint) -> f64 {
        match self {
            Self::Total => point.total,
            Self::PhysicalActivity => point.physical_activity,
            Self::AirQuality => point.air_quality,
            Self::Noise => point.noise,
            Self::ExcessCold => point.excess_cold,
        }
    }
}

pub const SUMMARY_STATS: SummaryStats = SummaryStats {
    total_small_areas: 46_426,
    total_population: 67_620_212,
    total_households: 28_135_927,
    years_span: "2025-2050",
    total_years: 26,
};

pub const BENEFITS: &[BenefitRecord] = &[
    BenefitRecord {
        name: "Physical Activity",
        value: 129_879.19,
        icon: "🚴",
        color: Color::hex(0x10b981),
        description: "Health benefits from increased walking and cycling",
    },
    BenefitRecord {
        name: "Air Quality",
        value: 48_259.41,
        icon: "🌬️",
        color: Color::hex(0x3b82f6),
        description: "Reduced mortality and health costs from cleaner air",
    },
    BenefitRecord {
        name: "Noise Reduction",
        value: 34_207.75,
        icon: "🔇",
        color: Color::hex(0x8b5cf6),
        description: "Amenity and sleep benefits from quieter environments",
    },
    BenefitRecord {
        name: "Excess Cold",
        value: 8_801.60,
        icon: "🏠",
        color: Color::hex(0xf59e0b),
        description: "Reduced cold-related mortality from better insulation",
    },
    BenefitRecord {
        name: "Diet Change",
        value: 5_054.87,
        icon: "🥗",
        color: Color::hex(0xec4899),
        description: "Health benefits from improved diet",
    },
    BenefitRecord {
        name: "Dampness",
        value: 641.80,
        icon: "💧",
        color: Color::hex(0x6366f1),
        description: "Health benefits from reduced damp housing",
    },
    BenefitRecord {
        name: "Excess Heat",
        value: 0.11,
        icon: "🌡️",
        color: Color::hex(0xef4444),
        description: "Reduced heat-related mortality",
    },
];

pub const COSTS: &[CostRecord] = &[
    CostRecord {
        name: "Hassle Costs",
        value: -70_842.52,
        color: Color::hex(0xef4444),
    },
    CostRecord {
        name: "Congestion",
        value: -7_623.78,
        color: Color::hex(0xf97316),
    },
    CostRecord {
        name: "Road Safety",
        value: -2_429.88,
        color: Color::hex(0xeab308),
    },
    CostRecord {
        name: "Road Repairs",
        value: -327.17,
        color: Color::hex(0x84cc16),
    },
];

const TOTAL_POSITIVE_BENEFITS: f64 = 226_844.73;

/// Published total of the positive categories.
pub fn total_positive_benefits() -> f64 {
    TOTAL_POSITIVE_BENEFITS
}

pub const DAMAGE_TYPES: &[DamageTypeRecord] = &[
    DamageTypeRecord {
        kind: "Health",
        value: 198_338.59,
        color: Color::hex(0x10b981),
    },
    DamageTypeRecord {
        kind: "Non-Health",
        value: -52_717.22,
        color: Color::hex(0xef4444),
    },
];

pub const DAMAGE_PATHWAYS: &[PathwayRecord] = &[
    PathwayRecord {
        pathway: "Reduced Mortality",
        value: 181_077.24,
        color: Color::hex(0x10b981),
    },
    PathwayRecord {
        pathway: "Amenity",
        value: 20_067.44,
        color: Color::hex(0x3b82f6),
    },
    PathwayRecord {
        pathway: "Sleep Disturbance",
        value: 14_140.31,
        color: Color::hex(0x8b5cf6),
    },
    PathwayRecord {
        pathway: "Society",
        value: 5_119.78,
        color: Color::hex(0xf59e0b),
    },
    PathwayRecord {
        pathway: "QALY",
        value: 3_121.05,
        color: Color::hex(0xec4899),
    },
    PathwayRecord {
        pathway: "NHS",
        value: 561.85,
        color: Color::hex(0x14b8a6),
    },
];

pub const REGIONS: &[RegionalRecord] = &[
    RegionalRecord {
        region: "England/Wales",
        value: 129_777.51,
        color: Color::hex(0x10b981),
        lat: 52.3555,
        lng: -1.1743,
        population: 59_597_300,
    },
    RegionalRecord {
        region: "Scotland",
        value: 12_655.16,
        color: Color::hex(0x3b82f6),
        lat: 56.4907,
        lng: -4.2026,
        population: 5_436_600,
    },
    RegionalRecord {
        region: "Northern Ireland",
        value: 3_188.71,
        color: Color::hex(0x8b5cf6),
        lat: 54.7877,
        lng: -6.4923,
        population: 1_910_500,
    },
];

pub const TOP_AUTHORITIES: &[AuthorityRecord] = &[
    AuthorityRecord {
        name: "Birmingham",
        value: 2_313.55,
        lat: 52.4862,
        lng: -1.8904,
        population: 1_144_900,
    },
    AuthorityRecord {
        name: "Leeds",
        value: 1_777.29,
        lat: 53.8008,
        lng: -1.5491,
        population: 812_000,
    },
    AuthorityRecord {
        name: "Cornwall",
        value: 1_685.84,
        lat: 50.2660,
        lng: -5.0527,
        population: 570_300,
    },
    AuthorityRecord {
        name: "Wiltshire",
        value: 1_280.88,
        lat: 51.3492,
        lng: -1.9927,
        population: 510_300,
    },
    AuthorityRecord {
        name: "Sheffield",
        value: 1_243.23,
        lat: 53.3811,
        lng: -1.4701,
        population: 556_500,
    },
    AuthorityRecord {
        name: "Cheshire East",
        value: 1_200.72,
        lat: 53.1610,
        lng: -2.2180,
        population: 398_800,
    },
    AuthorityRecord {
        name: "Bromley",
        value: 1_169.02,
        lat: 51.4039,
        lng: 0.0198,
        population: 329_800,
    },
    AuthorityRecord {
        name: "Bradford",
        value: 1_153.36,
        lat: 53.7960,
        lng: -1.7594,
        population: 546_400,
    },
    AuthorityRecord {
        name: "City of Edinburgh",
        value: 1_111.33,
        lat: 55.9533,
        lng: -3.1883,
        population: 514_990,
    },
    AuthorityRecord {
        name: "Barnet",
        value: 1_084.19,
        lat: 51.6252,
        lng: -0.1517,
        population: 389_300,
    },
];

pub const TIMELINE: &[YearlyPoint] = &[
    YearlyPoint {
        year: 2025,
        physical_activity: 1_609.18,
        air_quality: 172.41,
        noise: 117.01,
        excess_cold: 0.18,
        total: 1_898.79,
    },
    YearlyPoint {
        year: 2030,
        physical_activity: 4_085.08,
        air_quality: 577.17,
        noise: 551.42,
        excess_cold: 103.85,
        total: 5_566.10,
    },
    YearlyPoint {
        year: 2035,
        physical_activity: 4_940.14,
        air_quality: 1_521.34,
        noise: 1_492.89,
        excess_cold: 162.30,
        total: 8_355.84,
    },
    YearlyPoint {
        year: 2040,
        physical_activity: 5_649.21,
        air_quality: 2_494.13,
        noise: 1_803.98,
        excess_cold: 469.65,
        total: 10_654.81,
    },
    YearlyPoint {
        year: 2045,
        physical_activity: 6_203.15,
        air_quality: 3_090.07,
        noise: 1_823.19,
        excess_cold: 656.32,
        total: 12_005.19,
    },
    YearlyPoint {
        year: 2050,
        physical_activity: 6_605.74,
        air_quality: 3_082.33,
        noise: 1_708.98,
        excess_cold: 682.69,
        total: 12_303.35,
    },
];

pub const CUMULATIVE: &[CumulativePoint] = &[
    CumulativePoint {
        year: 2025,
        cumulative: 1_898.79,
    },
    CumulativePoint {
        year: 2030,
        cumulative: 7_464.89,
    },
    CumulativePoint {
        year: 2035,
        cumulative: 15_820.73,
    },
    CumulativePoint {
        year: 2040,
        cumulative: 26_475.54,
    },
    CumulativePoint {
        year: 2045,
        cumulative: 38_480.73,
    },
    CumulativePoint {
        year: 2050,
        cumulative: 50_784.08,
    },
];

pub const HEALTH_OUTCOMES: &[OutcomeRecord] = &[
    OutcomeRecord {
        name: "Reduced Mortality",
        value: 181_077.24,
        description: "Lives saved through cleaner air and healthier lifestyles",
        icon: "❤️",
        color: Color::hex(0x10b981),
    },
    OutcomeRecord {
        name: "Sleep Quality",
        value: 14_140.31,
        description: "Benefits from reduced noise pollution",
        icon: "😴",
        color: Color::hex(0x8b5cf6),
    },
    OutcomeRecord {
        name: "Quality of Life",
        value: 3_121.05,
        description: "Quality-adjusted life years gained",
        icon: "✨",
        color: Color::hex(0x3b82f6),
    },
    OutcomeRecord {
        name: "NHS Savings",
        value: 561.85,
        description: "Reduced healthcare costs",
        icon: "🏥",
        color: Color::hex(0xf59e0b),
    },
];

pub const ECONOMIC_BREAKDOWN: &[OutcomeRecord] = &[
    OutcomeRecord {
        name: "Health Benefits",
        value: 198_338.59,
        description: "Total health-related co-benefits",
        icon: "",
        color: Color::hex(0x10b981),
    },
    OutcomeRecord {
        name: "Amenity Value",
        value: 20_067.44,
        description: "Environmental quality improvements",
        icon: "",
        color: Color::hex(0x3b82f6),
    },
    OutcomeRecord {
        name: "Society Benefits",
        value: 5_119.78,
        description: "Broader societal benefits",
        icon: "",
        color: Color::hex(0x8b5cf6),
    },
    OutcomeRecord {
        name: "NHS Savings",
        value: 561.85,
        description: "Direct healthcare cost savings",
        icon: "",
        color: Color::hex(0xf59e0b),
    },
];

/// Latitude/longitude box containing the UK and Northern Ireland.
pub const UK_BOUNDS: GeoBounds = GeoBounds {
    south: 49.8,
    west: -8.7,
    north: 60.9,
    east: 1.8,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.south..=self.north).contains(&lat) && (self.west..=self.east).contains(&lng)
    }
}

/// Latest timeline point at or before `year`; the first point for earlier years.
pub fn timeline_point_for(year: u16) -> &'static YearlyPoint {
    TIMELINE
        .iter()
        .rev()
        .find(|p| p.year <= year)
        .unwrap_or(&TIMELINE[0])
}

/// Whole dataset, for JSON export.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub summary_stats: SummaryStats,
    pub benefits: &'static [BenefitRecord],
    pub costs: &'static [CostRecord],
    pub total_positive_benefits: f64,
    pub damage_types: &'static [DamageTypeRecord],
    pub damage_pathways: &'static [PathwayRecord],
    pub regions: &'static [RegionalRecord],
    pub top_authorities: &'static [AuthorityRecord],
    pub timeline: &'static [YearlyPoint],
    pub cumulative: &'static [CumulativePoint],
    pub health_outcomes: &'static [OutcomeRecord],
    pub economic_breakdown: &'static [OutcomeRecord],
}

pub fn dataset() -> Dataset {
    Dataset {
        summary_stats: SUMMARY_STATS,
        benefits: BENEFITS,
        costs: COSTS,
        total_positive_benefits: total_positive_benefits(),
        damage_types: DAMAGE_TYPES,
        damage_pathways: DAMAGE_PATHWAYS,
        regions: REGIONS,
        top_authorities: TOP_AUTHORITIES,
        timeline: TIMELINE,
        cumulative: CUMULATIVE,
        health_outcomes: HEALTH_OUTCOMES,
        economic_breakdown: ECONOMIC_BREAKDOWN,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/metrics.rs"]
mod tests;
