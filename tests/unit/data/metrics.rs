use super::*;

#[test]
fn benefits_are_non_negative_and_costs_non_positive() {
    assert!(BENEFITS.iter().all(|b| b.value >= 0.0));
    assert!(COSTS.iter().all(|c| c.value <= 0.0));
    assert!(DAMAGE_PATHWAYS.iter().all(|p| p.value >= 0.0));
}

#[test]
fn published_total_matches_category_sum() {
    let sum: f64 = BENEFITS.iter().map(|b| b.value).sum();
    assert!((sum - total_positive_benefits()).abs() < 0.01);
}

#[test]
fn geographic_records_are_inside_uk_bounds() {
    for r in REGIONS {
        assert!(UK_BOUNDS.contains(r.lat, r.lng), "{}", r.region);
        assert!(r.population > 0);
    }
    for a in TOP_AUTHORITIES {
        assert!(UK_BOUNDS.contains(a.lat, a.lng), "{}", a.name);
        assert!(a.population > 0);
    }
}

#[test]
fn authorities_are_ranked_by_value() {
    assert!(TOP_AUTHORITIES.windows(2).all(|w| w[0].value >= w[1].value));
}

#[test]
fn timeline_years_step_by_five_and_totals_roughly_sum() {
    let years: Vec<u16> = TIMELINE.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2025, 2030, 2035, 2040, 2045, 2050]);
    for p in TIMELINE {
        let tracked = p.physical_activity + p.air_quality + p.noise + p.excess_cold;
        // The published total also includes untracked categories.
        assert!(p.total + 0.01 >= tracked);
        assert!(p.total - tracked < 0.05 * p.total);
    }
}

#[test]
fn cumulative_is_non_decreasing() {
    assert!(CUMULATIVE.windows(2).all(|w| w[0].cumulative <= w[1].cumulative));
}

#[test]
fn timeline_lookup_uses_latest_point_at_or_before_year() {
    assert_eq!(timeline_point_for(2020).year, 2025);
    assert_eq!(timeline_point_for(2025).year, 2025);
    assert_eq!(timeline_point_for(2034).year, 2030);
    assert_eq!(timeline_point_for(2050).year, 2050);
}

#[test]
fn series_accessors_read_matching_fields() {
    let p = &TIMELINE[1];
    assert_eq!(TimelineSeries::Total.value(p), 5_566.10);
    assert_eq!(TimelineSeries::Noise.value(p), 551.42);
    assert_eq!(TimelineSeries::ALL.len(), 5);
}

#[test]
fn dataset_serializes_with_camel_case_keys() {
    let v = serde_json::to_value(dataset()).unwrap();
    assert_eq!(v["summaryStats"]["totalSmallAreas"], 46_426);
    assert_eq!(v["benefits"][0]["color"], "#10b981");
    assert_eq!(v["damageTypes"][1]["type"], "Non-Health");
    assert_eq!(v["timeline"][0]["physicalActivity"], 1_609.18);
}
