//! The outfit rule engine: pure functions mapping weather aggregates to
//! clothing picks.
//!
//! Each temperature rule is an ordered ladder of `(threshold, outcome)`
//! pairs evaluated top-down; the first rung with `value >= threshold` wins,
//! so a value exactly on a boundary always rounds to the warmer category.

use crate::summary::DayWeatherSummary;

/// One per period, plus one for the whole day. All fields are ephemeral.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitRecommendation {
    pub base_layer: String,
    pub mid_layer: Option<String>,
    pub outer_layer: Option<String>,
    pub lower_body: String,
    pub accessories: Option<String>,
}

type Ladder = [(f64, &'static str)];

const BASE_LAYER_LADDER: &Ladder = &[
    (30.0, "Light, breathable t-shirt or tank top"),
    (25.0, "T-shirt or short-sleeve shirt"),
    (20.0, "T-shirt or light long-sleeve shirt"),
    (15.0, "Long-sleeve shirt or light sweater"),
    (10.0, "Sweater or light thermal top"),
];
const BASE_LAYER_FALLBACK: &str = "Thermal top with sweater layering";

const OUTER_LAYER_LADDER: &Ladder = &[
    (15.0, "Light jacket"),
    (10.0, "Medium-weight jacket"),
    (5.0, "Heavy jacket or coat"),
];
const OUTER_LAYER_FALLBACK: &str = "Heavy winter coat with proper insulation";
/// Above this apparent temperature no outer layer is suggested at all.
const NO_OUTER_LAYER_ABOVE_C: f64 = 20.0;

const LOWER_BODY_LADDER: &Ladder = &[
    (25.0, "Shorts/skirt or breathable pants"),
    (20.0, "Shorts/skirt or light pants"),
    (15.0, "Light pants or jeans"),
    (5.0, "Jeans or thick pants with a thermal inner"),
];
const LOWER_BODY_FALLBACK: &str = "Warm pants with thermal leggings underneath";

/// Mid-layer guidance only applies when the period actually gets cold.
const MID_LAYER_GATE_C: f64 = 5.0;

fn ladder_pick(ladder: &Ladder, value: f64, fallback: &'static str) -> &'static str {
    ladder
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, outcome)| *outcome)
        .unwrap_or(fallback)
}

/// First upper-body layer, keyed on the period's maximum temperature.
pub fn base_layer(max_temp: f64) -> String {
    ladder_pick(BASE_LAYER_LADDER, max_temp, BASE_LAYER_FALLBACK).to_string()
}

/// Mid layer, keyed on average temperature but gated on the minimum:
/// suppressed entirely unless the period dips below 5°C, so an otherwise
/// mild day with a brief cold snap gets no mid-layer advice.
pub fn mid_layer(min_temp: f64, avg_temp: f64) -> Option<String> {
    if min_temp >= MID_LAYER_GATE_C {
        return None;
    }
    if avg_temp >= 0.0 {
        Some("Warm sweater or fleece".to_string())
    } else {
        Some("Heavy thermal mid-layer".to_string())
    }
}

/// Outerwear, keyed on the minimum apparent temperature. Strong wind adds a
/// wind-resistance note to whatever the ladder picked.
pub fn outer_layer(min_apparent_temp: f64, strong_wind: bool) -> Option<String> {
    if min_apparent_temp >= NO_OUTER_LAYER_ABOVE_C {
        return None;
    }
    let mut outcome =
        ladder_pick(OUTER_LAYER_LADDER, min_apparent_temp, OUTER_LAYER_FALLBACK).to_string();
    if strong_wind {
        outcome.push_str(" (wind-resistant preferred)");
    }
    Some(outcome)
}

/// Lower-body wear, keyed on the period's minimum temperature.
pub fn lower_body(min_temp: f64) -> String {
    ladder_pick(LOWER_BODY_LADDER, min_temp, LOWER_BODY_FALLBACK).to_string()
}

/// Accessories are an ordered checklist, not a ladder: every matching item
/// is appended. `None` when nothing applies.
pub fn accessories(summary: &DayWeatherSummary) -> Option<String> {
    let mut items: Vec<&str> = Vec::new();

    if summary.will_rain {
        if summary.heavy_rain {
            items.push("Waterproof rain jacket and umbrella");
        } else {
            items.push("Umbrella or light raincoat");
        }
    }
    if summary.min_temp < 10.0 {
        items.push("Hat");
    }
    if summary.min_temp < 5.0 {
        items.push("Gloves");
    }
    if summary.min_temp < 0.0 {
        items.push("Scarf");
    }
    if summary.max_temp > 25.0 && !summary.will_rain {
        items.push("Sunglasses and sunscreen");
    }
    if summary.strong_wind && !summary.will_rain {
        items.push("Wind-resistant layer");
    }

    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}

/// Runs every rule against one aggregate scope.
pub fn recommend(summary: &DayWeatherSummary) -> OutfitRecommendation {
    OutfitRecommendation {
        base_layer: base_layer(summary.max_temp),
        mid_layer: mid_layer(summary.min_temp, summary.avg_temp),
        outer_layer: outer_layer(summary.min_apparent_temp, summary.strong_wind),
        lower_body: lower_body(summary.min_temp),
        accessories: accessories(summary),
    }
}
