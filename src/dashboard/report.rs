use crate::dashboard::catalog::Trend;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// CSV header for the flattened report
pub const CSV_HEADER: &str = "Category,Subcategory,Metric,Value,Unit,Trend,Percentage";

/// `{value, unit, trend, percentage}` leaf of the consolidated report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricLeaf {
    #[serde(serialize_with = "whole_as_integer")]
    pub value: f64,
    pub unit: &'static str,
    pub trend: Trend,
    pub percentage: u32,
}

// 150000.0 goes out as 150000, 1.5 stays 1.5
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Named group of metrics inside a category (e.g. `fleet` under `transportation`)
#[derive(Debug, Clone)]
pub struct ReportGroup {
    pub name: &'static str,
    pub metrics: Vec<(&'static str, MetricLeaf)>,
}

/// Top-level report category. Metrics may sit directly on the category
/// (`energy`) or inside groups.
#[derive(Debug, Clone)]
pub struct ReportCategory {
    pub name: &'static str,
    pub metrics: Vec<(&'static str, MetricLeaf)>,
    pub groups: Vec<ReportGroup>,
}

fn m(name: &'static str, value: f64, unit: &'static str, trend: Trend, percentage: u32) -> (&'static str, MetricLeaf) {
    (
        name,
        MetricLeaf {
            value,
            unit,
            trend,
            percentage,
        },
    )
}

fn group(name: &'static str, metrics: Vec<(&'static str, MetricLeaf)>) -> ReportGroup {
    ReportGroup { name, metrics }
}

fn grouped(name: &'static str, groups: Vec<ReportGroup>) -> ReportCategory {
    ReportCategory {
        name,
        metrics: Vec::new(),
        groups,
    }
}

/// Progress of the three tracked improvement initiatives, keyed "0".."2"
fn initiatives() -> Vec<(&'static str, MetricLeaf)> {
    vec![
        m("0", 85.0, "%", Trend::Up, 5),
        m("1", 92.0, "%", Trend::Up, 8),
        m("2", 78.0, "%", Trend::Up, 3),
    ]
}

/// The consolidated sustainability report, in presentation order
pub fn report_sections() -> Vec<ReportCategory> {
    use Trend::{Down, Up};

    vec![
        ReportCategory {
            name: "energy",
            metrics: vec![
                m("electricity", 150000.0, "kWh", Down, 12),
                m("gas", 75000.0, "m³", Down, 8),
                m("renewable", 45000.0, "kWh", Up, 25),
            ],
            groups: Vec::new(),
        },
        grouped(
            "transportation",
            vec![
                group(
                    "fleet",
                    vec![
                        m("total_vehicles", 50.0, "vehicles", Up, 5),
                        m("electric_vehicles", 15.0, "vehicles", Up, 20),
                        m("fuel_efficiency", 85.0, "%", Up, 8),
                    ],
                ),
                group(
                    "business_travel",
                    vec![
                        m("air_travel", 25000.0, "km", Down, 15),
                        m("rail_travel", 15000.0, "km", Up, 10),
                        m("road_travel", 35000.0, "km", Down, 12),
                    ],
                ),
                group(
                    "logistics",
                    vec![
                        m("shipping_distance", 100000.0, "km", Down, 8),
                        m("fuel_consumption", 45000.0, "liters", Down, 10),
                        m("route_optimization", 92.0, "%", Up, 5),
                    ],
                ),
            ],
        ),
        grouped(
            "waste",
            vec![
                group(
                    "generation",
                    vec![
                        m("total_waste", 50000.0, "kg", Down, 10),
                        m("hazardous_waste", 5000.0, "kg", Down, 15),
                        m("non_hazardous_waste", 45000.0, "kg", Down, 8),
                    ],
                ),
                group(
                    "recycling",
                    vec![
                        m("recycling_rate", 65.0, "%", Up, 5),
                        m("recycled_materials", 32500.0, "kg", Up, 8),
                        m("composting_rate", 25.0, "%", Up, 12),
                    ],
                ),
                group(
                    "disposal",
                    vec![
                        m("landfill", 17500.0, "kg", Down, 15),
                        m("incineration", 5000.0, "kg", Down, 10),
                        m("other_methods", 2500.0, "kg", Down, 8),
                    ],
                ),
            ],
        ),
        grouped(
            "materials",
            vec![
                group(
                    "raw_materials",
                    vec![
                        m("steel", 25000.0, "kg", Down, 5),
                        m("plastic", 15000.0, "kg", Down, 8),
                        m("paper", 10000.0, "kg", Down, 12),
                    ],
                ),
                group(
                    "sustainable_materials",
                    vec![
                        m("recycled_steel", 12500.0, "kg", Up, 15),
                        m("bioplastic", 7500.0, "kg", Up, 20),
                        m("recycled_paper", 5000.0, "kg", Up, 18),
                    ],
                ),
                group(
                    "sourcing",
                    vec![
                        m("local_suppliers", 65.0, "%", Up, 65),
                        m("international_suppliers", 35.0, "%", Down, 35),
                    ],
                ),
            ],
        ),
        grouped(
            "production",
            vec![
                group(
                    "manufacturing",
                    vec![
                        m("energy_intensity", 85.0, "kWh/unit", Down, 10),
                        m("process_emissions", 25000.0, "kg CO2e", Down, 8),
                        m("automation_level", 75.0, "%", Up, 5),
                    ],
                ),
                group(
                    "efficiency_metrics",
                    vec![
                        m("material_efficiency", 92.0, "%", Up, 3),
                        m("energy_efficiency", 88.0, "%", Up, 4),
                        m("waste_reduction", 78.0, "%", Up, 6),
                    ],
                ),
                group("process_improvements", initiatives()),
            ],
        ),
        grouped(
            "water",
            vec![
                group(
                    "consumption",
                    vec![
                        m("total_usage", 150000.0, "m³", Down, 8),
                        m("recycled_water", 45000.0, "m³", Up, 15),
                        m("water_efficiency", 85.0, "%", Up, 5),
                    ],
                ),
                group(
                    "wastewater",
                    vec![
                        m("treatment_efficiency", 92.0, "%", Up, 3),
                        m("discharge_quality", 95.0, "%", Up, 2),
                        m("recycling_rate", 78.0, "%", Up, 6),
                    ],
                ),
                group("conservation_measures", initiatives()),
            ],
        ),
        grouped(
            "digital",
            vec![
                group(
                    "data_centers",
                    vec![
                        m("energy_consumption", 85000.0, "kWh", Down, 12),
                        m("pue_ratio", 1.5, "", Down, 8),
                        m("renewable_energy", 65.0, "%", Up, 15),
                    ],
                ),
                group(
                    "it_equipment",
                    vec![
                        m("server_efficiency", 92.0, "%", Up, 5),
                        m("storage_efficiency", 88.0, "%", Up, 4),
                        m("network_efficiency", 85.0, "%", Up, 3),
                    ],
                ),
                group("optimization_measures", initiatives()),
            ],
        ),
    ]
}

fn metrics_object(metrics: &[(&'static str, MetricLeaf)]) -> Map<String, Value> {
    metrics
        .iter()
        .map(|(name, leaf)| {
            let value = serde_json::to_value(leaf).unwrap_or(Value::Null);
            (name.to_string(), value)
        })
        .collect()
}

/// Report as JSON: category → (group →)? metric → leaf
pub fn report_document() -> Value {
    let mut root = Map::new();

    for category in report_sections() {
        let mut body = metrics_object(&category.metrics);
        for group in &category.groups {
            body.insert(group.name.to_string(), Value::Object(metrics_object(&group.metrics)));
        }
        root.insert(category.name.to_string(), Value::Object(body));
    }

    Value::Object(root)
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn csv_row(category: &str, group: &str, metric: &str, leaf: &MetricLeaf) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        csv_field(category),
        csv_field(group),
        csv_field(metric),
        leaf.value,
        csv_field(leaf.unit),
        leaf.trend.as_str(),
        leaf.percentage
    )
}

/// Flatten the report into CSV, one row per metric leaf.
/// Metrics sitting directly on a category get an empty subcategory.
pub fn report_csv(sections: &[ReportCategory]) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];

    for category in sections {
        for (metric, leaf) in &category.metrics {
            lines.push(csv_row(category.name, "", metric, leaf));
        }
        for group in &category.groups {
            for (metric, leaf) in &group.metrics {
                lines.push(csv_row(category.name, group.name, metric, leaf));
            }
        }
    }

    lines.join("\n")
}
