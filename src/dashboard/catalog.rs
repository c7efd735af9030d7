use serde::Serialize;
use serde_json::{json, Value};
use Trend::{Down, Up};

/// Direction a metric moved over the reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
        }
    }
}

/// Dashboard categories served under `/api/<slug>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Emissions,
    Transportation,
    Waste,
    Materials,
    Production,
    Water,
    Digital,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Emissions,
        Category::Transportation,
        Category::Waste,
        Category::Materials,
        Category::Production,
        Category::Water,
        Category::Digital,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Emissions => "emissions",
            Category::Transportation => "transportation",
            Category::Waste => "waste",
            Category::Materials => "materials",
            Category::Production => "production",
            Category::Water => "water",
            Category::Digital => "digital",
        }
    }

    /// Fixed metrics document for this category
    pub fn document(&self) -> Value {
        match self {
            Category::Emissions => emissions(),
            Category::Transportation => transportation(),
            Category::Waste => waste(),
            Category::Materials => materials(),
            Category::Production => production(),
            Category::Water => water(),
            Category::Digital => digital(),
        }
    }
}

fn leaf(value: impl Into<Value>, unit: &str, trend: Trend, percentage: u32) -> Value {
    json!({
        "value": value.into(),
        "unit": unit,
        "trend": trend,
        "percentage": percentage,
    })
}

fn measure(name: &str, impact: &str, status: &str, savings: &str) -> Value {
    json!({
        "name": name,
        "impact": impact,
        "status": status,
        "savings": savings,
    })
}

fn emissions() -> Value {
    json!({
        "energy": {
            "electricity": [120, 130, 110, 100, 90, 95],
            "gas": [80, 85, 88, 70, 65, 60],
            "renewable": [30, 40, 35, 20, 15, 10],
        },
        "transportation": {
            "fleet": [50, 55, 58, 45, 40, 35],
            "business_travel": [30, 35, 38, 25, 20, 15],
            "logistics": [20, 25, 28, 15, 10, 5],
        },
        "waste": {
            "general": [30, 40, 35, 20, 15, 10],
            "hazardous": [10, 15, 12, 8, 5, 3],
            "recyclable": [20, 25, 22, 15, 10, 8],
        },
        "materials": {
            "raw_materials": [40, 45, 42, 35, 30, 25],
            "packaging": [25, 30, 28, 20, 15, 12],
            "supplies": [15, 20, 18, 12, 10, 8],
        },
        "labor": {
            "office": [20, 25, 22, 18, 15, 12],
            "production": [35, 40, 38, 30, 25, 20],
            "maintenance": [15, 20, 18, 12, 10, 8],
        },
        "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
    })
}

fn transportation() -> Value {
    json!({
        "fleet": {
            "total_vehicles": leaf(50, "vehicles", Up, 5),
            "electric_vehicles": leaf(15, "vehicles", Up, 20),
            "fuel_efficiency": leaf(85, "%", Up, 8),
        },
        "business_travel": {
            "air_travel": leaf(25000, "km", Down, 15),
            "rail_travel": leaf(15000, "km", Up, 10),
            "road_travel": leaf(35000, "km", Down, 12),
        },
        "logistics": {
            "shipping_distance": leaf(100000, "km", Down, 8),
            "fuel_consumption": leaf(45000, "liters", Down, 10),
            "route_optimization": leaf(92, "%", Up, 5),
        },
    })
}

fn waste() -> Value {
    json!({
        "generation": {
            "total_waste": leaf(50000, "kg", Down, 10),
            "hazardous_waste": leaf(5000, "kg", Down, 15),
            "non_hazardous_waste": leaf(45000, "kg", Down, 8),
        },
        "recycling": {
            "recycling_rate": leaf(65, "%", Up, 5),
            "recycled_materials": leaf(32500, "kg", Up, 8),
            "composting_rate": leaf(25, "%", Up, 12),
        },
        "disposal": {
            "landfill": leaf(17500, "kg", Down, 15),
            "incineration": leaf(5000, "kg", Down, 10),
            "other_methods": leaf(2500, "kg", Down, 8),
        },
    })
}

fn material(usage: u32, carbon_intensity: f64, trend: Trend, percentage: u32) -> Value {
    json!({
        "usage": usage,
        "unit": "kg",
        "carbon_intensity": carbon_intensity,
        "trend": trend,
        "percentage": percentage,
    })
}

fn materials() -> Value {
    json!({
        "raw_materials": {
            "steel": material(50000, 1.8, Down, 5),
            "plastic": material(30000, 2.5, Down, 8),
            "paper": material(20000, 0.8, Down, 12),
        },
        "sustainable_materials": {
            "recycled_steel": material(15000, 0.9, Up, 15),
            "bioplastic": material(8000, 1.2, Up, 20),
            "recycled_paper": material(12000, 0.4, Up, 18),
        },
        "sourcing": {
            "local_suppliers": { "percentage": 65, "trend": Up, "change": 5 },
            "international_suppliers": { "percentage": 35, "trend": Down, "change": 5 },
        },
    })
}

fn production() -> Value {
    json!({
        "manufacturing": {
            "energy_intensity": leaf(85, "kWh/unit", Down, 10),
            "process_emissions": leaf(25000, "kg CO2e", Down, 8),
            "automation_level": leaf(75, "%", Up, 5),
        },
        "efficiency_metrics": {
            "material_efficiency": leaf(92, "%", Up, 3),
            "energy_efficiency": leaf(88, "%", Up, 4),
            "waste_reduction": leaf(78, "%", Up, 6),
        },
        "process_improvements": [
            measure("Automated Quality Control", "High", "Implemented", "15% energy reduction"),
            measure("Smart Manufacturing", "Medium", "In Progress", "10% process optimization"),
            measure("Waste Heat Recovery", "High", "Planned", "20% energy recovery"),
        ],
    })
}

fn water() -> Value {
    json!({
        "consumption": {
            "total_usage": leaf(150000, "m³", Down, 8),
            "recycled_water": leaf(45000, "m³", Up, 15),
            "water_efficiency": leaf(85, "%", Up, 5),
        },
        "wastewater": {
            "treatment_efficiency": leaf(92, "%", Up, 3),
            "discharge_quality": leaf(95, "%", Up, 2),
            "recycling_rate": leaf(78, "%", Up, 6),
        },
        "conservation_measures": [
            measure("Rainwater Harvesting", "High", "Implemented", "20% water reduction"),
            measure("Water Recycling System", "High", "In Progress", "30% water reuse"),
            measure("Smart Irrigation", "Medium", "Planned", "15% water savings"),
        ],
    })
}

fn digital() -> Value {
    json!({
        "data_centers": {
            "energy_consumption": leaf(85000, "kWh", Down, 12),
            "pue_ratio": leaf(1.5, "", Down, 8),
            "renewable_energy": leaf(65, "%", Up, 15),
        },
        "it_equipment": {
            "server_efficiency": leaf(92, "%", Up, 5),
            "storage_efficiency": leaf(88, "%", Up, 4),
            "network_efficiency": leaf(85, "%", Up, 3),
        },
        "optimization_measures": [
            measure("Server Virtualization", "High", "Implemented", "30% energy reduction"),
            measure("Cloud Migration", "High", "In Progress", "25% infrastructure costs"),
            measure("Energy-Efficient Cooling", "Medium", "Planned", "20% cooling costs"),
        ],
    })
}

/// Insights, sustainability index (0-100) and recent alerts
pub fn insights() -> Value {
    json!({
        "current_insights": [
            {
                "category": "Energy",
                "insight": "Electricity consumption has increased by 15% in the last month",
                "impact": "High",
                "recommendation": "Consider implementing energy-efficient lighting and HVAC systems",
            },
            {
                "category": "Transportation",
                "insight": "Fleet emissions are above target by 20%",
                "impact": "Medium",
                "recommendation": "Optimize delivery routes and consider electric vehicle adoption",
            },
            {
                "category": "Waste",
                "insight": "Recycling rate has improved by 25%",
                "impact": "Positive",
                "recommendation": "Continue current waste management practices",
            },
        ],
        "sustainability_index": 75,
        "alerts": [
            {
                "type": "warning",
                "message": "Energy consumption threshold exceeded",
                "timestamp": "2024-03-15T10:00:00Z",
            },
            {
                "type": "success",
                "message": "Monthly reduction target achieved",
                "timestamp": "2024-03-14T15:30:00Z",
            },
        ],
    })
}
