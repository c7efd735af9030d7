use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canned entries offered while a user types a data point
fn suggestions_for(category: &str) -> &'static [&'static str] {
    match category {
        "energy" => &[
            "Electricity consumption: 1500 kWh",
            "Natural gas usage: 500 m³",
            "Renewable energy: 300 kWh",
            "Solar panel output: 200 kWh",
        ],
        "transportation" => &[
            "Fleet fuel consumption: 500 L",
            "Business travel: 1000 km",
            "Logistics distance: 2000 km",
            "Electric vehicle charging: 100 kWh",
        ],
        "waste" => &[
            "General waste: 100 kg",
            "Recyclable materials: 50 kg",
            "Hazardous waste: 10 kg",
            "Compost: 30 kg",
        ],
        "materials" => &[
            "Raw materials: 1000 kg",
            "Packaging: 200 kg",
            "Sustainable materials: 300 kg",
            "Recycled content: 150 kg",
        ],
        _ => &[],
    }
}

/// Missing or empty `text`/`category`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields;

impl std::fmt::Display for MissingFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Missing required fields")
    }
}

impl std::error::Error for MissingFields {}

fn required(field: &Option<String>) -> Result<&str, MissingFields> {
    match field.as_deref() {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(MissingFields),
    }
}

/// POST /api/suggestions body
#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub text: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<&'static str>,
}

/// Case-insensitive substring match against the category's canned list.
/// Unknown categories yield no suggestions.
pub fn suggest(request: &SuggestionRequest) -> Result<SuggestionResponse, MissingFields> {
    let text = required(&request.text)?.to_lowercase();
    let category = required(&request.category)?;

    let suggestions = suggestions_for(category)
        .iter()
        .copied()
        .filter(|s| s.to_lowercase().contains(&text))
        .collect();

    Ok(SuggestionResponse { suggestions })
}

/// POST /api/process-transcript body
#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    pub value: u32,
    pub unit: &'static str,
    pub date: NaiveDate,
    pub notes: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptData {
    pub category: String,
    pub language: Option<String>,
    pub transcript: String,
    pub processed_data: ProcessedData,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub data: TranscriptData,
}

/// Voice-input stub: echoes the transcript back as a fixed 100 kg entry dated
/// today. No speech or language processing happens here.
pub fn process_transcript(request: TranscriptRequest) -> Result<TranscriptResponse, MissingFields> {
    let transcript = required(&request.transcript)?.to_string();
    let category = required(&request.category)?.to_string();

    Ok(TranscriptResponse {
        success: true,
        data: TranscriptData {
            category,
            language: request.language,
            processed_data: ProcessedData {
                value: 100,
                unit: "kg",
                date: Utc::now().date_naive(),
                notes: transcript.clone(),
            },
            transcript,
        },
    })
}
