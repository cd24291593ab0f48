//! AI-assisted ideation: strategy suggestions turned into ideas.

use serde::{Deserialize, Serialize};

/// How open the market looks for an idea. The inverse of its difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketOpportunity {
    High,
    Medium,
    Low,
}

impl MarketOpportunity {
    /// Case-insensitive; unknown difficulties count as medium.
    pub fn from_difficulty(difficulty: &str) -> Self {
        match difficulty.to_ascii_lowercase().as_str() {
            "low" => MarketOpportunity::High,
            "high" => MarketOpportunity::Low,
            _ => MarketOpportunity::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketOpportunity::High => "high",
            MarketOpportunity::Medium => "medium",
            MarketOpportunity::Low => "low",
        }
    }
}

/// `POST /ai/suggest-strategy` body.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestStrategyRequest<'a> {
    pub context: &'a str,
}

/// One entry of the `suggestions` array.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategySuggestion {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact_score: f64,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Impact score reported by the AI service
    pub feasibility: f64,
    pub market_opportunity: MarketOpportunity,
}

impl Idea {
    /// `batch` is shared by every idea of one response; `index` keeps ids unique.
    pub fn from_suggestion(suggestion: StrategySuggestion, batch: i64, index: usize) -> Self {
        Self {
            id: format!("idea_{}_{}", batch, index),
            market_opportunity: MarketOpportunity::from_difficulty(&suggestion.difficulty),
            title: suggestion.title,
            description: suggestion.description,
            feasibility: suggestion.impact_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_maps_inversely() {
        assert_eq!(MarketOpportunity::from_difficulty("low"), MarketOpportunity::High);
        assert_eq!(MarketOpportunity::from_difficulty("Medium"), MarketOpportunity::Medium);
        assert_eq!(MarketOpportunity::from_difficulty("HIGH"), MarketOpportunity::Low);
        assert_eq!(MarketOpportunity::from_difficulty("extreme"), MarketOpportunity::Medium);
        assert_eq!(MarketOpportunity::from_difficulty(""), MarketOpportunity::Medium);
    }

    #[test]
    fn test_idea_serializes_camel_case() {
        let idea = Idea::from_suggestion(
            StrategySuggestion {
                title: "Usage pricing".to_string(),
                description: "Bill per seat".to_string(),
                impact_score: 8.0,
                difficulty: "low".to_string(),
            },
            1_700_000_000_000,
            2,
        );

        let value = serde_json::to_value(&idea).unwrap();
        assert_eq!(value["id"], "idea_1700000000000_2");
        assert_eq!(value["feasibility"], 8.0);
        assert_eq!(value["marketOpportunity"], "high");
    }
}
