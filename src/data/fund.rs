use chrono::NaiveDate;
use serde::Deserialize;

/// Envelope the fund API wraps every record in.
#[derive(Debug, Clone, Deserialize)]
pub struct FundResponse {
    pub data: FundRecord,
}

/// Aggregate record describing one fund. Immutable once fetched; a new
/// selection replaces it wholesale.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRecord {
    pub quote: Quote,
    pub ratings: Ratings,
    pub profile: Profile,
    pub portfolio: Portfolio,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub name: String,
    pub market_code: String,
    pub last_price: f64,
    pub last_price_date: NaiveDate,
    pub ongoing_charge: f64,
    pub sector_name: String,
    pub currency: String,
}

impl Quote {
    /// Uppercase initials of the fund name, e.g. "Test Fund" -> "TF".
    pub fn abbreviation(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    /// Analyst star rating, 0..=5.
    pub analyst_rating: u8,
    /// Standardized risk indicator, 1..=10; 0 or missing means no data.
    #[serde(rename = "SRRI", default)]
    pub srri: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub objective: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Asset-class allocation breakdown.
    pub asset: Vec<AssetAllocation>,
    /// Ranked list of the fund's largest positions.
    #[serde(rename = "top10Holdings")]
    pub top10_holdings: Vec<Holding>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    pub name: String,
    pub weighting: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub name: String,
    pub weighting: f64,
}

impl Holding {
    /// First word of the holding name, used as the bar label.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub doc_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
          "data": {
            "quote": {
              "name": "Test Fund",
              "marketCode": "TSTF",
              "lastPrice": 123.45,
              "lastPriceDate": "2026-08-21",
              "ongoingCharge": 0.85,
              "sectorName": "Test Sector",
              "currency": "GBP"
            },
            "ratings": { "analystRating": 4, "SRRI": 6 },
            "profile": { "objective": "Test Objective" },
            "portfolio": {
              "asset": [
                { "name": "Equity", "weighting": 70.5 },
                { "name": "Bond", "weighting": 29.5 }
              ],
              "top10Holdings": [
                { "name": "Acme Industrial Holdings", "weighting": 5.2 },
                { "name": "Globex Corporation", "weighting": 4.8 }
              ]
            },
            "documents": [
              { "id": "doc-1", "url": "http://example.com", "type": "PDF" }
            ]
          }
        }"#
    }

    #[test]
    fn decodes_full_envelope() {
        let resp: FundResponse = serde_json::from_str(sample_json()).unwrap();
        let record = resp.data;
        assert_eq!(record.quote.name, "Test Fund");
        assert_eq!(record.quote.market_code, "TSTF");
        assert_eq!(record.quote.last_price_date, NaiveDate::from_ymd_opt(2026, 8, 21).unwrap());
        assert_eq!(record.ratings.srri, 6);
        assert_eq!(record.ratings.analyst_rating, 4);
        assert_eq!(record.portfolio.top10_holdings.len(), 2);
        assert_eq!(record.documents[0].doc_type, "PDF");
    }

    #[test]
    fn srri_defaults_to_zero_when_absent() {
        let json = r#"{ "analystRating": 3 }"#;
        let ratings: Ratings = serde_json::from_str(json).unwrap();
        assert_eq!(ratings.srri, 0);
    }

    #[test]
    fn abbreviation_takes_word_initials() {
        let resp: FundResponse = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(resp.data.quote.abbreviation(), "TF");
    }

    #[test]
    fn holding_short_name_is_first_word() {
        let holding = Holding {
            name: "Acme Industrial Holdings".to_string(),
            weighting: 5.2,
        };
        assert_eq!(holding.short_name(), "Acme");
    }
}
