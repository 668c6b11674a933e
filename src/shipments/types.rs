use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transport mode for a shipment. Exactly two values exist; rows carrying
/// anything else are normalized to no mode at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Air,
    Ocean,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Air => "air",
            TransportMode::Ocean => "ocean",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "air" => Some(TransportMode::Air),
            "ocean" => Some(TransportMode::Ocean),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One normalized trade-shipment row as exposed to callers.
///
/// Every field is always present in serialized output; absent store columns
/// surface as null rather than disappearing, so callers are insulated from
/// store schema drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: String,
    pub mode: Option<TransportMode>,
    pub shipment_date: Option<NaiveDate>,
    pub company_name: String,
    pub origin_country: Option<String>,
    pub destination_country: Option<String>,
    pub destination_city: Option<String>,
    pub hs_code: Option<String>,
    pub carrier: Option<String>,
    pub value_usd: Option<f64>,
    pub weight_kg: Option<f64>,
    pub description: Option<String>,
    pub commodity_description: Option<String>,
    #[serde(default)]
    pub is_likely_air_shipper: bool,
}

/// A company row from the store. Shipments associate to companies by name
/// only; the link is loose and not enforced at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub industry: Option<String>,
}

/// Store-wide statistics for the admin surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_shipments: u64,
    pub air_shipments: u64,
    pub ocean_shipments: u64,
    pub total_companies: u64,
    pub latest_shipment_date: Option<NaiveDate>,
}
