use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

// snapshot record (one element of the scraper's output array)
//  ├── provider   "HausUndGrund" | "SvenOldoerp" | "Immowelt" | "Immonet" | "MeineStadt"
//  ├── id         stable within a provider
//  ├── title
//  ├── url        absolute link to the expose
//  ├── price      cold rent, EUR
//  ├── size       living area, m²
//  ├── rooms      may be fractional (2.5 rooms)
//  ├── address    nullable
//  └── image      nullable

/// The scrape sites we aggregate. Serialized under exactly the names the
/// scraper emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    HausUndGrund,
    SvenOldoerp,
    Immowelt,
    Immonet,
    MeineStadt,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::HausUndGrund,
        Provider::SvenOldoerp,
        Provider::Immowelt,
        Provider::Immonet,
        Provider::MeineStadt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::HausUndGrund => "HausUndGrund",
            Provider::SvenOldoerp => "SvenOldoerp",
            Provider::Immowelt => "Immowelt",
            Provider::Immonet => "Immonet",
            Provider::MeineStadt => "MeineStadt",
        }
    }

    /// Parse one name from the `providers` query parameter. Unknown names
    /// yield `None`; the caller decides to ignore them (filter policy).
    pub fn parse(name: &str) -> Option<Provider> {
        let name = name.trim();
        Provider::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One canonical listing record as the upstream scraper wrote it.
/// Exactly these nine fields; anything else is a contract violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Listing {
    pub provider: Provider,
    pub id: String,
    pub title: String,
    pub url: String,
    pub price: f64,
    pub size: f64,
    pub rooms: f64,
    pub address: Option<String>,
    pub image: Option<String>,
}

impl Listing {
    /// Field-level checks beyond what serde types give us. Any failure is
    /// treated by the caller as a hard snapshot contract violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.price < 0.0 {
            return Err(format!("negative price {}", self.price));
        }
        if Url::parse(&self.url).is_err() {
            return Err(format!("url is not an absolute link: {:?}", self.url));
        }
        if let Some(image) = &self.image {
            if Url::parse(image).is_err() {
                return Err(format!("image is not an absolute link: {:?}", image));
            }
        }
        Ok(())
    }
}

/// A listing plus the derived price per square meter. This is the shape the
/// query endpoint returns inside the envelope; `squareMeterPrice` is null
/// when the size makes the metric meaningless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedListing {
    pub provider: Provider,
    pub id: String,
    pub title: String,
    pub url: String,
    pub price: f64,
    pub size: f64,
    pub rooms: f64,
    pub address: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "squareMeterPrice")]
    pub square_meter_price: Option<f64>,
}
