use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone, Utc};
use database_layer::{Billing, BillingItem};
use error_common::FormFields;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Who is financially responsible for a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PayerCategory {
    #[serde(rename = "4PS")]
    FourPs,
    #[serde(rename = "POINT OF SERVICE (FINANCIALLY INCAPABLE)")]
    PointOfService,
    #[serde(rename = "LISTAHANAN")]
    Listahanan,
    #[serde(rename = "SELF-EMPLOYED/INDIVIDUAL PAYING")]
    SelfEmployed,
    #[serde(rename = "SENIOR CITIZEN")]
    SeniorCitizen,
    #[serde(rename = "EMPLOYED GOVERNMENT")]
    EmployedGovernment,
    #[serde(rename = "EMPLOYED PRIVATE")]
    EmployedPrivate,
}

impl PayerCategory {
    pub const ALL: [PayerCategory; 7] = [
        PayerCategory::FourPs,
        PayerCategory::PointOfService,
        PayerCategory::Listahanan,
        PayerCategory::SelfEmployed,
        PayerCategory::SeniorCitizen,
        PayerCategory::EmployedGovernment,
        PayerCategory::EmployedPrivate,
    ];

    /// Stored form
    pub fn as_str(&self) -> &'static str {
        match self {
            PayerCategory::FourPs => "4PS",
            PayerCategory::PointOfService => "POINT OF SERVICE (FINANCIALLY INCAPABLE)",
            PayerCategory::Listahanan => "LISTAHANAN",
            PayerCategory::SelfEmployed => "SELF-EMPLOYED/INDIVIDUAL PAYING",
            PayerCategory::SeniorCitizen => "SENIOR CITIZEN",
            PayerCategory::EmployedGovernment => "EMPLOYED GOVERNMENT",
            PayerCategory::EmployedPrivate => "EMPLOYED PRIVATE",
        }
    }
}

impl fmt::Display for PayerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayerCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown user category '{s}'"))
    }
}

/// One selected-service row from the billing form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SelectedService {
    /// Empty when the row was added but no service was picked
    #[serde(default)]
    pub service_id: Option<Uuid>,
}

impl SelectedService {
    pub fn new(service_id: Uuid) -> Self {
        Self { service_id: Some(service_id) }
    }
}

/// Input to [`BillingComposer::compose`](crate::BillingComposer::compose)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRequest {
    pub user_id: Uuid,
    pub for_insurance: bool,
    pub for_aics: bool,
    pub user_category: PayerCategory,
    pub services: Vec<SelectedService>,
}

/// Date and time written on a billing, taken from one clock reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingStamp {
    /// UTC calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock time in the reading's zone, e.g. `9:05 AM`
    pub time: String,
}

impl BillingStamp {
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            date: instant.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
            time: instant.format("%-I:%M %p").to_string(),
        }
    }
}

/// Billing with its items as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComposedBilling {
    pub billing: Billing,
    pub items: Vec<BillingItem>,
    /// Sum of the selected services' prices
    #[schema(value_type = String)]
    pub total: Decimal,
}

/// Service catalogue create/update form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ServiceForm {
    #[validate(length(min = 1, message = "Service name is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "Service description is required."))]
    pub description: String,
    #[schema(value_type = String)]
    pub price: Decimal,
}

impl FormFields for ServiceForm {
    const FIELDS: &'static [&'static str] = &["name", "description", "price"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_payer_category_round_trips_verbatim() {
        for category in PayerCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            assert_eq!(category.as_str().parse::<PayerCategory>().unwrap(), category);
        }
        assert!("senior citizen".parse::<PayerCategory>().is_err());
    }

    #[test]
    fn test_stamp_uses_utc_date_and_local_time() {
        let manila = FixedOffset::east_opt(8 * 3600).unwrap();
        let instant = manila.with_ymd_and_hms(2024, 11, 5, 7, 30, 0).unwrap();

        let stamp = BillingStamp::at(&instant);
        assert_eq!(stamp.date, "2024-11-04");
        assert_eq!(stamp.time, "7:30 AM");

        let afternoon = manila.with_ymd_and_hms(2024, 11, 5, 13, 5, 0).unwrap();
        assert_eq!(BillingStamp::at(&afternoon).time, "1:05 PM");
    }
}
