// Clinic record models
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DatabaseError;

/// A stored record with a primary key
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in not-found messages
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
}

macro_rules! impl_record {
    ($ty:ty, $entity:literal) => {
        impl Record for $ty {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> Uuid {
                self.id
            }
        }
    };
}

/// Registered account owning patient records, appointments and billings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Patient profile attached to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub age: String,
    pub sex: String,
    pub civil_status: String,
    pub next_kin: String,
    pub contact_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Past illness, surgery or medication reported at intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MedicalHistory {
    pub id: Uuid,
    pub user_id: Uuid,
    pub patient_id: Uuid,
    pub illness: String,
    pub post_surgeries: String,
    pub medication: String,
    pub dosage: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post-exposure treatment record: which biologics were given and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Treatment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub patient_id: Uuid,
    pub treatment_date: String,
    pub bite_center: String,
    pub tetanus_toxoid: String,
    pub tetanus_immunoglobulin: String,
    pub tetanus_serum: String,
    pub anti_rabies_serum: String,
    pub chick_embryo_cell_vaccine: String,
    pub verocell_rabies_vaccine: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vital signs taken at intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VitalSign {
    pub id: Uuid,
    pub user_id: Uuid,
    pub patient_id: Uuid,
    /// Degrees Celsius
    pub temperature: f64,
    /// Kilograms
    pub weight: f64,
    pub pulse: i32,
    pub respiration: i32,
    pub blood_pressure: i32,
    pub last_intake: String,
    pub last_output: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Bite or exposure incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Incident {
    pub id: Uuid,
    pub user_id: Uuid,
    pub patient_id: Uuid,
    pub nature_of_incident: String,
    pub date: String,
    pub location: String,
    pub site_of_bite: String,
    pub biting_animal: String,
    pub action_taken: String,
    pub clinical_impression: String,
    /// Exposure category, e.g. `Category II`
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Clinic branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Branch staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: String,
    pub branch_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Billable clinic service (consultation, dose administration, wound care...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vaccine stock record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Inventory {
    pub id: Uuid,
    pub name: String,
    /// Primary on-hand count
    pub stocks: i32,
    /// Safety reserve, drawn down only after stocks run out
    pub buffer: i32,
    /// Cumulative units consumed
    pub consumed: i32,
    pub branch_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inventory {
    pub fn counters(&self) -> InventoryCounters {
        InventoryCounters {
            stocks: self.stocks,
            buffer: self.buffer,
            consumed: self.consumed,
        }
    }
}

/// Snapshot of the three inventory counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryCounters {
    pub stocks: i32,
    pub buffer: i32,
    pub consumed: i32,
}

impl InventoryCounters {
    pub fn apply(self, adjustment: InventoryAdjustment) -> Self {
        Self {
            stocks: self.stocks.saturating_add(adjustment.stocks_delta),
            buffer: self.buffer.saturating_add(adjustment.buffer_delta),
            consumed: self.consumed.saturating_add(adjustment.consumed_delta),
        }
    }
}

/// Signed deltas applied to the inventory counters in one write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryAdjustment {
    pub stocks_delta: i32,
    pub buffer_delta: i32,
    pub consumed_delta: i32,
}

impl InventoryAdjustment {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AppointmentStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "On Going")]
    OnGoing,
    #[serde(rename = "Completed")]
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::OnGoing => "On Going",
            AppointmentStatus::Completed => "Completed",
        }
    }

    /// Position in the Pending -> On Going -> Completed progression
    pub fn rank(&self) -> u8 {
        match self {
            AppointmentStatus::Pending => 0,
            AppointmentStatus::OnGoing => 1,
            AppointmentStatus::Completed => 2,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AppointmentStatus::Pending),
            "On Going" => Ok(AppointmentStatus::OnGoing),
            "Completed" => Ok(AppointmentStatus::Completed),
            other => Err(DatabaseError::InvalidRecord(format!(
                "unknown appointment status '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for AppointmentStatus {
    type Error = DatabaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Scheduled visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    /// Calendar date, e.g. `2024-11-05`
    pub date: String,
    /// Display time, e.g. `9:30 AM`
    pub time: String,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(user_id: Uuid, date: impl Into<String>, time: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            date: date.into(),
            time: time.into(),
            status: AppointmentStatus::Pending,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One billing per settlement event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Billing {
    pub id: Uuid,
    pub date: String,
    pub time: String,
    pub for_insurance: bool,
    pub for_aics: bool,
    /// Payer category, stored verbatim
    pub user_category: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service line on a billing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BillingItem {
    pub id: Uuid,
    pub billing_id: Uuid,
    pub service_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administered dose of one vaccine, quantity stored as given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vaccination {
    pub id: Uuid,
    pub inventory_id: Uuid,
    pub quantity: i32,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_record!(User, "User");
impl_record!(Patient, "Patient");
impl_record!(MedicalHistory, "MedicalHistory");
impl_record!(Treatment, "Treatment");
impl_record!(VitalSign, "VitalSign");
impl_record!(Incident, "Incident");
impl_record!(Branch, "Branch");
impl_record!(Employee, "Employee");
impl_record!(Service, "Service");
impl_record!(Inventory, "Inventory");
impl_record!(Appointment, "Appointment");
impl_record!(Billing, "Billing");
impl_record!(BillingItem, "BillingItem");
impl_record!(Vaccination, "Vaccination");
