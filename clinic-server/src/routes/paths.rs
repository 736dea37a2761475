//! API route path constants
//!
//! Runtime route definitions use these constants. utoipa `#[path(...)]`
//! attributes need string literals, so the handler annotations repeat the
//! full path and must be kept in step with this module.

/// API base path
pub const API_V1: &str = "/api/v1";

pub mod health {
    pub const HEALTH: &str = "/health";
}

pub mod appointments {
    pub const APPOINTMENTS: &str = "/appointments";
    pub const APPOINTMENT_BY_ID: &str = "/appointments/:id";
    pub const SETTLE: &str = "/appointments/:id/settle";
}

pub mod inventory {
    pub const INVENTORY: &str = "/inventory";
    pub const INVENTORY_BY_ID: &str = "/inventory/:id";
    pub const DEDUCT: &str = "/inventory/:id/deduct";
}

pub mod services {
    pub const SERVICES: &str = "/services";
    pub const SERVICE_BY_ID: &str = "/services/:id";
}

pub mod branches {
    pub const BRANCHES: &str = "/branches";
    pub const BRANCH_BY_ID: &str = "/branches/:id";
}

pub mod employees {
    pub const EMPLOYEES: &str = "/employees";
    pub const EMPLOYEE_BY_ID: &str = "/employees/:id";
}

pub mod users {
    pub const USERS: &str = "/users";
}

pub mod patients {
    pub const PATIENTS: &str = "/patients";
    pub const PATIENT_BY_ID: &str = "/patients/:id";
    pub const MEDICAL_HISTORY: &str = "/patients/:id/medical-history";
    pub const VITAL_SIGNS: &str = "/patients/:id/vital-signs";
    pub const INCIDENTS: &str = "/patients/:id/incidents";
    pub const TREATMENTS: &str = "/patients/:id/treatments";
}

pub mod docs {
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}
