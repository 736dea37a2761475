// Standardized error codes returned in API error bodies

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
}

pub mod resource {
    pub const NOT_FOUND: &str = "RESOURCE_2001";
    pub const CONFLICT: &str = "RESOURCE_2002";
}

pub mod business {
    pub const RULE_VIOLATION: &str = "BUSINESS_3001";
    pub const INSUFFICIENT_STOCK: &str = "BUSINESS_3002";
    pub const MALFORMED_BILLING_ITEM: &str = "BUSINESS_3003";
    pub const STATUS_REGRESSION: &str = "BUSINESS_3004";
}

pub mod database {
    pub const CONNECTION_FAILED: &str = "DB_4001";
    pub const QUERY_FAILED: &str = "DB_4002";
    pub const CONSTRAINT_VIOLATION: &str = "DB_4003";
    pub const WRITE_CONFLICT: &str = "DB_4004";
}

pub mod system {
    pub const CONFIGURATION: &str = "SYS_5001";
    pub const SERVER: &str = "SYS_5002";
    pub const INTERNAL: &str = "SYS_5003";
}
