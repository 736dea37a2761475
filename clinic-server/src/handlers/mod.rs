pub mod appointments;
pub mod branches;
pub mod employees;
pub mod health;
pub mod inventory;
pub mod patients;
pub mod services;
