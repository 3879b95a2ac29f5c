pub mod pricing_service;
pub mod records_service;
pub mod session_store;
pub mod wizard_service;
