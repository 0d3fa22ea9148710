pub mod use_alert;
pub mod use_currency_input;
pub mod use_dashboard;
pub mod use_due_alerts;
pub mod use_submission_guard;
