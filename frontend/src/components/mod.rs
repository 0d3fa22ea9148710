pub mod alert_modal;
pub mod calendar;
pub mod charts;
pub mod due_alerts;
pub mod forms;
pub mod header;
pub mod summary_cards;
pub mod transactions;
