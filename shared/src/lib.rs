//! Platform-independent pieces of the expense dashboard client.

pub mod calendar;
pub mod config;
pub mod currency;
pub mod currency_field;
pub mod error;
pub mod models;
pub mod widget_slot;

pub use calendar::{format_date_br, CalendarCell, CalendarChip, CalendarGrid, MonthYear};
pub use config::DashboardConfig;
pub use currency::{to_canonical, to_display, to_editable, AmountInput, ZERO_DISPLAY};
pub use currency_field::{
    filter_live_input, CurrencyField, CurrencyInputs, FieldState, FilteredInput, TextInput,
};
pub use error::{ApiError, ConfigError};
pub use models::{
    ActionResponse, AlertsResponse, CalendarEvent, Category, CategoryTotal, DashboardData,
    DueAlert, FormValidationError, RecurrenceFrequency, TransactionDetail, TransactionForm,
    TransactionKind, TransactionLookupResponse, TransactionRow,
};
pub use widget_slot::{Widget, WidgetSlot};
