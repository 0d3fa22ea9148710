pub mod category_chart;
pub mod chart_handle;
pub mod income_expense_chart;

pub use category_chart::CategoryChart;
pub use income_expense_chart::IncomeExpenseChart;
