pub mod api;
pub mod currency_binding;
pub mod date_utils;
pub mod logging;
