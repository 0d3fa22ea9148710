use gloo::net::http::Request;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Serialize)]
struct LogRequest {
    level: String,
    message: String,
    component: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Browser console logger, optionally forwarding records to the backend.
#[derive(Clone, Default, PartialEq)]
pub struct Logger {
    endpoint: Option<String>,
}

impl Logger {
    pub fn new(endpoint: Option<String>) -> Self {
        Self { endpoint }
    }

    pub fn debug_with_component(&self, component: &str, message: &str) {
        self.log(LogLevel::Debug, message, Some(component));
    }

    pub fn info_with_component(&self, component: &str, message: &str) {
        self.log(LogLevel::Info, message, Some(component));
    }

    pub fn warn_with_component(&self, component: &str, message: &str) {
        self.log(LogLevel::Warn, message, Some(component));
    }

    pub fn error_with_component(&self, component: &str, message: &str) {
        self.log(LogLevel::Error, message, Some(component));
    }

    fn log(&self, level: LogLevel, message: &str, component: Option<&str>) {
        let line = format_line(level, message, component);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }

        let Some(endpoint) = self.endpoint.clone() else {
            return;
        };
        let request = LogRequest {
            level: level.as_str().to_string(),
            message: message.to_string(),
            component: component.map(str::to_string),
        };

        // Fire and forget; a failed forward must not log again.
        spawn_local(async move {
            if let Ok(request) = Request::post(&endpoint).json(&request) {
                let _ = request.send().await;
            }
        });
    }
}

fn format_line(level: LogLevel, message: &str, component: Option<&str>) -> String {
    match component {
        Some(component) => format!("[{}] {}: {}", level.as_str(), component, message),
        None => format!("[{}] {}", level.as_str(), message),
    }
}
