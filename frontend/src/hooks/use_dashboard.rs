use shared::{DashboardData, MonthYear};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub const LOAD_ERROR_MESSAGE: &str =
    "Não foi possível carregar os dados do dashboard. Tente novamente mais tarde.";

#[derive(Clone, PartialEq)]
pub struct DashboardState {
    pub period: MonthYear,
    pub data: Option<DashboardData>,
    pub loading: bool,
}

impl DashboardState {
    /// The `MM/YYYY` label, preferring what the backend reported.
    pub fn period_label(&self) -> String {
        self.data
            .as_ref()
            .map(|data| data.current_month_year.clone())
            .filter(|label| MonthYear::parse(label).is_some())
            .unwrap_or_else(|| self.period.label())
    }
}

pub struct UseDashboardResult {
    pub state: DashboardState,
    pub actions: UseDashboardActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDashboardActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub go_to: Callback<MonthYear>,
    /// Reload the month currently on screen.
    pub reload: Callback<()>,
}

#[hook]
pub fn use_dashboard(
    api_client: &ApiClient,
    logger: &Logger,
    initial: MonthYear,
    on_error: Callback<String>,
) -> UseDashboardResult {
    let period = use_state(|| initial);
    let data = use_state(|| Option::<DashboardData>::None);
    let loading = use_state(|| true);
    // Only the newest request may update the screen.
    let latest_request = use_mut_ref(|| 0u64);

    let load = {
        let api_client = api_client.clone();
        let logger = logger.clone();
        let data = data.clone();
        let loading = loading.clone();
        let latest_request = latest_request.clone();

        use_callback((), move |period: MonthYear, _| {
            let api_client = api_client.clone();
            let logger = logger.clone();
            let data = data.clone();
            let loading = loading.clone();
            let on_error = on_error.clone();
            let latest_request = latest_request.clone();

            let request_id = {
                let mut latest = latest_request.borrow_mut();
                *latest += 1;
                *latest
            };

            spawn_local(async move {
                loading.set(true);
                logger.debug_with_component(
                    "Dashboard",
                    &format!("Loading dashboard for {}", period.label()),
                );

                let result = api_client.get_dashboard_data(period).await;
                if *latest_request.borrow() != request_id {
                    return;
                }

                match result {
                    Ok(dashboard) => data.set(Some(dashboard)),
                    Err(e) => {
                        logger.error_with_component(
                            "Dashboard",
                            &format!("Failed to load dashboard data: {}", e),
                        );
                        on_error.emit(LOAD_ERROR_MESSAGE.to_string());
                    }
                }
                loading.set(false);
            });
        })
    };

    let prev_month = {
        let period = period.clone();
        use_callback(*period, move |_: MouseEvent, current| {
            period.set(current.previous());
        })
    };

    let next_month = {
        let period = period.clone();
        use_callback(*period, move |_: MouseEvent, current| {
            period.set(current.next());
        })
    };

    let go_to = {
        let period = period.clone();
        let load = load.clone();
        use_callback(*period, move |target: MonthYear, current| {
            if target == *current {
                // Same month picked again: no state change, so reload by hand.
                load.emit(target);
            } else {
                period.set(target);
            }
        })
    };

    let reload = {
        let load = load.clone();
        use_callback(*period, move |_: (), current| {
            load.emit(*current);
        })
    };

    use_effect_with(*period, {
        let load = load.clone();
        move |period| {
            load.emit(*period);
            || ()
        }
    });

    let state = DashboardState {
        period: *period,
        data: (*data).clone(),
        loading: *loading,
    };

    let actions = UseDashboardActions {
        prev_month,
        next_month,
        go_to,
        reload,
    };

    UseDashboardResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_label(label: &str) -> DashboardState {
        DashboardState {
            period: MonthYear::new(9, 2024).unwrap(),
            data: Some(DashboardData {
                current_month_year: label.to_string(),
                ..Default::default()
            }),
            loading: false,
        }
    }

    #[test]
    fn test_period_label_prefers_backend_label() {
        assert_eq!(state_with_label("10/2024").period_label(), "10/2024");
    }

    #[test]
    fn test_period_label_falls_back_to_period() {
        assert_eq!(state_with_label("").period_label(), "09/2024");
        let empty = DashboardState {
            period: MonthYear::new(1, 2025).unwrap(),
            data: None,
            loading: true,
        };
        assert_eq!(empty.period_label(), "01/2025");
    }
}
