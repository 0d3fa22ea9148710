use std::rc::Rc;

use shared::DueAlert;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UseDueAlertsResult {
    pub alerts: Vec<DueAlert>,
    pub actions: UseDueAlertsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDueAlertsActions {
    pub refresh: Callback<()>,
    pub dismiss: Callback<i64>,
}

#[derive(Debug, Default, PartialEq)]
struct DueAlertList {
    alerts: Vec<DueAlert>,
}

enum DueAlertsAction {
    Replace(Vec<DueAlert>),
    Remove(i64),
}

impl Reducible for DueAlertList {
    type Action = DueAlertsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let alerts = match action {
            DueAlertsAction::Replace(alerts) => alerts,
            DueAlertsAction::Remove(id) => self
                .alerts
                .iter()
                .filter(|alert| alert.id != id)
                .cloned()
                .collect(),
        };
        Rc::new(Self { alerts })
    }
}

#[hook]
pub fn use_due_alerts(api_client: &ApiClient, logger: &Logger) -> UseDueAlertsResult {
    let alerts = use_reducer(DueAlertList::default);

    let refresh = {
        let api_client = api_client.clone();
        let logger = logger.clone();
        let alerts = alerts.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let logger = logger.clone();
            let alerts = alerts.clone();

            spawn_local(async move {
                match api_client.check_alerts().await {
                    Ok(response) => {
                        if response.count > 0 {
                            logger.info_with_component(
                                "DueAlerts",
                                &format!("{} expense(s) due soon", response.count),
                            );
                        }
                        alerts.dispatch(DueAlertsAction::Replace(response.alerts));
                    }
                    Err(e) => {
                        logger.warn_with_component(
                            "DueAlerts",
                            &format!("Failed to check due alerts: {}", e),
                        );
                    }
                }
            });
        })
    };

    let dismiss = {
        let api_client = api_client.clone();
        let logger = logger.clone();
        let alerts = alerts.clone();

        use_callback((), move |id: i64, _| {
            let api_client = api_client.clone();
            let logger = logger.clone();
            let alerts = alerts.clone();

            spawn_local(async move {
                match api_client.dismiss_alert(id).await {
                    Ok(_) => alerts.dispatch(DueAlertsAction::Remove(id)),
                    Err(e) => {
                        logger.error_with_component(
                            "DueAlerts",
                            &format!("Failed to dismiss alert {}: {}", id, e),
                        );
                    }
                }
            });
        })
    };

    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    UseDueAlertsResult {
        alerts: alerts.alerts.clone(),
        actions: UseDueAlertsActions { refresh, dismiss },
    }
}
