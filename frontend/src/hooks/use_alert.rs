use yew::prelude::*;

use crate::components::alert_modal::AlertMessage;

pub struct UseAlertResult {
    pub current: Option<AlertMessage>,
    pub actions: UseAlertActions,
}

#[derive(Clone, PartialEq)]
pub struct UseAlertActions {
    pub show: Callback<AlertMessage>,
    pub close: Callback<()>,
}

/// A single alert slot: showing a new alert replaces the current one.
#[hook]
pub fn use_alert() -> UseAlertResult {
    let current = use_state(|| Option::<AlertMessage>::None);

    let show = {
        let current = current.clone();
        use_callback((), move |message: AlertMessage, _| {
            current.set(Some(message));
        })
    };

    let close = {
        let current = current.clone();
        use_callback((), move |_: (), _| {
            current.set(None);
        })
    };

    UseAlertResult {
        current: (*current).clone(),
        actions: UseAlertActions { show, close },
    }
}
