use gloo::timers::callback::Timeout;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Error,
    Confirm,
}

impl AlertKind {
    fn css_class(&self) -> &'static str {
        match self {
            AlertKind::Info => "alert-modal info",
            AlertKind::Success => "alert-modal success",
            AlertKind::Error => "alert-modal error",
            AlertKind::Confirm => "alert-modal confirm",
        }
    }
}

/// What the alert modal shows.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub kind: AlertKind,
    pub title: String,
    pub text: String,
    pub auto_dismiss_ms: Option<u32>,
    pub confirm_label: String,
    pub cancel_label: Option<String>,
}

impl AlertMessage {
    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            title: title.into(),
            text: text.into(),
            auto_dismiss_ms: None,
            confirm_label: "Fechar".to_string(),
            cancel_label: None,
        }
    }

    /// Success alerts close themselves and show no button.
    pub fn success(title: impl Into<String>, text: impl Into<String>, dismiss_after_ms: u32) -> Self {
        Self {
            kind: AlertKind::Success,
            title: title.into(),
            text: text.into(),
            auto_dismiss_ms: Some(dismiss_after_ms),
            confirm_label: String::new(),
            cancel_label: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: "Erro".to_string(),
            text: text.into(),
            auto_dismiss_ms: None,
            confirm_label: "OK".to_string(),
            cancel_label: None,
        }
    }

    pub fn confirm(
        title: impl Into<String>,
        text: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        Self {
            kind: AlertKind::Confirm,
            title: title.into(),
            text: text.into(),
            auto_dismiss_ms: None,
            confirm_label: confirm_label.into(),
            cancel_label: Some("Cancelar".to_string()),
        }
    }

    pub fn shows_buttons(&self) -> bool {
        !self.confirm_label.is_empty()
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertModalProps {
    pub message: Option<AlertMessage>,
    pub on_close: Callback<()>,
    /// Fired when a confirm alert is accepted.
    #[prop_or_default]
    pub on_confirm: Callback<()>,
}

#[function_component(AlertModal)]
pub fn alert_modal(props: &AlertModalProps) -> Html {
    // Auto-dismiss timer; dropping the Timeout cancels it.
    use_effect_with(props.message.clone(), {
        let on_close = props.on_close.clone();
        move |message| {
            let timeout = message
                .as_ref()
                .and_then(|message| message.auto_dismiss_ms)
                .map(|ms| Timeout::new(ms, move || on_close.emit(())));
            move || drop(timeout)
        }
    });

    let Some(message) = props.message.as_ref() else {
        return html! {};
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let kind = message.kind;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if kind != AlertKind::Confirm {
                on_close.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_accept = {
        let on_close = props.on_close.clone();
        let on_confirm = props.on_confirm.clone();
        let kind = message.kind;
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
            if kind == AlertKind::Confirm {
                on_confirm.emit(());
            }
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="alert-modal-backdrop" onclick={on_backdrop_click}>
            <div class={message.kind.css_class()} onclick={on_modal_click} role="dialog">
                <h3 class="alert-title">{&message.title}</h3>
                {if message.text.is_empty() {
                    html! {}
                } else {
                    html! { <p class="alert-text">{&message.text}</p> }
                }}
                {if message.shows_buttons() {
                    html! {
                        <div class="alert-buttons">
                            <button type="button" class="btn btn-primary" onclick={on_accept}>
                                {&message.confirm_label}
                            </button>
                            {if let Some(cancel) = &message.cancel_label {
                                html! {
                                    <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                                        {cancel}
                                    </button>
                                }
                            } else {
                                html! {}
                            }}
                        </div>
                    }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_alert_dismisses_itself() {
        let alert = AlertMessage::success("Sucesso", "Transação adicionada com sucesso!", 2000);
        assert_eq!(alert.auto_dismiss_ms, Some(2000));
        assert!(!alert.shows_buttons());
    }

    #[test]
    fn test_confirm_alert_offers_cancel() {
        let alert = AlertMessage::confirm("Tem certeza?", "Esta ação não pode ser desfeita!", "Sim, excluir!");
        assert_eq!(alert.kind, AlertKind::Confirm);
        assert_eq!(alert.cancel_label.as_deref(), Some("Cancelar"));
        assert!(alert.auto_dismiss_ms.is_none());
    }

    #[test]
    fn test_error_alert() {
        let alert = AlertMessage::error("Erro ao adicionar transação");
        assert_eq!(alert.title, "Erro");
        assert!(alert.shows_buttons());
    }
}
