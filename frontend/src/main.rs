mod components;
mod hooks;
mod services;

use std::rc::Rc;

use anyhow::Context as _;
use shared::{CalendarChip, DashboardConfig};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::alert_modal::{AlertModal, AlertMessage};
use components::calendar::Calendar;
use components::charts::{CategoryChart, IncomeExpenseChart};
use components::due_alerts::DueAlerts;
use components::forms::{EditTransactionModal, NewTransactionForm};
use components::header::Header;
use components::summary_cards::SummaryCards;
use components::transactions::TransactionTable;
use hooks::use_alert::use_alert;
use hooks::use_dashboard::use_dashboard;
use hooks::use_due_alerts::use_due_alerts;
use services::api::ApiClient;
use services::currency_binding::CurrencyInputBinder;
use services::date_utils::current_month_year;
use services::logging::Logger;

const COMPONENT: &str = "app";
const DEFAULT_CONFIG: &str = include_str!("../assets/config/default.json");

fn load_config() -> anyhow::Result<DashboardConfig> {
    DashboardConfig::from_json(DEFAULT_CONFIG).context("bundled dashboard config is invalid")
}

/// Shared by every component through a `ContextProvider`.
#[derive(Clone)]
pub struct AppServices {
    pub api: ApiClient,
    pub logger: Logger,
    pub config: Rc<DashboardConfig>,
    pub binder: Rc<CurrencyInputBinder>,
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        self.api == other.api
            && self.logger == other.logger
            && Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.binder, &other.binder)
    }
}

impl AppServices {
    fn init() -> Self {
        let (config, load_error) = match load_config() {
            Ok(config) => (config, None),
            Err(error) => (DashboardConfig::default(), Some(format!("{:#}", error))),
        };
        let logger = Logger::new(config.log_endpoint.as_ref().map(|path| config.endpoint(path)));
        if let Some(error) = load_error {
            logger.error_with_component(COMPONENT, &format!("{}; using defaults", error));
        }

        Self {
            api: ApiClient::from_config(&config),
            logger,
            config: Rc::new(config),
            binder: Rc::new(CurrencyInputBinder::new()),
        }
    }
}

/// Row action waiting for the user to confirm it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PendingAction {
    Delete(i64),
    MarkPaid(i64),
}

impl PendingAction {
    fn confirmation(&self) -> AlertMessage {
        match self {
            PendingAction::Delete(_) => AlertMessage::confirm(
                "Tem certeza?",
                "Esta ação não pode ser desfeita!",
                "Sim, excluir!",
            ),
            PendingAction::MarkPaid(_) => AlertMessage::confirm(
                "Marcar como pago?",
                "Esta despesa será marcada como paga.",
                "Sim, marcar!",
            ),
        }
    }

    fn success_text(&self) -> &'static str {
        match self {
            PendingAction::Delete(_) => "Transação excluída com sucesso!",
            PendingAction::MarkPaid(_) => "Despesa marcada como paga!",
        }
    }

    fn failure_text(&self) -> &'static str {
        match self {
            PendingAction::Delete(_) => "Erro ao excluir transação",
            PendingAction::MarkPaid(_) => "Erro ao marcar como pago",
        }
    }
}

fn chip_alert(chip: &CalendarChip) -> AlertMessage {
    AlertMessage::info(
        chip.title.clone(),
        format!("Data: {}", chip.date.format("%d/%m/%Y")),
    )
}

#[function_component(App)]
fn app() -> Html {
    let services = use_memo((), |_| AppServices::init());
    let services = (*services).clone();

    let alert = use_alert();
    let show_error = {
        let show = alert.actions.show.clone();
        use_callback((), move |text: String, _| show.emit(AlertMessage::error(text)))
    };

    let dashboard = use_dashboard(
        &services.api,
        &services.logger,
        current_month_year(),
        show_error.clone(),
    );
    let due_alerts = use_due_alerts(&services.api, &services.logger);
    let editing = use_state(|| Option::<i64>::None);
    let pending = use_mut_ref(|| Option::<PendingAction>::None);

    // Bind any configured amount fields rendered since the last load.
    {
        let services = services.clone();
        use_effect_with(dashboard.state.loading, move |loading| {
            if !*loading {
                let bound = services.binder.attach_ids(&services.config.currency_field_ids);
                services.logger.debug_with_component(
                    COMPONENT,
                    &format!(
                        "{} new currency field(s) bound, {} total",
                        bound,
                        services.binder.attached_count()
                    ),
                );
            }
            || ()
        });
    }

    let after_change = {
        let show = alert.actions.show.clone();
        let reload = dashboard.actions.reload.clone();
        let refresh_alerts = due_alerts.actions.refresh.clone();
        let dismiss_ms = services.config.success_alert_ms;
        Callback::from(move |message: String| {
            show.emit(AlertMessage::success("Sucesso!", message, dismiss_ms));
            reload.emit(());
            refresh_alerts.emit(());
        })
    };

    let on_edit_saved = {
        let editing = editing.clone();
        let after_change = after_change.clone();
        Callback::from(move |message: String| {
            editing.set(None);
            after_change.emit(message);
        })
    };

    let on_edit = {
        let editing = editing.clone();
        Callback::from(move |id: i64| editing.set(Some(id)))
    };

    let on_edit_close = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let request_confirmation = {
        let pending = pending.clone();
        let show = alert.actions.show.clone();
        move |action: PendingAction| {
            *pending.borrow_mut() = Some(action);
            show.emit(action.confirmation());
        }
    };
    let on_delete = {
        let request_confirmation = request_confirmation.clone();
        Callback::from(move |id: i64| request_confirmation(PendingAction::Delete(id)))
    };
    let on_mark_paid = Callback::from(move |id: i64| request_confirmation(PendingAction::MarkPaid(id)));

    let on_confirm = {
        let services = services.clone();
        let pending = pending.clone();
        let after_change = after_change.clone();
        let show_error = show_error.clone();
        Callback::from(move |_: ()| {
            let Some(action) = pending.borrow_mut().take() else {
                return;
            };
            let services = services.clone();
            let after_change = after_change.clone();
            let show_error = show_error.clone();
            spawn_local(async move {
                let result = match action {
                    PendingAction::Delete(id) => services.api.delete_transaction(id).await,
                    PendingAction::MarkPaid(id) => services.api.mark_paid(id).await,
                };
                match result {
                    Ok(response) => after_change.emit(response.message_or(action.success_text())),
                    Err(error) => {
                        services.logger.error_with_component(
                            COMPONENT,
                            &format!("{:?} failed: {}", action, error),
                        );
                        show_error.emit(error.user_message(action.failure_text()));
                    }
                }
            });
        })
    };

    let on_chip_click = {
        let show = alert.actions.show.clone();
        Callback::from(move |chip: CalendarChip| show.emit(chip_alert(&chip)))
    };

    let state = &dashboard.state;
    let data = state.data.clone().unwrap_or_default();

    html! {
        <ContextProvider<AppServices> context={services.clone()}>
            <div class="dashboard">
                <Header
                    period={state.period}
                    period_label={state.period_label()}
                    on_prev={dashboard.actions.prev_month.clone()}
                    on_next={dashboard.actions.next_month.clone()}
                    on_select={dashboard.actions.go_to.clone()}
                />

                <DueAlerts
                    alerts={due_alerts.alerts.clone()}
                    on_dismiss={due_alerts.actions.dismiss.clone()}
                />

                <SummaryCards data={state.data.clone()} loading={state.loading} />

                <div class="charts-row">
                    <IncomeExpenseChart receitas={data.total_receitas} despesas={data.total_despesas} />
                    <CategoryChart totals={data.despesas_por_categoria.clone()} />
                </div>

                <div class="dashboard-row">
                    <NewTransactionForm
                        categories={data.categorias.clone()}
                        on_saved={after_change}
                        on_error={show_error.clone()}
                    />
                    <Calendar
                        period={state.period}
                        events={data.calendar_events.clone()}
                        {on_chip_click}
                    />
                </div>

                <TransactionTable
                    transactions={data.transactions.clone()}
                    loading={state.loading}
                    {on_edit}
                    {on_delete}
                    {on_mark_paid}
                />

                <EditTransactionModal
                    transaction_id={*editing}
                    categories={data.categorias.clone()}
                    on_close={on_edit_close}
                    on_saved={on_edit_saved}
                    on_error={show_error}
                />

                <AlertModal
                    message={alert.current.clone()}
                    on_close={alert.actions.close.clone()}
                    {on_confirm}
                />
            </div>
        </ContextProvider<AppServices>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
