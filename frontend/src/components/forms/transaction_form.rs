use shared::{Category, TransactionForm, TransactionKind};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use super::transaction_fields::TransactionFields;
use super::{failure_message, read_transaction_form};
use crate::hooks::use_submission_guard::use_submission_guard;
use crate::services::date_utils::get_current_date;
use crate::AppServices;

const COMPONENT: &str = "transaction_form";

#[derive(Properties, PartialEq)]
pub struct NewTransactionFormProps {
    pub categories: Vec<Category>,
    /// Receives the success message once the transaction was stored.
    pub on_saved: Callback<String>,
    pub on_error: Callback<String>,
}

/// Blank form: dated today, expense selected.
fn blank_form() -> TransactionForm {
    TransactionForm {
        tipo: TransactionKind::Despesa,
        data: get_current_date(),
        ..TransactionForm::default()
    }
}

/// The "Nova transação" form.
#[function_component(NewTransactionForm)]
pub fn new_transaction_form(props: &NewTransactionFormProps) -> Html {
    let services = use_context::<AppServices>();
    let form_ref = use_node_ref();
    let guard = use_submission_guard();
    // Bumped after each save so the fields remount empty.
    let generation = use_state(|| 0u32);
    let initial = use_memo(*generation, |_| blank_form());

    let onsubmit = {
        let services = services.clone();
        let form_ref = form_ref.clone();
        let guard = guard.clone();
        let generation = generation.clone();
        let on_saved = props.on_saved.clone();
        let on_error = props.on_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(services) = services.clone() else {
                return;
            };
            // Read before the guard disables the inputs.
            let Some(form) = form_ref
                .cast::<HtmlFormElement>()
                .and_then(|element| read_transaction_form(&element))
            else {
                services
                    .logger
                    .error_with_component(COMPONENT, "Could not read the transaction form");
                return;
            };

            if !guard.try_begin() {
                services
                    .logger
                    .debug_with_component(COMPONENT, "Submit ignored: already sending");
                return;
            }

            if let Err(error) = form.validate() {
                on_error.emit(error.to_string());
                guard.finish();
                return;
            }

            let guard = guard.clone();
            let generation = generation.clone();
            let on_saved = on_saved.clone();
            let on_error = on_error.clone();
            spawn_local(async move {
                services.logger.info_with_component(
                    COMPONENT,
                    &format!("Adding {} '{}'", form.tipo.as_str(), form.descricao),
                );
                match services.api.add_transaction(&form).await {
                    Ok(response) => {
                        generation.set(*generation + 1);
                        on_saved.emit(response.message_or("Transação adicionada com sucesso!"));
                    }
                    Err(error) => {
                        services.logger.error_with_component(
                            COMPONENT,
                            &format!("Failed to add transaction: {}", error),
                        );
                        on_error.emit(failure_message(&error, "Erro ao adicionar transação"));
                    }
                }
                guard.finish();
            });
        })
    };

    html! {
        <section class="transaction-form-section">
            <h2>{"Nova transação"}</h2>
            <form id="form-transacao" class="transaction-form" ref={form_ref} {onsubmit}>
                <TransactionFields
                    key={*generation}
                    initial={(*initial).clone()}
                    categories={props.categories.clone()}
                    disabled={guard.is_submitting()}
                />
                <button type="submit" class="btn btn-primary" disabled={guard.is_submitting()}>
                    { if guard.is_submitting() { "Salvando..." } else { "Adicionar" } }
                </button>
            </form>
        </section>
    }
}
