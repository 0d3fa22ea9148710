use shared::{Category, TransactionForm};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlFormElement;
use yew::prelude::*;

use super::transaction_fields::TransactionFields;
use super::{failure_message, read_transaction_form};
use crate::hooks::use_submission_guard::use_submission_guard;
use crate::AppServices;

const COMPONENT: &str = "edit_transaction_modal";

#[derive(Properties, PartialEq)]
pub struct EditTransactionModalProps {
    /// The transaction being edited; the modal is hidden while `None`.
    pub transaction_id: Option<i64>,
    pub categories: Vec<Category>,
    pub on_close: Callback<()>,
    pub on_saved: Callback<String>,
    pub on_error: Callback<String>,
}

#[function_component(EditTransactionModal)]
pub fn edit_transaction_modal(props: &EditTransactionModalProps) -> Html {
    let services = use_context::<AppServices>();
    let form_ref = use_node_ref();
    let guard = use_submission_guard();
    let loaded = use_state(|| Option::<(i64, TransactionForm)>::None);

    // Fetch the transaction every time the modal opens for a new id.
    {
        let services = services.clone();
        let loaded = loaded.clone();
        let on_close = props.on_close.clone();
        let on_error = props.on_error.clone();

        use_effect_with(props.transaction_id, move |transaction_id| {
            loaded.set(None);
            if let (Some(id), Some(services)) = (*transaction_id, services) {
                spawn_local(async move {
                    match services.api.get_transaction(id).await {
                        Ok(detail) => {
                            services.logger.debug_with_component(
                                COMPONENT,
                                &format!("Loaded transaction {} for editing", id),
                            );
                            loaded.set(Some((id, TransactionForm::from_detail(&detail))));
                        }
                        Err(error) => {
                            services.logger.error_with_component(
                                COMPONENT,
                                &format!("Failed to load transaction {}: {}", id, error),
                            );
                            on_error.emit(error.user_message("Erro ao carregar dados para edição"));
                            on_close.emit(());
                        }
                    }
                });
            }
            || ()
        });
    }

    let Some(transaction_id) = props.transaction_id else {
        return html! {};
    };

    let onsubmit = {
        let services = services.clone();
        let form_ref = form_ref.clone();
        let guard = guard.clone();
        let on_saved = props.on_saved.clone();
        let on_error = props.on_error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(services) = services.clone() else {
                return;
            };
            let Some(form) = form_ref
                .cast::<HtmlFormElement>()
                .and_then(|element| read_transaction_form(&element))
            else {
                services
                    .logger
                    .error_with_component(COMPONENT, "Could not read the edit form");
                return;
            };
            if !guard.try_begin() {
                return;
            }
            if let Err(error) = form.validate() {
                on_error.emit(error.to_string());
                guard.finish();
                return;
            }

            let guard = guard.clone();
            let on_saved = on_saved.clone();
            let on_error = on_error.clone();
            spawn_local(async move {
                match services.api.edit_transaction(transaction_id, &form).await {
                    Ok(response) => {
                        services.logger.info_with_component(
                            COMPONENT,
                            &format!("Updated transaction {}", transaction_id),
                        );
                        on_saved.emit(response.message_or("Transação atualizada com sucesso!"));
                    }
                    Err(error) => {
                        services.logger.error_with_component(
                            COMPONENT,
                            &format!("Failed to update transaction {}: {}", transaction_id, error),
                        );
                        on_error.emit(failure_message(&error, "Erro ao editar transação"));
                    }
                }
                guard.finish();
            });
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };
    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    // Ignore a stale form left over from a previously edited transaction.
    let form = (*loaded)
        .as_ref()
        .filter(|(id, _)| *id == transaction_id)
        .map(|(_, form)| form.clone());

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal-content edit-transaction-modal" id="editModal" onclick={on_modal_click}>
                <div class="modal-header">
                    <h3>{"Editar transação"}</h3>
                    <button type="button" class="close-button" onclick={on_cancel.clone()}>{"×"}</button>
                </div>
                {match form {
                    Some(initial) => html! {
                        <form id="form-editar-transacao" ref={form_ref} {onsubmit}>
                            <TransactionFields
                                key={transaction_id.to_string()}
                                id_prefix="edit-"
                                {initial}
                                categories={props.categories.clone()}
                                show_update_all_future=true
                                disabled={guard.is_submitting()}
                            />
                            <div class="modal-footer">
                                <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                                    {"Cancelar"}
                                </button>
                                <button type="submit" class="btn btn-primary" disabled={guard.is_submitting()}>
                                    { if guard.is_submitting() { "Salvando..." } else { "Salvar" } }
                                </button>
                            </div>
                        </form>
                    },
                    None => html! {
                        <div class="modal-body loading">{"Carregando..."}</div>
                    },
                }}
            </div>
        </div>
    }
}
