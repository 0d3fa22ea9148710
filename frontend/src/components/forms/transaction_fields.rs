use shared::{Category, RecurrenceFrequency, TransactionForm, TransactionKind};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::currency_input::CurrencyInput;

#[derive(Properties, PartialEq)]
pub struct TransactionFieldsProps {
    /// Prepended to every element id so the add and edit forms can coexist.
    #[prop_or_default]
    pub id_prefix: AttrValue,
    pub initial: TransactionForm,
    pub categories: Vec<Category>,
    /// Offer "apply to future occurrences" (edit only).
    #[prop_or_default]
    pub show_update_all_future: bool,
    #[prop_or_default]
    pub disabled: bool,
}

/// Categories offered for a transaction kind. Untyped categories fit both.
pub fn categories_for(categories: &[Category], tipo: TransactionKind) -> Vec<&Category> {
    categories
        .iter()
        .filter(|category| category.tipo.map_or(true, |kind| kind == tipo))
        .collect()
}

/// The inputs shared by the add form and the edit modal. Values live in the
/// DOM and are read back with `FormData` on submit; only what drives
/// visibility is held in state.
#[function_component(TransactionFields)]
pub fn transaction_fields(props: &TransactionFieldsProps) -> Html {
    let tipo = use_state(|| props.initial.tipo);
    let is_recurring = use_state(|| props.initial.is_recurring);

    {
        let tipo = tipo.clone();
        let is_recurring = is_recurring.clone();
        use_effect_with(props.initial.clone(), move |initial| {
            tipo.set(initial.tipo);
            is_recurring.set(initial.is_recurring);
        });
    }

    let id = |name: &str| format!("{}{}", props.id_prefix, name);
    let initial = &props.initial;

    let on_kind_change = |kind: TransactionKind| {
        let tipo = tipo.clone();
        Callback::from(move |_: Event| tipo.set(kind))
    };

    let on_recurring_change = {
        let is_recurring = is_recurring.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            is_recurring.set(input.checked());
        })
    };

    let kind_radio = |kind: TransactionKind| {
        let radio_id = id(&format!("tipo-{}", kind.as_str()));
        html! {
            <label class="radio-label" for={radio_id.clone()}>
                <input
                    type="radio"
                    id={radio_id}
                    name="tipo"
                    value={kind.as_str()}
                    checked={*tipo == kind}
                    disabled={props.disabled}
                    onchange={on_kind_change(kind)}
                />
                {kind.label()}
            </label>
        }
    };

    html! {
        <>
            <div class="form-group tipo-group">
                {kind_radio(TransactionKind::Receita)}
                {kind_radio(TransactionKind::Despesa)}
            </div>

            <div class="form-group">
                <label for={id("descricao")}>{"Descrição"}</label>
                <input
                    type="text"
                    class="form-control"
                    id={id("descricao")}
                    name="descricao"
                    value={initial.descricao.clone()}
                    disabled={props.disabled}
                    required=true
                />
            </div>

            <div class="form-group">
                <label for={id("valor")}>{"Valor"}</label>
                <CurrencyInput
                    id={id("valor")}
                    value={initial.valor.clone()}
                    disabled={props.disabled}
                />
            </div>

            <div class="form-group">
                <label for={id("data")}>{"Data"}</label>
                <input
                    type="date"
                    class="form-control"
                    id={id("data")}
                    name="data"
                    value={initial.data.clone()}
                    disabled={props.disabled}
                    required=true
                />
            </div>

            if tipo.is_expense() {
                <div class="form-group" id={id("vencimento-group")}>
                    <label for={id("vencimento")}>{"Vencimento"}</label>
                    <input
                        type="date"
                        class="form-control"
                        id={id("vencimento")}
                        name="vencimento"
                        value={initial.vencimento.clone()}
                        disabled={props.disabled}
                    />
                </div>
            }

            <div class="form-group">
                <label for={id("categoria")}>{"Categoria"}</label>
                <select class="form-control" id={id("categoria")} name="categoria_id" disabled={props.disabled}>
                    <option value="" selected={initial.categoria_id.is_none()}>{"Sem categoria"}</option>
                    { for categories_for(&props.categories, *tipo).into_iter().map(|category| html! {
                        <option
                            value={category.id.to_string()}
                            selected={initial.categoria_id == Some(category.id)}
                        >
                            {&category.nome}
                        </option>
                    }) }
                </select>
            </div>

            <div class="form-group">
                <label for={id("observacoes")}>{"Observações"}</label>
                <textarea
                    class="form-control"
                    id={id("observacoes")}
                    name="observacoes"
                    rows="2"
                    value={initial.observacoes.clone()}
                    disabled={props.disabled}
                />
            </div>

            <div class="form-group form-check">
                <input
                    type="checkbox"
                    class="form-check-input"
                    id={id("is_recurring")}
                    name="is_recurring"
                    checked={*is_recurring}
                    disabled={props.disabled}
                    onchange={on_recurring_change}
                />
                <label class="form-check-label" for={id("is_recurring")}>{"Transação recorrente"}</label>
            </div>

            if *is_recurring {
                <div class="recurrence-options" id={id("recurrence-options")}>
                    <div class="form-group">
                        <label for={id("recurrence_frequency")}>{"Frequência"}</label>
                        <select
                            class="form-control"
                            id={id("recurrence_frequency")}
                            name="recurrence_frequency"
                            disabled={props.disabled}
                        >
                            { for RecurrenceFrequency::ALL.into_iter().map(|frequency| html! {
                                <option
                                    value={frequency.as_str()}
                                    selected={initial.recurrence_frequency == frequency}
                                >
                                    {frequency.label()}
                                </option>
                            }) }
                        </select>
                    </div>
                    <div class="form-group">
                        <label for={id("recurrence_end_date")}>{"Repetir até"}</label>
                        <input
                            type="date"
                            class="form-control"
                            id={id("recurrence_end_date")}
                            name="recurrence_end_date"
                            value={initial.recurrence_end_date.clone()}
                            disabled={props.disabled}
                        />
                    </div>
                    if props.show_update_all_future {
                        <div class="form-group form-check">
                            <input
                                type="checkbox"
                                class="form-check-input"
                                id={id("update_all_future")}
                                name="update_all_future"
                                checked={initial.update_all_future}
                                disabled={props.disabled}
                            />
                            <label class="form-check-label" for={id("update_all_future")}>
                                {"Aplicar às próximas ocorrências"}
                            </label>
                        </div>
                    }
                </div>
            }
        </>
    }
}
