use shared::{format_date_br, TransactionKind, TransactionRow};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<TransactionRow>,
    pub loading: bool,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<i64>,
    pub on_mark_paid: Callback<i64>,
}

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Receita => "amount positive currency-value",
        TransactionKind::Despesa => "amount negative currency-value",
    }
}

fn id_callback(callback: &Callback<i64>, id: i64) -> Callback<MouseEvent> {
    let callback = callback.clone();
    Callback::from(move |_: MouseEvent| callback.emit(id))
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    html! {
        <section class="transactions-section">
            <h2>{"Transações do mês"}</h2>

            {if props.loading && props.transactions.is_empty() {
                html! { <div class="loading">{"Carregando transações..."}</div> }
            } else if props.transactions.is_empty() {
                html! { <div class="empty">{"Nenhuma transação neste mês."}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="transactions-table">
                            <thead>
                                <tr>
                                    <th>{"Data"}</th>
                                    <th>{"Descrição"}</th>
                                    <th>{"Categoria"}</th>
                                    <th>{"Valor"}</th>
                                    <th>{"Tipo"}</th>
                                    <th>{"Status"}</th>
                                    <th>{"Ações"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.transactions.iter().map(|transaction| {
                                    html! {
                                        <tr key={transaction.id}>
                                            <td class="date">{format_date_br(&transaction.data)}</td>
                                            <td class="description">{&transaction.descricao}</td>
                                            <td class="category">{transaction.category_label()}</td>
                                            <td class={amount_class(transaction.tipo)}>
                                                {transaction.display_value()}
                                            </td>
                                            <td>{transaction.tipo.label()}</td>
                                            <td>{&transaction.status}</td>
                                            <td class="actions">
                                                <button class="btn btn-sm edit-btn" title="Editar"
                                                    onclick={id_callback(&props.on_edit, transaction.id)}>
                                                    {"Editar"}
                                                </button>
                                                <button class="btn btn-sm delete-btn" title="Excluir"
                                                    onclick={id_callback(&props.on_delete, transaction.id)}>
                                                    {"Excluir"}
                                                </button>
                                                {if transaction.is_payable() {
                                                    html! {
                                                        <button class="btn btn-sm mark-paid-btn" title="Marcar como pago"
                                                            onclick={id_callback(&props.on_mark_paid, transaction.id)}>
                                                            {"Pagar"}
                                                        </button>
                                                    }
                                                } else {
                                                    html! {}
                                                }}
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
