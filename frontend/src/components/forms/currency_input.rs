use yew::prelude::*;

use crate::hooks::use_currency_input::use_currency_input;

#[derive(Properties, PartialEq)]
pub struct CurrencyInputProps {
    pub id: AttrValue,
    #[prop_or(AttrValue::Static("valor"))]
    pub name: AttrValue,
    /// Initial text; formatted as soon as the field is bound.
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
}

/// Text input holding a monetary amount in pt-BR form.
#[function_component(CurrencyInput)]
pub fn currency_input(props: &CurrencyInputProps) -> Html {
    let input_ref = use_node_ref();
    use_currency_input(input_ref.clone());

    html! {
        <input
            type="text"
            inputmode="decimal"
            autocomplete="off"
            class="form-control currency-input"
            id={props.id.clone()}
            name={props.name.clone()}
            value={props.value.clone()}
            placeholder="R$ 0,00"
            disabled={props.disabled}
            ref={input_ref}
        />
    }
}
