use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::currency_binding::CurrencyInputBinder;
use crate::AppServices;

/// Bind the referenced input to the app-wide currency binder for as long as
/// the calling component is mounted.
#[hook]
pub fn use_currency_input(input_ref: NodeRef) {
    let services = use_context::<AppServices>();
    // Components rendered outside the app context still get a binder.
    let fallback = use_memo((), |_| CurrencyInputBinder::new());
    let binder: Rc<CurrencyInputBinder> = match services {
        Some(services) => services.binder.clone(),
        None => fallback,
    };

    use_effect_with(input_ref, move |input_ref| {
        let input = input_ref.cast::<HtmlInputElement>();
        if let Some(input) = &input {
            binder.attach(input);
        }
        move || {
            if let Some(input) = input {
                binder.detach(&input);
            }
        }
    });
}
