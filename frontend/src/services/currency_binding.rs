//! Binds the currency field behaviour to real `<input>` elements.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use shared::{CurrencyField, CurrencyInputs, TextInput};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

const KEY_ATTRIBUTE: &str = "data-currency-binding";

type Registry = CurrencyInputs<String, Vec<EventListener>>;

/// `TextInput` over a DOM input element.
pub struct InputElement(pub HtmlInputElement);

impl TextInput for InputElement {
    fn value(&self) -> String {
        self.0.value()
    }

    fn set_value(&mut self, value: &str) {
        self.0.set_value(value);
    }

    fn caret(&self) -> Option<u32> {
        self.0.selection_start().ok().flatten()
    }

    fn set_caret(&mut self, caret: u32) {
        // Inputs that do not support selection (type=number) throw here.
        let _ = self.0.set_selection_range(caret, caret);
    }
}

#[derive(Clone, Copy)]
enum FieldEvent {
    Input,
    Focus,
    Blur,
}

impl FieldEvent {
    const ALL: [FieldEvent; 3] = [FieldEvent::Input, FieldEvent::Focus, FieldEvent::Blur];

    fn name(self) -> &'static str {
        match self {
            FieldEvent::Input => "input",
            FieldEvent::Focus => "focus",
            FieldEvent::Blur => "blur",
        }
    }

    fn apply(self, field: &mut CurrencyField, input: &mut InputElement) {
        match self {
            FieldEvent::Input => {
                field.on_input(input);
            }
            FieldEvent::Focus => field.on_focus(input),
            FieldEvent::Blur => field.on_blur(input),
        }
    }
}

/// Owns the listeners of every bound currency input.
///
/// Attaching the same element twice is a no-op, so callers may re-run
/// binding after every render. Dropping the binder unsubscribes everything.
#[derive(Default)]
pub struct CurrencyInputBinder {
    inputs: Rc<RefCell<Registry>>,
    next_key: Cell<u32>,
}

impl CurrencyInputBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the element was already bound, or when no key
    /// could be stored on it to find the binding again.
    pub fn attach(&self, input: &HtmlInputElement) -> bool {
        let Some(key) = self.key_for(input) else {
            gloo::console::warn!("currency input has no id and rejected its binding key");
            return false;
        };
        let weak = Rc::downgrade(&self.inputs);

        let mut inputs = self.inputs.borrow_mut();
        let attached = inputs.attach_with(key.clone(), || listen(input, &key, weak));
        if attached {
            if let Some(field) = inputs.field_mut(&key) {
                field.prime(&mut InputElement(input.clone()));
            }
        }
        attached
    }

    pub fn detach(&self, input: &HtmlInputElement) -> bool {
        match existing_key(input) {
            Some(key) => self.inputs.borrow_mut().detach(&key),
            None => false,
        }
    }

    pub fn is_attached(&self, input: &HtmlInputElement) -> bool {
        existing_key(input)
            .map(|key| self.inputs.borrow().is_attached(&key))
            .unwrap_or(false)
    }

    pub fn attached_count(&self) -> usize {
        self.inputs.borrow().attached_count()
    }

    /// Bind every input in the document whose id is listed; returns how many
    /// were newly bound.
    pub fn attach_ids<S: AsRef<str>>(&self, ids: &[S]) -> usize {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return 0;
        };
        ids.iter()
            .filter_map(|id| document.get_element_by_id(id.as_ref()))
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .filter(|input| self.attach(input))
            .count()
    }

    /// The element id when it has one, otherwise a key stored on the element.
    /// `None` when the key cannot be stored, since detach could never find it.
    fn key_for(&self, input: &HtmlInputElement) -> Option<String> {
        if let Some(key) = existing_key(input) {
            return Some(key);
        }
        let n = self.next_key.get();
        self.next_key.set(n + 1);
        let key = format!("currency-input-{}", n);
        input.set_attribute(KEY_ATTRIBUTE, &key).ok()?;
        existing_key(input).filter(|stored| *stored == key)
    }
}

fn existing_key(input: &HtmlInputElement) -> Option<String> {
    let id = input.id();
    if !id.is_empty() {
        return Some(format!("#{}", id));
    }
    input.get_attribute(KEY_ATTRIBUTE)
}

fn listen(input: &HtmlInputElement, key: &str, inputs: Weak<RefCell<Registry>>) -> Vec<EventListener> {
    FieldEvent::ALL
        .into_iter()
        .map(|event| {
            let element = input.clone();
            let key = key.to_string();
            let inputs = inputs.clone();
            EventListener::new(input, event.name(), move |_| {
                let Some(inputs) = inputs.upgrade() else {
                    return;
                };
                let Ok(mut inputs) = inputs.try_borrow_mut() else {
                    return;
                };
                if let Some(field) = inputs.field_mut(&key) {
                    event.apply(field, &mut InputElement(element.clone()));
                }
            })
        })
        .collect()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::Event;

    wasm_bindgen_test_configure!(run_in_browser);

    fn text_input(id: &str) -> HtmlInputElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let input: HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_type("text");
        if !id.is_empty() {
            input.set_id(id);
        }
        document.body().unwrap().append_child(&input).unwrap();
        input
    }

    fn fire(input: &HtmlInputElement, event_type: &str) {
        let event = Event::new(event_type).unwrap();
        input.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_attach_twice_processes_keystroke_once() {
        let binder = CurrencyInputBinder::new();
        let input = text_input("valor-twice");

        assert!(binder.attach(&input));
        assert!(!binder.attach(&input));
        assert_eq!(binder.attached_count(), 1);

        input.set_value("12a,b34");
        input.set_selection_range(7, 7).unwrap();
        fire(&input, "input");

        assert_eq!(input.value(), "12,34");
        assert_eq!(input.selection_start().unwrap(), Some(5));
        input.remove();
    }

    #[wasm_bindgen_test]
    fn test_blur_and_focus_switch_forms() {
        let binder = CurrencyInputBinder::new();
        let input = text_input("valor-blur");
        binder.attach(&input);

        input.set_value("1234,5");
        fire(&input, "blur");
        assert_eq!(input.value(), "R$ 1.234,50");

        fire(&input, "focus");
        assert_eq!(input.value(), "1234,50");
        input.remove();
    }

    #[wasm_bindgen_test]
    fn test_prefilled_value_is_formatted_on_attach() {
        let binder = CurrencyInputBinder::new();
        let input = text_input("valor-prefilled");
        input.set_value("99.9");

        binder.attach(&input);
        assert_eq!(input.value(), "R$ 99,90");
        input.remove();
    }

    #[wasm_bindgen_test]
    fn test_input_without_id_keeps_its_key_until_detached() {
        let binder = CurrencyInputBinder::new();
        let input = text_input("");

        assert!(binder.attach(&input));
        let key = input.get_attribute(KEY_ATTRIBUTE).unwrap();
        assert!(key.starts_with("currency-input-"));
        assert!(!binder.attach(&input));
        assert_eq!(input.get_attribute(KEY_ATTRIBUTE).as_deref(), Some(key.as_str()));

        assert!(binder.detach(&input));
        assert!(!binder.is_attached(&input));
        assert_eq!(binder.attached_count(), 0);
        input.remove();
    }

    #[wasm_bindgen_test]
    fn test_detach_stops_processing() {
        let binder = CurrencyInputBinder::new();
        let input = text_input("");
        binder.attach(&input);
        assert!(binder.is_attached(&input));

        assert!(binder.detach(&input));
        input.set_value("abc");
        fire(&input, "input");
        assert_eq!(input.value(), "abc");
        assert_eq!(binder.attached_count(), 0);
        input.remove();
    }

    #[wasm_bindgen_test]
    fn test_attach_ids_is_idempotent() {
        let binder = CurrencyInputBinder::new();
        let input = text_input("valor-by-id");

        assert_eq!(binder.attach_ids(&["valor-by-id", "missing"]), 1);
        assert_eq!(binder.attach_ids(&["valor-by-id"]), 0);
        assert!(binder.is_attached(&input));
        input.remove();
    }
}
