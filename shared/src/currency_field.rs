//! Keeps a monetary text field in a consistent shape while the user types.
//!
//! A field moves `Empty -> Editing -> Formatted -> Editing -> ...`: typing
//! filters the text down to amount characters, focus shows the editable form
//! and blur shows the pt-BR display form. Whatever the field shows, the value
//! sent at submit time is canonical.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::currency::{is_amount_char, to_canonical, to_display, to_editable};

/// Anything that behaves like a text `<input>`: a value plus a caret measured
/// in UTF-16 code units, the way browsers report `selectionStart`.
pub trait TextInput {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
    fn caret(&self) -> Option<u32>;
    fn set_caret(&mut self, caret: u32);
}

/// Result of stripping a raw keystroke result down to amount characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredInput {
    pub value: String,
    pub caret: Option<u32>,
}

impl FilteredInput {
    pub fn changed_from(&self, raw: &str) -> bool {
        self.value != raw
    }
}

/// Drop everything but digits, `.` and `,`, moving the caret back by the
/// number of code units removed in front of it.
pub fn filter_live_input(raw: &str, caret: Option<u32>) -> FilteredInput {
    let mut value = String::with_capacity(raw.len());
    let mut offset = 0u32;
    let mut removed_before_caret = 0u32;

    for c in raw.chars() {
        let width = c.len_utf16() as u32;
        if is_amount_char(c) {
            value.push(c);
        } else if caret.map_or(false, |caret| offset < caret) {
            removed_before_caret += width;
        }
        offset += width;
    }

    FilteredInput {
        value,
        caret: caret.map(|caret| caret.min(offset).saturating_sub(removed_before_caret)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Empty,
    Editing,
    Formatted,
}

/// State machine for one monetary field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyField {
    state: FieldState,
}

impl CurrencyField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Format a pre-filled field; empty fields are left untouched.
    pub fn prime<I: TextInput + ?Sized>(&mut self, input: &mut I) {
        let current = input.value();
        if current.is_empty() {
            self.state = FieldState::Empty;
            return;
        }
        input.set_value(&to_display(to_canonical(&current).as_str()));
        self.state = FieldState::Formatted;
    }

    /// Handle an `input` event. Returns whether the text had to be rewritten.
    pub fn on_input<I: TextInput + ?Sized>(&mut self, input: &mut I) -> bool {
        let raw = input.value();
        let filtered = filter_live_input(&raw, input.caret());
        let changed = filtered.changed_from(&raw);
        if changed {
            input.set_value(&filtered.value);
            if let Some(caret) = filtered.caret {
                input.set_caret(caret);
            }
        }
        self.state = if filtered.value.is_empty() {
            FieldState::Empty
        } else {
            FieldState::Editing
        };
        changed
    }

    pub fn on_focus<I: TextInput + ?Sized>(&mut self, input: &mut I) {
        let editable = to_editable(&input.value());
        input.set_value(&editable);
        self.state = if editable.is_empty() {
            FieldState::Empty
        } else {
            FieldState::Editing
        };
    }

    pub fn on_blur<I: TextInput + ?Sized>(&mut self, input: &mut I) {
        let display = to_display(to_canonical(&input.value()).as_str());
        input.set_value(&display);
        self.state = FieldState::Formatted;
    }

    /// The canonical amount to put on the wire, whatever the field shows.
    pub fn submit_value<I: TextInput + ?Sized>(&self, input: &I) -> String {
        to_canonical(&input.value())
    }
}

/// Registry of bound fields keyed by element identity.
///
/// `B` is whatever keeps a binding alive (event listener handles in the
/// browser, nothing at all in tests). Dropping a binding detaches it.
pub struct CurrencyInputs<K, B> {
    bindings: HashMap<K, Binding<B>>,
}

struct Binding<B> {
    field: CurrencyField,
    _handle: B,
}

impl<K, B> Default for CurrencyInputs<K, B> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug, B> CurrencyInputs<K, B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key`, building its handle only when it is not bound yet.
    ///
    /// Returns `false` when the key was already attached; the existing
    /// binding is kept and `make_handle` is never called.
    pub fn attach_with(&mut self, key: K, make_handle: impl FnOnce() -> B) -> bool {
        if self.bindings.contains_key(&key) {
            debug!(?key, "currency input already attached");
            return false;
        }
        debug!(?key, "attaching currency input");
        self.bindings.insert(
            key,
            Binding {
                field: CurrencyField::new(),
                _handle: make_handle(),
            },
        );
        true
    }

    /// Remove the binding for `key`, returning whether one existed.
    pub fn detach(&mut self, key: &K) -> bool {
        let removed = self.bindings.remove(key).is_some();
        if removed {
            debug!(?key, "detached currency input");
        }
        removed
    }

    pub fn is_attached(&self, key: &K) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn attached_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn field_mut(&mut self, key: &K) -> Option<&mut CurrencyField> {
        self.bindings.get_mut(key).map(|binding| &mut binding.field)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeInput {
        value: String,
        caret: Option<u32>,
        writes: usize,
    }

    impl FakeInput {
        fn typed(value: &str) -> Self {
            Self {
                value: value.to_string(),
                caret: Some(value.encode_utf16().count() as u32),
                writes: 0,
            }
        }
    }

    impl TextInput for FakeInput {
        fn value(&self) -> String {
            self.value.clone()
        }

        fn set_value(&mut self, value: &str) {
            self.value = value.to_string();
            self.writes += 1;
        }

        fn caret(&self) -> Option<u32> {
            self.caret
        }

        fn set_caret(&mut self, caret: u32) {
            self.caret = Some(caret);
        }
    }

    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_filter_strips_letters_and_moves_caret() {
        let filtered = filter_live_input("12a,b34", Some(7));
        assert_eq!(filtered.value, "12,34");
        assert_eq!(filtered.caret, Some(5));
    }

    #[test]
    fn test_filter_only_counts_removals_before_caret() {
        // Caret sits right after "12a", so only the 'a' is in front of it.
        let filtered = filter_live_input("12a,b34", Some(3));
        assert_eq!(filtered.value, "12,34");
        assert_eq!(filtered.caret, Some(2));
    }

    #[test]
    fn test_filter_keeps_clean_input_unchanged() {
        let filtered = filter_live_input("1.234,56", Some(4));
        assert!(!filtered.changed_from("1.234,56"));
        assert_eq!(filtered.caret, Some(4));
    }

    #[test]
    fn test_filter_measures_caret_in_utf16_units() {
        // The emoji is two UTF-16 code units wide.
        let filtered = filter_live_input("1\u{1F600}2", Some(3));
        assert_eq!(filtered.value, "12");
        assert_eq!(filtered.caret, Some(1));
    }

    #[test]
    fn test_filter_without_caret() {
        let filtered = filter_live_input("R$ 10", None);
        assert_eq!(filtered.value, "10");
        assert_eq!(filtered.caret, None);
    }

    #[test]
    fn test_field_walks_through_states() {
        let mut field = CurrencyField::new();
        let mut input = FakeInput::typed("1234,5x");
        assert_eq!(field.state(), FieldState::Empty);

        assert!(field.on_input(&mut input));
        assert_eq!(input.value, "1234,5");
        assert_eq!(input.caret, Some(6));
        assert_eq!(field.state(), FieldState::Editing);

        field.on_blur(&mut input);
        assert_eq!(input.value, "R$ 1.234,50");
        assert_eq!(field.state(), FieldState::Formatted);

        field.on_focus(&mut input);
        assert_eq!(input.value, "1234,50");
        assert_eq!(field.state(), FieldState::Editing);

        assert_eq!(field.submit_value(&input), "1234.50");
    }

    #[test]
    fn test_blur_on_empty_field_shows_zero() {
        let mut field = CurrencyField::new();
        let mut input = FakeInput::default();
        field.on_blur(&mut input);
        assert_eq!(input.value, "R$ 0,00");
        assert_eq!(field.submit_value(&input), "0.00");
    }

    #[test]
    fn test_input_does_not_rewrite_clean_text() {
        let mut field = CurrencyField::new();
        let mut input = FakeInput::typed("99,9");
        assert!(!field.on_input(&mut input));
        assert_eq!(input.writes, 0);
    }

    #[test]
    fn test_prime_formats_prefilled_value() {
        let mut field = CurrencyField::new();
        let mut input = FakeInput::typed("150.5");
        field.prime(&mut input);
        assert_eq!(input.value, "R$ 150,50");
        assert_eq!(field.state(), FieldState::Formatted);

        let mut empty = FakeInput::default();
        field.prime(&mut empty);
        assert_eq!(empty.value, "");
        assert_eq!(empty.writes, 0);
        assert_eq!(field.state(), FieldState::Empty);
    }

    #[test]
    fn test_submit_is_canonical_from_any_state() {
        let field = CurrencyField::new();
        for shown in ["R$ 1.234,56", "1234,56", "1.234,56", "1234.56"] {
            assert_eq!(field.submit_value(&FakeInput::typed(shown)), "1234.56");
        }
    }

    #[test]
    fn test_attach_twice_is_attach_once() {
        let built = Cell::new(0);
        let mut inputs: CurrencyInputs<&str, ()> = CurrencyInputs::new();

        assert!(inputs.attach_with("valor", || built.set(built.get() + 1)));
        assert!(!inputs.attach_with("valor", || built.set(built.get() + 1)));

        assert_eq!(built.get(), 1);
        assert_eq!(inputs.attached_count(), 1);
        assert!(inputs.is_attached(&"valor"));
    }

    #[test]
    fn test_detach_drops_handle() {
        let drops = Rc::new(Cell::new(0));
        let mut inputs = CurrencyInputs::new();
        inputs.attach_with("edit-valor", || DropCounter(drops.clone()));

        assert!(inputs.detach(&"edit-valor"));
        assert_eq!(drops.get(), 1);
        assert!(!inputs.detach(&"edit-valor"));
        assert!(inputs.is_empty());

        // Re-attaching after detach binds again.
        assert!(inputs.attach_with("edit-valor", || DropCounter(drops.clone())));
        inputs.clear();
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn test_registered_field_state_is_per_key() {
        let mut inputs: CurrencyInputs<u32, ()> = CurrencyInputs::new();
        inputs.attach_with(1, || ());
        inputs.attach_with(2, || ());

        let mut input = FakeInput::typed("5");
        if let Some(field) = inputs.field_mut(&1) {
            field.on_blur(&mut input);
        }
        assert_eq!(inputs.field_mut(&1).map(|f| f.state()), Some(FieldState::Formatted));
        assert_eq!(inputs.field_mut(&2).map(|f| f.state()), Some(FieldState::Empty));
        assert!(inputs.field_mut(&3).is_none());
    }
}
