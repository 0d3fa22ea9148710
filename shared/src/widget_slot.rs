use tracing::debug;

/// A rendered widget that holds on to resources until destroyed.
pub trait Widget {
    fn destroy(&mut self);
}

/// Owns at most one live widget.
///
/// Replacing destroys the current widget before the next one is built, so two
/// never render into the same target at once. Dropping the slot destroys
/// whatever is still live.
pub struct WidgetSlot<W: Widget> {
    name: &'static str,
    current: Option<W>,
}

impl<W: Widget> WidgetSlot<W> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
        }
    }

    pub fn replace(&mut self, build: impl FnOnce() -> W) -> &mut W {
        if let Some(mut previous) = self.current.take() {
            debug!(slot = self.name, "destroying previous widget");
            previous.destroy();
        }
        self.current.insert(build())
    }

    pub fn clear(&mut self) {
        if let Some(mut previous) = self.current.take() {
            debug!(slot = self.name, "clearing widget");
            previous.destroy();
        }
    }

    pub fn get(&self) -> Option<&W> {
        self.current.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }
}

impl<W: Widget> Drop for WidgetSlot<W> {
    fn drop(&mut self) {
        self.clear();
    }
}
