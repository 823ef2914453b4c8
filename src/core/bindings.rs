use super::controller::KeyCombo;

/// A labelled key combo that fires an action
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding<A> {
    pub label: &'static str,
    pub combo: KeyCombo,
    pub action: A,
}

impl<A> KeyBinding<A> {
    pub fn new(label: &'static str, combo: KeyCombo, action: A) -> Self {
        Self {
            label,
            combo,
            action,
        }
    }
}

/// Buttons a scene registers once at setup. Key presses and panel clicks both resolve here.
#[derive(Debug, Clone)]
pub struct ControlPanel<A> {
    bindings: Vec<KeyBinding<A>>,
}

impl<A: Copy> ControlPanel<A> {
    pub fn new(bindings: Vec<KeyBinding<A>>) -> Self {
        Self { bindings }
    }

    /// Action bound to `combo`, if any. The first registration wins on duplicates.
    pub fn dispatch(&self, combo: KeyCombo) -> Option<A> {
        self.bindings
            .iter()
            .find(|binding| binding.combo == combo)
            .map(|binding| binding.action)
    }

    /// Action behind the `index`-th panel button
    pub fn action_at(&self, index: usize) -> Option<A> {
        self.bindings.get(index).map(|binding| binding.action)
    }

    pub fn bindings(&self) -> &[KeyBinding<A>] {
        &self.bindings
    }

    /// Button captions in registration order, e.g. `Outline (o)`
    pub fn captions(&self) -> Vec<String> {
        self.bindings
            .iter()
            .map(|binding| format!("{} ({})", binding.label, binding.combo))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<A: Copy> Default for ControlPanel<A> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
