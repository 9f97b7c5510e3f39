use std::collections::BTreeMap;
use std::sync::Arc;

use sawrun_common::{Action, Axis, Button, Key};

use crate::error::InputError;
use crate::source::{
    AxisSource, ButtonSource, InputSource, KeySource, ScreenSide, SourceRef, TouchSource,
};

/// Maps each action to the ordered list of sources that drive it.
///
/// Order within an action is insertion order and duplicates are kept.
/// `Clone` is a value copy: the per-action lists are duplicated, and the
/// sources they point at are stateless, so neither copy can observe edits
/// to the other.
#[derive(Debug, Clone)]
pub struct ActionBindings {
    map: BTreeMap<Action, Vec<SourceRef>>,
}

impl ActionBindings {
    /// A table with every action registered and nothing bound.
    pub fn new() -> Self {
        Self {
            map: Action::ALL.iter().map(|&a| (a, Vec::new())).collect(),
        }
    }

    /// A table holding the built-in control scheme.
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        bindings.restore_defaults();
        bindings
    }

    /// Discard every binding and install the built-in control scheme.
    ///
    /// Keyboard, gamepad and touch all feed the same four directions;
    /// `HelloWorld` fires once per press of `H`.
    pub fn restore_defaults(&mut self) {
        *self = Self::new();

        self.add(Action::HelloWorld, KeySource::pressed(Key::H));

        self.add(Action::Left, KeySource::held(Key::A));
        self.add(Action::Left, AxisSource::negative(Axis::Horizontal));
        self.add(Action::Left, TouchSource(ScreenSide::Left));

        self.add(Action::Right, KeySource::held(Key::D));
        self.add(Action::Right, AxisSource::positive(Axis::Horizontal));
        self.add(Action::Right, TouchSource(ScreenSide::Right));

        self.add(Action::Up, KeySource::held(Key::W));
        self.add(Action::Up, AxisSource::positive(Axis::Vertical));
        self.add(Action::Up, ButtonSource(Button::A));

        self.add(Action::Down, KeySource::held(Key::S));
        self.add(Action::Down, AxisSource::negative(Axis::Vertical));

        tracing::debug!(sources = self.total_sources(), "restored default bindings");
    }

    /// Append `source` to `action`'s list.
    pub fn add(&mut self, action: Action, source: impl InputSource + 'static) {
        self.add_shared(action, Arc::new(source));
    }

    /// Append an already shared source.
    pub fn add_shared(&mut self, action: Action, source: SourceRef) {
        self.map.entry(action).or_default().push(source);
    }

    /// Sources bound to `action`, in binding order.
    pub fn get(&self, action: Action) -> Result<&[SourceRef], InputError> {
        self.map
            .get(&action)
            .map(Vec::as_slice)
            .ok_or(InputError::UnknownAction(action))
    }

    /// An independent copy of the whole table.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Number of sources bound to `action`; zero if it is not registered.
    pub fn len_of(&self, action: Action) -> usize {
        self.map.get(&action).map_or(0, Vec::len)
    }

    pub fn total_sources(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    /// Registered actions in `Action` order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.map.keys().copied()
    }

    /// Drop `action` from the table entirely, breaking the registration
    /// invariant so lookup failures can be exercised.
    #[cfg(test)]
    pub(crate) fn without(mut self, action: Action) -> Self {
        self.map.remove(&action);
        self
    }
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a table from the given entries on top of [`ActionBindings::new`].
/// Actions not listed stay registered with no sources.
impl FromIterator<(Action, Vec<SourceRef>)> for ActionBindings {
    fn from_iter<I: IntoIterator<Item = (Action, Vec<SourceRef>)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (action, sources) in iter {
            bindings.map.entry(action).or_default().extend(sources);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ConstSource;
    use sawrun_common::InputValue;

    #[test]
    fn new_registers_every_action_empty() {
        let b = ActionBindings::new();
        for action in Action::ALL {
            assert!(b.get(action).unwrap().is_empty());
        }
        assert_eq!(b.actions().count(), Action::ALL.len());
    }

    #[test]
    fn defaults_have_expected_counts() {
        let b = ActionBindings::with_defaults();
        assert_eq!(b.len_of(Action::Left), 3);
        assert_eq!(b.len_of(Action::Right), 3);
        assert_eq!(b.len_of(Action::Up), 3);
        assert_eq!(b.len_of(Action::Down), 2);
        assert_eq!(b.len_of(Action::HelloWorld), 1);
        assert_eq!(b.total_sources(), 12);
    }

    #[test]
    fn restore_defaults_discards_custom_bindings() {
        let mut b = ActionBindings::with_defaults();
        b.add(Action::Down, ConstSource(InputValue::Bool(true)));
        assert_eq!(b.len_of(Action::Down), 3);
        b.restore_defaults();
        assert_eq!(b.len_of(Action::Down), 2);
    }

    #[test]
    fn add_keeps_order_and_duplicates() {
        let mut b = ActionBindings::new();
        b.add(Action::Up, ConstSource(InputValue::Analog(0.1)));
        b.add(Action::Up, ConstSource(InputValue::Analog(0.2)));
        b.add(Action::Up, ConstSource(InputValue::Analog(0.1)));

        let frame = crate::device::DeviceFrame::default();
        let values: Vec<_> = b
            .get(Action::Up)
            .unwrap()
            .iter()
            .map(|s| s.sample(&frame))
            .collect();
        assert_eq!(
            values,
            vec![
                InputValue::Analog(0.1),
                InputValue::Analog(0.2),
                InputValue::Analog(0.1)
            ]
        );
    }

    #[test]
    fn get_unregistered_action_fails() {
        let b = ActionBindings::new().without(Action::Right);
        assert!(b.get(Action::Left).is_ok());
        assert_eq!(
            b.get(Action::Right).unwrap_err(),
            InputError::UnknownAction(Action::Right)
        );
        assert_eq!(b.len_of(Action::Right), 0);
    }

    #[test]
    fn add_registers_missing_action() {
        let mut b = ActionBindings::new().without(Action::Down);
        assert!(b.get(Action::Down).is_err());
        b.add(Action::Down, KeySource::held(Key::S));
        assert_eq!(b.len_of(Action::Down), 1);
    }

    #[test]
    fn collected_table_registers_every_action() {
        let empty: ActionBindings = std::iter::empty().collect();
        for action in Action::ALL {
            assert!(empty.get(action).unwrap().is_empty());
        }

        let src: SourceRef = Arc::new(KeySource::held(Key::W));
        let b: ActionBindings = [(Action::Up, vec![src.clone()]), (Action::Up, vec![src])]
            .into_iter()
            .collect();
        assert_eq!(b.len_of(Action::Up), 2);
        assert_eq!(b.actions().count(), Action::ALL.len());
    }

    #[test]
    fn snapshot_is_isolated_both_ways() {
        let mut original = ActionBindings::with_defaults();
        let mut copy = original.snapshot();

        copy.add(Action::Left, ConstSource(InputValue::Bool(true)));
        assert_eq!(original.len_of(Action::Left), 3);
        assert_eq!(copy.len_of(Action::Left), 4);

        original.add(Action::Right, ConstSource(InputValue::Bool(true)));
        assert_eq!(copy.len_of(Action::Right), 3);
    }
}
