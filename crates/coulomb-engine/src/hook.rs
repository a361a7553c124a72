//! Step observers.
//!
//! A [`StepHook`] is called once per step with a read-only snapshot and
//! the step index. Each registration carries a [`HookTarget`] choosing
//! whether the snapshot is the charge grid or the field array. Any
//! `FnMut(&ScalarField, StepIndex)` closure is a hook.

use coulomb_core::{ScalarField, StepIndex};

/// Which array a hook observes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HookTarget {
    /// The charge grid values after transport and injection.
    #[default]
    Charge,
    /// The field array computed at the start of the step.
    Field,
}

/// Observer invoked after every simulation step.
///
/// Hooks run synchronously, in registration order, and their panics are
/// not caught.
pub trait StepHook {
    /// Inspect `snapshot` at `step`. The snapshot is only valid for the
    /// duration of the call; clone it to keep it.
    fn on_step(&mut self, snapshot: &ScalarField, step: StepIndex);
}

impl<F> StepHook for F
where
    F: FnMut(&ScalarField, StepIndex),
{
    fn on_step(&mut self, snapshot: &ScalarField, step: StepIndex) {
        self(snapshot, step)
    }
}

pub(crate) struct HookRegistration {
    pub(crate) hook: Box<dyn StepHook>,
    pub(crate) target: HookTarget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use coulomb_core::Shape;

    struct Counter(usize);

    impl StepHook for Counter {
        fn on_step(&mut self, _snapshot: &ScalarField, _step: StepIndex) {
            self.0 += 1;
        }
    }

    #[test]
    fn default_target_is_charge() {
        assert_eq!(HookTarget::default(), HookTarget::Charge);
    }

    #[test]
    fn closures_and_structs_are_hooks() {
        let field = ScalarField::zeros(Shape::new(2, 2).unwrap());
        let mut seen = Vec::new();
        {
            let mut closure = |_: &ScalarField, step: StepIndex| seen.push(step);
            closure.on_step(&field, StepIndex(3));
        }
        assert_eq!(seen, vec![StepIndex(3)]);

        let mut counter = Counter(0);
        counter.on_step(&field, StepIndex(0));
        counter.on_step(&field, StepIndex(1));
        assert_eq!(counter.0, 2);
    }
}
