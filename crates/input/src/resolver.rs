use std::collections::BTreeMap;
use std::sync::Arc;

use sawrun_common::{Action, InputValue};
use serde::Serialize;

use crate::binding::ActionBindings;
use crate::device::DeviceState;
use crate::error::{InputError, SourceAnomaly};
use crate::source::SourceRef;

/// Analog levels at or above this count as pressed when a boolean is asked for.
pub const ANALOG_PRESS_THRESHOLD: f32 = 0.5;

/// A resolved value plus every anomaly seen while producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution<T> {
    pub value: T,
    pub anomalies: Vec<SourceAnomaly>,
}

/// Both shapes of one action for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionState {
    pub active: bool,
    pub strength: f32,
}

/// Every action resolved against one device frame.
pub type ActionFrame = BTreeMap<Action, ActionState>;

/// Answers "is this action active, and how strongly" by aggregating every
/// source bound to it.
///
/// Booleans aggregate by OR and floats by MAX, so one device at full
/// strength is never diluted by idle ones.
#[derive(Debug, Clone)]
pub struct InputResolver {
    bindings: Arc<ActionBindings>,
}

impl InputResolver {
    pub fn new(bindings: ActionBindings) -> Self {
        Self {
            bindings: Arc::new(bindings),
        }
    }

    /// A resolver over the built-in control scheme.
    pub fn with_defaults() -> Self {
        Self::new(ActionBindings::with_defaults())
    }

    /// Whether any source bound to `action` is active.
    pub fn resolve_bool(
        &self,
        action: Action,
        device: &dyn DeviceState,
    ) -> Result<bool, InputError> {
        let resolution = self.resolve_bool_report(action, device)?;
        report(&resolution.anomalies);
        Ok(resolution.value)
    }

    /// Strongest clamped level among the sources bound to `action`.
    pub fn resolve_float(
        &self,
        action: Action,
        device: &dyn DeviceState,
    ) -> Result<f32, InputError> {
        let resolution = self.resolve_float_report(action, device)?;
        report(&resolution.anomalies);
        Ok(resolution.value)
    }

    /// Like [`resolve_bool`](Self::resolve_bool) but hands anomalies back
    /// instead of logging them.
    pub fn resolve_bool_report(
        &self,
        action: Action,
        device: &dyn DeviceState,
    ) -> Result<Resolution<bool>, InputError> {
        let _span = tracing::debug_span!("resolve_bool", %action).entered();
        let sources = self.sources(action)?;
        let mut anomalies = Vec::new();
        let mut active = false;
        for source in sources {
            let pressed = match source.sample(device) {
                InputValue::Bool(b) => b,
                InputValue::Analog(v) if v.is_nan() => {
                    anomalies.push(contract_violation(action, source));
                    false
                }
                InputValue::Analog(v) => v >= ANALOG_PRESS_THRESHOLD,
            };
            active |= pressed;
        }
        Ok(Resolution {
            value: active,
            anomalies,
        })
    }

    /// Like [`resolve_float`](Self::resolve_float) but hands anomalies back
    /// instead of logging them.
    pub fn resolve_float_report(
        &self,
        action: Action,
        device: &dyn DeviceState,
    ) -> Result<Resolution<f32>, InputError> {
        let _span = tracing::debug_span!("resolve_float", %action).entered();
        let sources = self.sources(action)?;
        let mut anomalies = Vec::new();
        let mut strength = 0.0_f32;
        for source in sources {
            let level = match source.sample(device) {
                InputValue::Bool(b) => {
                    if b {
                        1.0
                    } else {
                        0.0
                    }
                }
                InputValue::Analog(v) if v.is_nan() => {
                    anomalies.push(contract_violation(action, source));
                    0.0
                }
                InputValue::Analog(v) => {
                    let clamped = v.clamp(0.0, 1.0);
                    if clamped != v {
                        anomalies.push(SourceAnomaly::OutOfRange {
                            action,
                            origin: format!("{source:?}"),
                            value: v,
                            clamped,
                        });
                    }
                    clamped
                }
            };
            strength = strength.max(level);
        }
        Ok(Resolution {
            value: strength,
            anomalies,
        })
    }

    /// Resolve every action in both shapes for one frame.
    pub fn resolve_all(&self, device: &dyn DeviceState) -> Result<ActionFrame, InputError> {
        Action::ALL
            .iter()
            .map(|&action| {
                let state = ActionState {
                    active: self.resolve_bool(action, device)?,
                    strength: self.resolve_float(action, device)?,
                };
                Ok((action, state))
            })
            .collect()
    }

    /// An independent copy of the current bindings.
    pub fn snapshot_bindings(&self) -> ActionBindings {
        self.bindings.snapshot()
    }

    /// Swap in a new table. Callers still holding the old table through a
    /// previous snapshot keep seeing it unchanged.
    pub fn replace_bindings(&mut self, bindings: ActionBindings) {
        tracing::debug!(sources = bindings.total_sources(), "replacing bindings");
        self.bindings = Arc::new(bindings);
    }

    fn sources(&self, action: Action) -> Result<&[SourceRef], InputError> {
        self.bindings.get(action).inspect_err(|e| {
            tracing::error!("{e}");
        })
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn contract_violation(action: Action, source: &SourceRef) -> SourceAnomaly {
    SourceAnomaly::ContractViolation {
        action,
        origin: format!("{source:?}"),
    }
}

fn report(anomalies: &[SourceAnomaly]) {
    for anomaly in anomalies {
        tracing::warn!("{anomaly}");
    }
}
