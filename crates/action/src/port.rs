//! Output port declarations.
//!
//! Ports describe the connection topology: how nodes wire together in a
//! workflow graph. Output ports are positional; the engine addresses them by
//! index, and the `key` only exists so the editor and the wiring layer can
//! tell them apart.
//!
//! Most actions declare a fixed set of ports in their
//! [`ActionMetadata`](crate::ActionMetadata). Actions whose port count
//! depends on configuration compute them per node through
//! [`InteractiveAction::output_ports`](crate::InteractiveAction::output_ports).

use serde::{Deserialize, Serialize};

/// Type alias for port keys (e.g. `"out"`, `"output_0"`).
pub type PortKey = String;

// ── OutputPort ──────────────────────────────────────────────────────────────

/// An output port declaration on an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPort {
    /// Port key, unique within one node (e.g. `"out"`, `"output_1"`).
    pub key: PortKey,
    /// Label shown on the connection handle.
    pub name: String,
}

impl OutputPort {
    /// Create a main flow output port labelled with its key.
    #[must_use]
    pub fn flow(key: impl Into<PortKey>) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
        }
    }

    /// Create a main flow output port with a display label.
    #[must_use]
    pub fn main(key: impl Into<PortKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

// ── Default factories ───────────────────────────────────────────────────────

/// Returns the default output ports: a single main flow output `"out"`.
#[must_use]
pub fn default_output_ports() -> Vec<OutputPort> {
    vec![OutputPort::flow("out")]
}

// ── Tests ───────────────────────────────────────────────────────────────────
