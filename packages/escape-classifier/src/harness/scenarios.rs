//! Built-in scenarios
//!
//! The three motivating programs, each with its expected verdict:
//! - `return-value-stack`: value returned by copy, `s0` stays on the stack
//! - `ptr-iface-inline`: pointer behind a single-implementor interface, escapes
//! - `ptr-iface-multi-impl`: runtime choice between two implementors, both escape

use super::program_spec::ProgramSpec;
use crate::errors::Result;

/// A named, embedded program description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    yaml: &'static str,
}

impl Scenario {
    pub fn spec(&self) -> Result<ProgramSpec> {
        ProgramSpec::from_yaml_str(self.yaml)
    }

    pub fn yaml(&self) -> &'static str {
        self.yaml
    }
}

pub const RETURN_VALUE_STACK: Scenario = Scenario {
    name: "return-value-stack",
    yaml: include_str!("../../demos/return_value_stack.yaml"),
};

pub const PTR_IFACE_INLINE: Scenario = Scenario {
    name: "ptr-iface-inline",
    yaml: include_str!("../../demos/ptr_iface_inline.yaml"),
};

pub const PTR_IFACE_MULTI_IMPL: Scenario = Scenario {
    name: "ptr-iface-multi-impl",
    yaml: include_str!("../../demos/ptr_iface_multi_impl.yaml"),
};

pub fn all() -> [Scenario; 3] {
    [RETURN_VALUE_STACK, PTR_IFACE_INLINE, PTR_IFACE_MULTI_IMPL]
}

pub fn find(name: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.name == name)
}
