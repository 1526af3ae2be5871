//! Operator table for the operator runner
//!
//! Each [`OpDef`] describes an operator's operand roles and accepted
//! attributes. The runner validates a call against its definition before it
//! allocates anything.

use crate::error::{Error, Result};
use crate::ops::{OpAttrs, OperandMap};
use std::borrow::Cow;

/// How the slots of a role are named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotNaming {
    /// `prefix_0`, `prefix_1`, ...
    Indexed(&'static str),
    /// Exactly these names, in this order
    Fixed(&'static [&'static str]),
}

impl SlotNaming {
    /// Name of slot `index`, or `None` past the end of a fixed list
    pub fn name(&self, index: usize) -> Option<Cow<'static, str>> {
        match self {
            SlotNaming::Indexed(prefix) => Some(Cow::Owned(format!("{prefix}_{index}"))),
            SlotNaming::Fixed(names) => names.get(index).map(|n| Cow::Borrowed(*n)),
        }
    }
}

/// One operand role of an operator
#[derive(Debug, Clone, Copy)]
pub struct RoleDef {
    /// Role name, e.g. `"X"`
    pub name: &'static str,
    /// Slot naming rule
    pub slots: SlotNaming,
    /// Minimum number of slots
    pub min_slots: usize,
    /// Maximum number of slots, `None` for unbounded
    pub max_slots: Option<usize>,
}

impl RoleDef {
    const fn indexed(name: &'static str, prefix: &'static str, min_slots: usize) -> Self {
        Self {
            name,
            slots: SlotNaming::Indexed(prefix),
            min_slots,
            max_slots: None,
        }
    }

    const fn single(name: &'static str, slot: &'static [&'static str]) -> Self {
        Self {
            name,
            slots: SlotNaming::Fixed(slot),
            min_slots: 1,
            max_slots: Some(1),
        }
    }

    fn validate<T>(&self, op: &'static str, slots: &[super::Operand<T>]) -> Result<()> {
        let count = slots.len();
        if count < self.min_slots || self.max_slots.is_some_and(|max| count > max) {
            let expected = match self.max_slots {
                Some(max) if max == self.min_slots => format!("{max}"),
                Some(max) => format!("{}..={max}", self.min_slots),
                None => format!("at least {}", self.min_slots),
            };
            return Err(Error::operand_mismatch(
                op,
                format!("role {} expects {expected} slots, got {count}", self.name),
            ));
        }

        for (index, operand) in slots.iter().enumerate() {
            let expected = self.slots.name(index).ok_or_else(|| {
                Error::operand_mismatch(op, format!("role {} has no slot {index}", self.name))
            })?;
            if operand.slot() != expected {
                return Err(Error::operand_mismatch(
                    op,
                    format!(
                        "role {} slot {index} must be named {expected}, got {}",
                        self.name,
                        operand.slot()
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Computation performed by an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// Fused N-ary element-wise sum
    Sum,
    /// Binary element-wise addition
    ElementwiseAdd,
}

/// Static description of an operator
#[derive(Debug, Clone, Copy)]
pub struct OpDef {
    /// Name used to look the operator up
    pub name: &'static str,
    /// Computation to run
    pub kind: OperatorKind,
    /// Input roles
    pub inputs: &'static [RoleDef],
    /// Output roles
    pub outputs: &'static [RoleDef],
    /// Accepted attribute names
    pub attrs: &'static [&'static str],
}

/// Every operator the runner knows about
pub const OPERATORS: &[OpDef] = &[
    OpDef {
        name: "sum",
        kind: OperatorKind::Sum,
        inputs: &[RoleDef::indexed("X", "x", 1)],
        outputs: &[RoleDef::single("Out", &["out"])],
        attrs: &[],
    },
    OpDef {
        name: "elementwise_add",
        kind: OperatorKind::ElementwiseAdd,
        inputs: &[RoleDef::single("X", &["x"]), RoleDef::single("Y", &["y"])],
        outputs: &[RoleDef::single("Out", &["out"])],
        attrs: &[],
    },
];

/// Look up an operator by name
pub fn op_def(name: &str) -> Result<&'static OpDef> {
    OPERATORS
        .iter()
        .find(|op| op.name == name)
        .ok_or_else(|| Error::UnknownOperator {
            name: name.to_string(),
        })
}

impl OpDef {
    /// Check roles, slots and attributes of a call against this definition
    pub fn validate<I, O>(
        &self,
        inputs: &OperandMap<I>,
        outputs: &OperandMap<O>,
        attrs: &OpAttrs,
    ) -> Result<()> {
        validate_roles(self.name, self.inputs, inputs)?;
        validate_roles(self.name, self.outputs, outputs)?;

        if let Some((name, _)) = attrs
            .iter()
            .find(|(name, _)| !self.attrs.iter().any(|accepted| accepted == name))
        {
            return Err(Error::InvalidArgument {
                arg: "attrs",
                reason: format!("{} does not accept attribute {name}", self.name),
            });
        }
        Ok(())
    }
}

fn validate_roles<T>(op: &'static str, defs: &[RoleDef], map: &OperandMap<T>) -> Result<()> {
    if let Some((name, _)) = map
        .roles()
        .find(|(name, _)| !defs.iter().any(|def| def.name == *name))
    {
        return Err(Error::operand_mismatch(op, format!("unexpected role {name}")));
    }

    for def in defs {
        let slots = map
            .role(def.name)
            .ok_or_else(|| Error::operand_mismatch(op, format!("missing role {}", def.name)))?;
        def.validate(op, slots)?;
    }
    Ok(())
}
