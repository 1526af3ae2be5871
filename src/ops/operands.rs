//! Named operands and attributes passed to an [`super::OperatorRunner`]

use crate::dtype::DType;
use crate::tensor::Tensor;

/// One operand: a slot name bound to a tensor handle
#[derive(Debug)]
pub struct Operand<T> {
    slot: String,
    tensor: T,
}

impl<T> Operand<T> {
    /// Slot name, e.g. `x_0` or `out`
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Bound tensor handle
    pub fn tensor(&self) -> &T {
        &self.tensor
    }

    /// Bound tensor handle, mutably (used to rebind outputs)
    pub fn tensor_mut(&mut self) -> &mut T {
        &mut self.tensor
    }
}

/// Role name → ordered list of `(slot, tensor)` operands
///
/// Roles keep the order in which they were first bound, and slots keep the
/// order in which they were bound within their role. Slot name and tensor live
/// in the same entry, so they can never drift apart.
#[derive(Debug)]
pub struct OperandMap<T> {
    roles: Vec<(String, Vec<Operand<T>>)>,
}

/// Read-only operands: role `"X"` and friends
pub type InputOperands<'a, R> = OperandMap<&'a Tensor<R>>;

/// Writable operands: the runner rebinds each slot to its result
pub type OutputOperands<'a, R> = OperandMap<&'a mut Tensor<R>>;

impl<T> OperandMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self { roles: Vec::new() }
    }

    /// Append `tensor` under `slot` to `role`, creating the role if needed
    pub fn bind(
        &mut self,
        role: impl Into<String>,
        slot: impl Into<String>,
        tensor: T,
    ) -> &mut Self {
        let role = role.into();
        let operand = Operand {
            slot: slot.into(),
            tensor,
        };
        match self.roles.iter_mut().find(|(name, _)| *name == role) {
            Some((_, operands)) => operands.push(operand),
            None => self.roles.push((role, vec![operand])),
        }
        self
    }

    /// Operands bound to `role`
    pub fn role(&self, role: &str) -> Option<&[Operand<T>]> {
        self.roles
            .iter()
            .find(|(name, _)| name == role)
            .map(|(_, operands)| operands.as_slice())
    }

    /// Operands bound to `role`, mutably
    pub fn role_mut(&mut self, role: &str) -> Option<&mut [Operand<T>]> {
        self.roles
            .iter_mut()
            .find(|(name, _)| name == role)
            .map(|(_, operands)| operands.as_mut_slice())
    }

    /// Iterate over roles in binding order
    pub fn roles(&self) -> impl Iterator<Item = (&str, &[Operand<T>])> {
        self.roles
            .iter()
            .map(|(name, operands)| (name.as_str(), operands.as_slice()))
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True when no role is bound
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl<T> Default for OperandMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of an operator attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// String
    Str(String),
    /// Element type
    DType(DType),
}

/// Ordered operator attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpAttrs {
    entries: Vec<(String, AttrValue)>,
}

impl OpAttrs {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute (builder style)
    pub fn with(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.entries.push((name.into(), value));
        self
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterate over attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
