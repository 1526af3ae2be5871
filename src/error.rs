//! Error types for addn

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using addn's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in addn operations
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// DType is supported but the crate feature enabling it is off
    #[error("DType {dtype:?} requires the '{feature}' feature")]
    FeatureRequired {
        /// The dtype that needs the feature
        dtype: DType,
        /// Name of the cargo feature
        feature: &'static str,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Device mismatch between operands
    #[error("Device mismatch: tensors must be on the same device")]
    DeviceMismatch,

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Output buffer shares storage with one of the operands
    #[error("Output of '{op}' aliases an input buffer")]
    AliasedOutput {
        /// The operation name
        op: &'static str,
    },

    /// The operator runner has no operator registered under this name
    #[error("Unknown operator '{name}'")]
    UnknownOperator {
        /// Requested operator name
        name: String,
    },

    /// Operand roles or slot names do not match the operator definition
    #[error("Operand mismatch for operator '{op}': {reason}")]
    OperandMismatch {
        /// Operator name
        op: &'static str,
        /// What did not match
        reason: String,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an operand mismatch error
    pub fn operand_mismatch(op: &'static str, reason: impl Into<String>) -> Self {
        Self::OperandMismatch {
            op,
            reason: reason.into(),
        }
    }
}
