//! The `stride_core` crate implements one step of the Cash-Karp 5(4)
//! embedded Runge-Kutta pair: it advances an ODE state by a single time
//! increment and can derive a local truncation error estimate from the same
//! six stage evaluations, with no extra derivative calls.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `OdeSystem` (the
//!   user-supplied right-hand side).
//! - **State**: container abstraction over the solution vector, with
//!   `Vec`, fixed-array, and `nalgebra::DVector` backends.
//! - **Algebra**: the `LinearCombiner` strategy for fused element-wise
//!   linear combinations across parallel containers.
//! - **Workspace**: reusable scratch buffers with size-change-triggered
//!   reallocation.
//! - **Stepper**: the `CashKarp54` stepper itself.
//!
//! Step-size control, error norms, and dense output belong to the caller;
//! this crate only produces the advanced state and the raw error vector.

pub mod algebra;
pub mod error;
pub mod state;
pub mod stepper;
pub mod traits;
pub mod workspace;
