use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the stepper.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// User-supplied right-hand side of an ODE system dx/dt = f(x, t).
pub trait OdeSystem<T: Scalar> {
    /// Evaluates the vector field at state `x` and time `t`.
    /// x: current state
    /// t: current time
    /// dxdt: buffer to write dx/dt into
    ///
    /// A returned error aborts the surrounding step immediately; the
    /// stepper never retries an evaluation.
    fn eval(&self, t: T, x: &[T], dxdt: &mut [T]) -> anyhow::Result<()>;
}
