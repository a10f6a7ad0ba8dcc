use nalgebra::DVector;

use crate::error::StepError;
use crate::traits::Scalar;

/// A fixed-order container of floating-point values representing a
/// solution vector or a derivative.
///
/// The stepper treats states, derivatives, and its own scratch buffers
/// uniformly through this trait. `RESIZEABLE` is a capability flag
/// resolved at compile time: containers that cannot change dimension
/// (e.g. `[T; N]`) still work, but every buffer the stepper touches must
/// then already carry the problem dimension.
pub trait State {
    type Elem: Scalar;

    /// Whether the container can change its dimension after construction.
    const RESIZEABLE: bool;

    /// Constructs a zero-filled container of the given dimension.
    /// Statically sized containers ignore `dim` and come out at their
    /// fixed dimension.
    fn zeros(dim: usize) -> Self;

    fn dim(&self) -> usize;

    /// Brings the container to `dim`. A no-op for containers whose
    /// `RESIZEABLE` is false; those are only ever dimension-checked.
    fn resize(&mut self, dim: usize);

    fn as_slice(&self) -> &[Self::Elem];

    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

/// Checks `buf` against the target dimension, resizing when the container
/// supports it. Returns whether a resize actually happened.
pub(crate) fn conform<C: State>(buf: &mut C, dim: usize) -> Result<bool, StepError> {
    if buf.dim() == dim {
        return Ok(false);
    }
    if C::RESIZEABLE {
        buf.resize(dim);
        Ok(true)
    } else {
        Err(StepError::DimensionMismatch {
            expected: dim,
            actual: buf.dim(),
        })
    }
}

impl<T: Scalar> State for Vec<T> {
    type Elem = T;

    const RESIZEABLE: bool = true;

    fn zeros(dim: usize) -> Self {
        vec![T::zero(); dim]
    }

    fn dim(&self) -> usize {
        self.len()
    }

    fn resize(&mut self, dim: usize) {
        self.resize(dim, T::zero());
    }

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Scalar, const N: usize> State for [T; N] {
    type Elem = T;

    const RESIZEABLE: bool = false;

    fn zeros(_dim: usize) -> Self {
        [T::zero(); N]
    }

    fn dim(&self) -> usize {
        N
    }

    fn resize(&mut self, _dim: usize) {}

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Scalar> State for DVector<T> {
    type Elem = T;

    const RESIZEABLE: bool = true;

    fn zeros(dim: usize) -> Self {
        DVector::zeros(dim)
    }

    fn dim(&self) -> usize {
        self.nrows()
    }

    fn resize(&mut self, dim: usize) {
        // Scratch contents are overwritten before use, so stale values
        // need not survive the resize.
        *self = DVector::zeros(dim);
    }

    fn as_slice(&self) -> &[T] {
        self.as_slice()
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conform_grows_a_resizable_container() {
        let mut buf: Vec<f64> = Vec::zeros(0);
        assert!(conform(&mut buf, 3).expect("conform"));
        assert_eq!(buf.dim(), 3);
        assert_eq!(buf.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn conform_is_a_noop_at_matching_dimension() {
        let mut buf: Vec<f64> = Vec::zeros(4);
        assert!(!conform(&mut buf, 4).expect("conform"));
    }

    #[test]
    fn conform_rejects_a_mismatched_fixed_container() {
        let mut buf: [f64; 2] = State::zeros(0);
        assert_eq!(buf.dim(), 2);
        match conform(&mut buf, 3) {
            Err(StepError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn dvector_backend_resizes_and_exposes_slices() {
        let mut v: DVector<f64> = State::zeros(2);
        State::resize(&mut v, 5);
        assert_eq!(State::dim(&v), 5);
        State::as_mut_slice(&mut v)[4] = 1.25;
        assert_eq!(State::as_slice(&v)[4], 1.25);
    }
}
