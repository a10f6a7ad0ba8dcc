use crate::error::StepError;
use crate::state::{conform, State};

/// Scratch buffers for one stepper instance: the temporary evaluation
/// point `tmp` and the five intermediate stage derivatives `k2..k6`.
///
/// Buffers are conformed lazily to the dimension of the first state seen
/// and re-conformed only when a later call presents a different
/// dimension, so steady-state stepping at a fixed dimension allocates
/// nothing after the first call.
pub struct Workspace<C: State> {
    pub(crate) tmp: C,
    pub(crate) k2: C,
    pub(crate) k3: C,
    pub(crate) k4: C,
    pub(crate) k5: C,
    pub(crate) k6: C,
}

impl<C: State> Workspace<C> {
    /// Creates an unsized workspace; buffers take their dimension from the
    /// first reference container passed to [`ensure`](Self::ensure).
    pub fn new() -> Self {
        Self::with_dimension(0)
    }

    /// Creates a workspace pre-sized to `dim`. Required for container
    /// types that cannot be resized after construction.
    pub fn with_dimension(dim: usize) -> Self {
        Self {
            tmp: C::zeros(dim),
            k2: C::zeros(dim),
            k3: C::zeros(dim),
            k4: C::zeros(dim),
            k5: C::zeros(dim),
            k6: C::zeros(dim),
        }
    }

    /// Brings every scratch buffer to the dimension of `reference`.
    /// Returns whether any buffer was actually resized.
    ///
    /// For a non-resizable container type this degrades to a dimension
    /// check and fails with [`StepError::DimensionMismatch`] on the first
    /// buffer that does not already match.
    pub fn ensure(&mut self, reference: &C) -> Result<bool, StepError> {
        let dim = reference.dim();
        let mut resized = false;
        resized |= conform(&mut self.tmp, dim)?;
        resized |= conform(&mut self.k2, dim)?;
        resized |= conform(&mut self.k3, dim)?;
        resized |= conform(&mut self.k4, dim)?;
        resized |= conform(&mut self.k5, dim)?;
        resized |= conform(&mut self.k6, dim)?;
        Ok(resized)
    }
}

impl<C: State> Default for Workspace<C> {
    fn default() -> Self {
        Self::new()
    }
}
