use crate::traits::Scalar;

/// Fused element-wise linear combinations over parallel slices.
///
/// Each operation computes `out[i] = c1*v1[i] + .. + cm*vm[i]` over the
/// full length of `out` in a single pass. The stepper expresses every
/// intermediate evaluation point, the output combination, and the error
/// combination through these, so a custom implementation (SIMD, chunked,
/// instrumented) can be injected at stepper construction without touching
/// the tableau logic.
///
/// All slices passed by the stepper have equal length.
#[allow(clippy::too_many_arguments)]
pub trait LinearCombiner<T: Scalar> {
    fn sum2(&self, out: &mut [T], c1: T, v1: &[T], c2: T, v2: &[T]);

    fn sum3(&self, out: &mut [T], c1: T, v1: &[T], c2: T, v2: &[T], c3: T, v3: &[T]);

    fn sum4(
        &self,
        out: &mut [T],
        c1: T,
        v1: &[T],
        c2: T,
        v2: &[T],
        c3: T,
        v3: &[T],
        c4: T,
        v4: &[T],
    );

    fn sum5(
        &self,
        out: &mut [T],
        c1: T,
        v1: &[T],
        c2: T,
        v2: &[T],
        c3: T,
        v3: &[T],
        c4: T,
        v4: &[T],
        c5: T,
        v5: &[T],
    );

    fn sum6(
        &self,
        out: &mut [T],
        c1: T,
        v1: &[T],
        c2: T,
        v2: &[T],
        c3: T,
        v3: &[T],
        c4: T,
        v4: &[T],
        c5: T,
        v5: &[T],
        c6: T,
        v6: &[T],
    );
}

/// Straightforward indexed-loop combiner. Each sum is one fused pass, not
/// a sequence of scalar multiply-accumulate sweeps.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCombiner;

#[allow(clippy::too_many_arguments)]
impl<T: Scalar> LinearCombiner<T> for DefaultCombiner {
    fn sum2(&self, out: &mut [T], c1: T, v1: &[T], c2: T, v2: &[T]) {
        for i in 0..out.len() {
            out[i] = c1 * v1[i] + c2 * v2[i];
        }
    }

    fn sum3(&self, out: &mut [T], c1: T, v1: &[T], c2: T, v2: &[T], c3: T, v3: &[T]) {
        for i in 0..out.len() {
            out[i] = c1 * v1[i] + c2 * v2[i] + c3 * v3[i];
        }
    }

    fn sum4(
        &self,
        out: &mut [T],
        c1: T,
        v1: &[T],
        c2: T,
        v2: &[T],
        c3: T,
        v3: &[T],
        c4: T,
        v4: &[T],
    ) {
        for i in 0..out.len() {
            out[i] = c1 * v1[i] + c2 * v2[i] + c3 * v3[i] + c4 * v4[i];
        }
    }

    fn sum5(
        &self,
        out: &mut [T],
        c1: T,
        v1: &[T],
        c2: T,
        v2: &[T],
        c3: T,
        v3: &[T],
        c4: T,
        v4: &[T],
        c5: T,
        v5: &[T],
    ) {
        for i in 0..out.len() {
            out[i] = c1 * v1[i] + c2 * v2[i] + c3 * v3[i] + c4 * v4[i] + c5 * v5[i];
        }
    }

    fn sum6(
        &self,
        out: &mut [T],
        c1: T,
        v1: &[T],
        c2: T,
        v2: &[T],
        c3: T,
        v3: &[T],
        c4: T,
        v4: &[T],
        c5: T,
        v5: &[T],
        c6: T,
        v6: &[T],
    ) {
        for i in 0..out.len() {
            out[i] =
                c1 * v1[i] + c2 * v2[i] + c3 * v3[i] + c4 * v4[i] + c5 * v5[i] + c6 * v6[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum2_applies_both_coefficients() {
        let mut out = [0.0; 3];
        DefaultCombiner.sum2(&mut out, 1.0, &[1.0, 2.0, 3.0], 0.5, &[2.0, 4.0, 6.0]);
        assert_eq!(out, [2.0, 4.0, 6.0]);
    }

    #[test]
    fn sum6_matches_hand_computed_combination() {
        let mut out = [0.0; 2];
        DefaultCombiner.sum6(
            &mut out,
            1.0,
            &[1.0, -1.0],
            2.0,
            &[0.5, 0.5],
            -1.0,
            &[1.0, 1.0],
            0.25,
            &[4.0, 8.0],
            0.0,
            &[9.0, 9.0],
            3.0,
            &[1.0, 2.0],
        );
        assert_eq!(out, [5.0, 7.0]);
    }
}
