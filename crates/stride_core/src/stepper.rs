use crate::algebra::{DefaultCombiner, LinearCombiner};
use crate::error::StepError;
use crate::state::{conform, State};
use crate::traits::{OdeSystem, Scalar};
use num_traits::FromPrimitive;
use crate::workspace::Workspace;

/// Butcher tableau of the Cash-Karp 5(4) pair.
///
/// `a*` are the stage-time fractions, `b*` the stage-weight matrix, `c*`
/// the 5th-order combination weights (c2 = c5 = 0) and `dc*` the error
/// weights, i.e. the difference between the 5th-order and the embedded
/// 4th-order weights. Built once per stepper and never mutated.
struct Tableau<T> {
    a2: T,
    a3: T,
    a4: T,
    a5: T,
    a6: T,
    b21: T,
    b31: T,
    b32: T,
    b41: T,
    b42: T,
    b43: T,
    b51: T,
    b52: T,
    b53: T,
    b54: T,
    b61: T,
    b62: T,
    b63: T,
    b64: T,
    b65: T,
    c1: T,
    c3: T,
    c4: T,
    c6: T,
    dc1: T,
    dc3: T,
    dc4: T,
    dc5: T,
    dc6: T,
}

impl<T: Scalar> Tableau<T> {
    fn new() -> Self {
        let f = |v: f64| T::from_f64(v).unwrap();
        Self {
            a2: f(0.2),
            a3: f(0.3),
            a4: f(0.6),
            a5: f(1.0),
            a6: f(0.875),
            b21: f(0.2),
            b31: f(3.0 / 40.0),
            b32: f(9.0 / 40.0),
            b41: f(0.3),
            b42: f(-0.9),
            b43: f(1.2),
            b51: f(-11.0 / 54.0),
            b52: f(2.5),
            b53: f(-70.0 / 27.0),
            b54: f(35.0 / 27.0),
            b61: f(1631.0 / 55296.0),
            b62: f(175.0 / 512.0),
            b63: f(575.0 / 13824.0),
            b64: f(44275.0 / 110592.0),
            b65: f(253.0 / 4096.0),
            c1: f(37.0 / 378.0),
            c3: f(250.0 / 621.0),
            c4: f(125.0 / 594.0),
            c6: f(512.0 / 1771.0),
            dc1: f(37.0 / 378.0 - 2825.0 / 27648.0),
            dc3: f(250.0 / 621.0 - 18575.0 / 48384.0),
            dc4: f(125.0 / 594.0 - 13525.0 / 55296.0),
            dc5: f(-277.0 / 14336.0),
            dc6: f(512.0 / 1771.0 - 0.25),
        }
    }
}

/// Cash-Karp 5(4) embedded Runge-Kutta stepper.
///
/// Advances a state by one increment `dt` (positive or negative) through
/// six fixed stages and can derive a local truncation error estimate from
/// the same stage derivatives at no extra right-hand-side evaluations.
///
/// One instance privately owns its scratch buffers and is meant for
/// single-threaded use; a second thread needs its own instance. The
/// caller supplies the stage-1 derivative `dxdt` precomputed, keeping the
/// cost at five evaluations per step. Aliasing the output with the input
/// state or derivative is impossible through the `&`/`&mut` signatures.
pub struct CashKarp54<C: State, A = DefaultCombiner> {
    workspace: Workspace<C>,
    tableau: Tableau<C::Elem>,
    combiner: A,
}

impl<C: State> CashKarp54<C> {
    /// Creates a stepper whose scratch buffers take their dimension from
    /// the first state seen.
    pub fn new() -> Self {
        Self::with_combiner(DefaultCombiner)
    }

    /// Creates a stepper pre-sized to `dim`. Required for container types
    /// that cannot be resized after construction.
    pub fn with_dimension(dim: usize) -> Self {
        Self {
            workspace: Workspace::with_dimension(dim),
            tableau: Tableau::new(),
            combiner: DefaultCombiner,
        }
    }
}

impl<C: State> Default for CashKarp54<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: State, A: LinearCombiner<C::Elem>> CashKarp54<C, A> {
    /// Order of the advancing formula.
    pub const ORDER: usize = 5;
    /// Order of the embedded formula the error estimate is taken against.
    pub const ERROR_ORDER: usize = 4;
    /// Number of stages, including the caller-supplied first derivative.
    pub const STAGES: usize = 6;

    /// Creates a stepper with an injected linear-combination strategy.
    pub fn with_combiner(combiner: A) -> Self {
        Self {
            workspace: Workspace::new(),
            tableau: Tableau::new(),
            combiner,
        }
    }

    /// Brings the scratch buffers to the dimension of `reference`,
    /// returning whether any buffer was resized. Also invoked implicitly
    /// at the start of every step.
    pub fn resize(&mut self, reference: &C) -> Result<bool, StepError> {
        self.workspace.ensure(reference)
    }

    /// Advances `xin` at time `t` by one increment `dt` into `out`.
    ///
    /// `dxdt` must hold the derivative of `xin` at `t`; it is trusted and
    /// never recomputed. On success the five intermediate stage
    /// derivatives remain cached for [`step_with_error`](Self::step_with_error).
    /// On failure `out` and the scratch buffers are left partially
    /// written and must not be read.
    pub fn step<S: OdeSystem<C::Elem>>(
        &mut self,
        system: &S,
        xin: &C,
        dxdt: &C,
        t: C::Elem,
        out: &mut C,
        dt: C::Elem,
    ) -> Result<(), StepError> {
        let dim = xin.dim();
        if dxdt.dim() != dim {
            return Err(StepError::DimensionMismatch {
                expected: dim,
                actual: dxdt.dim(),
            });
        }
        self.workspace.ensure(xin)?;
        conform(out, dim)?;

        self.evaluate_stages(system, xin, dxdt, t, dt)?;

        let tb = &self.tableau;
        let ws = &self.workspace;
        let one = C::Elem::from_f64(1.0).unwrap();
        // out = xin + dt*(c1*dxdt + c3*k3 + c4*k4 + c6*k6)
        self.combiner.sum5(
            out.as_mut_slice(),
            one,
            xin.as_slice(),
            dt * tb.c1,
            dxdt.as_slice(),
            dt * tb.c3,
            ws.k3.as_slice(),
            dt * tb.c4,
            ws.k4.as_slice(),
            dt * tb.c6,
            ws.k6.as_slice(),
        );
        Ok(())
    }

    /// Like [`step`](Self::step), but additionally fills `err` with the
    /// estimated local truncation error of the 5th-order solution against
    /// the embedded 4th-order one, reusing the cached stage derivatives.
    /// `out` is identical to what `step` produces for the same inputs,
    /// and no extra right-hand-side evaluation occurs. The estimate is
    /// raw: it is neither normalized nor compared to a tolerance here.
    pub fn step_with_error<S: OdeSystem<C::Elem>>(
        &mut self,
        system: &S,
        xin: &C,
        dxdt: &C,
        t: C::Elem,
        out: &mut C,
        dt: C::Elem,
        err: &mut C,
    ) -> Result<(), StepError> {
        self.step(system, xin, dxdt, t, out, dt)?;
        conform(err, xin.dim())?;

        let tb = &self.tableau;
        let ws = &self.workspace;
        // err = dt*(dc1*dxdt + dc3*k3 + dc4*k4 + dc5*k5 + dc6*k6)
        self.combiner.sum5(
            err.as_mut_slice(),
            dt * tb.dc1,
            dxdt.as_slice(),
            dt * tb.dc3,
            ws.k3.as_slice(),
            dt * tb.dc4,
            ws.k4.as_slice(),
            dt * tb.dc5,
            ws.k5.as_slice(),
            dt * tb.dc6,
            ws.k6.as_slice(),
        );
        Ok(())
    }

    /// Runs the five intermediate derivative evaluations, leaving k2..k6
    /// in the workspace. Each evaluation point is built from the previous
    /// stages in a single fused combination.
    fn evaluate_stages<S: OdeSystem<C::Elem>>(
        &mut self,
        system: &S,
        xin: &C,
        dxdt: &C,
        t: C::Elem,
        dt: C::Elem,
    ) -> Result<(), StepError> {
        let tb = &self.tableau;
        let cb = &self.combiner;
        let ws = &mut self.workspace;
        let one = C::Elem::from_f64(1.0).unwrap();
        let x = xin.as_slice();
        let dx = dxdt.as_slice();

        // tmp = xin + dt*b21*dxdt
        cb.sum2(ws.tmp.as_mut_slice(), one, x, dt * tb.b21, dx);
        system
            .eval(t + dt * tb.a2, ws.tmp.as_slice(), ws.k2.as_mut_slice())
            .map_err(StepError::Evaluation)?;

        // tmp = xin + dt*(b31*dxdt + b32*k2)
        cb.sum3(
            ws.tmp.as_mut_slice(),
            one,
            x,
            dt * tb.b31,
            dx,
            dt * tb.b32,
            ws.k2.as_slice(),
        );
        system
            .eval(t + dt * tb.a3, ws.tmp.as_slice(), ws.k3.as_mut_slice())
            .map_err(StepError::Evaluation)?;

        // tmp = xin + dt*(b41*dxdt + b42*k2 + b43*k3)
        cb.sum4(
            ws.tmp.as_mut_slice(),
            one,
            x,
            dt * tb.b41,
            dx,
            dt * tb.b42,
            ws.k2.as_slice(),
            dt * tb.b43,
            ws.k3.as_slice(),
        );
        system
            .eval(t + dt * tb.a4, ws.tmp.as_slice(), ws.k4.as_mut_slice())
            .map_err(StepError::Evaluation)?;

        // tmp = xin + dt*(b51*dxdt + b52*k2 + b53*k3 + b54*k4)
        cb.sum5(
            ws.tmp.as_mut_slice(),
            one,
            x,
            dt * tb.b51,
            dx,
            dt * tb.b52,
            ws.k2.as_slice(),
            dt * tb.b53,
            ws.k3.as_slice(),
            dt * tb.b54,
            ws.k4.as_slice(),
        );
        system
            .eval(t + dt * tb.a5, ws.tmp.as_slice(), ws.k5.as_mut_slice())
            .map_err(StepError::Evaluation)?;

        // tmp = xin + dt*(b61*dxdt + b62*k2 + b63*k3 + b64*k4 + b65*k5)
        cb.sum6(
            ws.tmp.as_mut_slice(),
            one,
            x,
            dt * tb.b61,
            dx,
            dt * tb.b62,
            ws.k2.as_slice(),
            dt * tb.b63,
            ws.k3.as_slice(),
            dt * tb.b64,
            ws.k4.as_slice(),
            dt * tb.b65,
            ws.k5.as_slice(),
        );
        system
            .eval(t + dt * tb.a6, ws.tmp.as_slice(), ws.k6.as_mut_slice())
            .map_err(StepError::Evaluation)?;

        Ok(())
    }
}
