use std::io::Write;

use bytemuck::bytes_of;
use faer_core::{zipped, Mat, MatRef};
use thiserror::Error;

use crate::{
    config::ConfigError,
    diagnostics,
    faer_add::to_vec,
    mesh::Mesh,
    method::{Ctx, Method},
    sim::Simulation,
    Float,
};

/// Above this many stored values per run, a warning is emitted before integrating.
pub const HISTORY_WARN_THRESHOLD: usize = 1 << 27;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("output error")]
    Io(#[from] std::io::Error),
}

pub struct ObsCtx<'ctx> {
    // Meta
    mesh: &'ctx Mesh,
    method: &'static str,
    time_sampling: usize,

    // Iteration info
    iter: usize,
    time: Float,
    solution: MatRef<'ctx, Float>,
    mass: Float,
}

impl<'ctx> ObsCtx<'ctx> {
    pub fn mesh(&self) -> &Mesh {
        self.mesh
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn iter(&self) -> usize {
        self.iter
    }

    pub fn time(&self) -> Float {
        self.time
    }

    pub fn solution(&self) -> MatRef<'_, Float> {
        self.solution
    }

    pub fn mass(&self) -> Float {
        self.mass
    }

    pub fn sampling_period(&self) -> usize {
        self.time_sampling
    }
}

#[allow(unused_variables)]
pub trait Observer {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }
}

/// Full time history of one scheme run.
///
/// Column `k` of the history is the field at step `k`; `mass()[k]` is its discrete integral.
#[derive(Debug, Clone)]
pub struct Solution {
    name: &'static str,
    history: Mat<Float>,
    mass: Vec<Float>,
}

impl Solution {
    fn new(name: &'static str, nx: usize, nt: usize) -> Self {
        Self {
            name,
            history: Mat::zeros(nx, nt + 1),
            mass: Vec::with_capacity(nt + 1),
        }
    }

    fn record(&mut self, n: usize, u: MatRef<'_, Float>, dx: Float) {
        zipped!(self.history.as_mut().col(n), u).for_each(|mut h, u| h.write(u.read()));
        self.mass.push(diagnostics::mass(u, dx));
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of stored snapshots, `Nt + 1`.
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    pub fn history(&self) -> MatRef<'_, Float> {
        self.history.as_ref()
    }

    pub fn snapshot(&self, n: usize) -> MatRef<'_, Float> {
        self.history.as_ref().col(n)
    }

    pub fn last(&self) -> MatRef<'_, Float> {
        self.snapshot(self.history.ncols() - 1)
    }

    pub fn mass(&self) -> &[Float] {
        &self.mass
    }

    /// History rows for plotting, one `Vec` per snapshot.
    pub fn rows(&self) -> Vec<Vec<Float>> {
        (0..self.history.ncols())
            .map(|n| to_vec(self.snapshot(n)))
            .collect()
    }
}

pub struct Driver<'s, 'd, M> {
    pub(crate) sim: &'s Simulation,
    pub(crate) method: M,
    pub(crate) observers: Vec<Box<dyn Observer + 'd>>,
    pub(crate) time_sampling: usize,
}

impl<'s, 'd, M: Method> Driver<'s, 'd, M> {
    pub fn new(sim: &'s Simulation, method: M) -> Self {
        let time_sampling = 1 + sim.mesh.time.steps / 10;
        Self {
            sim,
            method,
            observers: Vec::new(),
            time_sampling,
        }
    }

    /// Observers see every `steps`-th level (the initial and final levels are always seen).
    pub fn with_time_sampling(mut self, steps: usize) -> Self {
        self.time_sampling = steps.max(1);
        self
    }

    pub fn with_observer(mut self, observer: impl Observer + 'd) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn run(&mut self) -> Result<Solution, SimError> {
        let Simulation { mesh, u0, .. } = self.sim;
        let (nx, nt, dx) = (mesh.nx(), mesh.nt(), mesh.dx());
        let name = self.method.name();

        let stored = nx.saturating_mul(nt + 1);
        if stored > HISTORY_WARN_THRESHOLD {
            tracing::warn!(
                "`{}` history holds {} values ({} MiB)",
                name,
                stored,
                stored.saturating_mul(std::mem::size_of::<Float>()) >> 20
            );
        }

        let mut solution = Solution::new(name, nx, nt);
        let mut u = u0.clone();
        let mut v = Mat::<Float>::zeros(nx, 1);

        // set initial condition
        {
            solution.record(0, u.as_ref(), dx);
            self.method.init(
                Ctx {
                    mesh,
                    n: 0,
                    t: mesh.time.lower,
                },
                u.as_ref(),
            );

            for o in self.observers.iter_mut() {
                o.at_startup(ObsCtx {
                    mesh,
                    method: name,
                    time_sampling: self.time_sampling,
                    iter: 0,
                    time: mesh.time.lower,
                    solution: u.as_ref(),
                    mass: solution.mass[0],
                })?;
            }
        }

        // propagate solution
        for (n, t) in mesh.time.iter().enumerate().skip(1) {
            self.method.apply(Ctx { mesh, n, t }, u.as_ref(), v.as_mut());
            solution.record(n, v.as_ref(), dx);

            if n % self.time_sampling == 0 {
                for o in self.observers.iter_mut() {
                    o.at_each_iteration(ObsCtx {
                        mesh,
                        method: name,
                        time_sampling: self.time_sampling,
                        iter: n,
                        time: t,
                        solution: v.as_ref(),
                        mass: solution.mass[n],
                    })?;
                }
            }

            // exchange u and v
            std::mem::swap(&mut u, &mut v);
        }

        for o in self.observers.iter_mut() {
            o.at_cleanup(ObsCtx {
                mesh,
                method: name,
                time_sampling: self.time_sampling,
                iter: nt,
                time: mesh.time.upper,
                solution: u.as_ref(),
                mass: solution.mass[nt],
            })?;
        }

        Ok(solution)
    }
}

pub struct Logger;

impl Observer for Logger {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::INFO,
            "start of `{}` run (C={}, Δx={:e} ({} points), Δt={:e} ({} steps))",
            ctx.method(),
            ctx.mesh().courant(),
            ctx.mesh().dx(),
            ctx.mesh().nx(),
            ctx.mesh().dt(),
            ctx.mesh().nt(),
        );
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::TRACE,
            "`{}`: step {} (t={:.4}, mass={:e}, max|u|={:e})",
            ctx.method(),
            ctx.iter(),
            ctx.time(),
            ctx.mass(),
            diagnostics::max_abs(ctx.solution()),
        );
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::INFO,
            "finished `{}` run (final mass={:e}, max|u|={:e})",
            ctx.method(),
            ctx.mass(),
            diagnostics::max_abs(ctx.solution()),
        );
        Ok(())
    }
}

const CSFF1_HEADER: &[u8] = b"CSFF1";
const CSFF1_MARKER: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF];

/// Binary dump of the sampled levels of a run.
///
/// Layout: magic, float size, `Nx`, sampling period, `Nt`, space and time bounds, Courant
/// number, method name (length-prefixed), marker, then one raw frame per sampled level,
/// and a closing marker.
pub struct Csff1Writer<W> {
    output: W,
}

impl<W: Write> Csff1Writer<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    fn write_frame(&mut self, u: MatRef<'_, Float>) -> Result<(), SimError> {
        let frame = to_vec(u);
        self.output
            .write_all(bytemuck::cast_slice(&frame))
            .map_err(SimError::from)
    }
}

impl<W: Write> Observer for Csff1Writer<W> {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        let mesh = ctx.mesh;
        let output = &mut self.output;
        // magic bytes
        output.write_all(CSFF1_HEADER)?;
        // write float precision
        output.write_all(bytes_of(&(std::mem::size_of::<Float>() as u8)))?;
        // write dimensions
        output.write_all(bytes_of(&(mesh.space.steps as u32)))?;
        output.write_all(bytes_of(&(ctx.time_sampling as u32)))?;
        output.write_all(bytes_of(&(mesh.time.steps as u32)))?;
        // write bounds
        output.write_all(bytes_of(&mesh.space.lower))?;
        output.write_all(bytes_of(&mesh.space.upper))?;
        output.write_all(bytes_of(&mesh.time.lower))?;
        output.write_all(bytes_of(&mesh.time.upper))?;
        output.write_all(bytes_of(&mesh.courant))?;
        // write method name
        let name = ctx.method.as_bytes();
        output.write_all(bytes_of(&(name.len() as u32)))?;
        output.write_all(name)?;

        output.write_all(CSFF1_MARKER)?;

        // write initial condition
        self.write_frame(ctx.solution)
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        self.write_frame(ctx.solution)
    }

    fn at_cleanup(&mut self, _ctx: ObsCtx) -> Result<(), SimError> {
        self.output.write_all(CSFF1_MARKER)?;
        self.output.flush().map_err(SimError::from)
    }
}
