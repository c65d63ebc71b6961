use core::fmt;

use faer_core::{zipped, MatMut, MatRef};
use reborrow::*;

use crate::{
    faer_add::{left, right},
    method::{Buffers, Ctx, Method},
    Float,
};

// u - C/2 (u_{j+1} - u_{j-1})
fn centered_to(c: Float, u: MatRef<'_, Float>, v: MatMut<'_, Float>) {
    let (um, up) = (left(u), right(u));
    let schema = |u: Float, um: Float, up: Float| u - 0.5 * c * (up - um);

    zipped!(v, u, um.as_ref(), up.as_ref())
        .for_each(|mut v, u, um, up| v.write(schema(u.read(), um.read(), up.read())))
}

/// Forward in time, centered in space. Unconditionally unstable.
#[derive(Default)]
pub struct Fecs;

impl Method for Fecs {
    fn init(&mut self, _ctx: Ctx<'_>, _u0: MatRef<'_, Float>) {}

    fn apply(&mut self, ctx: Ctx<'_>, u: MatRef<'_, Float>, v: MatMut<'_, Float>) {
        centered_to(ctx.courant(), u, v)
    }

    fn name(&self) -> &'static str {
        "FECS"
    }
}

/// First-order upwind for a positive velocity. Stable and monotone for `C <= 1`.
#[derive(Default)]
pub struct Upwind;

impl Method for Upwind {
    fn init(&mut self, _ctx: Ctx<'_>, _u0: MatRef<'_, Float>) {}

    fn apply(&mut self, ctx: Ctx<'_>, u: MatRef<'_, Float>, v: MatMut<'_, Float>) {
        let c = ctx.courant();
        let um = left(u);
        let schema = |u: Float, um: Float| u - c * (u - um);

        zipped!(v, u, um.as_ref()).for_each(|mut v, u, um| v.write(schema(u.read(), um.read())))
    }

    fn name(&self) -> &'static str {
        "Upwind"
    }
}

/// Centered in time and space, reading the two previous levels.
///
/// The first level is bootstrapped with a single FECS step.
#[derive(Default)]
pub struct Leapfrog {
    // u^{n-1}
    buf: Buffers<1>,
}

impl Method for Leapfrog {
    fn init(&mut self, ctx: Ctx<'_>, u0: MatRef<'_, Float>) {
        self.buf.resize(ctx.size());
        zipped!(self.buf.get_mut(0), u0).for_each(|mut p, u| p.write(u.read()));
    }

    fn apply(&mut self, ctx: Ctx<'_>, u: MatRef<'_, Float>, mut v: MatMut<'_, Float>) {
        let c = ctx.courant();

        if ctx.n <= 1 {
            centered_to(c, u, v.rb_mut());
        } else {
            let (um, up) = (left(u), right(u));
            let schema = |prev: Float, um: Float, up: Float| prev - c * (up - um);

            zipped!(v.rb_mut(), self.buf.get(0), um.as_ref(), up.as_ref()).for_each(
                |mut v, prev, um, up| v.write(schema(prev.read(), um.read(), up.read())),
            );
        }

        // u^n becomes u^{n-1} for the next level
        zipped!(self.buf.get_mut(0), u).for_each(|mut p, u| p.write(u.read()));
    }

    fn name(&self) -> &'static str {
        "Leapfrog"
    }
}

/// Second-order Lax-Wendroff. Stable for `C <= 1`.
#[derive(Default)]
pub struct LaxWendroff;

impl Method for LaxWendroff {
    fn init(&mut self, _ctx: Ctx<'_>, _u0: MatRef<'_, Float>) {}

    fn apply(&mut self, ctx: Ctx<'_>, u: MatRef<'_, Float>, v: MatMut<'_, Float>) {
        let c = ctx.courant();
        let (um, up) = (left(u), right(u));
        let schema = |u: Float, um: Float, up: Float| {
            u - 0.5 * c * (up - um) + 0.5 * c * c * (up - 2.0 * u + um)
        };

        zipped!(v, u, um.as_ref(), up.as_ref())
            .for_each(|mut v, u, um, up| v.write(schema(u.read(), um.read(), up.read())))
    }

    fn name(&self) -> &'static str {
        "Lax-Wendroff"
    }
}

/// The schemes that can be compared side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scheme {
    Fecs,
    Upwind,
    Leapfrog,
    LaxWendroff,
}

impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::Fecs,
        Scheme::Upwind,
        Scheme::Leapfrog,
        Scheme::LaxWendroff,
    ];

    /// A fresh instance of the update rule, with empty buffers.
    pub fn method(self) -> Box<dyn Method> {
        match self {
            Scheme::Fecs => Box::new(Fecs),
            Scheme::Upwind => Box::new(Upwind),
            Scheme::Leapfrog => Box::<Leapfrog>::default(),
            Scheme::LaxWendroff => Box::new(LaxWendroff),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Fecs => "FECS",
            Scheme::Upwind => "Upwind",
            Scheme::Leapfrog => "Leapfrog",
            Scheme::LaxWendroff => "Lax-Wendroff",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
