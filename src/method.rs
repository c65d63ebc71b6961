use std::marker::PhantomData;

use faer_core::{Mat, MatMut, MatRef};

use crate::{mesh::Mesh, Float};

/// State handed to a method at each time level.
#[derive(Clone, Copy)]
pub struct Ctx<'a> {
    pub mesh: &'a Mesh,
    /// index of the level being computed (0 at initialisation)
    pub n: usize,
    pub t: Float,
}

impl<'a> Ctx<'a> {
    pub fn courant(&self) -> Float {
        self.mesh.courant
    }

    pub fn size(&self) -> usize {
        self.mesh.space.steps
    }
}

/// An explicit update rule `u^n -> u^{n+1}` on a periodic grid.
///
/// Methods reading more than one previous level keep them in their own buffers, which
/// `init` receives the initial field to fill.
pub trait Method {
    fn init(&mut self, ctx: Ctx<'_>, u0: MatRef<'_, Float>);
    fn apply(&mut self, ctx: Ctx<'_>, u: MatRef<'_, Float>, v: MatMut<'_, Float>);
    fn name(&self) -> &'static str;
}

impl<M: Method + ?Sized> Method for Box<M> {
    fn init(&mut self, ctx: Ctx<'_>, u0: MatRef<'_, Float>) {
        (**self).init(ctx, u0)
    }

    fn apply(&mut self, ctx: Ctx<'_>, u: MatRef<'_, Float>, v: MatMut<'_, Float>) {
        (**self).apply(ctx, u, v)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

pub struct Buffers<const N: usize> {
    inner: Mat<Float>,
    _marker: PhantomData<[(); N]>,
}

impl<const N: usize> Default for Buffers<N> {
    fn default() -> Self {
        Self {
            inner: Mat::new(),
            _marker: PhantomData,
        }
    }
}

impl<const N: usize> Buffers<N> {
    pub fn resize(&mut self, size: usize) {
        self.inner.resize_with(size, N, |_, _| 0.0)
    }

    pub fn get(&self, n: usize) -> MatRef<'_, Float> {
        self.inner.as_ref().col(n)
    }

    pub fn get_mut(&mut self, n: usize) -> MatMut<'_, Float> {
        self.inner.as_mut().col(n)
    }
}
