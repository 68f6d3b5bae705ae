use std::ops::{Index, IndexMut};

use glam::{IVec2, UVec2};
use rayon::prelude::*;

/// Dense row-major 2D buffer; the container behind every per-pixel channel.
///
/// Dimensions are fixed at construction and never change; all grids that
/// describe one frame share the same dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2D<T> {
    data: Vec<T>,
    width: u32,
    height: u32,
}

impl<T> Grid2D<T> {
    pub fn new(width: u32, height: u32) -> Self
    where
        T: Clone + Default,
    {
        Self::filled(width, height, T::default())
    }

    pub fn filled(width: u32, height: u32, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: vec![value; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));

        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dim(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Returns whether given signed coordinates lay inside the grid.
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x < self.width as i32
            && pos.y < self.height as i32
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x < self.width && y < self.height {
            self.data.get(self.idx(x, y))
        } else {
            None
        }
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width as usize)
    }

    /// Parallel iterator over mutable rows; each pass writes every output
    /// cell from exactly one rayon task.
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = &mut [T]> + '_
    where
        T: Send,
    {
        let width = self.width as usize;

        self.data.par_chunks_mut(width)
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);

        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl<T> Index<(u32, u32)> for Grid2D<T> {
    type Output = T;

    fn index(&self, (x, y): (u32, u32)) -> &T {
        &self.data[self.idx(x, y)]
    }
}

impl<T> IndexMut<(u32, u32)> for Grid2D<T> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut T {
        let idx = self.idx(x, y);

        &mut self.data[idx]
    }
}

impl<T> Index<UVec2> for Grid2D<T> {
    type Output = T;

    fn index(&self, pos: UVec2) -> &T {
        &self[(pos.x, pos.y)]
    }
}

impl<T> IndexMut<UVec2> for Grid2D<T> {
    fn index_mut(&mut self, pos: UVec2) -> &mut T {
        &mut self[(pos.x, pos.y)]
    }
}
