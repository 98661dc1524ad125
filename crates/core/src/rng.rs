//! RNG module - bag randomizer and the upcoming-shape queue
//!
//! Implements the "bag" randomization algorithm: each bag holds one of each
//! shape in shuffled order, and bags are concatenated onto the queue whenever
//! it runs low. Every shape therefore appears once per seven draws and no more
//! than twelve draws separate two appearances of the same shape.
//!
//! The generator is a small LCG so that a game is a pure function of its seed.

use std::collections::VecDeque;

use crate::types::Shape;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current state, usable as the seed of a follow-up game
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// A uniformly shuffled permutation of all seven shapes
pub fn draw_bag(rng: &mut SimpleRng) -> [Shape; 7] {
    let mut bag = Shape::ALL;
    rng.shuffle(&mut bag);
    bag
}

/// Upcoming shapes, refilled a bag at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeQueue {
    upcoming: VecDeque<Shape>,
    watermark: usize,
    rng: SimpleRng,
}

impl ShapeQueue {
    /// Create a queue filled to at least `watermark` shapes
    pub fn new(seed: u32, watermark: usize) -> Self {
        let mut queue = Self {
            upcoming: VecDeque::with_capacity(watermark + 7),
            watermark,
            rng: SimpleRng::new(seed),
        };
        queue.refill();
        queue
    }

    fn refill(&mut self) {
        while self.upcoming.len() < self.watermark.max(1) {
            let bag = draw_bag(&mut self.rng);
            self.upcoming.extend(bag);
        }
    }

    /// Take the next shape, topping the queue back up past the watermark
    pub fn pop(&mut self) -> Shape {
        if self.upcoming.is_empty() {
            self.refill();
        }
        let shape = self.upcoming.pop_front().unwrap_or(Shape::I);
        self.refill();
        shape
    }

    /// Put a shape back at the head of the queue (hold swaps)
    pub fn push_front(&mut self, shape: Shape) {
        self.upcoming.push_front(shape);
    }

    /// Peek at the next shape without removing it
    pub fn peek(&self) -> Option<Shape> {
        self.upcoming.front().copied()
    }

    /// Upcoming shapes in draw order
    pub fn iter(&self) -> impl Iterator<Item = Shape> + '_ {
        self.upcoming.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Get the current RNG state (for restarting with a fresh sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
