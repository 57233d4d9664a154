//! Liquid cell payload and its settle/flow bookkeeping.

use strum_macros::EnumIter;

/// The concrete fluid a liquid cell holds.
///
/// All kinds share the same flow model; the tag exists so the driver can
/// paint distinct fluids and flow can spawn a same-kind cell into a
/// previously empty neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum LiquidKind {
    Water,
    Oil,
}

/// One of the four neighbor directions a cell can exchange liquid with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

/// Per-frame record of which neighbor directions gave or received liquid.
/// Only used for the close-phase render-size corrections.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlowDirections([bool; 4]);

impl FlowDirections {
    pub fn get(&self, dir: FlowDirection) -> bool {
        self.0[dir as usize]
    }
    pub fn mark(&mut self, dir: FlowDirection) {
        self.0[dir as usize] = true;
    }
    pub fn reset(&mut self) {
        self.0 = [false; 4];
    }
}

/// Liquid state at one grid location.
///
/// `settled` and `settle_count` stay private: clearing the settled flag
/// must always reset the counter, so all access goes through
/// [`LiquidCell::set_settled`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidCell {
    kind: LiquidKind,
    /// Quantity of fluid; nominally within `[0, LIQUID_MAX]` but may
    /// exceed it under compression
    pub amount: f32,
    /// Render-relevant fill fraction in `[0, 1]`, recomputed each close
    pub size: f32,
    /// This frame's flow record
    pub flow: FlowDirections,
    settled: bool,
    settle_count: u32,
}

impl LiquidCell {
    pub fn new(kind: LiquidKind, amount: f32) -> Self {
        Self {
            kind,
            amount,
            size: 1.0,
            flow: FlowDirections::default(),
            settled: false,
            settle_count: 0,
        }
    }

    /// A same-kind cell holding no liquid, for flow into an empty neighbor
    pub fn blank_copy(&self) -> Self {
        Self::new(self.kind, 0.0)
    }

    pub fn kind(&self) -> LiquidKind {
        self.kind
    }

    pub fn settled(&self) -> bool {
        self.settled
    }

    /// Set the settled flag. Un-settling resets the no-flow frame counter.
    pub fn set_settled(&mut self, settled: bool) {
        if !settled {
            self.settle_count = 0;
        }
        self.settled = settled;
    }

    /// Frames spent without net flow
    pub fn settle_count(&self) -> u32 {
        self.settle_count
    }

    /// Record one more frame without net flow, returning the new count
    pub fn tick_settle_count(&mut self) -> u32 {
        self.settle_count += 1;
        self.settle_count
    }

    /// Add fluid to this cell, disturbing it
    pub fn add_liquid(&mut self, amount: f32) {
        self.amount += amount;
        self.set_settled(false);
    }
}
