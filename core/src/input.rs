//! # Input
//! Two controllers, each reported as a 16-bit mask of buttons.
//!
//! The driver `set`s new masks whenever it likes, but the CPU only ever sees
//! the masks captured by the last `latch`, which happens once per frame at
//! vsync. Reads between two latches therefore always agree.

/// Bits of a controller mask
pub mod buttons {
    pub const UP: u16 = 1 << 0;
    pub const DOWN: u16 = 1 << 1;
    pub const LEFT: u16 = 1 << 2;
    pub const RIGHT: u16 = 1 << 3;
    pub const SELECT: u16 = 1 << 4;
    pub const START: u16 = 1 << 5;
    pub const A: u16 = 1 << 6;
    pub const B: u16 = 1 << 7;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    One,
    Two,
}

impl Controller {
    pub fn index(self) -> usize {
        match self {
            Controller::One => 0,
            Controller::Two => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    pending: [u16; 2],
    latched: [u16; 2],
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the newest mask; visible after the next `latch`
    pub fn set(&mut self, controller: Controller, mask: u16) {
        self.pending[controller.index()] = mask;
    }

    /// The mask captured at the last vsync
    pub fn get(&self, controller: Controller) -> u16 {
        self.latched[controller.index()]
    }

    pub fn latch(&mut self) -> [u16; 2] {
        self.latched = self.pending;
        self.latched
    }
}

#[cfg(test)]
mod tests {
    use super::buttons::*;
    use super::*;

    #[test]
    fn test_set_is_invisible_until_latched() {
        let mut input = InputLatch::new();
        input.set(Controller::One, UP | A);
        assert_eq!(input.get(Controller::One), 0);
        input.latch();
        assert_eq!(input.get(Controller::One), UP | A);
    }

    #[test]
    fn test_reads_between_latches_are_stable() {
        let mut input = InputLatch::new();
        input.set(Controller::Two, START);
        input.latch();
        let first = input.get(Controller::Two);
        input.set(Controller::Two, B | LEFT);
        for _ in 0..10 {
            assert_eq!(input.get(Controller::Two), first);
        }
    }

    #[test]
    fn test_controllers_are_independent() {
        let mut input = InputLatch::new();
        input.set(Controller::One, RIGHT);
        input.set(Controller::Two, DOWN | SELECT);
        assert_eq!(input.latch(), [RIGHT, DOWN | SELECT]);
        assert_eq!(input.get(Controller::One), RIGHT);
        assert_eq!(input.get(Controller::Two), DOWN | SELECT);
    }
}
