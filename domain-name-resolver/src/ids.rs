/// Supplies the 16-bit transaction ID of each outgoing query.
pub trait IdSource {
    fn next_id(&mut self) -> u16;
}

impl IdSource for fastrand::Rng {
    fn next_id(&mut self) -> u16 {
        self.u16(..)
    }
}

/// Hands out `start`, `start + 1`, ... wrapping at `u16::MAX`.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u16,
}

impl SequentialIds {
    pub fn starting_at(start: u16) -> Self {
        Self { next: start }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> u16 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}
