//! Player name pool.

/// Names handed out to players in creation order.
const NAMES: [&str; 24] = [
    "Ada", "Basil", "Cora", "Dmitri", "Esme", "Felix", "Greta", "Hugo", "Ines", "Jonas",
    "Kira", "Lionel", "Mira", "Nico", "Olga", "Pavel", "Quinn", "Rosa", "Stellan", "Tova",
    "Ulric", "Vera", "Wren", "Yusuf",
];

/// Cycles through a fixed list of names.
///
/// Once the list is exhausted, names repeat with a numeric suffix so that every
/// name handed out by one pool is distinct.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamePool {
    /// Number of names handed out so far.
    issued: usize,
}

impl NamePool {
    /// Create a pool starting at the first name.
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Take the next name.
    pub fn next_name(&mut self) -> String {
        let base = NAMES[self.issued % NAMES.len()];
        let round = self.issued / NAMES.len();
        self.issued += 1;

        if round == 0 {
            base.to_string()
        } else {
            format!("{base}{}", round + 1)
        }
    }
}
