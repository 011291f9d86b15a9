/// Sum of the symbol's UTF-16 code units. Anagrams share a seed.
pub fn symbol_seed(symbol: &str) -> u64 {
    symbol.encode_utf16().map(u64::from).sum()
}

/// Reproducible stream of draws in [0, 1).
///
/// Each draw is `frac(sin(counter) * 10000)` with the counter starting at the
/// seed and advancing once per draw. State lives in the value, so concurrent
/// generations never share a counter.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededSequence {
    seed: u64,
    counter: u64,
}

impl SeededSequence {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed, counter: seed }
    }

    pub fn from_symbol(symbol: &str) -> Self {
        Self::from_seed(symbol_seed(symbol))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn draws_taken(&self) -> u64 {
        self.counter - self.seed
    }

    pub fn next_draw(&mut self) -> f64 {
        let x = (self.counter as f64).sin() * 10000.0;
        self.counter += 1;
        x - x.floor()
    }
}

impl Iterator for SeededSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_draw())
    }
}
