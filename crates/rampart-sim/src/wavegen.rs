//! Procedural wave generation under a compounding resource budget.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rampart_core::enums::HostileClass;

/// Assembles each wave by spending a budget that only ever grows.
#[derive(Debug, Clone)]
pub struct WaveGenerator {
    budget: i64,
}

impl WaveGenerator {
    pub fn new(starting_budget: i64) -> Self {
        Self {
            budget: starting_budget,
        }
    }

    /// Current budget, spent in full by the next `generate` call.
    pub fn budget(&self) -> i64 {
        self.budget
    }

    /// Generate the next wave as a sequence of weighted draws: mostly
    /// Grunts, some Sprinters, occasional Juggernauts. An expensive
    /// pick falls back to a cheaper class when the remaining budget
    /// cannot afford it. Draws continue until the cumulative cost
    /// reaches the budget; every draw spends at least one unit, so the
    /// loop terminates for any positive budget.
    pub fn generate(&self, rng: &mut ChaCha8Rng) -> Vec<HostileClass> {
        let mut wave = Vec::new();
        let mut spent: i64 = 0;
        while spent < self.budget {
            let remaining = self.budget - spent;
            let roll = rng.gen_range(0..100);
            let class = if roll < 75 {
                HostileClass::Grunt
            } else if roll < 90 {
                if remaining >= HostileClass::Sprinter.cost() {
                    HostileClass::Sprinter
                } else {
                    HostileClass::Grunt
                }
            } else if remaining >= HostileClass::Juggernaut.cost() {
                HostileClass::Juggernaut
            } else if remaining >= HostileClass::Sprinter.cost() {
                HostileClass::Sprinter
            } else {
                HostileClass::Grunt
            };
            spent += class.cost();
            wave.push(class);
        }
        wave
    }

    /// Compound the budget by 10%, truncating. Called once per wave,
    /// when the wave is declared started.
    pub fn increase_budget(&mut self) {
        self.budget += self.budget / 10;
    }
}
