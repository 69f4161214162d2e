//! Seedable random source for gameplay rolls.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    /// Seeded when `seed` is given, otherwise from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => GameRng(fastrand::Rng::with_seed(seed)),
            None => GameRng(fastrand::Rng::new()),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        GameRng::new(None)
    }
}
