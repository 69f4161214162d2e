//! Per-frame input resources.
//!
//! The frontend samples its devices once per frame into an [`InputSnapshot`]
//! of abstract [`Action`]s plus the pointer position. The
//! [`update_input_state`](crate::systems::input::update_input_state) system
//! folds that snapshot into the [`InputState`] resource that gameplay systems
//! read, one [`BoolState`] per action.
use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashSet;

/// Abstract inputs the game reacts to.
///
/// `Fire` and `AltFire` are the primary and secondary pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Slide,
    Punch,
    Fire,
    AltFire,
    Weapon1,
    Weapon2,
    Weapon3,
    Restart,
    Debug,
}

/// Raw device sample for one frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputSnapshot {
    pub held: FxHashSet<Action>,
    pub pressed: FxHashSet<Action>,
    pub released: FxHashSet<Action>,
    /// Pointer position in screen space.
    pub pointer: Vec2,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `action` as held.
    pub fn hold(mut self, action: Action) -> Self {
        self.held.insert(action);
        self
    }

    /// Mark `action` as pressed this frame (and held).
    pub fn press(mut self, action: Action) -> Self {
        self.pressed.insert(action);
        self.held.insert(action);
        self
    }

    /// Mark `action` as released this frame.
    pub fn release(mut self, action: Action) -> Self {
        self.released.insert(action);
        self.held.remove(&action);
        self
    }

    pub fn pointer_at(mut self, x: f32, y: f32) -> Self {
        self.pointer = Vec2::new(x, y);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean action state.
pub struct BoolState {
    /// Whether the action is currently held.
    pub active: bool,
    /// Whether the action was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the action was just released this frame.
    pub just_released: bool,
}

impl BoolState {
    fn sample(snapshot: &InputSnapshot, action: Action) -> Self {
        BoolState {
            active: snapshot.held.contains(&action),
            just_pressed: snapshot.pressed.contains(&action),
            just_released: snapshot.released.contains(&action),
        }
    }
}

/// Resource capturing the per-frame input relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub jump: BoolState,
    pub slide: BoolState,
    pub punch: BoolState,
    pub fire: BoolState,
    pub alt_fire: BoolState,
    pub weapon_1: BoolState,
    pub weapon_2: BoolState,
    pub weapon_3: BoolState,
    pub restart: BoolState,
    pub mode_debug: BoolState,
    /// Pointer position in screen space.
    pub pointer: Vec2,
}

impl InputState {
    /// Overwrite every action from `snapshot`.
    pub fn apply(&mut self, snapshot: &InputSnapshot) {
        self.move_left = BoolState::sample(snapshot, Action::Left);
        self.move_right = BoolState::sample(snapshot, Action::Right);
        self.jump = BoolState::sample(snapshot, Action::Jump);
        self.slide = BoolState::sample(snapshot, Action::Slide);
        self.punch = BoolState::sample(snapshot, Action::Punch);
        self.fire = BoolState::sample(snapshot, Action::Fire);
        self.alt_fire = BoolState::sample(snapshot, Action::AltFire);
        self.weapon_1 = BoolState::sample(snapshot, Action::Weapon1);
        self.weapon_2 = BoolState::sample(snapshot, Action::Weapon2);
        self.weapon_3 = BoolState::sample(snapshot, Action::Weapon3);
        self.restart = BoolState::sample(snapshot, Action::Restart);
        self.mode_debug = BoolState::sample(snapshot, Action::Debug);
        self.pointer = snapshot.pointer;
    }

    /// Horizontal axis in `{-1, 0, 1}`.
    pub fn horizontal(&self) -> f32 {
        (self.move_right.active as i32 - self.move_left.active as i32) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        assert!(!input.move_left.active);
        assert!(!input.jump.just_pressed);
        assert!(!input.fire.just_released);
        assert_eq!(input.horizontal(), 0.0);
    }

    #[test]
    fn test_apply_snapshot() {
        let snap = InputSnapshot::new()
            .hold(Action::Right)
            .press(Action::Jump)
            .release(Action::Fire)
            .pointer_at(12.0, 34.0);
        let mut input = InputState::default();
        input.apply(&snap);
        assert!(input.move_right.active);
        assert!(input.jump.just_pressed && input.jump.active);
        assert!(input.fire.just_released && !input.fire.active);
        assert_eq!(input.horizontal(), 1.0);
        assert_eq!(input.pointer, Vec2::new(12.0, 34.0));

        input.apply(&InputSnapshot::new());
        assert!(!input.jump.just_pressed);
        assert!(!input.move_right.active);
    }
}
