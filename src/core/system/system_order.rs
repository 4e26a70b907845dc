//! Central system ordering labels to make the update sequence explicit.
//! Stages (high-level):
//! 1. TapDispatch (Update: pointer sampling -> world-space tap events)
//! 2. SceneLogic (Update: tap consumers, state transition requests)
//! 3. FixedMotion (FixedUpdate: kinematics, bob, shake, cross-fade, spawn timers)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct TapDispatchSet; // pointer sampled before any tap consumer runs

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SceneLogicSet; // per-scene tap handling and transitions

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FixedMotionSet; // deterministic FixedUpdate motion and timers
