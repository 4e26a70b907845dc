use bevy::prelude::*;

/// Platform game-services layer (sign-in, leaderboards). Every operation is
/// fire-and-forget: outcomes are logged and failures never feed back into game
/// flow.
pub trait PlayServices: Send + Sync {
    fn sign_in(&mut self);
    fn sign_out(&mut self);
    fn is_signed_in(&self) -> bool;
    fn submit_score(&mut self, score: u32);
    fn show_leaderboard(&mut self);
}

/// Desktop build: no real service behind the contract, just the logs.
pub struct DesktopPlayServices {
    signed_in: bool,
    leaderboard_key: String,
}

impl DesktopPlayServices {
    pub fn new(leaderboard_key: impl Into<String>) -> Self {
        Self {
            signed_in: false,
            leaderboard_key: leaderboard_key.into(),
        }
    }
}

impl PlayServices for DesktopPlayServices {
    fn sign_in(&mut self) {
        self.signed_in = true;
        info!(target: "play_services", "signed in");
    }

    fn sign_out(&mut self) {
        self.signed_in = false;
        info!(target: "play_services", "signed out");
    }

    fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    fn submit_score(&mut self, score: u32) {
        if !self.signed_in {
            warn!(target: "play_services", "dropping score {score}: not signed in");
            return;
        }
        info!(
            target: "play_services",
            "submitted score {score} to leaderboard '{}'", self.leaderboard_key
        );
    }

    fn show_leaderboard(&mut self) {
        if !self.signed_in {
            info!(target: "play_services", "leaderboard requested while signed out; signing in");
            self.sign_in();
            if !self.signed_in {
                return;
            }
        }
        info!(target: "play_services", "showing leaderboard '{}'", self.leaderboard_key);
    }
}

/// Resource wrapper handing the active [`PlayServices`] implementation to systems.
#[derive(Resource, Deref, DerefMut)]
pub struct GameServices(pub Box<dyn PlayServices>);
