use neon_asteroids_core::{FrameInput, WorldSnapshot};

mod roster;

pub use roster::{HunterBot, IdleBot, SpinnerBot};

/// A policy that picks the held keys for the next frame from the
/// current world view.
pub trait AutopilotBot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, seed: u32);
    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput;
}

pub fn bot_ids() -> Vec<&'static str> {
    vec![IdleBot::ID, SpinnerBot::ID, HunterBot::ID]
}

pub fn describe_bots() -> Vec<(&'static str, &'static str)> {
    bot_ids()
        .into_iter()
        .filter_map(create_bot)
        .map(|bot| (bot.id(), bot.description()))
        .collect()
}

pub fn create_bot(id: &str) -> Option<Box<dyn AutopilotBot>> {
    match id {
        IdleBot::ID => Some(Box::new(IdleBot)),
        SpinnerBot::ID => Some(Box::new(SpinnerBot::default())),
        HunterBot::ID => Some(Box::new(HunterBot::default())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_ids_round_trip() {
        for id in bot_ids() {
            let bot = create_bot(id).expect("listed bot must be constructible");
            assert_eq!(bot.id(), id);
            assert!(!bot.description().is_empty());
        }
        assert!(create_bot("nobody").is_none());
        assert_eq!(describe_bots().len(), bot_ids().len());
    }
}
