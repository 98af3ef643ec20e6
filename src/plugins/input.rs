use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum DialogueAction {
    /// Finish the current line, or move on to the next one. Held to hurry the reveal.
    Advance,
    CycleMethod,
    SpeedUp,
    SpeedDown,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<DialogueAction>::default());
    }
}

pub fn get_default_input_map() -> InputMap<DialogueAction> {
    let mut input_map = InputMap::default();

    input_map.insert(DialogueAction::Advance, KeyCode::Space);
    input_map.insert(DialogueAction::Advance, KeyCode::Enter);
    input_map.insert(DialogueAction::CycleMethod, KeyCode::Tab);
    input_map.insert(DialogueAction::SpeedUp, KeyCode::ArrowUp);
    input_map.insert(DialogueAction::SpeedDown, KeyCode::ArrowDown);

    input_map
}
