//! Demo scene: a screen-space dialogue box plus a world-space speaker label,
//! driven by the sample `DemoScript`.

use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::components::dialogue_text::{DialogueText, SurfaceSpace};
use crate::events::{DialogueCommand, DialogueCommandKind, RevealFinishedEvent};
use crate::features::text_reveal::{Architect, BuildMethod, GlyphBuffer};
use crate::plugins::input::{get_default_input_map, DialogueAction};
use crate::plugins::text_reveal::spawn_dialogue_text;
use crate::resources::demo_script::{DemoScript, ScriptLine};
use crate::resources::reveal_settings::RevealSettings;
use crate::systems::text_reveal::apply_dialogue_commands;

/// Speed change per arrow key press.
const SPEED_STEP: f32 = 0.25;
const MIN_SPEED: f32 = -0.9;
const MAX_SPEED: f32 = 4.0;

const PANEL_COLOR: Color = Color::srgb(0.93, 0.87, 0.72);

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DemoScript>()
            .add_systems(Startup, (spawn_camera, spawn_demo_surfaces).chain())
            .add_systems(
                Update,
                (
                    dialogue_input.before(apply_dialogue_commands),
                    log_finished_reveals,
                ),
            );
    }
}

/// Entities of the demo's two dialogue surfaces.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DemoSurfaces {
    pub dialogue_box: Entity,
    pub speaker_label: Entity,
}

impl DemoSurfaces {
    pub fn all(&self) -> [Entity; 2] {
        [self.dialogue_box, self.speaker_label]
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        InputManagerBundle::with_map(get_default_input_map()),
    ));
}

fn spawn_demo_surfaces(
    mut commands: Commands,
    settings: Res<RevealSettings>,
    mut script: ResMut<DemoScript>,
    mut dialogue_commands: EventWriter<DialogueCommand>,
) {
    let panel = commands
        .spawn((
            Name::new("Dialogue Panel"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(10.0),
                right: Val::Percent(10.0),
                bottom: Val::Px(32.0),
                min_height: Val::Px(120.0),
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
        ))
        .id();

    let dialogue_box = spawn_dialogue_text(
        &mut commands,
        &settings,
        SurfaceSpace::Screen,
        TextFont::default(),
        Transform::default(),
    );
    commands.entity(dialogue_box).set_parent(panel);

    // The speaker label always fades in, whatever the dialogue box uses.
    let label_settings = RevealSettings {
        build_method: BuildMethod::Fade,
        font_size: settings.font_size * 1.2,
        ..RevealSettings::clone(&settings)
    };
    let speaker_label = spawn_dialogue_text(
        &mut commands,
        &label_settings,
        SurfaceSpace::World,
        TextFont::default(),
        Transform::from_xyz(0.0, 120.0, 1.0),
    );

    commands.insert_resource(DemoSurfaces {
        dialogue_box,
        speaker_label,
    });

    dialogue_commands.send(DialogueCommand::build(speaker_label, "The Harbour Master"));
    if let Some(line) = script.advance() {
        dialogue_commands.send(line_command(dialogue_box, line));
    }

    info!("Spawned demo dialogue surfaces");
}

fn line_command(entity: Entity, line: ScriptLine) -> DialogueCommand {
    match line {
        ScriptLine::Say(text) => DialogueCommand::build(entity, text),
        ScriptLine::Continue(text) => DialogueCommand::append(entity, text),
    }
}

/// State of the `Advance` action this frame.
#[derive(Debug, Clone, Copy, Default)]
struct AdvanceInput {
    just_pressed: bool,
    held: bool,
}

/// Pressing `Advance` finishes a running line or starts the next one. Holding it keeps
/// hurry-up on for as long as the line is still revealing.
fn advance_commands(
    entity: Entity,
    advance: AdvanceInput,
    architect: &Architect<GlyphBuffer>,
    script: &mut DemoScript,
) -> Vec<DialogueCommand> {
    let building = architect.is_building();

    if advance.just_pressed {
        let command = if building {
            Some(DialogueCommand::new(entity, DialogueCommandKind::ForceComplete))
        } else {
            script.advance().map(|line| line_command(entity, line))
        };
        return command.into_iter().collect();
    }

    if building && advance.held != architect.hurry_up() {
        return vec![DialogueCommand::new(
            entity,
            DialogueCommandKind::HurryUp(advance.held),
        )];
    }
    Vec::new()
}

/// Maps player actions to dialogue commands for the demo surfaces.
fn dialogue_input(
    action_query: Query<&ActionState<DialogueAction>>,
    surfaces: Option<Res<DemoSurfaces>>,
    dialogues: Query<&DialogueText>,
    mut script: ResMut<DemoScript>,
    mut settings: ResMut<RevealSettings>,
    mut dialogue_commands: EventWriter<DialogueCommand>,
) {
    let Some(surfaces) = surfaces else {
        return;
    };
    let Ok(action_state) = action_query.get_single() else {
        return;
    };
    let Ok(dialogue) = dialogues.get(surfaces.dialogue_box) else {
        return;
    };
    let entity = surfaces.dialogue_box;

    let advance = AdvanceInput {
        just_pressed: action_state.just_pressed(&DialogueAction::Advance),
        held: action_state.pressed(&DialogueAction::Advance),
    };
    dialogue_commands.send_batch(advance_commands(
        entity,
        advance,
        &dialogue.architect,
        &mut script,
    ));

    if action_state.just_pressed(&DialogueAction::CycleMethod) {
        settings.build_method = settings.build_method.next();
        info!("Build method: {}", settings.build_method);
        dialogue_commands.send(DialogueCommand::new(
            entity,
            DialogueCommandKind::SetMethod(settings.build_method),
        ));
    }

    let speed_delta = if action_state.just_pressed(&DialogueAction::SpeedUp) {
        SPEED_STEP
    } else if action_state.just_pressed(&DialogueAction::SpeedDown) {
        -SPEED_STEP
    } else {
        0.0
    };
    if speed_delta != 0.0 {
        settings.speed = (settings.speed + speed_delta).clamp(MIN_SPEED, MAX_SPEED);
        info!("Reveal speed multiplier: {:.2}", settings.speed);
        for target in surfaces.all() {
            dialogue_commands.send(DialogueCommand::new(
                target,
                DialogueCommandKind::SetSpeed(settings.speed),
            ));
        }
    }
}

fn log_finished_reveals(mut events: EventReader<RevealFinishedEvent>) {
    for event in events.read() {
        info!(
            "Reveal #{} on {:?} finished ({}{})",
            event.handle.id(),
            event.entity,
            event.method,
            if event.forced { ", forced" } else { "" }
        );
    }
}
