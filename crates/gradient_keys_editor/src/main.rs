use bevy::asset::UnapprovedPathMode;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use gradient_keys::prelude::*;
use gradient_keys_editor::GradientKeysEditorPlugin;
use gradient_keys_editor::ui::tokens::BACKGROUND_COLOR;
use gradient_keys_editor::ui::widgets::gradient_keys_edit::{
    GradientKeysCommitEvent, GradientKeysEditProps, GradientKeysEditState, gradient_keys_edit,
    trigger_gradient_keys_events,
};

/// Gradient file given on the command line.
#[derive(Resource)]
struct GradientPath(String);

#[derive(Resource)]
struct PendingGradient(Handle<GradientAsset>);

#[derive(Component)]
struct EditorRoot;

fn main() {
    let gradient_path = std::env::args().nth(1);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Gradient Keys".into(),
                    resolution: WindowResolution::new(640, 200),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                unapproved_path_mode: UnapprovedPathMode::Allow,
                ..default()
            }),
    )
    .add_plugins(GradientKeysEditorPlugin)
    .add_observer(log_commits)
    .add_systems(Startup, setup)
    .add_systems(Update, (spawn_loaded_gradient, toggle_mode));

    if let Some(path) = gradient_path {
        app.insert_resource(GradientPath(path));
    }

    app.run();
}

fn demo_gradient() -> KeyedGradient {
    KeyedGradient::new(
        vec![
            ColorKey::new(0.0, Rgb::new(255, 0, 0)),
            ColorKey::new(1.0, Rgb::new(0, 0, 255)),
        ],
        vec![AlphaKey::new(0.0, 255), AlphaKey::new(1.0, 0)],
    )
}

fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    path: Option<Res<GradientPath>>,
) {
    commands.spawn(Camera2d);

    let root = commands
        .spawn((
            EditorRoot,
            Node {
                width: percent(100),
                height: percent(100),
                padding: UiRect::all(px(24)),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR.into()),
        ))
        .id();

    match path {
        Some(path) => {
            commands.insert_resource(PendingGradient(asset_server.load(path.0.clone())));
        }
        None => {
            commands.spawn((
                ChildOf(root),
                gradient_keys_edit(GradientKeysEditProps::new().with_gradient(demo_gradient())),
            ));
        }
    }
}

fn spawn_loaded_gradient(
    mut commands: Commands,
    pending: Option<Res<PendingGradient>>,
    asset_server: Res<AssetServer>,
    gradients: Res<Assets<GradientAsset>>,
    roots: Query<Entity, With<EditorRoot>>,
) {
    let Some(pending) = pending else {
        return;
    };
    let Ok(root) = roots.single() else {
        return;
    };

    let gradient = match gradients.get(&pending.0) {
        Some(asset) => asset.0.clone(),
        None if asset_server.load_state(&pending.0).is_failed() => {
            error!("could not load gradient, starting from the demo gradient");
            demo_gradient()
        }
        None => return,
    };

    commands.remove_resource::<PendingGradient>();
    commands.spawn((
        ChildOf(root),
        gradient_keys_edit(GradientKeysEditProps::new().with_gradient(gradient)),
    ));
}

/// `M` switches between blended and fixed rendering.
fn toggle_mode(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut edits: Query<(Entity, &mut GradientKeysEditState)>,
) {
    if !keyboard.just_pressed(KeyCode::KeyM) {
        return;
    }
    for (entity, mut state) in &mut edits {
        let mode = match state.editor.mode() {
            GradientMode::Blend => GradientMode::Fixed,
            GradientMode::Fixed => GradientMode::Blend,
        };
        let notification = state.editor.set_mode(mode);
        trigger_gradient_keys_events(&mut commands, entity, &state.editor, notification);
    }
}

fn log_commits(event: On<GradientKeysCommitEvent>) {
    info!("{}", event.gradient.to_css());
    match event.gradient.to_ron_string() {
        Ok(ron) => debug!("{ron}"),
        Err(err) => warn!("could not serialize gradient: {err}"),
    }
}
