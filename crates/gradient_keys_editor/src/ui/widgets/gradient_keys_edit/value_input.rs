use bevy::input_focus::InputFocus;
use bevy::picking::hover::Hovered;
use bevy::prelude::*;
use bevy_ui_text_input::{
    TextInputBuffer, TextInputFilter, TextInputMode, TextInputNode, TextInputPlugin,
    TextInputPrompt, TextInputQueue, TextInputStyle,
    actions::{TextInputAction, TextInputEdit},
};
use gradient_keys::{EditPanel, KeyId, Rgb};

use super::{
    EditorGradientKeysEdit, GradientKeysEditState, setup_gradient_keys_edit,
    trigger_gradient_keys_events,
};
use crate::ui::tokens::{
    BACKGROUND_COLOR, BORDER_COLOR, CORNER_RADIUS, PRIMARY_COLOR, TEXT_BODY_COLOR,
    TEXT_MUTED_COLOR, TEXT_SIZE, TEXT_SIZE_SM,
};

const INPUT_HEIGHT: f32 = 24.0;
const INPUT_WIDTH: f32 = 88.0;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<TextInputPlugin>() {
        app.add_plugins(TextInputPlugin);
    }
    app.init_resource::<InputFocus>().add_systems(
        Update,
        (
            setup_value_inputs.after(setup_gradient_keys_edit),
            handle_click_to_focus,
            handle_unfocus,
            handle_focus_style,
            sync_value_inputs,
            apply_value_input_edits,
            commit_value_input_on_blur,
        ),
    );
}

/// Which key value an input edits.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    Color,
    Alpha,
}

impl ValueField {
    fn matches(self, panel: &EditPanel) -> bool {
        match self {
            Self::Color => panel.is_color(),
            Self::Alpha => panel.is_alpha(),
        }
    }
}

/// Parses an alpha input, clamping out-of-range integers to `0..=255`.
pub fn parse_alpha(text: &str) -> Option<u8> {
    let value: i64 = text.trim().parse().ok()?;
    Some(value.clamp(0, i64::from(u8::MAX)) as u8)
}

fn hex_digits(color: Rgb) -> String {
    color.to_hex().trim_start_matches('#').to_string()
}

#[derive(Component)]
struct ValueInputPanel {
    edit: Entity,
    shown: Option<KeyId>,
}

#[derive(Component)]
pub(super) struct ValueInputWrapper {
    pub(super) edit: Entity,
    field: ValueField,
    input: Entity,
}

#[derive(Component)]
struct ValueInput {
    edit: Entity,
    field: ValueField,
}

fn setup_value_inputs(
    mut commands: Commands,
    edits: Query<Entity, Added<EditorGradientKeysEdit>>,
) {
    for edit in &edits {
        spawn_value_inputs(&mut commands, edit);
    }
}

fn spawn_value_inputs(commands: &mut Commands, edit: Entity) {
    let row = commands
        .spawn((
            ChildOf(edit),
            Node {
                height: px(INPUT_HEIGHT),
                ..default()
            },
        ))
        .id();

    let panel = commands
        .spawn((
            ValueInputPanel { edit, shown: None },
            ChildOf(row),
            Node {
                position_type: PositionType::Absolute,
                width: px(INPUT_WIDTH),
                margin: UiRect::left(px(-INPUT_WIDTH / 2.0)),
                display: Display::None,
                ..default()
            },
        ))
        .id();

    spawn_field(commands, panel, edit, ValueField::Color);
    spawn_field(commands, panel, edit, ValueField::Alpha);
}

fn spawn_field(commands: &mut Commands, panel: Entity, edit: Entity, field: ValueField) {
    let (prefix, placeholder, filter) = match field {
        ValueField::Color => ("#", "ffffff", TextInputFilter::Alphanumeric),
        ValueField::Alpha => ("A", "255", TextInputFilter::Integer),
    };

    let wrapper = commands
        .spawn((
            ChildOf(panel),
            Node {
                width: percent(100),
                height: px(INPUT_HEIGHT),
                padding: UiRect::horizontal(px(6)),
                border: UiRect::all(px(1)),
                border_radius: BorderRadius::all(CORNER_RADIUS),
                align_items: AlignItems::Center,
                column_gap: px(4),
                display: Display::None,
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR.into()),
            BorderColor::all(BORDER_COLOR),
            Interaction::None,
            Hovered::default(),
        ))
        .id();

    commands.spawn((
        ChildOf(wrapper),
        Text::new(prefix),
        TextFont {
            font_size: TEXT_SIZE_SM,
            ..default()
        },
        TextColor(TEXT_MUTED_COLOR.into()),
    ));

    let input = commands
        .spawn((
            ValueInput { edit, field },
            ChildOf(wrapper),
            TextInputNode {
                mode: TextInputMode::SingleLine,
                clear_on_submit: false,
                unfocus_on_submit: true,
                ..default()
            },
            TextFont {
                font_size: TEXT_SIZE,
                ..default()
            },
            TextColor(TEXT_BODY_COLOR.into()),
            TextInputStyle {
                cursor_color: TEXT_BODY_COLOR.into(),
                cursor_width: 1.0,
                selection_color: PRIMARY_COLOR.with_alpha(0.3).into(),
                ..default()
            },
            TextInputPrompt {
                text: placeholder.into(),
                color: Some(TEXT_BODY_COLOR.with_alpha(0.2).into()),
                ..default()
            },
            filter,
            Node {
                flex_grow: 1.0,
                height: percent(100),
                justify_content: JustifyContent::Center,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .id();

    commands
        .entity(wrapper)
        .insert(ValueInputWrapper { edit, field, input });
}

fn set_input_text(queue: &mut TextInputQueue, text: String) {
    queue.add(TextInputAction::Edit(TextInputEdit::SelectAll));
    queue.add(TextInputAction::Edit(TextInputEdit::Paste(text)));
}

fn handle_click_to_focus(
    mut focus: ResMut<InputFocus>,
    mouse: Res<ButtonInput<MouseButton>>,
    wrappers: Query<(&ValueInputWrapper, &Interaction)>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    for (wrapper, interaction) in &wrappers {
        if *interaction == Interaction::Pressed {
            focus.0 = Some(wrapper.input);
        }
    }
}

fn handle_unfocus(
    mut focus: ResMut<InputFocus>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    inputs: Query<&ChildOf, With<ValueInput>>,
    wrappers: Query<&Interaction, With<ValueInputWrapper>>,
) {
    let Some(focused) = focus.0 else {
        return;
    };
    let Ok(child_of) = inputs.get(focused) else {
        return;
    };
    let Ok(interaction) = wrappers.get(child_of.parent()) else {
        return;
    };

    let clicked_outside =
        mouse.get_just_pressed().next().is_some() && *interaction == Interaction::None;
    let key_dismiss =
        keyboard.just_pressed(KeyCode::Escape) || keyboard.just_pressed(KeyCode::Enter);

    if clicked_outside || key_dismiss {
        focus.0 = None;
    }
}

fn handle_focus_style(
    focus: Res<InputFocus>,
    mut wrappers: Query<(&ValueInputWrapper, &mut BorderColor, &Hovered)>,
) {
    for (wrapper, mut border_color, hovered) in &mut wrappers {
        let color = match (focus.0 == Some(wrapper.input), hovered.get()) {
            (true, _) => PRIMARY_COLOR,
            (_, true) => BORDER_COLOR.lighter(0.05),
            _ => BORDER_COLOR,
        };
        *border_color = BorderColor::all(color);
    }
}

/// Shows the input matching the selected key next to its pin and loads the
/// key's value whenever the selection moves to another key.
fn sync_value_inputs(
    mut states: Query<(Entity, &mut GradientKeysEditState), Changed<GradientKeysEditState>>,
    mut panels: Query<(&mut ValueInputPanel, &mut Node), Without<ValueInputWrapper>>,
    mut wrappers: Query<(&ValueInputWrapper, &mut Node), Without<ValueInputPanel>>,
    mut queues: Query<&mut TextInputQueue, With<ValueInput>>,
) {
    for (edit_entity, mut state) in &mut states {
        let edit_panel = state.editor.edit_panel();
        let Some((mut panel, mut panel_node)) =
            panels.iter_mut().find(|(panel, _)| panel.edit == edit_entity)
        else {
            continue;
        };

        panel_node.display = match edit_panel {
            EditPanel::Hidden => Display::None,
            _ => Display::Flex,
        };
        if let Some(time) = edit_panel.time() {
            panel_node.left = percent((time * 100.0) as f32);
        }

        let reload = panel.shown != edit_panel.id();
        panel.shown = edit_panel.id();

        for (wrapper, mut wrapper_node) in &mut wrappers {
            if wrapper.edit != edit_entity {
                continue;
            }
            let visible = wrapper.field.matches(&edit_panel);
            wrapper_node.display = if visible {
                Display::Flex
            } else {
                Display::None
            };
            if !visible || !reload {
                continue;
            }

            let text = match edit_panel {
                EditPanel::Color { color, .. } => hex_digits(color),
                EditPanel::Alpha { alpha, .. } => alpha.to_string(),
                EditPanel::Hidden => continue,
            };
            if let Ok(mut queue) = queues.get_mut(wrapper.input) {
                set_input_text(&mut queue, text);
            }
        }
    }
}

/// Applies typed values live. Incomplete or malformed text is left alone
/// until the input loses focus.
fn apply_value_input_edits(
    mut commands: Commands,
    focus: Res<InputFocus>,
    inputs: Query<(Entity, &ValueInput, &TextInputBuffer), Changed<TextInputBuffer>>,
    mut states: Query<&mut GradientKeysEditState>,
) {
    for (entity, input, buffer) in &inputs {
        if focus.0 != Some(entity) {
            continue;
        }
        let Ok(mut state) = states.get_mut(input.edit) else {
            continue;
        };

        let text = buffer.get_text();
        let notification = match (input.field, state.editor.edit_panel()) {
            (ValueField::Color, EditPanel::Color { color, .. }) => {
                let Ok(edited) = Rgb::from_hex(&text) else {
                    continue;
                };
                if edited == color {
                    continue;
                }
                state.editor.edit_color_rgb(edited)
            }
            (ValueField::Alpha, EditPanel::Alpha { alpha, .. }) => {
                let Some(edited) = parse_alpha(&text) else {
                    continue;
                };
                if edited == alpha {
                    continue;
                }
                state.editor.edit_alpha(edited)
            }
            _ => continue,
        };

        trigger_gradient_keys_events(&mut commands, input.edit, &state.editor, notification);
    }
}

fn commit_value_input_on_blur(
    mut commands: Commands,
    focus: Res<InputFocus>,
    mut last_focus: Local<Option<Entity>>,
    mut inputs: Query<(&ValueInput, &TextInputBuffer, &mut TextInputQueue)>,
    mut states: Query<&mut GradientKeysEditState>,
) {
    let previous = *last_focus;
    *last_focus = focus.0;

    let Some(blurred) = previous else {
        return;
    };
    if focus.0 == Some(blurred) {
        return;
    }
    let Ok((input, buffer, mut queue)) = inputs.get_mut(blurred) else {
        return;
    };
    let Ok(mut state) = states.get_mut(input.edit) else {
        return;
    };

    // put the canonical value back so rejected text does not linger
    match (input.field, state.editor.edit_panel()) {
        (ValueField::Color, EditPanel::Color { id, color, .. }) => {
            if let Err(err) = Rgb::from_hex(&buffer.get_text()) {
                warn!("key {id}: {err}, keeping {color}");
                set_input_text(&mut queue, hex_digits(color));
            }
        }
        (ValueField::Alpha, EditPanel::Alpha { id, alpha, .. }) => {
            let text = buffer.get_text();
            let canonical = parse_alpha(&text).unwrap_or_else(|| {
                warn!("key {id}: alpha \"{text}\" is not an integer, keeping {alpha}");
                alpha
            });
            set_input_text(&mut queue, canonical.to_string());
        }
        _ => {}
    }

    let notification = state.editor.commit_edit();
    trigger_gradient_keys_events(&mut commands, input.edit, &state.editor, notification);
}
