mod materials;
mod value_input;

use std::collections::HashSet;

use bevy::picking::events::{Click, Drag, DragEnd, DragStart};
use bevy::picking::hover::Hovered;
use bevy::picking::pointer::PointerButton;
use bevy::picking::prelude::Pickable;
use bevy::prelude::*;
use bevy::ui::UiGlobalTransform;
use gradient_keys::{
    BarRect, ChangeCallback, DragThresholds, Gradient, GradientEditor, KeyId, KeyKind,
    Notification, PinView,
};

use crate::ui::tokens::{BORDER_COLOR, CORNER_RADIUS, DANGER_COLOR, PRIMARY_COLOR};

pub use materials::{GradientBarMaterial, MAX_SAMPLES, pack_samples};
pub use value_input::{ValueField, parse_alpha};

const BAR_HEIGHT: f32 = 24.0;
const PIN_SIZE: f32 = 12.0;
const PIN_BORDER: f32 = 2.0;
const DELETE_HINT_OPACITY: f32 = 0.35;

/// Two clicks on the bar within this many seconds form a double click.
pub const DOUBLE_CLICK_WINDOW: f32 = 0.3;
/// Maximum pointer travel (logical px) between the clicks of a double click.
pub const DOUBLE_CLICK_TOLERANCE: f32 = 4.0;

pub fn plugin(app: &mut App) {
    app.add_plugins(UiMaterialPlugin::<GradientBarMaterial>::default())
        .add_plugins((pins_plugin, value_input::plugin));
}

/// Bar, pin and selection systems. Needs `Assets<GradientBarMaterial>` and
/// mouse button input, nothing from the render or text stacks.
pub fn pins_plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            setup_gradient_keys_edit,
            clear_selection_on_outside_press,
            sync_pins,
            update_bar_material,
        )
            .chain(),
    );
}

#[derive(Component)]
pub struct EditorGradientKeysEdit;

#[derive(Debug, Clone, Copy, PartialEq)]
struct LastClick {
    at: f32,
    position: Vec2,
}

/// Per-widget editing session.
#[derive(Component, Debug, Default)]
pub struct GradientKeysEditState {
    pub editor: GradientEditor,
    last_click: Option<LastClick>,
}

impl GradientKeysEditState {
    pub fn new(editor: GradientEditor) -> Self {
        Self {
            editor,
            last_click: None,
        }
    }

    /// Records a click on the bar at `now` seconds. Returns `true` when it
    /// completes a double click.
    pub fn register_click(&mut self, now: f32, position: Vec2) -> bool {
        let is_double = self.last_click.is_some_and(|last| {
            now - last.at <= DOUBLE_CLICK_WINDOW
                && last.position.distance(position) <= DOUBLE_CLICK_TOLERANCE
        });
        self.last_click = if is_double {
            None
        } else {
            Some(LastClick { at: now, position })
        };
        is_double
    }
}

#[derive(EntityEvent)]
pub struct GradientKeysChangeEvent {
    pub entity: Entity,
    pub gradient: Gradient,
}

#[derive(EntityEvent)]
pub struct GradientKeysCommitEvent {
    pub entity: Entity,
    pub gradient: Gradient,
}

/// Forwards an editor notification as widget events. Commits fire both.
pub fn trigger_gradient_keys_events(
    commands: &mut Commands,
    entity: Entity,
    editor: &GradientEditor,
    notification: Notification,
) {
    if notification.is_none() {
        return;
    }
    let gradient = editor.value();
    if notification.is_commit() {
        commands.trigger(GradientKeysChangeEvent {
            entity,
            gradient: gradient.clone(),
        });
        commands.trigger(GradientKeysCommitEvent { entity, gradient });
    } else {
        commands.trigger(GradientKeysChangeEvent { entity, gradient });
    }
}

#[derive(Default)]
pub struct GradientKeysEditProps {
    pub gradient: Option<Gradient>,
    pub thresholds: Option<DragThresholds>,
    pub on_change: Option<ChangeCallback>,
}

impl GradientKeysEditProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = Some(gradient);
        self
    }

    pub fn with_thresholds(mut self, thresholds: DragThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn with_on_change(
        mut self,
        callback: impl FnMut(&Gradient) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn into_editor(self) -> GradientEditor {
        let gradient = self.gradient.unwrap_or_else(Gradient::white);
        let mut editor = GradientEditor::new(&gradient);
        if let Some(thresholds) = self.thresholds {
            editor.set_thresholds(thresholds);
        }
        if let Some(callback) = self.on_change {
            editor = editor.with_on_change(callback);
        }
        editor
    }
}

pub fn gradient_keys_edit(props: GradientKeysEditProps) -> impl Bundle {
    (
        EditorGradientKeysEdit,
        GradientKeysEditState::new(props.into_editor()),
        Node {
            width: percent(100),
            flex_direction: FlexDirection::Column,
            row_gap: px(6.0),
            ..default()
        },
    )
}

#[derive(Component)]
struct GradientKeysBar(Entity);

#[derive(Component)]
struct GradientBarMaterialNode(Entity);

#[derive(Component, Debug, Clone, Copy)]
pub struct KeyPin {
    pub edit: Entity,
    pub id: KeyId,
    pub kind: KeyKind,
}

fn setup_gradient_keys_edit(
    mut commands: Commands,
    mut materials: ResMut<Assets<GradientBarMaterial>>,
    edits: Query<(Entity, &GradientKeysEditState), Added<EditorGradientKeysEdit>>,
) {
    for (edit_entity, state) in &edits {
        let bar_entity = commands
            .spawn((
                GradientKeysBar(edit_entity),
                ChildOf(edit_entity),
                Hovered::default(),
                Node {
                    height: px(BAR_HEIGHT),
                    margin: UiRect::vertical(px(PIN_SIZE)),
                    ..default()
                },
            ))
            .observe(on_bar_click)
            .id();

        commands.spawn((
            GradientBarMaterialNode(edit_entity),
            ChildOf(bar_entity),
            Pickable::IGNORE,
            MaterialNode(materials.add(GradientBarMaterial::from_samples(
                &state.editor.samples(),
                state.editor.mode(),
            ))),
            Node {
                position_type: PositionType::Absolute,
                left: px(0.0),
                right: px(0.0),
                height: percent(100),
                ..default()
            },
        ));

        for pin in state.editor.pins() {
            spawn_pin(&mut commands, bar_entity, edit_entity, &pin);
        }
    }
}

fn pin_border_color(pin: &PinView) -> Srgba {
    if pin.about_to_delete {
        DANGER_COLOR
    } else if pin.selected {
        PRIMARY_COLOR
    } else {
        BORDER_COLOR
    }
}

fn pin_fill(pin: &PinView) -> Color {
    let fill: Color = pin.swatch.into();
    if pin.about_to_delete {
        fill.with_alpha(fill.alpha() * DELETE_HINT_OPACITY)
    } else {
        fill
    }
}

fn spawn_pin(commands: &mut Commands, bar: Entity, edit: Entity, pin: &PinView) {
    // alpha pins hang above the bar, color pins below it
    let (top, bottom) = match pin.kind {
        KeyKind::Alpha => (px(-PIN_SIZE), Val::Auto),
        KeyKind::Color => (Val::Auto, px(-PIN_SIZE)),
    };

    commands
        .spawn((
            KeyPin {
                edit,
                id: pin.id,
                kind: pin.kind,
            },
            ChildOf(bar),
            Pickable::default(),
            Hovered::default(),
            Node {
                position_type: PositionType::Absolute,
                width: px(PIN_SIZE),
                height: px(PIN_SIZE),
                left: percent(pin.position_percent() as f32),
                top,
                bottom,
                margin: UiRect::left(px(-PIN_SIZE / 2.0)),
                border: UiRect::all(px(PIN_BORDER)),
                border_radius: BorderRadius::all(CORNER_RADIUS),
                ..default()
            },
            BorderColor::all(pin_border_color(pin)),
            BackgroundColor(pin_fill(pin)),
        ))
        .observe(on_pin_click)
        .observe(on_pin_drag_start)
        .observe(on_pin_drag)
        .observe(on_pin_drag_end);
}

fn bar_rect(computed: &ComputedNode, transform: &UiGlobalTransform) -> BarRect {
    let scale = computed.inverse_scale_factor;
    BarRect::from_center_size(transform.translation * scale, computed.size * scale)
}

fn on_bar_click(
    event: On<Pointer<Click>>,
    mut commands: Commands,
    time: Res<Time>,
    bars: Query<(&GradientKeysBar, &ComputedNode, &UiGlobalTransform)>,
    mut states: Query<&mut GradientKeysEditState>,
) {
    if event.button != PointerButton::Primary {
        return;
    }
    let Ok((bar, computed, transform)) = bars.get(event.event_target()) else {
        return;
    };
    let Ok(mut state) = states.get_mut(bar.0) else {
        return;
    };

    let pointer = event.pointer_location.position;
    if !state.register_click(time.elapsed_secs(), pointer) {
        return;
    }

    let (id, notification) = state.editor.double_click(pointer, bar_rect(computed, transform));
    debug!("added key {id}");
    trigger_gradient_keys_events(&mut commands, bar.0, &state.editor, notification);
}

fn on_pin_click(
    mut event: On<Pointer<Click>>,
    pins: Query<&KeyPin>,
    mut states: Query<&mut GradientKeysEditState>,
) {
    event.propagate(false);
    if event.button != PointerButton::Primary {
        return;
    }
    let Ok(pin) = pins.get(event.event_target()) else {
        return;
    };
    if let Ok(mut state) = states.get_mut(pin.edit) {
        state.editor.select(pin.id);
    }
}

fn on_pin_drag_start(
    event: On<Pointer<DragStart>>,
    pins: Query<&KeyPin>,
    mut states: Query<&mut GradientKeysEditState>,
) {
    if event.button != PointerButton::Primary {
        return;
    }
    let Ok(pin) = pins.get(event.event_target()) else {
        return;
    };
    if let Ok(mut state) = states.get_mut(pin.edit) {
        state
            .editor
            .drag_start(pin.id, event.pointer_location.position);
    }
}

fn on_pin_drag(
    event: On<Pointer<Drag>>,
    mut commands: Commands,
    pins: Query<&KeyPin>,
    bars: Query<(&GradientKeysBar, &ComputedNode, &UiGlobalTransform)>,
    mut states: Query<&mut GradientKeysEditState>,
) {
    if event.button != PointerButton::Primary {
        return;
    }
    let Ok(pin) = pins.get(event.event_target()) else {
        return;
    };
    let Some((_, computed, transform)) = bars.iter().find(|(bar, _, _)| bar.0 == pin.edit) else {
        return;
    };
    let Ok(mut state) = states.get_mut(pin.edit) else {
        return;
    };

    let notification = state.editor.drag(
        pin.id,
        event.pointer_location.position,
        bar_rect(computed, transform),
    );
    trigger_gradient_keys_events(&mut commands, pin.edit, &state.editor, notification);
}

fn on_pin_drag_end(
    event: On<Pointer<DragEnd>>,
    mut commands: Commands,
    pins: Query<&KeyPin>,
    bars: Query<(&GradientKeysBar, &ComputedNode, &UiGlobalTransform)>,
    mut states: Query<&mut GradientKeysEditState>,
) {
    if event.button != PointerButton::Primary {
        return;
    }
    let Ok(pin) = pins.get(event.event_target()) else {
        return;
    };
    let Some((_, computed, transform)) = bars.iter().find(|(bar, _, _)| bar.0 == pin.edit) else {
        return;
    };
    let Ok(mut state) = states.get_mut(pin.edit) else {
        return;
    };

    let notification = state.editor.drag_end(
        pin.id,
        event.pointer_location.position,
        bar_rect(computed, transform),
    );
    trigger_gradient_keys_events(&mut commands, pin.edit, &state.editor, notification);
}

fn clear_selection_on_outside_press(
    mouse: Res<ButtonInput<MouseButton>>,
    mut states: Query<(Entity, &mut GradientKeysEditState)>,
    pins: Query<(&KeyPin, &Hovered)>,
    inputs: Query<(&value_input::ValueInputWrapper, &Hovered)>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    for (edit_entity, mut state) in &mut states {
        if state.editor.selection().is_none() {
            continue;
        }
        let pin_hovered = pins
            .iter()
            .any(|(pin, hovered)| pin.edit == edit_entity && hovered.get());
        let input_hovered = inputs
            .iter()
            .any(|(wrapper, hovered)| wrapper.edit == edit_entity && hovered.get());
        if !pin_hovered && !input_hovered {
            state.editor.pointer_down_outside();
        }
    }
}

fn sync_pins(
    mut commands: Commands,
    states: Query<(Entity, &GradientKeysEditState), Changed<GradientKeysEditState>>,
    bars: Query<(Entity, &GradientKeysBar)>,
    mut pins: Query<(
        Entity,
        &KeyPin,
        &mut Node,
        &mut BackgroundColor,
        &mut BorderColor,
    )>,
) {
    for (edit_entity, state) in &states {
        let views = state.editor.pins();
        let mut existing = HashSet::new();

        for (pin_entity, pin, mut node, mut background, mut border) in &mut pins {
            if pin.edit != edit_entity {
                continue;
            }
            let Some(view) = views.iter().find(|view| view.id == pin.id) else {
                commands.entity(pin_entity).try_despawn();
                continue;
            };
            existing.insert(pin.id);
            node.left = percent(view.position_percent() as f32);
            *background = BackgroundColor(pin_fill(view));
            *border = BorderColor::all(pin_border_color(view));
        }

        let Some((bar_entity, _)) = bars.iter().find(|(_, bar)| bar.0 == edit_entity) else {
            continue;
        };
        for view in views.iter().filter(|view| !existing.contains(&view.id)) {
            spawn_pin(&mut commands, bar_entity, edit_entity, view);
        }
    }
}

fn update_bar_material(
    states: Query<(Entity, &GradientKeysEditState), Changed<GradientKeysEditState>>,
    material_nodes: Query<(&GradientBarMaterialNode, &MaterialNode<GradientBarMaterial>)>,
    mut materials: ResMut<Assets<GradientBarMaterial>>,
) {
    for (edit_entity, state) in &states {
        for (material_node, handle) in &material_nodes {
            if material_node.0 != edit_entity {
                continue;
            }
            if let Some(material) = materials.get_mut(&handle.0) {
                *material =
                    GradientBarMaterial::from_samples(&state.editor.samples(), state.editor.mode());
            }
        }
    }
}
